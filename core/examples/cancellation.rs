// stepchain/examples/cancellation.rs

use std::thread;
use std::time::Duration;
use stepchain::{AnySignal, CancellationFlag, Deadline, FlowError, Pipeline, PipelineResult};
use tracing::{info, warn};

fn main() -> Result<(), FlowError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Cancellation Example ---");

  // Cancelled either by hand or once the deadline passes.
  let shutdown = CancellationFlag::new();
  let signal = AnySignal::new()
    .with(shutdown.clone())
    .with(Deadline::after(Duration::from_secs(5)));

  let trigger = shutdown.clone();
  let pipeline = Pipeline::<u64, FlowError>::new(signal, Vec::new())
    .step(|n, next| {
      info!("fetch: {}", n);
      next.run(n + 1)
    })
    .step(move |n, next| {
      // Somebody else asks for shutdown while this step is working.
      let trigger = trigger.clone();
      thread::spawn(move || trigger.cancel())
        .join()
        .map_err(|_| FlowError::Internal("shutdown thread panicked".to_string()))?;
      info!("transform: {} (still finishing after cancellation)", n);
      next.run(n * 10)
    })
    .step(|n, next| {
      info!("store: {}", n);
      next.run(n)
    })
    .with_abort_callback(|n| warn!("aborted before storing; last value was {}", n))
    .with_success_callback(|n| info!("stored {}", n));

  let result = pipeline.run(1)?;
  info!("Pipeline result: {:?}", result);
  assert_eq!(result, PipelineResult::Aborted);

  // Callers that treat an abort as a failure can convert the outcome.
  if let Err(e) = result.into_flow_result() {
    info!("as a FlowResult: {}", e);
  }

  Ok(())
}
