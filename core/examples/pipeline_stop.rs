// stepchain/examples/pipeline_stop.rs

use stepchain::{FlowError, Never, Pipeline, PipelineResult};
use tracing::info;

fn main() -> Result<(), FlowError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Pipeline Stop Example ---");

  let pipeline = Pipeline::<u32, FlowError>::new(Never, Vec::new())
    .step(|n, next| {
      info!("validate: {}", n);
      next.run(n)
    })
    .step(|n, next| {
      if n % 2 == 1 {
        info!("Odd input {}; nothing left to do.", n);
        return next.stop();
      }
      next.run(n / 2)
    })
    .step(|n, next| {
      info!("This step never runs for odd input (got {}).", n);
      next.run(n)
    })
    .with_success_callback(|n| info!("success callback: {}", n));

  let result = pipeline.run(5)?;
  info!("Pipeline result: {:?}", result);
  assert_eq!(result, PipelineResult::Stopped);
  // Stopping fires no callback; the cursor stays on the step that stopped.
  assert_eq!(pipeline.cursor(), Some(1));

  Ok(())
}
