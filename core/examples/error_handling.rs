// stepchain/examples/error_handling.rs

use stepchain::{FlowError, Never, Pipeline, PipelineResult};
use tracing::{error, info};

// 1. An application error type. Converting from FlowError lets steps use `?`
//    on engine errors as well as their own.
#[derive(Debug, thiserror::Error)]
enum AppError {
  #[error("stepchain: {0}")]
  Flow(#[from] FlowError),

  #[error("payment declined: {reason}")]
  Declined { reason: String },
}

fn main() -> Result<(), AppError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Error Handling Example ---");

  let pipeline = Pipeline::<u64, AppError>::new(Never, Vec::new())
    .step(|cents, next| {
      // Wraps everything downstream; errors pass back through here.
      next.run(cents).map_err(|e| {
        error!("checkout failed: {}", e);
        e
      })
    })
    .step(|cents, next| next.run(cents + 499))
    .step(|cents, _next| {
      Err(AppError::Declined {
        reason: format!("{} cents exceeds the card limit", cents),
      })
    })
    .with_error_callback(|cents, e| info!("error callback: value = {}, error = {}", cents, e))
    .with_success_callback(|_| unreachable!("the chain never completes"));

  match pipeline.run(10_000) {
    Err(AppError::Declined { reason }) => info!("Handled decline: {}", reason),
    Err(other) => return Err(other),
    Ok(result) => info!("Unexpected result: {:?}", result),
  }

  // Engine-level errors convert into the application error type.
  let aborted: AppError = PipelineResult::Aborted.into_flow_result().unwrap_err().into();
  info!("Converted engine error: {}", aborted);

  Ok(())
}
