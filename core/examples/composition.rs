// stepchain/examples/composition.rs

use stepchain::{FlowError, Never, Pipeline, PipelineResult};
use tracing::info;

/// A reusable sub-chain: normalizes a user name.
fn normalize() -> Pipeline<String, FlowError> {
  Pipeline::new(Never, Vec::new())
    .step(|name: String, next| next.run(name.trim().to_string()))
    .step(|name: String, next| next.run(name.to_lowercase()))
    .with_success_callback(|name| info!("[normalize] done: '{}'", name))
}

fn main() -> Result<(), FlowError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Composition Example ---");

  // The nested pipeline's steps run as if spliced in place of `as_step()`;
  // its success callback fires before the outer chain continues.
  let pipeline = Pipeline::<String, FlowError>::new(Never, Vec::new())
    .step(|raw, next| {
      info!("[outer] received '{}'", raw);
      next.run(raw)
    })
    .then(normalize().as_step())
    .step(|name, next| {
      if name.is_empty() {
        return Err(FlowError::Step {
          source: anyhow::anyhow!("empty user name"),
        });
      }
      next.run(format!("user:{}", name))
    })
    .with_success_callback(|key| info!("[outer] stored under '{}'", key))
    .with_error_callback(|name, e| info!("[outer] failed for '{}': {}", name, e));

  let result = pipeline.run("  Ada Lovelace ".to_string())?;
  assert_eq!(result, PipelineResult::Completed);

  Ok(())
}
