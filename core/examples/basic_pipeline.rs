// stepchain/examples/basic_pipeline.rs

use parking_lot::Mutex;
use std::sync::Arc;
use stepchain::{FlowError, Never, Pipeline, PipelineResult};
use tracing::info;

// 1. The value threaded through the chain. Steps take it by value and hand
//    a (possibly new) value to the next step.
#[derive(Clone, Debug, Default)]
struct Order {
  id: u32,
  items: Vec<String>,
  total_cents: u64,
}

fn main() -> Result<(), FlowError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // Something a step holds while the rest of the chain runs.
  let audit: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
  let audit_in_step = audit.clone();

  // 2. Build the chain. Every step decides whether to call `next`.
  let pipeline = Pipeline::<Order, FlowError>::new(Never, Vec::new())
    .step(move |order, next| {
      // Code before `next.run` runs on the way in, code after it on the way out.
      audit_in_step.lock().push(format!("open order {}", order.id));
      let result = next.run(order);
      audit_in_step.lock().push("close order".to_string());
      result
    })
    .step(|mut order, next| {
      order.items.push("widget".to_string());
      order.total_cents += 1_250;
      info!("Added widget: total = {}", order.total_cents);
      next.run(order)
    })
    .step(|mut order, next| {
      order.total_cents = order.total_cents * 108 / 100;
      info!("Applied tax: total = {}", order.total_cents);
      next.run(order)
    })
    .with_success_callback(|order| {
      info!(
        "Order {} completed with {} item(s), total {} cents",
        order.id,
        order.items.len(),
        order.total_cents
      );
    });

  // 3. Run it.
  let result = pipeline.run(Order { id: 7, ..Default::default() })?;

  match result {
    PipelineResult::Completed => info!("Pipeline completed successfully!"),
    PipelineResult::Stopped => info!("Pipeline was stopped early."),
    PipelineResult::Aborted => info!("Pipeline was aborted."),
  }

  // The outer step released its "resource" only after the chain returned.
  let audit = audit.lock();
  info!("Audit trail: {:?}", *audit);
  assert_eq!(*audit, vec!["open order 7".to_string(), "close order".to_string()]);
  assert!(pipeline.is_terminal());

  // A second run does nothing: the pipeline is single-shot.
  assert_eq!(pipeline.run(Order::default())?, PipelineResult::Completed);

  Ok(())
}
