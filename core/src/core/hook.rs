// stepchain/src/core/hook.rs

//! Fire-once storage for lifecycle callbacks.

use parking_lot::Mutex;

/// Callback for the success and abort paths.
pub type Callback<T> = Box<dyn FnOnce(&T) + Send>;

/// Callback for the error path; receives the value handed to the failing step.
pub type ErrorCallback<T, E> = Box<dyn FnOnce(&T, &E) + Send>;

/// Observable state of a lifecycle hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
  /// No callback was registered.
  Unset,
  /// A callback is registered and has not fired.
  Pending,
  /// The callback fired. It never fires again.
  Fired,
}

/// Which lifecycle hook to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
  Success,
  Abort,
  Error,
}

enum Slot<F> {
  Unset,
  Pending(F),
  Fired,
}

pub(crate) struct Hook<F> {
  slot: Mutex<Slot<F>>,
}

impl<F> Hook<F> {
  pub(crate) fn new() -> Self {
    Hook {
      slot: Mutex::new(Slot::Unset),
    }
  }

  /// Installs `f` unless the hook already fired. Returns false when `f` was dropped.
  pub(crate) fn replace(&mut self, f: F) -> bool {
    let slot = self.slot.get_mut();
    if matches!(slot, Slot::Fired) {
      return false;
    }
    *slot = Slot::Pending(f);
    true
  }

  /// Hands out the callback exactly once, moving the slot to `Fired`.
  pub(crate) fn take(&self) -> Option<F> {
    let mut slot = self.slot.lock();
    match std::mem::replace(&mut *slot, Slot::Fired) {
      Slot::Pending(f) => Some(f),
      Slot::Unset => {
        *slot = Slot::Unset;
        None
      }
      Slot::Fired => None,
    }
  }

  pub(crate) fn is_pending(&self) -> bool {
    matches!(*self.slot.lock(), Slot::Pending(_))
  }

  pub(crate) fn state(&self) -> HookState {
    match *self.slot.lock() {
      Slot::Unset => HookState::Unset,
      Slot::Pending(_) => HookState::Pending,
      Slot::Fired => HookState::Fired,
    }
  }
}
