/*
 * Error callbacks and the token-keyed registry that execution facilities use
 * to hold the global ones. Callbacks are registered under a `CallbackId`
 * chosen by their owner, so the same owner can register and unregister without
 * needing pointer identity.
 */
use crate::core::use_case::UseCaseError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);

// An opaque token identifying one registered global error callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
    // Mints a process-wide unique identifier.
    pub fn next() -> Self {
        CallbackId(NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

pub trait OnErrorCallback: Send + Sync {
    fn on_error(&self, error: &Arc<UseCaseError>);
}

impl<F> OnErrorCallback for F
where
    F: Fn(&Arc<UseCaseError>) + Send + Sync,
{
    fn on_error(&self, error: &Arc<UseCaseError>) {
        self(error)
    }
}

/*
 * Holds the global error callbacks of an execution facility. Notification
 * works on a snapshot so that a callback may register or unregister callbacks
 * (including itself) without deadlocking.
 */
#[derive(Default)]
pub struct ErrorCallbackRegistry {
    callbacks: Mutex<BTreeMap<CallbackId, Arc<dyn OnErrorCallback>>>,
}

impl ErrorCallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<CallbackId, Arc<dyn OnErrorCallback>>> {
        self.callbacks.lock().unwrap_or_else(|poisoned| {
            log::warn!("ErrorCallbackRegistry: Recovering from a poisoned lock.");
            poisoned.into_inner()
        })
    }

    // Registers `callback` under `id`, replacing any callback already stored there.
    pub fn register(&self, id: CallbackId, callback: Arc<dyn OnErrorCallback>) {
        if self.lock().insert(id, callback).is_some() {
            log::debug!("ErrorCallbackRegistry: Replaced callback {id:?}.");
        } else {
            log::trace!("ErrorCallbackRegistry: Registered callback {id:?}.");
        }
    }

    // Returns true if a callback was stored under `id`.
    pub fn unregister(&self, id: CallbackId) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            log::trace!("ErrorCallbackRegistry: Unregistered callback {id:?}.");
        } else {
            log::trace!("ErrorCallbackRegistry: No callback registered under {id:?}.");
        }
        removed
    }

    pub fn is_registered(&self, id: CallbackId) -> bool {
        self.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /*
     * Delivers `error` to every registered callback in registration-token order.
     * Returns false when there was nobody to deliver to.
     */
    pub fn notify(&self, error: &Arc<UseCaseError>) -> bool {
        let snapshot: Vec<Arc<dyn OnErrorCallback>> = self.lock().values().cloned().collect();
        for callback in &snapshot {
            callback.on_error(error);
        }
        !snapshot.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingCallback {
        calls: AtomicUsize,
    }

    impl OnErrorCallback for CountingCallback {
        fn on_error(&self, _error: &Arc<UseCaseError>) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_callback_ids_are_unique() {
        let a = CallbackId::next();
        let b = CallbackId::next();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }

    #[test]
    fn test_register_notify_unregister() {
        // Arrange
        crate::initialize_logging();
        let registry = ErrorCallbackRegistry::new();
        let callback = Arc::new(CountingCallback::default());
        let id = CallbackId::next();
        let error = Arc::new(UseCaseError::new("boom"));

        // Act & Assert
        assert!(!registry.notify(&error));
        registry.register(id, callback.clone());
        assert!(registry.is_registered(id));
        assert!(registry.notify(&error));
        assert_eq!(callback.calls.load(Ordering::SeqCst), 1);

        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));
        assert!(registry.is_empty());
        assert!(!registry.notify(&error));
        assert_eq!(callback.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_register_same_id_replaces_previous_callback() {
        let registry = ErrorCallbackRegistry::new();
        let first = Arc::new(CountingCallback::default());
        let second = Arc::new(CountingCallback::default());
        let id = CallbackId::next();

        registry.register(id, first.clone());
        registry.register(id, second.clone());
        registry.notify(&Arc::new(UseCaseError::new("boom")));

        assert_eq!(registry.len(), 1);
        assert_eq!(first.calls.load(Ordering::SeqCst), 0);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_unregister_itself_during_notify() {
        let registry = Arc::new(ErrorCallbackRegistry::new());
        let id = CallbackId::next();
        let registry_for_callback = Arc::clone(&registry);
        registry.register(
            id,
            Arc::new(move |_error: &Arc<UseCaseError>| {
                registry_for_callback.unregister(id);
            }),
        );

        assert!(registry.notify(&Arc::new(UseCaseError::new("boom"))));
        assert!(registry.is_empty());
    }
}
