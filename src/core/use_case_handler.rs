/*
 * The execution-facility seam. Presenters only talk to `UseCaseHandlerOperations`;
 * how and where use cases actually run is up to the implementation.
 *
 * `InlineUseCaseHandler` is the reference implementation: it runs each use case
 * synchronously on the calling thread and routes failures either to the
 * per-call error callback or to the global callbacks.
 */
use crate::core::error_callback::{CallbackId, ErrorCallbackRegistry, OnErrorCallback};
use crate::core::use_case::{UseCase, UseCaseError, UseCaseParams};
use std::sync::Arc;

pub trait UseCaseHandlerOperations: Send + Sync {
    fn execute(&self, use_case: Arc<dyn UseCase>);
    fn execute_with_params(&self, use_case: Arc<dyn UseCase>, params: UseCaseParams);
    fn register_global_error_callback(&self, id: CallbackId, callback: Arc<dyn OnErrorCallback>);
    fn unregister_global_error_callback(&self, id: CallbackId);
}

#[derive(Default)]
pub struct InlineUseCaseHandler {
    global_error_callbacks: ErrorCallbackRegistry,
}

impl InlineUseCaseHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global_error_callback_count(&self) -> usize {
        self.global_error_callbacks.len()
    }

    fn dispatch_error(&self, use_case_name: &str, params: &UseCaseParams, error: UseCaseError) {
        let error = Arc::new(error);
        if let Some(local_callback) = params.on_error() {
            log::debug!(
                "InlineUseCaseHandler: Use case '{use_case_name}' failed, notifying its own callback: {error}"
            );
            local_callback.on_error(&error);
            return;
        }

        log::debug!(
            "InlineUseCaseHandler: Use case '{use_case_name}' failed, notifying global callbacks: {error}"
        );
        if !self.global_error_callbacks.notify(&error) {
            log::warn!(
                "InlineUseCaseHandler: Unhandled error from use case '{use_case_name}', no callback registered: {error}"
            );
        }
    }
}

impl UseCaseHandlerOperations for InlineUseCaseHandler {
    fn execute(&self, use_case: Arc<dyn UseCase>) {
        self.execute_with_params(use_case, UseCaseParams::default());
    }

    fn execute_with_params(&self, use_case: Arc<dyn UseCase>, params: UseCaseParams) {
        let use_case_name = params
            .use_case_name()
            .unwrap_or_else(|| use_case.name())
            .to_string();
        log::trace!("InlineUseCaseHandler: Executing use case '{use_case_name}' with {params:?}");

        match use_case.run(&params) {
            Ok(()) => log::trace!("InlineUseCaseHandler: Use case '{use_case_name}' completed."),
            Err(e) => self.dispatch_error(&use_case_name, &params, e),
        }
    }

    fn register_global_error_callback(&self, id: CallbackId, callback: Arc<dyn OnErrorCallback>) {
        self.global_error_callbacks.register(id, callback);
    }

    fn unregister_global_error_callback(&self, id: CallbackId) {
        self.global_error_callbacks.unregister(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::use_case;
    use std::sync::Mutex;

    struct ScriptedUseCase {
        name: &'static str,
        failure: Option<&'static str>,
        seen_args: Mutex<Vec<usize>>,
    }

    impl ScriptedUseCase {
        fn succeeding(name: &'static str) -> Self {
            ScriptedUseCase {
                name,
                failure: None,
                seen_args: Mutex::new(Vec::new()),
            }
        }

        fn failing(name: &'static str, message: &'static str) -> Self {
            ScriptedUseCase {
                name,
                failure: Some(message),
                seen_args: Mutex::new(Vec::new()),
            }
        }
    }

    impl UseCase for ScriptedUseCase {
        fn name(&self) -> &str {
            self.name
        }

        fn run(&self, params: &UseCaseParams) -> use_case::Result<()> {
            self.seen_args.lock().unwrap().push(params.args().len());
            match self.failure {
                Some(message) => Err(UseCaseError::new(message)),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct RecordingCallback {
        messages: Mutex<Vec<String>>,
    }

    impl OnErrorCallback for RecordingCallback {
        fn on_error(&self, error: &Arc<UseCaseError>) {
            self.messages.lock().unwrap().push(error.message().to_string());
        }
    }

    #[test]
    fn test_execute_runs_use_case_inline() {
        crate::initialize_logging();
        let handler = InlineUseCaseHandler::new();
        let use_case = Arc::new(ScriptedUseCase::succeeding("refresh"));

        handler.execute(use_case.clone());
        handler.execute_with_params(
            use_case.clone(),
            UseCaseParams::builder().args(["a", "b"]).build(),
        );

        assert_eq!(*use_case.seen_args.lock().unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_failure_goes_to_global_callbacks() {
        // Arrange
        crate::initialize_logging();
        let handler = InlineUseCaseHandler::new();
        let first = Arc::new(RecordingCallback::default());
        let second = Arc::new(RecordingCallback::default());
        handler.register_global_error_callback(CallbackId::next(), first.clone());
        handler.register_global_error_callback(CallbackId::next(), second.clone());

        // Act
        handler.execute(Arc::new(ScriptedUseCase::failing("sync", "offline")));

        // Assert
        assert_eq!(*first.messages.lock().unwrap(), vec!["offline".to_string()]);
        assert_eq!(*second.messages.lock().unwrap(), vec!["offline".to_string()]);
    }

    #[test]
    fn test_per_call_callback_takes_precedence_over_global() {
        crate::initialize_logging();
        let handler = InlineUseCaseHandler::new();
        let global = Arc::new(RecordingCallback::default());
        let local = Arc::new(RecordingCallback::default());
        handler.register_global_error_callback(CallbackId::next(), global.clone());

        handler.execute_with_params(
            Arc::new(ScriptedUseCase::failing("save", "disk full")),
            UseCaseParams::builder().on_error(local.clone()).build(),
        );

        assert_eq!(*local.messages.lock().unwrap(), vec!["disk full".to_string()]);
        assert!(global.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unhandled_failure_does_not_panic() {
        crate::initialize_logging();
        let handler = InlineUseCaseHandler::new();
        handler.execute(Arc::new(ScriptedUseCase::failing("sync", "nobody listens")));
        assert_eq!(handler.global_error_callback_count(), 0);
    }

    #[test]
    fn test_unregistered_callback_is_not_notified() {
        crate::initialize_logging();
        let handler = InlineUseCaseHandler::new();
        let callback = Arc::new(RecordingCallback::default());
        let id = CallbackId::next();
        handler.register_global_error_callback(id, callback.clone());
        handler.unregister_global_error_callback(id);
        // Unregistering twice is harmless.
        handler.unregister_global_error_callback(id);

        handler.execute(Arc::new(ScriptedUseCase::failing("sync", "offline")));

        assert!(callback.messages.lock().unwrap().is_empty());
        assert_eq!(handler.global_error_callback_count(), 0);
    }
}
