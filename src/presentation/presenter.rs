use crate::core::{
    CallbackId, OnErrorCallback, UseCase, UseCaseError, UseCaseHandlerOperations, UseCaseParams,
};
use crate::presentation::view::{ErrorView, View};
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

/*
 * Local recovery hook offered every error that reaches a presenter through its
 * global error callback, together with the presenter's bound view (if any).
 * Returning true consumes the error, so it is not forwarded to the error view.
 */
pub trait ErrorHook<V: ?Sized>: Send + Sync {
    fn on_error(&self, _error: &UseCaseError, _view: Option<Arc<V>>) -> bool {
        false
    }
}

impl<V: ?Sized, F> ErrorHook<V> for F
where
    F: Fn(&UseCaseError, Option<Arc<V>>) -> bool + Send + Sync,
{
    fn on_error(&self, error: &UseCaseError, view: Option<Arc<V>>) -> bool {
        self(error, view)
    }
}

// The default hook: consumes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoErrorHook;

impl<V: ?Sized> ErrorHook<V> for NoErrorHook {}

// Whether the presenter's global error callback is currently registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Unregistered,
    Registered,
}

/*
 * The handler object a presenter registers with its execution facility. It
 * holds the error hook and the view and error-view slots, shared with the
 * presenter, so the facility can call it from any thread without touching the
 * presenter itself.
 */
pub(crate) struct GlobalErrorCallback<V: View + ?Sized> {
    error_hook: Box<dyn ErrorHook<V>>,
    view: RwLock<Option<Weak<V>>>,
    error_view: RwLock<Option<Weak<dyn ErrorView>>>,
}

impl<V: View + ?Sized> GlobalErrorCallback<V> {
    fn new(error_hook: Box<dyn ErrorHook<V>>) -> Self {
        GlobalErrorCallback {
            error_hook,
            view: RwLock::new(None),
            error_view: RwLock::new(None),
        }
    }

    fn set_view(&self, view: Option<Weak<V>>) {
        *self
            .view
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = view;
    }

    fn view(&self) -> Option<Arc<V>> {
        self.view
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .and_then(Weak::upgrade)
    }

    fn set_error_view(&self, error_view: Option<Weak<dyn ErrorView>>) {
        *self
            .error_view
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = error_view;
    }

    fn error_view(&self) -> Option<Arc<dyn ErrorView>> {
        self.error_view
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .and_then(Weak::upgrade)
    }

    fn consumed_by_hook(&self, error: &UseCaseError) -> bool {
        self.error_hook.on_error(error, self.view())
    }
}

impl<V: View + ?Sized> OnErrorCallback for GlobalErrorCallback<V> {
    fn on_error(&self, error: &Arc<UseCaseError>) {
        if self.consumed_by_hook(error) {
            log::debug!("Presenter: Error consumed by the presenter's hook: {error}");
            return;
        }
        match self.error_view() {
            Some(error_view) => {
                log::debug!("Presenter: Forwarding error to the error view: {error}");
                error_view.show_error(error);
            }
            None => log::warn!("Presenter: No error view bound, dropping error: {error}"),
        }
    }
}

/*
 * Lifecycle-aware mediator between a view and the execution facility.
 *
 * The presenter is created with a shared handle to the facility; the view and
 * error view are attached later by the view binding (see `ViewBinding`). The
 * presenter registers its global error callback on `initialize`/`update` and
 * unregisters it on `pause`, never holding more than one registration.
 *
 * Concrete presenters wrap a `Presenter` and implement `PresenterLifecycle`
 * to add their own behavior around the base lifecycle.
 *
 * A presenter dropped while still registered unregisters itself, so the
 * facility never calls back into a presenter that no longer exists.
 */
pub struct Presenter<V: View + ?Sized> {
    use_case_handler: Arc<dyn UseCaseHandlerOperations>,
    global_error_callback: Arc<GlobalErrorCallback<V>>,
    callback_id: CallbackId,
    registration: Registration,
}

impl<V: View + ?Sized> Presenter<V> {
    pub fn new(use_case_handler: Arc<dyn UseCaseHandlerOperations>) -> Self {
        Self::with_error_hook(use_case_handler, NoErrorHook)
    }

    pub fn with_error_hook(
        use_case_handler: Arc<dyn UseCaseHandlerOperations>,
        error_hook: impl ErrorHook<V> + 'static,
    ) -> Self {
        let callback_id = CallbackId::next();
        log::trace!("Presenter: Created with callback id {callback_id:?}");
        Presenter {
            use_case_handler,
            global_error_callback: Arc::new(GlobalErrorCallback::new(Box::new(error_hook))),
            callback_id,
            registration: Registration::Unregistered,
        }
    }

    // Invoked when the component containing the presenter is initialized.
    pub fn initialize(&mut self) {
        log::trace!("Presenter: initialize ({:?})", self.callback_id);
        self.register_global_error_callback();
    }

    // Invoked when the component containing the presenter is resumed.
    pub fn update(&mut self) {
        log::trace!("Presenter: update ({:?})", self.callback_id);
        self.register_global_error_callback();
    }

    // Invoked when the component containing the presenter is paused.
    pub fn pause(&mut self) {
        log::trace!("Presenter: pause ({:?})", self.callback_id);
        self.unregister_global_error_callback();
    }

    // Invoked when the component containing the presenter is destroyed.
    pub fn destroy(&mut self) {
        log::trace!("Presenter: destroy ({:?})", self.callback_id);
    }

    pub fn execute(&self, use_case: Arc<dyn UseCase>) {
        self.use_case_handler.execute(use_case);
    }

    pub fn execute_with_params(&self, use_case: Arc<dyn UseCase>, params: UseCaseParams) {
        self.use_case_handler.execute_with_params(use_case, params);
    }

    // The bound view, if one is attached and still alive.
    pub fn view(&self) -> Option<Arc<V>> {
        self.global_error_callback.view()
    }

    // Runs the error hook alone, with the bound view; true means the error would be consumed.
    pub fn on_error(&self, error: &UseCaseError) -> bool {
        self.global_error_callback.consumed_by_hook(error)
    }

    pub fn use_case_handler(&self) -> &Arc<dyn UseCaseHandlerOperations> {
        &self.use_case_handler
    }

    pub fn registration(&self) -> Registration {
        self.registration
    }

    pub fn callback_id(&self) -> CallbackId {
        self.callback_id
    }

    pub(crate) fn set_view(&mut self, view: Option<&Arc<V>>) {
        self.global_error_callback
            .set_view(view.map(Arc::downgrade));
    }

    pub(crate) fn set_error_view(&mut self, error_view: Option<&Arc<dyn ErrorView>>) {
        self.global_error_callback
            .set_error_view(error_view.map(Arc::downgrade));
    }

    fn register_global_error_callback(&mut self) {
        if self.registration == Registration::Registered {
            return;
        }
        self.registration = Registration::Registered;
        log::debug!(
            "Presenter: Registering global error callback {:?}",
            self.callback_id
        );
        let callback: Arc<dyn OnErrorCallback> = self.global_error_callback.clone();
        self.use_case_handler
            .register_global_error_callback(self.callback_id, callback);
    }

    // Always calls the facility, even when nothing is registered.
    fn unregister_global_error_callback(&mut self) {
        self.registration = Registration::Unregistered;
        log::debug!(
            "Presenter: Unregistering global error callback {:?}",
            self.callback_id
        );
        self.use_case_handler
            .unregister_global_error_callback(self.callback_id);
    }
}

impl<V: View + ?Sized> Drop for Presenter<V> {
    fn drop(&mut self) {
        if self.registration == Registration::Registered {
            log::debug!(
                "Presenter: Dropped while registered, unregistering {:?}",
                self.callback_id
            );
            self.use_case_handler
                .unregister_global_error_callback(self.callback_id);
        }
    }
}

impl<V: View + ?Sized> fmt::Debug for Presenter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("callback_id", &self.callback_id)
            .field("registration", &self.registration)
            .field("has_view", &self.view().is_some())
            .field(
                "has_error_view",
                &self.global_error_callback.error_view().is_some(),
            )
            .finish()
    }
}
