/*
 * View-side contracts of the presenter layer. `View` is the marker every bound
 * view implements; `ErrorView` is the collaborator able to show an error to
 * the user. Presenters only ever hold weak references to either.
 */
use crate::core::UseCaseError;
use std::sync::Arc;

// Marker for the view component bound to a presenter.
pub trait View: Send + Sync + 'static {}

pub trait ErrorView: Send + Sync {
    fn show_error(&self, error: &Arc<UseCaseError>);
}
