/*
 * The presentation layer: the base `Presenter`, the view contracts it talks
 * to, and the `ViewBinding` that drives presenters from their host's
 * lifecycle. Unit tests for `Presenter` are in `presenter_tests.rs`.
 */
pub mod lifecycle;
pub mod presenter;
pub mod view;


pub use lifecycle::{BindingState, LifecycleEvent, PresenterLifecycle, ViewBinding};
pub use presenter::{ErrorHook, NoErrorHook, Presenter, Registration};
pub use view::{ErrorView, View};
