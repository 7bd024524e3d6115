/*
 * Drives presenters from the lifecycle of the component that hosts their view.
 * The host forwards `LifecycleEvent`s to a `ViewBinding`, which attaches the
 * view and error view on creation and maps each event onto the presenter's
 * lifecycle methods.
 */
use crate::presentation::presenter::Presenter;
use crate::presentation::view::{ErrorView, View};
use std::sync::Arc;

/*
 * Lifecycle entry points of a presenter. `Presenter` implements this directly;
 * concrete presenters wrap a `Presenter`, expose it through `presenter`/
 * `presenter_mut`, and override the methods they need to extend, calling the
 * base presenter from their override.
 */
pub trait PresenterLifecycle {
    type View: View + ?Sized;

    fn presenter(&self) -> &Presenter<Self::View>;
    fn presenter_mut(&mut self) -> &mut Presenter<Self::View>;

    fn initialize(&mut self) {
        self.presenter_mut().initialize();
    }

    fn update(&mut self) {
        self.presenter_mut().update();
    }

    fn pause(&mut self) {
        self.presenter_mut().pause();
    }

    fn destroy(&mut self) {
        self.presenter_mut().destroy();
    }
}

impl<V: View + ?Sized> PresenterLifecycle for Presenter<V> {
    type View = V;

    fn presenter(&self) -> &Presenter<V> {
        self
    }

    fn presenter_mut(&mut self) -> &mut Presenter<V> {
        self
    }
}

// Lifecycle notifications from the component hosting the view.
pub enum LifecycleEvent<'a, V: View + ?Sized> {
    Created {
        view: &'a Arc<V>,
        error_view: Option<&'a Arc<dyn ErrorView>>,
    },
    Resumed,
    Paused,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Detached,
    Created,
    Resumed,
    Paused,
    Destroyed,
}

/*
 * Owns a presenter on behalf of a hosting component. The binding is the only
 * place that attaches views to a presenter.
 */
pub struct ViewBinding<P: PresenterLifecycle> {
    presenter: P,
    state: BindingState,
}

impl<P: PresenterLifecycle> ViewBinding<P> {
    pub fn new(presenter: P) -> Self {
        ViewBinding {
            presenter,
            state: BindingState::Detached,
        }
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn handle_event(&mut self, event: LifecycleEvent<'_, P::View>) {
        if self.state == BindingState::Destroyed {
            log::warn!(
                "ViewBinding: Ignoring {} event after the binding was destroyed.",
                event_name(&event)
            );
            return;
        }

        match event {
            LifecycleEvent::Created { view, error_view } => {
                log::debug!(
                    "ViewBinding: Created, attaching view (error view: {}).",
                    error_view.is_some()
                );
                let base = self.presenter.presenter_mut();
                base.set_view(Some(view));
                base.set_error_view(error_view);
                self.presenter.initialize();
                self.state = BindingState::Created;
            }
            LifecycleEvent::Resumed => {
                log::debug!("ViewBinding: Resumed.");
                self.presenter.update();
                self.state = BindingState::Resumed;
            }
            LifecycleEvent::Paused => {
                log::debug!("ViewBinding: Paused.");
                self.presenter.pause();
                self.state = BindingState::Paused;
            }
            LifecycleEvent::Destroyed => {
                log::debug!("ViewBinding: Destroyed.");
                self.presenter.destroy();
                self.state = BindingState::Destroyed;
            }
        }
    }
}

fn event_name<V: View + ?Sized>(event: &LifecycleEvent<'_, V>) -> &'static str {
    match event {
        LifecycleEvent::Created { .. } => "Created",
        LifecycleEvent::Resumed => "Resumed",
        LifecycleEvent::Paused => "Paused",
        LifecycleEvent::Destroyed => "Destroyed",
    }
}
