// src/main.rs

use lifecycle_presenter::core::{
    AppConfig, ConfigManagerOperations, CoreConfigManager, InlineUseCaseHandler, UseCase,
    UseCaseError, UseCaseHandlerOperations, UseCaseParams, use_case,
};
use lifecycle_presenter::presentation::{
    ErrorView, LifecycleEvent, Presenter, PresenterLifecycle, View, ViewBinding,
};
use std::sync::Arc;

const APP_NAME: &str = "LifecyclePresenterDemo";

struct ConsoleView;
impl View for ConsoleView {}

impl ConsoleView {
    fn show_hint(&self, hint: &str) {
        println!("[view] {hint}");
    }
}

struct ConsoleErrorView;

impl ErrorView for ConsoleErrorView {
    fn show_error(&self, error: &Arc<UseCaseError>) {
        println!("[error view] {error}");
    }
}

// Looks up a user by the name given as first argument.
struct LoadUserUseCase;

impl UseCase for LoadUserUseCase {
    fn name(&self) -> &str {
        "load_user"
    }

    fn run(&self, params: &UseCaseParams) -> use_case::Result<()> {
        let name = params
            .arg(0)
            .and_then(|v| v.as_str())
            .ok_or_else(|| UseCaseError::new("No user name given"))?;
        if name.trim().is_empty() {
            return Err(UseCaseError::new("User name is blank"));
        }
        println!("[use case] Loaded user '{name}'");
        Ok(())
    }
}

// Turns "blank name" errors into a hint on its own view; everything else reaches the error view.
struct UserPresenter {
    base: Presenter<ConsoleView>,
}

impl UserPresenter {
    fn new(use_case_handler: Arc<dyn UseCaseHandlerOperations>) -> Self {
        let base = Presenter::with_error_hook(
            use_case_handler,
            |error: &UseCaseError, view: Option<Arc<ConsoleView>>| {
                if error.message() != "User name is blank" {
                    return false;
                }
                log::info!("UserPresenter: Blank user name, showing a hint instead.");
                if let Some(view) = view {
                    view.show_hint("Please type a user name.");
                }
                true
            },
        );
        UserPresenter { base }
    }

    fn load_user(&self, name: Option<&str>) {
        let mut builder = UseCaseParams::builder().use_case_name("load_user");
        if let Some(name) = name {
            builder = builder.arg(name);
        }
        self.base
            .execute_with_params(Arc::new(LoadUserUseCase), builder.build());
    }
}

impl PresenterLifecycle for UserPresenter {
    type View = ConsoleView;

    fn presenter(&self) -> &Presenter<ConsoleView> {
        &self.base
    }

    fn presenter_mut(&mut self) -> &mut Presenter<ConsoleView> {
        &mut self.base
    }

    fn initialize(&mut self) {
        self.base.initialize();
        self.load_user(Some("ada"));
    }
}

fn load_config(config_manager: &dyn ConfigManagerOperations) -> AppConfig {
    match config_manager.load_config(APP_NAME) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load settings, using defaults: {e}");
            AppConfig::default()
        }
    }
}

fn main() {
    let config_manager = CoreConfigManager::new();
    let config = load_config(&config_manager);
    match config_manager.config_dir(APP_NAME) {
        Ok(dir) => {
            if let Err(e) = lifecycle_presenter::initialize_logging_with(&config, &dir) {
                eprintln!("{e}");
                lifecycle_presenter::initialize_logging();
            }
        }
        Err(e) => {
            eprintln!("{e}");
            lifecycle_presenter::initialize_logging();
        }
    }

    let use_case_handler: Arc<dyn UseCaseHandlerOperations> = Arc::new(InlineUseCaseHandler::new());
    let view = Arc::new(ConsoleView);
    let error_view: Arc<dyn ErrorView> = Arc::new(ConsoleErrorView);
    let mut binding = ViewBinding::new(UserPresenter::new(Arc::clone(&use_case_handler)));

    binding.handle_event(LifecycleEvent::Created {
        view: &view,
        error_view: Some(&error_view),
    });
    binding.handle_event(LifecycleEvent::Resumed);

    binding.presenter().load_user(None);
    binding.presenter().load_user(Some("  "));

    binding.handle_event(LifecycleEvent::Paused);
    // Nobody is registered while paused; the handler only logs this failure.
    binding.presenter().load_user(None);

    binding.handle_event(LifecycleEvent::Destroyed);
    log::info!("Demo finished.");
}
