/*
 * The platform-agnostic core: the use-case model, the execution-facility
 * abstraction (`UseCaseHandlerOperations`) with its inline reference
 * implementation, the error-callback registry, and application configuration.
 */
pub mod config;
pub mod error_callback;
pub mod path_utils;
pub mod use_case;
pub mod use_case_handler;

pub use config::{AppConfig, ConfigError, ConfigManagerOperations, CoreConfigManager, LogLevel};
pub use error_callback::{CallbackId, ErrorCallbackRegistry, OnErrorCallback};
pub use use_case::{UseCase, UseCaseError, UseCaseParams, UseCaseParamsBuilder};
pub use use_case_handler::{InlineUseCaseHandler, UseCaseHandlerOperations};
