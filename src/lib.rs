/*
 * A lifecycle-aware presenter layer for the Model-View-Presenter pattern.
 *
 * `core` holds the use-case model and the execution-facility abstraction;
 * `presentation` holds the base `Presenter` and the view binding that drives
 * it from its host's lifecycle.
 */
pub mod core;
pub mod logging;
pub mod presentation;

pub use logging::{LoggingError, initialize_logging, initialize_logging_with};
