/*
 * Defines the use-case model shared by presenters and execution facilities.
 * A `UseCase` is an opaque unit of business logic; `UseCaseParams` carries the
 * optional name, positional arguments and a per-call error callback; and
 * `UseCaseError` is the single error kind delivered back to presenters.
 */
use crate::core::error_callback::OnErrorCallback;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/*
 * The error value produced by a failing use case. It is handed around as
 * `Arc<UseCaseError>` so that every collaborator along the error flow observes
 * the same instance.
 */
#[derive(Debug)]
pub struct UseCaseError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl UseCaseError {
    pub fn new(message: impl Into<String>) -> Self {
        UseCaseError {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        UseCaseError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.message, source),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for UseCaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for UseCaseError {
    fn from(err: std::io::Error) -> Self {
        UseCaseError::with_source("I/O failure in use case", err)
    }
}

impl From<serde_json::Error> for UseCaseError {
    fn from(err: serde_json::Error) -> Self {
        UseCaseError::with_source("Invalid use case arguments", err)
    }
}

pub type Result<T> = std::result::Result<T, UseCaseError>;

// A unit of business logic run by an execution facility.
pub trait UseCase: Send + Sync {
    fn name(&self) -> &str;
    fn run(&self, params: &UseCaseParams) -> Result<()>;
}

/*
 * Per-execution parameters. The error callback, when present, takes precedence
 * over the global callbacks registered with the execution facility.
 */
#[derive(Clone, Default)]
pub struct UseCaseParams {
    use_case_name: Option<String>,
    args: Vec<Value>,
    on_error: Option<Arc<dyn OnErrorCallback>>,
}

impl UseCaseParams {
    pub fn builder() -> UseCaseParamsBuilder {
        UseCaseParamsBuilder::default()
    }

    pub fn use_case_name(&self) -> Option<&str> {
        self.use_case_name.as_deref()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    pub fn on_error(&self) -> Option<&Arc<dyn OnErrorCallback>> {
        self.on_error.as_ref()
    }
}

impl fmt::Debug for UseCaseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UseCaseParams")
            .field("use_case_name", &self.use_case_name)
            .field("args", &self.args)
            .field("has_on_error", &self.on_error.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct UseCaseParamsBuilder {
    params: UseCaseParams,
}

impl UseCaseParamsBuilder {
    pub fn use_case_name(mut self, name: impl Into<String>) -> Self {
        self.params.use_case_name = Some(name.into());
        self
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.params.args.push(value.into());
        self
    }

    pub fn args<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.params.args.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn on_error(mut self, callback: Arc<dyn OnErrorCallback>) -> Self {
        self.params.on_error = Some(callback);
        self
    }

    pub fn build(self) -> UseCaseParams {
        self.params
    }
}
