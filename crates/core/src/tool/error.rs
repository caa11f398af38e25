use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Display};

use crate::schema::Violation;

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The raw arguments did not conform to the tool's schema.
    InvalidArguments,
    /// Error occurred while executing the tool.
    ExecutionFailed,
    /// The invocation was cancelled or timed out before completion.
    Cancelled,
    /// No tool with the requested name is registered.
    UnknownTool,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArguments => write!(f, "Invalid arguments"),
            ErrorKind::ExecutionFailed => write!(f, "Execution failed"),
            ErrorKind::Cancelled => write!(f, "Cancelled"),
            ErrorKind::UnknownTool => write!(f, "Unknown tool"),
        }
    }
}

/// Describes a tool invocation error.
///
/// Errors are plain inspectable values: the orchestrator looks at the
/// [`kind`](Error::kind) to decide whether to re-prompt the model with
/// corrected arguments (`InvalidArguments`), retry (`ExecutionFailed`),
/// or abort. Nothing is swallowed and no partial result is ever
/// produced alongside an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    reason: Option<String>,
    violations: Vec<Violation>,
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            reason: None,
            violations: vec![],
        }
    }

    /// Creates a new error with the `InvalidArguments` kind.
    #[inline]
    pub fn invalid_arguments() -> Self {
        Self::new(ErrorKind::InvalidArguments)
    }

    /// Creates a new error with the `ExecutionFailed` kind.
    #[inline]
    pub fn execution_failed() -> Self {
        Self::new(ErrorKind::ExecutionFailed)
    }

    /// Creates a new error with the `Cancelled` kind.
    #[inline]
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled)
    }

    /// Creates a new error with the `UnknownTool` kind.
    #[inline]
    pub fn unknown_tool() -> Self {
        Self::new(ErrorKind::UnknownTool)
    }

    /// Attaches a reason to the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the schema violations that caused the error.
    #[inline]
    pub fn with_violations(mut self, violations: Vec<Violation>) -> Self {
        self.violations = violations;
        self
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the schema violations carried by this error.
    ///
    /// Empty unless the kind is
    /// [`InvalidArguments`](ErrorKind::InvalidArguments).
    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the reason for the error.
    ///
    /// Falls back to the violation list, then to the kind.
    pub fn reason(&self) -> Cow<'_, str> {
        if let Some(reason) = self.reason.as_deref() {
            return Cow::Borrowed(reason);
        }
        if !self.violations.is_empty() {
            let joined = self
                .violations
                .iter()
                .map(|violation| violation.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Cow::Owned(joined);
        }
        Cow::Owned(format!("{}", self.kind))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reason.is_none() && self.violations.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.reason())
        }
    }
}

impl StdError for Error {}
