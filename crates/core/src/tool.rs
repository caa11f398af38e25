//! Tool declaration and invocation.

mod error;
mod registry;

use std::pin::Pin;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::schema::Schema;

pub use error::{Error, ErrorKind};
pub use registry::{Registry, RegistryBuilder};

/// The result of a tool invocation.
pub type ToolResult = Result<String, Error>;

/// A capability that an agent orchestrator can discover and invoke.
///
/// Implementations of this trait should be stateless, and may not
/// maintain any internal state: a tool is constructed once, registered,
/// and never mutated afterwards, so it can be invoked concurrently from
/// multiple callers.
///
/// The declared [`Schema`] is the single source of truth for the tool's
/// arguments. Raw argument records are validated against it before
/// being deserialized into [`Tool::Input`], so `execute` only ever sees
/// well-formed input.
pub trait Tool: Send + Sync + 'static {
    /// The validated argument record that the tool accepts.
    type Input: DeserializeOwned;

    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool, which orchestrators use to
    /// decide whether the tool applies to a request.
    fn description(&self) -> &str;

    /// Returns the argument schema of the tool.
    fn schema(&self) -> &Schema;

    /// Executes the tool with the given input.
    ///
    /// This method must return a future that is fully independent of
    /// `self`, and the future should be cancellation safe.
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static;
}

/// The discovery record of one tool: everything an orchestrator needs
/// to build a function-calling declaration for a model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// The argument schema, as a
    /// [JSON schema](https://json-schema.org/) object.
    pub parameters: Value,
}

pub(crate) trait ToolObject: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn schema(&self) -> &Schema;

    fn invoke(
        &self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>>;
}

pub(crate) struct AnyTool<T: Tool>(pub T);

impl<T: Tool> ToolObject for AnyTool<T> {
    #[inline]
    fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    fn description(&self) -> &str {
        self.0.description()
    }

    #[inline]
    fn schema(&self) -> &Schema {
        self.0.schema()
    }

    fn invoke(
        &self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> {
        let validated = match self.0.schema().validate(arguments) {
            Ok(validated) => validated,
            Err(violations) => {
                return Box::pin(std::future::ready(ToolResult::Err(
                    Error::invalid_arguments().with_violations(violations),
                )));
            }
        };
        // The schema and `T::Input` describe the same record, so this
        // only fails when a tool declares them inconsistently.
        let input: T::Input = match serde_json::from_value(Value::Object(validated)) {
            Ok(input) => input,
            Err(err) => {
                let reason = format!("{err}");
                return Box::pin(std::future::ready(ToolResult::Err(
                    Error::invalid_arguments().with_reason(reason),
                )));
            }
        };
        Box::pin(self.0.execute(input))
    }
}
