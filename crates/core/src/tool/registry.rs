use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::tool::{AnyTool, Error, Tool, ToolDefinition, ToolObject, ToolResult};

/// A read-only set of tools.
///
/// The registry is built once at startup and held for the process
/// lifetime. It owns no mutable state, so it can be shared and invoked
/// concurrently from any number of tasks.
pub struct Registry {
    tools: HashMap<String, Arc<dyn ToolObject>>,
}

impl Registry {
    /// Creates a builder for the registry.
    #[inline]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the discovery records of every registered tool.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.schema().to_json_schema(),
            })
            .collect()
    }

    /// Returns the discovery record of one tool, if it is registered.
    pub fn definition(&self, name: &str) -> Option<ToolDefinition> {
        self.tools.get(name).map(|tool| ToolDefinition {
            name: tool.name().to_owned(),
            description: tool.description().to_owned(),
            parameters: tool.schema().to_json_schema(),
        })
    }

    /// Validates the raw arguments and invokes the named tool.
    ///
    /// The arguments are typically produced by a model's structured
    /// output and are not trusted to conform to the tool's schema; the
    /// tool's `execute` only runs when they do.
    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            warn!("tool not found: {name}");
            return Err(Error::unknown_tool()
                .with_reason(format!("no tool named `{name}`")));
        };
        trace!("invoking tool `{name}` with args: {arguments:?}");
        tool.invoke(arguments)
            .instrument(debug_span!("tool invoke", tool = name))
            .await
    }

    /// Like [`Registry::invoke`], but gives up when `cancel` fires.
    ///
    /// A token that is already cancelled fails the invocation before the
    /// tool's schema is even consulted. Cancellation mid-flight abandons
    /// the tool's future and fails with
    /// [`ErrorKind::Cancelled`](crate::tool::ErrorKind::Cancelled); no
    /// partial result is returned.
    pub async fn invoke_with_cancellation(
        &self,
        name: &str,
        arguments: Value,
        cancel: &CancellationToken,
    ) -> ToolResult {
        if cancel.is_cancelled() {
            return Err(Error::cancelled());
        }
        tokio::select! {
            _ = cancel.cancelled() => {
                trace!("invocation of `{name}` cancelled");
                Err(Error::cancelled())
            }
            result = self.invoke(name, arguments) => result,
        }
    }

    /// Like [`Registry::invoke`], but fails if the tool does not
    /// complete within `timeout`.
    pub async fn invoke_with_timeout(
        &self,
        name: &str,
        arguments: Value,
        timeout: Duration,
    ) -> ToolResult {
        match tokio::time::timeout(timeout, self.invoke(name, arguments)).await {
            Ok(result) => result,
            Err(_) => {
                trace!("invocation of `{name}` timed out");
                Err(Error::cancelled().with_reason("invocation timed out"))
            }
        }
    }
}

/// [`Registry`] builder.
#[derive(Default)]
pub struct RegistryBuilder {
    tools: HashMap<String, Arc<dyn ToolObject>>,
}

impl RegistryBuilder {
    /// Registers a tool.
    ///
    /// Registering a second tool with the same name replaces the
    /// earlier one.
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        let name = tool.name().to_owned();
        if self.tools.insert(name.clone(), Arc::new(AnyTool(tool))).is_some() {
            warn!("tool `{name}` was registered twice, keeping the later one");
        }
        self
    }

    /// Builds the registry.
    #[inline]
    pub fn build(self) -> Registry {
        Registry { tools: self.tools }
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;
    use std::sync::atomic::{AtomicBool, Ordering};

    use serde_json::json;

    use super::*;
    use crate::schema::Schema;
    use crate::tool::ErrorKind;

    static EMPTY_SCHEMA: std::sync::LazyLock<Schema> =
        std::sync::LazyLock::new(Schema::new);

    struct TestTool {
        executed: Arc<AtomicBool>,
    }

    impl Tool for TestTool {
        type Input = serde_json::Value;

        fn name(&self) -> &str {
            "test_tool"
        }

        fn description(&self) -> &str {
            "A test tool"
        }

        fn schema(&self) -> &Schema {
            &EMPTY_SCHEMA
        }

        fn execute(
            &self,
            _input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            self.executed.store(true, Ordering::Relaxed);
            ready(Ok("success".to_owned()))
        }
    }

    struct SleepyTool;

    impl Tool for SleepyTool {
        type Input = serde_json::Value;

        fn name(&self) -> &str {
            "sleepy_tool"
        }

        fn description(&self) -> &str {
            "A tool that never finishes in time"
        }

        fn schema(&self) -> &Schema {
            &EMPTY_SCHEMA
        }

        fn execute(
            &self,
            _input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("too late".to_owned())
            }
        }
    }

    #[tokio::test]
    async fn test_invoke() {
        let executed = Arc::new(AtomicBool::new(false));
        let registry = Registry::builder()
            .with_tool(TestTool {
                executed: Arc::clone(&executed),
            })
            .build();

        let result = registry.invoke("test_tool", json!({})).await;
        assert_eq!(result.unwrap(), "success");
        assert!(executed.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = Registry::builder().build();
        let err = registry.invoke("read_tool", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownTool);
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_skips_execution() {
        let executed = Arc::new(AtomicBool::new(false));
        let registry = Registry::builder()
            .with_tool(TestTool {
                executed: Arc::clone(&executed),
            })
            .build();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = registry
            .invoke_with_cancellation("test_tool", json!({}), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert!(!executed.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn test_cancellation_mid_flight() {
        let registry = Registry::builder().with_tool(SleepyTool).build();
        let cancel = CancellationToken::new();

        let (result, _) = tokio::join!(
            registry.invoke_with_cancellation("sleepy_tool", json!({}), &cancel),
            async { cancel.cancel() },
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invoke_with_timeout() {
        let registry = Registry::builder().with_tool(SleepyTool).build();
        let err = registry
            .invoke_with_timeout("sleepy_tool", json!({}), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn test_definitions() {
        let registry = Registry::builder()
            .with_tool(TestTool {
                executed: Arc::new(AtomicBool::new(false)),
            })
            .build();

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "test_tool");
        assert_eq!(definitions[0].parameters["type"], json!("object"));

        assert!(registry.definition("test_tool").is_some());
        assert!(registry.definition("other_tool").is_none());
    }
}
