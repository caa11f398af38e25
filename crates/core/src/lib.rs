//! The tool-invocation contract: schema-described capabilities that an
//! agent orchestrator can discover and invoke with validated arguments.
//!
//! The crate is integration-agnostic: it knows nothing about any
//! particular agent loop or model provider. An orchestrator enumerates
//! the registered tools through [`Registry::definitions`], hands the
//! model-produced argument record to [`Registry::invoke`], and gets
//! back the tool's string result or an inspectable error.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod schema;
pub mod tool;

pub use tool::{Registry, RegistryBuilder, Tool};
