//! A demo wiring of the tool-invocation contract: declares the wallet
//! token-balances tool and publishes it through a read-only registry
//! that any orchestrator style can consume.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod tools;

/// Re-exports of [`toolgate_core`] crate.
pub mod core {
    pub use toolgate_core::*;
}
