//! A simple program demonstrating how an orchestrator consumes the
//! wallet balances tool: enumerate the discovery schema, then invoke.

#[macro_use]
extern crate tracing;

use std::env;

use owo_colors::OwoColorize;
use serde_json::json;
use toolgate::tools::WalletBalancesTool;
use toolgate_core::Registry;

const DEFAULT_ADDRESS: &str = "0xDFcEB49eD21aE199b33A76B726E2bea7A72127B0";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = Registry::builder()
        .with_tool(WalletBalancesTool::new())
        .build();

    for def in registry.definitions() {
        println!(
            "{} {}",
            "tool:".bright_cyan(),
            def.name.bright_white().bold()
        );
        println!("{}", def.description);
        match serde_json::to_string_pretty(&def.parameters) {
            Ok(parameters) => println!("{parameters}"),
            Err(err) => error!("failed to render parameters: {err}"),
        }
        println!();
    }

    let address = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_owned());

    println!(
        "{} which tokens does {} hold?",
        ">".bright_cyan(),
        address.bright_white()
    );

    let result = registry
        .invoke("get_wallet_token_balances", json!({ "address": address }))
        .await;
    match result {
        Ok(balances) => {
            println!(
                "{} {}",
                "balances:".bright_cyan(),
                balances.bright_white()
            );
        }
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red(), err.reason());
        }
    }
}
