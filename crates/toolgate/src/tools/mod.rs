//! The tools this demo publishes to orchestrators.

mod wallet_balances;

pub use wallet_balances::WalletBalancesTool;
