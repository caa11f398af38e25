use serde::Deserialize;
use toolgate_core::schema::{FieldSpec, Schema};
use toolgate_core::tool::{Tool, ToolResult};

const MAX_TOKEN_ADDRESSES: usize = 10;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Chain {
    Eth,
    Polygon,
}

#[derive(Debug, Deserialize)]
pub struct WalletBalancesParameters {
    chain: Chain,
    address: String,
    to_block: Option<u64>,
    token_addresses: Option<Vec<String>>,
    exclude_spam: Option<bool>,
}

/// A tool for looking up the tokens held by a wallet address.
pub struct WalletBalancesTool {
    schema: Schema,
}

impl WalletBalancesTool {
    /// Creates a new wallet balances tool.
    pub fn new() -> Self {
        WalletBalancesTool {
            schema: Schema::strict()
                .field(
                    FieldSpec::string_enum("chain", ["eth", "polygon"])
                        .describe("The chain to query")
                        .with_default("eth"),
                )
                .field(FieldSpec::string("address").describe(
                    "The address from which token balances will be checked",
                ))
                .field(FieldSpec::number("to_block").describe(
                    "The block number up to which the balances will be checked.",
                ).optional())
                .field(
                    FieldSpec::string_array("token_addresses")
                        .max_items(MAX_TOKEN_ADDRESSES)
                        .describe("The addresses to get balances for (optional)")
                        .optional(),
                )
                .field(
                    FieldSpec::boolean("exclude_spam")
                        .describe("Exclude spam tokens from the result")
                        .optional(),
                ),
        }
    }
}

impl Default for WalletBalancesTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for WalletBalancesTool {
    type Input = WalletBalancesParameters;

    fn name(&self) -> &str {
        "get_wallet_token_balances"
    }

    fn description(&self) -> &str {
        "Get token balances for a specific wallet address."
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: WalletBalancesParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        async move {
            debug!(
                chain = ?input.chain,
                address = %input.address,
                to_block = ?input.to_block,
                token_addresses = ?input.token_addresses,
                exclude_spam = ?input.exclude_spam,
                "looking up token balances"
            );

            // The actual lookup lives behind an external balances
            // service; this build ships a canned answer.
            Ok("TOKENS HOLDED: USDC, WETH".to_owned())
        }
    }
}
