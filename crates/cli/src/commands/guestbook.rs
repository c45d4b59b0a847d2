use near_connect::{Network, RpcGateway, ViewFunctionParams};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::cli::GuestbookArgs;
use crate::error::Result;

/// Example guestbook deployment for each network.
pub fn default_contract(network: Network) -> &'static str {
	match network {
		Network::Mainnet => "guestbook.near-examples.near",
		Network::Testnet => "guestbook.near-examples.testnet",
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookMessage {
	#[serde(default)]
	pub premium: bool,
	pub sender: String,
	pub text: String,
}

pub async fn run(gateway: &RpcGateway, network: Network, args: GuestbookArgs) -> Result<Value> {
	let contract = args.contract.unwrap_or_else(|| default_contract(network).to_string());
	let messages = latest(gateway, &contract, args.limit).await?;
	Ok(json!({ "contract": contract, "messages": messages }))
}

/// Reads the last `limit` messages, newest first.
pub async fn latest(gateway: &RpcGateway, contract: &str, limit: u64) -> Result<Vec<GuestbookMessage>> {
	let total: u64 = gateway
		.view_function_as(ViewFunctionParams::new(contract, "total_messages"))
		.await?;
	let from_index = total.saturating_sub(limit);

	let mut messages: Vec<GuestbookMessage> = gateway
		.view_function_as(
			ViewFunctionParams::new(contract, "get_messages")
				.args(json!({ "from_index": from_index.to_string(), "limit": limit.to_string() })),
		)
		.await?;
	messages.reverse();
	Ok(messages)
}
