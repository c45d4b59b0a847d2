//! Read-only chain queries.

use std::sync::Arc;

use nc_protocol::{AccessKeyList, AccountView, ViewFunctionParams};
use nc_runtime::{BlockReference, ReadProvider, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

/// Chain-state reads through a [`ReadProvider`].
///
/// No wallet is needed. Every query is evaluated against the latest final
/// block and provider errors are returned as-is.
#[derive(Clone)]
pub struct RpcGateway {
	provider: Arc<dyn ReadProvider>,
}

impl RpcGateway {
	pub fn new(provider: Arc<dyn ReadProvider>) -> Self {
		Self { provider }
	}

	pub fn provider(&self) -> &Arc<dyn ReadProvider> {
		&self.provider
	}

	/// Runs a view method. Missing args are sent as `{}`.
	pub async fn view_function(&self, params: ViewFunctionParams) -> Result<Value> {
		let args = params.args_or_default();
		trace!(
			target: "nc.rpc",
			contract_id = %params.contract_id,
			method = %params.method,
			"view function"
		);
		self.provider
			.call_function(&params.contract_id, &params.method, &args, BlockReference::finalized())
			.await
	}

	/// Runs a view method and decodes its result into `T`.
	pub async fn view_function_as<T: DeserializeOwned>(&self, params: ViewFunctionParams) -> Result<T> {
		let value = self.view_function(params).await?;
		Ok(serde_json::from_value(value)?)
	}

	/// Liquid balance of `account_id` in yoctoNEAR.
	pub async fn get_balance(&self, account_id: &str) -> Result<u128> {
		Ok(self.get_account(account_id).await?.amount)
	}

	pub async fn get_account(&self, account_id: &str) -> Result<AccountView> {
		trace!(target: "nc.rpc", account_id, "view account");
		self.provider.view_account(account_id, BlockReference::finalized()).await
	}

	/// Keys registered to `account_id`, with the block they were read at.
	pub async fn get_access_key_list(&self, account_id: &str) -> Result<AccessKeyList> {
		trace!(target: "nc.rpc", account_id, "view access key list");
		self.provider
			.view_access_key_list(account_id, BlockReference::finalized())
			.await
	}
}

impl std::fmt::Debug for RpcGateway {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RpcGateway").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use nc_runtime::mock::MockProvider;
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn view_function_defaults_args_and_uses_final_block() {
		let provider = MockProvider::new();
		provider.set_view("guestbook.testnet", "total_messages", json!(3));
		let gateway = RpcGateway::new(provider.clone());

		let total: u64 = gateway
			.view_function_as(ViewFunctionParams::new("guestbook.testnet", "total_messages"))
			.await
			.unwrap();
		assert_eq!(total, 3);

		let call = &provider.view_calls()[0];
		assert_eq!(call.args, json!({}));
		assert_eq!(call.block, BlockReference::finalized());
	}

	#[tokio::test]
	async fn balance_is_exact() {
		let provider = MockProvider::new();
		let amount = 340_282_366_920_938_463_463_374_607_431_768_211_455u128;
		provider.set_balance("whale.testnet", amount);
		let gateway = RpcGateway::new(provider);
		assert_eq!(gateway.get_balance("whale.testnet").await.unwrap(), amount);
	}

	#[tokio::test]
	async fn provider_errors_pass_through() {
		let gateway = RpcGateway::new(MockProvider::new());
		let err = gateway.get_access_key_list("nobody.testnet").await.unwrap_err();
		assert!(err.is_unknown_account());
	}
}
