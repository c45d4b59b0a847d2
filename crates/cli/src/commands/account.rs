use near_connect::RpcGateway;
use serde_json::{Value, json};

use crate::error::{CliError, Result};
use crate::output::format_near;

pub async fn balance(gateway: &RpcGateway, account_id: &str) -> Result<Value> {
	let yocto = gateway
		.get_balance(account_id)
		.await
		.map_err(|e| CliError::for_account(account_id, e))?;
	Ok(json!({
		"accountId": account_id,
		"yocto": yocto.to_string(),
		"near": format_near(yocto),
	}))
}

pub async fn keys(gateway: &RpcGateway, account_id: &str) -> Result<Value> {
	let list = gateway
		.get_access_key_list(account_id)
		.await
		.map_err(|e| CliError::for_account(account_id, e))?;
	Ok(serde_json::to_value(list)?)
}

pub async fn state(gateway: &RpcGateway, account_id: &str) -> Result<Value> {
	let view = gateway
		.get_account(account_id)
		.await
		.map_err(|e| CliError::for_account(account_id, e))?;
	Ok(serde_json::to_value(view)?)
}
