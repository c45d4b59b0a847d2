//! JSON-RPC read provider over HTTP.
//!
//! Every read is a single `query` call against one RPC endpoint. The node
//! wraps contract view results as a byte array which is decoded as JSON here.
//!
//! # Message Flow
//!
//! 1. Caller invokes a [`ReadProvider`] method
//! 2. Provider builds `query` params (`request_type`, block reference, account)
//! 3. Request is POSTed with a fresh numeric id
//! 4. The envelope is unwrapped into `result` or a structured [`Error::Rpc`]

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use nc_protocol::{AccessKeyList, AccountView};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::provider::{BlockReference, ReadProvider};

/// HTTP JSON-RPC implementation of [`ReadProvider`].
pub struct JsonRpcProvider {
	url: String,
	client: reqwest::Client,
	last_id: AtomicU64,
}

impl JsonRpcProvider {
	/// Creates a provider for `url` with a default HTTP client.
	pub fn new(url: impl Into<String>) -> Self {
		Self::with_client(url, reqwest::Client::new())
	}

	/// Creates a provider that sends requests through `client`.
	pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
		Self {
			url: url.into(),
			client,
			last_id: AtomicU64::new(0),
		}
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	/// Sends a `query` request and returns the unwrapped `result`.
	pub async fn query(&self, params: Value) -> Result<Value> {
		let id = self.last_id.fetch_add(1, Ordering::SeqCst);
		let request = json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": "query",
			"params": params,
		});
		trace!(target: "nc.rpc", url = %self.url, id, "sending query");

		let response = self.client.post(&self.url).json(&request).send().await?;
		let status = response.status();
		let body = response.text().await?;

		let result = decode_body(status, &body);
		if let Err(e) = &result {
			debug!(target: "nc.rpc", id, error = %e, "query failed");
		}
		result
	}
}

#[async_trait]
impl ReadProvider for JsonRpcProvider {
	async fn call_function(
		&self,
		contract_id: &str,
		method: &str,
		args: &Value,
		block: BlockReference,
	) -> Result<Value> {
		let args_base64 = STANDARD.encode(serde_json::to_vec(args)?);
		let params = query_params(
			"call_function",
			contract_id,
			&block,
			[
				("method_name", Value::from(method)),
				("args_base64", Value::from(args_base64)),
			],
		);
		decode_call_result(self.query(params).await?)
	}

	async fn view_account(&self, account_id: &str, block: BlockReference) -> Result<AccountView> {
		let params = query_params("view_account", account_id, &block, []);
		Ok(serde_json::from_value(self.query(params).await?)?)
	}

	async fn view_access_key_list(&self, account_id: &str, block: BlockReference) -> Result<AccessKeyList> {
		let params = query_params("view_access_key_list", account_id, &block, []);
		Ok(serde_json::from_value(self.query(params).await?)?)
	}
}

fn query_params<const N: usize>(
	request_type: &str,
	account_id: &str,
	block: &BlockReference,
	extra: [(&str, Value); N],
) -> Value {
	let mut params = Map::new();
	params.insert("request_type".into(), Value::from(request_type));
	block.apply_to(&mut params);
	params.insert("account_id".into(), Value::from(account_id));
	for (key, value) in extra {
		params.insert(key.into(), value);
	}
	Value::Object(params)
}

#[derive(Debug, Deserialize)]
struct RpcErrorPayload {
	#[serde(default)]
	name: Option<String>,
	#[serde(default)]
	cause: Option<RpcErrorCause>,
	#[serde(default)]
	message: Option<String>,
	#[serde(default)]
	data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorCause {
	name: String,
}

fn parse_rpc_error(raw: Value) -> Error {
	let payload: RpcErrorPayload = match serde_json::from_value(raw.clone()) {
		Ok(payload) => payload,
		Err(_) => return Error::Protocol(format!("unrecognized RPC error: {raw}")),
	};

	// `data` usually carries the specific reason; `message` is often just "Server error".
	let message = match payload.data {
		Some(Value::String(data)) => data,
		Some(other) if !other.is_null() => other.to_string(),
		_ => payload.message.unwrap_or_else(|| "unknown RPC error".to_string()),
	};

	Error::Rpc {
		name: payload.name.unwrap_or_else(|| "RPC_ERROR".to_string()),
		cause: payload.cause.map(|c| c.name),
		message,
	}
}

/// Decodes a response body, keeping the HTTP status when the body is not a
/// JSON-RPC envelope (proxy error pages, empty 5xx bodies).
fn decode_body(status: reqwest::StatusCode, body: &str) -> Result<Value> {
	match serde_json::from_str::<Value>(body) {
		Ok(envelope) if status.is_success() || envelope.get("error").is_some() => unwrap_envelope(envelope),
		Ok(_) => Err(Error::Network(format!("RPC endpoint returned HTTP {status}"))),
		Err(_) if !status.is_success() => Err(Error::Network(format!("RPC endpoint returned HTTP {status}"))),
		Err(e) => Err(Error::Protocol(format!("RPC response is not JSON: {e}"))),
	}
}

fn unwrap_envelope(mut body: Value) -> Result<Value> {
	if let Some(error) = body.get_mut("error").map(Value::take) {
		return Err(parse_rpc_error(error));
	}
	match body.get_mut("result").map(Value::take) {
		Some(result) => Ok(result),
		None => Err(Error::Protocol("RPC response has neither result nor error".into())),
	}
}

/// Decodes the `result` byte array of a `call_function` query as JSON.
fn decode_call_result(result: Value) -> Result<Value> {
	// Some nodes report contract panics inside a successful envelope.
	if let Some(message) = result.get("error").and_then(Value::as_str) {
		return Err(Error::Rpc {
			name: "CONTRACT_EXECUTION_ERROR".into(),
			cause: None,
			message: message.to_string(),
		});
	}

	let bytes: Vec<u8> = match result.get("result") {
		Some(raw) => serde_json::from_value(raw.clone())?,
		None => return Err(Error::Protocol("call_function result is missing 'result' bytes".into())),
	};
	if bytes.is_empty() {
		return Ok(Value::Null);
	}
	Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::provider::Finality;

	#[test]
	fn call_function_params_follow_query_layout() {
		let params = query_params(
			"call_function",
			"guestbook.testnet",
			&BlockReference::finalized(),
			[("method_name", Value::from("total_messages"))],
		);
		assert_eq!(
			params,
			json!({
				"request_type": "call_function",
				"finality": "final",
				"account_id": "guestbook.testnet",
				"method_name": "total_messages",
			})
		);
	}

	#[test]
	fn envelope_result_is_unwrapped() {
		let body = json!({ "jsonrpc": "2.0", "id": 0, "result": { "amount": "1" } });
		assert_eq!(unwrap_envelope(body).unwrap(), json!({ "amount": "1" }));
	}

	#[test]
	fn envelope_error_keeps_cause() {
		let body = json!({
			"jsonrpc": "2.0",
			"id": 3,
			"error": {
				"name": "HANDLER_ERROR",
				"cause": { "name": "UNKNOWN_ACCOUNT", "info": {} },
				"code": -32000,
				"message": "Server error",
				"data": "account nobody.testnet does not exist while viewing"
			}
		});
		let err = unwrap_envelope(body).unwrap_err();
		assert!(err.is_unknown_account());
		assert!(err.to_string().contains("does not exist"));
	}

	#[test]
	fn html_error_page_keeps_http_status() {
		let err = decode_body(reqwest::StatusCode::BAD_GATEWAY, "<html><body>502 Bad Gateway</body></html>").unwrap_err();
		match err {
			Error::Network(message) => assert!(message.contains("502"), "{message}"),
			other => panic!("Expected Network error, got {other:?}"),
		}
	}

	#[test]
	fn error_envelope_on_http_failure_is_an_rpc_error() {
		let body = r#"{"jsonrpc":"2.0","id":1,"error":{"name":"HANDLER_ERROR","cause":{"name":"UNKNOWN_ACCOUNT"},"message":"Server error"}}"#;
		let err = decode_body(reqwest::StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
		assert!(err.is_unknown_account());
	}

	#[test]
	fn garbage_on_success_is_a_protocol_error() {
		let err = decode_body(reqwest::StatusCode::OK, "not json").unwrap_err();
		assert!(matches!(err, Error::Protocol(_)));
	}

	#[test]
	fn call_result_bytes_are_json_decoded() {
		let payload = serde_json::to_vec(&json!([{ "sender": "alice.testnet", "text": "hi" }])).unwrap();
		let result = json!({ "result": payload, "logs": [], "block_height": 1, "block_hash": "h" });
		let decoded = decode_call_result(result).unwrap();
		assert_eq!(decoded[0]["text"], "hi");
	}

	#[test]
	fn empty_call_result_is_null() {
		let result = json!({ "result": [], "logs": [] });
		assert_eq!(decode_call_result(result).unwrap(), Value::Null);
	}

	#[test]
	fn contract_error_inside_result_is_an_rpc_error() {
		let result = json!({ "error": "wasm execution failed with error: MethodNotFound", "logs": [] });
		let err = decode_call_result(result).unwrap_err();
		match err {
			Error::Rpc { name, message, .. } => {
				assert_eq!(name, "CONTRACT_EXECUTION_ERROR");
				assert!(message.contains("MethodNotFound"));
			}
			other => panic!("Expected Rpc error, got {other:?}"),
		}
	}

	#[test]
	fn block_height_replaces_finality() {
		let params = query_params("view_account", "alice.testnet", &BlockReference::Height(42), []);
		assert_eq!(params["block_id"], 42);
		assert!(params.get("finality").is_none());

		let params = query_params(
			"view_account",
			"alice.testnet",
			&BlockReference::Finality(Finality::Optimistic),
			[],
		);
		assert_eq!(params["finality"], "optimistic");
	}
}
