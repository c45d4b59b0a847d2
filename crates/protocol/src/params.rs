//! Parameter structs for session operations.
//!
//! Optional fields are resolved against an explicit defaulting table at the
//! call boundary (`into_action` / `args_or_default`), never by relying on a
//! field being absent further down the stack.
//!
//! | operation               | field          | default               |
//! |-------------------------|----------------|-----------------------|
//! | `view_function`         | `args`         | `{}`                  |
//! | `call_function`         | `args`         | `{}`                  |
//! | `call_function`         | `gas`          | [`DEFAULT_FUNCTION_CALL_GAS`] |
//! | `call_function`         | `deposit`      | [`DEFAULT_DEPOSIT`]   |
//! | `add_function_call_key` | `method_names` | `[]` (any method)     |
//! | `add_function_call_key` | `allowance`    | none (unlimited)      |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::{Action, ActionBuilder};

/// Gas attached to a function call when the caller does not choose one (30 Tgas).
pub const DEFAULT_FUNCTION_CALL_GAS: &str = "30000000000000";

/// Deposit attached to a function call when the caller does not choose one.
pub const DEFAULT_DEPOSIT: &str = "0";

fn empty_args() -> Value {
	Value::Object(Map::new())
}

/// Read-only contract query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewFunctionParams {
	pub contract_id: String,
	pub method: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub args: Option<Value>,
}

impl ViewFunctionParams {
	pub fn new(contract_id: impl Into<String>, method: impl Into<String>) -> Self {
		Self {
			contract_id: contract_id.into(),
			method: method.into(),
			args: None,
		}
	}

	/// Sets the call arguments.
	pub fn args(mut self, args: Value) -> Self {
		self.args = Some(args);
		self
	}

	/// Arguments to send, `{}` when none were given.
	pub fn args_or_default(&self) -> Value {
		self.args.clone().unwrap_or_else(empty_args)
	}
}

/// State-changing contract call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallParams {
	pub contract_id: String,
	pub method: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub args: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub deposit: Option<String>,
}

impl FunctionCallParams {
	pub fn new(contract_id: impl Into<String>, method: impl Into<String>) -> Self {
		Self {
			contract_id: contract_id.into(),
			method: method.into(),
			args: None,
			gas: None,
			deposit: None,
		}
	}

	pub fn args(mut self, args: Value) -> Self {
		self.args = Some(args);
		self
	}

	pub fn gas(mut self, gas: impl Into<String>) -> Self {
		self.gas = Some(gas.into());
		self
	}

	pub fn deposit(mut self, deposit: impl Into<String>) -> Self {
		self.deposit = Some(deposit.into());
		self
	}

	/// Applies defaults and returns `(receiver_id, action)`.
	pub fn into_action(self) -> (String, Action) {
		let action = ActionBuilder::function_call(
			self.method,
			self.args.unwrap_or_else(empty_args),
			self.gas.unwrap_or_else(|| DEFAULT_FUNCTION_CALL_GAS.to_string()),
			self.deposit.unwrap_or_else(|| DEFAULT_DEPOSIT.to_string()),
		);
		(self.contract_id, action)
	}
}

/// Native token transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferParams {
	pub receiver_id: String,
	/// Amount in yoctoNEAR as a decimal string.
	pub amount: String,
}

impl TransferParams {
	pub fn new(receiver_id: impl Into<String>, amount: impl Into<String>) -> Self {
		Self {
			receiver_id: receiver_id.into(),
			amount: amount.into(),
		}
	}

	pub fn into_action(self) -> (String, Action) {
		(self.receiver_id, ActionBuilder::transfer(self.amount))
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFullAccessKeyParams {
	pub public_key: String,
}

impl AddFullAccessKeyParams {
	pub fn new(public_key: impl Into<String>) -> Self {
		Self {
			public_key: public_key.into(),
		}
	}

	pub fn into_action(self) -> Action {
		ActionBuilder::add_full_access_key(self.public_key)
	}
}

/// Adds a key restricted to calls on `contract_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFunctionCallKeyParams {
	pub public_key: String,
	pub contract_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub method_names: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub allowance: Option<String>,
}

impl AddFunctionCallKeyParams {
	pub fn new(public_key: impl Into<String>, contract_id: impl Into<String>) -> Self {
		Self {
			public_key: public_key.into(),
			contract_id: contract_id.into(),
			method_names: None,
			allowance: None,
		}
	}

	pub fn method_names<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.method_names = Some(names.into_iter().map(Into::into).collect());
		self
	}

	pub fn allowance(mut self, allowance: impl Into<String>) -> Self {
		self.allowance = Some(allowance.into());
		self
	}

	pub fn into_action(self) -> Action {
		ActionBuilder::add_function_call_key_with(
			self.public_key,
			self.contract_id,
			self.method_names.unwrap_or_default(),
			self.allowance,
		)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteKeyParams {
	pub public_key: String,
}

impl DeleteKeyParams {
	pub fn new(public_key: impl Into<String>) -> Self {
		Self {
			public_key: public_key.into(),
		}
	}

	pub fn into_action(self) -> Action {
		ActionBuilder::delete_key(self.public_key)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn call_function_applies_gas_and_deposit_defaults() {
		let (receiver, action) = FunctionCallParams::new("guestbook.testnet", "add_message")
			.args(json!({"text": "hi"}))
			.into_action();

		assert_eq!(receiver, "guestbook.testnet");
		assert_eq!(
			action,
			ActionBuilder::function_call("add_message", json!({"text": "hi"}), DEFAULT_FUNCTION_CALL_GAS, "0")
		);
	}

	#[test]
	fn call_function_defaults_args_to_empty_object() {
		let (_, action) = FunctionCallParams::new("c.testnet", "ping").deposit("5").into_action();
		match action {
			Action::FunctionCall { args, deposit, .. } => {
				assert_eq!(args, json!({}));
				assert_eq!(deposit, "5");
			}
			other => panic!("Expected FunctionCall, got {other:?}"),
		}
	}

	#[test]
	fn view_args_default_to_empty_object() {
		let params = ViewFunctionParams::new("c.testnet", "total_messages");
		assert_eq!(params.args_or_default(), json!({}));
		let params = params.args(json!({"limit": "10"}));
		assert_eq!(params.args_or_default(), json!({"limit": "10"}));
	}

	#[test]
	fn function_call_key_params_default_to_unrestricted() {
		let action = AddFunctionCallKeyParams::new("ed25519:abc", "guestbook.testnet").into_action();
		assert_eq!(action, ActionBuilder::add_function_call_key("ed25519:abc", "guestbook.testnet"));
	}

	#[test]
	fn params_deserialize_from_camel_case_json() {
		let params: FunctionCallParams = serde_json::from_value(json!({
			"contractId": "guestbook.testnet",
			"method": "add_message",
			"args": { "text": "hi" }
		}))
		.unwrap();
		assert_eq!(params.gas, None);
		assert_eq!(params.contract_id, "guestbook.testnet");
	}
}
