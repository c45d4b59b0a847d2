//! Transaction action descriptors.
//!
//! [`Action`] is a closed sum type; every variant carries exactly the fields
//! the wallet needs to sign it. Values are built through [`ActionBuilder`]
//! and are never mutated afterwards.
//!
//! On the wire the connector expects a `{ "type", "params" }` object and
//! folds both key-adding variants into a single `AddKey` type distinguished
//! by its permission, so serialization goes through a private wire enum.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single action inside a [`Transaction`](crate::Transaction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireAction", from = "WireAction")]
pub enum Action {
	/// Moves `deposit` yoctoNEAR to the transaction receiver.
	Transfer { deposit: String },
	/// Calls `method_name` on the receiver contract.
	FunctionCall {
		method_name: String,
		args: Value,
		gas: String,
		deposit: String,
	},
	/// Registers a key with full control over the account.
	AddFullAccessKey { public_key: String },
	/// Registers a key limited to calls on `receiver_id`.
	///
	/// An empty `method_names` list allows every method; `allowance: None`
	/// means the key may spend on gas without limit.
	AddFunctionCallKey {
		public_key: String,
		receiver_id: String,
		method_names: Vec<String>,
		allowance: Option<String>,
	},
	/// Removes a key from the account.
	DeleteKey { public_key: String },
}

impl Action {
	/// Wire type name of this action.
	pub fn kind(&self) -> &'static str {
		match self {
			Action::Transfer { .. } => "Transfer",
			Action::FunctionCall { .. } => "FunctionCall",
			Action::AddFullAccessKey { .. } | Action::AddFunctionCallKey { .. } => "AddKey",
			Action::DeleteKey { .. } => "DeleteKey",
		}
	}
}

/// Pure constructors for [`Action`] values.
///
/// Every function is a plain mapping from its arguments to a descriptor.
/// Amounts and gas are decimal strings and are passed through untouched;
/// checking them is up to the caller.
pub struct ActionBuilder;

impl ActionBuilder {
	pub fn transfer(deposit: impl Into<String>) -> Action {
		Action::Transfer {
			deposit: deposit.into(),
		}
	}

	pub fn function_call(
		method_name: impl Into<String>,
		args: Value,
		gas: impl Into<String>,
		deposit: impl Into<String>,
	) -> Action {
		Action::FunctionCall {
			method_name: method_name.into(),
			args,
			gas: gas.into(),
			deposit: deposit.into(),
		}
	}

	pub fn add_full_access_key(public_key: impl Into<String>) -> Action {
		Action::AddFullAccessKey {
			public_key: public_key.into(),
		}
	}

	/// Function-call key with unrestricted methods and unlimited allowance.
	pub fn add_function_call_key(
		public_key: impl Into<String>,
		receiver_id: impl Into<String>,
	) -> Action {
		Self::add_function_call_key_with(public_key, receiver_id, Vec::new(), None)
	}

	pub fn add_function_call_key_with(
		public_key: impl Into<String>,
		receiver_id: impl Into<String>,
		method_names: Vec<String>,
		allowance: Option<String>,
	) -> Action {
		Action::AddFunctionCallKey {
			public_key: public_key.into(),
			receiver_id: receiver_id.into(),
			method_names,
			allowance,
		}
	}

	pub fn delete_key(public_key: impl Into<String>) -> Action {
		Action::DeleteKey {
			public_key: public_key.into(),
		}
	}
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
enum WireAction {
	Transfer {
		deposit: String,
	},
	#[serde(rename_all = "camelCase")]
	FunctionCall {
		method_name: String,
		args: Value,
		gas: String,
		deposit: String,
	},
	#[serde(rename_all = "camelCase")]
	AddKey {
		public_key: String,
		access_key: WireAccessKey,
	},
	#[serde(rename_all = "camelCase")]
	DeleteKey {
		public_key: String,
	},
}

#[derive(Serialize, Deserialize)]
struct WireAccessKey {
	permission: WirePermission,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WirePermission {
	Full(FullAccessTag),
	FunctionCall(WireFunctionCallPermission),
}

/// Serializes as the bare string `"FullAccess"`.
#[derive(Serialize, Deserialize)]
enum FullAccessTag {
	FullAccess,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFunctionCallPermission {
	receiver_id: String,
	#[serde(default)]
	method_names: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	allowance: Option<String>,
}

impl From<Action> for WireAction {
	fn from(action: Action) -> Self {
		match action {
			Action::Transfer { deposit } => WireAction::Transfer { deposit },
			Action::FunctionCall {
				method_name,
				args,
				gas,
				deposit,
			} => WireAction::FunctionCall {
				method_name,
				args,
				gas,
				deposit,
			},
			Action::AddFullAccessKey { public_key } => WireAction::AddKey {
				public_key,
				access_key: WireAccessKey {
					permission: WirePermission::Full(FullAccessTag::FullAccess),
				},
			},
			Action::AddFunctionCallKey {
				public_key,
				receiver_id,
				method_names,
				allowance,
			} => WireAction::AddKey {
				public_key,
				access_key: WireAccessKey {
					permission: WirePermission::FunctionCall(WireFunctionCallPermission {
						receiver_id,
						method_names,
						allowance,
					}),
				},
			},
			Action::DeleteKey { public_key } => WireAction::DeleteKey { public_key },
		}
	}
}

impl From<WireAction> for Action {
	fn from(wire: WireAction) -> Self {
		match wire {
			WireAction::Transfer { deposit } => Action::Transfer { deposit },
			WireAction::FunctionCall {
				method_name,
				args,
				gas,
				deposit,
			} => Action::FunctionCall {
				method_name,
				args,
				gas,
				deposit,
			},
			WireAction::AddKey {
				public_key,
				access_key,
			} => match access_key.permission {
				WirePermission::Full(FullAccessTag::FullAccess) => {
					Action::AddFullAccessKey { public_key }
				}
				WirePermission::FunctionCall(permission) => Action::AddFunctionCallKey {
					public_key,
					receiver_id: permission.receiver_id,
					method_names: permission.method_names,
					allowance: permission.allowance,
				},
			},
			WireAction::DeleteKey { public_key } => Action::DeleteKey { public_key },
		}
	}
}
