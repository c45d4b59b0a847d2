//! Transactions handed to the wallet and the outcomes it reports back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;

/// One receiver plus an ordered list of actions, signed and applied as a unit.
///
/// Atomicity is provided by the chain via the wallet, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	pub receiver_id: String,
	pub actions: Vec<Action>,
}

impl Transaction {
	pub fn new(receiver_id: impl Into<String>, actions: Vec<Action>) -> Self {
		Self {
			receiver_id: receiver_id.into(),
			actions,
		}
	}

	pub fn single(receiver_id: impl Into<String>, action: Action) -> Self {
		Self::new(receiver_id, vec![action])
	}

	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}
}

/// Final execution outcome as reported by the wallet.
///
/// Kept as raw JSON and returned to callers unchanged; the accessors only
/// read well-known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalExecutionOutcome(pub Value);

impl FinalExecutionOutcome {
	/// Hash of the submitted transaction, if the outcome carries one.
	pub fn transaction_hash(&self) -> Option<&str> {
		self.0
			.pointer("/transaction/hash")
			.or_else(|| self.0.pointer("/transaction_outcome/id"))
			.and_then(Value::as_str)
	}

	pub fn is_failure(&self) -> bool {
		self.0.pointer("/status/Failure").is_some()
	}

	pub fn into_inner(self) -> Value {
		self.0
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::ActionBuilder;

	#[test]
	fn transaction_serializes_with_receiver_id() {
		let tx = Transaction::single("bob.testnet", ActionBuilder::transfer("1"));
		let wire = serde_json::to_value(&tx).unwrap();
		assert_eq!(
			wire,
			json!({
				"receiverId": "bob.testnet",
				"actions": [{ "type": "Transfer", "params": { "deposit": "1" } }]
			})
		);
	}

	#[test]
	fn outcome_accessors_read_known_fields() {
		let outcome = FinalExecutionOutcome(json!({
			"status": { "SuccessValue": "" },
			"transaction": { "hash": "8dN" },
			"transaction_outcome": { "id": "8dN" }
		}));
		assert_eq!(outcome.transaction_hash(), Some("8dN"));
		assert!(!outcome.is_failure());

		let failed = FinalExecutionOutcome(json!({ "status": { "Failure": {} } }));
		assert!(failed.is_failure());
		assert_eq!(failed.transaction_hash(), None);
	}
}
