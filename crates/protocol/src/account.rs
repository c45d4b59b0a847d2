//! Account identities and read-provider account views.

use serde::{Deserialize, Serialize};

use crate::amount::dec_u128;

/// Account exposed by a connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
	pub account_id: String,
	/// Public key the wallet signs with for this account, when it reports one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub public_key: Option<String>,
}

impl Account {
	pub fn new(account_id: impl Into<String>) -> Self {
		Self {
			account_id: account_id.into(),
			public_key: None,
		}
	}
}

/// `view_account` query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
	/// Liquid balance in yoctoNEAR.
	#[serde(with = "dec_u128")]
	pub amount: u128,
	/// Balance locked for staking, in yoctoNEAR.
	#[serde(with = "dec_u128")]
	pub locked: u128,
	pub code_hash: String,
	pub storage_usage: u64,
	#[serde(default)]
	pub storage_paid_at: u64,
	pub block_height: u64,
	pub block_hash: String,
}

/// Keys registered to an account, with the block they were read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyList {
	pub keys: Vec<AccessKeyInfo>,
	pub block_hash: String,
	pub block_height: u64,
}

impl AccessKeyList {
	/// Looks up a key by its `ed25519:...` public key string.
	pub fn find(&self, public_key: &str) -> Option<&AccessKeyInfo> {
		self.keys.iter().find(|k| k.public_key == public_key)
	}

	pub fn full_access_keys(&self) -> impl Iterator<Item = &AccessKeyInfo> {
		self.keys
			.iter()
			.filter(|k| k.access_key.permission == AccessKeyPermission::FullAccess)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyInfo {
	pub public_key: String,
	pub access_key: AccessKeyView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyView {
	pub nonce: u64,
	pub permission: AccessKeyPermission,
}

/// Permission attached to an access key, in the RPC node's encoding:
/// either the string `"FullAccess"` or `{"FunctionCall": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessKeyPermission {
	FullAccess,
	FunctionCall {
		/// Remaining gas allowance in yoctoNEAR; `None` is unlimited.
		allowance: Option<String>,
		receiver_id: String,
		method_names: Vec<String>,
	},
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn parses_rpc_access_key_list() {
		let raw = json!({
			"keys": [
				{
					"public_key": "ed25519:full",
					"access_key": { "nonce": 7, "permission": "FullAccess" }
				},
				{
					"public_key": "ed25519:limited",
					"access_key": {
						"nonce": 1,
						"permission": {
							"FunctionCall": {
								"allowance": null,
								"receiver_id": "guestbook.testnet",
								"method_names": []
							}
						}
					}
				}
			],
			"block_hash": "9Zq",
			"block_height": 1200
		});

		let list: AccessKeyList = serde_json::from_value(raw).unwrap();
		assert_eq!(list.block_height, 1200);
		assert_eq!(list.full_access_keys().count(), 1);
		let limited = list.find("ed25519:limited").unwrap();
		assert_eq!(
			limited.access_key.permission,
			AccessKeyPermission::FunctionCall {
				allowance: None,
				receiver_id: "guestbook.testnet".into(),
				method_names: vec![],
			}
		);
	}

	#[test]
	fn parses_account_view_amounts_exactly() {
		let raw = json!({
			"amount": "100000000000000000000000001",
			"locked": "0",
			"code_hash": "11111111111111111111111111111111",
			"storage_usage": 182,
			"storage_paid_at": 0,
			"block_height": 17,
			"block_hash": "abc"
		});
		let view: AccountView = serde_json::from_value(raw).unwrap();
		assert_eq!(view.amount, 100_000_000_000_000_000_000_000_001);
		assert_eq!(view.locked, 0);
	}

	#[test]
	fn wallet_account_uses_camel_case() {
		let account: Account = serde_json::from_value(json!({ "accountId": "alice.testnet" })).unwrap();
		assert_eq!(account, Account::new("alice.testnet"));
	}
}
