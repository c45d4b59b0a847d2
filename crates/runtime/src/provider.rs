//! Read-provider contract.

use async_trait::async_trait;
use nc_protocol::{AccessKeyList, AccountView};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// How settled the queried state must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Finality {
	/// Latest block, may still be reorganized.
	Optimistic,
	/// Doomslug-final block.
	NearFinal,
	/// Latest finalized block.
	#[default]
	Final,
}

/// Block a read query is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReference {
	Finality(Finality),
	Height(u64),
	Hash(String),
}

impl BlockReference {
	/// The latest finalized block, used for every session-layer read.
	pub const fn finalized() -> Self {
		BlockReference::Finality(Finality::Final)
	}

	/// Merges this reference into a JSON-RPC `query` params object.
	pub fn apply_to(&self, params: &mut serde_json::Map<String, Value>) {
		match self {
			BlockReference::Finality(finality) => {
				params.insert("finality".into(), serde_json::to_value(finality).unwrap_or(Value::Null));
			}
			BlockReference::Height(height) => {
				params.insert("block_id".into(), Value::from(*height));
			}
			BlockReference::Hash(hash) => {
				params.insert("block_id".into(), Value::from(hash.clone()));
			}
		}
	}
}

impl Default for BlockReference {
	fn default() -> Self {
		Self::finalized()
	}
}

/// Read-only chain-state queries.
///
/// Implementations own their transport, including any retry policy; errors
/// are surfaced to callers unmodified.
#[async_trait]
pub trait ReadProvider: Send + Sync {
	/// Runs a view method and returns its JSON-decoded result.
	async fn call_function(
		&self,
		contract_id: &str,
		method: &str,
		args: &Value,
		block: BlockReference,
	) -> Result<Value>;

	async fn view_account(&self, account_id: &str, block: BlockReference) -> Result<AccountView>;

	async fn view_access_key_list(&self, account_id: &str, block: BlockReference) -> Result<AccessKeyList>;
}

#[cfg(test)]
mod tests {
	use serde_json::{Map, json};

	use super::*;

	#[test]
	fn finality_is_written_kebab_case() {
		let mut params = Map::new();
		BlockReference::Finality(Finality::NearFinal).apply_to(&mut params);
		assert_eq!(Value::Object(params), json!({ "finality": "near-final" }));
	}

	#[test]
	fn block_ids_use_block_id_key() {
		let mut params = Map::new();
		BlockReference::Height(42).apply_to(&mut params);
		assert_eq!(params["block_id"], 42);

		let mut params = Map::new();
		BlockReference::Hash("9Zq".into()).apply_to(&mut params);
		assert_eq!(params["block_id"], "9Zq");
	}

	#[test]
	fn default_reference_is_finalized() {
		assert_eq!(BlockReference::default(), BlockReference::Finality(Finality::Final));
	}
}
