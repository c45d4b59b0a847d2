//! Network selection and the default RPC endpoint table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default read endpoint for mainnet.
pub const MAINNET_RPC_URL: &str = "https://free.rpc.fastnear.com";

/// Default read endpoint for testnet.
pub const TESTNET_RPC_URL: &str = "https://test.rpc.fastnear.com";

/// Chain network a session is bound to.
///
/// Fixed for the lifetime of a session; switching networks means building a
/// new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	Mainnet,
	#[default]
	Testnet,
}

impl Network {
	/// Returns the built-in RPC endpoint for this network.
	pub fn default_rpc_url(self) -> &'static str {
		match self {
			Network::Mainnet => MAINNET_RPC_URL,
			Network::Testnet => TESTNET_RPC_URL,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Network::Mainnet => "mainnet",
			Network::Testnet => "testnet",
		}
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when parsing a network name other than `mainnet` or `testnet`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network '{0}' (expected 'mainnet' or 'testnet')")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
	type Err = UnknownNetwork;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"mainnet" => Ok(Network::Mainnet),
			"testnet" => Ok(Network::Testnet),
			_ => Err(UnknownNetwork(s.to_string())),
		}
	}
}
