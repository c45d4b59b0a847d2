//! Connector configuration.

use nc_protocol::Network;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-network RPC endpoint overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcUrls {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mainnet: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub testnet: Option<String>,
}

/// Configuration for a session: which network, and where to read from.
///
/// ```json
/// { "network": "mainnet", "rpcUrls": { "mainnet": "https://rpc.example.org" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectorConfig {
	pub network: Network,
	pub rpc_urls: RpcUrls,
}

impl ConnectorConfig {
	pub fn new(network: Network) -> Self {
		Self {
			network,
			rpc_urls: RpcUrls::default(),
		}
	}

	/// Overrides the RPC endpoint for the configured network.
	pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
		let url = Some(url.into());
		match self.network {
			Network::Mainnet => self.rpc_urls.mainnet = url,
			Network::Testnet => self.rpc_urls.testnet = url,
		}
		self
	}

	/// RPC endpoint for the configured network: the override if set, else the network default.
	pub fn rpc_url(&self) -> &str {
		let custom = match self.network {
			Network::Mainnet => self.rpc_urls.mainnet.as_deref(),
			Network::Testnet => self.rpc_urls.testnet.as_deref(),
		};
		custom.unwrap_or_else(|| self.network.default_rpc_url())
	}

	/// Checks that the resolved RPC endpoint is an absolute http(s) URL.
	pub fn validate(&self) -> Result<()> {
		let raw = self.rpc_url();
		let url = reqwest::Url::parse(raw)
			.map_err(|e| Error::InvalidArgument(format!("invalid RPC URL '{raw}': {e}")))?;
		match url.scheme() {
			"http" | "https" => Ok(()),
			other => Err(Error::InvalidArgument(format!(
				"RPC URL '{raw}' must use http or https, not '{other}'"
			))),
		}
	}
}

#[cfg(test)]
mod tests {
	use nc_protocol::{MAINNET_RPC_URL, TESTNET_RPC_URL};
	use serde_json::json;

	use super::*;

	#[test]
	fn defaults_to_testnet_endpoint() {
		let config = ConnectorConfig::default();
		assert_eq!(config.network, Network::Testnet);
		assert_eq!(config.rpc_url(), TESTNET_RPC_URL);
		config.validate().unwrap();
	}

	#[test]
	fn override_only_applies_to_its_network() {
		let config: ConnectorConfig = serde_json::from_value(json!({
			"network": "mainnet",
			"rpcUrls": { "testnet": "http://localhost:3030" }
		}))
		.unwrap();
		assert_eq!(config.rpc_url(), MAINNET_RPC_URL);

		let config = ConnectorConfig::new(Network::Mainnet).with_rpc_url("https://rpc.example.org");
		assert_eq!(config.rpc_url(), "https://rpc.example.org");
		assert_eq!(config.rpc_urls.testnet, None);
	}

	#[test]
	fn rejects_non_http_urls() {
		let config = ConnectorConfig::default().with_rpc_url("ws://localhost:3030");
		assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));

		let config = ConnectorConfig::default().with_rpc_url("not a url");
		assert!(config.validate().is_err());
	}
}
