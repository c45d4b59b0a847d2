mod account;
mod guestbook;
mod view;

use std::sync::Arc;

use near_connect::{ConnectorConfig, JsonRpcProvider, Network, RpcGateway};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::output::print_json;

/// Builds the read gateway from global flags.
pub fn gateway(network: Network, rpc_url: Option<String>) -> Result<RpcGateway> {
	let mut config = ConnectorConfig::new(network);
	if let Some(url) = rpc_url {
		config = config.with_rpc_url(url);
	}
	config.validate()?;
	debug!(target: "nc.cli", network = %network, rpc_url = config.rpc_url(), "using endpoint");
	Ok(RpcGateway::new(Arc::new(JsonRpcProvider::new(config.rpc_url()))))
}

pub async fn dispatch(cli: Cli) -> Result<()> {
	let network = Network::from(cli.network);
	let gateway = gateway(network, cli.rpc_url)?;

	let output = match cli.command {
		Commands::View(args) => view::run(&gateway, args).await?,
		Commands::Balance(args) => account::balance(&gateway, &args.account_id).await?,
		Commands::Keys(args) => account::keys(&gateway, &args.account_id).await?,
		Commands::Account(args) => account::state(&gateway, &args.account_id).await?,
		Commands::Guestbook(args) => guestbook::run(&gateway, network, args).await?,
	};
	print_json(&output, cli.compact)
}
