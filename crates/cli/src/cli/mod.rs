
use clap::{Args, Parser, Subcommand, ValueEnum};
use near_connect::Network;

/// Root CLI for nc.
#[derive(Parser, Debug)]
#[command(name = "nc")]
#[command(about = "NEAR chain reads from the command line")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Network to query
	#[arg(short, long, global = true, value_enum, default_value = "testnet")]
	pub network: CliNetwork,

	/// RPC endpoint overriding the network default
	#[arg(long, global = true, value_name = "URL")]
	pub rpc_url: Option<String>,

	/// Print JSON on a single line
	#[arg(long, global = true)]
	pub compact: bool,

	#[command(subcommand)]
	pub command: Commands,
}

/// Network selector (CLI wrapper for near_connect::Network)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CliNetwork {
	Mainnet,
	#[default]
	Testnet,
}

impl From<CliNetwork> for Network {
	fn from(network: CliNetwork) -> Self {
		match network {
			CliNetwork::Mainnet => Network::Mainnet,
			CliNetwork::Testnet => Network::Testnet,
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Call a contract view method.
	View(ViewArgs),
	/// Show an account's liquid balance.
	Balance(AccountArgs),
	/// List an account's access keys.
	Keys(AccountArgs),
	/// Show an account's state.
	Account(AccountArgs),
	/// Show the latest guestbook messages, newest first.
	Guestbook(GuestbookArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
	/// Contract account id.
	#[arg(value_name = "CONTRACT")]
	pub contract: String,

	/// View method name.
	#[arg(value_name = "METHOD")]
	pub method: String,

	/// JSON object passed as method arguments.
	#[arg(long, value_name = "JSON")]
	pub args: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
	#[arg(value_name = "ACCOUNT")]
	pub account_id: String,
}

#[derive(Args, Debug, Clone)]
pub struct GuestbookArgs {
	/// Guestbook contract (defaults to the network's example deployment).
	#[arg(long, value_name = "ID")]
	pub contract: Option<String>,

	/// Number of messages to show.
	#[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=100))]
	pub limit: u64,
}
