//! Wallet-connector and wallet contracts.
//!
//! The connector owns wallet selection, connection persistence, and the
//! approval UI; a [`Wallet`] is the capability through which one connected
//! identity signs. Both are opaque services here: the session layer only
//! sequences calls into them.

use std::sync::Arc;

use async_trait::async_trait;
use nc_protocol::{Account, FinalExecutionOutcome, SignMessageParams, SignedMessage, Transaction};

use crate::error::Result;
use crate::events::ConnectorEvents;

/// Shared handle to a connected wallet.
pub type WalletHandle = Arc<dyn Wallet>;

/// Signing capability for one connected identity.
#[async_trait]
pub trait Wallet: Send + Sync {
	/// Identifier of the wallet implementation (e.g. `"meteor-wallet"`).
	fn id(&self) -> &str;

	/// Accounts exposed by this wallet, in the wallet's preferred order.
	async fn get_accounts(&self) -> Result<Vec<Account>>;

	/// Signs and submits one transaction, resolving with its final outcome.
	async fn sign_and_send_transaction(&self, transaction: Transaction) -> Result<FinalExecutionOutcome>;

	/// Signs and submits several transactions in one approval.
	///
	/// Outcomes are returned in submission order.
	async fn sign_and_send_transactions(
		&self,
		transactions: Vec<Transaction>,
	) -> Result<Vec<FinalExecutionOutcome>>;

	/// Signs an off-chain message (NEP-413).
	async fn sign_message(&self, params: SignMessageParams) -> Result<SignedMessage>;
}

/// Wallet restored from the connector's persisted state.
#[derive(Clone)]
pub struct ConnectedWallet {
	pub wallet: WalletHandle,
	pub accounts: Vec<Account>,
}

impl std::fmt::Debug for ConnectedWallet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConnectedWallet")
			.field("wallet", &self.wallet.id())
			.field("accounts", &self.accounts)
			.finish()
	}
}

/// Wallet-connector service.
#[async_trait]
pub trait WalletConnector: Send + Sync {
	/// Runs the interactive connect flow.
	///
	/// Resolves to `None` when the flow finishes without a wallet (for example
	/// the user dismissed the selector).
	async fn connect(&self) -> Result<Option<WalletHandle>>;

	/// Disconnects `wallet` and forgets its persisted connection.
	async fn disconnect(&self, wallet: &WalletHandle) -> Result<()>;

	/// Currently selected wallet; fails with [`Error::NotConnected`](crate::Error::NotConnected) when none.
	async fn wallet(&self) -> Result<WalletHandle>;

	/// Restores the wallet connected in a previous session.
	async fn get_connected_wallet(&self) -> Result<ConnectedWallet>;

	/// Event channel for sign-in / sign-out notifications.
	fn events(&self) -> &ConnectorEvents;
}
