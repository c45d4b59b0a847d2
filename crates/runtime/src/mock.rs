//! In-memory collaborator doubles.
//!
//! [`MockConnector`], [`MockWallet`] and [`MockProvider`] implement the
//! collaborator traits without any I/O. They record what was asked of them
//! and can be scripted to fail, which is enough to drive the session layer
//! through every path in tests and demos.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use nc_protocol::{
	AccessKeyInfo, AccessKeyList, AccessKeyPermission, AccessKeyView, Account, AccountView,
	FinalExecutionOutcome, SignMessageParams, SignedMessage, Transaction,
};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::connector::{ConnectedWallet, Wallet, WalletConnector, WalletHandle};
use crate::error::{Error, Result};
use crate::events::ConnectorEvents;
use crate::provider::{BlockReference, ReadProvider};

/// Wallet that approves everything unless told to reject.
pub struct MockWallet {
	id: String,
	accounts: Mutex<Vec<Account>>,
	sent: Mutex<Vec<Transaction>>,
	signed: Mutex<Vec<SignMessageParams>>,
	rejection: Mutex<Option<String>>,
	outcome_limit: Mutex<Option<usize>>,
	tx_counter: AtomicUsize,
}

impl MockWallet {
	/// Creates a wallet exposing the given accounts, in order.
	pub fn new<I, S>(id: impl Into<String>, accounts: I) -> Arc<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Arc::new(Self {
			id: id.into(),
			accounts: Mutex::new(accounts.into_iter().map(|a| Account::new(a)).collect()),
			sent: Mutex::new(Vec::new()),
			signed: Mutex::new(Vec::new()),
			rejection: Mutex::new(None),
			outcome_limit: Mutex::new(None),
			tx_counter: AtomicUsize::new(0),
		})
	}

	/// Shorthand for a wallet with a single account.
	pub fn with_account(account_id: impl Into<String>) -> Arc<Self> {
		Self::new("mock-wallet", [account_id.into()])
	}

	pub fn handle(self: &Arc<Self>) -> WalletHandle {
		Arc::clone(self) as WalletHandle
	}

	pub fn set_accounts<I, S>(&self, accounts: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		*self.accounts.lock() = accounts.into_iter().map(|a| Account::new(a)).collect();
	}

	/// Makes every subsequent signing request fail with [`Error::WalletRejected`].
	pub fn reject_with(&self, message: impl Into<String>) {
		*self.rejection.lock() = Some(message.into());
	}

	/// Resumes approving requests.
	pub fn approve(&self) {
		*self.rejection.lock() = None;
	}

	/// Caps the number of outcomes returned from a batch submission.
	pub fn limit_outcomes(&self, limit: usize) {
		*self.outcome_limit.lock() = Some(limit);
	}

	/// Transactions submitted so far, in submission order.
	pub fn sent_transactions(&self) -> Vec<Transaction> {
		self.sent.lock().clone()
	}

	pub fn signed_messages(&self) -> Vec<SignMessageParams> {
		self.signed.lock().clone()
	}

	fn check_rejection(&self) -> Result<()> {
		match self.rejection.lock().as_ref() {
			Some(message) => Err(Error::rejected(message.clone())),
			None => Ok(()),
		}
	}

	fn signer_id(&self) -> String {
		self.accounts
			.lock()
			.first()
			.map(|a| a.account_id.clone())
			.unwrap_or_default()
	}

	fn execute(&self, transaction: Transaction) -> FinalExecutionOutcome {
		let n = self.tx_counter.fetch_add(1, Ordering::SeqCst);
		let hash = format!("mock-tx-{n}");
		let outcome = json!({
			"status": { "SuccessValue": "" },
			"transaction": {
				"hash": hash,
				"signer_id": self.signer_id(),
				"receiver_id": transaction.receiver_id,
				"actions": transaction.actions,
			},
			"transaction_outcome": { "id": hash },
			"receipts_outcome": [],
		});
		self.sent.lock().push(transaction);
		FinalExecutionOutcome(outcome)
	}
}

#[async_trait]
impl Wallet for MockWallet {
	fn id(&self) -> &str {
		&self.id
	}

	async fn get_accounts(&self) -> Result<Vec<Account>> {
		Ok(self.accounts.lock().clone())
	}

	async fn sign_and_send_transaction(&self, transaction: Transaction) -> Result<FinalExecutionOutcome> {
		self.check_rejection()?;
		Ok(self.execute(transaction))
	}

	async fn sign_and_send_transactions(
		&self,
		transactions: Vec<Transaction>,
	) -> Result<Vec<FinalExecutionOutcome>> {
		self.check_rejection()?;
		let mut outcomes: Vec<_> = transactions.into_iter().map(|tx| self.execute(tx)).collect();
		if let Some(limit) = *self.outcome_limit.lock() {
			outcomes.truncate(limit);
		}
		Ok(outcomes)
	}

	async fn sign_message(&self, params: SignMessageParams) -> Result<SignedMessage> {
		self.check_rejection()?;
		let signed = SignedMessage {
			account_id: self.signer_id(),
			public_key: "ed25519:mock".to_string(),
			signature: format!("sig:{}:{}", params.recipient, params.message),
			state: None,
		};
		self.signed.lock().push(params);
		Ok(signed)
	}
}

/// Connector with one selectable wallet and optionally a persisted connection.
pub struct MockConnector {
	events: ConnectorEvents,
	selectable: Mutex<Option<WalletHandle>>,
	connected: Mutex<Option<WalletHandle>>,
	recovery_error: Mutex<Option<String>>,
	connect_error: Mutex<Option<String>>,
	disconnect_error: Mutex<Option<String>>,
	connect_calls: AtomicUsize,
	disconnect_calls: AtomicUsize,
	recovery_calls: AtomicUsize,
}

impl Default for MockConnector {
	fn default() -> Self {
		Self {
			events: ConnectorEvents::new(),
			selectable: Mutex::new(None),
			connected: Mutex::new(None),
			recovery_error: Mutex::new(None),
			connect_error: Mutex::new(None),
			disconnect_error: Mutex::new(None),
			connect_calls: AtomicUsize::new(0),
			disconnect_calls: AtomicUsize::new(0),
			recovery_calls: AtomicUsize::new(0),
		}
	}
}

impl MockConnector {
	/// Connector whose selector is dismissed (`connect` resolves to `None`).
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Connector whose selector picks `wallet`.
	pub fn with_wallet(wallet: WalletHandle) -> Arc<Self> {
		let connector = Self::new();
		connector.set_selectable(Some(wallet));
		connector
	}

	/// Connector that already has `wallet` connected from a previous session.
	pub fn with_connected(wallet: WalletHandle) -> Arc<Self> {
		let connector = Self::with_wallet(Arc::clone(&wallet));
		*connector.connected.lock() = Some(wallet);
		connector
	}

	pub fn set_selectable(&self, wallet: Option<WalletHandle>) {
		*self.selectable.lock() = wallet;
	}

	pub fn fail_recovery(&self, message: impl Into<String>) {
		*self.recovery_error.lock() = Some(message.into());
	}

	pub fn fail_connect(&self, message: impl Into<String>) {
		*self.connect_error.lock() = Some(message.into());
	}

	pub fn fail_disconnect(&self, message: impl Into<String>) {
		*self.disconnect_error.lock() = Some(message.into());
	}

	pub fn is_connected(&self) -> bool {
		self.connected.lock().is_some()
	}

	pub fn connect_calls(&self) -> usize {
		self.connect_calls.load(Ordering::SeqCst)
	}

	pub fn disconnect_calls(&self) -> usize {
		self.disconnect_calls.load(Ordering::SeqCst)
	}

	pub fn recovery_calls(&self) -> usize {
		self.recovery_calls.load(Ordering::SeqCst)
	}

	/// Simulates a sign-in performed outside the session layer.
	pub async fn sign_in_externally(&self, wallet: WalletHandle) {
		*self.connected.lock() = Some(Arc::clone(&wallet));
		self.events.emit_signed_in(wallet).await;
	}

	/// Simulates a sign-out performed outside the session layer.
	pub async fn sign_out_externally(&self) {
		self.connected.lock().take();
		self.events.emit_signed_out().await;
	}
}

#[async_trait]
impl WalletConnector for MockConnector {
	async fn connect(&self) -> Result<Option<WalletHandle>> {
		self.connect_calls.fetch_add(1, Ordering::SeqCst);
		if let Some(message) = self.connect_error.lock().clone() {
			return Err(Error::rejected(message));
		}
		let wallet = self.selectable.lock().clone();
		if let Some(wallet) = &wallet {
			*self.connected.lock() = Some(Arc::clone(wallet));
		}
		Ok(wallet)
	}

	async fn disconnect(&self, _wallet: &WalletHandle) -> Result<()> {
		self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
		if let Some(message) = self.disconnect_error.lock().clone() {
			return Err(Error::Network(message));
		}
		self.connected.lock().take();
		Ok(())
	}

	async fn wallet(&self) -> Result<WalletHandle> {
		self.connected.lock().clone().ok_or(Error::NotConnected)
	}

	async fn get_connected_wallet(&self) -> Result<ConnectedWallet> {
		self.recovery_calls.fetch_add(1, Ordering::SeqCst);
		if let Some(message) = self.recovery_error.lock().clone() {
			return Err(Error::RecoveryFailed(message));
		}
		let wallet = self
			.connected
			.lock()
			.clone()
			.ok_or_else(|| Error::RecoveryFailed("no wallet connected".into()))?;
		let accounts = wallet.get_accounts().await?;
		Ok(ConnectedWallet { wallet, accounts })
	}

	fn events(&self) -> &ConnectorEvents {
		&self.events
	}
}

type ViewFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// A recorded `call_function` query.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewCall {
	pub contract_id: String,
	pub method: String,
	pub args: Value,
	pub block: BlockReference,
}

/// Read provider answering from in-memory tables.
///
/// Unknown accounts fail the way an RPC node does, with cause
/// `UNKNOWN_ACCOUNT`; unknown view methods fail as a contract execution error.
#[derive(Default)]
pub struct MockProvider {
	views: Mutex<HashMap<(String, String), ViewFn>>,
	accounts: Mutex<HashMap<String, AccountView>>,
	keys: Mutex<HashMap<String, Vec<AccessKeyInfo>>>,
	calls: Mutex<Vec<ViewCall>>,
	block_height: u64,
}

impl MockProvider {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			block_height: 1_000,
			..Self::default()
		})
	}

	/// Answers `contract_id.method` with a fixed value.
	pub fn set_view(&self, contract_id: &str, method: &str, value: Value) {
		self.on_view(contract_id, method, move |_| Ok(value.clone()));
	}

	/// Answers `contract_id.method` by calling `f` with the query args.
	pub fn on_view<F>(&self, contract_id: &str, method: &str, f: F)
	where
		F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
	{
		self.views
			.lock()
			.insert((contract_id.to_string(), method.to_string()), Arc::new(f));
	}

	/// Registers an account with the given liquid balance.
	pub fn set_balance(&self, account_id: &str, amount: u128) {
		let view = AccountView {
			amount,
			locked: 0,
			code_hash: "11111111111111111111111111111111".to_string(),
			storage_usage: 182,
			storage_paid_at: 0,
			block_height: self.block_height,
			block_hash: self.block_hash(),
		};
		self.accounts.lock().insert(account_id.to_string(), view);
	}

	/// Adds a key to `account_id`'s access key list.
	pub fn add_key(&self, account_id: &str, public_key: &str, permission: AccessKeyPermission) {
		self.keys
			.lock()
			.entry(account_id.to_string())
			.or_default()
			.push(AccessKeyInfo {
				public_key: public_key.to_string(),
				access_key: AccessKeyView { nonce: 0, permission },
			});
	}

	/// `call_function` queries received so far.
	pub fn view_calls(&self) -> Vec<ViewCall> {
		self.calls.lock().clone()
	}

	fn block_hash(&self) -> String {
		format!("mock-block-{}", self.block_height)
	}

	fn unknown_account(account_id: &str) -> Error {
		Error::Rpc {
			name: "HANDLER_ERROR".into(),
			cause: Some("UNKNOWN_ACCOUNT".into()),
			message: format!("account {account_id} does not exist while viewing"),
		}
	}
}

#[async_trait]
impl ReadProvider for MockProvider {
	async fn call_function(
		&self,
		contract_id: &str,
		method: &str,
		args: &Value,
		block: BlockReference,
	) -> Result<Value> {
		self.calls.lock().push(ViewCall {
			contract_id: contract_id.to_string(),
			method: method.to_string(),
			args: args.clone(),
			block,
		});
		let view = self
			.views
			.lock()
			.get(&(contract_id.to_string(), method.to_string()))
			.cloned();
		match view {
			Some(view) => view(args),
			None => Err(Error::Rpc {
				name: "CONTRACT_EXECUTION_ERROR".into(),
				cause: None,
				message: format!("wasm execution failed with error: MethodNotFound ({contract_id}.{method})"),
			}),
		}
	}

	async fn view_account(&self, account_id: &str, _block: BlockReference) -> Result<AccountView> {
		self.accounts
			.lock()
			.get(account_id)
			.cloned()
			.ok_or_else(|| Self::unknown_account(account_id))
	}

	async fn view_access_key_list(&self, account_id: &str, _block: BlockReference) -> Result<AccessKeyList> {
		if !self.accounts.lock().contains_key(account_id) {
			return Err(Self::unknown_account(account_id));
		}
		let keys = self.keys.lock().get(account_id).cloned().unwrap_or_default();
		Ok(AccessKeyList {
			keys,
			block_hash: self.block_hash(),
			block_height: self.block_height,
		})
	}
}

#[cfg(test)]
mod tests {
	use nc_protocol::ActionBuilder;

	use super::*;

	#[tokio::test]
	async fn wallet_records_and_rejects() {
		let wallet = MockWallet::with_account("alice.testnet");
		let tx = Transaction::single("bob.testnet", ActionBuilder::transfer("1"));

		let outcome = wallet.sign_and_send_transaction(tx.clone()).await.unwrap();
		assert_eq!(outcome.transaction_hash(), Some("mock-tx-0"));
		assert_eq!(wallet.sent_transactions(), vec![tx.clone()]);

		wallet.reject_with("User rejected");
		let err = wallet.sign_and_send_transaction(tx).await.unwrap_err();
		assert!(err.is_rejected());
		assert_eq!(wallet.sent_transactions().len(), 1);
	}

	#[tokio::test]
	async fn connector_recovers_persisted_wallet() {
		let wallet = MockWallet::with_account("alice.testnet");
		let connector = MockConnector::with_connected(wallet.handle());

		let restored = connector.get_connected_wallet().await.unwrap();
		assert_eq!(restored.accounts, vec![Account::new("alice.testnet")]);

		connector.disconnect(&restored.wallet).await.unwrap();
		assert!(matches!(
			connector.get_connected_wallet().await,
			Err(Error::RecoveryFailed(_))
		));
	}

	#[tokio::test]
	async fn provider_reports_unknown_accounts() {
		let provider = MockProvider::new();
		provider.set_balance("alice.testnet", 5);

		let view = provider
			.view_account("alice.testnet", BlockReference::finalized())
			.await
			.unwrap();
		assert_eq!(view.amount, 5);

		let err = provider
			.view_access_key_list("nobody.testnet", BlockReference::finalized())
			.await
			.unwrap_err();
		assert!(err.is_unknown_account());
	}
}
