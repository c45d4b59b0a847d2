//! [`SessionManager`]: the application-facing session object.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use nc_protocol::{
	AccessKeyList, AccountView, Action, AddFullAccessKeyParams, AddFunctionCallKeyParams, DeleteKeyParams,
	FinalExecutionOutcome, FunctionCallParams, Network, SignMessageParams, SignedMessage, Transaction,
	TransferParams, ViewFunctionParams,
};
use nc_runtime::{ConnectorConfig, JsonRpcProvider, ReadProvider, Result, WalletConnector, WalletHandle};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::bridge::EventBridge;
use crate::dispatcher::TransactionDispatcher;
use crate::gateway::RpcGateway;
use crate::session::{Session, SessionState};
use crate::signer::MessageSigner;

/// Owns the session for one network and sequences calls into the wallet
/// connector and the read provider.
///
/// Construction is synchronous and leaves the session signed out with
/// `initializing = true`; call [`initialize`](Self::initialize) once to
/// restore a previous connection and start following connector events.
///
/// Dropping the manager (or calling [`close`](Self::close)) removes its event
/// handlers from the connector.
pub struct SessionManager {
	config: ConnectorConfig,
	connector: Arc<dyn WalletConnector>,
	state: SessionState,
	bridge: EventBridge,
	gateway: RpcGateway,
	dispatcher: TransactionDispatcher,
	signer: MessageSigner,
	init_started: AtomicBool,
}

impl SessionManager {
	/// Creates a manager reading from the configured JSON-RPC endpoint.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidArgument`](nc_runtime::Error::InvalidArgument)
	/// if the resolved RPC URL is not an http(s) URL.
	pub fn new(config: ConnectorConfig, connector: Arc<dyn WalletConnector>) -> Result<Self> {
		config.validate()?;
		let provider = Arc::new(JsonRpcProvider::new(config.rpc_url()));
		Ok(Self::with_provider(config, connector, provider))
	}

	/// Creates a manager that reads through `provider`.
	pub fn with_provider(
		config: ConnectorConfig,
		connector: Arc<dyn WalletConnector>,
		provider: Arc<dyn ReadProvider>,
	) -> Self {
		let state = SessionState::new(config.network);
		Self {
			gateway: RpcGateway::new(provider),
			dispatcher: TransactionDispatcher::new(state.clone()),
			signer: MessageSigner::new(state.clone()),
			bridge: EventBridge::new(),
			init_started: AtomicBool::new(false),
			config,
			connector,
			state,
		}
	}

	/// Restores a previously connected wallet and binds connector events.
	///
	/// Only the first call does anything. Recovery failures are logged and
	/// leave the session signed out; they are never returned.
	pub async fn initialize(&self) {
		if self.init_started.swap(true, Ordering::SeqCst) {
			return;
		}

		match self.connector.get_connected_wallet().await {
			Ok(connected) => match self.state.adopt(connected.wallet, &connected.accounts) {
				Some(account_id) => info!(target: "nc.session", account_id = %account_id, "session restored"),
				None => debug!(target: "nc.session", "connected wallet has no accounts"),
			},
			Err(e) => debug!(target: "nc.session", error = %e, "no wallet to restore"),
		}

		self.rebind_events();
		self.state.finish_initializing();
	}

	/// Runs the connector's connect flow and adopts the wallet's first account.
	///
	/// A dismissed selector or a wallet without accounts leaves the session
	/// unchanged. Connector and wallet errors are returned and leave the
	/// session unchanged.
	pub async fn sign_in(&self) -> Result<Session> {
		let Some(wallet) = self.connector.connect().await? else {
			debug!(target: "nc.session", "connect finished without a wallet");
			return Ok(self.session());
		};

		let accounts = wallet.get_accounts().await?;
		match self.state.adopt(wallet, &accounts) {
			Some(account_id) => info!(target: "nc.session", account_id = %account_id, "signed in"),
			None => debug!(target: "nc.session", "wallet returned no accounts"),
		}
		Ok(self.session())
	}

	/// Disconnects the current wallet and clears the session.
	///
	/// The session is cleared even when the connector fails to disconnect.
	pub async fn sign_out(&self) {
		let Some(wallet) = self.state.wallet() else {
			return;
		};

		if let Err(e) = self.connector.disconnect(&wallet).await {
			warn!(target: "nc.session", wallet = wallet.id(), error = %e, "disconnect failed");
		}
		self.state.clear();
		info!(target: "nc.session", "signed out");
	}

	/// Re-registers the connector event handlers, replacing any previous ones.
	pub fn rebind_events(&self) {
		self.bridge.bind(self.connector.as_ref(), &self.state);
	}

	/// Removes the connector event handlers.
	pub fn close(&self) {
		self.bridge.unbind();
	}

	pub fn session(&self) -> Session {
		self.state.snapshot()
	}

	/// Receiver that observes every applied session update.
	pub fn watch(&self) -> watch::Receiver<Session> {
		self.state.subscribe()
	}

	pub fn account_id(&self) -> String {
		self.state.account_id()
	}

	pub fn wallet(&self) -> Option<WalletHandle> {
		self.state.wallet()
	}

	pub fn is_signed_in(&self) -> bool {
		self.state.wallet().is_some()
	}

	pub fn is_initializing(&self) -> bool {
		self.state.snapshot().is_initializing()
	}

	pub fn network(&self) -> Network {
		self.config.network
	}

	pub fn config(&self) -> &ConnectorConfig {
		&self.config
	}

	pub fn connector(&self) -> &Arc<dyn WalletConnector> {
		&self.connector
	}

	pub fn gateway(&self) -> &RpcGateway {
		&self.gateway
	}

	pub fn dispatcher(&self) -> &TransactionDispatcher {
		&self.dispatcher
	}

	pub fn signer(&self) -> &MessageSigner {
		&self.signer
	}

	// Reads

	pub async fn view_function(&self, params: ViewFunctionParams) -> Result<Value> {
		self.gateway.view_function(params).await
	}

	pub async fn view_function_as<T: DeserializeOwned>(&self, params: ViewFunctionParams) -> Result<T> {
		self.gateway.view_function_as(params).await
	}

	pub async fn get_balance(&self, account_id: &str) -> Result<u128> {
		self.gateway.get_balance(account_id).await
	}

	pub async fn get_account(&self, account_id: &str) -> Result<AccountView> {
		self.gateway.get_account(account_id).await
	}

	pub async fn get_access_key_list(&self, account_id: &str) -> Result<AccessKeyList> {
		self.gateway.get_access_key_list(account_id).await
	}

	// Writes

	pub async fn dispatch(&self, receiver_id: impl Into<String>, actions: Vec<Action>) -> Result<FinalExecutionOutcome> {
		self.dispatcher.dispatch(receiver_id, actions).await
	}

	pub async fn dispatch_many(&self, transactions: Vec<Transaction>) -> Result<Vec<FinalExecutionOutcome>> {
		self.dispatcher.dispatch_many(transactions).await
	}

	pub async fn transfer(&self, params: TransferParams) -> Result<FinalExecutionOutcome> {
		self.dispatcher.transfer(params).await
	}

	pub async fn call_function(&self, params: FunctionCallParams) -> Result<FinalExecutionOutcome> {
		self.dispatcher.call_function(params).await
	}

	pub async fn add_function_call_key(&self, params: AddFunctionCallKeyParams) -> Result<FinalExecutionOutcome> {
		self.dispatcher.add_function_call_key(params).await
	}

	pub async fn add_full_access_key(&self, params: AddFullAccessKeyParams) -> Result<FinalExecutionOutcome> {
		self.dispatcher.add_full_access_key(params).await
	}

	pub async fn delete_key(&self, params: DeleteKeyParams) -> Result<FinalExecutionOutcome> {
		self.dispatcher.delete_key(params).await
	}

	pub async fn sign_message(&self, params: SignMessageParams) -> Result<SignedMessage> {
		self.signer.sign_message(params).await
	}
}

impl std::fmt::Debug for SessionManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionManager")
			.field("network", &self.config.network)
			.field("session", &self.state.snapshot())
			.field("events_bound", &self.bridge.is_bound())
			.finish()
	}
}
