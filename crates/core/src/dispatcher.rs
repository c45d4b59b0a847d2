//! Transaction dispatch through the session's wallet.

use nc_protocol::{
	Action, AddFullAccessKeyParams, AddFunctionCallKeyParams, DeleteKeyParams, FinalExecutionOutcome,
	FunctionCallParams, Transaction, TransferParams,
};
use nc_runtime::{Error, Result, WalletHandle};
use tracing::{debug, warn};

use crate::session::SessionState;

/// Submits transactions with the wallet bound to the current session.
///
/// Every operation fails with [`Error::NotConnected`] before anything is sent
/// when no wallet is bound. Outcomes and wallet errors are returned unchanged;
/// nothing is retried.
#[derive(Debug, Clone)]
pub struct TransactionDispatcher {
	state: SessionState,
}

impl TransactionDispatcher {
	pub fn new(state: SessionState) -> Self {
		Self { state }
	}

	fn wallet(&self) -> Result<WalletHandle> {
		self.state.wallet().ok_or(Error::NotConnected)
	}

	/// Sends one transaction of `actions` to `receiver_id`.
	pub async fn dispatch(&self, receiver_id: impl Into<String>, actions: Vec<Action>) -> Result<FinalExecutionOutcome> {
		let wallet = self.wallet()?;
		self.send(wallet, Transaction::new(receiver_id, actions)).await
	}

	async fn send(&self, wallet: WalletHandle, transaction: Transaction) -> Result<FinalExecutionOutcome> {
		if transaction.is_empty() {
			return Err(Error::InvalidArgument(format!(
				"transaction to '{}' has no actions",
				transaction.receiver_id
			)));
		}

		debug!(
			target: "nc.dispatch",
			wallet = wallet.id(),
			receiver_id = %transaction.receiver_id,
			actions = transaction.actions.len(),
			"sign and send transaction"
		);
		wallet.sign_and_send_transaction(transaction).await.inspect_err(|e| {
			warn!(target: "nc.dispatch", error = %e, "transaction failed");
		})
	}

	/// Sends several transactions in one wallet approval.
	///
	/// Outcomes come back in input order. A rejection fails the whole call.
	///
	/// [`Error::OutcomeMismatch`] is raised after the wallet returned, so the
	/// transactions were already submitted and must not be sent again.
	pub async fn dispatch_many(&self, transactions: Vec<Transaction>) -> Result<Vec<FinalExecutionOutcome>> {
		let wallet = self.wallet()?;
		if transactions.is_empty() {
			return Err(Error::InvalidArgument("no transactions to send".into()));
		}
		if let Some(index) = transactions.iter().position(Transaction::is_empty) {
			return Err(Error::InvalidArgument(format!(
				"transaction {index} to '{}' has no actions",
				transactions[index].receiver_id
			)));
		}

		let expected = transactions.len();
		debug!(target: "nc.dispatch", wallet = wallet.id(), transactions = expected, "sign and send batch");
		let outcomes = wallet.sign_and_send_transactions(transactions).await.inspect_err(|e| {
			warn!(target: "nc.dispatch", error = %e, "batch failed");
		})?;

		if outcomes.len() != expected {
			warn!(target: "nc.dispatch", expected, actual = outcomes.len(), "batch submitted but outcome count differs");
			return Err(Error::OutcomeMismatch {
				expected,
				actual: outcomes.len(),
			});
		}
		Ok(outcomes)
	}

	pub async fn transfer(&self, params: TransferParams) -> Result<FinalExecutionOutcome> {
		let (receiver_id, action) = params.into_action();
		self.dispatch(receiver_id, vec![action]).await
	}

	/// Calls a change method; gas defaults to 30 Tgas, deposit to `"0"`, args to `{}`.
	pub async fn call_function(&self, params: FunctionCallParams) -> Result<FinalExecutionOutcome> {
		let (receiver_id, action) = params.into_action();
		self.dispatch(receiver_id, vec![action]).await
	}

	/// Adds a function-call key to the signed-in account.
	pub async fn add_function_call_key(&self, params: AddFunctionCallKeyParams) -> Result<FinalExecutionOutcome> {
		self.manage_keys(params.into_action()).await
	}

	/// Adds a full-access key to the signed-in account.
	pub async fn add_full_access_key(&self, params: AddFullAccessKeyParams) -> Result<FinalExecutionOutcome> {
		self.manage_keys(params.into_action()).await
	}

	/// Deletes a key from the signed-in account.
	pub async fn delete_key(&self, params: DeleteKeyParams) -> Result<FinalExecutionOutcome> {
		self.manage_keys(params.into_action()).await
	}

	/// Wallet and receiver come from the same session snapshot.
	async fn manage_keys(&self, action: Action) -> Result<FinalExecutionOutcome> {
		let (wallet, account_id) = self.state.identity().ok_or(Error::NotConnected)?;
		self.send(wallet, Transaction::single(account_id, action)).await
	}
}
