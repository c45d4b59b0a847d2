//! Session snapshot and the shared cell it lives in.

use std::fmt;
use std::sync::Arc;

use nc_protocol::{Account, Network};
use nc_runtime::WalletHandle;
use tokio::sync::watch;

/// Who is signed in, with which wallet, and whether recovery has finished.
///
/// A wallet is present exactly when `account_id` is non-empty.
#[derive(Clone)]
pub struct Session {
	account_id: String,
	wallet: Option<WalletHandle>,
	network: Network,
	initializing: bool,
}

impl Session {
	fn new(network: Network) -> Self {
		Self {
			account_id: String::new(),
			wallet: None,
			network,
			initializing: true,
		}
	}

	/// Signed-in account, or `""` when signed out.
	pub fn account_id(&self) -> &str {
		&self.account_id
	}

	pub fn wallet(&self) -> Option<&WalletHandle> {
		self.wallet.as_ref()
	}

	pub fn network(&self) -> Network {
		self.network
	}

	/// True until the first `initialize` has finished.
	pub fn is_initializing(&self) -> bool {
		self.initializing
	}

	pub fn is_signed_in(&self) -> bool {
		self.wallet.is_some()
	}
}

impl fmt::Debug for Session {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Session")
			.field("account_id", &self.account_id)
			.field("wallet", &self.wallet.as_ref().map(|w| w.id()))
			.field("network", &self.network)
			.field("initializing", &self.initializing)
			.finish()
	}
}

/// Shared, observable session cell.
///
/// Updates replace the identity as a whole, so a reader never sees an account
/// without its wallet or the reverse.
#[derive(Clone)]
pub struct SessionState {
	tx: Arc<watch::Sender<Session>>,
}

impl SessionState {
	pub fn new(network: Network) -> Self {
		let (tx, _) = watch::channel(Session::new(network));
		Self { tx: Arc::new(tx) }
	}

	pub fn snapshot(&self) -> Session {
		self.tx.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<Session> {
		self.tx.subscribe()
	}

	pub fn wallet(&self) -> Option<WalletHandle> {
		self.tx.borrow().wallet.clone()
	}

	pub fn account_id(&self) -> String {
		self.tx.borrow().account_id.clone()
	}

	/// Wallet and account together, read under one borrow.
	pub fn identity(&self) -> Option<(WalletHandle, String)> {
		let session = self.tx.borrow();
		session
			.wallet
			.as_ref()
			.map(|w| (Arc::clone(w), session.account_id.clone()))
	}

	/// Binds `wallet` with the first of `accounts`.
	///
	/// Returns the adopted account id, or `None` (session untouched) when the
	/// wallet exposes no accounts.
	pub fn adopt(&self, wallet: WalletHandle, accounts: &[Account]) -> Option<String> {
		let account_id = accounts.first()?.account_id.clone();
		let adopted = account_id.clone();
		self.tx.send_modify(move |session| {
			session.account_id = account_id;
			session.wallet = Some(wallet);
		});
		Some(adopted)
	}

	pub fn clear(&self) {
		self.tx.send_if_modified(|session| {
			if session.wallet.is_none() && session.account_id.is_empty() {
				return false;
			}
			session.account_id.clear();
			session.wallet = None;
			true
		});
	}

	/// Marks initialization as finished. Returns `false` if it already was.
	pub fn finish_initializing(&self) -> bool {
		self.tx.send_if_modified(|session| std::mem::replace(&mut session.initializing, false))
	}
}

impl fmt::Debug for SessionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SessionState").field(&*self.tx.borrow()).finish()
	}
}

#[cfg(test)]
mod tests {
	use nc_runtime::mock::MockWallet;

	use super::*;

	#[test]
	fn starts_signed_out_and_initializing() {
		let state = SessionState::new(Network::Testnet);
		let session = state.snapshot();
		assert_eq!(session.account_id(), "");
		assert!(session.wallet().is_none());
		assert!(session.is_initializing());
		assert_eq!(session.network(), Network::Testnet);
	}

	#[test]
	fn adopt_takes_first_account() {
		let state = SessionState::new(Network::Testnet);
		let wallet = MockWallet::new("mock", ["alice.testnet", "bob.testnet"]);
		let accounts = vec![Account::new("alice.testnet"), Account::new("bob.testnet")];

		assert_eq!(state.adopt(wallet.handle(), &accounts).as_deref(), Some("alice.testnet"));
		let (w, account) = state.identity().unwrap();
		assert_eq!(w.id(), "mock");
		assert_eq!(account, "alice.testnet");
	}

	#[test]
	fn adopt_without_accounts_is_ignored() {
		let state = SessionState::new(Network::Testnet);
		let wallet = MockWallet::new("mock", Vec::<String>::new());
		assert!(state.adopt(wallet.handle(), &[]).is_none());
		assert!(!state.snapshot().is_signed_in());
	}

	#[test]
	fn initializing_flips_once() {
		let state = SessionState::new(Network::Mainnet);
		let mut rx = state.subscribe();
		assert!(state.finish_initializing());
		assert!(!state.finish_initializing());
		assert!(rx.has_changed().unwrap());
		rx.mark_unchanged();
		assert!(!rx.borrow().is_initializing());
	}

	#[test]
	fn clear_notifies_only_on_change() {
		let state = SessionState::new(Network::Testnet);
		let mut rx = state.subscribe();
		state.clear();
		assert!(!rx.has_changed().unwrap());

		let wallet = MockWallet::with_account("alice.testnet");
		state.adopt(wallet.handle(), &[Account::new("alice.testnet")]);
		rx.mark_unchanged();
		state.clear();
		assert!(rx.has_changed().unwrap());
		assert_eq!(state.account_id(), "");
		assert!(state.wallet().is_none());
	}
}
