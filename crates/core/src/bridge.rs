//! Connector event bridge.
//!
//! Keeps the session in step with sign-in / sign-out that happens outside an
//! explicit [`SessionManager::sign_in`](crate::SessionManager::sign_in) or
//! [`sign_out`](crate::SessionManager::sign_out) call. Exactly one handler per
//! event is registered at a time; binding again replaces the previous pair.

use nc_runtime::{Subscription, WalletConnector};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::session::SessionState;

#[derive(Debug, Default)]
pub struct EventBridge {
	subscriptions: Mutex<Vec<Subscription>>,
}

impl EventBridge {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the sign-in / sign-out handlers on `connector`, dropping any
	/// handlers a previous `bind` registered.
	pub fn bind(&self, connector: &dyn WalletConnector, state: &SessionState) {
		self.unbind();

		let events = connector.events();
		let on_in = {
			let state = state.clone();
			events.on_signed_in(move |event| {
				let state = state.clone();
				async move {
					let accounts = event.wallet.get_accounts().await?;
					match state.adopt(event.wallet, &accounts) {
						Some(account_id) => {
							info!(target: "nc.session", account_id = %account_id, "signed in by connector")
						}
						None => debug!(target: "nc.session", "connector sign-in with no accounts ignored"),
					}
					Ok(())
				}
			})
		};
		let on_out = {
			let state = state.clone();
			events.on_signed_out(move |_| {
				let state = state.clone();
				async move {
					state.clear();
					info!(target: "nc.session", "signed out by connector");
					Ok(())
				}
			})
		};

		*self.subscriptions.lock() = vec![on_in, on_out];
		debug!(target: "nc.events", "event bridge bound");
	}

	/// Removes the registered handlers, if any.
	pub fn unbind(&self) {
		let previous = std::mem::take(&mut *self.subscriptions.lock());
		if !previous.is_empty() {
			debug!(target: "nc.events", handlers = previous.len(), "event bridge unbound");
		}
	}

	pub fn is_bound(&self) -> bool {
		!self.subscriptions.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use nc_protocol::Network;
	use nc_runtime::mock::{MockConnector, MockWallet};

	use super::*;

	#[tokio::test]
	async fn rebinding_keeps_a_single_handler_pair() {
		let connector = MockConnector::new();
		let state = SessionState::new(Network::Testnet);
		let bridge = EventBridge::new();

		bridge.bind(connector.as_ref(), &state);
		bridge.bind(connector.as_ref(), &state);
		assert_eq!(connector.events().signed_in_handler_count(), 1);
		assert_eq!(connector.events().signed_out_handler_count(), 1);

		bridge.unbind();
		assert!(!bridge.is_bound());
		assert_eq!(connector.events().signed_in_handler_count(), 0);
	}

	#[tokio::test]
	async fn events_update_the_session() {
		let connector = MockConnector::new();
		let state = SessionState::new(Network::Testnet);
		let bridge = EventBridge::new();
		bridge.bind(connector.as_ref(), &state);

		let wallet = MockWallet::with_account("carol.testnet");
		connector.sign_in_externally(wallet.handle()).await;
		assert_eq!(state.account_id(), "carol.testnet");

		connector.sign_out_externally().await;
		assert_eq!(state.account_id(), "");
		assert!(state.wallet().is_none());
	}

	#[tokio::test]
	async fn dropping_the_bridge_removes_handlers() {
		let connector = MockConnector::new();
		let state = SessionState::new(Network::Testnet);
		{
			let bridge = EventBridge::new();
			bridge.bind(connector.as_ref(), &state);
		}
		assert_eq!(connector.events().signed_out_handler_count(), 0);
	}
}
