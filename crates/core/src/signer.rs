//! Off-chain message signing.

use nc_protocol::{SignMessageParams, SignedMessage};
use nc_runtime::{Error, Result};
use tracing::debug;

use crate::session::SessionState;

/// Signs NEP-413 messages with the session's wallet.
#[derive(Debug, Clone)]
pub struct MessageSigner {
	state: SessionState,
}

impl MessageSigner {
	pub fn new(state: SessionState) -> Self {
		Self { state }
	}

	/// Returns the wallet's signature artifact unchanged.
	pub async fn sign_message(&self, params: SignMessageParams) -> Result<SignedMessage> {
		let wallet = self.state.wallet().ok_or(Error::NotConnected)?;
		debug!(target: "nc.dispatch", wallet = wallet.id(), recipient = %params.recipient, "sign message");
		wallet.sign_message(params).await
	}
}

#[cfg(test)]
mod tests {
	use nc_protocol::{Account, Network};
	use nc_runtime::mock::MockWallet;

	use super::*;

	#[tokio::test]
	async fn requires_a_wallet() {
		let signer = MessageSigner::new(SessionState::new(Network::Testnet));
		let err = signer
			.sign_message(SignMessageParams::new("hello", "app.testnet", [0; 32]))
			.await
			.unwrap_err();
		assert!(err.is_not_connected());
	}

	#[tokio::test]
	async fn delegates_to_the_session_wallet() {
		let state = SessionState::new(Network::Testnet);
		let wallet = MockWallet::with_account("alice.testnet");
		state.adopt(wallet.handle(), &[Account::new("alice.testnet")]);

		let signed = MessageSigner::new(state)
			.sign_message(SignMessageParams::new("hello", "app.testnet", [7; 32]))
			.await
			.unwrap();
		assert_eq!(signed.account_id, "alice.testnet");
		assert_eq!(wallet.signed_messages()[0].nonce, [7; 32]);
	}
}
