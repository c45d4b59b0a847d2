//! Connector event channel.
//!
//! Connectors announce identity changes that happen outside an explicit
//! `connect`/`disconnect` call (another tab, a browser extension, a wallet
//! timing out) through [`ConnectorEvents`]. Handlers are registered with
//! `on_*` methods, which return a [`Subscription`] that unregisters the
//! handler when dropped.

use std::future::Future;

use tracing::{debug, error};

use crate::Result;
use crate::connector::WalletHandle;
use crate::handlers::{HandlerMap, Subscription, new_handler_map, register, snapshot};

/// Payload of a `wallet:signIn` notification.
#[derive(Clone)]
pub struct SignedIn {
	pub wallet: WalletHandle,
}

impl std::fmt::Debug for SignedIn {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SignedIn").field("wallet", &self.wallet.id()).finish()
	}
}

/// Payload of a `wallet:signOut` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedOut;

/// Sign-in / sign-out handler registry owned by a connector.
pub struct ConnectorEvents {
	signed_in: HandlerMap<SignedIn>,
	signed_out: HandlerMap<SignedOut>,
}

impl Default for ConnectorEvents {
	fn default() -> Self {
		Self::new()
	}
}

impl ConnectorEvents {
	pub fn new() -> Self {
		Self {
			signed_in: new_handler_map(),
			signed_out: new_handler_map(),
		}
	}

	/// Registers a handler for wallet sign-in notifications.
	pub fn on_signed_in<F, Fut>(&self, handler: F) -> Subscription
	where
		F: Fn(SignedIn) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<()>> + Send + 'static,
	{
		register(&self.signed_in, handler)
	}

	/// Registers a handler for wallet sign-out notifications.
	pub fn on_signed_out<F, Fut>(&self, handler: F) -> Subscription
	where
		F: Fn(SignedOut) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<()>> + Send + 'static,
	{
		register(&self.signed_out, handler)
	}

	/// Delivers a sign-in notification to every registered handler, in registration order.
	///
	/// Handler errors are logged and do not stop delivery to later handlers.
	pub async fn emit_signed_in(&self, wallet: WalletHandle) {
		let handlers = snapshot(&self.signed_in);
		debug!(target: "nc.events", wallet = wallet.id(), handlers = handlers.len(), "signed in");

		let event = SignedIn { wallet };
		for (id, handler) in handlers {
			if let Err(e) = handler(event.clone()).await {
				error!(target: "nc.events", error = %e, handler_id = id, "Sign-in handler error");
			}
		}
	}

	/// Delivers a sign-out notification to every registered handler.
	pub async fn emit_signed_out(&self) {
		let handlers = snapshot(&self.signed_out);
		debug!(target: "nc.events", handlers = handlers.len(), "signed out");

		for (id, handler) in handlers {
			if let Err(e) = handler(SignedOut).await {
				error!(target: "nc.events", error = %e, handler_id = id, "Sign-out handler error");
			}
		}
	}

	pub fn signed_in_handler_count(&self) -> usize {
		self.signed_in.lock().len()
	}

	pub fn signed_out_handler_count(&self) -> usize {
		self.signed_out.lock().len()
	}

	/// Drops every registered handler; outstanding [`Subscription`]s become no-ops.
	pub fn remove_all_listeners(&self) {
		self.signed_in.lock().clear();
		self.signed_out.lock().clear();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;
	use crate::Error;

	#[tokio::test]
	async fn sign_out_reaches_every_handler_until_unsubscribed() {
		let events = ConnectorEvents::new();
		let calls = Arc::new(AtomicUsize::new(0));

		let c1 = Arc::clone(&calls);
		let first = events.on_signed_out(move |_| {
			let c1 = Arc::clone(&c1);
			async move {
				c1.fetch_add(1, Ordering::SeqCst);
				Ok(())
			}
		});
		let c2 = Arc::clone(&calls);
		let _second = events.on_signed_out(move |_| {
			let c2 = Arc::clone(&c2);
			async move {
				c2.fetch_add(10, Ordering::SeqCst);
				Ok(())
			}
		});

		events.emit_signed_out().await;
		assert_eq!(calls.load(Ordering::SeqCst), 11);

		first.unsubscribe();
		assert_eq!(events.signed_out_handler_count(), 1);

		events.emit_signed_out().await;
		assert_eq!(calls.load(Ordering::SeqCst), 21);
	}

	#[tokio::test]
	async fn failing_handler_does_not_block_the_next() {
		let events = ConnectorEvents::new();
		let reached = Arc::new(AtomicUsize::new(0));

		let _failing = events.on_signed_out(|_| async { Err(Error::Protocol("boom".into())) });
		let r = Arc::clone(&reached);
		let _ok = events.on_signed_out(move |_| {
			let r = Arc::clone(&r);
			async move {
				r.fetch_add(1, Ordering::SeqCst);
				Ok(())
			}
		});

		events.emit_signed_out().await;
		assert_eq!(reached.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn remove_all_listeners_clears_both_channels() {
		let events = ConnectorEvents::new();
		let sub_in = events.on_signed_in(|_| async { Ok(()) });
		let _sub_out = events.on_signed_out(|_| async { Ok(()) });

		events.remove_all_listeners();
		assert_eq!(events.signed_in_handler_count(), 0);
		assert_eq!(events.signed_out_handler_count(), 0);

		// Dropping after removal is a no-op.
		drop(sub_in);
	}
}
