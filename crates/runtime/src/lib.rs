//! Session runtime - collaborator contracts, event channel, and RPC provider
//!
//! This crate provides the infrastructure the session layer sits on:
//!
//! - **Wallet contracts**: [`WalletConnector`] and [`Wallet`], the opaque
//!   services that own key custody, approval UI, and signing
//! - **Event channel**: [`ConnectorEvents`], through which a connector
//!   announces out-of-band sign-in / sign-out
//! - **Read provider**: [`ReadProvider`] and its HTTP implementation
//!   [`JsonRpcProvider`]
//! - **Configuration**: [`ConnectorConfig`] with the per-network endpoint table
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ near-connect-rs  │  SessionManager, dispatcher, gateway, signer
//! └────────┬─────────┘
//!          │ calls through traits
//! ┌────────▼─────────┐
//! │    nc-runtime    │  This crate
//! │  ┌────────────┐  │
//! │  │ Connector  │  │  Wallet selection and signing
//! │  └────────────┘  │
//! │  ┌────────────┐  │
//! │  │ Events     │  │  signIn / signOut handlers
//! │  └────────────┘  │
//! │  ┌────────────┐  │
//! │  │ JSON-RPC   │  │  `query` over HTTP
//! │  └────────────┘  │
//! └──────────────────┘
//! ```
//!
//! With the `mock` feature, [`mock`] provides in-memory doubles of every
//! collaborator.

pub mod config;
pub mod connector;
pub mod error;
pub mod events;
pub mod handlers;
pub mod json_rpc;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod provider;

// Re-export key types at crate root
pub use config::{ConnectorConfig, RpcUrls};
pub use connector::{ConnectedWallet, Wallet, WalletConnector, WalletHandle};
pub use error::{Error, Result};
pub use events::{ConnectorEvents, SignedIn, SignedOut};
pub use handlers::{HandlerId, Subscription};
pub use json_rpc::JsonRpcProvider;
pub use provider::{BlockReference, Finality, ReadProvider};
