//! near-connect: session and transaction layer for NEAR wallet connectors
//!
//! This crate sits between application code and two external services: a
//! wallet connector (key custody, approval UI, signing) and an RPC read
//! provider. It presents one session object that knows who is signed in and
//! exposes reads and signed transactions.
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use near_connect::{ConnectorConfig, FunctionCallParams, SessionManager, ViewFunctionParams};
//! use serde_json::json;
//!
//! async fn post(connector: Arc<dyn near_connect::WalletConnector>) -> near_connect::Result<()> {
//!     let session = SessionManager::new(ConnectorConfig::default(), connector)?;
//!     session.initialize().await;
//!
//!     if !session.is_signed_in() {
//!         session.sign_in().await?;
//!     }
//!
//!     let total: u64 = session
//!         .view_function_as(ViewFunctionParams::new("guestbook.testnet", "total_messages"))
//!         .await?;
//!
//!     session
//!         .call_function(
//!             FunctionCallParams::new("guestbook.testnet", "add_message")
//!                 .args(json!({ "text": format!("message #{}", total + 1) })),
//!         )
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Components
//!
//! - [`SessionManager`]: lifecycle (recovery, sign-in, sign-out, connector events)
//! - [`TransactionDispatcher`]: single and batched transaction submission
//! - [`RpcGateway`]: read-only queries at the latest final block
//! - [`MessageSigner`]: NEP-413 message signing
//! - [`ActionBuilder`]: pure constructors for [`Action`] values

pub mod bridge;
pub mod dispatcher;
pub mod gateway;
pub mod manager;
pub mod session;
pub mod signer;

pub use bridge::EventBridge;
pub use dispatcher::TransactionDispatcher;
pub use gateway::RpcGateway;
pub use manager::SessionManager;
pub use nc_protocol::{
	AccessKeyInfo, AccessKeyList, AccessKeyPermission, Account, AccountView, Action, ActionBuilder,
	AddFullAccessKeyParams, AddFunctionCallKeyParams, DEFAULT_DEPOSIT, DEFAULT_FUNCTION_CALL_GAS,
	DeleteKeyParams, FinalExecutionOutcome, FunctionCallParams, Network, SignMessageParams, SignedMessage,
	Transaction, TransferParams, ViewFunctionParams,
};
pub use nc_runtime::{
	BlockReference, ConnectedWallet, ConnectorConfig, ConnectorEvents, Error, Finality, JsonRpcProvider,
	ReadProvider, Result, RpcUrls, Subscription, Wallet, WalletConnector, WalletHandle,
};
pub use session::{Session, SessionState};
pub use signer::MessageSigner;
