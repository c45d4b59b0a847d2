//! Wire types for the NEAR wallet-connector session layer.
//!
//! This crate contains the serde-serializable types exchanged with the two
//! external collaborators of the session layer: the wallet connector (which
//! signs and submits transactions) and the JSON-RPC read provider (which
//! answers chain-state queries).
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No I/O, no shared state
//! - **1:1 with the wire**: Serialized shapes match what the connector and
//!   the RPC node exchange
//! - **Immutable once built**: [`Action`] values are produced by the pure
//!   constructors on [`ActionBuilder`] and never mutated afterwards
//!
//! Higher-level session APIs are built on top of these types in `near-connect-rs`.

pub mod account;
pub mod action;
pub mod amount;
pub mod message;
pub mod network;
pub mod params;
pub mod transaction;

pub use account::{
	AccessKeyInfo, AccessKeyList, AccessKeyPermission, AccessKeyView, Account, AccountView,
};
pub use action::{Action, ActionBuilder};
pub use message::{NONCE_LEN, SignMessageParams, SignedMessage};
pub use network::{MAINNET_RPC_URL, Network, TESTNET_RPC_URL, UnknownNetwork};
pub use params::{
	AddFullAccessKeyParams, AddFunctionCallKeyParams, DEFAULT_DEPOSIT, DEFAULT_FUNCTION_CALL_GAS,
	DeleteKeyParams, FunctionCallParams, TransferParams, ViewFunctionParams,
};
pub use transaction::{FinalExecutionOutcome, Transaction};
