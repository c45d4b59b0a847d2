//! Error types for the session runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the session layer and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
	/// A signing or mutating operation was attempted with no active wallet.
	#[error("Wallet is not connected")]
	NotConnected,

	/// The connector could not restore a previously connected wallet.
	///
	/// The session manager absorbs this during initialization.
	#[error("Failed to recover connected wallet: {0}")]
	RecoveryFailed(String),

	/// The wallet declined the request (user rejection or connector-side validation).
	#[error("Wallet rejected the request: {message}")]
	WalletRejected { message: String },

	/// Transport-level failure talking to the RPC node or the wallet.
	#[error("Network error: {0}")]
	Network(String),

	/// Structured error returned by the RPC node.
	#[error("{name}: {message}")]
	Rpc {
		/// Error class (e.g., "HANDLER_ERROR", "REQUEST_VALIDATION_ERROR")
		name: String,
		/// Specific cause (e.g., "UNKNOWN_ACCOUNT"), when the node reports one
		cause: Option<String>,
		/// Human-readable error message
		message: String,
	},

	/// Malformed response from a collaborator.
	#[error("Protocol error: {0}")]
	Protocol(String),

	/// The wallet returned a different number of outcomes than transactions submitted.
	#[error("Wallet returned {actual} outcomes for {expected} transactions")]
	OutcomeMismatch { expected: usize, actual: usize },

	/// Invalid argument provided to an operation.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Shorthand for [`Error::WalletRejected`].
	pub fn rejected(message: impl Into<String>) -> Self {
		Error::WalletRejected {
			message: message.into(),
		}
	}

	/// Returns the RPC cause name if this is a structured RPC error.
	pub fn rpc_cause(&self) -> Option<&str> {
		match self {
			Error::Rpc { cause, .. } => cause.as_deref(),
			_ => None,
		}
	}

	pub fn is_not_connected(&self) -> bool {
		matches!(self, Error::NotConnected)
	}

	pub fn is_rejected(&self) -> bool {
		matches!(self, Error::WalletRejected { .. })
	}

	/// Returns true if the RPC node reported that the account does not exist.
	pub fn is_unknown_account(&self) -> bool {
		self.rpc_cause() == Some("UNKNOWN_ACCOUNT")
	}
}

impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		Error::Network(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_account_is_detected_from_cause() {
		let err = Error::Rpc {
			name: "HANDLER_ERROR".into(),
			cause: Some("UNKNOWN_ACCOUNT".into()),
			message: "account nobody.testnet does not exist".into(),
		};
		assert!(err.is_unknown_account());
		assert_eq!(err.to_string(), "HANDLER_ERROR: account nobody.testnet does not exist");
		assert!(!Error::Network("reset".into()).is_unknown_account());
	}

	#[test]
	fn rejection_helpers() {
		let err = Error::rejected("User closed the window");
		assert!(err.is_rejected());
		assert!(!err.is_not_connected());
		assert_eq!(err.to_string(), "Wallet rejected the request: User closed the window");
	}
}
