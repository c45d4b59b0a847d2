use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("invalid arguments: {0}")]
	InvalidArgs(String),

	#[error("account {0} does not exist")]
	UnknownAccount(String),

	#[error(transparent)]
	Session(#[from] near_connect::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl CliError {
	/// Maps an account-scoped read failure, naming the account when the node does not know it.
	pub fn for_account(account_id: &str, err: near_connect::Error) -> Self {
		if err.is_unknown_account() {
			CliError::UnknownAccount(account_id.to_string())
		} else {
			CliError::Session(err)
		}
	}

	/// Process exit code: 2 for usage errors, 1 otherwise.
	pub fn exit_code(&self) -> i32 {
		match self {
			CliError::InvalidArgs(_) => 2,
			_ => 1,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_account_is_named() {
		let err = near_connect::Error::Rpc {
			name: "HANDLER_ERROR".into(),
			cause: Some("UNKNOWN_ACCOUNT".into()),
			message: "Server error".into(),
		};
		let cli = CliError::for_account("nobody.testnet", err);
		assert_eq!(cli.to_string(), "account nobody.testnet does not exist");
		assert_eq!(cli.exit_code(), 1);
	}

	#[test]
	fn other_errors_pass_through() {
		let cli = CliError::for_account("alice.testnet", near_connect::Error::Network("timed out".into()));
		assert!(matches!(cli, CliError::Session(_)));
		assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), 2);
	}
}
