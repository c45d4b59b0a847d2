use near_connect::{RpcGateway, ViewFunctionParams};
use serde_json::Value;

use crate::cli::ViewArgs;
use crate::error::{CliError, Result};

pub async fn run(gateway: &RpcGateway, args: ViewArgs) -> Result<Value> {
	let mut params = ViewFunctionParams::new(args.contract, args.method);
	if let Some(raw) = args.args {
		params = params.args(parse_args(&raw)?);
	}
	Ok(gateway.view_function(params).await?)
}

/// View args must be a JSON object.
fn parse_args(raw: &str) -> Result<Value> {
	let value: Value =
		serde_json::from_str(raw).map_err(|e| CliError::InvalidArgs(format!("--args is not valid JSON: {e}")))?;
	if !value.is_object() {
		return Err(CliError::InvalidArgs("--args must be a JSON object".into()));
	}
	Ok(value)
}

#[cfg(test)]
mod tests {
	use nc_runtime::mock::MockProvider;
	use serde_json::json;

	use super::*;

	#[test]
	fn args_must_be_an_object() {
		assert!(parse_args(r#"{"limit":"10"}"#).is_ok());
		assert!(matches!(parse_args("[1,2]"), Err(CliError::InvalidArgs(_))));
		assert!(matches!(parse_args("{oops"), Err(CliError::InvalidArgs(_))));
	}

	#[tokio::test]
	async fn forwards_parsed_args() {
		let provider = MockProvider::new();
		provider.on_view("counter.testnet", "get", |args| Ok(args["key"].clone()));
		let gateway = RpcGateway::new(provider);

		let result = run(
			&gateway,
			ViewArgs {
				contract: "counter.testnet".into(),
				method: "get".into(),
				args: Some(r#"{"key":"n"}"#.into()),
			},
		)
		.await
		.unwrap();
		assert_eq!(result, json!("n"));
	}
}
