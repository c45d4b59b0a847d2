//! Exact integer amounts carried as decimal strings.
//!
//! RPC nodes encode yoctoNEAR balances as JSON strings because they exceed
//! the range of a double. Use with `#[serde(with = "crate::amount::dec_u128")]`.

/// Serde adapter for `u128` values encoded as decimal strings.
///
/// Numbers are accepted on input as well, since some providers emit small
/// amounts unquoted.
pub mod dec_u128 {
	use serde::{Deserialize, Deserializer, Serializer, de};

	pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Text(String),
			Number(u64),
		}

		match Raw::deserialize(deserializer)? {
			Raw::Text(text) => text
				.parse::<u128>()
				.map_err(|e| de::Error::custom(format!("invalid amount '{text}': {e}"))),
			Raw::Number(n) => Ok(u128::from(n)),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde::{Deserialize, Serialize};

	#[derive(Debug, Serialize, Deserialize, PartialEq)]
	struct Holder {
		#[serde(with = "super::dec_u128")]
		amount: u128,
	}

	#[test]
	fn keeps_full_precision() {
		let raw = r#"{"amount":"340282366920938463463374607431768211455"}"#;
		let parsed: Holder = serde_json::from_str(raw).unwrap();
		assert_eq!(parsed.amount, u128::MAX);
		assert_eq!(serde_json::to_string(&parsed).unwrap(), raw);
	}

	#[test]
	fn accepts_plain_numbers() {
		let parsed: Holder = serde_json::from_str(r#"{"amount":42}"#).unwrap();
		assert_eq!(parsed.amount, 42);
	}

	#[test]
	fn rejects_fractions() {
		assert!(serde_json::from_str::<Holder>(r#"{"amount":"1.5"}"#).is_err());
	}
}
