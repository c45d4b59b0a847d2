//! Off-chain message signing (NEP-413) request and result.

use serde::{Deserialize, Serialize};

/// Length of the replay-protection nonce in bytes.
pub const NONCE_LEN: usize = 32;

/// Message to be signed by the wallet on behalf of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignMessageParams {
	/// Human-readable challenge shown to the user.
	pub message: String,
	/// Intended recipient of the signature (usually the verifying app).
	pub recipient: String,
	/// Caller-chosen nonce, base64 on the wire.
	#[serde(with = "nonce_base64")]
	pub nonce: [u8; NONCE_LEN],
}

impl SignMessageParams {
	pub fn new(message: impl Into<String>, recipient: impl Into<String>, nonce: [u8; NONCE_LEN]) -> Self {
		Self {
			message: message.into(),
			recipient: recipient.into(),
			nonce,
		}
	}
}

/// Signature artifact returned by the wallet.
///
/// Carried through unchanged; nothing in this workspace verifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
	pub account_id: String,
	pub public_key: String,
	/// Base64 signature over the NEP-413 payload.
	pub signature: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
}

mod nonce_base64 {
	use base64::Engine;
	use base64::engine::general_purpose::STANDARD;
	use serde::{Deserialize, Deserializer, Serializer, de};

	use super::NONCE_LEN;

	pub fn serialize<S>(nonce: &[u8; NONCE_LEN], serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&STANDARD.encode(nonce))
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; NONCE_LEN], D::Error>
	where
		D: Deserializer<'de>,
	{
		let encoded = String::deserialize(deserializer)?;
		let bytes = STANDARD.decode(encoded.as_bytes()).map_err(de::Error::custom)?;
		let len = bytes.len();
		bytes
			.try_into()
			.map_err(|_| de::Error::custom(format!("nonce must be {NONCE_LEN} bytes, got {len}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nonce_travels_as_base64() {
		let params = SignMessageParams::new("login", "guestbook.app", [7u8; NONCE_LEN]);
		let wire = serde_json::to_value(&params).unwrap();
		assert_eq!(wire["nonce"], "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwc=");

		let back: SignMessageParams = serde_json::from_value(wire).unwrap();
		assert_eq!(back, params);
	}

	#[test]
	fn short_nonce_is_rejected() {
		let wire = serde_json::json!({ "message": "m", "recipient": "r", "nonce": "AAAA" });
		let err = serde_json::from_value::<SignMessageParams>(wire).unwrap_err();
		assert!(err.to_string().contains("32 bytes"), "{err}");
	}
}
