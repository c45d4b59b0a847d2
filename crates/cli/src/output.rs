//! JSON output and NEAR amount formatting.

use serde::Serialize;

use crate::error::Result;

/// yoctoNEAR per NEAR.
const YOCTO_PER_NEAR: u128 = 10u128.pow(24);

/// Prints `value` as JSON on stdout, pretty unless `compact`.
pub fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
	let text = if compact {
		serde_json::to_string(value)?
	} else {
		serde_json::to_string_pretty(value)?
	};
	println!("{text}");
	Ok(())
}

/// Formats a yoctoNEAR amount as a NEAR decimal string with trailing zeros trimmed.
pub fn format_near(yocto: u128) -> String {
	let whole = yocto / YOCTO_PER_NEAR;
	let frac = yocto % YOCTO_PER_NEAR;
	if frac == 0 {
		return whole.to_string();
	}
	let digits = format!("{frac:024}");
	format!("{whole}.{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn whole_amounts_have_no_fraction() {
		assert_eq!(format_near(0), "0");
		assert_eq!(format_near(5 * YOCTO_PER_NEAR), "5");
	}

	#[test]
	fn fractions_keep_leading_zeros() {
		assert_eq!(format_near(YOCTO_PER_NEAR / 10), "0.1");
		assert_eq!(format_near(1), "0.000000000000000000000001");
		assert_eq!(format_near(1_250_000_000_000_000_000_000_000), "1.25");
	}
}
