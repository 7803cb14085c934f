//! API key generation
//!
//! Keys are `ldp_live_` followed by the 32 lowercase hex digits of a random
//! (v4) UUID. Uniqueness rests on the UUID generator alone.

use uuid::Uuid;

pub const KEY_PREFIX: &str = "ldp_live_";

/// Sample key used by the test email, never issued to a user
pub const TEST_KEY: &str = "ldp_test_1234567890abcdef1234567890abcdef";

const KEY_HEX_LEN: usize = 32;

pub fn generate_key() -> String {
	format!("{}{}", KEY_PREFIX, Uuid::new_v4().simple())
}

/// Checks the shape of an issued key
pub fn is_valid_key(key: &str) -> bool {
	key.strip_prefix(KEY_PREFIX).is_some_and(|hex| {
		hex.len() == KEY_HEX_LEN && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
	})
}

/// Shortened form of a key for log lines
pub fn redact(key: &str) -> String {
	let visible = key.char_indices().nth(KEY_PREFIX.len() + 4).map_or(key.len(), |(i, _)| i);
	format!("{}…", &key[..visible])
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_key_format() {
		for _ in 0..100 {
			let key = generate_key();
			assert!(is_valid_key(&key), "bad key: {}", key);
			assert_eq!(key.len(), KEY_PREFIX.len() + 32);
			assert!(!key.contains('-'));
		}
	}

	#[test]
	fn test_keys_are_unique() {
		let keys: HashSet<String> = (0..10_000).map(|_| generate_key()).collect();
		assert_eq!(keys.len(), 10_000);
	}

	#[test]
	fn test_is_valid_key_rejects() {
		assert!(!is_valid_key(TEST_KEY));
		assert!(!is_valid_key("ldp_live_"));
		assert!(!is_valid_key("ldp_live_1234567890ABCDEF1234567890abcdef"));
		assert!(!is_valid_key("ldp_live_12345678-90ab-cdef-1234-567890abcdef"));
		assert!(!is_valid_key("ldp_live_1234567890abcdef1234567890abcdef0"));
	}

	#[test]
	fn test_redact() {
		assert_eq!(redact("ldp_live_0123456789abcdef0123456789abcdef"), "ldp_live_0123…");
		assert_eq!(redact("short"), "short…");
	}
}

// vim: ts=4
