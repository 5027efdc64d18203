//! Encoded labelhash literals: `[<64 hex chars>]` stands in for a label whose
//! hash is known but whose plaintext is not.
//!
//! [`is_encoded_labelhash`] is only a shape check (brackets and length). It does
//! not look at the payload, so `[` + 64 non-hex chars + `]` passes it and is then
//! rejected by [`decode_labelhash`]. Callers dispatching on the predicate must
//! still handle the decode error.
//!
//! Literals are written in lowercase hex. Decoding also accepts uppercase, and
//! name normalization lowercases any literal it passes through.

use alloy::primitives::B256;

use crate::namehash::NameError;

const HASH_LEN: usize = 32;
const ENCODED_LEN: usize = HASH_LEN * 2 + 2;

/// Returns true if `label` has the shape of an encoded labelhash literal.
pub fn is_encoded_labelhash(label: &str) -> bool {
	label.starts_with('[') && label.ends_with(']') && label.len() == ENCODED_LEN
}

/// Renders a raw 32-byte hash as an encoded labelhash literal.
pub fn encode_labelhash(hash: &[u8]) -> Result<String, NameError> {
	if hash.len() != HASH_LEN {
		return Err(NameError::InvalidLength(hash.len()));
	}

	Ok(format!("[{}]", hex::encode(hash)))
}

/// Decodes an encoded labelhash literal back into the hash it carries.
pub fn decode_labelhash(literal: &str) -> Result<B256, NameError> {
	let payload = literal
		.strip_prefix('[')
		.and_then(|rest| rest.strip_suffix(']'))
		.ok_or_else(|| {
			NameError::MalformedLiteral(
				"expected encoded labelhash to start and end with square brackets".to_string(),
			)
		})?;

	if payload.len() != HASH_LEN * 2 {
		return Err(NameError::MalformedLiteral(format!(
			"expected encoded labelhash to have a length of {ENCODED_LEN}, got {}",
			literal.len()
		)));
	}

	let mut bytes = [0u8; HASH_LEN];
	hex::decode_to_slice(payload, &mut bytes).map_err(|e| {
		NameError::MalformedLiteral(format!("encoded labelhash is not valid hex: {e}"))
	})?;

	Ok(B256::from(bytes))
}

/// Returns true if every label of `name` is known in plaintext.
pub fn is_decrypted(name: &str) -> bool {
	!name.split('.').any(is_encoded_labelhash)
}

#[cfg(test)]
mod tests {
	use super::*;

	const HASH: &str = "a5ae37e4e1678eb9b22dd4be5ae84226b09a448a4790c7fec33ba86b6d9b3e65";

	#[test]
	fn encodes_a_hash() {
		let hash = hex::decode(HASH).unwrap();
		assert_eq!(encode_labelhash(&hash).unwrap(), format!("[{HASH}]"));
	}

	#[test]
	fn rejects_hashes_of_the_wrong_length() {
		let short = hex::decode(&HASH[..62]).unwrap();
		assert!(matches!(
			encode_labelhash(&short),
			Err(NameError::InvalidLength(31))
		));

		let long = [0u8; 33];
		assert!(matches!(
			encode_labelhash(&long),
			Err(NameError::InvalidLength(33))
		));
	}

	#[test]
	fn decodes_a_literal() {
		let decoded = decode_labelhash(&format!("[{HASH}]")).unwrap();
		assert_eq!(hex::encode(decoded), HASH);
	}

	#[test]
	fn decode_inverts_encode() {
		for seed in [0u8, 1, 0x7f, 0xff] {
			let hash = B256::repeat_byte(seed);
			let literal = encode_labelhash(hash.as_slice()).unwrap();
			assert_eq!(decode_labelhash(&literal).unwrap(), hash);
		}
	}

	#[test]
	fn rejects_malformed_literals() {
		assert!(matches!(
			decode_labelhash(&format!("[{}]", &HASH[..63])),
			Err(NameError::MalformedLiteral(_))
		));
		assert!(matches!(
			decode_labelhash(&format!("({})", &HASH[..63])),
			Err(NameError::MalformedLiteral(_))
		));
		assert!(matches!(
			decode_labelhash(HASH),
			Err(NameError::MalformedLiteral(_))
		));
	}

	#[test]
	fn shape_check_does_not_validate_hex() {
		let literal = format!("[{}]", "z".repeat(64));

		assert!(is_encoded_labelhash(&literal));
		assert!(matches!(
			decode_labelhash(&literal),
			Err(NameError::MalformedLiteral(_))
		));
	}

	#[test]
	fn decodes_uppercase_literals() {
		let upper = format!("[{}]", HASH.to_uppercase());

		assert_eq!(hex::encode(decode_labelhash(&upper).unwrap()), HASH);
		assert_eq!(
			encode_labelhash(decode_labelhash(&upper).unwrap().as_slice()).unwrap(),
			format!("[{HASH}]")
		);
	}

	#[test]
	fn recognizes_literals() {
		assert!(is_encoded_labelhash(&format!("[{HASH}]")));
		assert!(!is_encoded_labelhash(&format!("0x{HASH}")));
		assert!(!is_encoded_labelhash("123"));
		assert!(!is_encoded_labelhash("[123]"));
	}

	#[test]
	fn decrypted_names() {
		assert!(is_decrypted(""));
		assert!(is_decrypted("vitalik.eth"));
		assert!(!is_decrypted(&format!("[{HASH}].eth")));
		assert!(!is_decrypted(&format!("sub.[{HASH}].eth")));
	}
}
