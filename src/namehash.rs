//! ENS name normalization and hashing ([EIP-137](https://eips.ethereum.org/EIPS/eip-137)).

use alloy::primitives::{keccak256, Address, B256};

use crate::labelhash::{decode_labelhash, is_encoded_labelhash};

#[derive(Debug, thiserror::Error)]
pub enum NameError {
	#[error("Domain cannot have empty labels.")]
	EmptyLabel,
	#[error("Illegal char {0}")]
	IllegalCharacter(char),
	#[error("Label \"{0}\" is not a valid ENS label.")]
	InvalidLabel(String),
	#[error("Expected label hash to be 32 bytes, got {0}.")]
	InvalidLength(usize),
	#[error("Malformed encoded labelhash: {0}.")]
	MalformedLiteral(String),
}

/// UTS-46 profile used by ENS: nontransitional processing with STD3 ASCII rules.
fn uts46() -> idna::Config {
	idna::Config::default()
		.use_std3_ascii_rules(true)
		.transitional_processing(false)
		.check_hyphens(false)
		.verify_dns_length(false)
}

fn normalize_label(label: &str) -> Result<String, NameError> {
	if label.is_empty() {
		return Err(NameError::EmptyLabel);
	}

	if is_encoded_labelhash(label) {
		return Ok(label.to_ascii_lowercase());
	}

	let (normalized, result) = uts46().to_unicode(label);
	if result.is_ok() {
		// Ideographic and fullwidth full stops map to '.', which would split the label.
		if normalized.contains('.') {
			return Err(NameError::InvalidLabel(label.to_string()));
		}

		return Ok(normalized);
	}

	// Point at the first character the profile rejects on its own, if any.
	let mut buf = [0u8; 4];
	let offending = label
		.chars()
		.find(|c| uts46().to_unicode(c.encode_utf8(&mut buf)).1.is_err());

	Err(offending.map_or_else(
		|| NameError::InvalidLabel(label.to_string()),
		NameError::IllegalCharacter,
	))
}

/// Normalizes every label of `name`, leaving encoded labelhash literals untouched.
pub fn normalize_name(name: &str) -> Result<String, NameError> {
	let labels = name
		.split('.')
		.map(normalize_label)
		.collect::<Result<Vec<_>, _>>()?;

	Ok(labels.join("."))
}

/// A single label is valid when it normalizes and does not contain a dot.
pub fn is_label_valid(label: &str) -> bool {
	!label.contains('.') && normalize_label(label).is_ok()
}

/// Hash of a single label, or the hash carried by an encoded labelhash literal.
pub fn labelhash(label: &str) -> Result<B256, NameError> {
	if is_encoded_labelhash(label) {
		return decode_labelhash(label);
	}

	Ok(keccak256(normalize_label(label)?.as_bytes()))
}

/// Node of the subname `labelhash` under `parent`.
pub fn child_node(parent: B256, labelhash: B256) -> B256 {
	keccak256([parent.0, labelhash.0].concat())
}

/// Computes the namehash of `name`. The empty name is the root node.
pub fn namehash(name: &str) -> Result<B256, NameError> {
	if name.is_empty() {
		return Ok(B256::ZERO);
	}

	// Generate the node starting from the right
	name.rsplit('.').try_fold(B256::ZERO, |node, label| -> Result<B256, NameError> {
		Ok(child_node(node, labelhash(label)?))
	})
}

/// Name under which `address` publishes its reverse record.
pub fn reverse_name(address: Address) -> String {
	format!("{}.addr.reverse", hex::encode(address))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{address, b256};

	const ETH_NODE: B256 = b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae");

	#[test]
	fn root_node_is_zero() {
		assert_eq!(namehash("").unwrap(), B256::ZERO);
	}

	#[test]
	fn known_vectors() {
		for (name, expected) in [
			(
				"eth",
				"0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae",
			),
			(
				"foo.eth",
				"0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f",
			),
			(
				"vitalik.eth",
				"0xee6c4522aab0003e8d14cd40a6af439055fd2577951148c14b6cea9a53475835",
			),
			(
				"arachnid.eth",
				"0x89e11c9f4e589de37ebe0ea626ffdcefaca07d90bac8e1e89db3661f43da0346",
			),
		] {
			assert_eq!(namehash(name).unwrap().to_string(), expected, "{name}");
		}

		assert_eq!(
			labelhash("eth").unwrap(),
			b256!("4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0")
		);
	}

	#[test]
	fn is_deterministic() {
		assert_eq!(namehash("sub.vitalik.eth").unwrap(), namehash("sub.vitalik.eth").unwrap());
	}

	#[test]
	fn is_order_dependent() {
		assert_ne!(namehash("a.b").unwrap(), namehash("b.a").unwrap());
	}

	#[test]
	fn normalizes_before_hashing() {
		assert_eq!(namehash("Vitalik.eth").unwrap(), namehash("vitalik.eth").unwrap());
		assert_eq!(labelhash("ETH").unwrap(), labelhash("eth").unwrap());
	}

	#[test]
	fn encoded_labels_bypass_hashing() {
		let arachnid = labelhash("arachnid").unwrap();
		let literal = format!("[{}].eth", hex::encode(arachnid));

		assert_eq!(namehash(&literal).unwrap(), namehash("arachnid.eth").unwrap());
		assert_eq!(namehash(&literal).unwrap(), child_node(ETH_NODE, arachnid));
		assert_eq!(labelhash(&literal[..66]).unwrap(), arachnid);
	}

	#[test]
	fn rejects_labels_that_map_to_a_dot() {
		for name in ["vitalik\u{3002}eth", "vitalik\u{ff0e}eth"] {
			assert!(matches!(namehash(name), Err(NameError::InvalidLabel(_))), "{name}");
			assert!(matches!(normalize_name(name), Err(NameError::InvalidLabel(_))), "{name}");
			assert!(matches!(labelhash(name), Err(NameError::InvalidLabel(_))), "{name}");
			assert!(!is_label_valid(name), "{name}");
		}
	}

	#[test]
	fn lowercases_encoded_labels() {
		let arachnid = labelhash("arachnid").unwrap();
		let upper = format!("[{}]", hex::encode_upper(arachnid));
		let lower = format!("[{}]", hex::encode(arachnid));

		assert_eq!(normalize_name(&format!("{upper}.eth")).unwrap(), format!("{lower}.eth"));
		assert_eq!(namehash(&format!("{upper}.eth")).unwrap(), namehash("arachnid.eth").unwrap());
	}

	#[test]
	fn rejects_empty_labels() {
		for name in ["vitalik..eth", ".eth", "eth."] {
			assert!(matches!(namehash(name), Err(NameError::EmptyLabel)), "{name}");
			assert!(matches!(normalize_name(name), Err(NameError::EmptyLabel)), "{name}");
		}
	}

	#[test]
	fn normalizes_names() {
		assert_eq!(normalize_name("vitalik").unwrap(), "vitalik");
		assert_eq!(normalize_name("Vitalik").unwrap(), "vitalik");
		assert_eq!(normalize_name("Vitalik.eth").unwrap(), "vitalik.eth");
		assert_eq!(normalize_name("sub.Vitalik.eth").unwrap(), "sub.vitalik.eth");

		let literal = format!("[{}]", "ab".repeat(32));
		assert_eq!(
			normalize_name(&format!("{literal}.eth")).unwrap(),
			format!("{literal}.eth")
		);
	}

	#[test]
	fn reports_the_illegal_character() {
		for (name, offending) in [("$vitalik", '$'), ("#vitalik", '#'), ("vitalik ", ' ')] {
			match normalize_name(name) {
				Err(NameError::IllegalCharacter(c)) => assert_eq!(c, offending),
				other => panic!("unexpected result for {name:?}: {other:?}"),
			}
		}

		assert_eq!(
			NameError::IllegalCharacter('$').to_string(),
			"Illegal char $"
		);
	}

	#[test]
	fn label_validity() {
		assert!(is_label_valid("vitalik"));
		assert!(!is_label_valid("vitalik.eth"));
		assert!(!is_label_valid("$vitalik"));
		assert!(!is_label_valid(""));
	}

	#[test]
	fn reverse_names() {
		let addr = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

		assert_eq!(
			reverse_name(addr),
			"d8da6bf26964af9d7eed9e03e53415d37aa96045.addr.reverse"
		);
	}
}
