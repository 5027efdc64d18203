use crate::namehash::NameError;

/// Encodes `name` in DNS wire format: length-prefixed labels ending with a zero byte.
pub fn dns_encode_name(name: &str) -> Result<Vec<u8>, NameError> {
	let mut encoded = Vec::with_capacity(name.len() + 2);

	if !name.is_empty() {
		for label in name.split('.') {
			if label.is_empty() {
				return Err(NameError::EmptyLabel);
			}

			let len = u8::try_from(label.len()).map_err(|_| {
				NameError::InvalidLabel(format!("{label} is longer than 255 bytes"))
			})?;

			encoded.push(len);
			encoded.extend_from_slice(label.as_bytes());
		}
	}

	encoded.push(0);
	Ok(encoded)
}

/// Decodes a DNS wire format name back into its dotted form.
pub fn dns_decode_name(encoded: &[u8]) -> Result<String, NameError> {
	let truncated = || NameError::InvalidLabel("DNS-encoded name is truncated".to_string());

	let mut labels: Vec<String> = Vec::new();
	let mut idx = 0;
	loop {
		let len = *encoded.get(idx).ok_or_else(truncated)? as usize;
		if len == 0 {
			break;
		}

		let label = encoded.get((idx + 1)..=(idx + len)).ok_or_else(truncated)?;
		labels.push(
			String::from_utf8(label.to_vec())
				.map_err(|e| NameError::InvalidLabel(e.to_string()))?,
		);
		idx += len + 1;
	}

	Ok(labels.join("."))
}
