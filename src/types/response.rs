#![allow(clippy::module_name_repetitions)]

use aide::OperationIo;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Address, Bytes32};
use crate::{
	contenthash::{ContentRecord, Protocol},
	resolver::{Content, DomainDetails},
};

#[derive(Debug, Serialize, Deserialize, JsonSchema, OperationIo)]
pub struct NameHashResponse {
	/// The normalized name.
	pub name: String,
	/// Namehash of the name.
	pub node: Bytes32,
	/// Labelhash of the first (most specific) label.
	pub labelhash: Bytes32,
	/// False if any label is an encoded labelhash whose plaintext is unknown.
	pub decrypted: bool,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, OperationIo)]
pub struct ContentHashResponse {
	/// 0x-prefixed hex string of the encoded contenthash.
	pub contenthash: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, OperationIo)]
pub struct DecodedContentHash {
	/// Protocol of the content, absent when the multicodec is not recognized.
	pub protocol: Option<Protocol>,
	/// Decoded value, or the original contenthash for unrecognized multicodecs.
	pub payload: String,
	/// `<protocol>://<payload>`, when the protocol is known.
	pub uri: Option<String>,
}

impl From<ContentRecord> for DecodedContentHash {
	fn from(record: ContentRecord) -> Self {
		Self {
			uri: record.uri(),
			protocol: record.protocol,
			payload: record.payload,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, OperationIo)]
pub struct ReverseRecord {
	/// Primary ENS name of the address.
	pub name: String,
}

/// Content record of a name, tagged by where it came from.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "content_type", content = "value", rename_all = "snake_case")]
pub enum ContentValue {
	/// A decoded contenthash URI, or the raw contenthash for unknown multicodecs.
	Contenthash(String),
	/// 0x-prefixed hex of a legacy `content` record.
	Legacy(String),
	/// The resolver returned a contenthash that could not be decoded.
	Error(String),
}

impl From<Content> for ContentValue {
	fn from(content: Content) -> Self {
		match content {
			// Unknown multicodecs have no URI form, so the raw contenthash is reported.
			Content::Contenthash(record) => Self::Contenthash(record.uri().unwrap_or(record.payload)),
			Content::Legacy(hash) => Self::Legacy(hash.to_string()),
			Content::Invalid(err) => Self::Error(err.to_string()),
		}
	}
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, OperationIo)]
pub struct DomainRecord {
	/// The normalized name.
	pub name: String,
	/// The first (most specific) label of the name.
	pub label: String,
	/// Labelhash of `label`.
	pub labelhash: Bytes32,
	/// Namehash of the name.
	pub node: Bytes32,
	/// Registry owner of the name.
	pub owner: Address,
	/// Resolver set in the registry, if any.
	pub resolver: Option<Address>,
	/// ETH address the name resolves to.
	pub address: Option<Address>,
	/// Content record of the name.
	pub content: Option<ContentValue>,
}

impl From<DomainDetails> for DomainRecord {
	fn from(details: DomainDetails) -> Self {
		Self {
			name: details.name,
			label: details.label,
			labelhash: Bytes32(details.labelhash),
			node: Bytes32(details.node),
			owner: Address(details.owner),
			resolver: details.resolver.map(Address),
			address: details.address.map(Address),
			content: details.content.map(ContentValue::from),
		}
	}
}
