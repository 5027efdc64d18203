//! Contenthash codec ([ENSIP-7](https://docs.ens.domains/ensip/7)).
//!
//! A contenthash is `<varint multicodec><value>`, where the value layout depends on
//! the protocol:
//! - `ipfs`: CIDv1 bytes (CIDv0 inputs are upgraded, keeping the multihash)
//! - `ipns`: CIDv1 bytes with the `libp2p-key` codec wrapping the peer id
//! - `bzz`: CIDv1 bytes, `swarm-manifest` codec, `keccak-256` multihash
//! - `onion` / `onion3`: the address text
//!
//! Unknown multicodecs decode to the input itself with no protocol attached.

use cid::Cid;
use multibase::Base;
use multihash::Multihash;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const DAG_PB: u64 = 0x70;
const LIBP2P_KEY: u64 = 0x72;
const SHA2_256: u64 = 0x12;
const KECCAK_256: u64 = 0x1b;
const SWARM_MANIFEST: u64 = 0xfa;

const ONION_LEN: usize = 16;
const ONION3_LEN: usize = 56;
const MIN_PAYLOAD_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentHashError {
	#[error("Expected a URI of the form <protocol>://<value>.")]
	MalformedUri,
	#[error("Unsupported protocol \"{0}\".")]
	UnrecognizedProtocol(String),
	#[error("Content value is too short.")]
	PayloadTooShort,
	#[error("Invalid content identifier: {0}")]
	InvalidCid(String),
	#[error("For IPNS only CID with libp2p-key codec are allowed.")]
	UnsupportedIpnsCodec,
	#[error("Expected a 32-byte hex Swarm reference.")]
	InvalidSwarmReference,
	#[error("Expected an onion address of {expected} characters, got {actual}.")]
	InvalidOnionAddress { expected: usize, actual: usize },
	#[error("Onion addresses are base32, found {0:?}.")]
	InvalidOnionCharacter(char),
	#[error("Contenthash is not a valid hex string.")]
	InvalidHex,
	#[error("Error decoding contenthash: {0}")]
	Decode(String),
}

/// Protocols a contenthash can point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
	Ipfs,
	Ipns,
	Bzz,
	Onion,
	Onion3,
}

impl Protocol {
	/// Multicodec the protocol is tagged with on-chain.
	pub const fn codec(self) -> u64 {
		match self {
			Self::Ipfs => 0xe3,
			Self::Ipns => 0xe5,
			Self::Bzz => 0xe4,
			Self::Onion => 0x01bc,
			Self::Onion3 => 0x01bd,
		}
	}

	pub const fn from_codec(codec: u64) -> Option<Self> {
		match codec {
			0xe3 => Some(Self::Ipfs),
			0xe5 => Some(Self::Ipns),
			0xe4 => Some(Self::Bzz),
			0x01bc => Some(Self::Onion),
			0x01bd => Some(Self::Onion3),
			_ => None,
		}
	}

	pub const fn scheme(self) -> &'static str {
		match self {
			Self::Ipfs => "ipfs",
			Self::Ipns => "ipns",
			Self::Bzz => "bzz",
			Self::Onion => "onion",
			Self::Onion3 => "onion3",
		}
	}
}

impl fmt::Display for Protocol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.scheme())
	}
}

impl FromStr for Protocol {
	type Err = ContentHashError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"ipfs" => Ok(Self::Ipfs),
			"ipns" => Ok(Self::Ipns),
			"bzz" => Ok(Self::Bzz),
			"onion" => Ok(Self::Onion),
			"onion3" => Ok(Self::Onion3),
			_ => Err(ContentHashError::UnrecognizedProtocol(s.to_string())),
		}
	}
}

/// A decoded contenthash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentRecord {
	/// The protocol, or `None` when the multicodec is not one we know.
	pub protocol: Option<Protocol>,
	/// Protocol-specific value, or the raw contenthash when `protocol` is `None`.
	pub payload: String,
}

impl ContentRecord {
	/// `<protocol>://<payload>`, when the protocol is known.
	pub fn uri(&self) -> Option<String> {
		self.protocol
			.map(|protocol| format!("{protocol}://{}", self.payload))
	}
}

/// Binary contenthash as stored by resolvers. Displays as `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedContentHash(Vec<u8>);

impl EncodedContentHash {
	fn new(protocol: Protocol, value: &[u8]) -> Self {
		let mut buf = unsigned_varint::encode::u64_buffer();
		let mut bytes = unsigned_varint::encode::u64(protocol.codec(), &mut buf).to_vec();
		bytes.extend_from_slice(value);

		Self(bytes)
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.0
	}

	pub fn decode(&self) -> Result<ContentRecord, ContentHashError> {
		decode_bytes(&self.0, || self.to_string())
	}
}

impl fmt::Display for EncodedContentHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

impl From<Vec<u8>> for EncodedContentHash {
	fn from(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}
}

impl FromStr for EncodedContentHash {
	type Err = ContentHashError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		decode_hex(s).map(Self)
	}
}

fn decode_hex(s: &str) -> Result<Vec<u8>, ContentHashError> {
	hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|_| ContentHashError::InvalidHex)
}

/// Splits `ipfs://…`-style URIs, also accepting `/ipfs/…` and `/ipns/…` paths.
fn parse_uri(uri: &str) -> Result<(Protocol, &str), ContentHashError> {
	let scheme = uri.split_once("://");

	if let Some((protocol, payload)) = scheme {
		if let Ok(protocol) = protocol.parse() {
			return Ok((protocol, payload));
		}
	}

	for protocol in [Protocol::Ipfs, Protocol::Ipns] {
		let marker = format!("/{protocol}/");
		if let Some((_, payload)) = uri.split_once(marker.as_str()) {
			return Ok((protocol, payload));
		}
	}

	Err(scheme.map_or(ContentHashError::MalformedUri, |(protocol, _)| {
		ContentHashError::UnrecognizedProtocol(protocol.to_string())
	}))
}

fn ensure_min_len(payload: &str) -> Result<(), ContentHashError> {
	if payload.len() < MIN_PAYLOAD_LEN {
		return Err(ContentHashError::PayloadTooShort);
	}

	Ok(())
}

fn parse_cid(value: impl TryInto<Cid, Error = cid::Error>) -> Result<Cid, ContentHashError> {
	value
		.try_into()
		.map_err(|e| ContentHashError::InvalidCid(e.to_string()))
}

/// Parses a binary CID that must make up the whole value.
fn parse_cid_bytes(value: &[u8]) -> Result<Cid, ContentHashError> {
	let cid = parse_cid(value)?;
	let len = cid.encoded_len();
	if len != value.len() {
		return Err(ContentHashError::Decode(format!(
			"{} trailing bytes after CID",
			value.len().saturating_sub(len)
		)));
	}

	Ok(cid)
}

fn encode_ipfs(payload: &str) -> Result<Vec<u8>, ContentHashError> {
	ensure_min_len(payload)?;
	let cid = parse_cid(payload)?;

	Ok(Cid::new_v1(cid.codec(), *cid.hash()).to_bytes())
}

/// Peer ids are either a bare base58btc multihash or a `libp2p-key` CID.
fn parse_peer_id(payload: &str) -> Result<Multihash<64>, ContentHashError> {
	if let Some(multihash) = Base::Base58Btc
		.decode(payload)
		.ok()
		.and_then(|bytes| Multihash::from_bytes(&bytes).ok())
	{
		return Ok(multihash);
	}

	let cid = parse_cid(payload)?;
	if cid.codec() != LIBP2P_KEY {
		return Err(ContentHashError::UnsupportedIpnsCodec);
	}

	Ok(*cid.hash())
}

fn encode_ipns(payload: &str) -> Result<Vec<u8>, ContentHashError> {
	let peer_id = parse_peer_id(payload)?;

	Ok(Cid::new_v1(LIBP2P_KEY, peer_id).to_bytes())
}

fn encode_swarm(payload: &str) -> Result<Vec<u8>, ContentHashError> {
	ensure_min_len(payload)?;

	let digest = hex::decode(payload).map_err(|_| ContentHashError::InvalidSwarmReference)?;
	if digest.len() != 32 {
		return Err(ContentHashError::InvalidSwarmReference);
	}

	let multihash = Multihash::<64>::wrap(KECCAK_256, &digest)
		.map_err(|_| ContentHashError::InvalidSwarmReference)?;

	Ok(Cid::new_v1(SWARM_MANIFEST, multihash).to_bytes())
}

fn encode_onion(payload: &str, expected: usize) -> Result<Vec<u8>, ContentHashError> {
	let actual = payload.chars().count();
	if actual != expected {
		return Err(ContentHashError::InvalidOnionAddress { expected, actual });
	}

	// RFC 4648 base32, lowercase
	if let Some(c) = payload.chars().find(|c| !matches!(c, 'a'..='z' | '2'..='7')) {
		return Err(ContentHashError::InvalidOnionCharacter(c));
	}

	Ok(payload.as_bytes().to_vec())
}

/// Encodes a `<protocol>://<value>` URI into its binary contenthash.
pub fn encode_content_hash(uri: &str) -> Result<EncodedContentHash, ContentHashError> {
	let encoded = parse_uri(uri).and_then(|(protocol, payload)| {
		let value = match protocol {
			Protocol::Ipfs => encode_ipfs(payload)?,
			Protocol::Ipns => encode_ipns(payload)?,
			Protocol::Bzz => encode_swarm(payload)?,
			Protocol::Onion => encode_onion(payload, ONION_LEN)?,
			Protocol::Onion3 => encode_onion(payload, ONION3_LEN)?,
		};

		Ok(EncodedContentHash::new(protocol, &value))
	});

	if let Err(err) = &encoded {
		tracing::debug!(uri, "Error encoding content hash: {err}");
	}

	encoded
}

fn render_ipfs(cid: &Cid) -> String {
	let multihash = cid.hash();

	if cid.codec() == DAG_PB && multihash.code() == SHA2_256 && multihash.size() == 32 {
		if let Ok(v0) = Cid::new_v0(*multihash) {
			return v0.to_string();
		}
	}

	Cid::new_v1(cid.codec(), *multihash).to_string()
}

fn decode_value(protocol: Protocol, value: &[u8]) -> Result<String, ContentHashError> {
	match protocol {
		Protocol::Ipfs => Ok(render_ipfs(&parse_cid_bytes(value)?)),
		Protocol::Ipns => {
			let cid = parse_cid_bytes(value)?;
			let peer_id = Base::Base58Btc.encode(cid.hash().to_bytes());

			// Anything but a libp2p-key CID re-encodes to different bytes.
			if encode_ipns(&peer_id)? != value {
				return Err(ContentHashError::UnsupportedIpnsCodec);
			}

			Ok(peer_id)
		},
		Protocol::Bzz => Ok(hex::encode(parse_cid_bytes(value)?.hash().digest())),
		Protocol::Onion | Protocol::Onion3 => String::from_utf8(value.to_vec())
			.map_err(|e| ContentHashError::Decode(e.to_string())),
	}
}

fn decode_bytes(
	bytes: &[u8],
	original: impl FnOnce() -> String,
) -> Result<ContentRecord, ContentHashError> {
	let (codec, value) = unsigned_varint::decode::u64(bytes)
		.map_err(|e| ContentHashError::Decode(e.to_string()))?;

	let Some(protocol) = Protocol::from_codec(codec) else {
		return Ok(ContentRecord {
			protocol: None,
			payload: original(),
		});
	};

	Ok(ContentRecord {
		protocol: Some(protocol),
		payload: decode_value(protocol, value)?,
	})
}

/// Decodes a hex contenthash. Unknown multicodecs are passed through untouched.
pub fn decode_content_hash(encoded: &str) -> Result<ContentRecord, ContentHashError> {
	decode_bytes(&decode_hex(encoded)?, || encoded.to_string())
}

/// Decodes the result of [`encode_content_hash`], passing an existing error through.
pub fn decode_encoded(
	encoded: Result<EncodedContentHash, ContentHashError>,
) -> Result<ContentRecord, ContentHashError> {
	encoded.and_then(|encoded| encoded.decode())
}

/// Returns true if `encoded` is `0x`-prefixed hex carrying one of the supported multicodecs.
pub fn is_valid_content_hash(encoded: &str) -> bool {
	encoded
		.strip_prefix("0x")
		.and_then(|hex| hex::decode(hex).ok())
		.and_then(|bytes| unsigned_varint::decode::u64(&bytes).ok().map(|(codec, _)| codec))
		.and_then(Protocol::from_codec)
		.is_some()
}
