use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EncodeContentHashPayload {
	/// Content URI, such as `ipfs://<cid>`, `bzz://<hash>` or `onion3://<address>`.
	pub uri: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DecodeContentHashPayload {
	/// 0x-prefixed hex string of the contenthash, as returned by a resolver.
	pub contenthash: String,
}
