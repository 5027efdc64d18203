#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod config;
pub mod contenthash;
pub mod labelhash;
pub mod namehash;
pub mod resolver;
pub mod routes;
pub mod server;
pub mod types;
pub mod utils;

pub use contenthash::{
	decode_content_hash, decode_encoded, encode_content_hash, is_valid_content_hash,
	ContentHashError, ContentRecord, EncodedContentHash, Protocol,
};
pub use labelhash::{decode_labelhash, encode_labelhash, is_decrypted, is_encoded_labelhash};
pub use namehash::{labelhash, namehash, normalize_name, NameError};
pub use resolver::EnsClient;
