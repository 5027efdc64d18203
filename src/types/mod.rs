pub mod ens;
mod error;
mod request;
mod response;
mod wrappers;

pub use error::ErrorResponse;
pub use request::{DecodeContentHashPayload, EncodeContentHashPayload};
pub use response::{
	ContentHashResponse, ContentValue, DecodedContentHash, DomainRecord, NameHashResponse,
	ReverseRecord,
};
pub use wrappers::{Address, Bytes32};
