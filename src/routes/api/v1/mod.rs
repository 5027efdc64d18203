use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};

mod decode_contenthash;
mod encode_contenthash;
mod hash_name;
mod query_domain;
mod reverse_lookup;

use decode_contenthash::{decode_contenthash, docs as decode_contenthash_docs};
use encode_contenthash::{docs as encode_contenthash_docs, encode_contenthash};
use hash_name::{docs as hash_name_docs, hash_name};
use query_domain::{docs as query_domain_docs, query_domain};
use reverse_lookup::{docs as reverse_lookup_docs, reverse_lookup};

pub fn handler() -> ApiRouter {
	ApiRouter::new()
		.api_route("/namehash/:name", get_with(hash_name, hash_name_docs))
		.api_route(
			"/contenthash/encode",
			post_with(encode_contenthash, encode_contenthash_docs),
		)
		.api_route(
			"/contenthash/decode",
			post_with(decode_contenthash, decode_contenthash_docs),
		)
		.api_route(
			"/reverse/:address",
			get_with(reverse_lookup, reverse_lookup_docs),
		)
		.api_route("/:name", get_with(query_domain, query_domain_docs))
}
