use axum_jsonschema::Json;

use crate::{
	contenthash::encode_content_hash,
	types::{ContentHashResponse, EncodeContentHashPayload, ErrorResponse},
};

pub async fn encode_contenthash(
	Json(payload): Json<EncodeContentHashPayload>,
) -> Result<Json<ContentHashResponse>, ErrorResponse> {
	let encoded = encode_content_hash(&payload.uri)
		.map_err(|err| ErrorResponse::validation_error(err.to_string()))?;

	Ok(Json(ContentHashResponse {
		contenthash: encoded.to_string(),
	}))
}

pub fn docs(op: aide::transform::TransformOperation) -> aide::transform::TransformOperation {
	op.description("Encode an ipfs, ipns, bzz, onion or onion3 URI into a contenthash.")
		.response::<200, Json<ContentHashResponse>>()
		.response::<422, ErrorResponse>()
}
