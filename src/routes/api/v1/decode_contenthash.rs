use axum_jsonschema::Json;

use crate::{
	contenthash::decode_content_hash,
	types::{DecodeContentHashPayload, DecodedContentHash, ErrorResponse},
};

pub async fn decode_contenthash(
	Json(payload): Json<DecodeContentHashPayload>,
) -> Result<Json<DecodedContentHash>, ErrorResponse> {
	let record = decode_content_hash(&payload.contenthash)
		.map_err(|err| ErrorResponse::validation_error(err.to_string()))?;

	Ok(Json(record.into()))
}

pub fn docs(op: aide::transform::TransformOperation) -> aide::transform::TransformOperation {
	op.description(
		"Decode a contenthash. Unknown multicodecs are returned as-is without a protocol.",
	)
	.response::<200, Json<DecodedContentHash>>()
	.response::<422, ErrorResponse>()
}
