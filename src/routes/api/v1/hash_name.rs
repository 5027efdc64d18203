use axum::extract::Path;
use axum_jsonschema::Json;

use crate::{
	labelhash::is_decrypted,
	namehash::{labelhash, namehash, normalize_name, NameError},
	types::{Bytes32, ErrorResponse, NameHashResponse},
};

pub async fn hash_name(Path(name): Path<String>) -> Result<Json<NameHashResponse>, ErrorResponse> {
	let invalid = |err: NameError| ErrorResponse::validation_error(err.to_string());

	let name = normalize_name(&name).map_err(invalid)?;
	let node = namehash(&name).map_err(invalid)?;
	let label = labelhash(name.split('.').next().unwrap_or_default()).map_err(invalid)?;

	Ok(Json(NameHashResponse {
		decrypted: is_decrypted(&name),
		node: Bytes32(node),
		labelhash: Bytes32(label),
		name,
	}))
}

pub fn docs(op: aide::transform::TransformOperation) -> aide::transform::TransformOperation {
	op.description("Normalize a name and compute its namehash.")
		.response::<200, Json<NameHashResponse>>()
		.response::<422, ErrorResponse>()
}
