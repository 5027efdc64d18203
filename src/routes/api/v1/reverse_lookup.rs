use axum::{extract::Path, Extension};
use axum_jsonschema::Json;

use crate::{
	config::EnsClientExt,
	types::{Address, ErrorResponse, ReverseRecord},
};

pub async fn reverse_lookup(
	Extension(client): EnsClientExt,
	Path(address): Path<Address>,
) -> Result<Json<ReverseRecord>, ErrorResponse> {
	let name = client
		.name_of(*address)
		.await
		.map_err(ErrorResponse::lookup)?
		.ok_or_else(|| ErrorResponse::not_found("Record not found.".to_string()))?;

	Ok(Json(ReverseRecord { name }))
}

pub fn docs(op: aide::transform::TransformOperation) -> aide::transform::TransformOperation {
	op.description("Resolve the primary ENS name of an address.")
		.response::<200, Json<ReverseRecord>>()
		.response::<404, ErrorResponse>()
}
