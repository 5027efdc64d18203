use axum::{extract::Path, Extension};
use axum_jsonschema::Json;

use crate::{
	config::EnsClientExt,
	types::{DomainRecord, ErrorResponse},
};

pub async fn query_domain(
	Extension(client): EnsClientExt,
	Path(name): Path<String>,
) -> Result<Json<DomainRecord>, ErrorResponse> {
	let details = client
		.domain_details(&name)
		.await
		.map_err(ErrorResponse::lookup)?;

	Ok(Json(details.into()))
}

pub fn docs(op: aide::transform::TransformOperation) -> aide::transform::TransformOperation {
	op.description("Owner, resolver, address and content of a name.")
		.response::<200, Json<DomainRecord>>()
		.response::<422, ErrorResponse>()
}
