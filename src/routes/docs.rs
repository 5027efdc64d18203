use aide::{
	axum::{routing::get, ApiRouter, IntoApiResponse},
	openapi::OpenApi,
	scalar::Scalar,
};
use axum::{response::IntoResponse, Extension, Json};

pub fn handler() -> ApiRouter {
	ApiRouter::new()
		.route(
			"/docs",
			get(Scalar::new("/openapi.json")
				.with_title("ENS Toolkit API")
				.axum_handler()),
		)
		.route("/openapi.json", get(serve_api))
}

async fn serve_api(Extension(api): Extension<OpenApi>) -> impl IntoApiResponse {
	Json(api).into_response()
}
