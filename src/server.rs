use aide::openapi::{self, OpenApi};
use anyhow::Result;
use axum::{Extension, Router};
use datadog_tracing::axum::{OtelAxumLayer, OtelInResponseLayer};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

use crate::{config::Config, routes};

pub fn app(config: &Config) -> Result<Router> {
	let mut openapi = OpenApi {
		info: openapi::Info {
			title: "ENS Toolkit API".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			..openapi::Info::default()
		},
		..OpenApi::default()
	};

	let router = routes::handler()
		.finish_api(&mut openapi)
		.layer(Extension(openapi))
		.layer(OtelInResponseLayer)
		.layer((
			OtelAxumLayer::default(),
			TimeoutLayer::new(config.request_timeout),
		))
		.layer(CorsLayer::permissive())
		.layer(config.ens_client_extension()?);

	Ok(router)
}

pub async fn start(config: Config) -> Result<()> {
	let router = app(&config)?;

	let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
	let listener = TcpListener::bind(&addr).await?;

	tracing::info!(registry = %config.registry, "Starting server on {addr}...");

	axum::serve(listener, router.into_make_service())
		.with_graceful_shutdown(async {
			tokio::signal::ctrl_c().await.ok();
			tracing::info!("Shutting down...");
		})
		.await?;

	Ok(())
}
