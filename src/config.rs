use alloy::primitives::Address;
use anyhow::Context;
use axum::Extension;
use std::{
	env::{self, VarError},
	num::ParseIntError,
	sync::Arc,
	time::Duration,
};
use url::Url;

use crate::resolver::{EnsClient, MAINNET_REGISTRY};

#[allow(clippy::module_name_repetitions)]
pub type EnsClientExt = Extension<Arc<EnsClient>>;

#[derive(Debug)]
pub struct Config {
	/// JSON-RPC endpoint used for registry and resolver calls.
	pub rpc_url: Url,
	/// Address of the ENS registry.
	pub registry: Address,
	pub port: u16,
	/// Applies to both incoming requests and outgoing RPC calls.
	pub request_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Env(#[from] VarError),
	#[error(transparent)]
	Number(#[from] ParseIntError),
	#[error(transparent)]
	Url(#[from] url::ParseError),
	#[error(transparent)]
	EnvWithContext(#[from] anyhow::Error),
	#[error(transparent)]
	Http(#[from] reqwest::Error),
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		let rpc_url = env::var("RPC_URL")
			.context("RPC_URL environment variable not set")?
			.parse()?;

		let registry = env::var("ENS_REGISTRY").map_or(Ok(MAINNET_REGISTRY), |registry| {
			registry
				.parse()
				.context("ENS_REGISTRY is not a valid address")
		})?;

		Ok(Self {
			rpc_url,
			registry,
			port: env::var("PORT").map_or(Ok(8000), |p| p.parse())?,
			request_timeout: Duration::from_secs(
				env::var("REQUEST_TIMEOUT_SECS").map_or(Ok(90), |t| t.parse())?,
			),
		})
	}

	pub fn ens_client(&self) -> Result<EnsClient, Error> {
		let http = reqwest::Client::builder()
			.timeout(self.request_timeout)
			.build()?;

		Ok(EnsClient::new(self.rpc_url.clone(), self.registry).with_http_client(http))
	}

	pub fn ens_client_extension(&self) -> Result<EnsClientExt, Error> {
		Ok(Extension(Arc::new(self.ens_client()?)))
	}
}
