//! Read-only ENS lookups against a JSON-RPC endpoint.

use alloy::{
	primitives::{address, Address, Bytes, B256, U256},
	sol_types::SolCall,
};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::{
	contenthash::{ContentHashError, ContentRecord, EncodedContentHash},
	namehash::{labelhash, namehash, normalize_name, reverse_name, NameError},
	types::ens::{
		addr_0Call, addr_1Call, contentCall, contenthashCall, nameCall, ownerCall,
		recordExistsCall, resolveCall, resolverCall, supportsInterfaceCall, textCall, ttlCall,
		CONTENTHASH_INTERFACE, EXTENDED_RESOLVER_INTERFACE,
	},
	utils::dns_encode_name,
};

/// The ENS registry, deployed at the same address on mainnet and the public testnets.
pub const MAINNET_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Name(#[from] NameError),
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("JSON-RPC error {code}: {message}")]
	Rpc { code: i64, message: String },
	#[error("JSON-RPC response carried neither a result nor an error.")]
	EmptyResponse,
	#[error(transparent)]
	Hex(#[from] hex::FromHexError),
	#[error(transparent)]
	Abi(#[from] alloy::sol_types::Error),
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
	result: Option<String>,
	error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
	code: i64,
	message: String,
}

/// Resolver responsible for a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
	pub address: Address,
	/// Set when the resolver belongs to an ancestor and must be queried through `resolve`.
	pub wildcard: bool,
}

/// Content record of a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
	Contenthash(ContentRecord),
	/// Pre-contenthash `content(bytes32)` record.
	Legacy(B256),
	/// The resolver returned a contenthash we could not decode.
	Invalid(ContentHashError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDetails {
	pub name: String,
	pub label: String,
	pub labelhash: B256,
	pub node: B256,
	pub owner: Address,
	pub resolver: Option<Address>,
	pub address: Option<Address>,
	pub content: Option<Content>,
}

#[derive(Debug, Clone)]
pub struct EnsClient {
	rpc_url: Url,
	registry: Address,
	http: reqwest::Client,
}

impl EnsClient {
	pub fn new(rpc_url: Url, registry: Address) -> Self {
		Self {
			rpc_url,
			registry,
			http: reqwest::Client::new(),
		}
	}

	#[must_use]
	pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
		self.http = http;
		self
	}

	pub const fn registry(&self) -> Address {
		self.registry
	}

	async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, Error> {
		let body = json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "eth_call",
			"params": [
				{ "to": to.to_string(), "data": format!("0x{}", hex::encode(data)) },
				"latest",
			],
		});

		let response = self
			.http
			.post(self.rpc_url.clone())
			.json(&body)
			.send()
			.await?
			.error_for_status()?
			.json::<RpcResponse>()
			.await?;

		if let Some(RpcError { code, message }) = response.error {
			tracing::debug!(%to, code, "eth_call failed: {message}");
			return Err(Error::Rpc { code, message });
		}

		let result = response.result.ok_or(Error::EmptyResponse)?;
		Ok(hex::decode(result.trim_start_matches("0x"))?)
	}

	async fn call<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return, Error> {
		let data = self.eth_call(to, call.abi_encode()).await?;

		Ok(C::abi_decode_returns(&data, true)?)
	}

	/// Calls `resolver`, going through ENSIP-10 `resolve` for wildcard resolvers.
	async fn resolve<C: SolCall>(
		&self,
		resolver: Resolver,
		name: &str,
		call: &C,
	) -> Result<C::Return, Error> {
		if !resolver.wildcard {
			return self.call(resolver.address, call).await;
		}

		let request = resolveCall {
			name: dns_encode_name(&normalize_name(name)?)?.into(),
			data: call.abi_encode().into(),
		};
		let response = self.call(resolver.address, &request).await?._0;

		Ok(C::abi_decode_returns(&response, true)?)
	}

	async fn supports_interface(&self, resolver: Address, interface: [u8; 4]) -> Result<bool, Error> {
		let call = supportsInterfaceCall {
			interfaceID: interface.into(),
		};

		match self.call(resolver, &call).await {
			Ok(supported) => Ok(supported._0),
			// Resolvers predating ERC-165 revert here.
			Err(Error::Rpc { .. } | Error::Abi(_)) => Ok(false),
			Err(err) => Err(err),
		}
	}

	pub async fn owner(&self, name: &str) -> Result<Address, Error> {
		let node = namehash(name)?;

		Ok(self.call(self.registry, &ownerCall { node }).await?._0)
	}

	pub async fn ttl(&self, name: &str) -> Result<u64, Error> {
		let node = namehash(name)?;

		Ok(self.call(self.registry, &ttlCall { node }).await?._0)
	}

	pub async fn record_exists(&self, name: &str) -> Result<bool, Error> {
		let node = namehash(name)?;

		Ok(self.call(self.registry, &recordExistsCall { node }).await?._0)
	}

	/// Resolver set on `name` itself in the registry, or the zero address.
	pub async fn resolver(&self, name: &str) -> Result<Address, Error> {
		let node = namehash(name)?;

		Ok(self.call(self.registry, &resolverCall { node }).await?._0)
	}

	/// Finds the resolver for `name`, walking up to its ancestors as in ENSIP-10.
	pub async fn find_resolver(&self, name: &str) -> Result<Option<Resolver>, Error> {
		let name = normalize_name(name)?;
		let mut current = name.as_str();

		loop {
			let address = self.resolver(current).await?;
			if !address.is_zero() {
				let wildcard = current != name;
				if wildcard
					&& !self
						.supports_interface(address, EXTENDED_RESOLVER_INTERFACE)
						.await?
				{
					return Ok(None);
				}

				return Ok(Some(Resolver { address, wildcard }));
			}

			if current.is_empty() {
				return Ok(None);
			}
			current = current.split_once('.').map_or("", |(_, parent)| parent);
		}
	}

	/// Whether the resolver set on `name` supports wildcard resolution.
	pub async fn supports_wildcard(&self, name: &str) -> Result<bool, Error> {
		let resolver = self.resolver(name).await?;
		if resolver.is_zero() {
			return Ok(false);
		}

		self.supports_interface(resolver, EXTENDED_RESOLVER_INTERFACE)
			.await
	}

	/// ETH address of `name`, or the zero address when it has no resolver.
	pub async fn address(&self, name: &str) -> Result<Address, Error> {
		let node = namehash(name)?;
		let Some(resolver) = self.find_resolver(name).await? else {
			return Ok(Address::ZERO);
		};

		Ok(self.resolve(resolver, name, &addr_0Call { node }).await?._0)
	}

	/// Raw address bytes for an SLIP-44 coin type.
	pub async fn coin_address(&self, name: &str, coin_type: u64) -> Result<Option<Bytes>, Error> {
		let node = namehash(name)?;
		let Some(resolver) = self.find_resolver(name).await? else {
			return Ok(None);
		};

		let call = addr_1Call {
			node,
			coinType: U256::from(coin_type),
		};
		let address = self.resolve(resolver, name, &call).await?._0;

		Ok((!address.is_empty()).then_some(address))
	}

	pub async fn content(&self, name: &str) -> Result<Option<Content>, Error> {
		let node = namehash(name)?;
		let Some(resolver) = self.find_resolver(name).await? else {
			return Ok(None);
		};

		if resolver.wildcard
			|| self
				.supports_interface(resolver.address, CONTENTHASH_INTERFACE)
				.await?
		{
			let encoded = self
				.resolve(resolver, name, &contenthashCall { node })
				.await?
				._0;
			if encoded.is_empty() {
				return Ok(None);
			}

			let encoded = EncodedContentHash::from(encoded.to_vec());
			return Ok(Some(
				encoded
					.decode()
					.map_or_else(Content::Invalid, Content::Contenthash),
			));
		}

		let legacy = self.call(resolver.address, &contentCall { node }).await?._0;
		Ok((!legacy.is_zero()).then_some(Content::Legacy(legacy)))
	}

	pub async fn text(&self, name: &str, key: &str) -> Result<Option<String>, Error> {
		let node = namehash(name)?;
		let Some(resolver) = self.find_resolver(name).await? else {
			return Ok(None);
		};

		let call = textCall {
			node,
			key: key.to_string(),
		};
		let value = self.resolve(resolver, name, &call).await?._0;

		Ok((!value.is_empty()).then_some(value))
	}

	/// Primary name of `address`, read from its reverse record.
	pub async fn name_of(&self, address: Address) -> Result<Option<String>, Error> {
		let reverse = reverse_name(address);
		let node = namehash(&reverse)?;

		let resolver = self.resolver(&reverse).await?;
		if resolver.is_zero() {
			return Ok(None);
		}

		let name = self.call(resolver, &nameCall { node }).await?._0;
		Ok((!name.is_empty()).then_some(name))
	}

	pub async fn domain_details(&self, name: &str) -> Result<DomainDetails, Error> {
		let name = normalize_name(name)?;
		let label = name.split('.').next().unwrap_or_default().to_string();

		let (owner, resolver) = tokio::try_join!(self.owner(&name), self.resolver(&name))?;

		let mut details = DomainDetails {
			labelhash: labelhash(&label)?,
			node: namehash(&name)?,
			owner,
			resolver: None,
			address: None,
			content: None,
			label,
			name,
		};

		if !resolver.is_zero() {
			let (address, content) =
				tokio::try_join!(self.address(&details.name), self.content(&details.name))?;

			details.resolver = Some(resolver);
			details.address = Some(address);
			details.content = content;
		}

		Ok(details)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::sol_types::SolValue;
	use wiremock::{
		matchers::{body_string_contains, method},
		Mock, MockServer, ResponseTemplate,
	};

	const RESOLVER: Address = address!("4976fb03C32e5B8cfe2b6cCB31c09Ba78EBaBa41");
	const VITALIK: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

	fn rpc_result(data: &[u8]) -> ResponseTemplate {
		ResponseTemplate::new(200).set_body_json(json!({
			"jsonrpc": "2.0",
			"id": 1,
			"result": format!("0x{}", hex::encode(data)),
		}))
	}

	async fn mock_call(server: &MockServer, selector: [u8; 4], data: &[u8]) {
		Mock::given(method("POST"))
			.and(body_string_contains(format!(
				"\"data\":\"0x{}",
				hex::encode(selector)
			)))
			.respond_with(rpc_result(data))
			.mount(server)
			.await;
	}

	fn client(server: &MockServer) -> EnsClient {
		EnsClient::new(server.uri().parse().unwrap(), MAINNET_REGISTRY)
	}

	#[tokio::test]
	async fn reads_the_owner() {
		let server = MockServer::start().await;
		mock_call(&server, ownerCall::SELECTOR, &(VITALIK,).abi_encode_params()).await;

		let owner = client(&server).owner("vitalik.eth").await.unwrap();
		assert_eq!(owner, VITALIK);
	}

	#[tokio::test]
	async fn surfaces_rpc_errors() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"jsonrpc": "2.0",
				"id": 1,
				"error": { "code": -32000, "message": "execution reverted" },
			})))
			.mount(&server)
			.await;

		let err = client(&server).ttl("vitalik.eth").await.unwrap_err();
		assert!(matches!(err, Error::Rpc { code: -32000, .. }));
	}

	#[tokio::test]
	async fn rejects_invalid_names_before_calling() {
		let server = MockServer::start().await;

		let err = client(&server).owner("$vitalik.eth").await.unwrap_err();
		assert!(matches!(err, Error::Name(NameError::IllegalCharacter('$'))));
	}

	#[tokio::test]
	async fn resolves_address_and_content() {
		let server = MockServer::start().await;
		let contenthash = crate::contenthash::encode_content_hash(
			"ipfs://QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4",
		)
		.unwrap();

		mock_call(&server, resolverCall::SELECTOR, &(RESOLVER,).abi_encode_params()).await;
		mock_call(&server, addr_0Call::SELECTOR, &(VITALIK,).abi_encode_params()).await;
		mock_call(&server, supportsInterfaceCall::SELECTOR, &(true,).abi_encode_params()).await;
		mock_call(
			&server,
			contenthashCall::SELECTOR,
			&(Bytes::from(contenthash.into_bytes()),).abi_encode_params(),
		)
		.await;

		let client = client(&server);
		assert_eq!(client.address("vitalik.eth").await.unwrap(), VITALIK);

		let Some(Content::Contenthash(record)) = client.content("vitalik.eth").await.unwrap() else {
			panic!("expected a contenthash");
		};
		assert_eq!(
			record.uri().unwrap(),
			"ipfs://QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4"
		);
	}

	#[tokio::test]
	async fn missing_resolver_means_no_records() {
		let server = MockServer::start().await;
		mock_call(&server, resolverCall::SELECTOR, &(Address::ZERO,).abi_encode_params()).await;

		let client = client(&server);
		assert_eq!(client.find_resolver("nobody.eth").await.unwrap(), None);
		assert_eq!(client.address("nobody.eth").await.unwrap(), Address::ZERO);
		assert_eq!(client.text("nobody.eth", "url").await.unwrap(), None);
		assert_eq!(client.content("nobody.eth").await.unwrap(), None);
		assert!(!client.supports_wildcard("nobody.eth").await.unwrap());
	}

	#[tokio::test]
	async fn reads_reverse_records() {
		let server = MockServer::start().await;
		mock_call(&server, resolverCall::SELECTOR, &(RESOLVER,).abi_encode_params()).await;
		mock_call(
			&server,
			nameCall::SELECTOR,
			&("vitalik.eth".to_string(),).abi_encode_params(),
		)
		.await;

		let name = client(&server).name_of(VITALIK).await.unwrap();
		assert_eq!(name.as_deref(), Some("vitalik.eth"));
	}

	#[tokio::test]
	async fn builds_domain_details() {
		let server = MockServer::start().await;
		mock_call(&server, ownerCall::SELECTOR, &(VITALIK,).abi_encode_params()).await;
		mock_call(&server, resolverCall::SELECTOR, &(RESOLVER,).abi_encode_params()).await;
		mock_call(&server, addr_0Call::SELECTOR, &(VITALIK,).abi_encode_params()).await;
		mock_call(&server, supportsInterfaceCall::SELECTOR, &(false,).abi_encode_params()).await;
		mock_call(&server, contentCall::SELECTOR, &(B256::ZERO,).abi_encode_params()).await;

		let details = client(&server).domain_details("Vitalik.eth").await.unwrap();

		assert_eq!(details.name, "vitalik.eth");
		assert_eq!(details.label, "vitalik");
		assert_eq!(details.labelhash, labelhash("vitalik").unwrap());
		assert_eq!(details.node, namehash("vitalik.eth").unwrap());
		assert_eq!(details.owner, VITALIK);
		assert_eq!(details.resolver, Some(RESOLVER));
		assert_eq!(details.address, Some(VITALIK));
		assert_eq!(details.content, None);
	}
}
