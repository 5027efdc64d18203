#![allow(clippy::pub_underscore_fields)]

use alloy::sol_types::{sol, SolCall};

sol! {
	#![sol(alloy_sol_types = ::alloy::sol_types)]

	// Registry
	function owner(bytes32 node) returns (address);
	function resolver(bytes32 node) returns (address);
	function ttl(bytes32 node) returns (uint64);
	function recordExists(bytes32 node) returns (bool);

	// Resolver
	function supportsInterface(bytes4 interfaceID) returns (bool);
	function addr(bytes32 node) returns (address);
	function addr(bytes32 node, uint256 coinType) returns (bytes memory);
	function contenthash(bytes32 node) returns (bytes memory);
	function content(bytes32 node) returns (bytes32);
	function text(bytes32 node, string key) returns (string);
	function name(bytes32 node) returns (string);

	// ENSIP-10 wildcard resolution
	function resolve(bytes calldata name, bytes calldata data) returns (bytes memory);
}

/// `IExtendedResolver` interface id.
pub const EXTENDED_RESOLVER_INTERFACE: [u8; 4] = [0x90, 0x61, 0xb9, 0x23];

/// Resolvers advertise contenthash support under the selector of `contenthash(bytes32)`.
pub const CONTENTHASH_INTERFACE: [u8; 4] = contenthashCall::SELECTOR;
