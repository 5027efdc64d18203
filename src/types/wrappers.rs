use schemars::{schema, JsonSchema};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Display, ops::Deref, str::FromStr};

fn hex_string_schema(pattern: &str) -> schema::Schema {
	schema::Schema::Object(schema::SchemaObject {
		string: Some(Box::new(schema::StringValidation {
			pattern: Some(pattern.to_string()),
			..Default::default()
		})),
		instance_type: Some(schema::SingleOrVec::Single(Box::new(
			schema::InstanceType::String,
		))),
		..Default::default()
	})
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.collect_str(value)
}

fn deserialize_from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
	T: FromStr,
	T::Err: Display,
	D: Deserializer<'de>,
{
	String::deserialize(deserializer)?
		.parse()
		.map_err(de::Error::custom)
}

/// 0x-prefixed hex string representing an Ethereum address.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address(pub alloy::primitives::Address);

impl Deref for Address {
	type Target = alloy::primitives::Address;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Serialize for Address {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serialize_display(&self.0, serializer)
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserialize_from_str(deserializer).map(Self)
	}
}

impl JsonSchema for Address {
	fn schema_name() -> String {
		"Address".to_string()
	}

	fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schema::Schema {
		hex_string_schema("^0x[a-fA-F0-9]{40}$")
	}
}

/// 0x-prefixed hex string of a 32-byte hash, such as a namehash or labelhash.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bytes32(pub alloy::primitives::B256);

impl Deref for Bytes32 {
	type Target = alloy::primitives::B256;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Serialize for Bytes32 {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serialize_display(&self.0, serializer)
	}
}

impl<'de> Deserialize<'de> for Bytes32 {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserialize_from_str(deserializer).map(Self)
	}
}

impl JsonSchema for Bytes32 {
	fn schema_name() -> String {
		"Bytes32".to_string()
	}

	fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schema::Schema {
		hex_string_schema("^0x[a-f0-9]{64}$")
	}
}
