// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use stratum_type::{Kind, error::diagnostic::serialization::malformed, return_error};

pub type ArgumentKinds = SmallVec<[Kind; 4]>;

/// Identity of one overload: lower-cased name, argument kinds, and how many
/// trailing arguments are static.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OperationSignature {
	name: String,
	argument_kinds: ArgumentKinds,
	num_static_arguments: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedSignature {
	pub name: String,
	pub argument_kinds: Vec<Kind>,
	pub num_static_arguments: u64,
}

impl OperationSignature {
	pub fn new(name: &str, argument_kinds: impl IntoIterator<Item = Kind>, num_static_arguments: usize) -> Self {
		let argument_kinds: ArgumentKinds = argument_kinds.into_iter().collect();
		assert!(
			num_static_arguments <= argument_kinds.len(),
			"{} static arguments for {} arguments",
			num_static_arguments,
			argument_kinds.len()
		);
		Self {
			name: name.to_ascii_lowercase(),
			argument_kinds,
			num_static_arguments,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn argument_kinds(&self) -> &[Kind] {
		&self.argument_kinds
	}

	pub fn arity(&self) -> usize {
		self.argument_kinds.len()
	}

	pub fn num_static_arguments(&self) -> usize {
		self.num_static_arguments
	}

	pub fn num_non_static_arguments(&self) -> usize {
		self.arity() - self.num_static_arguments
	}

	pub fn serialize(&self) -> SerializedSignature {
		SerializedSignature {
			name: self.name.clone(),
			argument_kinds: self.argument_kinds.to_vec(),
			num_static_arguments: self.num_static_arguments as u64,
		}
	}

	pub fn deserialize(serialized: &SerializedSignature) -> stratum_type::Result<Self> {
		let num_static = serialized.num_static_arguments as usize;
		if num_static > serialized.argument_kinds.len() {
			return_error!(malformed(format!(
				"signature {} declares {} static arguments but has {} arguments",
				serialized.name,
				num_static,
				serialized.argument_kinds.len()
			)));
		}
		Ok(Self::new(&serialized.name, serialized.argument_kinds.iter().copied(), num_static))
	}

	pub fn to_bytes(&self) -> stratum_type::Result<Vec<u8>> {
		Ok(postcard::to_allocvec(&self.serialize())?)
	}

	pub fn from_bytes(bytes: &[u8]) -> stratum_type::Result<Self> {
		let serialized: SerializedSignature = postcard::from_bytes(bytes)?;
		Self::deserialize(&serialized)
	}
}

// name, then arity, then descending static count, then kinds
impl Ord for OperationSignature {
	fn cmp(&self, other: &Self) -> Ordering {
		self.name
			.cmp(&other.name)
			.then_with(|| self.arity().cmp(&other.arity()))
			.then_with(|| other.num_static_arguments.cmp(&self.num_static_arguments))
			.then_with(|| self.argument_kinds.cmp(&other.argument_kinds))
	}
}

impl PartialOrd for OperationSignature {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Display for OperationSignature {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}(", self.name)?;
		for (i, kind) in self.argument_kinds.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", kind)?;
		}
		write!(f, "; static={})", self.num_static_arguments)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_name_is_lower_cased() {
		let sig = OperationSignature::new("SubString", [Kind::VarChar, Kind::Int], 1);
		assert_eq!(sig.name(), "substring");
		assert_eq!(sig, OperationSignature::new("substring", [Kind::VarChar, Kind::Int], 1));
		assert_eq!(sig.to_string(), "substring(VarChar, Int; static=1)");
	}

	#[test]
	fn test_ordering_prefers_more_static_arguments() {
		let mut sigs = vec![
			OperationSignature::new("f", [Kind::Int, Kind::Int], 0),
			OperationSignature::new("f", [Kind::Long, Kind::Int], 1),
			OperationSignature::new("f", [Kind::Int], 0),
			OperationSignature::new("f", [Kind::Int, Kind::Int], 2),
			OperationSignature::new("e", [Kind::Double, Kind::Double, Kind::Double], 0),
		];
		sigs.sort();
		let rendered = sigs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
		assert_eq!(
			rendered,
			vec![
				"e(Double, Double, Double; static=0)",
				"f(Int; static=0)",
				"f(Int, Int; static=2)",
				"f(Long, Int; static=1)",
				"f(Int, Int; static=0)",
			]
		);
	}

	#[test]
	fn test_serialized_round_trip() {
		let sig = OperationSignature::new("cast", [Kind::Double, Kind::Meta], 1);
		let bytes = sig.to_bytes().unwrap();
		assert_eq!(OperationSignature::from_bytes(&bytes).unwrap(), sig);

		let json = serde_json::to_value(sig.serialize()).unwrap();
		assert_eq!(json["name"], "cast");
		assert_eq!(json["num_static_arguments"], 1);
	}

	#[test]
	fn test_deserialize_rejects_excess_static_arguments() {
		let serialized = SerializedSignature {
			name: "f".to_string(),
			argument_kinds: vec![Kind::Int],
			num_static_arguments: 2,
		};
		let err = OperationSignature::deserialize(&serialized).unwrap_err();
		assert_eq!(err.code(), "SERIALIZATION_001");
	}
}
