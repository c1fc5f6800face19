// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	sync::Arc,
};

use serde::{Deserialize, Serialize};
use stratum_type::{Type, TypedValue, error::diagnostic::operation::not_applicable, return_error};

use crate::{
	binary::{BinaryOperation, BinaryOperationId},
	comparison::{Comparison, ComparisonId},
	signature::OperationSignature,
	unary::{UnaryOperation, UnaryOperationId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationSuperType {
	Comparison,
	Unary,
	Binary,
}

impl OperationSuperType {
	pub fn name(self) -> &'static str {
		match self {
			Self::Comparison => "comparison",
			Self::Unary => "unary operation",
			Self::Binary => "binary operation",
		}
	}

	/// Number of non-static arguments.
	pub fn arity(self) -> usize {
		match self {
			Self::Unary => 1,
			Self::Comparison | Self::Binary => 2,
		}
	}
}

impl Display for OperationSuperType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Serialized identity of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId {
	pub super_type: OperationSuperType,
	pub id: u8,
}

impl OperationId {
	pub fn comparison(id: ComparisonId) -> Self {
		Self {
			super_type: OperationSuperType::Comparison,
			id: id.to_u8(),
		}
	}

	pub fn unary(id: UnaryOperationId) -> Self {
		Self {
			super_type: OperationSuperType::Unary,
			id: id.to_u8(),
		}
	}

	pub fn binary(id: BinaryOperationId) -> Self {
		Self {
			super_type: OperationSuperType::Binary,
			id: id.to_u8(),
		}
	}

	pub fn to_bytes(&self) -> stratum_type::Result<Vec<u8>> {
		Ok(postcard::to_allocvec(self)?)
	}

	pub fn from_bytes(bytes: &[u8]) -> stratum_type::Result<Self> {
		Ok(postcard::from_bytes(bytes)?)
	}
}

/// A registered operation of any super type.
#[derive(Clone)]
pub enum Operation {
	Comparison(Arc<Comparison>),
	Unary(Arc<dyn UnaryOperation>),
	Binary(Arc<dyn BinaryOperation>),
}

impl Operation {
	pub fn super_type(&self) -> OperationSuperType {
		match self {
			Operation::Comparison(_) => OperationSuperType::Comparison,
			Operation::Unary(_) => OperationSuperType::Unary,
			Operation::Binary(_) => OperationSuperType::Binary,
		}
	}

	pub fn id(&self) -> OperationId {
		match self {
			Operation::Comparison(comparison) => OperationId::comparison(comparison.id()),
			Operation::Unary(unary) => OperationId::unary(unary.id()),
			Operation::Binary(binary) => OperationId::binary(binary.id()),
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Operation::Comparison(comparison) => comparison.name(),
			Operation::Unary(unary) => unary.name(),
			Operation::Binary(binary) => binary.name(),
		}
	}

	pub fn signatures(&self) -> Vec<OperationSignature> {
		match self {
			Operation::Comparison(comparison) => comparison.signatures(),
			Operation::Unary(unary) => unary.signatures(),
			Operation::Binary(binary) => binary.signatures(),
		}
	}

	/// `argument_types` holds every argument, static ones included, in
	/// signature order; `static_arguments` are the trailing static values.
	pub fn can_apply_to(
		&self,
		argument_types: &[&'static Type],
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<()> {
		let non_static = argument_types.len().saturating_sub(static_arguments.len());
		if non_static != self.super_type().arity() {
			return_error!(not_applicable(self.name(), argument_types, None));
		}
		match self {
			Operation::Comparison(comparison) => comparison.can_apply_to(argument_types[0], argument_types[1]),
			Operation::Unary(unary) => unary.can_apply_to(argument_types[0], static_arguments),
			Operation::Binary(binary) => binary.can_apply_to(argument_types[0], argument_types[1], static_arguments),
		}
	}

	pub fn as_comparison(&self) -> Option<&Arc<Comparison>> {
		match self {
			Operation::Comparison(comparison) => Some(comparison),
			_ => None,
		}
	}

	pub fn as_unary(&self) -> Option<&Arc<dyn UnaryOperation>> {
		match self {
			Operation::Unary(unary) => Some(unary),
			_ => None,
		}
	}

	pub fn as_binary(&self) -> Option<&Arc<dyn BinaryOperation>> {
		match self {
			Operation::Binary(binary) => Some(binary),
			_ => None,
		}
	}
}

impl std::fmt::Debug for Operation {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Operation").field("super_type", &self.super_type()).field("name", &self.name()).finish()
	}
}

/// Operations are equal when they have the same identity.
impl PartialEq for Operation {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for Operation {}

#[cfg(test)]
mod tests {
	use stratum_type::{Kind, TypeFactory};

	use super::*;
	use crate::{binary::ArithmeticBinaryOperation, config::OperationConfig, unary::CastOperation};

	#[test]
	fn test_id_round_trip() {
		let id = OperationId::binary(BinaryOperationId::Multiply);
		assert_eq!(OperationId::from_bytes(&id.to_bytes().unwrap()).unwrap(), id);
		let json = serde_json::to_value(OperationId::comparison(ComparisonId::Less)).unwrap();
		assert_eq!(json["super_type"], "Comparison");
		assert_eq!(json["id"], 2);
	}

	#[test]
	fn test_can_apply_checks_arity() {
		let add = Operation::Binary(Arc::new(ArithmeticBinaryOperation::add()));
		let int = TypeFactory::get(Kind::Int, false);
		assert!(add.can_apply_to(&[int, int], &[]).is_ok());
		assert_eq!(add.can_apply_to(&[int], &[]).unwrap_err().code(), "OPERATION_003");

		let cast = Operation::Unary(Arc::new(CastOperation));
		let meta = TypeFactory::get(Kind::Meta, false);
		let target = TypedValue::Meta(TypeFactory::get(Kind::Double, false));
		assert!(cast.can_apply_to(&[int, meta], &[target]).is_ok());
	}

	#[test]
	fn test_identity() {
		let config = OperationConfig::default();
		let less = Operation::Comparison(Arc::new(Comparison::new(ComparisonId::Less, &config)));
		let other = Operation::Comparison(Arc::new(Comparison::new(ComparisonId::Less, &config)));
		assert_eq!(less, other);
		assert_eq!(less.super_type(), OperationSuperType::Comparison);
		assert_eq!(less.name(), "<");
	}
}
