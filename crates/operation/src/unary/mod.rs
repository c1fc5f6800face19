// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use stratum_type::{ColumnVector, ColumnVectorsValueAccessor, Type, TypedValue, ValueAccessor};

use crate::signature::OperationSignature;

mod arithmetic;
mod cast;
mod cmath;
mod extract;
mod string;
mod substring;
mod wrapper;

pub use arithmetic::ArithmeticUnaryOperation;
pub use cast::CastOperation;
pub use cmath::CmathUnaryOperation;
pub use extract::{DateExtractOperation, DateExtractUnit};
pub use string::StringUnaryOperation;
pub use substring::SubstringOperation;
pub use wrapper::{UnaryFunctor, UncheckedUnaryOperatorWrapper, make_unchecked_unary};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnaryOperationId {
	Negate = 0,
	Abs = 1,
	Length = 2,
	Lower = 3,
	Upper = 4,
	Sqrt = 5,
	Exp = 6,
	Ln = 7,
	Sin = 8,
	Cos = 9,
	Tan = 10,
	Floor = 11,
	Ceil = 12,
	Cast = 13,
	Extract = 14,
	Substring = 15,
}

impl UnaryOperationId {
	pub const ALL: [UnaryOperationId; 16] = [
		Self::Negate,
		Self::Abs,
		Self::Length,
		Self::Lower,
		Self::Upper,
		Self::Sqrt,
		Self::Exp,
		Self::Ln,
		Self::Sin,
		Self::Cos,
		Self::Tan,
		Self::Floor,
		Self::Ceil,
		Self::Cast,
		Self::Extract,
		Self::Substring,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::Negate => "-",
			Self::Abs => "abs",
			Self::Length => "length",
			Self::Lower => "lower",
			Self::Upper => "upper",
			Self::Sqrt => "sqrt",
			Self::Exp => "exp",
			Self::Ln => "ln",
			Self::Sin => "sin",
			Self::Cos => "cos",
			Self::Tan => "tan",
			Self::Floor => "floor",
			Self::Ceil => "ceil",
			Self::Cast => "cast",
			Self::Extract => "extract",
			Self::Substring => "substring",
		}
	}

	pub fn to_u8(self) -> u8 {
		self as u8
	}

	pub fn from_u8(id: u8) -> Option<Self> {
		Self::ALL.get(id as usize).copied()
	}
}

/// A unary operator bound to one concrete argument type.
pub trait UncheckedUnaryOperator: Send + Sync {
	fn result_type(&self) -> &'static Type;

	fn apply_to_typed_value(&self, argument: &TypedValue<'_>) -> TypedValue<'static>;

	/// `argument` holds native bytes, `None` for NULL.
	fn apply_to_data(&self, argument: Option<&[u8]>) -> TypedValue<'static>;

	fn apply_to_value_accessor(&self, accessor: &mut dyn ValueAccessor, attr: usize) -> ColumnVector;

	fn apply_to_column_vector(&self, argument: &ColumnVector) -> ColumnVector {
		let mut accessor = ColumnVectorsValueAccessor::single(argument);
		self.apply_to_value_accessor(&mut accessor, 0)
	}
}

/// An operation over one non-static argument, possibly followed by static
/// arguments.
pub trait UnaryOperation: Send + Sync {
	fn id(&self) -> UnaryOperationId;

	fn name(&self) -> &'static str {
		self.id().name()
	}

	fn signatures(&self) -> Vec<OperationSignature>;

	/// `Err` carries an `OPERATION_003` diagnostic explaining the rejection.
	fn can_apply_to(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()>;

	fn result_type(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> Option<&'static Type>;

	/// Result type when the argument type may still be unknown.
	fn result_type_for_partial_argument_type(&self, argument: Option<&'static Type>) -> Option<&'static Type>;

	fn partial_type_signature_is_plausible(&self, result: Option<&Type>, argument: Option<&Type>) -> bool;

	/// The argument type implied by an expected result type, if any.
	fn push_down_type_hint(&self, result_hint: Option<&Type>) -> Option<&'static Type>;

	fn make_unchecked_unary_operator(
		&self,
		argument: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<Box<dyn UncheckedUnaryOperator>>;

	fn apply_checked(
		&self,
		argument: &TypedValue<'_>,
		argument_type: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<TypedValue<'static>> {
		self.can_apply_to(argument_type, static_arguments)?;
		let operator = self.make_unchecked_unary_operator(argument_type, static_arguments)?;
		Ok(operator.apply_to_typed_value(argument))
	}
}
