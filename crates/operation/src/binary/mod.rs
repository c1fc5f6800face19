// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use stratum_type::{ColumnVector, ColumnVectorsValueAccessor, Type, TypedValue, ValueAccessor};

use crate::signature::OperationSignature;

mod arithmetic;
mod cmath;
mod string;
mod wrapper;

pub use arithmetic::ArithmeticBinaryOperation;
pub use cmath::CmathBinaryOperation;
pub use string::ConcatOperation;
pub use wrapper::{BinaryFunctor, Swapped, UncheckedBinaryOperatorWrapper, make_unchecked_binary};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BinaryOperationId {
	Add = 0,
	Subtract = 1,
	Multiply = 2,
	Divide = 3,
	Modulo = 4,
	Concat = 5,
	Pow = 6,
	Atan2 = 7,
}

impl BinaryOperationId {
	pub const ALL: [BinaryOperationId; 8] = [
		Self::Add,
		Self::Subtract,
		Self::Multiply,
		Self::Divide,
		Self::Modulo,
		Self::Concat,
		Self::Pow,
		Self::Atan2,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::Add => "+",
			Self::Subtract => "-",
			Self::Multiply => "*",
			Self::Divide => "/",
			Self::Modulo => "%",
			Self::Concat => "concat",
			Self::Pow => "pow",
			Self::Atan2 => "atan2",
		}
	}

	pub fn to_u8(self) -> u8 {
		self as u8
	}

	pub fn from_u8(id: u8) -> Option<Self> {
		Self::ALL.get(id as usize).copied()
	}
}

/// A binary operator bound to one concrete pair of argument types.
pub trait UncheckedBinaryOperator: Send + Sync {
	fn result_type(&self) -> &'static Type;

	fn apply_to_typed_values(&self, left: &TypedValue<'_>, right: &TypedValue<'_>) -> TypedValue<'static>;

	/// Native bytes of each argument, `None` for NULL.
	fn apply_to_data(&self, left: Option<&[u8]>, right: Option<&[u8]>) -> TypedValue<'static>;

	/// Both arguments are attributes of the same accessor.
	fn apply_to_single_value_accessor(
		&self,
		accessor: &mut dyn ValueAccessor,
		left_attr: usize,
		right_attr: usize,
	) -> ColumnVector;

	fn apply_to_value_accessor_and_static_value(
		&self,
		accessor: &mut dyn ValueAccessor,
		left_attr: usize,
		right: &TypedValue<'_>,
	) -> ColumnVector;

	fn apply_to_static_value_and_value_accessor(
		&self,
		left: &TypedValue<'_>,
		accessor: &mut dyn ValueAccessor,
		right_attr: usize,
	) -> ColumnVector;

	/// The columns must be equally long.
	fn apply_to_column_vectors(&self, left: &ColumnVector, right: &ColumnVector) -> ColumnVector {
		let mut accessor = ColumnVectorsValueAccessor::new(vec![left, right]);
		self.apply_to_single_value_accessor(&mut accessor, 0, 1)
	}

	fn apply_to_column_vector_and_static_value(&self, left: &ColumnVector, right: &TypedValue<'_>) -> ColumnVector {
		let mut accessor = ColumnVectorsValueAccessor::single(left);
		self.apply_to_value_accessor_and_static_value(&mut accessor, 0, right)
	}

	fn apply_to_static_value_and_column_vector(&self, left: &TypedValue<'_>, right: &ColumnVector) -> ColumnVector {
		let mut accessor = ColumnVectorsValueAccessor::single(right);
		self.apply_to_static_value_and_value_accessor(left, &mut accessor, 0)
	}

	/// Folds every non-null value of `column` into `current` as the right
	/// argument. Returns the new accumulator and the number of values folded.
	///
	/// Only defined when the left, result and accumulator kinds coincide and
	/// are inline; panics otherwise.
	fn accumulate_column_vector(&self, current: &TypedValue<'_>, column: &ColumnVector) -> (TypedValue<'static>, usize) {
		let mut accessor = ColumnVectorsValueAccessor::single(column);
		self.accumulate_value_accessor(current, &mut accessor, 0)
	}

	fn accumulate_value_accessor(
		&self,
		current: &TypedValue<'_>,
		accessor: &mut dyn ValueAccessor,
		attr: usize,
	) -> (TypedValue<'static>, usize);
}

/// An operation over two non-static arguments, possibly followed by static
/// arguments.
pub trait BinaryOperation: Send + Sync {
	fn id(&self) -> BinaryOperationId;

	fn name(&self) -> &'static str {
		self.id().name()
	}

	fn signatures(&self) -> Vec<OperationSignature>;

	/// `Err` carries an `OPERATION_003` diagnostic explaining the rejection.
	fn can_apply_to(
		&self,
		left: &'static Type,
		right: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<()>;

	fn result_type(
		&self,
		left: &'static Type,
		right: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> Option<&'static Type>;

	/// Result type when either argument type may still be unknown. Unknown
	/// arguments are treated as nullable.
	fn result_type_for_partial_argument_types(
		&self,
		left: Option<&'static Type>,
		right: Option<&'static Type>,
	) -> Option<&'static Type>;

	fn partial_type_signature_is_plausible(
		&self,
		result: Option<&Type>,
		left: Option<&Type>,
		right: Option<&Type>,
	) -> bool;

	/// The argument types implied by an expected result type.
	fn push_down_type_hint(&self, result_hint: Option<&Type>) -> (Option<&'static Type>, Option<&'static Type>);

	fn make_unchecked_binary_operator(
		&self,
		left: &'static Type,
		right: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<Box<dyn UncheckedBinaryOperator>>;

	fn apply_checked(
		&self,
		left: &TypedValue<'_>,
		left_type: &'static Type,
		right: &TypedValue<'_>,
		right_type: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<TypedValue<'static>> {
		self.can_apply_to(left_type, right_type, static_arguments)?;
		let operator = self.make_unchecked_binary_operator(left_type, right_type, static_arguments)?;
		Ok(operator.apply_to_typed_values(left, right))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ids_round_trip() {
		for id in BinaryOperationId::ALL {
			assert_eq!(BinaryOperationId::from_u8(id.to_u8()), Some(id));
		}
		assert_eq!(BinaryOperationId::from_u8(8), None);
	}
}
