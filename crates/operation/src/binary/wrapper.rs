// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use stratum_type::{ColumnVector, Type, TypedValue, ValueAccessor};

use crate::{
	binary::UncheckedBinaryOperator,
	native::{ArgumentKind, ResultKind},
};

/// Per-value body of a binary operator.
pub trait BinaryFunctor: Send + Sync + 'static {
	type Left: ArgumentKind;
	type Right: ArgumentKind;
	type Result: ResultKind;

	fn apply(
		&self,
		left: <Self::Left as ArgumentKind>::Value<'_>,
		right: <Self::Right as ArgumentKind>::Value<'_>,
	) -> <Self::Result as ResultKind>::Output;
}

/// `F` with its arguments exchanged, for commutative pairs such as
/// `interval * number` and `number * interval`.
pub struct Swapped<F>(pub F);

impl<F: BinaryFunctor> BinaryFunctor for Swapped<F> {
	type Left = F::Right;
	type Right = F::Left;
	type Result = F::Result;

	#[inline]
	fn apply(
		&self,
		left: <F::Right as ArgumentKind>::Value<'_>,
		right: <F::Left as ArgumentKind>::Value<'_>,
	) -> <F::Result as ResultKind>::Output {
		self.0.apply(right, left)
	}
}

/// Lifts a [`BinaryFunctor`] to every application shape. `LEFT_NULLABLE`
/// and `RIGHT_NULLABLE` are the nullability of the argument types.
pub struct UncheckedBinaryOperatorWrapper<F, const LEFT_NULLABLE: bool, const RIGHT_NULLABLE: bool> {
	functor: F,
	result_type: &'static Type,
}

impl<F: BinaryFunctor, const LEFT_NULLABLE: bool, const RIGHT_NULLABLE: bool>
	UncheckedBinaryOperatorWrapper<F, LEFT_NULLABLE, RIGHT_NULLABLE>
{
	pub fn new(functor: F, result_type: &'static Type) -> Self {
		debug_assert_eq!(F::Result::KIND, result_type.kind());
		Self {
			functor,
			result_type,
		}
	}

	fn null(&self) -> TypedValue<'static> {
		TypedValue::Null(self.result_type.kind())
	}

	fn nulls(&self, count: usize) -> ColumnVector {
		let mut result = ColumnVector::with_capacity(self.result_type, count);
		result.fill_with_nulls(count);
		result
	}
}

impl<F: BinaryFunctor, const LEFT_NULLABLE: bool, const RIGHT_NULLABLE: bool> UncheckedBinaryOperator
	for UncheckedBinaryOperatorWrapper<F, LEFT_NULLABLE, RIGHT_NULLABLE>
{
	fn result_type(&self) -> &'static Type {
		self.result_type
	}

	fn apply_to_typed_values(&self, left: &TypedValue<'_>, right: &TypedValue<'_>) -> TypedValue<'static> {
		if (LEFT_NULLABLE && left.is_null()) || (RIGHT_NULLABLE && right.is_null()) {
			return self.null();
		}
		let output = self.functor.apply(F::Left::from_typed(left), F::Right::from_typed(right));
		F::Result::into_typed(output, self.result_type)
	}

	fn apply_to_data(&self, left: Option<&[u8]>, right: Option<&[u8]>) -> TypedValue<'static> {
		match (left, right) {
			(Some(left), Some(right)) => {
				let output = self.functor.apply(F::Left::from_bytes(left), F::Right::from_bytes(right));
				F::Result::into_typed(output, self.result_type)
			}
			_ => {
				debug_assert!(LEFT_NULLABLE || RIGHT_NULLABLE, "NULL passed to an operator over non-nullable types");
				self.null()
			}
		}
	}

	fn apply_to_single_value_accessor(
		&self,
		accessor: &mut dyn ValueAccessor,
		left_attr: usize,
		right_attr: usize,
	) -> ColumnVector {
		let mut result = ColumnVector::with_capacity(self.result_type, accessor.num_values());
		accessor.begin_iteration();
		while accessor.next() {
			match (accessor.get_untyped_value(left_attr), accessor.get_untyped_value(right_attr)) {
				(Some(left), Some(right)) => {
					let output = self.functor.apply(F::Left::from_bytes(left), F::Right::from_bytes(right));
					F::Result::append(&mut result, output, self.result_type);
				}
				_ => result.append_null(),
			}
		}
		result
	}

	fn apply_to_value_accessor_and_static_value(
		&self,
		accessor: &mut dyn ValueAccessor,
		left_attr: usize,
		right: &TypedValue<'_>,
	) -> ColumnVector {
		if RIGHT_NULLABLE && right.is_null() {
			return self.nulls(accessor.num_values());
		}
		let right = F::Right::from_typed(right);
		let mut result = ColumnVector::with_capacity(self.result_type, accessor.num_values());
		accessor.begin_iteration();
		while accessor.next() {
			match accessor.get_untyped_value(left_attr) {
				Some(left) => {
					let output = self.functor.apply(F::Left::from_bytes(left), right);
					F::Result::append(&mut result, output, self.result_type);
				}
				None => result.append_null(),
			}
		}
		result
	}

	fn apply_to_static_value_and_value_accessor(
		&self,
		left: &TypedValue<'_>,
		accessor: &mut dyn ValueAccessor,
		right_attr: usize,
	) -> ColumnVector {
		if LEFT_NULLABLE && left.is_null() {
			return self.nulls(accessor.num_values());
		}
		let left = F::Left::from_typed(left);
		let mut result = ColumnVector::with_capacity(self.result_type, accessor.num_values());
		accessor.begin_iteration();
		while accessor.next() {
			match accessor.get_untyped_value(right_attr) {
				Some(right) => {
					let output = self.functor.apply(left, F::Right::from_bytes(right));
					F::Result::append(&mut result, output, self.result_type);
				}
				None => result.append_null(),
			}
		}
		result
	}

	fn accumulate_value_accessor(
		&self,
		current: &TypedValue<'_>,
		accessor: &mut dyn ValueAccessor,
		attr: usize,
	) -> (TypedValue<'static>, usize) {
		if F::Left::KIND != F::Result::KIND || !F::Left::KIND.is_inline_pod() {
			unimplemented!("accumulation of {} into {}", F::Right::KIND, F::Result::KIND);
		}
		let mut accumulator = current.clone().into_owned();
		if accumulator.is_null() {
			return (accumulator, 0);
		}
		let mut count = 0;
		accessor.begin_iteration();
		while accessor.next() {
			let Some(right) = accessor.get_untyped_value(attr) else {
				continue;
			};
			let output = self.functor.apply(F::Left::from_typed(&accumulator), F::Right::from_bytes(right));
			accumulator = F::Result::into_typed(output, self.result_type);
			count += 1;
		}
		(accumulator, count)
	}
}

/// Boxes `functor` with the nullability branch chosen by `left` and `right`.
pub fn make_unchecked_binary<F: BinaryFunctor>(
	functor: F,
	left: &'static Type,
	right: &'static Type,
	result_type: &'static Type,
) -> Box<dyn UncheckedBinaryOperator> {
	debug_assert_eq!(F::Left::KIND, left.kind());
	debug_assert_eq!(F::Right::KIND, right.kind());
	match (left.is_nullable(), right.is_nullable()) {
		(false, false) => Box::new(UncheckedBinaryOperatorWrapper::<F, false, false>::new(functor, result_type)),
		(false, true) => Box::new(UncheckedBinaryOperatorWrapper::<F, false, true>::new(functor, result_type)),
		(true, false) => Box::new(UncheckedBinaryOperatorWrapper::<F, true, false>::new(functor, result_type)),
		(true, true) => Box::new(UncheckedBinaryOperatorWrapper::<F, true, true>::new(functor, result_type)),
	}
}
