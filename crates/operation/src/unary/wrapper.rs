// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use stratum_type::{ColumnVector, Type, TypedValue, ValueAccessor};

use crate::{
	native::{ArgumentKind, ResultKind},
	unary::UncheckedUnaryOperator,
};

/// Per-value body of a unary operator.
pub trait UnaryFunctor: Send + Sync + 'static {
	type Argument: ArgumentKind;
	type Result: ResultKind;

	fn apply(&self, argument: <Self::Argument as ArgumentKind>::Value<'_>) -> <Self::Result as ResultKind>::Output;
}

/// Lifts a [`UnaryFunctor`] to every application shape. `NULLABLE` is the
/// nullability of the argument type; non-nullable operators skip the NULL
/// checks on the typed-value path.
pub struct UncheckedUnaryOperatorWrapper<F, const NULLABLE: bool> {
	functor: F,
	result_type: &'static Type,
}

impl<F: UnaryFunctor, const NULLABLE: bool> UncheckedUnaryOperatorWrapper<F, NULLABLE> {
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
}

impl<F: UnaryFunctor, const NULLABLE: bool> UncheckedUnaryOperator for UncheckedUnaryOperatorWrapper<F, NULLABLE> {
	fn result_type(&self) -> &'static Type {
		self.result_type
	}

	fn apply_to_typed_value(&self, argument: &TypedValue<'_>) -> TypedValue<'static> {
		if NULLABLE && argument.is_null() {
			return self.null();
		}
		F::Result::into_typed(self.functor.apply(F::Argument::from_typed(argument)), self.result_type)
	}

	fn apply_to_data(&self, argument: Option<&[u8]>) -> TypedValue<'static> {
		match argument {
			Some(bytes) => F::Result::into_typed(self.functor.apply(F::Argument::from_bytes(bytes)), self.result_type),
			None => {
				debug_assert!(NULLABLE, "NULL passed to an operator over a non-nullable type");
				self.null()
			}
		}
	}

	fn apply_to_value_accessor(&self, accessor: &mut dyn ValueAccessor, attr: usize) -> ColumnVector {
		let mut result = ColumnVector::with_capacity(self.result_type, accessor.num_values());
		accessor.begin_iteration();
		while accessor.next() {
			match accessor.get_untyped_value(attr) {
				Some(bytes) => {
					let output = self.functor.apply(F::Argument::from_bytes(bytes));
					F::Result::append(&mut result, output, self.result_type);
				}
				None => result.append_null(),
			}
		}
		result
	}
}

/// Boxes `functor` with the nullability branch chosen by `argument`.
pub fn make_unchecked_unary<F: UnaryFunctor>(
	functor: F,
	argument: &'static Type,
	result_type: &'static Type,
) -> Box<dyn UncheckedUnaryOperator> {
	debug_assert_eq!(F::Argument::KIND, argument.kind());
	if argument.is_nullable() {
		Box::new(UncheckedUnaryOperatorWrapper::<F, true>::new(functor, result_type))
	} else {
		Box::new(UncheckedUnaryOperatorWrapper::<F, false>::new(functor, result_type))
	}
}
