// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use num_traits::Float;
use stratum_type::{Kind, Type, TypedValue, error::diagnostic::operation::not_applicable, return_error};

use crate::{
	native::{DoubleKind, FloatKind, FloatingKind},
	signature::OperationSignature,
	table::KindTable,
	unary::{UnaryFunctor, UnaryOperation, UnaryOperationId, UncheckedUnaryOperator, make_unchecked_unary},
};

/// Applies a `libm`-style function to a floating-point argument.
pub struct FloatingFunctor<K: FloatingKind> {
	function: fn(K::Real) -> K::Real,
	_kind: PhantomData<K>,
}

impl<K: FloatingKind> FloatingFunctor<K> {
	pub fn new(function: fn(K::Real) -> K::Real) -> Self {
		Self {
			function,
			_kind: PhantomData,
		}
	}
}

impl<K: FloatingKind> UnaryFunctor for FloatingFunctor<K> {
	type Argument = K;
	type Result = K;

	#[inline]
	fn apply(&self, argument: K::Value<'_>) -> K::Output {
		K::from_real((self.function)(K::to_real(argument)))
	}
}

fn function_for<R: Float>(id: UnaryOperationId) -> Option<fn(R) -> R> {
	let function: fn(R) -> R = match id {
		UnaryOperationId::Sqrt => R::sqrt,
		UnaryOperationId::Exp => R::exp,
		UnaryOperationId::Ln => R::ln,
		UnaryOperationId::Sin => R::sin,
		UnaryOperationId::Cos => R::cos,
		UnaryOperationId::Tan => R::tan,
		UnaryOperationId::Floor => R::floor,
		UnaryOperationId::Ceil => R::ceil,
		_ => return None,
	};
	Some(function)
}

/// `sqrt`, `exp`, `ln`, `sin`, `cos`, `tan`, `floor` and `ceil` over Float
/// and Double.
pub struct CmathUnaryOperation {
	id: UnaryOperationId,
	table: KindTable<1>,
}

impl CmathUnaryOperation {
	pub const IDS: [UnaryOperationId; 8] = [
		UnaryOperationId::Sqrt,
		UnaryOperationId::Exp,
		UnaryOperationId::Ln,
		UnaryOperationId::Sin,
		UnaryOperationId::Cos,
		UnaryOperationId::Tan,
		UnaryOperationId::Floor,
		UnaryOperationId::Ceil,
	];

	pub fn new(id: UnaryOperationId) -> Self {
		debug_assert!(Self::IDS.contains(&id));
		let mut table = KindTable::new();
		table.push([Kind::Float], Kind::Float);
		table.push([Kind::Double], Kind::Double);
		Self {
			id,
			table,
		}
	}
}

impl UnaryOperation for CmathUnaryOperation {
	fn id(&self) -> UnaryOperationId {
		self.id
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		self.table.signatures(self.name())
	}

	fn can_apply_to(&self, argument: &'static Type, _static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		if !argument.kind().is_floating_point() {
			return_error!(not_applicable(self.name(), &[argument], Some("expected a Float or Double argument".to_string())));
		}
		Ok(())
	}

	fn result_type(&self, argument: &'static Type, _static_arguments: &[TypedValue<'_>]) -> Option<&'static Type> {
		argument.kind().is_floating_point().then_some(argument)
	}

	fn result_type_for_partial_argument_type(&self, argument: Option<&'static Type>) -> Option<&'static Type> {
		argument.and_then(|argument| self.result_type(argument, &[]))
	}

	fn partial_type_signature_is_plausible(&self, result: Option<&Type>, argument: Option<&Type>) -> bool {
		self.table.plausible(result, [argument])
	}

	fn push_down_type_hint(&self, result_hint: Option<&Type>) -> Option<&'static Type> {
		let [argument] = self.table.push_down_types(result_hint);
		argument
	}

	fn make_unchecked_unary_operator(
		&self,
		argument: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<Box<dyn UncheckedUnaryOperator>> {
		self.can_apply_to(argument, static_arguments)?;
		let (float, double) = match (function_for::<f32>(self.id), function_for::<f64>(self.id)) {
			(Some(float), Some(double)) => (float, double),
			_ => return_error!(not_applicable(self.name(), &[argument], None)),
		};
		Ok(match argument.kind() {
			Kind::Float => make_unchecked_unary(FloatingFunctor::<FloatKind>::new(float), argument, argument),
			_ => make_unchecked_unary(FloatingFunctor::<DoubleKind>::new(double), argument, argument),
		})
	}
}

#[cfg(test)]
mod tests {
	use stratum_type::{ColumnVector, TypeFactory};

	use super::*;

	fn apply(id: UnaryOperationId, value: f64) -> f64 {
		let double = TypeFactory::get(Kind::Double, false);
		CmathUnaryOperation::new(id).apply_checked(&TypedValue::Double(value), double, &[]).unwrap().literal::<f64>()
	}

	#[test]
	fn test_functions() {
		assert_eq!(apply(UnaryOperationId::Sqrt, 16.0), 4.0);
		assert_eq!(apply(UnaryOperationId::Floor, -1.5), -2.0);
		assert_eq!(apply(UnaryOperationId::Ceil, -1.5), -1.0);
		assert_eq!(apply(UnaryOperationId::Ln, 1.0), 0.0);
		assert!(apply(UnaryOperationId::Sqrt, -1.0).is_nan());
	}

	#[test]
	fn test_float_column() {
		let float = TypeFactory::get(Kind::Float, true);
		let column = ColumnVector::from_values(float, [TypedValue::Float(2.25), TypedValue::Null(Kind::Float)]);
		let op = CmathUnaryOperation::new(UnaryOperationId::Sqrt);
		let result = op.make_unchecked_unary_operator(float, &[]).unwrap().apply_to_column_vector(&column);
		assert_eq!(result.native_value::<f32>(0), Some(1.5));
		assert!(result.is_null(1));
	}

	#[test]
	fn test_rejects_integers() {
		let op = CmathUnaryOperation::new(UnaryOperationId::Exp);
		assert!(op.can_apply_to(TypeFactory::get(Kind::Int, false), &[]).is_err());
		assert_eq!(op.push_down_type_hint(Some(TypeFactory::get(Kind::Float, false))), Some(TypeFactory::get(Kind::Float, false)));
	}
}
