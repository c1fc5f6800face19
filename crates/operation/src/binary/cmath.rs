// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use num_traits::Float;
use stratum_type::{Kind, Type, TypeFactory, TypedValue, error::diagnostic::operation::not_applicable, return_error};

use crate::{
	binary::{BinaryFunctor, BinaryOperation, BinaryOperationId, UncheckedBinaryOperator, make_unchecked_binary},
	native::{DoubleKind, FloatKind, FloatingKind},
	signature::OperationSignature,
	table::KindTable,
};

pub struct FloatingBinaryFunctor<K: FloatingKind> {
	function: fn(K::Real, K::Real) -> K::Real,
	_kind: PhantomData<K>,
}

impl<K: FloatingKind> BinaryFunctor for FloatingBinaryFunctor<K> {
	type Left = K;
	type Right = K;
	type Result = K;

	#[inline]
	fn apply(&self, left: K::Value<'_>, right: K::Value<'_>) -> K::Output {
		K::from_real((self.function)(K::to_real(left), K::to_real(right)))
	}
}

fn function_for<R: Float>(id: BinaryOperationId) -> Option<fn(R, R) -> R> {
	let function: fn(R, R) -> R = match id {
		BinaryOperationId::Pow => R::powf,
		BinaryOperationId::Atan2 => R::atan2,
		_ => return None,
	};
	Some(function)
}

/// `pow` and `atan2` over two Floats or two Doubles.
pub struct CmathBinaryOperation {
	id: BinaryOperationId,
	table: KindTable<2>,
}

impl CmathBinaryOperation {
	pub fn new(id: BinaryOperationId) -> Self {
		debug_assert!(matches!(id, BinaryOperationId::Pow | BinaryOperationId::Atan2));
		let mut table = KindTable::new();
		table.push([Kind::Float, Kind::Float], Kind::Float);
		table.push([Kind::Double, Kind::Double], Kind::Double);
		Self {
			id,
			table,
		}
	}

	fn functor<K: FloatingKind>(&self, function: Option<fn(K::Real, K::Real) -> K::Real>) -> Option<FloatingBinaryFunctor<K>> {
		function.map(|function| FloatingBinaryFunctor {
			function,
			_kind: PhantomData,
		})
	}
}

impl BinaryOperation for CmathBinaryOperation {
	fn id(&self) -> BinaryOperationId {
		self.id
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		self.table.signatures(self.name())
	}

	fn can_apply_to(&self, left: &'static Type, right: &'static Type, _static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		if self.table.result_kind([left.kind(), right.kind()]).is_none() {
			return_error!(not_applicable(
				self.name(),
				&[left, right],
				Some("expected two Float or two Double arguments".to_string())
			));
		}
		Ok(())
	}

	fn result_type(&self, left: &'static Type, right: &'static Type, _static_arguments: &[TypedValue<'_>]) -> Option<&'static Type> {
		let kind = self.table.result_kind([left.kind(), right.kind()])?;
		TypeFactory::try_get(kind, left.is_nullable() || right.is_nullable()).ok()
	}

	fn result_type_for_partial_argument_types(&self, left: Option<&'static Type>, right: Option<&'static Type>) -> Option<&'static Type> {
		self.table.partial_result_type([left, right])
	}

	fn partial_type_signature_is_plausible(&self, result: Option<&Type>, left: Option<&Type>, right: Option<&Type>) -> bool {
		self.table.plausible(result, [left, right])
	}

	fn push_down_type_hint(&self, result_hint: Option<&Type>) -> (Option<&'static Type>, Option<&'static Type>) {
		let [left, right] = self.table.push_down_types(result_hint);
		(left, right)
	}

	fn make_unchecked_binary_operator(
		&self,
		left: &'static Type,
		right: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<Box<dyn UncheckedBinaryOperator>> {
		self.can_apply_to(left, right, static_arguments)?;
		let operator = match (self.result_type(left, right, static_arguments), left.kind()) {
			(Some(result), Kind::Float) => self
				.functor::<FloatKind>(function_for(self.id))
				.map(|functor| make_unchecked_binary(functor, left, right, result)),
			(Some(result), _) => self
				.functor::<DoubleKind>(function_for(self.id))
				.map(|functor| make_unchecked_binary(functor, left, right, result)),
			(None, _) => None,
		};
		match operator {
			Some(operator) => Ok(operator),
			None => return_error!(not_applicable(self.name(), &[left, right], None)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pow() {
		let double = TypeFactory::get(Kind::Double, false);
		let pow = CmathBinaryOperation::new(BinaryOperationId::Pow);
		let value = pow.apply_checked(&TypedValue::Double(2.0), double, &TypedValue::Double(10.0), double, &[]).unwrap();
		assert_eq!(value.literal::<f64>(), 1024.0);
	}

	#[test]
	fn test_atan2_float() {
		let float = TypeFactory::get(Kind::Float, true);
		let atan2 = CmathBinaryOperation::new(BinaryOperationId::Atan2);
		let operator = atan2.make_unchecked_binary_operator(float, float, &[]).unwrap();
		let value = operator.apply_to_typed_values(&TypedValue::Float(1.0), &TypedValue::Float(1.0));
		assert!((value.literal::<f32>() - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
		assert!(operator.apply_to_typed_values(&TypedValue::Null(Kind::Float), &TypedValue::Float(1.0)).is_null());
	}

	#[test]
	fn test_mixed_widths_rejected() {
		let pow = CmathBinaryOperation::new(BinaryOperationId::Pow);
		let float = TypeFactory::get(Kind::Float, false);
		let double = TypeFactory::get(Kind::Double, false);
		assert_eq!(pow.can_apply_to(float, double, &[]).unwrap_err().code(), "OPERATION_003");
	}
}
