// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use stratum_type::{Kind, Type, TypedValue, error::diagnostic::operation::not_applicable, return_error};

use crate::{
	native::{
		Arithmetic, DatetimeIntervalKind, DoubleKind, FloatKind, IntKind, IntervalKind, LongKind,
		NumericKind, YearMonthIntervalKind,
	},
	signature::OperationSignature,
	table::KindTable,
	unary::{UnaryFunctor, UnaryOperation, UnaryOperationId, UncheckedUnaryOperator, make_unchecked_unary},
};

pub struct NegateFunctor<K>(PhantomData<K>);

pub struct IntervalNegateFunctor<K>(PhantomData<K>);

pub struct AbsFunctor<K>(PhantomData<K>);

impl<K: NumericKind> UnaryFunctor for NegateFunctor<K> {
	type Argument = K;
	type Result = K;

	#[inline]
	fn apply(&self, argument: K::Value<'_>) -> K::Output {
		K::from_number(Arithmetic::neg(K::to_number(argument)))
	}
}

impl<K: IntervalKind> UnaryFunctor for IntervalNegateFunctor<K> {
	type Argument = K;
	type Result = K;

	#[inline]
	fn apply(&self, argument: K::Value<'_>) -> K::Output {
		K::from_count(K::count(argument).wrapping_neg())
	}
}

impl<K: NumericKind> UnaryFunctor for AbsFunctor<K> {
	type Argument = K;
	type Result = K;

	#[inline]
	fn apply(&self, argument: K::Value<'_>) -> K::Output {
		K::from_number(Arithmetic::abs(K::to_number(argument)))
	}
}

/// Negation and absolute value. The result type is the argument type.
pub struct ArithmeticUnaryOperation {
	id: UnaryOperationId,
	table: KindTable<1>,
}

impl ArithmeticUnaryOperation {
	pub fn negate() -> Self {
		let mut table = KindTable::new();
		for kind in [Kind::Int, Kind::Long, Kind::Float, Kind::Double, Kind::DatetimeInterval, Kind::YearMonthInterval] {
			table.push([kind], kind);
		}
		Self {
			id: UnaryOperationId::Negate,
			table,
		}
	}

	pub fn abs() -> Self {
		let mut table = KindTable::new();
		for kind in Kind::NUMERIC {
			table.push([kind], kind);
		}
		Self {
			id: UnaryOperationId::Abs,
			table,
		}
	}
}

impl UnaryOperation for ArithmeticUnaryOperation {
	fn id(&self) -> UnaryOperationId {
		self.id
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		self.table.signatures(self.name())
	}

	fn can_apply_to(&self, argument: &'static Type, _static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		if self.table.result_kind([argument.kind()]).is_none() {
			return_error!(not_applicable(self.name(), &[argument], None));
		}
		Ok(())
	}

	fn result_type(&self, argument: &'static Type, _static_arguments: &[TypedValue<'_>]) -> Option<&'static Type> {
		self.table.result_kind([argument.kind()]).map(|_| argument)
	}

	fn result_type_for_partial_argument_type(&self, argument: Option<&'static Type>) -> Option<&'static Type> {
		match argument {
			Some(argument) => self.result_type(argument, &[]),
			None => None,
		}
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
		let operator = match (self.id, argument.kind()) {
			(UnaryOperationId::Abs, Kind::Int) => make_unchecked_unary(AbsFunctor::<IntKind>(PhantomData), argument, argument),
			(UnaryOperationId::Abs, Kind::Long) => make_unchecked_unary(AbsFunctor::<LongKind>(PhantomData), argument, argument),
			(UnaryOperationId::Abs, Kind::Float) => make_unchecked_unary(AbsFunctor::<FloatKind>(PhantomData), argument, argument),
			(UnaryOperationId::Abs, Kind::Double) => make_unchecked_unary(AbsFunctor::<DoubleKind>(PhantomData), argument, argument),
			(UnaryOperationId::Negate, Kind::Int) => make_unchecked_unary(NegateFunctor::<IntKind>(PhantomData), argument, argument),
			(UnaryOperationId::Negate, Kind::Long) => make_unchecked_unary(NegateFunctor::<LongKind>(PhantomData), argument, argument),
			(UnaryOperationId::Negate, Kind::Float) => make_unchecked_unary(NegateFunctor::<FloatKind>(PhantomData), argument, argument),
			(UnaryOperationId::Negate, Kind::Double) => make_unchecked_unary(NegateFunctor::<DoubleKind>(PhantomData), argument, argument),
			(UnaryOperationId::Negate, Kind::DatetimeInterval) => {
				make_unchecked_unary(IntervalNegateFunctor::<DatetimeIntervalKind>(PhantomData), argument, argument)
			}
			(UnaryOperationId::Negate, Kind::YearMonthInterval) => {
				make_unchecked_unary(IntervalNegateFunctor::<YearMonthIntervalKind>(PhantomData), argument, argument)
			}
			_ => return_error!(not_applicable(self.name(), &[argument], None)),
		};
		Ok(operator)
	}
}
