// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(rustfmt, rustfmt_skip)]

use std::marker::PhantomData;

use num_traits::AsPrimitive;
use stratum_type::{
	DateLit, DatetimeIntervalLit, DatetimeLit, Kind, Type, TypeFactory, TypedValue, YearMonthIntervalLit,
	error::diagnostic::operation::not_applicable, return_error,
};

use crate::{
	binary::{BinaryFunctor, BinaryOperation, BinaryOperationId, Swapped, UncheckedBinaryOperator, make_unchecked_binary},
	native::{
		Arithmetic, DateKind, DatetimeIntervalKind, DatetimeKind, DoubleKind, FloatKind, InlineKind, IntKind,
		IntervalKind, LongKind, NumericKind, YearMonthIntervalKind,
	},
	signature::OperationSignature,
	table::KindTable,
};

/// Type-level choice of arithmetic operator.
pub trait ArithmeticOp: Send + Sync + 'static {
	fn apply<N: Arithmetic>(left: N, right: N) -> N;
}

pub struct AddOp;
pub struct SubtractOp;
pub struct MultiplyOp;
pub struct DivideOp;
pub struct ModuloOp;

impl ArithmeticOp for AddOp { #[inline] fn apply<N: Arithmetic>(l: N, r: N) -> N { Arithmetic::add(l, r) } }
impl ArithmeticOp for SubtractOp { #[inline] fn apply<N: Arithmetic>(l: N, r: N) -> N { Arithmetic::sub(l, r) } }
impl ArithmeticOp for MultiplyOp { #[inline] fn apply<N: Arithmetic>(l: N, r: N) -> N { Arithmetic::mul(l, r) } }
impl ArithmeticOp for DivideOp { #[inline] fn apply<N: Arithmetic>(l: N, r: N) -> N { Arithmetic::div(l, r) } }
impl ArithmeticOp for ModuloOp { #[inline] fn apply<N: Arithmetic>(l: N, r: N) -> N { Arithmetic::rem(l, r) } }

/// Both arguments converted to the result's native number.
pub struct NumericFunctor<Op, L, R, O>(PhantomData<(Op, L, R, O)>);

impl<Op, L, R, O> BinaryFunctor for NumericFunctor<Op, L, R, O>
where
	Op: ArithmeticOp,
	L: NumericKind,
	R: NumericKind,
	O: NumericKind,
	L::Number: AsPrimitive<O::Number>,
	R::Number: AsPrimitive<O::Number>,
{
	type Left = L;
	type Right = R;
	type Result = O;

	#[inline]
	fn apply(&self, left: L::Value<'_>, right: R::Value<'_>) -> O::Output {
		let left = <L::Number as AsPrimitive<O::Number>>::as_(L::to_number(left));
		let right = <R::Number as AsPrimitive<O::Number>>::as_(R::to_number(right));
		O::from_number(Op::apply(left, right))
	}
}

/// Interval ± interval of the same kind.
pub struct IntervalFunctor<Op, K>(PhantomData<(Op, K)>);

impl<Op: ArithmeticOp, K: IntervalKind> BinaryFunctor for IntervalFunctor<Op, K> {
	type Left = K;
	type Right = K;
	type Result = K;

	#[inline]
	fn apply(&self, left: K::Value<'_>, right: K::Value<'_>) -> K::Output {
		K::from_count(Op::apply(K::count(left), K::count(right)))
	}
}

/// Interval scaled by a number. Integer factors use wrapping integer
/// arithmetic on the count; floating factors round toward zero.
pub struct IntervalScaleFunctor<Op, K, N>(PhantomData<(Op, K, N)>);

impl<Op: ArithmeticOp, K: IntervalKind, N: NumericKind> BinaryFunctor for IntervalScaleFunctor<Op, K, N> {
	type Left = K;
	type Right = N;
	type Result = K;

	#[inline]
	fn apply(&self, left: K::Value<'_>, right: N::Value<'_>) -> K::Output {
		let count = K::count(left);
		let factor = N::to_number(right);
		if <N::Number as Arithmetic>::INTEGER {
			K::from_count(Op::apply(count, AsPrimitive::<i64>::as_(factor)))
		} else {
			K::from_count(Op::apply(count as f64, AsPrimitive::<f64>::as_(factor)) as i64)
		}
	}
}

/// Datetime ± DatetimeInterval; ticks wrap.
pub struct DatetimeShiftFunctor<Op>(PhantomData<Op>);

impl<Op: ArithmeticOp> BinaryFunctor for DatetimeShiftFunctor<Op> {
	type Left = DatetimeKind;
	type Right = DatetimeIntervalKind;
	type Result = DatetimeKind;

	#[inline]
	fn apply(&self, left: DatetimeLit, right: DatetimeIntervalLit) -> DatetimeLit {
		DatetimeLit::from_ticks(Op::apply(left.ticks, right.ticks))
	}
}

pub struct DatetimeDifferenceFunctor;

impl BinaryFunctor for DatetimeDifferenceFunctor {
	type Left = DatetimeKind;
	type Right = DatetimeKind;
	type Result = DatetimeIntervalKind;

	#[inline]
	fn apply(&self, left: DatetimeLit, right: DatetimeLit) -> DatetimeIntervalLit {
		DatetimeIntervalLit::from_ticks(left.ticks.wrapping_sub(right.ticks))
	}
}

/// Dates and datetimes shifted by whole calendar months. Results outside
/// the representable range saturate to the first or last representable day.
pub trait CalendarKind: InlineKind {
	fn add_months(value: Self::Native, months: i64) -> Self::Native;
}

impl CalendarKind for DateKind {
	fn add_months(value: DateLit, months: i64) -> DateLit {
		match value.add_months(months) {
			Some(date) => date,
			None if months < 0 => DateLit::MIN,
			None => DateLit::MAX,
		}
	}
}

impl CalendarKind for DatetimeKind {
	fn add_months(value: DatetimeLit, months: i64) -> DatetimeLit {
		match value.add_months(months) {
			Some(datetime) => datetime,
			None if months < 0 => DatetimeLit::from_date(DateLit::MIN),
			None => DatetimeLit::from_date(DateLit::MAX),
		}
	}
}

pub struct MonthShiftFunctor<K, const SUBTRACT: bool>(PhantomData<K>);

impl<K: CalendarKind, const SUBTRACT: bool> BinaryFunctor for MonthShiftFunctor<K, SUBTRACT> {
	type Left = K;
	type Right = YearMonthIntervalKind;
	type Result = K;

	#[inline]
	fn apply(&self, left: K::Value<'_>, right: YearMonthIntervalLit) -> K::Output {
		let months = if SUBTRACT { right.months.saturating_neg() } else { right.months };
		K::from_native(K::add_months(K::to_native(left), months))
	}
}

fn numeric<Op, L, R, O>(left: &'static Type, right: &'static Type, result: &'static Type) -> Box<dyn UncheckedBinaryOperator>
where
	Op: ArithmeticOp,
	L: NumericKind,
	R: NumericKind,
	O: NumericKind,
	L::Number: AsPrimitive<O::Number>,
	R::Number: AsPrimitive<O::Number>,
{
	make_unchecked_binary(NumericFunctor::<Op, L, R, O>(PhantomData), left, right, result)
}

/// One arm per numeric pair; the result marker is the numeric unifier.
macro_rules! numeric_dispatch {
	($op:ty, $left:expr, $right:expr, $result:expr) => {
		match ($left.kind(), $right.kind()) {
			(Kind::Int,    Kind::Int)    => Some(numeric::<$op, IntKind,    IntKind,    IntKind>($left, $right, $result)),
			(Kind::Int,    Kind::Long)   => Some(numeric::<$op, IntKind,    LongKind,   LongKind>($left, $right, $result)),
			(Kind::Int,    Kind::Float)  => Some(numeric::<$op, IntKind,    FloatKind,  FloatKind>($left, $right, $result)),
			(Kind::Int,    Kind::Double) => Some(numeric::<$op, IntKind,    DoubleKind, DoubleKind>($left, $right, $result)),
			(Kind::Long,   Kind::Int)    => Some(numeric::<$op, LongKind,   IntKind,    LongKind>($left, $right, $result)),
			(Kind::Long,   Kind::Long)   => Some(numeric::<$op, LongKind,   LongKind,   LongKind>($left, $right, $result)),
			(Kind::Long,   Kind::Float)  => Some(numeric::<$op, LongKind,   FloatKind,  DoubleKind>($left, $right, $result)),
			(Kind::Long,   Kind::Double) => Some(numeric::<$op, LongKind,   DoubleKind, DoubleKind>($left, $right, $result)),
			(Kind::Float,  Kind::Int)    => Some(numeric::<$op, FloatKind,  IntKind,    FloatKind>($left, $right, $result)),
			(Kind::Float,  Kind::Long)   => Some(numeric::<$op, FloatKind,  LongKind,   DoubleKind>($left, $right, $result)),
			(Kind::Float,  Kind::Float)  => Some(numeric::<$op, FloatKind,  FloatKind,  FloatKind>($left, $right, $result)),
			(Kind::Float,  Kind::Double) => Some(numeric::<$op, FloatKind,  DoubleKind, DoubleKind>($left, $right, $result)),
			(Kind::Double, Kind::Int)    => Some(numeric::<$op, DoubleKind, IntKind,    DoubleKind>($left, $right, $result)),
			(Kind::Double, Kind::Long)   => Some(numeric::<$op, DoubleKind, LongKind,   DoubleKind>($left, $right, $result)),
			(Kind::Double, Kind::Float)  => Some(numeric::<$op, DoubleKind, FloatKind,  DoubleKind>($left, $right, $result)),
			(Kind::Double, Kind::Double) => Some(numeric::<$op, DoubleKind, DoubleKind, DoubleKind>($left, $right, $result)),
			_ => None,
		}
	};
}

/// Interval × number and interval ÷ number for every numeric factor kind.
macro_rules! scale_dispatch {
	($op:ty, $interval:ty, $factor:expr, |$functor:ident| $make:expr) => {
		match $factor {
			Kind::Int    => { let $functor = IntervalScaleFunctor::<$op, $interval, IntKind>(PhantomData); Some($make) }
			Kind::Long   => { let $functor = IntervalScaleFunctor::<$op, $interval, LongKind>(PhantomData); Some($make) }
			Kind::Float  => { let $functor = IntervalScaleFunctor::<$op, $interval, FloatKind>(PhantomData); Some($make) }
			Kind::Double => { let $functor = IntervalScaleFunctor::<$op, $interval, DoubleKind>(PhantomData); Some($make) }
			_ => None,
		}
	};
}

/// `+`, `-`, `*`, `/` and `%`. Integer arithmetic wraps; division and
/// modulo of integers by zero is a caller precondition.
pub struct ArithmeticBinaryOperation {
	id: BinaryOperationId,
	table: KindTable<2>,
}

impl ArithmeticBinaryOperation {
	pub fn new(id: BinaryOperationId) -> Self {
		use Kind::*;

		let mut table = KindTable::new();
		for left in Kind::NUMERIC {
			for right in Kind::NUMERIC {
				if let Some(result) = TypeFactory::numeric_unifier(left, right) {
					table.push([left, right], result);
				}
			}
		}
		match id {
			BinaryOperationId::Add => {
				table.push([Datetime, DatetimeInterval], Datetime);
				table.push([DatetimeInterval, Datetime], Datetime);
				table.push([Datetime, YearMonthInterval], Datetime);
				table.push([YearMonthInterval, Datetime], Datetime);
				table.push([Date, YearMonthInterval], Date);
				table.push([YearMonthInterval, Date], Date);
				table.push([DatetimeInterval, DatetimeInterval], DatetimeInterval);
				table.push([YearMonthInterval, YearMonthInterval], YearMonthInterval);
			}
			BinaryOperationId::Subtract => {
				table.push([Datetime, Datetime], DatetimeInterval);
				table.push([Datetime, DatetimeInterval], Datetime);
				table.push([Datetime, YearMonthInterval], Datetime);
				table.push([Date, YearMonthInterval], Date);
				table.push([DatetimeInterval, DatetimeInterval], DatetimeInterval);
				table.push([YearMonthInterval, YearMonthInterval], YearMonthInterval);
			}
			BinaryOperationId::Multiply => {
				for number in Kind::NUMERIC {
					for interval in [DatetimeInterval, YearMonthInterval] {
						table.push([interval, number], interval);
						table.push([number, interval], interval);
					}
				}
			}
			BinaryOperationId::Divide => {
				for number in Kind::NUMERIC {
					for interval in [DatetimeInterval, YearMonthInterval] {
						table.push([interval, number], interval);
					}
				}
			}
			_ => {}
		}
		Self { id, table }
	}

	pub fn add() -> Self { Self::new(BinaryOperationId::Add) }

	pub fn subtract() -> Self { Self::new(BinaryOperationId::Subtract) }

	pub fn multiply() -> Self { Self::new(BinaryOperationId::Multiply) }

	pub fn divide() -> Self { Self::new(BinaryOperationId::Divide) }

	pub fn modulo() -> Self { Self::new(BinaryOperationId::Modulo) }

	fn make(&self, left: &'static Type, right: &'static Type, result: &'static Type) -> Option<Box<dyn UncheckedBinaryOperator>> {
		use BinaryOperationId as Id;
		use Kind::*;

		match (self.id, left.kind(), right.kind()) {
			(Id::Add, Datetime, DatetimeInterval) => Some(make_unchecked_binary(DatetimeShiftFunctor::<AddOp>(PhantomData), left, right, result)),
			(Id::Add, DatetimeInterval, Datetime) => Some(make_unchecked_binary(Swapped(DatetimeShiftFunctor::<AddOp>(PhantomData)), left, right, result)),
			(Id::Add, Datetime, YearMonthInterval) => Some(make_unchecked_binary(MonthShiftFunctor::<DatetimeKind, false>(PhantomData), left, right, result)),
			(Id::Add, YearMonthInterval, Datetime) => Some(make_unchecked_binary(Swapped(MonthShiftFunctor::<DatetimeKind, false>(PhantomData)), left, right, result)),
			(Id::Add, Date, YearMonthInterval) => Some(make_unchecked_binary(MonthShiftFunctor::<DateKind, false>(PhantomData), left, right, result)),
			(Id::Add, YearMonthInterval, Date) => Some(make_unchecked_binary(Swapped(MonthShiftFunctor::<DateKind, false>(PhantomData)), left, right, result)),
			(Id::Add, DatetimeInterval, DatetimeInterval) => Some(make_unchecked_binary(IntervalFunctor::<AddOp, DatetimeIntervalKind>(PhantomData), left, right, result)),
			(Id::Add, YearMonthInterval, YearMonthInterval) => Some(make_unchecked_binary(IntervalFunctor::<AddOp, YearMonthIntervalKind>(PhantomData), left, right, result)),

			(Id::Subtract, Datetime, Datetime) => Some(make_unchecked_binary(DatetimeDifferenceFunctor, left, right, result)),
			(Id::Subtract, Datetime, DatetimeInterval) => Some(make_unchecked_binary(DatetimeShiftFunctor::<SubtractOp>(PhantomData), left, right, result)),
			(Id::Subtract, Datetime, YearMonthInterval) => Some(make_unchecked_binary(MonthShiftFunctor::<DatetimeKind, true>(PhantomData), left, right, result)),
			(Id::Subtract, Date, YearMonthInterval) => Some(make_unchecked_binary(MonthShiftFunctor::<DateKind, true>(PhantomData), left, right, result)),
			(Id::Subtract, DatetimeInterval, DatetimeInterval) => Some(make_unchecked_binary(IntervalFunctor::<SubtractOp, DatetimeIntervalKind>(PhantomData), left, right, result)),
			(Id::Subtract, YearMonthInterval, YearMonthInterval) => Some(make_unchecked_binary(IntervalFunctor::<SubtractOp, YearMonthIntervalKind>(PhantomData), left, right, result)),

			(Id::Multiply, DatetimeInterval, factor) => scale_dispatch!(MultiplyOp, DatetimeIntervalKind, factor, |f| make_unchecked_binary(f, left, right, result)),
			(Id::Multiply, YearMonthInterval, factor) => scale_dispatch!(MultiplyOp, YearMonthIntervalKind, factor, |f| make_unchecked_binary(f, left, right, result)),
			(Id::Multiply, factor, DatetimeInterval) => scale_dispatch!(MultiplyOp, DatetimeIntervalKind, factor, |f| make_unchecked_binary(Swapped(f), left, right, result)),
			(Id::Multiply, factor, YearMonthInterval) => scale_dispatch!(MultiplyOp, YearMonthIntervalKind, factor, |f| make_unchecked_binary(Swapped(f), left, right, result)),
			(Id::Divide, DatetimeInterval, factor) => scale_dispatch!(DivideOp, DatetimeIntervalKind, factor, |f| make_unchecked_binary(f, left, right, result)),
			(Id::Divide, YearMonthInterval, factor) => scale_dispatch!(DivideOp, YearMonthIntervalKind, factor, |f| make_unchecked_binary(f, left, right, result)),

			(Id::Add, _, _) => numeric_dispatch!(AddOp, left, right, result),
			(Id::Subtract, _, _) => numeric_dispatch!(SubtractOp, left, right, result),
			(Id::Multiply, _, _) => numeric_dispatch!(MultiplyOp, left, right, result),
			(Id::Divide, _, _) => numeric_dispatch!(DivideOp, left, right, result),
			(Id::Modulo, _, _) => numeric_dispatch!(ModuloOp, left, right, result),
			_ => None,
		}
	}
}

impl BinaryOperation for ArithmeticBinaryOperation {
	fn id(&self) -> BinaryOperationId {
		self.id
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		self.table.signatures(self.name())
	}

	fn can_apply_to(&self, left: &'static Type, right: &'static Type, _static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		if self.table.result_kind([left.kind(), right.kind()]).is_none() {
			return_error!(not_applicable(self.name(), &[left, right], None));
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
		let operator = self.result_type(left, right, static_arguments).and_then(|result| self.make(left, right, result));
		match operator {
			Some(operator) => Ok(operator),
			None => return_error!(not_applicable(self.name(), &[left, right], None)),
		}
	}
}
