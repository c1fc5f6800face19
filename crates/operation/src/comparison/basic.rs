// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(rustfmt, rustfmt_skip)]

use std::marker::PhantomData;

use num_traits::AsPrimitive;
use stratum_type::{Kind, Type};

use crate::{
	comparison::{ComparisonFunctor, ComparisonId, UncheckedComparator, make_comparator},
	native::{
		Arithmetic, AsciiKind, BoolKind, CharKind, DateKind, DatetimeIntervalKind, DatetimeKind, DoubleKind,
		FloatKind, InlineKind, IntKind, LongKind, NumericKind, VarCharKind, YearMonthIntervalKind,
	},
};

/// Non-numeric inline kinds, comparable only with themselves.
pub(crate) const SAME_KIND: [Kind; 5] = [
	Kind::Bool,
	Kind::Date,
	Kind::Datetime,
	Kind::DatetimeInterval,
	Kind::YearMonthInterval,
];

pub(crate) fn is_comparable(left: Kind, right: Kind) -> bool {
	(left.is_numeric() && right.is_numeric())
		|| (left.is_ascii_string() && right.is_ascii_string())
		|| (left == right && SAME_KIND.contains(&left))
}

/// Both operands converted to `N`, the native number of their unifier.
pub struct NumericComparator<L, R, N> {
	id: ComparisonId,
	_kinds: PhantomData<(L, R, N)>,
}

impl<L, R, N> ComparisonFunctor for NumericComparator<L, R, N>
where
	L: NumericKind,
	R: NumericKind,
	N: Arithmetic,
	L::Number: AsPrimitive<N>,
	R::Number: AsPrimitive<N>,
{
	type Left = L;
	type Right = R;

	#[inline]
	fn compare(&self, left: L::Value<'_>, right: R::Value<'_>) -> bool {
		let left = <L::Number as AsPrimitive<N>>::as_(L::to_number(left));
		let right = <R::Number as AsPrimitive<N>>::as_(R::to_number(right));
		self.id.holds(left.partial_cmp(&right))
	}
}

/// Same-kind inline literals, ordered by their native representation.
pub struct LiteralComparator<K> {
	id: ComparisonId,
	_kind: PhantomData<K>,
}

impl<K: InlineKind> ComparisonFunctor for LiteralComparator<K> {
	type Left = K;
	type Right = K;

	#[inline]
	fn compare(&self, left: K::Value<'_>, right: K::Value<'_>) -> bool {
		self.id.holds(K::to_native(left).partial_cmp(&K::to_native(right)))
	}
}

/// Byte-wise string order; a proper prefix sorts first.
pub struct StringComparator<L, R> {
	id: ComparisonId,
	_kinds: PhantomData<(L, R)>,
}

impl<L: AsciiKind, R: AsciiKind> ComparisonFunctor for StringComparator<L, R> {
	type Left = L;
	type Right = R;

	#[inline]
	fn compare(&self, left: L::Value<'_>, right: R::Value<'_>) -> bool {
		self.id.holds(Some(L::bytes(left).cmp(R::bytes(right))))
	}
}

fn numeric<L, R, N>(id: ComparisonId, left: &'static Type, right: &'static Type) -> Box<dyn UncheckedComparator>
where
	L: NumericKind,
	R: NumericKind,
	N: Arithmetic,
	L::Number: AsPrimitive<N>,
	R::Number: AsPrimitive<N>,
{
	make_comparator(NumericComparator::<L, R, N> { id, _kinds: PhantomData }, left, right)
}

fn literal<K: InlineKind>(id: ComparisonId, left: &'static Type, right: &'static Type) -> Box<dyn UncheckedComparator> {
	make_comparator(LiteralComparator::<K> { id, _kind: PhantomData }, left, right)
}

fn string<L: AsciiKind, R: AsciiKind>(id: ComparisonId, left: &'static Type, right: &'static Type) -> Box<dyn UncheckedComparator> {
	make_comparator(StringComparator::<L, R> { id, _kinds: PhantomData }, left, right)
}

pub(crate) fn make_basic_comparator(id: ComparisonId, left: &'static Type, right: &'static Type) -> Option<Box<dyn UncheckedComparator>> {
	use Kind::*;

	debug_assert!(!id.is_pattern_matching());
	let comparator = match (left.kind(), right.kind()) {
		(Int,    Int)    => numeric::<IntKind,    IntKind,    i32>(id, left, right),
		(Int,    Long)   => numeric::<IntKind,    LongKind,   i64>(id, left, right),
		(Int,    Float)  => numeric::<IntKind,    FloatKind,  f32>(id, left, right),
		(Int,    Double) => numeric::<IntKind,    DoubleKind, f64>(id, left, right),
		(Long,   Int)    => numeric::<LongKind,   IntKind,    i64>(id, left, right),
		(Long,   Long)   => numeric::<LongKind,   LongKind,   i64>(id, left, right),
		(Long,   Float)  => numeric::<LongKind,   FloatKind,  f64>(id, left, right),
		(Long,   Double) => numeric::<LongKind,   DoubleKind, f64>(id, left, right),
		(Float,  Int)    => numeric::<FloatKind,  IntKind,    f32>(id, left, right),
		(Float,  Long)   => numeric::<FloatKind,  LongKind,   f64>(id, left, right),
		(Float,  Float)  => numeric::<FloatKind,  FloatKind,  f32>(id, left, right),
		(Float,  Double) => numeric::<FloatKind,  DoubleKind, f64>(id, left, right),
		(Double, Int)    => numeric::<DoubleKind, IntKind,    f64>(id, left, right),
		(Double, Long)   => numeric::<DoubleKind, LongKind,   f64>(id, left, right),
		(Double, Float)  => numeric::<DoubleKind, FloatKind,  f64>(id, left, right),
		(Double, Double) => numeric::<DoubleKind, DoubleKind, f64>(id, left, right),

		(Bool,              Bool)              => literal::<BoolKind>(id, left, right),
		(Date,              Date)              => literal::<DateKind>(id, left, right),
		(Datetime,          Datetime)          => literal::<DatetimeKind>(id, left, right),
		(DatetimeInterval,  DatetimeInterval)  => literal::<DatetimeIntervalKind>(id, left, right),
		(YearMonthInterval, YearMonthInterval) => literal::<YearMonthIntervalKind>(id, left, right),

		(Char,    Char)    => string::<CharKind,    CharKind>(id, left, right),
		(Char,    VarChar) => string::<CharKind,    VarCharKind>(id, left, right),
		(VarChar, Char)    => string::<VarCharKind, CharKind>(id, left, right),
		(VarChar, VarChar) => string::<VarCharKind, VarCharKind>(id, left, right),
		_ => return None,
	};
	Some(comparator)
}

#[cfg(test)]
mod tests {
	use stratum_type::{ColumnVector, DateLit, TupleIdSequence, TypeFactory, TypedValue};

	use super::*;

	fn comparator(id: ComparisonId, left: &'static Type, right: &'static Type) -> Box<dyn UncheckedComparator> {
		make_basic_comparator(id, left, right).unwrap()
	}

	#[test]
	fn test_mixed_numeric() {
		let int = TypeFactory::get(Kind::Int, false);
		let double = TypeFactory::get(Kind::Double, false);
		let less = comparator(ComparisonId::Less, int, double);
		assert!(less.compare_typed_values(&TypedValue::Int(1), &TypedValue::Double(1.5)));
		assert!(!less.compare_typed_values(&TypedValue::Int(2), &TypedValue::Double(1.5)));
		let equal = comparator(ComparisonId::Equal, double, double);
		assert!(!equal.compare_typed_values(&TypedValue::Double(f64::NAN), &TypedValue::Double(f64::NAN)));
	}

	#[test]
	fn test_strings_ignore_terminators() {
		let char8 = TypeFactory::get_with_length(Kind::Char, 8, false);
		let varchar = TypeFactory::get_with_length(Kind::VarChar, 8, false);
		let equal = comparator(ComparisonId::Equal, char8, varchar);
		assert!(equal.compare_typed_values(&TypedValue::char("abc"), &TypedValue::varchar("abc")));
		let less = comparator(ComparisonId::Less, varchar, varchar);
		assert!(less.compare_typed_values(&TypedValue::varchar("ab"), &TypedValue::varchar("abc")));
		assert!(less.compare_typed_values(&TypedValue::varchar("abc"), &TypedValue::varchar("abd")));
		assert!(!less.compare_typed_values(&TypedValue::varchar("b"), &TypedValue::varchar("abc")));
		assert!(equal.compare_data(Some(b"abc\0\0\0\0\0"), Some(b"abc\0")));
	}

	#[test]
	fn test_column_and_static_with_filter() {
		let long = TypeFactory::get(Kind::Long, true);
		let column = ColumnVector::from_values(
			long,
			[TypedValue::Long(5), TypedValue::Null(Kind::Long), TypedValue::Long(9), TypedValue::Long(2)],
		);
		let greater = comparator(ComparisonId::GreaterOrEqual, long, TypeFactory::get(Kind::Int, false));
		let matches = greater.compare_column_vector_and_static_value(&column, &TypedValue::Int(5), None);
		assert_eq!(matches.iter().collect::<Vec<_>>(), vec![0, 2]);

		let filter = TupleIdSequence::from_ids(4, [2, 3]);
		let matches = greater.compare_column_vector_and_static_value(&column, &TypedValue::Int(5), Some(&filter));
		assert_eq!(matches.iter().collect::<Vec<_>>(), vec![2]);
	}

	#[test]
	fn test_column_vectors() {
		let date = TypeFactory::get(Kind::Date, false);
		let day = |d| TypedValue::Date(DateLit::new(2020, 1, d).unwrap());
		let left = ColumnVector::from_values(date, [day(1), day(5), day(9)]);
		let right = ColumnVector::from_values(date, [day(2), day(5), day(3)]);
		let not_equal = comparator(ComparisonId::NotEqual, date, date);
		let matches = not_equal.compare_column_vectors(&left, &right, None);
		assert_eq!(matches.iter().collect::<Vec<_>>(), vec![0, 2]);
		assert_eq!(matches.len(), 3);
	}

	#[test]
	fn test_accumulate_min_and_max() {
		let int = TypeFactory::get(Kind::Int, true);
		let column = ColumnVector::from_values(
			int,
			[TypedValue::Int(4), TypedValue::Null(Kind::Int), TypedValue::Int(-3), TypedValue::Int(8)],
		);
		let less = comparator(ComparisonId::Less, int, int);
		assert_eq!(less.accumulate_column_vector(&TypedValue::Null(Kind::Int), &column).literal::<i32>(), -3);
		let greater = comparator(ComparisonId::Greater, int, int);
		assert_eq!(greater.accumulate_column_vector(&TypedValue::Int(10), &column).literal::<i32>(), 10);
		assert_eq!(greater.accumulate_column_vector(&TypedValue::Int(0), &column).literal::<i32>(), 8);
	}

	#[test]
	fn test_incomparable_kinds() {
		assert!(!is_comparable(Kind::Date, Kind::Datetime));
		assert!(!is_comparable(Kind::Bool, Kind::Int));
		assert!(is_comparable(Kind::Char, Kind::VarChar));
		assert!(make_basic_comparator(ComparisonId::Equal, TypeFactory::get(Kind::Date, false), TypeFactory::get(Kind::Int, false)).is_none());
	}
}
