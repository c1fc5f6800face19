// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(rustfmt, rustfmt_skip)]

//! Compile-time markers for the kinds an operator reads and produces.
//!
//! Operators are generic over these markers, so the per-row code of every
//! argument combination is monomorphised. A marker knows how to view a
//! non-null [`TypedValue`] or native column bytes as its Rust value, and how
//! to turn a result back into a value or column entry.

use num_traits::{AsPrimitive, Float};
use stratum_type::{
	ColumnVector, DateLit, DatetimeIntervalLit, DatetimeLit, Kind, NativeLiteral, OutOfLine, Type, TypedValue,
	YearMonthIntervalLit,
};

pub trait ArgumentKind: Send + Sync + 'static {
	const KIND: Kind;

	type Value<'a>: Copy;

	/// `value` is non-null and of kind `KIND`.
	fn from_typed<'a>(value: &'a TypedValue<'_>) -> Self::Value<'a>;

	/// `bytes` are native column bytes as returned by
	/// [`ColumnVector::get_untyped_value`].
	fn from_bytes(bytes: &[u8]) -> Self::Value<'_>;
}

pub trait ResultKind: Send + Sync + 'static {
	const KIND: Kind;

	type Output;

	fn into_typed(output: Self::Output, ty: &'static Type) -> TypedValue<'static>;

	fn append(column: &mut ColumnVector, output: Self::Output, ty: &'static Type) {
		column.append_typed_value(&Self::into_typed(output, ty));
	}
}

/// Kinds whose values are fixed-size native literals.
pub trait InlineKind: ArgumentKind + ResultKind {
	type Native: NativeLiteral;

	fn to_native(value: Self::Value<'_>) -> Self::Native;

	fn from_native(native: Self::Native) -> Self::Output;
}

/// Wrapping integer arithmetic and IEEE float arithmetic behind one interface.
pub trait Arithmetic: NativeLiteral + AsPrimitive<i64> + AsPrimitive<f64> {
	const INTEGER: bool;

	fn add(self, other: Self) -> Self;
	fn sub(self, other: Self) -> Self;
	fn mul(self, other: Self) -> Self;
	/// Integer division by zero is a caller precondition.
	fn div(self, other: Self) -> Self;
	fn rem(self, other: Self) -> Self;
	fn neg(self) -> Self;
	fn abs(self) -> Self;
}

macro_rules! impl_integer_arithmetic {
	($($t:ty),*) => {$(
		impl Arithmetic for $t {
			const INTEGER: bool = true;
			#[inline] fn add(self, other: Self) -> Self { self.wrapping_add(other) }
			#[inline] fn sub(self, other: Self) -> Self { self.wrapping_sub(other) }
			#[inline] fn mul(self, other: Self) -> Self { self.wrapping_mul(other) }
			#[inline] fn div(self, other: Self) -> Self { self.wrapping_div(other) }
			#[inline] fn rem(self, other: Self) -> Self { self.wrapping_rem(other) }
			#[inline] fn neg(self) -> Self { self.wrapping_neg() }
			#[inline] fn abs(self) -> Self { self.wrapping_abs() }
		}
	)*};
}

macro_rules! impl_float_arithmetic {
	($($t:ty),*) => {$(
		impl Arithmetic for $t {
			const INTEGER: bool = false;
			#[inline] fn add(self, other: Self) -> Self { self + other }
			#[inline] fn sub(self, other: Self) -> Self { self - other }
			#[inline] fn mul(self, other: Self) -> Self { self * other }
			#[inline] fn div(self, other: Self) -> Self { self / other }
			#[inline] fn rem(self, other: Self) -> Self { self % other }
			#[inline] fn neg(self) -> Self { -self }
			#[inline] fn abs(self) -> Self { <$t>::abs(self) }
		}
	)*};
}

impl_integer_arithmetic!(i32, i64);
impl_float_arithmetic!(f32, f64);

pub trait NumericKind: InlineKind {
	type Number: Arithmetic;

	fn to_number(value: Self::Value<'_>) -> Self::Number;

	fn from_number(number: Self::Number) -> Self::Output;
}

pub trait FloatingKind: NumericKind {
	type Real: Arithmetic + Float;

	fn to_real(value: Self::Value<'_>) -> Self::Real;

	fn from_real(real: Self::Real) -> Self::Output;
}

/// DatetimeInterval (ticks) and YearMonthInterval (months) as an `i64` count.
pub trait IntervalKind: InlineKind {
	fn count(value: Self::Value<'_>) -> i64;

	fn from_count(count: i64) -> Self::Output;
}

/// Char and VarChar, viewed as their ASCII bytes without a terminator.
pub trait AsciiKind: ArgumentKind {
	fn bytes<'a>(value: Self::Value<'a>) -> &'a [u8];
}

macro_rules! inline_kind {
	($marker:ident, $kind:ident, $native:ty) => {
		pub struct $marker;

		impl ArgumentKind for $marker {
			const KIND: Kind = Kind::$kind;
			type Value<'a> = $native;
			#[inline] fn from_typed<'a>(value: &'a TypedValue<'_>) -> $native { value.literal::<$native>() }
			#[inline] fn from_bytes(bytes: &[u8]) -> $native { <$native as NativeLiteral>::read(bytes) }
		}

		impl ResultKind for $marker {
			const KIND: Kind = Kind::$kind;
			type Output = $native;
			#[inline] fn into_typed(output: $native, _ty: &'static Type) -> TypedValue<'static> { output.into_value() }
			#[inline] fn append(column: &mut ColumnVector, output: $native, _ty: &'static Type) { column.append_native(output) }
		}

		impl InlineKind for $marker {
			type Native = $native;
			#[inline] fn to_native(value: $native) -> $native { value }
			#[inline] fn from_native(native: $native) -> $native { native }
		}
	};
}

macro_rules! numeric_kind {
	($marker:ident, $kind:ident, $native:ty) => {
		inline_kind!($marker, $kind, $native);

		impl NumericKind for $marker {
			type Number = $native;
			#[inline] fn to_number(value: $native) -> $native { value }
			#[inline] fn from_number(number: $native) -> $native { number }
		}
	};
}

macro_rules! floating_kind {
	($marker:ident, $kind:ident, $native:ty) => {
		numeric_kind!($marker, $kind, $native);

		impl FloatingKind for $marker {
			type Real = $native;
			#[inline] fn to_real(value: $native) -> $native { value }
			#[inline] fn from_real(real: $native) -> $native { real }
		}
	};
}

inline_kind!(BoolKind, Bool, bool);
numeric_kind!(IntKind, Int, i32);
numeric_kind!(LongKind, Long, i64);
floating_kind!(FloatKind, Float, f32);
floating_kind!(DoubleKind, Double, f64);
inline_kind!(DateKind, Date, DateLit);
inline_kind!(DatetimeKind, Datetime, DatetimeLit);
inline_kind!(DatetimeIntervalKind, DatetimeInterval, DatetimeIntervalLit);
inline_kind!(YearMonthIntervalKind, YearMonthInterval, YearMonthIntervalLit);

impl IntervalKind for DatetimeIntervalKind {
	#[inline] fn count(value: DatetimeIntervalLit) -> i64 { value.ticks }
	#[inline] fn from_count(count: i64) -> DatetimeIntervalLit { DatetimeIntervalLit::from_ticks(count) }
}

impl IntervalKind for YearMonthIntervalKind {
	#[inline] fn count(value: YearMonthIntervalLit) -> i64 { value.months }
	#[inline] fn from_count(count: i64) -> YearMonthIntervalLit { YearMonthIntervalLit::from_months(count) }
}

pub struct CharKind;

pub struct VarCharKind;

impl ArgumentKind for CharKind {
	const KIND: Kind = Kind::Char;
	type Value<'a> = &'a [u8];

	#[inline]
	fn from_typed<'a>(value: &'a TypedValue<'_>) -> &'a [u8] { value.ascii_bytes() }

	// padded to the type length; the string ends at the first NUL
	#[inline]
	fn from_bytes(bytes: &[u8]) -> &[u8] {
		let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
		&bytes[..len]
	}
}

impl ArgumentKind for VarCharKind {
	const KIND: Kind = Kind::VarChar;
	type Value<'a> = &'a [u8];

	#[inline]
	fn from_typed<'a>(value: &'a TypedValue<'_>) -> &'a [u8] { value.ascii_bytes() }

	#[inline]
	fn from_bytes(bytes: &[u8]) -> &[u8] {
		match bytes.split_last() {
			Some((0, rest)) => rest,
			_ => bytes,
		}
	}
}

impl AsciiKind for CharKind {
	#[inline] fn bytes<'a>(value: Self::Value<'a>) -> &'a [u8] { value }
}

impl AsciiKind for VarCharKind {
	#[inline] fn bytes<'a>(value: Self::Value<'a>) -> &'a [u8] { value }
}

impl ResultKind for CharKind {
	const KIND: Kind = Kind::Char;
	type Output = Vec<u8>;

	fn into_typed(mut output: Vec<u8>, ty: &'static Type) -> TypedValue<'static> {
		let length = ty.length().unwrap_or(output.len());
		output.truncate(length);
		if output.len() < length {
			output.push(0);
		}
		TypedValue::Char(OutOfLine::Owned(output.into_boxed_slice()))
	}
}

impl ResultKind for VarCharKind {
	const KIND: Kind = Kind::VarChar;
	type Output = Vec<u8>;

	fn into_typed(mut output: Vec<u8>, ty: &'static Type) -> TypedValue<'static> {
		if let Some(length) = ty.length() {
			output.truncate(length);
		}
		output.push(0);
		TypedValue::VarChar(OutOfLine::Owned(output.into_boxed_slice()))
	}
}

/// Static `Meta` arguments; never stored natively.
pub struct MetaKind;

impl ArgumentKind for MetaKind {
	const KIND: Kind = Kind::Meta;
	type Value<'a> = &'static Type;

	#[inline]
	fn from_typed<'a>(value: &'a TypedValue<'_>) -> &'static Type { value.meta() }

	fn from_bytes(_bytes: &[u8]) -> &'static Type {
		panic!("Meta values have no native column representation")
	}
}

#[cfg(test)]
mod tests {
	use stratum_type::TypeFactory;

	use super::*;

	#[test]
	fn test_string_views_drop_terminators() {
		assert_eq!(CharKind::from_bytes(b"ab\0\0"), b"ab");
		assert_eq!(CharKind::from_bytes(b"abcd"), b"abcd");
		assert_eq!(VarCharKind::from_bytes(b"abc\0"), b"abc");
		let value = TypedValue::varchar("xy");
		assert_eq!(VarCharKind::from_typed(&value), b"xy");
	}

	#[test]
	fn test_string_results_fit_type() {
		let char3 = TypeFactory::get_with_length(Kind::Char, 3, false);
		let value = CharKind::into_typed(b"abcdef".to_vec(), char3);
		assert_eq!(value.out_of_line_data(), Some(&b"abc"[..]));
		let value = CharKind::into_typed(b"a".to_vec(), char3);
		assert_eq!(value.out_of_line_data(), Some(&b"a\0"[..]));

		let varchar2 = TypeFactory::get_with_length(Kind::VarChar, 2, false);
		let value = VarCharKind::into_typed(b"abc".to_vec(), varchar2);
		assert_eq!(value.out_of_line_data(), Some(&b"ab\0"[..]));
	}

	#[test]
	fn test_integer_arithmetic_wraps() {
		assert_eq!(Arithmetic::add(i32::MAX, 1), i32::MIN);
		assert_eq!(Arithmetic::neg(i64::MIN), i64::MIN);
		assert_eq!(Arithmetic::div(i32::MIN, -1), i32::MIN);
		assert_eq!(Arithmetic::rem(7.5_f64, 2.0), 1.5);
	}

	#[test]
	fn test_inline_markers_read_native_bytes() {
		let mut buf = [0u8; 8];
		NativeLiteral::write(-9_i64, &mut buf);
		assert_eq!(LongKind::from_bytes(&buf), -9);
		assert_eq!(IntKind::from_typed(&TypedValue::Int(4)), 4);
		assert_eq!(<DatetimeIntervalKind as IntervalKind>::count(DatetimeIntervalLit::from_ticks(3)), 3);
	}
}
