// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(rustfmt, rustfmt_skip)]

use crate::{
	kind::Kind,
	value::{DateLit, DatetimeIntervalLit, DatetimeLit, TypedValue, YearMonthIntervalLit},
};

/// A fixed-size literal that lives inline in a [`TypedValue`] and in native
/// column storage.
pub trait NativeLiteral: Copy + Send + Sync + PartialOrd + std::fmt::Debug + 'static {
	const KIND: Kind;
	const SIZE: usize;

	/// Decodes from native-endian bytes. `bytes` holds at least `SIZE` bytes.
	fn read(bytes: &[u8]) -> Self;

	fn write(self, out: &mut [u8]);

	fn into_value(self) -> TypedValue<'static>;

	fn from_value(value: &TypedValue<'_>) -> Option<Self>;

	fn to_bits(self) -> u64;

	fn from_bits(bits: u64) -> Self;
}

/// Primitive storage representation behind a literal.
trait Repr: Copy {
	const SIZE: usize;
	fn read(bytes: &[u8]) -> Self;
	fn write(self, out: &mut [u8]);
	fn to_bits(self) -> u64;
	fn from_bits(bits: u64) -> Self;
}

macro_rules! impl_repr {
	($t:ty, |$v:ident| $to_bits:expr, |$b:ident| $from_bits:expr) => {
		impl Repr for $t {
			const SIZE: usize = std::mem::size_of::<$t>();

			#[inline]
			fn read(bytes: &[u8]) -> Self {
				let mut buf = [0u8; std::mem::size_of::<$t>()];
				buf.copy_from_slice(&bytes[..<$t as Repr>::SIZE]);
				<$t>::from_ne_bytes(buf)
			}

			#[inline]
			fn write(self, out: &mut [u8]) { out[..<$t as Repr>::SIZE].copy_from_slice(&self.to_ne_bytes()); }

			#[inline]
			fn to_bits(self) -> u64 { let $v = self; $to_bits }

			#[inline]
			fn from_bits(bits: u64) -> Self { let $b = bits; $from_bits }
		}
	};
}

impl_repr!(u8,  |v| v as u64,          |b| b as u8);
impl_repr!(u32, |v| v as u64,          |b| b as u32);
impl_repr!(i32, |v| v as u32 as u64,   |b| b as u32 as i32);
impl_repr!(i64, |v| v as u64,          |b| b as i64);
impl_repr!(f32, |v| v.to_bits() as u64, |b| f32::from_bits(b as u32));
impl_repr!(f64, |v| v.to_bits(),       |b| f64::from_bits(b));

macro_rules! impl_native_literal {
	($t:ty, $kind:ident, $repr:ty, |$v:ident| $to_repr:expr, |$r:ident| $from_repr:expr) => {
		impl NativeLiteral for $t {
			const KIND: Kind = Kind::$kind;
			const SIZE: usize = <$repr as Repr>::SIZE;

			#[inline]
			fn read(bytes: &[u8]) -> Self { let $r = <$repr as Repr>::read(bytes); $from_repr }

			#[inline]
			fn write(self, out: &mut [u8]) { let $v = self; Repr::write($to_repr, out) }

			#[inline]
			fn into_value(self) -> TypedValue<'static> { TypedValue::from(self) }

			#[inline]
			fn from_value(value: &TypedValue<'_>) -> Option<Self> {
				match value { TypedValue::$kind(v) => Some(*v), _ => None }
			}

			#[inline]
			fn to_bits(self) -> u64 { let $v = self; Repr::to_bits($to_repr) }

			#[inline]
			fn from_bits(bits: u64) -> Self { let $r = <$repr as Repr>::from_bits(bits); $from_repr }
		}
	};
}

impl_native_literal!(bool,                 Bool,              u8,  |v| v as u8,      |r| r != 0);
impl_native_literal!(i32,                  Int,               i32, |v| v,            |r| r);
impl_native_literal!(i64,                  Long,              i64, |v| v,            |r| r);
impl_native_literal!(f32,                  Float,             f32, |v| v,            |r| r);
impl_native_literal!(f64,                  Double,            f64, |v| v,            |r| r);
impl_native_literal!(DateLit,              Date,              u32, |v| v.to_packed(), |r| DateLit::from_packed(r));
impl_native_literal!(DatetimeLit,          Datetime,          i64, |v| v.ticks,      |r| DatetimeLit::from_ticks(r));
impl_native_literal!(DatetimeIntervalLit,  DatetimeInterval,  i64, |v| v.ticks,      |r| DatetimeIntervalLit::from_ticks(r));
impl_native_literal!(YearMonthIntervalLit, YearMonthInterval, i64, |v| v.months,     |r| YearMonthIntervalLit::from_months(r));

#[cfg(test)]
mod tests {
	use super::*;

	fn roundtrip<T: NativeLiteral + PartialEq>(value: T) {
		let mut buf = [0u8; 8];
		value.write(&mut buf);
		assert_eq!(T::read(&buf), value);
		assert_eq!(T::from_bits(value.to_bits()), value);
		assert_eq!(T::from_value(&value.into_value()), Some(value));
	}

	#[test]
	fn test_literals_roundtrip_through_bytes_and_bits() {
		roundtrip(true);
		roundtrip(-17_i32);
		roundtrip(i64::MIN);
		roundtrip(1.5_f32);
		roundtrip(-2.25_f64);
		roundtrip(DateLit::new(2024, 2, 29).unwrap());
		roundtrip(DatetimeLit::from_ticks(-123_456_789));
		roundtrip(DatetimeIntervalLit::from_ticks(42));
		roundtrip(YearMonthIntervalLit::from_months(-7));
	}

	#[test]
	fn test_sizes_match_kind() {
		for (size, kind) in [
			(<bool as NativeLiteral>::SIZE, Kind::Bool),
			(<i32 as NativeLiteral>::SIZE, Kind::Int),
			(<f64 as NativeLiteral>::SIZE, Kind::Double),
			(<DateLit as NativeLiteral>::SIZE, Kind::Date),
			(<DatetimeLit as NativeLiteral>::SIZE, Kind::Datetime),
			(<YearMonthIntervalLit as NativeLiteral>::SIZE, Kind::YearMonthInterval),
		] {
			assert_eq!(Some(size), kind.literal_size());
		}
	}

	#[test]
	fn test_int_bits_do_not_sign_extend() {
		assert_eq!(NativeLiteral::to_bits(-1_i32), u32::MAX as u64);
		assert_eq!(<i32 as NativeLiteral>::from_bits(u32::MAX as u64), -1);
	}

	#[test]
	fn test_from_value_rejects_other_kinds() {
		assert_eq!(<i64 as NativeLiteral>::from_value(&TypedValue::Int(3)), None);
		assert_eq!(<i32 as NativeLiteral>::from_value(&TypedValue::Null(Kind::Int)), None);
	}
}
