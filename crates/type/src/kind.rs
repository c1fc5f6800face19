// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Closed set of scalar representations.
///
/// The discriminant is the serialized id and also the positional order used
/// when operation signatures are sorted.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
	/// A boolean: true or false.
	Bool = 0,
	/// A 4-byte signed integer
	Int = 1,
	/// An 8-byte signed integer
	Long = 2,
	/// A 4-byte floating point
	Float = 3,
	/// An 8-byte floating point
	Double = 4,
	/// Fixed-length ASCII string, NUL-padded when shorter than its length
	Char = 5,
	/// Variable-length ASCII string stored with one trailing NUL
	VarChar = 6,
	/// A calendar date (year, month, day)
	Date = 7,
	/// Microseconds since the Unix epoch, UTC
	Datetime = 8,
	/// A duration in microseconds
	DatetimeInterval = 9,
	/// A duration in months
	YearMonthInterval = 10,
	/// The type of an untyped NULL literal
	NullType = 11,
	/// A value that is itself a type
	Meta = 12,
	/// Reserved marker, never backed by a type singleton
	Array = 13,
}

/// Coarse category used by coercion and comparison rules.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuperType {
	Numeric,
	AsciiString,
	Other,
}

impl Kind {
	pub const ALL: [Kind; 14] = [
		Kind::Bool,
		Kind::Int,
		Kind::Long,
		Kind::Float,
		Kind::Double,
		Kind::Char,
		Kind::VarChar,
		Kind::Date,
		Kind::Datetime,
		Kind::DatetimeInterval,
		Kind::YearMonthInterval,
		Kind::NullType,
		Kind::Meta,
		Kind::Array,
	];

	/// Kinds whose values live inline as plain old data.
	pub const INLINE_POD: [Kind; 9] = [
		Kind::Bool,
		Kind::Int,
		Kind::Long,
		Kind::Float,
		Kind::Double,
		Kind::Date,
		Kind::Datetime,
		Kind::DatetimeInterval,
		Kind::YearMonthInterval,
	];

	pub const NUMERIC: [Kind; 4] = [Kind::Int, Kind::Long, Kind::Float, Kind::Double];

	pub fn to_u8(self) -> u8 {
		self as u8
	}

	pub fn from_u8(id: u8) -> Option<Kind> {
		Kind::ALL.get(id as usize).copied()
	}

	pub fn name(self) -> &'static str {
		match self {
			Kind::Bool => "Bool",
			Kind::Int => "Int",
			Kind::Long => "Long",
			Kind::Float => "Float",
			Kind::Double => "Double",
			Kind::Char => "Char",
			Kind::VarChar => "VarChar",
			Kind::Date => "Date",
			Kind::Datetime => "Datetime",
			Kind::DatetimeInterval => "DatetimeInterval",
			Kind::YearMonthInterval => "YearMonthInterval",
			Kind::NullType => "NullType",
			Kind::Meta => "Meta",
			Kind::Array => "Array",
		}
	}

	pub fn super_type(self) -> SuperType {
		match self {
			Kind::Int | Kind::Long | Kind::Float | Kind::Double => SuperType::Numeric,
			Kind::Char | Kind::VarChar => SuperType::AsciiString,
			_ => SuperType::Other,
		}
	}

	pub fn is_numeric(self) -> bool {
		self.super_type() == SuperType::Numeric
	}

	pub fn is_integer(self) -> bool {
		matches!(self, Kind::Int | Kind::Long)
	}

	pub fn is_floating_point(self) -> bool {
		matches!(self, Kind::Float | Kind::Double)
	}

	pub fn is_ascii_string(self) -> bool {
		self.super_type() == SuperType::AsciiString
	}

	pub fn is_interval(self) -> bool {
		matches!(self, Kind::DatetimeInterval | Kind::YearMonthInterval)
	}

	pub fn is_temporal(self) -> bool {
		matches!(self, Kind::Date | Kind::Datetime) || self.is_interval()
	}

	/// Char and VarChar carry a length parameter.
	pub fn is_parameterized(self) -> bool {
		self.is_ascii_string()
	}

	pub fn is_inline_pod(self) -> bool {
		Kind::INLINE_POD.contains(&self)
	}

	/// Size in bytes of the native literal, for inline kinds.
	pub fn literal_size(self) -> Option<usize> {
		match self {
			Kind::Bool => Some(1),
			Kind::Int | Kind::Float | Kind::Date => Some(4),
			Kind::Long | Kind::Double | Kind::Datetime | Kind::DatetimeInterval | Kind::YearMonthInterval => {
				Some(8)
			}
			_ => None,
		}
	}
}

impl Display for Kind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Kind {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Kind::ALL.iter().copied().find(|k| k.name().eq_ignore_ascii_case(s)).ok_or(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_id_roundtrip() {
		for kind in Kind::ALL {
			assert_eq!(Kind::from_u8(kind.to_u8()), Some(kind));
		}
		assert_eq!(Kind::from_u8(14), None);
	}

	#[test]
	fn test_from_str_is_case_insensitive() {
		assert_eq!("varchar".parse::<Kind>(), Ok(Kind::VarChar));
		assert_eq!("DATETIMEINTERVAL".parse::<Kind>(), Ok(Kind::DatetimeInterval));
		assert!("text".parse::<Kind>().is_err());
	}

	#[test]
	fn test_super_types() {
		assert_eq!(Kind::Long.super_type(), SuperType::Numeric);
		assert_eq!(Kind::Char.super_type(), SuperType::AsciiString);
		assert_eq!(Kind::Bool.super_type(), SuperType::Other);
		assert_eq!(Kind::Date.super_type(), SuperType::Other);
	}

	#[test]
	fn test_literal_sizes() {
		assert_eq!(Kind::Bool.literal_size(), Some(1));
		assert_eq!(Kind::Date.literal_size(), Some(4));
		assert_eq!(Kind::YearMonthInterval.literal_size(), Some(8));
		assert_eq!(Kind::VarChar.literal_size(), None);
		for kind in Kind::INLINE_POD {
			assert!(kind.literal_size().is_some());
		}
	}
}
