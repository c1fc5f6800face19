// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Cow,
	fmt::{Display, Formatter, LowerExp},
};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::{
	error::SerializationError,
	kind::Kind,
	r#type::{SerializedType, Type, TypeFactory},
	value::{DateLit, DatetimeIntervalLit, DatetimeLit, NativeLiteral, YearMonthIntervalLit},
};

/// Out-of-line bytes of a Char or VarChar value.
#[derive(Clone, Debug)]
pub enum OutOfLine<'a> {
	Owned(Box<[u8]>),
	Borrowed(&'a [u8]),
}

impl<'a> OutOfLine<'a> {
	pub fn as_bytes(&self) -> &[u8] {
		match self {
			OutOfLine::Owned(bytes) => bytes,
			OutOfLine::Borrowed(bytes) => bytes,
		}
	}

	pub fn is_owned(&self) -> bool {
		matches!(self, OutOfLine::Owned(_))
	}

	pub fn into_owned(self) -> OutOfLine<'static> {
		match self {
			OutOfLine::Owned(bytes) => OutOfLine::Owned(bytes),
			OutOfLine::Borrowed(bytes) => OutOfLine::Owned(bytes.into()),
		}
	}
}

/// A scalar value tagged with its kind.
///
/// Inline kinds carry their literal directly. Char and VarChar carry their
/// bytes out of line, either owned or borrowed. VarChar bytes always end in
/// exactly one NUL; Char bytes are NUL-padded or exactly as long as the data.
///
/// There is no `PartialEq`; compare values through a comparison operation.
#[derive(Clone, Debug)]
pub enum TypedValue<'a> {
	Bool(bool),
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	Date(DateLit),
	Datetime(DatetimeLit),
	DatetimeInterval(DatetimeIntervalLit),
	YearMonthInterval(YearMonthIntervalLit),
	Meta(&'static Type),
	Char(OutOfLine<'a>),
	VarChar(OutOfLine<'a>),
	Null(Kind),
}

/// The moved-from state: a non-null `Int` zero.
impl Default for TypedValue<'_> {
	fn default() -> Self {
		TypedValue::Int(0)
	}
}

macro_rules! impl_from_literal {
	($($t:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$t> for TypedValue<'static> {
				fn from(value: $t) -> Self {
					TypedValue::$variant(value)
				}
			}
		)*
	};
}

impl_from_literal!(
	bool => Bool,
	i32 => Int,
	i64 => Long,
	DateLit => Date,
	DatetimeLit => Datetime,
	DatetimeIntervalLit => DatetimeInterval,
	YearMonthIntervalLit => YearMonthInterval,
);

impl From<f32> for TypedValue<'static> {
	fn from(value: f32) -> Self {
		TypedValue::Float(value)
	}
}

impl From<f64> for TypedValue<'static> {
	fn from(value: f64) -> Self {
		TypedValue::Double(value)
	}
}

impl From<&'static Type> for TypedValue<'static> {
	fn from(value: &'static Type) -> Self {
		TypedValue::Meta(value)
	}
}

impl<'a> TypedValue<'a> {
	pub fn null(kind: Kind) -> Self {
		TypedValue::Null(kind)
	}

	/// A borrowed Char or VarChar value over `bytes`.
	pub fn reference(kind: Kind, bytes: &'a [u8]) -> Self {
		match kind {
			Kind::Char => TypedValue::Char(OutOfLine::Borrowed(bytes)),
			Kind::VarChar => TypedValue::VarChar(OutOfLine::Borrowed(bytes)),
			other => panic!("reference values are only defined for Char and VarChar, not {}", other),
		}
	}

	/// Decodes native column bytes of `kind`. Char and VarChar values borrow
	/// `bytes`.
	pub fn from_native_bytes(kind: Kind, bytes: &'a [u8]) -> Self {
		match kind {
			Kind::Bool => bool::read(bytes).into_value(),
			Kind::Int => i32::read(bytes).into_value(),
			Kind::Long => i64::read(bytes).into_value(),
			Kind::Float => f32::read(bytes).into_value(),
			Kind::Double => f64::read(bytes).into_value(),
			Kind::Date => TypedValue::Date(NativeLiteral::read(bytes)),
			Kind::Datetime => TypedValue::Datetime(NativeLiteral::read(bytes)),
			Kind::DatetimeInterval => TypedValue::DatetimeInterval(NativeLiteral::read(bytes)),
			Kind::YearMonthInterval => TypedValue::YearMonthInterval(NativeLiteral::read(bytes)),
			Kind::Char => TypedValue::Char(OutOfLine::Borrowed(bytes)),
			Kind::VarChar => TypedValue::VarChar(OutOfLine::Borrowed(bytes)),
			kind => panic!("{} has no native representation", kind),
		}
	}

	/// An owned Char or VarChar value; `bytes` are taken as-is.
	pub fn with_owned_data(kind: Kind, bytes: impl Into<Box<[u8]>>) -> TypedValue<'static> {
		match kind {
			Kind::Char => TypedValue::Char(OutOfLine::Owned(bytes.into())),
			Kind::VarChar => TypedValue::VarChar(OutOfLine::Owned(bytes.into())),
			other => panic!("out-of-line data is only defined for Char and VarChar, not {}", other),
		}
	}

	/// An owned VarChar holding `s` plus the terminator.
	pub fn varchar(s: &str) -> TypedValue<'static> {
		let mut bytes = Vec::with_capacity(s.len() + 1);
		bytes.extend_from_slice(s.as_bytes());
		bytes.push(0);
		TypedValue::VarChar(OutOfLine::Owned(bytes.into_boxed_slice()))
	}

	/// An owned Char holding exactly the bytes of `s`.
	pub fn char(s: &str) -> TypedValue<'static> {
		TypedValue::Char(OutOfLine::Owned(s.as_bytes().into()))
	}

	pub fn kind(&self) -> Kind {
		match self {
			TypedValue::Bool(_) => Kind::Bool,
			TypedValue::Int(_) => Kind::Int,
			TypedValue::Long(_) => Kind::Long,
			TypedValue::Float(_) => Kind::Float,
			TypedValue::Double(_) => Kind::Double,
			TypedValue::Date(_) => Kind::Date,
			TypedValue::Datetime(_) => Kind::Datetime,
			TypedValue::DatetimeInterval(_) => Kind::DatetimeInterval,
			TypedValue::YearMonthInterval(_) => Kind::YearMonthInterval,
			TypedValue::Meta(_) => Kind::Meta,
			TypedValue::Char(_) => Kind::Char,
			TypedValue::VarChar(_) => Kind::VarChar,
			TypedValue::Null(kind) => *kind,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, TypedValue::Null(_))
	}

	pub fn is_reference(&self) -> bool {
		matches!(self, TypedValue::Char(OutOfLine::Borrowed(_)) | TypedValue::VarChar(OutOfLine::Borrowed(_)))
	}

	pub fn owns_out_of_line_data(&self) -> bool {
		matches!(self, TypedValue::Char(OutOfLine::Owned(_)) | TypedValue::VarChar(OutOfLine::Owned(_)))
	}

	pub fn out_of_line_data(&self) -> Option<&[u8]> {
		match self {
			TypedValue::Char(data) | TypedValue::VarChar(data) => Some(data.as_bytes()),
			_ => None,
		}
	}

	/// Bytes occupied by the value; 0 for NULL.
	pub fn data_size(&self) -> usize {
		match self {
			TypedValue::Null(_) => 0,
			TypedValue::Meta(_) => std::mem::size_of::<&'static Type>(),
			TypedValue::Char(data) | TypedValue::VarChar(data) => data.as_bytes().len(),
			other => other.kind().literal_size().unwrap_or(0),
		}
	}

	/// Native bytes of the value: the literal for inline kinds, the buffer for
	/// strings. `None` for NULL and Meta.
	pub fn data_bytes(&self) -> Option<Cow<'_, [u8]>> {
		fn inline<T: NativeLiteral>(v: T) -> Option<Cow<'static, [u8]>> {
			let mut buf = vec![0u8; T::SIZE];
			v.write(&mut buf);
			Some(Cow::Owned(buf))
		}

		match self {
			TypedValue::Bool(v) => inline(*v),
			TypedValue::Int(v) => inline(*v),
			TypedValue::Long(v) => inline(*v),
			TypedValue::Float(v) => inline(*v),
			TypedValue::Double(v) => inline(*v),
			TypedValue::Date(v) => inline(*v),
			TypedValue::Datetime(v) => inline(*v),
			TypedValue::DatetimeInterval(v) => inline(*v),
			TypedValue::YearMonthInterval(v) => inline(*v),
			TypedValue::Char(data) | TypedValue::VarChar(data) => Some(Cow::Borrowed(data.as_bytes())),
			TypedValue::Meta(_) | TypedValue::Null(_) => None,
		}
	}

	/// String length without the terminator. Char stops at the first NUL,
	/// VarChar drops its single trailing NUL.
	pub fn ascii_string_length(&self) -> usize {
		match self {
			TypedValue::Char(data) => {
				let bytes = data.as_bytes();
				bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
			}
			TypedValue::VarChar(data) => data.as_bytes().len().saturating_sub(1),
			other => panic!("ascii_string_length called on a {} value", other.kind()),
		}
	}

	pub fn ascii_bytes(&self) -> &[u8] {
		match self {
			TypedValue::Char(data) | TypedValue::VarChar(data) => &data.as_bytes()[..self.ascii_string_length()],
			other => panic!("ascii_bytes called on a {} value", other.kind()),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			TypedValue::Char(_) | TypedValue::VarChar(_) => std::str::from_utf8(self.ascii_bytes()).ok(),
			_ => None,
		}
	}

	/// Replaces borrowed bytes with an owned copy. Idempotent.
	pub fn ensure_not_reference(&mut self) {
		match self {
			TypedValue::Char(data) | TypedValue::VarChar(data) => {
				if let OutOfLine::Borrowed(bytes) = data {
					*data = OutOfLine::Owned((*bytes).into());
				}
			}
			_ => {}
		}
	}

	pub fn into_owned(self) -> TypedValue<'static> {
		match self {
			TypedValue::Bool(v) => TypedValue::Bool(v),
			TypedValue::Int(v) => TypedValue::Int(v),
			TypedValue::Long(v) => TypedValue::Long(v),
			TypedValue::Float(v) => TypedValue::Float(v),
			TypedValue::Double(v) => TypedValue::Double(v),
			TypedValue::Date(v) => TypedValue::Date(v),
			TypedValue::Datetime(v) => TypedValue::Datetime(v),
			TypedValue::DatetimeInterval(v) => TypedValue::DatetimeInterval(v),
			TypedValue::YearMonthInterval(v) => TypedValue::YearMonthInterval(v),
			TypedValue::Meta(v) => TypedValue::Meta(v),
			TypedValue::Char(data) => TypedValue::Char(data.into_owned()),
			TypedValue::VarChar(data) => TypedValue::VarChar(data.into_owned()),
			TypedValue::Null(kind) => TypedValue::Null(kind),
		}
	}

	/// A view of this value whose string bytes borrow from `self`.
	pub fn make_reference_to_this(&self) -> TypedValue<'_> {
		match self {
			TypedValue::Char(data) => TypedValue::Char(OutOfLine::Borrowed(data.as_bytes())),
			TypedValue::VarChar(data) => TypedValue::VarChar(OutOfLine::Borrowed(data.as_bytes())),
			TypedValue::Bool(v) => TypedValue::Bool(*v),
			TypedValue::Int(v) => TypedValue::Int(*v),
			TypedValue::Long(v) => TypedValue::Long(*v),
			TypedValue::Float(v) => TypedValue::Float(*v),
			TypedValue::Double(v) => TypedValue::Double(*v),
			TypedValue::Date(v) => TypedValue::Date(*v),
			TypedValue::Datetime(v) => TypedValue::Datetime(*v),
			TypedValue::DatetimeInterval(v) => TypedValue::DatetimeInterval(*v),
			TypedValue::YearMonthInterval(v) => TypedValue::YearMonthInterval(*v),
			TypedValue::Meta(v) => TypedValue::Meta(*v),
			TypedValue::Null(kind) => TypedValue::Null(*kind),
		}
	}

	/// Moves the value out, leaving `Int(0)` behind.
	pub fn take(&mut self) -> Self {
		std::mem::take(self)
	}

	/// The inline literal of this value.
	///
	/// The kind must match `T::KIND`; a mismatch is a programming error.
	pub fn literal<T: NativeLiteral>(&self) -> T {
		debug_assert_eq!(self.kind(), T::KIND, "literal requested with the wrong kind");
		match T::from_value(self) {
			Some(v) => v,
			None => panic!("cannot read a {:?} literal from {:?}", T::KIND, self),
		}
	}

	pub fn meta(&self) -> &'static Type {
		match self {
			TypedValue::Meta(ty) => *ty,
			other => panic!("meta called on a {} value", other.kind()),
		}
	}

	/// Hash of the value. Inline kinds of up to 8 bytes hash to their own bits,
	/// so [`TypedValue::from_reversible_hash`] can recover them. Strings hash
	/// their characters only, independent of any trailing NULs.
	pub fn hash(&self) -> u64 {
		match self {
			TypedValue::Null(_) => 0,
			TypedValue::Bool(v) => NativeLiteral::to_bits(*v),
			TypedValue::Int(v) => NativeLiteral::to_bits(*v),
			TypedValue::Long(v) => NativeLiteral::to_bits(*v),
			// -0.0 and 0.0 hash alike
			TypedValue::Float(v) => NativeLiteral::to_bits(if *v == 0.0 {
				0.0_f32
			} else {
				*v
			}),
			TypedValue::Double(v) => NativeLiteral::to_bits(if *v == 0.0 {
				0.0_f64
			} else {
				*v
			}),
			TypedValue::Date(v) => NativeLiteral::to_bits(*v),
			TypedValue::Datetime(v) => NativeLiteral::to_bits(*v),
			TypedValue::DatetimeInterval(v) => NativeLiteral::to_bits(*v),
			TypedValue::YearMonthInterval(v) => NativeLiteral::to_bits(*v),
			TypedValue::Meta(ty) => xxh3_64(ty.name().as_bytes()),
			TypedValue::Char(_) | TypedValue::VarChar(_) => xxh3_64(self.ascii_bytes()),
		}
	}

	pub fn hash_is_reversible(kind: Kind) -> bool {
		kind.is_inline_pod()
	}

	pub fn from_reversible_hash(kind: Kind, hash: u64) -> TypedValue<'static> {
		match kind {
			Kind::Bool => TypedValue::Bool(NativeLiteral::from_bits(hash)),
			Kind::Int => TypedValue::Int(NativeLiteral::from_bits(hash)),
			Kind::Long => TypedValue::Long(NativeLiteral::from_bits(hash)),
			Kind::Float => TypedValue::Float(NativeLiteral::from_bits(hash)),
			Kind::Double => TypedValue::Double(NativeLiteral::from_bits(hash)),
			Kind::Date => TypedValue::Date(NativeLiteral::from_bits(hash)),
			Kind::Datetime => TypedValue::Datetime(NativeLiteral::from_bits(hash)),
			Kind::DatetimeInterval => TypedValue::DatetimeInterval(NativeLiteral::from_bits(hash)),
			Kind::YearMonthInterval => TypedValue::YearMonthInterval(NativeLiteral::from_bits(hash)),
			other => panic!("hash of kind {} is not reversible", other),
		}
	}

	/// Equality for two values already known to share a kind. NULL equals nothing.
	pub fn fast_equal_check(&self, other: &TypedValue<'_>) -> bool {
		debug_assert_eq!(self.kind(), other.kind());
		match (self, other) {
			(TypedValue::Null(_), _) | (_, TypedValue::Null(_)) => false,
			(TypedValue::Bool(a), TypedValue::Bool(b)) => a == b,
			(TypedValue::Int(a), TypedValue::Int(b)) => a == b,
			(TypedValue::Long(a), TypedValue::Long(b)) => a == b,
			(TypedValue::Float(a), TypedValue::Float(b)) => a == b,
			(TypedValue::Double(a), TypedValue::Double(b)) => a == b,
			(TypedValue::Date(a), TypedValue::Date(b)) => a == b,
			(TypedValue::Datetime(a), TypedValue::Datetime(b)) => a == b,
			(TypedValue::DatetimeInterval(a), TypedValue::DatetimeInterval(b)) => a == b,
			(TypedValue::YearMonthInterval(a), TypedValue::YearMonthInterval(b)) => a == b,
			(TypedValue::Meta(a), TypedValue::Meta(b)) => a == b,
			(TypedValue::Char(_) | TypedValue::VarChar(_), TypedValue::Char(_) | TypedValue::VarChar(_)) => {
				self.ascii_bytes() == other.ascii_bytes()
			}
			_ => false,
		}
	}

	pub fn to_serialized(&self) -> SerializedValue {
		let mut out = SerializedValue::empty(self.kind());
		match self {
			TypedValue::Null(_) => {}
			TypedValue::Bool(v) => out.bool_value = Some(*v),
			TypedValue::Int(v) => out.int_value = Some(*v),
			TypedValue::Long(v) => out.long_value = Some(*v),
			TypedValue::Float(v) => out.float_value = Some(*v),
			TypedValue::Double(v) => out.double_value = Some(*v),
			TypedValue::Date(v) => out.date_value = Some(v.to_packed()),
			TypedValue::Datetime(v) => out.long_value = Some(v.ticks),
			TypedValue::DatetimeInterval(v) => out.long_value = Some(v.ticks),
			TypedValue::YearMonthInterval(v) => out.long_value = Some(v.months),
			TypedValue::Meta(ty) => out.meta_value = Some(ty.serialize()),
			TypedValue::Char(data) | TypedValue::VarChar(data) => {
				out.out_of_line_data = Some(data.as_bytes().to_vec())
			}
		}
		out
	}

	pub fn to_bytes(&self) -> crate::Result<Vec<u8>> {
		Ok(postcard::to_allocvec(&self.to_serialized())?)
	}
}

impl TypedValue<'static> {
	/// Decodes a serialized value, rejecting any field that does not belong to
	/// its kind.
	pub fn from_serialized(serialized: &SerializedValue) -> crate::Result<TypedValue<'static>> {
		let kind = serialized.kind;
		let populated = serialized.populated_fields();
		if populated.len() > 1 {
			return Err(SerializationError::MultipleFields {
				kind,
			}
			.into());
		}
		let Some(&field) = populated.first() else {
			return Ok(TypedValue::Null(kind));
		};

		let mismatch = || -> crate::Error {
			SerializationError::MismatchedField {
				kind,
				field,
			}
			.into()
		};

		let value = match (kind, field) {
			(Kind::Bool, "bool_value") => serialized.bool_value.map(TypedValue::Bool),
			(Kind::Int, "int_value") => serialized.int_value.map(TypedValue::Int),
			(Kind::Long, "long_value") => serialized.long_value.map(TypedValue::Long),
			(Kind::Float, "float_value") => serialized.float_value.map(TypedValue::Float),
			(Kind::Double, "double_value") => serialized.double_value.map(TypedValue::Double),
			(Kind::Date, "date_value") => serialized.date_value.map(|v| TypedValue::Date(DateLit::from_packed(v))),
			(Kind::Datetime, "long_value") => {
				serialized.long_value.map(|v| TypedValue::Datetime(DatetimeLit::from_ticks(v)))
			}
			(Kind::DatetimeInterval, "long_value") => {
				serialized.long_value.map(|v| TypedValue::DatetimeInterval(DatetimeIntervalLit::from_ticks(v)))
			}
			(Kind::YearMonthInterval, "long_value") => {
				serialized.long_value.map(|v| TypedValue::YearMonthInterval(YearMonthIntervalLit::from_months(v)))
			}
			(Kind::Meta, "meta_value") => match &serialized.meta_value {
				Some(ty) => Some(TypedValue::Meta(TypeFactory::deserialize(ty)?)),
				None => None,
			},
			(Kind::Char, "out_of_line_data") => serialized.out_of_line_data.clone().map(|data| {
				TypedValue::Char(OutOfLine::Owned(data.into_boxed_slice()))
			}),
			(Kind::VarChar, "out_of_line_data") => match &serialized.out_of_line_data {
				Some(data) if data.last() == Some(&0) => Some(TypedValue::VarChar(OutOfLine::Owned(data.as_slice().into()))),
				_ => {
					return Err(SerializationError::MissingTerminator {
						kind,
					}
					.into());
				}
			},
			(Kind::NullType, _) => return Err(SerializationError::NullOnlyKind(kind).into()),
			_ => None,
		};
		value.ok_or_else(mismatch)
	}

	pub fn from_bytes(bytes: &[u8]) -> crate::Result<TypedValue<'static>> {
		let serialized: SerializedValue = postcard::from_bytes(bytes)?;
		Self::from_serialized(&serialized)
	}
}

impl Display for TypedValue<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			TypedValue::Null(_) => f.write_str("NULL"),
			TypedValue::Bool(v) => write!(f, "{}", v),
			TypedValue::Int(v) => write!(f, "{}", v),
			TypedValue::Long(v) => write!(f, "{}", v),
			TypedValue::Float(v) => write_floating(f, *v),
			TypedValue::Double(v) => write_floating(f, *v),
			TypedValue::Date(v) => write!(f, "{}", v),
			TypedValue::Datetime(v) => write!(f, "{}", v),
			TypedValue::DatetimeInterval(v) => write!(f, "{}", v),
			TypedValue::YearMonthInterval(v) => write!(f, "{}", v),
			TypedValue::Meta(ty) => f.write_str(&ty.name()),
			TypedValue::Char(_) | TypedValue::VarChar(_) => {
				f.write_str(&String::from_utf8_lossy(self.ascii_bytes()))
			}
		}
	}
}

/// Shortest round-tripping form, in exponent notation for very large or
/// very small magnitudes.
fn write_floating<T: Display + LowerExp + Into<f64> + Copy>(f: &mut Formatter<'_>, value: T) -> std::fmt::Result {
	let magnitude = value.into().abs();
	if magnitude != 0.0 && (magnitude >= 1e16 || magnitude < 1e-5) {
		write!(f, "{:e}", value)
	} else {
		write!(f, "{}", value)
	}
}

/// Wire form of a [`TypedValue`]: the kind plus at most one value field.
/// No populated field means NULL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedValue {
	pub kind: Kind,
	pub bool_value: Option<bool>,
	pub int_value: Option<i32>,
	pub long_value: Option<i64>,
	pub float_value: Option<f32>,
	pub double_value: Option<f64>,
	pub date_value: Option<u32>,
	pub meta_value: Option<SerializedType>,
	pub out_of_line_data: Option<Vec<u8>>,
}

impl SerializedValue {
	pub fn empty(kind: Kind) -> Self {
		Self {
			kind,
			bool_value: None,
			int_value: None,
			long_value: None,
			float_value: None,
			double_value: None,
			date_value: None,
			meta_value: None,
			out_of_line_data: None,
		}
	}

	fn populated_fields(&self) -> Vec<&'static str> {
		let mut fields = Vec::new();
		if self.bool_value.is_some() {
			fields.push("bool_value");
		}
		if self.int_value.is_some() {
			fields.push("int_value");
		}
		if self.long_value.is_some() {
			fields.push("long_value");
		}
		if self.float_value.is_some() {
			fields.push("float_value");
		}
		if self.double_value.is_some() {
			fields.push("double_value");
		}
		if self.date_value.is_some() {
			fields.push("date_value");
		}
		if self.meta_value.is_some() {
			fields.push("meta_value");
		}
		if self.out_of_line_data.is_some() {
			fields.push("out_of_line_data");
		}
		fields
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_take_leaves_canonical_int_zero() {
		let mut value = TypedValue::varchar("moved");
		let taken = value.take();
		assert_eq!(taken.kind(), Kind::VarChar);
		assert_eq!(value.kind(), Kind::Int);
		assert!(!value.is_null());
		assert_eq!(value.literal::<i32>(), 0);
	}

	#[test]
	fn test_terminator_agnostic_strings() {
		let plain = TypedValue::reference(Kind::Char, b"foo");
		let terminated = TypedValue::reference(Kind::Char, b"foo\0");
		assert_eq!(plain.ascii_string_length(), 3);
		assert_eq!(terminated.ascii_string_length(), 3);
		assert_eq!(plain.hash(), terminated.hash());
		assert!(plain.fast_equal_check(&terminated));

		let varchar = TypedValue::varchar("foo");
		assert_eq!(varchar.ascii_string_length(), 3);
		assert_eq!(varchar.hash(), plain.hash());
	}

	#[test]
	fn test_reference_and_ownership() {
		let bytes = b"abc\0".to_vec();
		let mut value = TypedValue::reference(Kind::VarChar, &bytes);
		assert!(value.is_reference());
		assert!(!value.owns_out_of_line_data());

		let copy = value.clone();
		assert!(copy.is_reference());

		value.ensure_not_reference();
		assert!(value.owns_out_of_line_data());
		value.ensure_not_reference();
		assert!(value.owns_out_of_line_data());
		assert_eq!(value.out_of_line_data(), Some(&b"abc\0"[..]));

		let view = value.make_reference_to_this();
		assert!(view.is_reference());
		assert_eq!(view.data_size(), 4);
	}

	#[test]
	fn test_from_native_bytes() {
		let mut buf = [0u8; 8];
		NativeLiteral::write(DatetimeIntervalLit::from_ticks(-3), &mut buf);
		let value = TypedValue::from_native_bytes(Kind::DatetimeInterval, &buf);
		assert_eq!(value.literal::<DatetimeIntervalLit>().ticks, -3);

		let value = TypedValue::from_native_bytes(Kind::VarChar, b"ab\0");
		assert!(value.is_reference());
		assert_eq!(value.as_str(), Some("ab"));
	}

	#[test]
	fn test_reversible_hash() {
		for value in [
			TypedValue::Int(-42),
			TypedValue::Long(i64::MAX),
			TypedValue::Double(3.5),
			TypedValue::Date(DateLit::new(1999, 12, 31).unwrap()),
			TypedValue::YearMonthInterval(YearMonthIntervalLit::from_months(14)),
		] {
			assert!(TypedValue::hash_is_reversible(value.kind()));
			let back = TypedValue::from_reversible_hash(value.kind(), value.hash());
			assert!(back.fast_equal_check(&value));
		}
		assert!(!TypedValue::hash_is_reversible(Kind::VarChar));
	}

	#[test]
	fn test_null_semantics() {
		let null = TypedValue::null(Kind::Long);
		assert!(null.is_null());
		assert_eq!(null.kind(), Kind::Long);
		assert_eq!(null.hash(), 0);
		assert_eq!(null.data_size(), 0);
		assert!(!null.fast_equal_check(&TypedValue::null(Kind::Long)));
		assert_eq!(null.to_string(), "NULL");
	}

	#[test]
	fn test_negative_zero_hashes_like_zero() {
		let neg: TypedValue = (-0.0_f64).into();
		let pos: TypedValue = 0.0_f64.into();
		assert_eq!(neg.hash(), pos.hash());
		assert_eq!(TypedValue::Double(-0.0).hash(), TypedValue::Double(0.0).hash());
		assert_eq!(TypedValue::Float(-0.0).hash(), TypedValue::Float(0.0).hash());
		assert!(TypedValue::Float(-0.0).fast_equal_check(&TypedValue::Float(0.0)));
	}

	#[test]
	fn test_serialized_roundtrip() {
		let values = vec![
			TypedValue::Bool(true),
			TypedValue::Int(7),
			TypedValue::Long(-9),
			TypedValue::Float(1.25),
			TypedValue::Double(-0.5),
			TypedValue::Date(DateLit::new(2020, 2, 29).unwrap()),
			TypedValue::Datetime(DatetimeLit::from_ticks(1_600_000_000_000_000)),
			TypedValue::DatetimeInterval(DatetimeIntervalLit::from_ticks(-5)),
			TypedValue::YearMonthInterval(YearMonthIntervalLit::from_months(30)),
			TypedValue::char("ab"),
			TypedValue::varchar("hello"),
			TypedValue::Meta(TypeFactory::get(Kind::Double, true)),
			TypedValue::null(Kind::VarChar),
			TypedValue::null(Kind::NullType),
		];
		for value in values {
			let bytes = value.to_bytes().unwrap();
			let back = TypedValue::from_bytes(&bytes).unwrap();
			assert_eq!(back.kind(), value.kind());
			assert_eq!(back.is_null(), value.is_null());
			if !value.is_null() {
				assert!(back.fast_equal_check(&value), "{} did not round trip", value);
			}
		}
	}

	#[test]
	fn test_serialized_json_shape() {
		let json = serde_json::to_value(TypedValue::Int(5).to_serialized()).unwrap();
		assert_eq!(json["kind"], "Int");
		assert_eq!(json["int_value"], 5);
		assert!(json["long_value"].is_null());
	}

	#[test]
	fn test_from_serialized_rejects_mismatched_field() {
		let mut serialized = SerializedValue::empty(Kind::Int);
		serialized.long_value = Some(3);
		let err = TypedValue::from_serialized(&serialized).unwrap_err();
		assert_eq!(err.code(), "SERIALIZATION_001");

		serialized.int_value = Some(3);
		let err = TypedValue::from_serialized(&serialized).unwrap_err();
		assert!(err.message.contains("more than one"));
	}

	#[test]
	fn test_from_serialized_requires_varchar_terminator() {
		let mut serialized = SerializedValue::empty(Kind::VarChar);
		serialized.out_of_line_data = Some(b"abc".to_vec());
		assert!(TypedValue::from_serialized(&serialized).is_err());
	}

	#[test]
	fn test_from_bytes_rejects_garbage() {
		let err = TypedValue::from_bytes(&[0xff, 0xff, 0xff]).unwrap_err();
		assert_eq!(err.code(), "SERIALIZATION_002");
	}
}
