// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	fmt::{Debug, Formatter},
};

use crate::{
	kind::Kind,
	r#type::Type,
	value::{DateLit, DatetimeIntervalLit, DatetimeLit, OutOfLine, TypedValue, YearMonthIntervalLit},
};

pub type NativeValue = dyn Any + Send + Sync;

enum Native<'a> {
	Owned(Box<NativeValue>),
	Borrowed(&'a NativeValue),
}

impl Native<'_> {
	fn get(&self) -> &NativeValue {
		match self {
			Native::Owned(value) => value.as_ref(),
			Native::Borrowed(value) => *value,
		}
	}
}

/// A value held in its native Rust representation next to its [`Type`].
///
/// The representation per kind is `bool`, `i32`, `i64`, `f32`, `f64`, the
/// literal structs for temporal kinds, `Vec<u8>` (string bytes without a
/// terminator) for Char and VarChar, and `&'static Type` for Meta.
pub struct GenericValue<'a> {
	ty: &'static Type,
	value: Option<Native<'a>>,
}

impl<'a> GenericValue<'a> {
	pub fn null(ty: &'static Type) -> GenericValue<'static> {
		debug_assert!(ty.is_nullable());
		GenericValue {
			ty,
			value: None,
		}
	}

	/// Takes ownership of `value`. Its Rust type must be the native
	/// representation of `ty`'s kind.
	pub fn from_literal<T: Any + Send + Sync>(ty: &'static Type, value: T) -> GenericValue<'static> {
		debug_assert!(holds_representation(ty.kind(), &value), "{} cannot hold {}", ty, std::any::type_name::<T>());
		GenericValue {
			ty,
			value: Some(Native::Owned(Box::new(value))),
		}
	}

	/// Borrows `value` without copying.
	pub fn reference(ty: &'static Type, value: &'a NativeValue) -> Self {
		debug_assert!(holds_representation(ty.kind(), value));
		GenericValue {
			ty,
			value: Some(Native::Borrowed(value)),
		}
	}

	pub fn from_typed_value(ty: &'static Type, value: &TypedValue<'_>) -> GenericValue<'static> {
		let native: Box<NativeValue> = match value {
			TypedValue::Null(_) => return GenericValue::null(ty),
			TypedValue::Bool(v) => Box::new(*v),
			TypedValue::Int(v) => Box::new(*v),
			TypedValue::Long(v) => Box::new(*v),
			TypedValue::Float(v) => Box::new(*v),
			TypedValue::Double(v) => Box::new(*v),
			TypedValue::Date(v) => Box::new(*v),
			TypedValue::Datetime(v) => Box::new(*v),
			TypedValue::DatetimeInterval(v) => Box::new(*v),
			TypedValue::YearMonthInterval(v) => Box::new(*v),
			TypedValue::Meta(v) => Box::new(*v),
			TypedValue::Char(_) | TypedValue::VarChar(_) => Box::new(value.ascii_bytes().to_vec()),
		};
		debug_assert_eq!(value.kind(), ty.kind());
		GenericValue {
			ty,
			value: Some(Native::Owned(native)),
		}
	}

	pub fn to_typed_value(&self) -> TypedValue<'static> {
		let Some(native) = &self.value else {
			return TypedValue::Null(self.ty.kind());
		};
		let native = native.get();
		match self.ty.kind() {
			Kind::Bool => TypedValue::Bool(*downcast::<bool>(native)),
			Kind::Int => TypedValue::Int(*downcast::<i32>(native)),
			Kind::Long => TypedValue::Long(*downcast::<i64>(native)),
			Kind::Float => TypedValue::Float(*downcast::<f32>(native)),
			Kind::Double => TypedValue::Double(*downcast::<f64>(native)),
			Kind::Date => TypedValue::Date(*downcast::<DateLit>(native)),
			Kind::Datetime => TypedValue::Datetime(*downcast::<DatetimeLit>(native)),
			Kind::DatetimeInterval => TypedValue::DatetimeInterval(*downcast::<DatetimeIntervalLit>(native)),
			Kind::YearMonthInterval => TypedValue::YearMonthInterval(*downcast::<YearMonthIntervalLit>(native)),
			Kind::Meta => TypedValue::Meta(*downcast::<&'static Type>(native)),
			Kind::Char => TypedValue::Char(OutOfLine::Owned(downcast::<Vec<u8>>(native).as_slice().into())),
			Kind::VarChar => {
				let bytes = downcast::<Vec<u8>>(native);
				let mut data = Vec::with_capacity(bytes.len() + 1);
				data.extend_from_slice(bytes);
				data.push(0);
				TypedValue::VarChar(OutOfLine::Owned(data.into_boxed_slice()))
			}
			Kind::NullType | Kind::Array => TypedValue::Null(self.ty.kind()),
		}
	}

	pub fn ty(&self) -> &'static Type {
		self.ty
	}

	pub fn is_null(&self) -> bool {
		self.value.is_none()
	}

	pub fn is_reference(&self) -> bool {
		matches!(self.value, Some(Native::Borrowed(_)))
	}

	pub fn owns_value(&self) -> bool {
		matches!(self.value, Some(Native::Owned(_)))
	}

	/// Panics if the value is NULL or not held as a `T`.
	pub fn literal<T: Any>(&self) -> &T {
		match self.try_literal::<T>() {
			Some(value) => value,
			None => panic!("{:?} does not hold a {}", self, std::any::type_name::<T>()),
		}
	}

	pub fn try_literal<T: Any>(&self) -> Option<&T> {
		self.value.as_ref()?.get().downcast_ref::<T>()
	}

	/// Replaces a borrowed native value with an owned copy.
	pub fn ensure_not_reference(&mut self) {
		if self.is_reference() {
			let owned = GenericValue::from_typed_value(self.ty, &self.to_typed_value());
			self.value = owned.value;
		}
	}

	pub fn into_owned(self) -> GenericValue<'static> {
		GenericValue::from_typed_value(self.ty, &self.to_typed_value())
	}

	/// Converts to `target`. Panics unless `target` is coercible from this
	/// value's type.
	pub fn coerce(&self, target: &'static Type) -> GenericValue<'static> {
		if target == self.ty {
			return GenericValue::from_typed_value(self.ty, &self.to_typed_value());
		}
		let coerced = target.coerce_value(&self.to_typed_value(), self.ty);
		GenericValue::from_typed_value(target, &coerced)
	}

	pub fn hash(&self) -> u64 {
		self.to_typed_value().hash()
	}
}

fn downcast<T: Any>(native: &NativeValue) -> &T {
	match native.downcast_ref::<T>() {
		Some(value) => value,
		None => panic!("native value is not a {}", std::any::type_name::<T>()),
	}
}

fn holds_representation(kind: Kind, value: &NativeValue) -> bool {
	match kind {
		Kind::Bool => value.is::<bool>(),
		Kind::Int => value.is::<i32>(),
		Kind::Long => value.is::<i64>(),
		Kind::Float => value.is::<f32>(),
		Kind::Double => value.is::<f64>(),
		Kind::Date => value.is::<DateLit>(),
		Kind::Datetime => value.is::<DatetimeLit>(),
		Kind::DatetimeInterval => value.is::<DatetimeIntervalLit>(),
		Kind::YearMonthInterval => value.is::<YearMonthIntervalLit>(),
		Kind::Meta => value.is::<&'static Type>(),
		Kind::Char | Kind::VarChar => value.is::<Vec<u8>>(),
		Kind::NullType | Kind::Array => false,
	}
}

impl Clone for GenericValue<'_> {
	fn clone(&self) -> Self {
		match &self.value {
			None => GenericValue {
				ty: self.ty,
				value: None,
			},
			Some(Native::Borrowed(value)) => GenericValue {
				ty: self.ty,
				value: Some(Native::Borrowed(*value)),
			},
			Some(Native::Owned(_)) => GenericValue::from_typed_value(self.ty, &self.to_typed_value()),
		}
	}
}

impl PartialEq for GenericValue<'_> {
	fn eq(&self, other: &Self) -> bool {
		if self.ty != other.ty {
			return false;
		}
		match (self.is_null(), other.is_null()) {
			(true, true) => true,
			(false, false) => self.to_typed_value().fast_equal_check(&other.to_typed_value()),
			_ => false,
		}
	}
}

impl Debug for GenericValue<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GenericValue").field("type", &self.ty.name()).field("value", &self.to_typed_value().to_string()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::TypeFactory;

	#[test]
	fn test_typed_value_roundtrip() {
		let long = TypeFactory::get(Kind::Long, false);
		let value = GenericValue::from_typed_value(long, &TypedValue::Long(99));
		assert_eq!(*value.literal::<i64>(), 99);
		assert_eq!(value.to_typed_value().literal::<i64>(), 99);

		let varchar = TypeFactory::get_with_length(Kind::VarChar, 10, false);
		let value = GenericValue::from_typed_value(varchar, &TypedValue::varchar("abc"));
		assert_eq!(value.literal::<Vec<u8>>(), b"abc");
		assert_eq!(value.to_typed_value().out_of_line_data(), Some(&b"abc\0"[..]));
	}

	#[test]
	fn test_reference_and_ensure_not_reference() {
		let int = TypeFactory::get(Kind::Int, false);
		let native = 5_i32;
		let mut value = GenericValue::reference(int, &native);
		assert!(value.is_reference());
		let copy = value.clone();
		assert!(copy.is_reference());

		value.ensure_not_reference();
		assert!(value.owns_value());
		assert_eq!(value, copy);
	}

	#[test]
	fn test_null() {
		let date_null = TypeFactory::get(Kind::Date, true);
		let value = GenericValue::null(date_null);
		assert!(value.is_null());
		assert!(value.to_typed_value().is_null());
		assert_eq!(value.try_literal::<DateLit>(), None);
		assert_eq!(value, GenericValue::null(date_null));
	}

	#[test]
	fn test_coerce() {
		let int = TypeFactory::get(Kind::Int, false);
		let double = TypeFactory::get(Kind::Double, true);
		let value = GenericValue::from_literal(int, 3_i32).coerce(double);
		assert_eq!(value.ty(), double);
		assert_eq!(*value.literal::<f64>(), 3.0);

		let char2 = TypeFactory::get_with_length(Kind::Char, 2, false);
		let varchar8 = TypeFactory::get_with_length(Kind::VarChar, 8, false);
		let value = GenericValue::from_literal(varchar8, b"hello".to_vec()).coerce(char2);
		assert_eq!(value.literal::<Vec<u8>>(), b"he");
	}

	#[test]
	fn test_meta_holds_type() {
		let meta = TypeFactory::get(Kind::Meta, false);
		let target = TypeFactory::get(Kind::Float, true);
		let value = GenericValue::from_literal(meta, target);
		assert_eq!(*value.literal::<&'static Type>(), target);
		assert_eq!(value.to_typed_value().meta(), target);
	}

	#[test]
	#[should_panic(expected = "does not hold")]
	fn test_literal_panics_on_wrong_type() {
		let int = TypeFactory::get(Kind::Int, false);
		GenericValue::from_literal(int, 1_i32).literal::<i64>();
	}

	#[test]
	fn test_equal_values_hash_alike() {
		let int = TypeFactory::get(Kind::Int, false);
		let a = GenericValue::from_literal(int, 7_i32);
		let native = 7_i32;
		let b = GenericValue::reference(int, &native);
		assert_eq!(a, b);
		assert_eq!(a.hash(), b.hash());
	}
}
