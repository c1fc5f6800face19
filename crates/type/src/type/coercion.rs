// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	kind::Kind,
	r#type::Type,
	value::{OutOfLine, TypedValue},
};

impl Type {
	/// `true` if values of `source` convert to this type, possibly losing
	/// precision or truncating strings.
	pub fn is_coercible_from(&self, source: &Type) -> bool {
		if source.is_nullable() && !self.is_nullable() {
			return false;
		}
		if source.kind() == Kind::NullType {
			return self.is_nullable();
		}

		let numeric_or_bool = |kind: Kind| kind == Kind::Bool || kind.is_numeric();
		match (self.kind(), source.kind()) {
			(target, source) if numeric_or_bool(target) && numeric_or_bool(source) => true,
			(target, source) if target.is_ascii_string() && source.is_ascii_string() => true,
			(target, source) => target == source && target != Kind::NullType,
		}
	}

	/// `true` if every value of `source` converts to this type without loss.
	pub fn is_safely_coercible_from(&self, source: &Type) -> bool {
		if source.is_nullable() && !self.is_nullable() {
			return false;
		}
		if source.kind() == Kind::NullType {
			return self.is_nullable();
		}

		match self.kind() {
			Kind::Bool => source.kind() == Kind::Bool,
			Kind::Int => matches!(source.kind(), Kind::Bool | Kind::Int),
			Kind::Long => matches!(source.kind(), Kind::Bool | Kind::Int | Kind::Long),
			Kind::Float => matches!(source.kind(), Kind::Bool | Kind::Int | Kind::Float),
			Kind::Double => matches!(source.kind(), Kind::Bool | Kind::Int | Kind::Long | Kind::Float | Kind::Double),
			Kind::Char | Kind::VarChar => match (self.length(), source.length()) {
				(Some(target), Some(source)) => source <= target,
				_ => false,
			},
			kind => source.kind() == kind,
		}
	}

	/// Converts `value`, of type `source`, to this type.
	///
	/// Panics unless `self.is_coercible_from(source)`.
	pub fn coerce_value<'a>(&self, value: &TypedValue<'a>, source: &Type) -> TypedValue<'a> {
		assert!(self.is_coercible_from(source), "cannot coerce {} to {}", source.name(), self.name());

		if value.is_null() {
			return TypedValue::Null(self.kind());
		}
		if self.kind() == source.kind() && !self.kind().is_ascii_string() {
			return value.clone();
		}

		match self.kind() {
			Kind::Bool => TypedValue::Bool(numeric_as_f64(value) != 0.0),
			Kind::Int => TypedValue::Int(numeric_as_i64(value) as i32),
			Kind::Long => TypedValue::Long(numeric_as_i64(value)),
			Kind::Float => TypedValue::from(numeric_as_f64(value) as f32),
			Kind::Double => TypedValue::from(numeric_as_f64(value)),
			Kind::Char => {
				let length = self.length().unwrap_or(0);
				if value.kind() == Kind::Char && value.ascii_string_length() <= length {
					return value.clone();
				}
				let bytes = value.ascii_bytes();
				let bytes = &bytes[..bytes.len().min(length)];
				TypedValue::Char(OutOfLine::Owned(bytes.into()))
			}
			Kind::VarChar => {
				let length = self.length().unwrap_or(0);
				if value.kind() == Kind::VarChar && value.ascii_string_length() <= length {
					return value.clone();
				}
				let bytes = value.ascii_bytes();
				let mut data = Vec::with_capacity(length.min(bytes.len()) + 1);
				data.extend_from_slice(&bytes[..bytes.len().min(length)]);
				data.push(0);
				TypedValue::VarChar(OutOfLine::Owned(data.into_boxed_slice()))
			}
			_ => value.clone(),
		}
	}
}

fn numeric_as_i64(value: &TypedValue<'_>) -> i64 {
	match value {
		TypedValue::Bool(v) => *v as i64,
		TypedValue::Int(v) => *v as i64,
		TypedValue::Long(v) => *v,
		TypedValue::Float(v) => *v as i64,
		TypedValue::Double(v) => *v as i64,
		other => panic!("{} is not numeric", other.kind()),
	}
}

fn numeric_as_f64(value: &TypedValue<'_>) -> f64 {
	match value {
		TypedValue::Bool(v) => *v as u8 as f64,
		TypedValue::Int(v) => *v as f64,
		TypedValue::Long(v) => *v as f64,
		TypedValue::Float(v) => *v as f64,
		TypedValue::Double(v) => *v,
		other => panic!("{} is not numeric", other.kind()),
	}
}
