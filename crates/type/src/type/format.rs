// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	kind::Kind,
	r#type::{Type, TypeFactory},
	value::{DateLit, DatetimeIntervalLit, DatetimeLit, OutOfLine, TypedValue, YearMonthIntervalLit},
};

impl Type {
	/// Maximum number of characters [`Type::print_value_to_string`] produces.
	pub fn print_width(&self) -> usize {
		match self.kind() {
			Kind::Bool => 5,
			Kind::Int => 11,
			Kind::Long => 20,
			Kind::Float => 17,
			Kind::Double => 25,
			Kind::Char | Kind::VarChar => self.length().unwrap_or(0),
			Kind::Date => 12,
			Kind::Datetime => 29,
			Kind::DatetimeInterval => 32,
			Kind::YearMonthInterval => 34,
			Kind::NullType => 4,
			Kind::Meta => 32,
			Kind::Array => 0,
		}
	}

	pub fn print_value_to_string(&self, value: &TypedValue<'_>) -> String {
		debug_assert!(value.is_null() || value.kind() == self.kind());
		value.to_string()
	}

	/// Parses the printed form of a value. Returns `None` on malformed input,
	/// on trailing garbage, and on strings longer than the type's length.
	pub fn parse_value_from_string(&self, input: &str) -> Option<TypedValue<'static>> {
		let value = match self.kind() {
			Kind::Bool => {
				if input.eq_ignore_ascii_case("true") {
					TypedValue::Bool(true)
				} else if input.eq_ignore_ascii_case("false") {
					TypedValue::Bool(false)
				} else {
					return None;
				}
			}
			Kind::Int => TypedValue::Int(input.parse().ok()?),
			Kind::Long => TypedValue::Long(input.parse().ok()?),
			Kind::Float => TypedValue::from(input.parse::<f32>().ok()?),
			Kind::Double => TypedValue::from(input.parse::<f64>().ok()?),
			Kind::Char => {
				let length = self.length()?;
				if !input.is_ascii() || input.len() > length {
					return None;
				}
				let mut data = input.as_bytes().to_vec();
				if data.len() < length {
					data.push(0);
				}
				TypedValue::Char(OutOfLine::Owned(data.into_boxed_slice()))
			}
			Kind::VarChar => {
				let length = self.length()?;
				if !input.is_ascii() || input.len() > length {
					return None;
				}
				TypedValue::varchar(input)
			}
			Kind::Date => TypedValue::Date(DateLit::parse(input)?),
			Kind::Datetime => TypedValue::Datetime(DatetimeLit::parse(input)?),
			Kind::DatetimeInterval => TypedValue::DatetimeInterval(DatetimeIntervalLit::parse(input)?),
			Kind::YearMonthInterval => TypedValue::YearMonthInterval(YearMonthIntervalLit::parse(input)?),
			Kind::Meta => TypedValue::Meta(TypeFactory::parse_type_name(input)?),
			Kind::NullType | Kind::Array => return None,
		};
		Some(value)
	}

	/// Panics if the type is not nullable.
	pub fn make_null_value(&self) -> TypedValue<'static> {
		assert!(self.is_nullable(), "{} is not nullable", self.name());
		TypedValue::Null(self.kind())
	}

	/// Zero of a numeric or interval type. Panics for other kinds.
	pub fn make_zero_value(&self) -> TypedValue<'static> {
		match self.kind() {
			Kind::Int => TypedValue::Int(0),
			Kind::Long => TypedValue::Long(0),
			Kind::Float => TypedValue::Float(0.0),
			Kind::Double => TypedValue::Double(0.0),
			Kind::DatetimeInterval => TypedValue::DatetimeInterval(DatetimeIntervalLit::default()),
			Kind::YearMonthInterval => TypedValue::YearMonthInterval(YearMonthIntervalLit::default()),
			kind => panic!("{} has no zero value", kind),
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::{Kind, Type, TypeFactory};

	fn reparses(ty: &Type, input: &str) {
		let value = ty.parse_value_from_string(input).unwrap_or_else(|| panic!("{} rejected {:?}", ty, input));
		let printed = ty.print_value_to_string(&value);
		assert!(printed.len() <= ty.print_width(), "{:?} wider than {}", printed, ty.print_width());
		let again = ty.parse_value_from_string(&printed).unwrap_or_else(|| panic!("{} rejected {:?}", ty, printed));
		assert!(again.fast_equal_check(&value), "{:?} -> {:?}", input, printed);
	}

	#[test]
	fn test_parse_print_inverse() {
		reparses(TypeFactory::get(Kind::Bool, false), "TRUE");
		reparses(TypeFactory::get(Kind::Int, false), "-2147483648");
		reparses(TypeFactory::get(Kind::Long, false), "+42");
		reparses(TypeFactory::get(Kind::Float, false), "3.4028235e38");
		reparses(TypeFactory::get(Kind::Double, false), "-1.7976931348623157e308");
		reparses(TypeFactory::get(Kind::Double, false), "0.1");
		reparses(TypeFactory::get_with_length(Kind::Char, 6, false), "abc");
		reparses(TypeFactory::get_with_length(Kind::VarChar, 6, false), "abcdef");
		reparses(TypeFactory::get(Kind::Date, false), "+10000-02-29");
		reparses(TypeFactory::get(Kind::Datetime, false), "1969-12-31 23:59:59.5");
		reparses(TypeFactory::get(Kind::DatetimeInterval, false), "36 hours");
		reparses(TypeFactory::get(Kind::YearMonthInterval, false), "-2 centuries");
		reparses(TypeFactory::get(Kind::Meta, false), "char(3) null");
	}

	#[test]
	fn test_rejects_trailing_garbage() {
		assert!(TypeFactory::get(Kind::Int, false).parse_value_from_string("12x").is_none());
		assert!(TypeFactory::get(Kind::Int, false).parse_value_from_string(" 12").is_none());
		assert!(TypeFactory::get(Kind::Bool, false).parse_value_from_string("yes").is_none());
		assert!(TypeFactory::get(Kind::Date, false).parse_value_from_string("2024-01-01Z").is_none());
	}

	#[test]
	fn test_string_length_limits() {
		let char3 = TypeFactory::get_with_length(Kind::Char, 3, false);
		assert!(char3.parse_value_from_string("abcd").is_none());
		let short = char3.parse_value_from_string("ab").unwrap();
		assert_eq!(short.out_of_line_data(), Some(&b"ab\0"[..]));
		let exact = char3.parse_value_from_string("abc").unwrap();
		assert_eq!(exact.out_of_line_data(), Some(&b"abc"[..]));

		let varchar3 = TypeFactory::get_with_length(Kind::VarChar, 3, false);
		assert!(varchar3.parse_value_from_string("abcd").is_none());
		assert_eq!(varchar3.parse_value_from_string("abc").unwrap().out_of_line_data(), Some(&b"abc\0"[..]));
	}

	#[test]
	fn test_null_and_zero_values() {
		let long_null = TypeFactory::get(Kind::Long, true);
		assert!(long_null.make_null_value().is_null());
		assert_eq!(long_null.make_zero_value().literal::<i64>(), 0);
		assert_eq!(long_null.print_value_to_string(&long_null.make_null_value()), "NULL");
		assert!(TypeFactory::get(Kind::NullType, true).parse_value_from_string("NULL").is_none());
	}

	#[test]
	#[should_panic(expected = "no zero value")]
	fn test_zero_value_requires_numeric() {
		TypeFactory::get(Kind::Date, false).make_zero_value();
	}
}
