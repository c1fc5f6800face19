// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use stratum_type::{
	DateLit, DatetimeLit, Kind, Type, TypeFactory, TypedValue, error::diagnostic::operation::not_applicable,
	return_error,
};

use crate::{
	native::{DateKind, DatetimeKind, LongKind},
	signature::OperationSignature,
	unary::{UnaryFunctor, UnaryOperation, UnaryOperationId, UncheckedUnaryOperator, make_unchecked_unary},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateExtractUnit {
	Year,
	Month,
	Day,
	Hour,
	Minute,
	Second,
}

impl DateExtractUnit {
	pub const ALL: [DateExtractUnit; 6] = [Self::Year, Self::Month, Self::Day, Self::Hour, Self::Minute, Self::Second];

	pub fn name(self) -> &'static str {
		match self {
			Self::Year => "year",
			Self::Month => "month",
			Self::Day => "day",
			Self::Hour => "hour",
			Self::Minute => "minute",
			Self::Second => "second",
		}
	}

	/// Case-insensitive.
	pub fn parse(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|unit| unit.name().eq_ignore_ascii_case(name.trim()))
	}

	/// `true` if the unit exists on dates without a time of day.
	pub fn applies_to_date(self) -> bool {
		matches!(self, Self::Year | Self::Month | Self::Day)
	}
}

impl Display for DateExtractUnit {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

pub struct DateFieldFunctor {
	unit: DateExtractUnit,
}

impl UnaryFunctor for DateFieldFunctor {
	type Argument = DateKind;
	type Result = LongKind;

	#[inline]
	fn apply(&self, argument: DateLit) -> i64 {
		match self.unit {
			DateExtractUnit::Year => argument.year(),
			DateExtractUnit::Month => argument.month() as i64,
			_ => argument.day() as i64,
		}
	}
}

pub struct DatetimeFieldFunctor {
	unit: DateExtractUnit,
}

impl UnaryFunctor for DatetimeFieldFunctor {
	type Argument = DatetimeKind;
	type Result = LongKind;

	#[inline]
	fn apply(&self, argument: DatetimeLit) -> i64 {
		match self.unit {
			DateExtractUnit::Year => argument.year(),
			DateExtractUnit::Month => argument.month() as i64,
			DateExtractUnit::Day => argument.day() as i64,
			DateExtractUnit::Hour => argument.hour() as i64,
			DateExtractUnit::Minute => argument.minute() as i64,
			DateExtractUnit::Second => argument.second() as i64,
		}
	}
}

/// `extract(value, 'unit')` over Date and Datetime, producing a Long.
pub struct DateExtractOperation;

impl DateExtractOperation {
	fn unit(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<DateExtractUnit> {
		let unit = match static_arguments {
			[value] if !value.is_null() && value.kind().is_ascii_string() => value.as_str().and_then(DateExtractUnit::parse),
			_ => None,
		};
		match unit {
			Some(unit) if argument.kind() == Kind::Date && !unit.applies_to_date() => {
				return_error!(not_applicable(self.name(), &[argument], Some(format!("a Date has no {} field", unit))))
			}
			Some(unit) => Ok(unit),
			None => return_error!(not_applicable(
				self.name(),
				&[argument],
				Some("expected one of year, month, day, hour, minute, second".to_string())
			)),
		}
	}
}

impl UnaryOperation for DateExtractOperation {
	fn id(&self) -> UnaryOperationId {
		UnaryOperationId::Extract
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		[Kind::Date, Kind::Datetime]
			.into_iter()
			.map(|kind| OperationSignature::new(self.name(), [kind, Kind::VarChar], 1))
			.collect()
	}

	fn can_apply_to(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		if !matches!(argument.kind(), Kind::Date | Kind::Datetime) {
			return_error!(not_applicable(self.name(), &[argument], Some("expected a Date or Datetime".to_string())));
		}
		self.unit(argument, static_arguments).map(|_| ())
	}

	fn result_type(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> Option<&'static Type> {
		self.can_apply_to(argument, static_arguments).ok()?;
		Some(TypeFactory::get(Kind::Long, argument.is_nullable()))
	}

	fn result_type_for_partial_argument_type(&self, argument: Option<&'static Type>) -> Option<&'static Type> {
		match argument {
			Some(argument) if !matches!(argument.kind(), Kind::Date | Kind::Datetime) => None,
			Some(argument) => Some(TypeFactory::get(Kind::Long, argument.is_nullable())),
			None => Some(TypeFactory::get(Kind::Long, true)),
		}
	}

	fn partial_type_signature_is_plausible(&self, result: Option<&Type>, argument: Option<&Type>) -> bool {
		match argument {
			Some(argument) if !matches!(argument.kind(), Kind::Date | Kind::Datetime) => false,
			Some(argument) => result.is_none_or(|result| result == TypeFactory::get(Kind::Long, argument.is_nullable())),
			None => result.is_none_or(|result| {
				result.is_nullable() && result.is_safely_coercible_from(TypeFactory::get(Kind::Long, true))
			}),
		}
	}

	fn push_down_type_hint(&self, _result_hint: Option<&Type>) -> Option<&'static Type> {
		None
	}

	fn make_unchecked_unary_operator(
		&self,
		argument: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<Box<dyn UncheckedUnaryOperator>> {
		self.can_apply_to(argument, static_arguments)?;
		let unit = self.unit(argument, static_arguments)?;
		let result_type = TypeFactory::get(Kind::Long, argument.is_nullable());
		Ok(match argument.kind() {
			Kind::Date => make_unchecked_unary(
				DateFieldFunctor {
					unit,
				},
				argument,
				result_type,
			),
			_ => make_unchecked_unary(
				DatetimeFieldFunctor {
					unit,
				},
				argument,
				result_type,
			),
		})
	}
}

#[cfg(test)]
mod tests {
	use stratum_type::ColumnVector;

	use super::*;

	#[test]
	fn test_parse_unit() {
		assert_eq!(DateExtractUnit::parse("YEAR"), Some(DateExtractUnit::Year));
		assert_eq!(DateExtractUnit::parse(" minute "), Some(DateExtractUnit::Minute));
		assert_eq!(DateExtractUnit::parse("week"), None);
	}

	#[test]
	fn test_extract_from_datetime() {
		let datetime = TypeFactory::get(Kind::Datetime, false);
		let value = TypedValue::Datetime(DatetimeLit::parse("2023-07-14 09:26:53").unwrap());
		for (unit, expected) in [("year", 2023), ("month", 7), ("day", 14), ("hour", 9), ("minute", 26), ("second", 53)] {
			let result = DateExtractOperation.apply_checked(&value, datetime, &[TypedValue::varchar(unit)]).unwrap();
			assert_eq!(result.literal::<i64>(), expected, "{}", unit);
		}
	}

	#[test]
	fn test_extract_from_date_column() {
		let date = TypeFactory::get(Kind::Date, true);
		let column = ColumnVector::from_values(
			date,
			[TypedValue::Date(DateLit::new(-44, 3, 15).unwrap()), TypedValue::Null(Kind::Date)],
		);
		let statics = [TypedValue::varchar("year")];
		let operator = DateExtractOperation.make_unchecked_unary_operator(date, &statics).unwrap();
		assert_eq!(operator.result_type(), TypeFactory::get(Kind::Long, true));
		let result = operator.apply_to_column_vector(&column);
		assert_eq!(result.native_value::<i64>(0), Some(-44));
		assert!(result.is_null(1));
	}

	#[test]
	fn test_plausible_result_types() {
		let date = TypeFactory::get(Kind::Date, false);
		let long = TypeFactory::get(Kind::Long, false);
		assert!(DateExtractOperation.partial_type_signature_is_plausible(Some(long), Some(date)));
		assert!(!DateExtractOperation.partial_type_signature_is_plausible(Some(long.nullable_version()), Some(date)));
		assert!(!DateExtractOperation.partial_type_signature_is_plausible(Some(long), None));
		assert!(DateExtractOperation.partial_type_signature_is_plausible(Some(long.nullable_version()), None));
		assert!(!DateExtractOperation.partial_type_signature_is_plausible(None, Some(long)));
	}

	#[test]
	fn test_time_units_not_applicable_to_date() {
		let date = TypeFactory::get(Kind::Date, false);
		let err = DateExtractOperation.can_apply_to(date, &[TypedValue::varchar("hour")]).unwrap_err();
		assert_eq!(err.code(), "OPERATION_003");
		assert!(DateExtractOperation.can_apply_to(date, &[TypedValue::varchar("fortnight")]).is_err());
	}
}
