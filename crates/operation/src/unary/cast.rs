// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use stratum_type::{
	ColumnVector, Kind, Type, TypedValue, ValueAccessor, error::diagnostic::operation::not_applicable, return_error,
};
use tracing::trace;

use crate::{
	native::{CharKind, ResultKind, VarCharKind},
	signature::OperationSignature,
	unary::{UnaryOperation, UnaryOperationId, UncheckedUnaryOperator},
};

/// Kinds a value can be cast from.
const SOURCE_KINDS: [Kind; 11] = [
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
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CastMode {
	/// `Type::coerce_value`.
	Coerce,
	/// Parse the printed form of a string. Unparsable strings become NULL.
	Parse,
	/// Print into a string, truncated to the target length.
	Print,
}

/// `cast(value, type)`: the target type is the single static Meta argument.
pub struct CastOperation;

impl CastOperation {
	fn target(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<&'static Type> {
		match static_arguments {
			[TypedValue::Meta(target)] => Ok(*target),
			_ => return_error!(not_applicable(
				self.name(),
				&[argument],
				Some("cast expects the target type as its only static argument".to_string())
			)),
		}
	}

	fn plan(source: &'static Type, target: &'static Type) -> Option<(CastMode, &'static Type)> {
		let nullable = if source.is_nullable() {
			target.nullable_version()
		} else {
			target
		};
		if nullable.is_coercible_from(source) {
			return Some((CastMode::Coerce, nullable));
		}
		let source_kind = source.kind();
		let target_kind = target.kind();
		if source_kind.is_ascii_string() && !matches!(target_kind, Kind::NullType | Kind::Array) {
			return Some((CastMode::Parse, target.nullable_version()));
		}
		if target_kind.is_ascii_string() && SOURCE_KINDS.contains(&source_kind) {
			return Some((CastMode::Print, nullable));
		}
		None
	}
}

impl UnaryOperation for CastOperation {
	fn id(&self) -> UnaryOperationId {
		UnaryOperationId::Cast
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		SOURCE_KINDS.into_iter().map(|kind| OperationSignature::new(self.name(), [kind, Kind::Meta], 1)).collect()
	}

	fn can_apply_to(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		let target = self.target(argument, static_arguments)?;
		if Self::plan(argument, target).is_none() {
			return_error!(not_applicable(
				self.name(),
				&[argument, target],
				Some(format!("{} values cannot be cast to {}", argument.name(), target.name()))
			));
		}
		Ok(())
	}

	fn result_type(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> Option<&'static Type> {
		let target = self.target(argument, static_arguments).ok()?;
		Self::plan(argument, target).map(|(_, result)| result)
	}

	fn result_type_for_partial_argument_type(&self, _argument: Option<&'static Type>) -> Option<&'static Type> {
		None
	}

	fn partial_type_signature_is_plausible(&self, _result: Option<&Type>, argument: Option<&Type>) -> bool {
		argument.is_none_or(|argument| SOURCE_KINDS.contains(&argument.kind()))
	}

	fn push_down_type_hint(&self, _result_hint: Option<&Type>) -> Option<&'static Type> {
		None
	}

	fn make_unchecked_unary_operator(
		&self,
		argument: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<Box<dyn UncheckedUnaryOperator>> {
		let target = self.target(argument, static_arguments)?;
		let Some((mode, result_type)) = Self::plan(argument, target) else {
			return_error!(not_applicable(self.name(), &[argument, target], None));
		};
		Ok(Box::new(CastOperator {
			source: argument,
			result_type,
			mode,
		}))
	}
}

struct CastOperator {
	source: &'static Type,
	result_type: &'static Type,
	mode: CastMode,
}

impl CastOperator {
	fn cast(&self, value: &TypedValue<'_>) -> TypedValue<'static> {
		if value.is_null() {
			return TypedValue::Null(self.result_type.kind());
		}
		match self.mode {
			CastMode::Coerce => self.result_type.coerce_value(value, self.source).into_owned(),
			CastMode::Parse => value
				.as_str()
				.and_then(|input| self.result_type.parse_value_from_string(input.trim()))
				.unwrap_or(TypedValue::Null(self.result_type.kind())),
			CastMode::Print => {
				let printed = self.source.print_value_to_string(value).into_bytes();
				match self.result_type.kind() {
					Kind::Char => CharKind::into_typed(printed, self.result_type),
					_ => VarCharKind::into_typed(printed, self.result_type),
				}
			}
		}
	}
}

impl UncheckedUnaryOperator for CastOperator {
	fn result_type(&self) -> &'static Type {
		self.result_type
	}

	fn apply_to_typed_value(&self, argument: &TypedValue<'_>) -> TypedValue<'static> {
		self.cast(argument)
	}

	fn apply_to_data(&self, argument: Option<&[u8]>) -> TypedValue<'static> {
		match argument {
			Some(bytes) => self.cast(&TypedValue::from_native_bytes(self.source.kind(), bytes)),
			None => TypedValue::Null(self.result_type.kind()),
		}
	}

	fn apply_to_value_accessor(&self, accessor: &mut dyn ValueAccessor, attr: usize) -> ColumnVector {
		trace!(source = %self.source, target = %self.result_type, mode = ?self.mode, "casting through typed values");
		let mut result = ColumnVector::with_capacity(self.result_type, accessor.num_values());
		accessor.begin_iteration();
		while accessor.next() {
			let value = self.cast(&accessor.get_typed_value(attr));
			result.append_typed_value(&value);
		}
		result
	}
}

#[cfg(test)]
mod tests {
	use stratum_type::{DateLit, TypeFactory};

	use super::*;

	fn to(kind: Kind) -> [TypedValue<'static>; 1] {
		[TypedValue::Meta(TypeFactory::get(kind, false))]
	}

	#[test]
	fn test_numeric_cast_truncates() {
		let double = TypeFactory::get(Kind::Double, false);
		let value = CastOperation.apply_checked(&TypedValue::Double(2.9), double, &to(Kind::Int)).unwrap();
		assert_eq!(value.literal::<i32>(), 2);
		assert_eq!(CastOperation.result_type(double, &to(Kind::Int)), Some(TypeFactory::get(Kind::Int, false)));
	}

	#[test]
	fn test_nullable_source_yields_nullable_result() {
		let long = TypeFactory::get(Kind::Long, true);
		let operator = CastOperation.make_unchecked_unary_operator(long, &to(Kind::Double)).unwrap();
		assert_eq!(operator.result_type(), TypeFactory::get(Kind::Double, true));
		let column = ColumnVector::from_values(long, [TypedValue::Long(3), TypedValue::Null(Kind::Long)]);
		let result = operator.apply_to_column_vector(&column);
		assert_eq!(result.native_value::<f64>(0), Some(3.0));
		assert!(result.is_null(1));
	}

	#[test]
	fn test_parse_and_print() {
		let varchar = TypeFactory::get_with_length(Kind::VarChar, 16, false);
		let operator = CastOperation.make_unchecked_unary_operator(varchar, &to(Kind::Date)).unwrap();
		assert!(operator.result_type().is_nullable());
		let date = operator.apply_to_typed_value(&TypedValue::varchar("2024-02-29"));
		assert_eq!(date.literal::<DateLit>(), DateLit::new(2024, 2, 29).unwrap());
		assert!(operator.apply_to_typed_value(&TypedValue::varchar("not a date")).is_null());

		let char4 = [TypedValue::Meta(TypeFactory::get_with_length(Kind::Char, 4, false))];
		let int = TypeFactory::get(Kind::Int, false);
		let printed = CastOperation.apply_checked(&TypedValue::Int(123456), int, &char4).unwrap();
		assert_eq!(printed.as_str(), Some("1234"));
	}

	#[test]
	fn test_rejects_incompatible_targets() {
		let date = TypeFactory::get(Kind::Date, false);
		let err = CastOperation.can_apply_to(date, &to(Kind::Int)).unwrap_err();
		assert_eq!(err.code(), "OPERATION_003");
		assert!(CastOperation.can_apply_to(date, &[]).is_err());
	}
}
