// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use stratum_type::{Kind, Type, TypeFactory, TypedValue, error::diagnostic::operation::not_applicable, return_error};

use crate::{
	native::{AsciiKind, CharKind, VarCharKind},
	signature::OperationSignature,
	unary::{UnaryFunctor, UnaryOperation, UnaryOperationId, UncheckedUnaryOperator, make_unchecked_unary},
};

/// Byte range of a substring, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Range {
	start: usize,
	length: Option<usize>,
}

impl Range {
	fn max_result_length(&self, input_length: usize) -> usize {
		let available = input_length.saturating_sub(self.start);
		self.length.map_or(available, |length| available.min(length))
	}
}

pub struct SubstringFunctor<K> {
	range: Range,
	_kind: PhantomData<K>,
}

impl<K: AsciiKind> UnaryFunctor for SubstringFunctor<K> {
	type Argument = K;
	type Result = VarCharKind;

	#[inline]
	fn apply(&self, argument: K::Value<'_>) -> Vec<u8> {
		let bytes = K::bytes(argument);
		if self.range.start >= bytes.len() {
			return Vec::new();
		}
		let end = match self.range.length {
			Some(length) => bytes.len().min(self.range.start.saturating_add(length)),
			None => bytes.len(),
		};
		bytes[self.range.start..end].to_vec()
	}
}

/// `substring(string, start[, length])` with a 1-based `start`. Both
/// positions are static Int arguments; the result is a VarChar sized for the
/// largest possible substring.
pub struct SubstringOperation;

impl SubstringOperation {
	fn range(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<Range> {
		let reject = |reason: &str| -> stratum_type::Result<Range> {
			return_error!(not_applicable(self.name(), &[argument], Some(reason.to_string())))
		};
		let (start, length) = match static_arguments {
			[TypedValue::Int(start)] => (*start, None),
			[TypedValue::Int(start), TypedValue::Int(length)] => (*start, Some(*length)),
			_ => return reject("expected a static Int start position and an optional static Int length"),
		};
		if start < 1 {
			return reject("the start position is 1-based");
		}
		let length = match length {
			Some(length) if length < 0 => return reject("the substring length must not be negative"),
			Some(length) => Some(length as usize),
			None => None,
		};
		Ok(Range {
			start: start as usize - 1,
			length,
		})
	}
}

impl UnaryOperation for SubstringOperation {
	fn id(&self) -> UnaryOperationId {
		UnaryOperationId::Substring
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		let mut signatures = Vec::new();
		for kind in [Kind::Char, Kind::VarChar] {
			signatures.push(OperationSignature::new(self.name(), [kind, Kind::Int], 1));
			signatures.push(OperationSignature::new(self.name(), [kind, Kind::Int, Kind::Int], 2));
		}
		signatures
	}

	fn can_apply_to(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		if !argument.kind().is_ascii_string() {
			return_error!(not_applicable(self.name(), &[argument], Some("expected a Char or VarChar".to_string())));
		}
		self.range(argument, static_arguments).map(|_| ())
	}

	fn result_type(&self, argument: &'static Type, static_arguments: &[TypedValue<'_>]) -> Option<&'static Type> {
		self.can_apply_to(argument, static_arguments).ok()?;
		let range = self.range(argument, static_arguments).ok()?;
		let length = range.max_result_length(argument.length()?);
		TypeFactory::try_get_with_length(Kind::VarChar, length, argument.is_nullable()).ok()
	}

	fn result_type_for_partial_argument_type(&self, _argument: Option<&'static Type>) -> Option<&'static Type> {
		None
	}

	fn partial_type_signature_is_plausible(&self, result: Option<&Type>, argument: Option<&Type>) -> bool {
		if argument.is_some_and(|argument| !argument.kind().is_ascii_string()) {
			return false;
		}
		// An unknown argument counts as nullable.
		if argument.is_none_or(Type::is_nullable) && result.is_some_and(|result| !result.is_nullable()) {
			return false;
		}
		result.is_none_or(|result| result.kind().is_ascii_string())
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
		let range = self.range(argument, static_arguments)?;
		let Some(result_type) = self.result_type(argument, static_arguments) else {
			return_error!(not_applicable(self.name(), &[argument], None));
		};
		Ok(match argument.kind() {
			Kind::Char => make_unchecked_unary(
				SubstringFunctor::<CharKind> {
					range,
					_kind: PhantomData,
				},
				argument,
				result_type,
			),
			_ => make_unchecked_unary(
				SubstringFunctor::<VarCharKind> {
					range,
					_kind: PhantomData,
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
	fn test_substring_with_length() {
		let varchar = TypeFactory::get_with_length(Kind::VarChar, 10, false);
		let statics = [TypedValue::Int(2), TypedValue::Int(3)];
		assert_eq!(
			SubstringOperation.result_type(varchar, &statics),
			Some(TypeFactory::get_with_length(Kind::VarChar, 3, false))
		);
		let value = SubstringOperation.apply_checked(&TypedValue::varchar("database"), varchar, &statics).unwrap();
		assert_eq!(value.as_str(), Some("ata"));
	}

	#[test]
	fn test_substring_to_end() {
		let char6 = TypeFactory::get_with_length(Kind::Char, 6, true);
		let statics = [TypedValue::Int(4)];
		let operator = SubstringOperation.make_unchecked_unary_operator(char6, &statics).unwrap();
		assert_eq!(operator.result_type(), TypeFactory::get_with_length(Kind::VarChar, 3, true));
		let column = ColumnVector::from_values(
			char6,
			[TypedValue::char("planet"), TypedValue::char("ab"), TypedValue::Null(Kind::Char)],
		);
		let result = operator.apply_to_column_vector(&column);
		assert_eq!(result.get_typed_value(0).as_str(), Some("net"));
		assert_eq!(result.get_typed_value(1).as_str(), Some(""));
		assert!(result.is_null(2));
	}

	#[test]
	fn test_start_past_type_length() {
		let varchar = TypeFactory::get_with_length(Kind::VarChar, 2, false);
		let statics = [TypedValue::Int(5)];
		assert_eq!(SubstringOperation.result_type(varchar, &statics), Some(TypeFactory::get_with_length(Kind::VarChar, 0, false)));
	}

	#[test]
	fn test_unknown_argument_needs_nullable_result() {
		let varchar = TypeFactory::get_with_length(Kind::VarChar, 8, false);
		assert!(!SubstringOperation.partial_type_signature_is_plausible(Some(varchar), None));
		assert!(SubstringOperation.partial_type_signature_is_plausible(Some(varchar.nullable_version()), None));
		assert!(SubstringOperation.partial_type_signature_is_plausible(Some(varchar), Some(varchar)));
	}

	#[test]
	fn test_rejects_bad_positions() {
		let varchar = TypeFactory::get_with_length(Kind::VarChar, 8, false);
		assert!(SubstringOperation.can_apply_to(varchar, &[TypedValue::Int(0)]).is_err());
		assert!(SubstringOperation.can_apply_to(varchar, &[TypedValue::Int(1), TypedValue::Int(-1)]).is_err());
		assert!(SubstringOperation.can_apply_to(varchar, &[TypedValue::Long(1)]).is_err());
	}
}
