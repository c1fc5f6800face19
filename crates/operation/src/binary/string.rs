// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use stratum_type::{Kind, Type, TypeFactory, TypedValue, error::diagnostic::operation::not_applicable, return_error};

use crate::{
	binary::{BinaryFunctor, BinaryOperation, BinaryOperationId, UncheckedBinaryOperator, make_unchecked_binary},
	native::{AsciiKind, CharKind, VarCharKind},
	signature::OperationSignature,
};

pub struct ConcatFunctor<L, R>(PhantomData<(L, R)>);

impl<L: AsciiKind, R: AsciiKind> BinaryFunctor for ConcatFunctor<L, R> {
	type Left = L;
	type Right = R;
	type Result = VarCharKind;

	#[inline]
	fn apply(&self, left: L::Value<'_>, right: R::Value<'_>) -> Vec<u8> {
		let (left, right) = (L::bytes(left), R::bytes(right));
		let mut output = Vec::with_capacity(left.len() + right.len() + 1);
		output.extend_from_slice(left);
		output.extend_from_slice(right);
		output
	}
}

/// String concatenation, registered as `concat` and `||`. The result is a
/// VarChar long enough for both arguments.
pub struct ConcatOperation;

impl ConcatOperation {
	pub const ALIAS: &'static str = "||";
}

impl BinaryOperation for ConcatOperation {
	fn id(&self) -> BinaryOperationId {
		BinaryOperationId::Concat
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		let mut signatures = Vec::new();
		for name in [self.name(), Self::ALIAS] {
			for left in [Kind::Char, Kind::VarChar] {
				for right in [Kind::Char, Kind::VarChar] {
					signatures.push(OperationSignature::new(name, [left, right], 0));
				}
			}
		}
		signatures
	}

	fn can_apply_to(&self, left: &'static Type, right: &'static Type, _static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		if !left.kind().is_ascii_string() || !right.kind().is_ascii_string() {
			return_error!(not_applicable(self.name(), &[left, right], Some("both arguments must be strings".to_string())));
		}
		Ok(())
	}

	fn result_type(&self, left: &'static Type, right: &'static Type, _static_arguments: &[TypedValue<'_>]) -> Option<&'static Type> {
		let length = left.length()?.checked_add(right.length()?)?;
		if !left.kind().is_ascii_string() || !right.kind().is_ascii_string() {
			return None;
		}
		TypeFactory::try_get_with_length(Kind::VarChar, length, left.is_nullable() || right.is_nullable()).ok()
	}

	fn result_type_for_partial_argument_types(&self, left: Option<&'static Type>, right: Option<&'static Type>) -> Option<&'static Type> {
		self.result_type(left?, right?, &[])
	}

	fn partial_type_signature_is_plausible(&self, result: Option<&Type>, left: Option<&Type>, right: Option<&Type>) -> bool {
		if let (Some(left), Some(right)) = (left, right) {
			return match self.result_type(left.non_nullable_version(), right.non_nullable_version(), &[]) {
				Some(actual) => {
					let nullable = left.is_nullable() || right.is_nullable();
					result.is_none_or(|result| {
						result.kind() == actual.kind() && result.length() == actual.length() && result.is_nullable() == nullable
					})
				}
				None => false,
			};
		}
		if [left, right].iter().flatten().any(|argument| !argument.kind().is_ascii_string()) {
			return false;
		}
		result.is_none_or(|result| result.is_nullable() && result.kind() == Kind::VarChar)
	}

	fn push_down_type_hint(&self, _result_hint: Option<&Type>) -> (Option<&'static Type>, Option<&'static Type>) {
		(None, None)
	}

	fn make_unchecked_binary_operator(
		&self,
		left: &'static Type,
		right: &'static Type,
		static_arguments: &[TypedValue<'_>],
	) -> stratum_type::Result<Box<dyn UncheckedBinaryOperator>> {
		self.can_apply_to(left, right, static_arguments)?;
		let Some(result) = self.result_type(left, right, static_arguments) else {
			return_error!(not_applicable(self.name(), &[left, right], None));
		};
		Ok(match (left.kind(), right.kind()) {
			(Kind::Char, Kind::Char) => make_unchecked_binary(ConcatFunctor::<CharKind, CharKind>(PhantomData), left, right, result),
			(Kind::Char, _) => make_unchecked_binary(ConcatFunctor::<CharKind, VarCharKind>(PhantomData), left, right, result),
			(_, Kind::Char) => make_unchecked_binary(ConcatFunctor::<VarCharKind, CharKind>(PhantomData), left, right, result),
			_ => make_unchecked_binary(ConcatFunctor::<VarCharKind, VarCharKind>(PhantomData), left, right, result),
		})
	}
}
