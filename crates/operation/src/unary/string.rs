// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use stratum_type::{Kind, Type, TypeFactory, TypedValue, error::diagnostic::operation::not_applicable, return_error};

use crate::{
	native::{AsciiKind, CharKind, IntKind, ResultKind, VarCharKind},
	signature::OperationSignature,
	unary::{UnaryFunctor, UnaryOperation, UnaryOperationId, UncheckedUnaryOperator, make_unchecked_unary},
};

pub struct LengthFunctor<K>(PhantomData<K>);

impl<K: AsciiKind> UnaryFunctor for LengthFunctor<K> {
	type Argument = K;
	type Result = IntKind;

	#[inline]
	fn apply(&self, argument: K::Value<'_>) -> i32 {
		K::bytes(argument).len() as i32
	}
}

pub struct CaseFunctor<K> {
	upper: bool,
	_kind: PhantomData<K>,
}

impl<K> UnaryFunctor for CaseFunctor<K>
where
	K: AsciiKind + ResultKind<Output = Vec<u8>>,
{
	type Argument = K;
	type Result = K;

	#[inline]
	fn apply(&self, argument: K::Value<'_>) -> Vec<u8> {
		let bytes = K::bytes(argument);
		if self.upper {
			bytes.to_ascii_uppercase()
		} else {
			bytes.to_ascii_lowercase()
		}
	}
}

/// `length`, `lower` and `upper` over Char and VarChar.
pub struct StringUnaryOperation {
	id: UnaryOperationId,
}

impl StringUnaryOperation {
	pub const IDS: [UnaryOperationId; 3] = [UnaryOperationId::Length, UnaryOperationId::Lower, UnaryOperationId::Upper];

	pub fn new(id: UnaryOperationId) -> Self {
		debug_assert!(Self::IDS.contains(&id));
		Self {
			id,
		}
	}

	fn is_length(&self) -> bool {
		self.id == UnaryOperationId::Length
	}
}

impl UnaryOperation for StringUnaryOperation {
	fn id(&self) -> UnaryOperationId {
		self.id
	}

	fn signatures(&self) -> Vec<OperationSignature> {
		[Kind::Char, Kind::VarChar].into_iter().map(|kind| OperationSignature::new(self.name(), [kind], 0)).collect()
	}

	fn can_apply_to(&self, argument: &'static Type, _static_arguments: &[TypedValue<'_>]) -> stratum_type::Result<()> {
		if !argument.kind().is_ascii_string() {
			return_error!(not_applicable(self.name(), &[argument], Some("expected a Char or VarChar argument".to_string())));
		}
		Ok(())
	}

	fn result_type(&self, argument: &'static Type, _static_arguments: &[TypedValue<'_>]) -> Option<&'static Type> {
		if !argument.kind().is_ascii_string() {
			return None;
		}
		if self.is_length() {
			Some(TypeFactory::get(Kind::Int, argument.is_nullable()))
		} else {
			Some(argument)
		}
	}

	fn result_type_for_partial_argument_type(&self, argument: Option<&'static Type>) -> Option<&'static Type> {
		match argument {
			Some(argument) => self.result_type(argument, &[]),
			None if self.is_length() => Some(TypeFactory::get(Kind::Int, true)),
			None => None,
		}
	}

	fn partial_type_signature_is_plausible(&self, result: Option<&Type>, argument: Option<&Type>) -> bool {
		if let Some(argument) = argument {
			return match self.result_type(argument.non_nullable_version(), &[]) {
				Some(actual) => result.is_none_or(|result| {
					result.kind() == actual.kind() && result.length() == actual.length() && result.is_nullable() == argument.is_nullable()
				}),
				None => false,
			};
		}
		match result {
			None => true,
			Some(result) if !result.is_nullable() => false,
			Some(result) if self.is_length() => result.kind() == Kind::Int || result.kind() == Kind::Long,
			Some(result) => result.kind().is_ascii_string(),
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
		let Some(result_type) = self.result_type(argument, static_arguments) else {
			return_error!(not_applicable(self.name(), &[argument], None));
		};
		let upper = self.id == UnaryOperationId::Upper;
		Ok(match (self.is_length(), argument.kind()) {
			(true, Kind::Char) => make_unchecked_unary(LengthFunctor::<CharKind>(PhantomData), argument, result_type),
			(true, _) => make_unchecked_unary(LengthFunctor::<VarCharKind>(PhantomData), argument, result_type),
			(false, Kind::Char) => make_unchecked_unary(
				CaseFunctor::<CharKind> {
					upper,
					_kind: PhantomData,
				},
				argument,
				result_type,
			),
			(false, _) => make_unchecked_unary(
				CaseFunctor::<VarCharKind> {
					upper,
					_kind: PhantomData,
				},
				argument,
				result_type,
			),
		})
	}
}
