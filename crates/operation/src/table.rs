// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use stratum_type::{Kind, Type, TypeFactory};

use crate::signature::OperationSignature;

/// The argument-kind combinations an operation accepts and the result kind of
/// each. Answers the planning questions asked with incomplete type
/// information.
#[derive(Debug, Default)]
pub(crate) struct KindTable<const N: usize> {
	rows: Vec<([Kind; N], Kind)>,
}

impl<const N: usize> KindTable<N> {
	pub(crate) fn new() -> Self {
		Self {
			rows: Vec::new(),
		}
	}

	pub(crate) fn push(&mut self, arguments: [Kind; N], result: Kind) {
		debug_assert!(self.result_kind(arguments).is_none(), "duplicate row {:?}", arguments);
		self.rows.push((arguments, result));
	}

	pub(crate) fn result_kind(&self, arguments: [Kind; N]) -> Option<Kind> {
		self.rows.iter().find(|(args, _)| *args == arguments).map(|(_, result)| *result)
	}

	pub(crate) fn signatures(&self, name: &str) -> Vec<OperationSignature> {
		self.rows.iter().map(|(args, _)| OperationSignature::new(name, args.iter().copied(), 0)).collect()
	}

	fn matching(&self, known: [Option<Kind>; N]) -> impl Iterator<Item = &([Kind; N], Kind)> {
		self.rows.iter().filter(move |(args, _)| args.iter().zip(known.iter()).all(|(arg, k)| k.is_none_or(|k| k == *arg)))
	}

	/// The result kind shared by every row consistent with `known`.
	pub(crate) fn partial_result_kind(&self, known: [Option<Kind>; N]) -> Option<Kind> {
		let mut rows = self.matching(known);
		let (_, first) = rows.next()?;
		rows.all(|(_, result)| result == first).then_some(*first)
	}

	pub(crate) fn is_plausible(&self, result: Option<&Type>, known: [Option<Kind>; N]) -> bool {
		self.matching(known).any(|(_, produced)| result.is_none_or(|result| accepts(result, *produced)))
	}

	/// Per argument position, the kind every row producing `result_hint`
	/// agrees on.
	pub(crate) fn push_down(&self, result_hint: Option<&Type>) -> [Option<Kind>; N] {
		let rows: Vec<_> = self
			.rows
			.iter()
			.filter(|(_, produced)| result_hint.is_none_or(|hint| hint.kind() == *produced))
			.collect();
		std::array::from_fn(|i| {
			let (first, _) = rows.first()?;
			rows.iter().all(|(args, _)| args[i] == first[i]).then_some(first[i])
		})
	}

	/// Unknown arguments count as nullable.
	pub(crate) fn partial_result_type(&self, arguments: [Option<&Type>; N]) -> Option<&'static Type> {
		let known = arguments.map(|a| a.map(Type::kind));
		let nullable = arguments.iter().any(|a| a.is_none_or(|a| a.is_nullable()));
		self.partial_result_kind(known).and_then(|kind| type_of(kind, nullable))
	}

	/// With every argument known, `result` must be exactly the produced type.
	/// Otherwise unknown arguments count as nullable and `result` need only
	/// accept what some consistent row produces.
	pub(crate) fn plausible(&self, result: Option<&Type>, arguments: [Option<&Type>; N]) -> bool {
		if let Some(known) = all_known(&arguments) {
			let nullable = known.iter().any(|a| a.is_nullable());
			let kinds: [Kind; N] = std::array::from_fn(|i| known[i].kind());
			return match self.result_kind(kinds).and_then(|kind| type_of(kind, nullable)) {
				Some(actual) => result.is_none_or(|result| result == actual),
				None => false,
			};
		}
		if result.is_some_and(|r| !r.is_nullable()) {
			return false;
		}
		self.is_plausible(result, arguments.map(|a| a.map(Type::kind)))
	}

	pub(crate) fn push_down_types(&self, result_hint: Option<&Type>) -> [Option<&'static Type>; N] {
		let nullable = result_hint.is_none_or(|hint| hint.is_nullable());
		self.push_down(result_hint).map(|kind| kind.and_then(|kind| type_of(kind, nullable)))
	}
}

/// `true` if a value produced with kind `produced` can flow into `result`.
pub(crate) fn accepts(result: &Type, produced: Kind) -> bool {
	if result.kind() == produced {
		return true;
	}
	if produced.is_ascii_string() && result.kind().is_ascii_string() {
		return true;
	}
	match TypeFactory::try_get(produced, result.is_nullable()) {
		Ok(produced) => result.is_safely_coercible_from(produced),
		Err(_) => false,
	}
}

/// The argument types when none is unknown.
fn all_known<'t>(arguments: &[Option<&'t Type>]) -> Option<Vec<&'t Type>> {
	arguments.iter().copied().collect()
}

/// The non-parameterized type of `kind`, when one exists.
pub(crate) fn type_of(kind: Kind, nullable: bool) -> Option<&'static Type> {
	TypeFactory::try_get(kind, nullable).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table() -> KindTable<2> {
		let mut table = KindTable::new();
		table.push([Kind::Int, Kind::Int], Kind::Int);
		table.push([Kind::Int, Kind::Double], Kind::Double);
		table.push([Kind::Double, Kind::Int], Kind::Double);
		table.push([Kind::Double, Kind::Double], Kind::Double);
		table
	}

	#[test]
	fn test_partial_result_kind() {
		let table = table();
		assert_eq!(table.partial_result_kind([Some(Kind::Double), None]), Some(Kind::Double));
		assert_eq!(table.partial_result_kind([Some(Kind::Int), None]), None);
		assert_eq!(table.partial_result_kind([Some(Kind::Long), None]), None);
	}

	#[test]
	fn test_plausibility() {
		let table = table();
		let int = TypeFactory::get(Kind::Int, false);
		let double = TypeFactory::get(Kind::Double, true);
		assert!(table.is_plausible(None, [Some(Kind::Double), None]));
		assert!(table.is_plausible(Some(double), [Some(Kind::Int), None]));
		assert!(!table.is_plausible(Some(int), [Some(Kind::Double), None]));
		assert!(!table.is_plausible(None, [Some(Kind::Bool), None]));
	}

	#[test]
	fn test_unknown_arguments_force_nullable_result() {
		let table = table();
		let double = TypeFactory::get(Kind::Double, false);
		assert!(!table.plausible(Some(double), [Some(double), None]));
		assert!(!table.plausible(Some(double), [None, None]));
		assert!(table.plausible(Some(double.nullable_version()), [Some(double), None]));
		assert!(table.plausible(None, [None, None]));
	}

	#[test]
	fn test_known_arguments_require_exact_result() {
		let table = table();
		let int = TypeFactory::get(Kind::Int, false);
		let double = TypeFactory::get(Kind::Double, false);
		assert!(table.plausible(Some(int), [Some(int), Some(int)]));
		assert!(!table.plausible(Some(double), [Some(int), Some(int)]));
		assert!(!table.plausible(Some(int.nullable_version()), [Some(int), Some(int)]));
		assert!(!table.plausible(Some(double), [Some(double.nullable_version()), Some(int)]));
		assert!(table.plausible(None, [Some(double), Some(int)]));
		assert!(!table.plausible(None, [Some(TypeFactory::get(Kind::Long, false)), Some(int)]));
	}

	#[test]
	fn test_push_down() {
		let table = table();
		let int = TypeFactory::get(Kind::Int, true);
		let double = TypeFactory::get(Kind::Double, true);
		assert_eq!(table.push_down(Some(int)), [Some(Kind::Int), Some(Kind::Int)]);
		assert_eq!(table.push_down(Some(double)), [None, None]);
		assert_eq!(table.push_down(None), [None, None]);
	}
}
