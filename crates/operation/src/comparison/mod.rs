// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{cmp::Ordering, sync::Arc};

use serde::{Deserialize, Serialize};
use stratum_type::{
	ColumnVector, ColumnVectorsValueAccessor, Kind, TupleIdSequence, Type, TypedValue, ValueAccessor,
	error::diagnostic::operation::not_applicable, return_error,
};

use crate::{config::OperationConfig, signature::OperationSignature};

mod basic;
mod pattern;
mod wrapper;

pub use pattern::{PatternCache, like_to_regex};
pub use wrapper::{ComparatorWrapper, ComparisonFunctor, make_comparator};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComparisonId {
	Equal = 0,
	NotEqual = 1,
	Less = 2,
	LessOrEqual = 3,
	Greater = 4,
	GreaterOrEqual = 5,
	Like = 6,
	NotLike = 7,
	RegexMatch = 8,
	NotRegexMatch = 9,
}

impl ComparisonId {
	pub const ALL: [ComparisonId; 10] = [
		Self::Equal,
		Self::NotEqual,
		Self::Less,
		Self::LessOrEqual,
		Self::Greater,
		Self::GreaterOrEqual,
		Self::Like,
		Self::NotLike,
		Self::RegexMatch,
		Self::NotRegexMatch,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::Equal => "=",
			Self::NotEqual => "<>",
			Self::Less => "<",
			Self::LessOrEqual => "<=",
			Self::Greater => ">",
			Self::GreaterOrEqual => ">=",
			Self::Like => "like",
			Self::NotLike => "not like",
			Self::RegexMatch => "~",
			Self::NotRegexMatch => "!~",
		}
	}

	/// Additional names the comparison is registered under.
	pub fn aliases(self) -> &'static [&'static str] {
		match self {
			Self::NotEqual => &["!="],
			_ => &[],
		}
	}

	pub fn to_u8(self) -> u8 {
		self as u8
	}

	pub fn from_u8(id: u8) -> Option<Self> {
		Self::ALL.get(id as usize).copied()
	}

	pub fn is_pattern_matching(self) -> bool {
		matches!(self, Self::Like | Self::NotLike | Self::RegexMatch | Self::NotRegexMatch)
	}

	/// Whether an ordering of the two operands satisfies a basic comparison.
	/// `None` stands for unordered operands such as NaN, which only satisfy
	/// `<>`.
	pub fn holds(self, ordering: Option<Ordering>) -> bool {
		match self {
			Self::Equal => ordering == Some(Ordering::Equal),
			Self::NotEqual => ordering != Some(Ordering::Equal),
			Self::Less => ordering == Some(Ordering::Less),
			Self::LessOrEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
			Self::Greater => ordering == Some(Ordering::Greater),
			Self::GreaterOrEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
			Self::Like | Self::NotLike | Self::RegexMatch | Self::NotRegexMatch => false,
		}
	}
}

/// A comparator bound to one concrete pair of argument types. Any NULL
/// operand makes the comparison false.
pub trait UncheckedComparator: Send + Sync {
	fn compare_typed_values(&self, left: &TypedValue<'_>, right: &TypedValue<'_>) -> bool;

	/// Native bytes of each argument, `None` for NULL.
	fn compare_data(&self, left: Option<&[u8]>, right: Option<&[u8]>) -> bool;

	/// Positions of the rows that satisfy the comparison, restricted to
	/// `filter` when one is given.
	fn compare_single_value_accessor(
		&self,
		accessor: &mut dyn ValueAccessor,
		left_attr: usize,
		right_attr: usize,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence;

	fn compare_value_accessor_and_static_value(
		&self,
		accessor: &mut dyn ValueAccessor,
		left_attr: usize,
		right: &TypedValue<'_>,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence;

	fn compare_static_value_and_value_accessor(
		&self,
		left: &TypedValue<'_>,
		accessor: &mut dyn ValueAccessor,
		right_attr: usize,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence;

	fn compare_column_vectors(
		&self,
		left: &ColumnVector,
		right: &ColumnVector,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence {
		let mut accessor = ColumnVectorsValueAccessor::new(vec![left, right]);
		self.compare_single_value_accessor(&mut accessor, 0, 1, filter)
	}

	fn compare_column_vector_and_static_value(
		&self,
		left: &ColumnVector,
		right: &TypedValue<'_>,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence {
		let mut accessor = ColumnVectorsValueAccessor::single(left);
		self.compare_value_accessor_and_static_value(&mut accessor, 0, right, filter)
	}

	fn compare_static_value_and_column_vector(
		&self,
		left: &TypedValue<'_>,
		right: &ColumnVector,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence {
		let mut accessor = ColumnVectorsValueAccessor::single(right);
		self.compare_static_value_and_value_accessor(left, &mut accessor, 0, filter)
	}

	/// The value this comparator prefers among `current` and every non-null
	/// value of the attribute: a candidate replaces the accumulator when
	/// `candidate OP accumulator` holds. `<` yields the minimum. A NULL
	/// `current` is replaced by the first non-null value.
	fn accumulate_value_accessor(
		&self,
		current: &TypedValue<'_>,
		accessor: &mut dyn ValueAccessor,
		attr: usize,
	) -> TypedValue<'static>;

	fn accumulate_column_vector(&self, current: &TypedValue<'_>, column: &ColumnVector) -> TypedValue<'static> {
		let mut accessor = ColumnVectorsValueAccessor::single(column);
		self.accumulate_value_accessor(current, &mut accessor, 0)
	}
}

/// A comparison operation. Pattern-matching comparisons share the
/// factory's compiled-pattern cache.
pub struct Comparison {
	id: ComparisonId,
	patterns: Arc<PatternCache>,
	case_sensitive_like: bool,
}

impl Comparison {
	pub fn new(id: ComparisonId, config: &OperationConfig) -> Self {
		Self::with_pattern_cache(id, Arc::new(PatternCache::new(config.pattern.clone())), config.case_sensitive_like)
	}

	pub fn with_pattern_cache(id: ComparisonId, patterns: Arc<PatternCache>, case_sensitive_like: bool) -> Self {
		Self {
			id,
			patterns,
			case_sensitive_like,
		}
	}

	pub fn id(&self) -> ComparisonId {
		self.id
	}

	pub fn name(&self) -> &'static str {
		self.id.name()
	}

	pub fn signatures(&self) -> Vec<OperationSignature> {
		let mut pairs = Vec::new();
		let strings = [Kind::Char, Kind::VarChar];
		for left in strings {
			for right in strings {
				pairs.push([left, right]);
			}
		}
		if !self.id.is_pattern_matching() {
			for left in Kind::NUMERIC {
				for right in Kind::NUMERIC {
					pairs.push([left, right]);
				}
			}
			for kind in basic::SAME_KIND {
				pairs.push([kind, kind]);
			}
		}
		let mut signatures = Vec::new();
		for name in std::iter::once(self.name()).chain(self.id.aliases().iter().copied()) {
			signatures.extend(pairs.iter().map(|pair| OperationSignature::new(name, *pair, 0)));
		}
		signatures
	}

	pub fn can_compare_types(&self, left: &Type, right: &Type) -> bool {
		self.can_compare_kinds(left.kind(), right.kind())
	}

	fn can_compare_kinds(&self, left: Kind, right: Kind) -> bool {
		if left.is_ascii_string() && right.is_ascii_string() {
			return true;
		}
		!self.id.is_pattern_matching() && basic::is_comparable(left, right)
	}

	pub fn can_apply_to(&self, left: &'static Type, right: &'static Type) -> stratum_type::Result<()> {
		if !self.can_compare_types(left, right) {
			return_error!(not_applicable(self.name(), &[left, right], None));
		}
		Ok(())
	}

	/// `false` only when a known argument type can never be compared.
	pub fn partial_type_signature_is_plausible(&self, left: Option<&Type>, right: Option<&Type>) -> bool {
		match (left, right) {
			(Some(left), Some(right)) => self.can_compare_types(left, right),
			(Some(known), None) | (None, Some(known)) => {
				let kind = known.kind();
				kind.is_ascii_string() || (!self.id.is_pattern_matching() && basic::is_comparable(kind, kind))
			}
			(None, None) => true,
		}
	}

	/// The other argument's type when one side is known and comparisons
	/// with it only accept that exact type.
	pub fn push_down_type_hint(&self, known: Option<&Type>) -> Option<&'static Type> {
		let known = known?;
		if self.id.is_pattern_matching() || known.kind().is_numeric() || known.kind().is_ascii_string() {
			return None;
		}
		basic::SAME_KIND.contains(&known.kind()).then(|| known.nullable_version())
	}

	pub fn make_unchecked_comparator(
		&self,
		left: &'static Type,
		right: &'static Type,
	) -> stratum_type::Result<Box<dyn UncheckedComparator>> {
		self.can_apply_to(left, right)?;
		let comparator = if self.id.is_pattern_matching() {
			pattern::make_pattern_comparator(self.id, self.patterns.clone(), self.case_sensitive_like, left, right)
		} else {
			basic::make_basic_comparator(self.id, left, right)
		};
		match comparator {
			Some(comparator) => Ok(comparator),
			None => return_error!(not_applicable(self.name(), &[left, right], None)),
		}
	}

	pub fn compare_checked(
		&self,
		left: &TypedValue<'_>,
		left_type: &'static Type,
		right: &TypedValue<'_>,
		right_type: &'static Type,
	) -> stratum_type::Result<bool> {
		let comparator = self.make_unchecked_comparator(left_type, right_type)?;
		Ok(comparator.compare_typed_values(left, right))
	}
}

#[cfg(test)]
mod tests {
	use stratum_type::TypeFactory;

	use super::*;

	fn comparison(id: ComparisonId) -> Comparison {
		Comparison::new(id, &OperationConfig::default())
	}

	#[test]
	fn test_ids_round_trip() {
		for id in ComparisonId::ALL {
			assert_eq!(ComparisonId::from_u8(id.to_u8()), Some(id));
		}
		assert_eq!(ComparisonId::from_u8(10), None);
	}

	#[test]
	fn test_unordered_only_satisfies_not_equal() {
		for id in ComparisonId::ALL.into_iter().filter(|id| !id.is_pattern_matching()) {
			assert_eq!(id.holds(None), id == ComparisonId::NotEqual, "{:?}", id);
		}
	}

	#[test]
	fn test_signatures() {
		let not_equal = comparison(ComparisonId::NotEqual).signatures();
		assert!(not_equal.iter().any(|signature| signature.name() == "!="));
		let like = comparison(ComparisonId::Like).signatures();
		assert_eq!(like.len(), 4);
		assert!(like.iter().all(|signature| signature.argument_kinds().iter().all(|kind| kind.is_ascii_string())));
	}

	#[test]
	fn test_applicability() {
		let less = comparison(ComparisonId::Less);
		let int = TypeFactory::get(Kind::Int, false);
		let date = TypeFactory::get(Kind::Date, true);
		assert!(less.can_apply_to(int, TypeFactory::get(Kind::Double, true)).is_ok());
		assert_eq!(less.can_apply_to(int, date).unwrap_err().code(), "OPERATION_003");
		assert!(comparison(ComparisonId::Like).can_apply_to(int, int).is_err());
		assert!(less.partial_type_signature_is_plausible(Some(date), None));
		assert!(!comparison(ComparisonId::RegexMatch).partial_type_signature_is_plausible(Some(date), None));
		assert_eq!(less.push_down_type_hint(Some(date)), Some(date));
		assert_eq!(less.push_down_type_hint(Some(int)), None);
	}

	#[test]
	fn test_null_is_never_true() {
		let int = TypeFactory::get(Kind::Int, true);
		for id in [ComparisonId::Equal, ComparisonId::NotEqual, ComparisonId::LessOrEqual] {
			let result = comparison(id).compare_checked(&TypedValue::Null(Kind::Int), int, &TypedValue::Int(1), int).unwrap();
			assert!(!result, "{:?}", id);
		}
	}
}
