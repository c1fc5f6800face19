// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use stratum_type::{TupleIdSequence, Type, TypedValue, ValueAccessor};

use crate::{comparison::UncheckedComparator, native::ArgumentKind};

/// Per-value body of a comparator.
pub trait ComparisonFunctor: Send + Sync + Sized + 'static {
	type Left: ArgumentKind;
	type Right: ArgumentKind;

	fn compare(
		&self,
		left: <Self::Left as ArgumentKind>::Value<'_>,
		right: <Self::Right as ArgumentKind>::Value<'_>,
	) -> bool;

	/// A functor specialised for one fixed right operand, used when many
	/// rows are compared against the same static value.
	fn bind_right(&self, _right: <Self::Right as ArgumentKind>::Value<'_>) -> Option<Self> {
		None
	}
}

/// Lifts a [`ComparisonFunctor`] to every comparison shape.
pub struct ComparatorWrapper<F, const LEFT_NULLABLE: bool, const RIGHT_NULLABLE: bool> {
	functor: F,
}

impl<F: ComparisonFunctor, const LEFT_NULLABLE: bool, const RIGHT_NULLABLE: bool>
	ComparatorWrapper<F, LEFT_NULLABLE, RIGHT_NULLABLE>
{
	pub fn new(functor: F) -> Self {
		Self {
			functor,
		}
	}
}

fn skipped(filter: Option<&TupleIdSequence>, position: usize) -> bool {
	filter.is_some_and(|filter| !filter.get(position))
}

impl<F: ComparisonFunctor, const LEFT_NULLABLE: bool, const RIGHT_NULLABLE: bool> UncheckedComparator
	for ComparatorWrapper<F, LEFT_NULLABLE, RIGHT_NULLABLE>
{
	fn compare_typed_values(&self, left: &TypedValue<'_>, right: &TypedValue<'_>) -> bool {
		if (LEFT_NULLABLE && left.is_null()) || (RIGHT_NULLABLE && right.is_null()) {
			return false;
		}
		self.functor.compare(F::Left::from_typed(left), F::Right::from_typed(right))
	}

	fn compare_data(&self, left: Option<&[u8]>, right: Option<&[u8]>) -> bool {
		match (left, right) {
			(Some(left), Some(right)) => self.functor.compare(F::Left::from_bytes(left), F::Right::from_bytes(right)),
			_ => false,
		}
	}

	fn compare_single_value_accessor(
		&self,
		accessor: &mut dyn ValueAccessor,
		left_attr: usize,
		right_attr: usize,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence {
		let mut result = TupleIdSequence::new(accessor.num_values());
		accessor.begin_iteration();
		while accessor.next() {
			let position = accessor.position();
			if skipped(filter, position) {
				continue;
			}
			if let (Some(left), Some(right)) = (accessor.get_untyped_value(left_attr), accessor.get_untyped_value(right_attr)) {
				if self.functor.compare(F::Left::from_bytes(left), F::Right::from_bytes(right)) {
					result.set(position, true);
				}
			}
		}
		result
	}

	fn compare_value_accessor_and_static_value(
		&self,
		accessor: &mut dyn ValueAccessor,
		left_attr: usize,
		right: &TypedValue<'_>,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence {
		let mut result = TupleIdSequence::new(accessor.num_values());
		if right.is_null() {
			return result;
		}
		let right = F::Right::from_typed(right);
		let bound = self.functor.bind_right(right);
		let functor = bound.as_ref().unwrap_or(&self.functor);
		accessor.begin_iteration();
		while accessor.next() {
			let position = accessor.position();
			if skipped(filter, position) {
				continue;
			}
			if let Some(left) = accessor.get_untyped_value(left_attr) {
				if functor.compare(F::Left::from_bytes(left), right) {
					result.set(position, true);
				}
			}
		}
		result
	}

	fn compare_static_value_and_value_accessor(
		&self,
		left: &TypedValue<'_>,
		accessor: &mut dyn ValueAccessor,
		right_attr: usize,
		filter: Option<&TupleIdSequence>,
	) -> TupleIdSequence {
		let mut result = TupleIdSequence::new(accessor.num_values());
		if left.is_null() {
			return result;
		}
		let left = F::Left::from_typed(left);
		accessor.begin_iteration();
		while accessor.next() {
			let position = accessor.position();
			if skipped(filter, position) {
				continue;
			}
			if let Some(right) = accessor.get_untyped_value(right_attr) {
				if self.functor.compare(left, F::Right::from_bytes(right)) {
					result.set(position, true);
				}
			}
		}
		result
	}

	fn accumulate_value_accessor(
		&self,
		current: &TypedValue<'_>,
		accessor: &mut dyn ValueAccessor,
		attr: usize,
	) -> TypedValue<'static> {
		if F::Left::KIND != F::Right::KIND {
			unimplemented!("accumulation across {} and {}", F::Left::KIND, F::Right::KIND);
		}
		let mut preferred = current.clone().into_owned();
		accessor.begin_iteration();
		while accessor.next() {
			let Some(candidate) = accessor.get_untyped_value(attr) else {
				continue;
			};
			if preferred.is_null() || self.functor.compare(F::Left::from_bytes(candidate), F::Right::from_typed(&preferred)) {
				preferred = accessor.get_typed_value(attr).into_owned();
			}
		}
		preferred
	}
}

/// Boxes `functor` with the nullability branch chosen by `left` and `right`.
pub fn make_comparator<F: ComparisonFunctor>(
	functor: F,
	left: &'static Type,
	right: &'static Type,
) -> Box<dyn UncheckedComparator> {
	debug_assert_eq!(F::Left::KIND, left.kind());
	debug_assert_eq!(F::Right::KIND, right.kind());
	match (left.is_nullable(), right.is_nullable()) {
		(false, false) => Box::new(ComparatorWrapper::<F, false, false>::new(functor)),
		(false, true) => Box::new(ComparatorWrapper::<F, false, true>::new(functor)),
		(true, false) => Box::new(ComparatorWrapper::<F, true, false>::new(functor)),
		(true, true) => Box::new(ComparatorWrapper::<F, true, true>::new(functor)),
	}
}
