// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::util::BitVec;

/// The set of matching row positions in a batch of `len` rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TupleIdSequence {
	bits: BitVec,
}

impl TupleIdSequence {
	pub fn new(len: usize) -> Self {
		Self {
			bits: BitVec::repeat(len, false),
		}
	}

	/// Every position in `0..len`.
	pub fn all(len: usize) -> Self {
		Self {
			bits: BitVec::repeat(len, true),
		}
	}

	pub fn from_ids(len: usize, ids: impl IntoIterator<Item = usize>) -> Self {
		let mut result = Self::new(len);
		for id in ids {
			result.set(id, true);
		}
		result
	}

	pub fn set(&mut self, id: usize, present: bool) {
		self.bits.set(id, present);
	}

	pub fn get(&self, id: usize) -> bool {
		self.bits.get(id)
	}

	pub fn len(&self) -> usize {
		self.bits.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bits.is_empty()
	}

	pub fn num_tuples(&self) -> usize {
		self.bits.count_ones()
	}

	pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
		self.bits.iter_ones()
	}

	pub fn intersect_with(&mut self, other: &TupleIdSequence) {
		self.bits.and(&other.bits);
	}

	pub fn union_with(&mut self, other: &TupleIdSequence) {
		self.bits.or(&other.bits);
	}

	pub fn bits(&self) -> &BitVec {
		&self.bits
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_set_and_iterate() {
		let mut ids = TupleIdSequence::new(10);
		ids.set(2, true);
		ids.set(7, true);
		assert_eq!(ids.len(), 10);
		assert_eq!(ids.num_tuples(), 2);
		assert_eq!(ids.iter().collect::<Vec<_>>(), vec![2, 7]);
		ids.set(2, false);
		assert!(!ids.get(2));
	}

	#[test]
	fn test_intersect_with_filter() {
		let mut ids = TupleIdSequence::from_ids(6, [0, 1, 4]);
		let filter = TupleIdSequence::from_ids(6, [1, 2, 4, 5]);
		ids.intersect_with(&filter);
		assert_eq!(ids.iter().collect::<Vec<_>>(), vec![1, 4]);

		let mut all = TupleIdSequence::all(6);
		all.intersect_with(&filter);
		assert_eq!(all, filter);
	}
}
