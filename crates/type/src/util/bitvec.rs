// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Formatter};

const WORD_BITS: usize = 64;

/// A growable, densely packed vector of bits.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitVec {
	words: Vec<u64>,
	len: usize,
}

impl BitVec {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			words: Vec::with_capacity(capacity.div_ceil(WORD_BITS)),
			len: 0,
		}
	}

	/// `len` bits, all set to `value`.
	pub fn repeat(len: usize, value: bool) -> Self {
		let fill = if value {
			u64::MAX
		} else {
			0
		};
		let mut result = Self {
			words: vec![fill; len.div_ceil(WORD_BITS)],
			len,
		};
		result.clear_tail();
		result
	}

	pub fn from_slice(bits: &[bool]) -> Self {
		let mut result = Self::with_capacity(bits.len());
		for &bit in bits {
			result.push(bit);
		}
		result
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn push(&mut self, bit: bool) {
		if self.len % WORD_BITS == 0 {
			self.words.push(0);
		}
		self.len += 1;
		self.set(self.len - 1, bit);
	}

	pub fn extend(&mut self, other: &BitVec) {
		for bit in other.iter() {
			self.push(bit);
		}
	}

	pub fn get(&self, index: usize) -> bool {
		assert!(index < self.len, "bit index {} out of range for length {}", index, self.len);
		self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
	}

	pub fn set(&mut self, index: usize, bit: bool) {
		assert!(index < self.len, "bit index {} out of range for length {}", index, self.len);
		let mask = 1 << (index % WORD_BITS);
		let word = &mut self.words[index / WORD_BITS];
		if bit {
			*word |= mask;
		} else {
			*word &= !mask;
		}
	}

	pub fn count_ones(&self) -> usize {
		self.words.iter().map(|w| w.count_ones() as usize).sum()
	}

	pub fn any(&self) -> bool {
		self.words.iter().any(|&w| w != 0)
	}

	/// In-place intersection. Both vectors must have the same length.
	pub fn and(&mut self, other: &BitVec) {
		assert_eq!(self.len, other.len, "bit vector lengths differ");
		for (left, right) in self.words.iter_mut().zip(&other.words) {
			*left &= *right;
		}
	}

	/// In-place union. Both vectors must have the same length.
	pub fn or(&mut self, other: &BitVec) {
		assert_eq!(self.len, other.len, "bit vector lengths differ");
		for (left, right) in self.words.iter_mut().zip(&other.words) {
			*left |= *right;
		}
	}

	pub fn iter(&self) -> BitVecIter<'_> {
		BitVecIter {
			bits: self,
			pos: 0,
		}
	}

	/// Indices of set bits in ascending order.
	pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
		self.words.iter().enumerate().flat_map(|(w, &word)| {
			let mut word = word;
			std::iter::from_fn(move || {
				if word == 0 {
					return None;
				}
				let bit = word.trailing_zeros() as usize;
				word &= word - 1;
				Some(w * WORD_BITS + bit)
			})
		})
	}

	fn clear_tail(&mut self) {
		let used = self.len % WORD_BITS;
		if used != 0 {
			if let Some(last) = self.words.last_mut() {
				*last &= (1 << used) - 1;
			}
		}
	}
}

pub struct BitVecIter<'a> {
	bits: &'a BitVec,
	pos: usize,
}

impl Iterator for BitVecIter<'_> {
	type Item = bool;

	fn next(&mut self) -> Option<bool> {
		if self.pos >= self.bits.len {
			return None;
		}
		let bit = self.bits.get(self.pos);
		self.pos += 1;
		Some(bit)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.bits.len - self.pos;
		(remaining, Some(remaining))
	}
}

impl Debug for BitVec {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for bit in self.iter() {
			f.write_str(if bit {
				"1"
			} else {
				"0"
			})?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_repeat_clears_unused_tail() {
		let bits = BitVec::repeat(70, true);
		assert_eq!(bits.len(), 70);
		assert_eq!(bits.count_ones(), 70);
		assert!(bits.get(69));
	}

	#[test]
	fn test_push_get_set() {
		let mut bits = BitVec::empty();
		for i in 0..130 {
			bits.push(i % 3 == 0);
		}
		assert_eq!(bits.len(), 130);
		assert!(bits.get(129));
		assert!(!bits.get(128));
		bits.set(128, true);
		assert!(bits.get(128));
		assert_eq!(bits.count_ones(), 45);
	}

	#[test]
	fn test_and_or() {
		let mut a = BitVec::from_slice(&[true, true, false, false]);
		let b = BitVec::from_slice(&[true, false, true, false]);
		let mut c = a.clone();
		a.and(&b);
		assert_eq!(a, BitVec::from_slice(&[true, false, false, false]));
		c.or(&b);
		assert_eq!(c, BitVec::from_slice(&[true, true, true, false]));
	}

	#[test]
	fn test_iter_ones() {
		let mut bits = BitVec::repeat(200, false);
		for i in [0, 63, 64, 150, 199] {
			bits.set(i, true);
		}
		assert_eq!(bits.iter_ones().collect::<Vec<_>>(), vec![0, 63, 64, 150, 199]);
	}

	#[test]
	fn test_extend_and_debug() {
		let mut bits = BitVec::from_slice(&[true]);
		bits.extend(&BitVec::repeat(2, false));
		assert_eq!(format!("{:?}", bits), "100");
	}

	#[test]
	#[should_panic(expected = "out of range")]
	fn test_get_out_of_range() {
		BitVec::repeat(3, true).get(3);
	}
}
