// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{container::ColumnVector, r#type::Type, value::TypedValue};

/// Row-at-a-time access to a batch of attribute values.
///
/// Iteration starts before the first row: call [`ValueAccessor::begin_iteration`]
/// and then [`ValueAccessor::next`] until it returns `false`.
pub trait ValueAccessor {
	fn begin_iteration(&mut self);

	fn next(&mut self) -> bool;

	fn num_values(&self) -> usize;

	/// Index of the current row.
	fn position(&self) -> usize;

	fn num_attributes(&self) -> usize;

	fn attribute_type(&self, attr: usize) -> &'static Type;

	/// Native bytes of `attr` in the current row, `None` for NULL.
	fn get_untyped_value(&self, attr: usize) -> Option<&[u8]>;

	fn get_typed_value(&self, attr: usize) -> TypedValue<'_>;
}

/// A [`ValueAccessor`] over equally long column vectors, one per attribute.
pub struct ColumnVectorsValueAccessor<'a> {
	columns: Vec<&'a ColumnVector>,
	num_values: usize,
	next_position: usize,
}

impl<'a> ColumnVectorsValueAccessor<'a> {
	pub fn new(columns: Vec<&'a ColumnVector>) -> Self {
		let num_values = columns.first().map(|c| c.len()).unwrap_or(0);
		debug_assert!(columns.iter().all(|c| c.len() == num_values), "column vectors differ in length");
		Self {
			columns,
			num_values,
			next_position: 0,
		}
	}

	pub fn single(column: &'a ColumnVector) -> Self {
		Self::new(vec![column])
	}

	pub fn column(&self, attr: usize) -> &'a ColumnVector {
		self.columns[attr]
	}

	fn current(&self) -> usize {
		assert!(self.next_position > 0, "value accessor read before next()");
		self.next_position - 1
	}
}

impl ValueAccessor for ColumnVectorsValueAccessor<'_> {
	fn begin_iteration(&mut self) {
		self.next_position = 0;
	}

	fn next(&mut self) -> bool {
		if self.next_position < self.num_values {
			self.next_position += 1;
			true
		} else {
			false
		}
	}

	fn num_values(&self) -> usize {
		self.num_values
	}

	fn position(&self) -> usize {
		self.next_position.saturating_sub(1)
	}

	fn num_attributes(&self) -> usize {
		self.columns.len()
	}

	fn attribute_type(&self, attr: usize) -> &'static Type {
		self.columns[attr].ty()
	}

	fn get_untyped_value(&self, attr: usize) -> Option<&[u8]> {
		self.columns[attr].get_untyped_value(self.current())
	}

	fn get_typed_value(&self, attr: usize) -> TypedValue<'_> {
		self.columns[attr].get_typed_value(self.current())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Kind, TypeFactory};

	#[test]
	fn test_iterates_rows() {
		let ints = ColumnVector::from_values(TypeFactory::get(Kind::Int, true), [TypedValue::Int(1), TypedValue::Null(Kind::Int), TypedValue::Int(3)]);
		let names = ColumnVector::from_values(
			TypeFactory::get_with_length(Kind::VarChar, 4, false),
			[TypedValue::varchar("a"), TypedValue::varchar("bb"), TypedValue::varchar("ccc")],
		);
		let mut accessor = ColumnVectorsValueAccessor::new(vec![&ints, &names]);
		assert_eq!(accessor.num_values(), 3);
		assert_eq!(accessor.num_attributes(), 2);
		assert_eq!(accessor.attribute_type(1).kind(), Kind::VarChar);

		let mut seen = Vec::new();
		accessor.begin_iteration();
		while accessor.next() {
			let int = accessor.get_untyped_value(0).map(<i32 as crate::NativeLiteral>::read);
			let name = accessor.get_typed_value(1).as_str().map(str::to_string);
			seen.push((accessor.position(), int, name));
		}
		assert_eq!(
			seen,
			vec![
				(0, Some(1), Some("a".to_string())),
				(1, None, Some("bb".to_string())),
				(2, Some(3), Some("ccc".to_string())),
			]
		);

		accessor.begin_iteration();
		assert!(accessor.next());
		assert_eq!(accessor.position(), 0);
	}

	#[test]
	fn test_empty_accessor() {
		let column = ColumnVector::new(TypeFactory::get(Kind::Double, false));
		let mut accessor = ColumnVectorsValueAccessor::single(&column);
		accessor.begin_iteration();
		assert!(!accessor.next());
	}
}
