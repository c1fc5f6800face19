// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	kind::Kind,
	r#type::Type,
	util::BitVec,
	value::{NativeLiteral, TypedValue},
};

/// A column of values of one [`Type`].
///
/// Fixed-length types are stored natively in one contiguous buffer; VarChar
/// and Meta values are stored as owned [`TypedValue`]s.
#[derive(Clone, Debug)]
pub enum ColumnVector {
	Native(NativeColumnVector),
	Indirect(IndirectColumnVector),
}

#[derive(Clone, Debug)]
pub struct NativeColumnVector {
	ty: &'static Type,
	width: usize,
	data: Vec<u8>,
	nulls: BitVec,
}

#[derive(Clone, Debug)]
pub struct IndirectColumnVector {
	ty: &'static Type,
	values: Vec<TypedValue<'static>>,
}

impl ColumnVector {
	pub fn new(ty: &'static Type) -> Self {
		Self::with_capacity(ty, 0)
	}

	pub fn with_capacity(ty: &'static Type, capacity: usize) -> Self {
		if Self::uses_native_storage(ty) {
			ColumnVector::Native(NativeColumnVector::with_capacity(ty, capacity))
		} else {
			ColumnVector::Indirect(IndirectColumnVector::with_capacity(ty, capacity))
		}
	}

	pub fn uses_native_storage(ty: &Type) -> bool {
		!ty.is_variable_length() && !matches!(ty.kind(), Kind::Meta | Kind::NullType | Kind::Array)
	}

	pub fn from_values<'v>(ty: &'static Type, values: impl IntoIterator<Item = TypedValue<'v>>) -> Self {
		let mut column = Self::new(ty);
		for value in values {
			column.append_typed_value(&value);
		}
		column
	}

	pub fn ty(&self) -> &'static Type {
		match self {
			ColumnVector::Native(c) => c.ty,
			ColumnVector::Indirect(c) => c.ty,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ColumnVector::Native(c) => c.len(),
			ColumnVector::Indirect(c) => c.values.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_native(&self) -> bool {
		matches!(self, ColumnVector::Native(_))
	}

	pub fn append_typed_value(&mut self, value: &TypedValue<'_>) {
		match self {
			ColumnVector::Native(c) => c.append_typed_value(value),
			ColumnVector::Indirect(c) => c.append_typed_value(value),
		}
	}

	pub fn append_null(&mut self) {
		match self {
			ColumnVector::Native(c) => c.append_null(),
			ColumnVector::Indirect(c) => c.values.push(TypedValue::Null(c.ty.kind())),
		}
	}

	pub fn fill_with_nulls(&mut self, count: usize) {
		for _ in 0..count {
			self.append_null();
		}
	}

	pub fn is_null(&self, position: usize) -> bool {
		match self {
			ColumnVector::Native(c) => c.nulls.get(position),
			ColumnVector::Indirect(c) => c.values[position].is_null(),
		}
	}

	/// Native bytes at `position`, `None` for NULL. Char values are padded
	/// to the type length; VarChar values include their terminator.
	pub fn get_untyped_value(&self, position: usize) -> Option<&[u8]> {
		match self {
			ColumnVector::Native(c) => c.get_untyped_value(position),
			ColumnVector::Indirect(c) => {
				let value = &c.values[position];
				if value.is_null() {
					None
				} else {
					value.out_of_line_data()
				}
			}
		}
	}

	/// The value at `position`; string bytes borrow from the column.
	pub fn get_typed_value(&self, position: usize) -> TypedValue<'_> {
		match self {
			ColumnVector::Native(c) => c.get_typed_value(position),
			ColumnVector::Indirect(c) => c.values[position].make_reference_to_this(),
		}
	}

	/// Appends an inline literal. The column must be natively stored with
	/// kind `T::KIND`.
	pub fn append_native<T: NativeLiteral>(&mut self, value: T) {
		match self {
			ColumnVector::Native(c) => c.append_native(value),
			ColumnVector::Indirect(_) => panic!("append_native on an indirect column"),
		}
	}

	pub fn native_value<T: NativeLiteral>(&self, position: usize) -> Option<T> {
		self.get_untyped_value(position).map(T::read)
	}
}

impl NativeColumnVector {
	pub fn with_capacity(ty: &'static Type, capacity: usize) -> Self {
		let width = ty.maximum_byte_length();
		Self {
			ty,
			width,
			data: Vec::with_capacity(width * capacity),
			nulls: BitVec::with_capacity(capacity),
		}
	}

	pub fn len(&self) -> usize {
		self.nulls.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nulls.is_empty()
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn append_typed_value(&mut self, value: &TypedValue<'_>) {
		if value.is_null() {
			self.append_null();
			return;
		}
		debug_assert_eq!(value.kind(), self.ty.kind());
		let start = self.data.len();
		self.data.resize(start + self.width, 0);
		if let Some(bytes) = value.data_bytes() {
			let n = bytes.len().min(self.width);
			self.data[start..start + n].copy_from_slice(&bytes[..n]);
		}
		self.nulls.push(false);
	}

	pub fn append_null(&mut self) {
		debug_assert!(self.ty.is_nullable(), "NULL appended to a non-nullable column");
		self.data.resize(self.data.len() + self.width, 0);
		self.nulls.push(true);
	}

	pub fn append_native<T: NativeLiteral>(&mut self, value: T) {
		debug_assert_eq!(T::KIND, self.ty.kind());
		let start = self.data.len();
		self.data.resize(start + self.width, 0);
		value.write(&mut self.data[start..]);
		self.nulls.push(false);
	}

	pub fn get_untyped_value(&self, position: usize) -> Option<&[u8]> {
		if self.nulls.get(position) {
			return None;
		}
		let start = position * self.width;
		Some(&self.data[start..start + self.width])
	}

	pub fn get_typed_value(&self, position: usize) -> TypedValue<'_> {
		let Some(bytes) = self.get_untyped_value(position) else {
			return TypedValue::Null(self.ty.kind());
		};
		TypedValue::from_native_bytes(self.ty.kind(), bytes)
	}
}

impl IndirectColumnVector {
	pub fn with_capacity(ty: &'static Type, capacity: usize) -> Self {
		Self {
			ty,
			values: Vec::with_capacity(capacity),
		}
	}

	pub fn append_typed_value(&mut self, value: &TypedValue<'_>) {
		debug_assert!(value.is_null() || value.kind() == self.ty.kind());
		self.values.push(value.clone().into_owned());
	}

	pub fn values(&self) -> &[TypedValue<'static>] {
		&self.values
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{DateLit, TypeFactory};

	#[test]
	fn test_native_column() {
		let ty = TypeFactory::get(Kind::Long, true);
		let mut column = ColumnVector::new(ty);
		assert!(column.is_native());
		column.append_native(5_i64);
		column.append_null();
		column.append_typed_value(&TypedValue::Long(-3));

		assert_eq!(column.len(), 3);
		assert_eq!(column.native_value::<i64>(0), Some(5));
		assert_eq!(column.native_value::<i64>(1), None);
		assert!(column.is_null(1));
		assert_eq!(column.get_typed_value(2).literal::<i64>(), -3);
	}

	#[test]
	fn test_char_column_pads_to_length() {
		let ty = TypeFactory::get_with_length(Kind::Char, 4, false);
		let column = ColumnVector::from_values(ty, [TypedValue::char("ab"), TypedValue::char("abcd")]);
		assert_eq!(column.get_untyped_value(0), Some(&b"ab\0\0"[..]));
		let value = column.get_typed_value(0);
		assert!(value.is_reference());
		assert_eq!(value.ascii_string_length(), 2);
		assert_eq!(column.get_typed_value(1).ascii_bytes(), b"abcd");
	}

	#[test]
	fn test_varchar_column_is_indirect() {
		let ty = TypeFactory::get_with_length(Kind::VarChar, 8, true);
		let mut column = ColumnVector::new(ty);
		assert!(!column.is_native());
		column.append_typed_value(&TypedValue::varchar("hey"));
		column.fill_with_nulls(2);
		assert_eq!(column.len(), 3);
		assert_eq!(column.get_untyped_value(0), Some(&b"hey\0"[..]));
		assert_eq!(column.get_untyped_value(2), None);
		assert!(column.get_typed_value(0).is_reference());
	}

	#[test]
	fn test_date_column() {
		let ty = TypeFactory::get(Kind::Date, false);
		let date = DateLit::new(2001, 9, 9).unwrap();
		let column = ColumnVector::from_values(ty, [TypedValue::Date(date)]);
		assert_eq!(column.native_value::<DateLit>(0), Some(date));
		assert_eq!(column.get_typed_value(0).literal::<DateLit>(), date);
	}
}
