// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::kind::{Kind, SuperType};

mod coercion;
mod factory;
mod format;

pub use factory::TypeFactory;
pub(crate) use factory::TypeKey;

/// An immutable type singleton.
///
/// Obtain instances through [`TypeFactory`]; two types are equal only if they
/// are the same singleton.
#[derive(Debug)]
pub struct Type {
	kind: Kind,
	nullable: bool,
	length: usize,
	minimum_byte_length: usize,
	maximum_byte_length: usize,
}

impl PartialEq for Type {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self, other)
	}
}

impl Eq for Type {}

impl Hash for Type {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.kind.hash(state);
		self.nullable.hash(state);
		self.length.hash(state);
	}
}

impl Type {
	pub(crate) fn new(key: TypeKey) -> Self {
		let (minimum_byte_length, maximum_byte_length) = match key.kind {
			Kind::Char => (key.length, key.length),
			Kind::VarChar => (1, key.length + 1),
			Kind::NullType => (0, 0),
			Kind::Meta => (std::mem::size_of::<&'static Type>(), std::mem::size_of::<&'static Type>()),
			kind => {
				let size = kind.literal_size().unwrap_or(0);
				(size, size)
			}
		};
		Self {
			kind: key.kind,
			nullable: key.nullable,
			length: key.length,
			minimum_byte_length,
			maximum_byte_length,
		}
	}

	pub fn kind(&self) -> Kind {
		self.kind
	}

	pub fn super_type(&self) -> SuperType {
		self.kind.super_type()
	}

	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	/// The length parameter of Char and VarChar.
	pub fn length(&self) -> Option<usize> {
		if self.kind.is_parameterized() {
			Some(self.length)
		} else {
			None
		}
	}

	pub fn minimum_byte_length(&self) -> usize {
		self.minimum_byte_length
	}

	pub fn maximum_byte_length(&self) -> usize {
		self.maximum_byte_length
	}

	pub fn is_variable_length(&self) -> bool {
		self.minimum_byte_length != self.maximum_byte_length
	}

	fn key(&self) -> TypeKey {
		TypeKey {
			kind: self.kind,
			nullable: self.nullable,
			length: self.length,
		}
	}

	pub fn nullable_version(&self) -> &'static Type {
		TypeFactory::intern(TypeKey {
			nullable: true,
			..self.key()
		})
	}

	/// Panics for NullType, which has no non-nullable form.
	pub fn non_nullable_version(&self) -> &'static Type {
		assert!(self.kind != Kind::NullType, "NullType has no non-nullable version");
		TypeFactory::intern(TypeKey {
			nullable: false,
			..self.key()
		})
	}

	/// `true` if `other` is this type or its nullable version.
	pub fn is_subsumed_by(&self, other: &Type) -> bool {
		self == other || self.nullable_version() == other
	}

	pub fn name(&self) -> String {
		let mut name = match self.kind {
			Kind::Char | Kind::VarChar => format!("{}({})", self.kind, self.length),
			kind => kind.name().to_string(),
		};
		if self.nullable && self.kind != Kind::NullType {
			name.push_str(" NULL");
		}
		name
	}

	pub fn serialize(&self) -> SerializedType {
		SerializedType {
			kind: self.kind,
			nullable: self.nullable,
			length: self.length().map(|l| l as u64),
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.name())
	}
}

/// Wire form of a [`Type`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializedType {
	pub kind: Kind,
	pub nullable: bool,
	pub length: Option<u64>,
}
