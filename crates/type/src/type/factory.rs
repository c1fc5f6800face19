// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(rustfmt, rustfmt_skip)]

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::trace;

use crate::{
	error::{
		SerializationError,
		diagnostic::types::{invalid_length, no_type_for_kind},
	},
	kind::Kind,
	r#type::{SerializedType, Type},
	return_error,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TypeKey {
	pub(crate) kind: Kind,
	pub(crate) nullable: bool,
	pub(crate) length: usize,
}

static TYPES: Lazy<DashMap<TypeKey, &'static Type>> = Lazy::new(DashMap::new);

/// Process-wide registry of [`Type`] singletons.
pub struct TypeFactory;

impl TypeFactory {
	/// The singleton for a non-parameterized kind.
	///
	/// Panics when no such type exists; see [`TypeFactory::try_get`].
	pub fn get(kind: Kind, nullable: bool) -> &'static Type {
		match Self::try_get(kind, nullable) {
			Ok(ty) => ty,
			Err(err) => panic!("{}", err),
		}
	}

	pub fn try_get(kind: Kind, nullable: bool) -> crate::Result<&'static Type> {
		if kind.is_parameterized() || kind == Kind::Array || (kind == Kind::NullType && !nullable) {
			return_error!(no_type_for_kind(kind));
		}
		Ok(Self::intern(TypeKey { kind, nullable, length: 0 }))
	}

	/// The singleton for Char(length) or VarChar(length).
	///
	/// Panics when no such type exists; see [`TypeFactory::try_get_with_length`].
	pub fn get_with_length(kind: Kind, length: usize, nullable: bool) -> &'static Type {
		match Self::try_get_with_length(kind, length, nullable) {
			Ok(ty) => ty,
			Err(err) => panic!("{}", err),
		}
	}

	pub fn try_get_with_length(kind: Kind, length: usize, nullable: bool) -> crate::Result<&'static Type> {
		if !kind.is_parameterized() {
			return_error!(invalid_length(kind, length));
		}
		if kind == Kind::Char && length == 0 {
			return_error!(invalid_length(kind, length));
		}
		Ok(Self::intern(TypeKey { kind, nullable, length }))
	}

	pub(crate) fn intern(key: TypeKey) -> &'static Type {
		if let Some(ty) = TYPES.get(&key) {
			return *ty;
		}
		*TYPES.entry(key).or_insert_with(|| {
			trace!(kind = %key.kind, nullable = key.nullable, length = key.length, "interning type");
			Box::leak(Box::new(Type::new(key)))
		})
	}

	/// Least numeric kind both arguments safely coerce to.
	pub fn numeric_unifier(left: Kind, right: Kind) -> Option<Kind> {
		use Kind::*;
		match (left, right) {
			(Int,    Int)    => Some(Int),
			(Int,    Long)   => Some(Long),
			(Int,    Float)  => Some(Float),
			(Int,    Double) => Some(Double),
			(Long,   Int)    => Some(Long),
			(Long,   Long)   => Some(Long),
			(Long,   Float)  => Some(Double),
			(Long,   Double) => Some(Double),
			(Float,  Int)    => Some(Float),
			(Float,  Long)   => Some(Double),
			(Float,  Float)  => Some(Float),
			(Float,  Double) => Some(Double),
			(Double, Int)    => Some(Double),
			(Double, Long)   => Some(Double),
			(Double, Float)  => Some(Double),
			(Double, Double) => Some(Double),
			_ => None,
		}
	}

	/// Least type both arguments safely coerce to, nullable if either is.
	pub fn unifying_type(left: &Type, right: &Type) -> Option<&'static Type> {
		let nullable = left.is_nullable() || right.is_nullable();

		let unified = match (left.kind(), right.kind()) {
			(Kind::NullType, _) => Some(right.nullable_version()),
			(_, Kind::NullType) => Some(left.nullable_version()),
			(Kind::Bool, Kind::Bool) => Some(Self::get(Kind::Bool, nullable)),
			(Kind::Bool, other) | (other, Kind::Bool) if other.is_numeric() => Some(Self::get(other, nullable)),
			(l, r) if l.is_numeric() && r.is_numeric() => {
				Self::numeric_unifier(l, r).map(|kind| Self::get(kind, nullable))
			}
			(l, r) if l.is_ascii_string() && r.is_ascii_string() => {
				let length = left.length().unwrap_or(0).max(right.length().unwrap_or(0));
				let kind = if l == Kind::Char && r == Kind::Char { Kind::Char } else { Kind::VarChar };
				Self::try_get_with_length(kind, length, nullable).ok()
			}
			(l, r) if l == r && l != Kind::Array => Self::try_get(l, nullable).ok(),
			_ => None,
		}?;

		debug_assert!(unified.is_safely_coercible_from(left) && unified.is_safely_coercible_from(right));
		Some(unified)
	}

	/// Rebuilds the singleton a [`SerializedType`] was produced from.
	pub fn deserialize(serialized: &SerializedType) -> crate::Result<&'static Type> {
		let kind = serialized.kind;
		match (kind.is_parameterized(), serialized.length) {
			(true, Some(length)) => {
				let length = usize::try_from(length)
					.map_err(|_| SerializationError::InvalidLength { kind, length })?;
				Self::try_get_with_length(kind, length, serialized.nullable)
			}
			(true, None) => Err(SerializationError::MissingLength { kind }.into()),
			(false, Some(length)) => Err(SerializationError::InvalidLength { kind, length }.into()),
			(false, None) => Self::try_get(kind, serialized.nullable),
		}
	}

	/// Parses a type name as printed by [`Type::name`], e.g. `VarChar(20) NULL`.
	/// Names are case-insensitive.
	pub fn parse_type_name(name: &str) -> Option<&'static Type> {
		let name = name.trim();
		let (base, nullable) = match name.len().checked_sub(5) {
			Some(split) if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(" null") => {
				(name[..split].trim_end(), true)
			}
			_ => (name, false),
		};

		match base.find('(') {
			Some(open) => {
				let kind: Kind = base[..open].trim().parse().ok()?;
				let rest = base[open + 1..].strip_suffix(')')?;
				let length: usize = rest.trim().parse().ok()?;
				Self::try_get_with_length(kind, length, nullable).ok()
			}
			None => {
				let kind: Kind = base.parse().ok()?;
				let nullable = nullable || kind == Kind::NullType;
				Self::try_get(kind, nullable).ok()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_singleton_identity() {
		let a = TypeFactory::get(Kind::Long, true);
		let b = TypeFactory::get(Kind::Long, true);
		assert!(std::ptr::eq(a, b));

		let c = TypeFactory::get_with_length(Kind::VarChar, 12, false);
		let d = TypeFactory::get_with_length(Kind::VarChar, 12, false);
		assert!(std::ptr::eq(c, d));
		assert_ne!(c, TypeFactory::get_with_length(Kind::VarChar, 13, false));
	}

	#[test]
	fn test_concurrent_interning_yields_one_singleton() {
		let handles: Vec<_> = (0..8)
			.map(|_| std::thread::spawn(|| TypeFactory::get_with_length(Kind::Char, 977, true) as *const Type as usize))
			.collect();
		let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
		assert!(addresses.windows(2).all(|w| w[0] == w[1]));
	}

	#[test]
	fn test_missing_types() {
		assert_eq!(TypeFactory::try_get(Kind::Array, false).unwrap_err().code(), "TYPE_001");
		assert_eq!(TypeFactory::try_get(Kind::NullType, false).unwrap_err().code(), "TYPE_001");
		assert_eq!(TypeFactory::try_get(Kind::Char, false).unwrap_err().code(), "TYPE_001");
		assert_eq!(TypeFactory::try_get_with_length(Kind::Int, 4, false).unwrap_err().code(), "TYPE_002");
	}

	#[test]
	fn test_numeric_unifier_table() {
		assert_eq!(TypeFactory::numeric_unifier(Kind::Int, Kind::Long), Some(Kind::Long));
		assert_eq!(TypeFactory::numeric_unifier(Kind::Int, Kind::Float), Some(Kind::Float));
		assert_eq!(TypeFactory::numeric_unifier(Kind::Long, Kind::Float), Some(Kind::Double));
		assert_eq!(TypeFactory::numeric_unifier(Kind::Float, Kind::Double), Some(Kind::Double));
		assert_eq!(TypeFactory::numeric_unifier(Kind::Double, Kind::Double), Some(Kind::Double));
		assert_eq!(TypeFactory::numeric_unifier(Kind::Bool, Kind::Int), None);
		for l in Kind::NUMERIC {
			for r in Kind::NUMERIC {
				assert_eq!(TypeFactory::numeric_unifier(l, r), TypeFactory::numeric_unifier(r, l));
			}
		}
	}

	#[test]
	fn test_unifying_type() {
		let int = TypeFactory::get(Kind::Int, false);
		let long_null = TypeFactory::get(Kind::Long, true);
		assert_eq!(TypeFactory::unifying_type(int, long_null), Some(TypeFactory::get(Kind::Long, true)));

		let char3 = TypeFactory::get_with_length(Kind::Char, 3, false);
		let varchar5 = TypeFactory::get_with_length(Kind::VarChar, 5, false);
		assert_eq!(
			TypeFactory::unifying_type(char3, varchar5),
			Some(TypeFactory::get_with_length(Kind::VarChar, 5, false))
		);

		let null = TypeFactory::get(Kind::NullType, true);
		assert_eq!(TypeFactory::unifying_type(null, int), Some(TypeFactory::get(Kind::Int, true)));

		let date = TypeFactory::get(Kind::Date, false);
		assert_eq!(TypeFactory::unifying_type(date, int), None);
	}

	#[test]
	fn test_deserialize_returns_singleton() {
		for ty in [
			TypeFactory::get(Kind::Bool, false),
			TypeFactory::get(Kind::YearMonthInterval, true),
			TypeFactory::get_with_length(Kind::Char, 7, true),
			TypeFactory::get(Kind::NullType, true),
			TypeFactory::get(Kind::Meta, false),
		] {
			let bytes = postcard::to_allocvec(&ty.serialize()).unwrap();
			let serialized: SerializedType = postcard::from_bytes(&bytes).unwrap();
			assert_eq!(TypeFactory::deserialize(&serialized).unwrap(), ty);
		}
	}

	#[test]
	fn test_deserialize_rejects_bad_lengths() {
		let missing = SerializedType { kind: Kind::VarChar, nullable: false, length: None };
		assert_eq!(TypeFactory::deserialize(&missing).unwrap_err().code(), "SERIALIZATION_001");

		let extra = SerializedType { kind: Kind::Int, nullable: false, length: Some(3) };
		assert_eq!(TypeFactory::deserialize(&extra).unwrap_err().code(), "SERIALIZATION_001");
	}

	#[test]
	fn test_parse_type_name() {
		assert_eq!(TypeFactory::parse_type_name("Int"), Some(TypeFactory::get(Kind::Int, false)));
		assert_eq!(TypeFactory::parse_type_name("double null"), Some(TypeFactory::get(Kind::Double, true)));
		assert_eq!(
			TypeFactory::parse_type_name("VarChar(20) NULL"),
			Some(TypeFactory::get_with_length(Kind::VarChar, 20, true))
		);
		assert_eq!(TypeFactory::parse_type_name("NullType"), Some(TypeFactory::get(Kind::NullType, true)));
		assert_eq!(TypeFactory::parse_type_name("Char"), None);
		assert_eq!(TypeFactory::parse_type_name("Char(x)"), None);
		assert_eq!(TypeFactory::parse_type_name("Blob"), None);

		for ty in [TypeFactory::get_with_length(Kind::Char, 4, true), TypeFactory::get(Kind::Date, false)] {
			assert_eq!(TypeFactory::parse_type_name(&ty.name()), Some(ty));
		}
	}
}
