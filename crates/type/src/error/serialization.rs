// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	error::diagnostic::{Diagnostic, IntoDiagnostic, serialization},
	kind::Kind,
};

/// Failures while decoding the serialized form of types and values.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
	#[error("postcard: {0}")]
	Postcard(#[from] postcard::Error),

	#[error("unknown kind id {0}")]
	UnknownKind(u8),

	#[error("kind {kind} requires a length")]
	MissingLength {
		kind: Kind,
	},

	#[error("invalid length {length} for kind {kind}")]
	InvalidLength {
		kind: Kind,
		length: u64,
	},

	#[error("value field `{field}` does not belong to kind {kind}")]
	MismatchedField {
		kind: Kind,
		field: &'static str,
	},

	#[error("more than one value field is populated for kind {kind}")]
	MultipleFields {
		kind: Kind,
	},

	#[error("{kind} data must end in exactly one NUL terminator")]
	MissingTerminator {
		kind: Kind,
	},

	#[error("kind {0} cannot hold a non-null value")]
	NullOnlyKind(Kind),
}

impl IntoDiagnostic for SerializationError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			SerializationError::Postcard(err) => serialization::codec_error(err.to_string()),
			other => serialization::malformed(other.to_string()),
		}
	}
}
