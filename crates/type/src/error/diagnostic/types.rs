// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{error::diagnostic::Diagnostic, kind::Kind};

/// The kind has no type singleton for the requested nullability
pub fn no_type_for_kind(kind: Kind) -> Diagnostic {
	Diagnostic {
		code: "TYPE_001".to_string(),
		message: format!("No type exists for kind {}", kind),
		label: None,
		help: match kind {
			Kind::NullType => Some("NullType is always nullable".to_string()),
			Kind::Array => Some("Array is a marker kind and has no scalar type".to_string()),
			Kind::Char | Kind::VarChar => Some(format!("{} requires a length", kind)),
			_ => None,
		},
		notes: vec![],
		cause: None,
	}
}

/// The kind does not take a length, or the length is out of range
pub fn invalid_length(kind: Kind, length: usize) -> Diagnostic {
	Diagnostic {
		code: "TYPE_002".to_string(),
		message: format!("Invalid length {} for kind {}", length, kind),
		label: None,
		help: match kind {
			Kind::Char | Kind::VarChar => None,
			_ => Some(format!("{} is not a parameterized kind", kind)),
		},
		notes: vec![],
		cause: None,
	}
}
