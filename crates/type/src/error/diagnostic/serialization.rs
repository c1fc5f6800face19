// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;

/// The serialized form decoded, but does not describe a valid object
pub fn malformed(reason: String) -> Diagnostic {
	Diagnostic {
		code: "SERIALIZATION_001".to_string(),
		message: format!("Malformed serialized value: {}", reason),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// The binary codec failed
pub fn codec_error(reason: String) -> Diagnostic {
	Diagnostic {
		code: "SERIALIZATION_002".to_string(),
		message: format!("Serialization failed: {}", reason),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
