// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{error::diagnostic::Diagnostic, kind::Kind, r#type::Type};

/// No operation is registered under this name and arity
pub fn unrecognized_function(name: &str, arity: usize) -> Diagnostic {
	Diagnostic {
		code: "OPERATION_001".to_string(),
		message: format!("Unrecognized function {} with {} arguments", name, arity),
		label: Some("unknown function".to_string()),
		help: Some("Check the function name and the number of arguments".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// The name and arity exist, but no overload accepts these argument kinds
pub fn unexpected_argument_types(name: &str, argument_kinds: &[Kind]) -> Diagnostic {
	let kinds = argument_kinds.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(", ");
	Diagnostic {
		code: "OPERATION_002".to_string(),
		message: format!("Unexpected argument types for function {}", name),
		label: Some("no matching overload".to_string()),
		help: None,
		notes: vec![format!("argument kinds: ({})", kinds)],
		cause: None,
	}
}

/// An overload matched but rejected the concrete argument types or static values
pub fn not_applicable(name: &str, argument_types: &[&Type], reason: Option<String>) -> Diagnostic {
	let types = argument_types.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ");
	Diagnostic {
		code: "OPERATION_003".to_string(),
		message: format!("Cannot apply {} to arguments of types ({})", name, types),
		label: Some("operation not applicable".to_string()),
		help: reason,
		notes: vec![],
		cause: None,
	}
}

/// A serialized operation refers to an id that is not registered
pub fn unknown_operation_id(super_type: &str, id: u8) -> Diagnostic {
	Diagnostic {
		code: "OPERATION_004".to_string(),
		message: format!("Unknown {} id {}", super_type, id),
		label: None,
		help: Some("The serialized operation was produced by an incompatible build".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// A signature resolved to an operation of a different super type than requested
pub fn wrong_super_type(signature: &str, expected: &str, actual: &str) -> Diagnostic {
	Diagnostic {
		code: "OPERATION_005".to_string(),
		message: format!("Operation {} is a {}, not a {}", signature, actual, expected),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// Argument count does not match what the operation requires
pub fn arity_mismatch(name: &str, expected: usize, actual: usize) -> Diagnostic {
	Diagnostic {
		code: "OPERATION_006".to_string(),
		message: format!("Function {} expects {} arguments, got {}", name, expected, actual),
		label: Some("wrong number of arguments".to_string()),
		help: Some(format!("Provide exactly {} arguments to function {}", expected, name)),
		notes: vec![],
		cause: None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::TypeFactory;

	#[test]
	fn test_unrecognized_function_message() {
		let d = unrecognized_function("frobnicate", 2);
		assert_eq!(d.code, "OPERATION_001");
		assert_eq!(d.message, "Unrecognized function frobnicate with 2 arguments");
	}

	#[test]
	fn test_not_applicable_lists_types() {
		let int = TypeFactory::get(Kind::Int, false);
		let chr = TypeFactory::get_with_length(Kind::Char, 5, true);
		let d = not_applicable("+", &[int, chr], None);
		assert_eq!(d.message, "Cannot apply + to arguments of types (Int, Char(5) NULL)");
	}
}
