// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Wraps a diagnostic into an [`Error`](crate::error::Error).
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error($diagnostic)
	};
}

/// Returns early with an error built from a diagnostic.
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error::Error($diagnostic))
	};
}

/// Creates an internal error diagnostic with the caller's source location.
#[macro_export]
macro_rules! internal_error {
	($reason:expr) => {
		$crate::error::diagnostic::internal::internal_with_context(
			$reason,
			file!(),
			line!(),
			column!(),
			module_path!(),
		)
	};
	($fmt:expr, $($arg:tt)*) => {
		$crate::error::diagnostic::internal::internal_with_context(
			format!($fmt, $($arg)*),
			file!(),
			line!(),
			column!(),
			module_path!(),
		)
	};
}

/// Creates an `Err` holding an internal error.
#[macro_export]
macro_rules! internal_err {
	($reason:expr) => {
		Err($crate::error::Error($crate::internal_error!($reason)))
	};
	($fmt:expr, $($arg:tt)*) => {
		Err($crate::error::Error($crate::internal_error!($fmt, $($arg)*)))
	};
}

#[cfg(test)]
mod tests {
	use crate::error::Error;

	fn fails() -> crate::Result<()> {
		crate::internal_err!("index {} out of sync", 3)
	}

	#[test]
	fn test_internal_err_captures_location() {
		let err: Error = fails().unwrap_err();
		assert_eq!(err.code, "INTERNAL_ERROR");
		assert!(err.message.contains("index 3 out of sync"));
		assert!(err.label.as_deref().unwrap().contains("macro.rs"));
	}

	#[test]
	fn test_error_macro_wraps_diagnostic() {
		let err = crate::error!(crate::error::diagnostic::types::no_type_for_kind(crate::Kind::Array));
		assert_eq!(err.code(), "TYPE_001");
	}
}
