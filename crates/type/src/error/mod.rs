// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::{Deref, DerefMut},
};

pub mod diagnostic;
mod r#macro;
mod serialization;

use diagnostic::{Diagnostic, IntoDiagnostic, render::DefaultRenderer};
pub use serialization::SerializationError;

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let out = DefaultRenderer::render_string(&self.0);
		f.write_str(out.as_str())
	}
}

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}

	pub fn code(&self) -> &str {
		self.0.code.as_str()
	}
}

impl std::error::Error for Error {}

impl From<SerializationError> for Error {
	fn from(err: SerializationError) -> Self {
		Error(err.into_diagnostic())
	}
}

impl From<postcard::Error> for Error {
	fn from(err: postcard::Error) -> Self {
		Error(SerializationError::Postcard(err).into_diagnostic())
	}
}
