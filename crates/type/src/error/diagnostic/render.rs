// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use super::Diagnostic;

pub trait DiagnosticRenderer {
	fn render(&self, diagnostic: &Diagnostic) -> String;
}

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		DefaultRenderer.render(diagnostic)
	}
}

impl DiagnosticRenderer for DefaultRenderer {
	fn render(&self, d: &Diagnostic) -> String {
		let mut output = String::new();
		render_into(&mut output, d, 0);
		output
	}
}

fn render_into(output: &mut String, d: &Diagnostic, depth: usize) {
	let indent = "  ".repeat(depth);

	let _ = writeln!(output, "{indent}error[{}]: {}", d.code, d.message);

	if let Some(label) = &d.label {
		let _ = writeln!(output, "{indent}  = {}", label);
	}

	if let Some(help) = &d.help {
		let _ = writeln!(output, "{indent}help: {}", help);
	}

	for note in &d.notes {
		let _ = writeln!(output, "{indent}note: {}", note);
	}

	if let Some(cause) = &d.cause {
		let _ = writeln!(output, "{indent}caused by:");
		render_into(output, cause, depth + 1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_with_cause() {
		let inner = Diagnostic {
			code: "INNER".to_string(),
			message: "inner failure".to_string(),
			label: None,
			help: None,
			notes: vec![],
			cause: None,
		};
		let outer = Diagnostic {
			code: "OUTER".to_string(),
			message: "outer failure".to_string(),
			label: Some("here".to_string()),
			help: Some("try again".to_string()),
			notes: vec!["first".to_string()],
			cause: None,
		}
		.with_cause(inner);

		let rendered = DefaultRenderer::render_string(&outer);
		assert_eq!(
			rendered,
			"error[OUTER]: outer failure\n  = here\nhelp: try again\nnote: first\ncaused by:\n  error[INNER]: inner failure\n"
		);
	}
}
