// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! A small golden-script runner. A script is a sequence of blocks separated
//! by blank lines. Each block holds one or more commands, a `---` line and the
//! output the commands are expected to produce:
//!
//! ```text
//! # comments start with a hash
//! resolve + Int Long
//! ---
//! +(Int, Long; static=0) -> Long
//!
//! !resolve + Char(5) Char(5)
//! ---
//! Error: OPERATION_002
//! ```
//!
//! A leading `!` marks a command that must fail; the runner prints
//! `Error: <message>` in place of its output.

use std::{error::Error, fmt::Write, fs, path::Path};

/// One command line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
	pub name: String,
	pub args: Vec<Argument>,
	pub fail: bool,
	pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
	pub value: String,
}

impl Command {
	pub fn arg(&self, index: usize) -> Option<&str> {
		self.args.get(index).map(|arg| arg.value.as_str())
	}

	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.args.iter().map(|arg| arg.value.as_str())
	}
}

#[derive(Debug, Clone)]
struct Block {
	commands: Vec<Command>,
	expected: String,
	line: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
	#[error("line {line}: {message}")]
	Parse {
		line: usize,
		message: String,
	},

	#[error("line {line}: `{command}` succeeded but was expected to fail")]
	UnexpectedSuccess {
		line: usize,
		command: String,
	},

	#[error("line {line}: `{command}` failed: {cause}")]
	Failed {
		line: usize,
		command: String,
		cause: Box<dyn Error>,
	},

	#[error("block at line {line} produced different output\n--- expected\n{expected}--- actual\n{actual}")]
	Mismatch {
		line: usize,
		expected: String,
		actual: String,
	},

	#[error("{0}")]
	Io(#[from] std::io::Error),
}

/// Executes the commands of a script.
pub trait Runner {
	fn run(&mut self, command: &Command) -> Result<String, Box<dyn Error>>;
}

pub fn run_path<R: Runner>(runner: &mut R, path: &Path) -> Result<(), ScriptError> {
	let input = fs::read_to_string(path)?;
	run(runner, &input)
}

/// Runs every block of `input`, stopping at the first mismatch.
pub fn run<R: Runner>(runner: &mut R, input: &str) -> Result<(), ScriptError> {
	for block in parse(input)? {
		let mut actual = String::new();
		for command in &block.commands {
			let rendered = render(command);
			match (runner.run(command), command.fail) {
				(Ok(output), false) => {
					actual.push_str(&output);
					if !output.is_empty() && !output.ends_with('\n') {
						actual.push('\n');
					}
				}
				(Err(err), true) => {
					let _ = writeln!(actual, "Error: {}", err);
				}
				(Ok(_), true) => {
					return Err(ScriptError::UnexpectedSuccess {
						line: command.line,
						command: rendered,
					});
				}
				(Err(cause), false) => {
					return Err(ScriptError::Failed {
						line: command.line,
						command: rendered,
						cause,
					});
				}
			}
		}
		if actual != block.expected {
			return Err(ScriptError::Mismatch {
				line: block.line,
				expected: block.expected,
				actual,
			});
		}
	}
	Ok(())
}

fn render(command: &Command) -> String {
	let mut rendered = String::new();
	if command.fail {
		rendered.push('!');
	}
	rendered.push_str(&command.name);
	for arg in &command.args {
		rendered.push(' ');
		rendered.push_str(&arg.value);
	}
	rendered
}

fn parse(input: &str) -> Result<Vec<Block>, ScriptError> {
	let mut blocks = Vec::new();
	let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line)).peekable();

	while let Some(&(line, text)) = lines.peek() {
		let trimmed = text.trim();
		if trimmed.is_empty() || trimmed.starts_with('#') {
			lines.next();
			continue;
		}

		let mut commands = Vec::new();
		loop {
			let Some((number, text)) = lines.next() else {
				return Err(ScriptError::Parse {
					line,
					message: "block has no `---` separator".to_string(),
				});
			};
			let text = text.trim();
			if text == "---" {
				break;
			}
			if text.is_empty() {
				return Err(ScriptError::Parse {
					line: number,
					message: "blank line before `---`".to_string(),
				});
			}
			if !text.starts_with('#') {
				commands.push(parse_command(number, text)?);
			}
		}

		let mut expected = String::new();
		while let Some(&(_, text)) = lines.peek() {
			if text.trim().is_empty() {
				break;
			}
			expected.push_str(text.trim_end());
			expected.push('\n');
			lines.next();
		}

		blocks.push(Block {
			commands,
			expected,
			line,
		});
	}
	Ok(blocks)
}

fn parse_command(line: usize, text: &str) -> Result<Command, ScriptError> {
	let (fail, text) = match text.strip_prefix('!') {
		Some(rest) => (true, rest.trim_start()),
		None => (false, text),
	};
	let mut tokens = tokenize(line, text)?.into_iter();
	let Some(name) = tokens.next() else {
		return Err(ScriptError::Parse {
			line,
			message: "empty command".to_string(),
		});
	};
	Ok(Command {
		name,
		args: tokens
			.map(|value| Argument {
				value,
			})
			.collect(),
		fail,
		line,
	})
}

/// Splits on whitespace; double quotes group a token and `\"` escapes a quote.
fn tokenize(line: usize, text: &str) -> Result<Vec<String>, ScriptError> {
	let mut tokens = Vec::new();
	let mut chars = text.chars().peekable();
	while let Some(&c) = chars.peek() {
		if c.is_whitespace() {
			chars.next();
			continue;
		}
		let mut token = String::new();
		if c == '"' {
			chars.next();
			let mut closed = false;
			while let Some(c) = chars.next() {
				match c {
					'"' => {
						closed = true;
						break;
					}
					'\\' if chars.peek() == Some(&'"') => {
						chars.next();
						token.push('"');
					}
					c => token.push(c),
				}
			}
			if !closed {
				return Err(ScriptError::Parse {
					line,
					message: "unterminated string".to_string(),
				});
			}
		} else {
			while let Some(&c) = chars.peek() {
				if c.is_whitespace() {
					break;
				}
				token.push(c);
				chars.next();
			}
		}
		tokens.push(token);
	}
	Ok(tokens)
}
