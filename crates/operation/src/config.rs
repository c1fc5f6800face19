// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Configuration for the compiled pattern cache used by LIKE and regex
/// comparators.
#[derive(Debug, Clone)]
pub struct PatternConfig {
	/// Upper bound on the compiled size of one regex, in bytes.
	pub regex_size_limit: usize,
	/// Upper bound on the lazy DFA cache of one regex, in bytes.
	pub dfa_size_limit: usize,
	/// Number of compiled patterns kept for per-row pattern operands.
	///
	/// Default: 64. 0 disables caching.
	pub cache_capacity: usize,
}

impl Default for PatternConfig {
	fn default() -> Self {
		Self {
			regex_size_limit: 1 << 20,
			dfa_size_limit: 2 << 20,
			cache_capacity: 64,
		}
	}
}

/// Configuration of an [`OperationFactory`](crate::OperationFactory).
#[derive(Debug, Clone)]
pub struct OperationConfig {
	pub pattern: PatternConfig,
	/// When `false`, LIKE and NOT LIKE ignore ASCII case.
	pub case_sensitive_like: bool,
}

impl Default for OperationConfig {
	fn default() -> Self {
		Self {
			pattern: PatternConfig::default(),
			case_sensitive_like: true,
		}
	}
}

impl OperationConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn case_sensitive_like(mut self, case_sensitive: bool) -> Self {
		self.case_sensitive_like = case_sensitive;
		self
	}

	pub fn pattern_cache_capacity(mut self, capacity: usize) -> Self {
		self.pattern.cache_capacity = capacity;
		self
	}
}
