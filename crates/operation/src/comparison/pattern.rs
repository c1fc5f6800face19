// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{marker::PhantomData, sync::Arc};

use indexmap::IndexMap;
use parking_lot::Mutex;
use regex::bytes::{Regex, RegexBuilder};
use stratum_type::{Kind, Type};
use tracing::{debug, trace};

use crate::{
	comparison::{ComparisonFunctor, ComparisonId, UncheckedComparator, make_comparator},
	config::PatternConfig,
	native::{AsciiKind, CharKind, VarCharKind},
};

/// Translates a LIKE pattern into an anchored regex. `%` matches any
/// sequence, `_` any single character and `\` escapes the next character.
pub fn like_to_regex(pattern: &str, case_sensitive: bool) -> String {
	let mut regex = String::with_capacity(pattern.len() + 12);
	if !case_sensitive {
		regex.push_str("(?i)");
	}
	regex.push_str("^(?s:");
	let mut buf = [0u8; 4];
	let mut chars = pattern.chars();
	while let Some(c) = chars.next() {
		match c {
			'%' => regex.push_str(".*"),
			'_' => regex.push('.'),
			'\\' => {
				let escaped = chars.next().unwrap_or('\\');
				regex.push_str(&regex::escape(escaped.encode_utf8(&mut buf)));
			}
			c => regex.push_str(&regex::escape(c.encode_utf8(&mut buf))),
		}
	}
	regex.push_str(")$");
	regex
}

/// Compiled regexes keyed by their source, evicted oldest first once
/// `cache_capacity` entries are held. Patterns that fail to compile are not
/// cached and match nothing.
pub struct PatternCache {
	config: PatternConfig,
	patterns: Mutex<IndexMap<String, Arc<Regex>>>,
}

impl PatternCache {
	pub fn new(config: PatternConfig) -> Self {
		Self {
			patterns: Mutex::new(IndexMap::with_capacity(config.cache_capacity)),
			config,
		}
	}

	pub fn config(&self) -> &PatternConfig {
		&self.config
	}

	pub fn len(&self) -> usize {
		self.patterns.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Compiles `source` without consulting the cache.
	pub fn compile(&self, source: &str) -> Option<Arc<Regex>> {
		let compiled = RegexBuilder::new(source)
			.size_limit(self.config.regex_size_limit)
			.dfa_size_limit(self.config.dfa_size_limit)
			.build();
		match compiled {
			Ok(regex) => Some(Arc::new(regex)),
			Err(err) => {
				debug!(pattern = source, error = %err, "pattern does not compile");
				None
			}
		}
	}

	pub fn get(&self, source: &str) -> Option<Arc<Regex>> {
		if self.config.cache_capacity == 0 {
			return self.compile(source);
		}
		if let Some(regex) = self.patterns.lock().get(source) {
			return Some(regex.clone());
		}
		let regex = self.compile(source)?;
		let mut patterns = self.patterns.lock();
		if patterns.len() >= self.config.cache_capacity {
			if let Some((evicted, _)) = patterns.shift_remove_index(0) {
				trace!(pattern = %evicted, "evicting compiled pattern");
			}
		}
		patterns.insert(source.to_string(), regex.clone());
		Some(regex)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Syntax {
	Like {
		case_sensitive: bool,
	},
	Regex,
}

/// LIKE (full match) and regex (partial match) comparisons; the pattern is
/// the right operand.
pub struct PatternComparator<L, R> {
	syntax: Syntax,
	negated: bool,
	patterns: Arc<PatternCache>,
	bound: Option<Option<Arc<Regex>>>,
	_kinds: PhantomData<(L, R)>,
}

impl<L, R> PatternComparator<L, R> {
	fn source(&self, pattern: &[u8]) -> Option<String> {
		let pattern = std::str::from_utf8(pattern).ok()?;
		Some(match self.syntax {
			Syntax::Like {
				case_sensitive,
			} => like_to_regex(pattern, case_sensitive),
			Syntax::Regex => pattern.to_string(),
		})
	}

	fn regex(&self, pattern: &[u8]) -> Option<Arc<Regex>> {
		let source = self.source(pattern)?;
		self.patterns.get(&source)
	}
}

impl<L: AsciiKind, R: AsciiKind> ComparisonFunctor for PatternComparator<L, R> {
	type Left = L;
	type Right = R;

	fn compare(&self, left: L::Value<'_>, right: R::Value<'_>) -> bool {
		let matched = match &self.bound {
			Some(regex) => regex.as_ref().is_some_and(|regex| regex.is_match(L::bytes(left))),
			None => self.regex(R::bytes(right)).is_some_and(|regex| regex.is_match(L::bytes(left))),
		};
		matched != self.negated
	}

	fn bind_right(&self, right: R::Value<'_>) -> Option<Self> {
		let source = self.source(R::bytes(right));
		Some(Self {
			syntax: self.syntax,
			negated: self.negated,
			patterns: self.patterns.clone(),
			bound: Some(source.and_then(|source| self.patterns.compile(&source))),
			_kinds: PhantomData,
		})
	}
}

pub(crate) fn make_pattern_comparator(
	id: ComparisonId,
	patterns: Arc<PatternCache>,
	case_sensitive_like: bool,
	left: &'static Type,
	right: &'static Type,
) -> Option<Box<dyn UncheckedComparator>> {
	let like = Syntax::Like {
		case_sensitive: case_sensitive_like,
	};
	let (syntax, negated) = match id {
		ComparisonId::Like => (like, false),
		ComparisonId::NotLike => (like, true),
		ComparisonId::RegexMatch => (Syntax::Regex, false),
		ComparisonId::NotRegexMatch => (Syntax::Regex, true),
		_ => return None,
	};
	fn make<L: AsciiKind, R: AsciiKind>(
		syntax: Syntax,
		negated: bool,
		patterns: Arc<PatternCache>,
		left: &'static Type,
		right: &'static Type,
	) -> Box<dyn UncheckedComparator> {
		let functor = PatternComparator::<L, R> {
			syntax,
			negated,
			patterns,
			bound: None,
			_kinds: PhantomData,
		};
		make_comparator(functor, left, right)
	}
	let comparator = match (left.kind(), right.kind()) {
		(Kind::Char, Kind::Char) => make::<CharKind, CharKind>(syntax, negated, patterns, left, right),
		(Kind::Char, Kind::VarChar) => make::<CharKind, VarCharKind>(syntax, negated, patterns, left, right),
		(Kind::VarChar, Kind::Char) => make::<VarCharKind, CharKind>(syntax, negated, patterns, left, right),
		(Kind::VarChar, Kind::VarChar) => make::<VarCharKind, VarCharKind>(syntax, negated, patterns, left, right),
		_ => return None,
	};
	Some(comparator)
}

#[cfg(test)]
mod tests {
	use stratum_type::{ColumnVector, TypeFactory, TypedValue};

	use super::*;

	fn varchar() -> &'static Type {
		TypeFactory::get_with_length(Kind::VarChar, 32, true)
	}

	fn comparator(id: ComparisonId, case_sensitive: bool) -> (Box<dyn UncheckedComparator>, Arc<PatternCache>) {
		let cache = Arc::new(PatternCache::new(PatternConfig::default()));
		let comparator = make_pattern_comparator(id, cache.clone(), case_sensitive, varchar(), varchar()).unwrap();
		(comparator, cache)
	}

	#[test]
	fn test_like_translation() {
		assert_eq!(like_to_regex("a%b_c", true), "^(?s:a.*b.c)$");
		assert_eq!(like_to_regex(r"100\%", true), r"^(?s:100%)$");
		assert_eq!(like_to_regex("a.b", false), r"(?i)^(?s:a\.b)$");
	}

	#[test]
	fn test_like_is_a_full_match() {
		let (like, _) = comparator(ComparisonId::Like, true);
		let matches = |value: &str, pattern: &str| like.compare_typed_values(&TypedValue::varchar(value), &TypedValue::varchar(pattern));
		assert!(matches("database", "data%"));
		assert!(matches("database", "%base"));
		assert!(matches("cat", "c_t"));
		assert!(!matches("cart", "c_t"));
		assert!(!matches("Database", "data%"));
		assert!(matches("50%", r"50\%"));
		assert!(!matches("500", r"50\%"));
	}

	#[test]
	fn test_case_insensitive_like() {
		let (like, _) = comparator(ComparisonId::Like, false);
		assert!(like.compare_typed_values(&TypedValue::varchar("DataBase"), &TypedValue::varchar("data%")));
		let (not_like, _) = comparator(ComparisonId::NotLike, false);
		assert!(!not_like.compare_typed_values(&TypedValue::varchar("DataBase"), &TypedValue::varchar("data%")));
	}

	#[test]
	fn test_regex_is_a_partial_match() {
		let (regex, _) = comparator(ComparisonId::RegexMatch, true);
		assert!(regex.compare_typed_values(&TypedValue::varchar("order-1234"), &TypedValue::varchar("[0-9]+")));
		assert!(!regex.compare_typed_values(&TypedValue::varchar("order"), &TypedValue::varchar("^[0-9]+$")));
		let (not_regex, _) = comparator(ComparisonId::NotRegexMatch, true);
		assert!(not_regex.compare_typed_values(&TypedValue::varchar("order"), &TypedValue::varchar("[0-9]")));
	}

	#[test]
	fn test_invalid_pattern_matches_nothing() {
		let (regex, cache) = comparator(ComparisonId::RegexMatch, true);
		assert!(!regex.compare_typed_values(&TypedValue::varchar("(("), &TypedValue::varchar("((")));
		assert!(cache.is_empty());
	}

	#[test]
	fn test_static_pattern_over_column() {
		let (like, cache) = comparator(ComparisonId::Like, true);
		let column = ColumnVector::from_values(
			varchar(),
			[TypedValue::varchar("apple"), TypedValue::Null(Kind::VarChar), TypedValue::varchar("apricot"), TypedValue::varchar("banana")],
		);
		let matches = like.compare_column_vector_and_static_value(&column, &TypedValue::varchar("ap%"), None);
		assert_eq!(matches.iter().collect::<Vec<_>>(), vec![0, 2]);
		assert!(cache.is_empty());
	}

	#[test]
	fn test_cache_evicts_oldest() {
		let cache = PatternCache::new(PatternConfig {
			cache_capacity: 2,
			..PatternConfig::default()
		});
		for source in ["a", "b", "c"] {
			assert!(cache.get(source).is_some());
		}
		assert_eq!(cache.len(), 2);
		assert!(!cache.patterns.lock().contains_key("a"));
	}

	#[test]
	fn test_patterns_from_column() {
		let (regex, cache) = comparator(ComparisonId::RegexMatch, true);
		let patterns = ColumnVector::from_values(varchar(), [TypedValue::varchar("^a"), TypedValue::varchar("z$"), TypedValue::varchar("^a")]);
		let matches = regex.compare_static_value_and_column_vector(&TypedValue::varchar("abc"), &patterns, None);
		assert_eq!(matches.iter().collect::<Vec<_>>(), vec![0, 2]);
		assert_eq!(cache.len(), 2);
	}
}
