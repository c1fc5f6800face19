// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

pub(crate) const MAX_YEAR: i64 = 99_999;

pub(crate) const MICROS_PER_SECOND: i64 = 1_000_000;
pub(crate) const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
pub(crate) const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
pub(crate) const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

#[inline]
pub(crate) fn is_leap_year(year: i64) -> bool {
	(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[inline]
pub(crate) fn days_in_month(year: i64, month: u32) -> u32 {
	match month {
		1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
		4 | 6 | 9 | 11 => 30,
		2 => {
			if is_leap_year(year) {
				29
			} else {
				28
			}
		}
		_ => 0,
	}
}

pub(crate) fn is_valid_ymd(year: i64, month: u32, day: u32) -> bool {
	(-MAX_YEAR..=MAX_YEAR).contains(&year) && (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

/// Days since 1970-01-01 for a proleptic Gregorian date (Howard Hinnant).
pub(crate) fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
	let (y, m) = if month <= 2 {
		(year - 1, month as i64 + 9)
	} else {
		(year, month as i64 - 3)
	};

	let era = y.div_euclid(400);
	let yoe = y - era * 400; // [0, 399]
	let doy = (153 * m + 2) / 5 + day as i64 - 1; // [0, 365]
	let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
	era * 146_097 + doe - 719_468
}

pub(crate) fn civil_from_days(days: i64) -> (i64, u32, u32) {
	let z = days + 719_468;
	let era = z.div_euclid(146_097);
	let doe = z - era * 146_097; // [0, 146096]
	let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
	let y = yoe + era * 400;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
	let mp = (5 * doy + 2) / 153; // [0, 11]
	let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
	let m = if mp < 10 {
		mp + 3
	} else {
		mp - 9
	};
	let year = if m <= 2 {
		y + 1
	} else {
		y
	};
	(year, m as u32, d as u32)
}

/// Shifts a date by whole months, clamping the day to the end of the target month.
pub(crate) fn add_months(year: i64, month: u32, day: u32, months: i64) -> Option<(i64, u32, u32)> {
	let total = year.checked_mul(12)?.checked_add(month as i64 - 1)?.checked_add(months)?;
	let year = total.div_euclid(12);
	let month = (total.rem_euclid(12) + 1) as u32;
	if !(-MAX_YEAR..=MAX_YEAR).contains(&year) {
		return None;
	}
	let day = day.min(days_in_month(year, month));
	Some((year, month, day))
}

/// ISO 8601 expanded years carry an explicit sign outside 0..=9999.
pub(crate) fn write_year(f: &mut impl Write, year: i64) -> std::fmt::Result {
	if year > 9999 || year < 0 {
		write!(f, "{:+05}", year)
	} else {
		write!(f, "{:04}", year)
	}
}

/// Appends `.ffffff` when the sub-second part is non-zero.
pub(crate) fn write_subseconds(f: &mut impl Write, micros: i64) -> std::fmt::Result {
	if micros != 0 {
		write!(f, ".{:06}", micros)
	} else {
		Ok(())
	}
}

/// Minimal scanner over ASCII input.
pub(crate) struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	pub(crate) fn new(input: &'a str) -> Self {
		Self {
			bytes: input.as_bytes(),
			pos: 0,
		}
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.pos >= self.bytes.len()
	}

	pub(crate) fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	pub(crate) fn eat(&mut self, byte: u8) -> bool {
		if self.peek() == Some(byte) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	pub(crate) fn eat_any(&mut self, bytes: &[u8]) -> bool {
		match self.peek() {
			Some(b) if bytes.contains(&b) => {
				self.pos += 1;
				true
			}
			_ => false,
		}
	}

	/// Returns `-1` for a consumed minus, `1` otherwise.
	pub(crate) fn sign(&mut self) -> i64 {
		if self.eat(b'-') {
			-1
		} else {
			self.eat(b'+');
			1
		}
	}

	pub(crate) fn skip_spaces(&mut self) -> usize {
		let start = self.pos;
		while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
			self.pos += 1;
		}
		self.pos - start
	}

	/// Reads between `min` and `max` decimal digits.
	pub(crate) fn digits(&mut self, min: usize, max: usize) -> Option<(i64, usize)> {
		let start = self.pos;
		let mut value: i64 = 0;
		while self.pos - start < max {
			match self.peek() {
				Some(b) if b.is_ascii_digit() => {
					value = value.checked_mul(10)?.checked_add((b - b'0') as i64)?;
					self.pos += 1;
				}
				_ => break,
			}
		}
		let count = self.pos - start;
		if count < min {
			self.pos = start;
			return None;
		}
		Some((value, count))
	}

	pub(crate) fn word(&mut self) -> &'a str {
		let start = self.pos;
		while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
			self.pos += 1;
		}
		// Input is ASCII-checked byte by byte above.
		std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("")
	}

	/// Parses `.f{1,6}`, scaled to microseconds. Absent fraction is zero.
	pub(crate) fn fraction(&mut self) -> Option<i64> {
		if !self.eat(b'.') {
			return Some(0);
		}
		let (value, count) = self.digits(1, 6)?;
		Some(value * 10_i64.pow((6 - count) as u32))
	}

	/// Parses `HH:MM:SS[.ffffff]` into microseconds.
	pub(crate) fn clock(&mut self, max_hour: i64) -> Option<i64> {
		let (hour, _) = self.digits(1, 2)?;
		if !self.eat(b':') {
			return None;
		}
		let (minute, _) = self.digits(2, 2)?;
		if !self.eat(b':') {
			return None;
		}
		let (second, _) = self.digits(2, 2)?;
		let micros = self.fraction()?;
		if hour > max_hour || minute > 59 || second > 59 {
			return None;
		}
		Some(hour * MICROS_PER_HOUR + minute * MICROS_PER_MINUTE + second * MICROS_PER_SECOND + micros)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_civil_roundtrip() {
		for days in [-719_468_i64, -1, 0, 1, 59, 365, 10_957, 2_932_896] {
			let (y, m, d) = civil_from_days(days);
			assert_eq!(days_from_civil(y, m, d), days);
		}
		assert_eq!(civil_from_days(0), (1970, 1, 1));
		assert_eq!(days_from_civil(2000, 3, 1), 11_017);
	}

	#[test]
	fn test_add_months_clamps_day() {
		assert_eq!(add_months(2024, 1, 31, 1), Some((2024, 2, 29)));
		assert_eq!(add_months(2023, 1, 31, 1), Some((2023, 2, 28)));
		assert_eq!(add_months(2024, 3, 15, -3), Some((2023, 12, 15)));
		assert_eq!(add_months(2024, 12, 1, 13), Some((2026, 1, 1)));
		assert_eq!(add_months(MAX_YEAR, 12, 1, 1), None);
	}

	#[test]
	fn test_cursor_clock() {
		let mut cursor = Cursor::new("12:34:56.5");
		assert_eq!(cursor.clock(23), Some(12 * MICROS_PER_HOUR + 34 * MICROS_PER_MINUTE + 56_500_000));
		assert!(cursor.is_empty());

		assert_eq!(Cursor::new("24:00:00").clock(23), None);
		assert_eq!(Cursor::new("00:60:00").clock(23), None);

		let mut cursor = Cursor::new("00:00:00.1234567");
		assert_eq!(cursor.clock(23), Some(123_456));
		assert!(!cursor.is_empty());
	}
}
