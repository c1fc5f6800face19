// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::calendar::{self, Cursor, MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND};

/// A duration in microseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatetimeIntervalLit {
	pub ticks: i64,
}

/// A duration in calendar months.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonthIntervalLit {
	pub months: i64,
}

impl DatetimeIntervalLit {
	pub fn from_ticks(ticks: i64) -> Self {
		Self {
			ticks,
		}
	}

	/// Accepts `"<count> <unit>"`, `"[-]D day(s) HH:MM:SS[.ffffff]"` and
	/// `"[-]HH:MM:SS[.ffffff]"`.
	pub fn parse(input: &str) -> Option<Self> {
		if let Some((count, unit)) = parse_simple(input) {
			return Self::from_simple(count, &unit);
		}
		Self::parse_complex(input)
	}

	pub fn from_simple(count: i64, unit: &str) -> Option<Self> {
		let scale = match unit {
			"us" | "microsecond" | "microseconds" => 1,
			"ms" | "millisecond" | "milliseconds" => 1_000,
			"s" | "second" | "seconds" => MICROS_PER_SECOND,
			"minute" | "minutes" => MICROS_PER_MINUTE,
			"h" | "hour" | "hours" => MICROS_PER_HOUR,
			"d" | "day" | "days" => MICROS_PER_DAY,
			"w" | "week" | "weeks" => 7 * MICROS_PER_DAY,
			_ => return None,
		};
		Some(Self {
			ticks: count.checked_mul(scale)?,
		})
	}

	fn parse_complex(input: &str) -> Option<Self> {
		let mut cursor = Cursor::new(input);
		let negative = cursor.eat(b'-');

		let mut probe = Cursor::new(input);
		probe.eat(b'-');
		let has_days = probe.digits(1, 18).is_some() && probe.skip_spaces() > 0 && probe.peek().is_some_and(|b| b.is_ascii_alphabetic());

		let mut ticks = 0_i64;
		let max_hour = if has_days {
			let (days, _) = cursor.digits(1, 18)?;
			cursor.skip_spaces();
			let unit = cursor.word().to_ascii_lowercase();
			if unit != "day" && unit != "days" {
				return None;
			}
			if cursor.skip_spaces() == 0 {
				return None;
			}
			ticks = days.checked_mul(MICROS_PER_DAY)?;
			23
		} else {
			i64::MAX / MICROS_PER_HOUR
		};

		ticks = ticks.checked_add(cursor.clock(max_hour)?)?;
		if !cursor.is_empty() {
			return None;
		}
		Some(Self {
			ticks: if negative {
				-ticks
			} else {
				ticks
			},
		})
	}
}

impl Display for DatetimeIntervalLit {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let magnitude = self.ticks.unsigned_abs();
		if self.ticks < 0 {
			f.write_str("-")?;
		}
		let days = magnitude / MICROS_PER_DAY as u64;
		let rest = magnitude % MICROS_PER_DAY as u64;
		if days != 0 {
			write!(f, "{} {} ", days, plural(days, "day", "days"))?;
		}
		let hours = rest / MICROS_PER_HOUR as u64;
		let minutes = rest % MICROS_PER_HOUR as u64 / MICROS_PER_MINUTE as u64;
		let seconds = rest % MICROS_PER_MINUTE as u64 / MICROS_PER_SECOND as u64;
		write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)?;
		calendar::write_subseconds(f, (rest % MICROS_PER_SECOND as u64) as i64)
	}
}

impl YearMonthIntervalLit {
	pub fn from_months(months: i64) -> Self {
		Self {
			months,
		}
	}

	/// Accepts `"<count> <unit>"` and `"[-]Y year(s) M mon(s)"`.
	pub fn parse(input: &str) -> Option<Self> {
		if let Some((count, unit)) = parse_simple(input) {
			return Self::from_simple(count, &unit);
		}
		Self::parse_complex(input)
	}

	pub fn from_simple(count: i64, unit: &str) -> Option<Self> {
		let scale = match unit {
			"mon" | "mons" | "month" | "months" => 1,
			"y" | "year" | "years" => 12,
			"decade" | "decades" => 12 * 10,
			"century" | "centuries" => 12 * 100,
			"millennium" | "millennia" => 12 * 1000,
			_ => return None,
		};
		Some(Self {
			months: count.checked_mul(scale)?,
		})
	}

	fn parse_complex(input: &str) -> Option<Self> {
		let mut cursor = Cursor::new(input);
		let negative = cursor.eat(b'-');

		let (years, _) = cursor.digits(1, 18)?;
		cursor.skip_spaces();
		let unit = cursor.word().to_ascii_lowercase();
		if unit != "year" && unit != "years" {
			return None;
		}
		if cursor.skip_spaces() == 0 {
			return None;
		}
		let (months, _) = cursor.digits(1, 2)?;
		cursor.skip_spaces();
		let unit = cursor.word().to_ascii_lowercase();
		if !matches!(unit.as_str(), "mon" | "mons" | "month" | "months") {
			return None;
		}
		if !cursor.is_empty() || months > 11 {
			return None;
		}

		let total = years.checked_mul(12)?.checked_add(months)?;
		Some(Self {
			months: if negative {
				-total
			} else {
				total
			},
		})
	}
}

impl Display for YearMonthIntervalLit {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let magnitude = self.months.unsigned_abs();
		if self.months < 0 {
			f.write_str("-")?;
		}
		let years = magnitude / 12;
		let months = magnitude % 12;
		write!(f, "{} {} {} {}", years, plural(years, "year", "years"), months, plural(months, "mon", "mons"))
	}
}

fn plural(count: u64, one: &'static str, many: &'static str) -> &'static str {
	if count == 1 {
		one
	} else {
		many
	}
}

/// Splits `"[-]<digits> <unit>"` into a signed count and a lower-cased unit.
fn parse_simple(input: &str) -> Option<(i64, String)> {
	let mut cursor = Cursor::new(input.trim());
	let sign = cursor.sign();
	let (count, _) = cursor.digits(1, 18)?;
	cursor.skip_spaces();
	let unit = cursor.word().to_ascii_lowercase();
	if unit.is_empty() || !cursor.is_empty() {
		return None;
	}
	Some((sign * count, unit))
}
