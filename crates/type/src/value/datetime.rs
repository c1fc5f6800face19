// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::{
	calendar::{self, Cursor, MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND},
	date::{DateLit, parse_date},
};

/// Microseconds since 1970-01-01T00:00:00 UTC.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatetimeLit {
	pub ticks: i64,
}

impl DatetimeLit {
	pub const TICKS_PER_SECOND: i64 = MICROS_PER_SECOND;

	pub fn from_ticks(ticks: i64) -> Self {
		Self {
			ticks,
		}
	}

	pub fn from_epoch_seconds(seconds: i64, subseconds: i64) -> Self {
		Self {
			ticks: seconds * MICROS_PER_SECOND + subseconds,
		}
	}

	pub fn from_date(date: DateLit) -> Self {
		Self {
			ticks: date.to_days_since_epoch() * MICROS_PER_DAY,
		}
	}

	pub fn from_parts(date: DateLit, hour: u32, minute: u32, second: u32, micros: u32) -> Option<Self> {
		if hour > 23 || minute > 59 || second > 59 || micros as i64 >= MICROS_PER_SECOND {
			return None;
		}
		let time_of_day = hour as i64 * MICROS_PER_HOUR
			+ minute as i64 * MICROS_PER_MINUTE
			+ second as i64 * MICROS_PER_SECOND
			+ micros as i64;
		Some(Self {
			ticks: Self::from_date(date).ticks + time_of_day,
		})
	}

	fn days(&self) -> i64 {
		self.ticks.div_euclid(MICROS_PER_DAY)
	}

	fn time_of_day(&self) -> i64 {
		self.ticks.rem_euclid(MICROS_PER_DAY)
	}

	pub fn date(&self) -> (i64, u32, u32) {
		calendar::civil_from_days(self.days())
	}

	pub fn year(&self) -> i64 {
		self.date().0
	}

	pub fn month(&self) -> u32 {
		self.date().1
	}

	pub fn day(&self) -> u32 {
		self.date().2
	}

	pub fn hour(&self) -> u32 {
		(self.time_of_day() / MICROS_PER_HOUR) as u32
	}

	pub fn minute(&self) -> u32 {
		(self.time_of_day() % MICROS_PER_HOUR / MICROS_PER_MINUTE) as u32
	}

	pub fn second(&self) -> u32 {
		(self.time_of_day() % MICROS_PER_MINUTE / MICROS_PER_SECOND) as u32
	}

	pub fn subseconds(&self) -> i64 {
		self.ticks.rem_euclid(MICROS_PER_SECOND)
	}

	pub fn epoch_seconds(&self) -> i64 {
		self.ticks.div_euclid(MICROS_PER_SECOND)
	}

	/// Shifts the calendar date by whole months, keeping the time of day.
	pub fn add_months(&self, months: i64) -> Option<Self> {
		let (year, month, day) = self.date();
		let (year, month, day) = calendar::add_months(year, month, day, months)?;
		let days = calendar::days_from_civil(year, month, day);
		Some(Self {
			ticks: days.checked_mul(MICROS_PER_DAY)?.checked_add(self.time_of_day())?,
		})
	}

	/// Parses `[+-]Y-MM-DD[(T|t| )HH:MM:SS[.ffffff]]`.
	pub fn parse(input: &str) -> Option<Self> {
		let mut cursor = Cursor::new(input);
		let date = parse_date(&mut cursor)?;
		let mut result = Self::from_date(date);
		if cursor.eat_any(b"Tt ") {
			result.ticks += cursor.clock(23)?;
		}
		if !cursor.is_empty() {
			return None;
		}
		Some(result)
	}
}

impl Display for DatetimeLit {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let (year, month, day) = self.date();
		calendar::write_year(f, year)?;
		write!(f, "-{:02}-{:02}T{:02}:{:02}:{:02}", month, day, self.hour(), self.minute(), self.second())?;
		calendar::write_subseconds(f, self.subseconds())
	}
}
