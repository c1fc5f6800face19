// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::calendar::{self, Cursor, MAX_YEAR};

const DAY_BITS: u32 = 5;
const MONTH_BITS: u32 = 4;

/// A calendar date (year, month, day) without time information.
///
/// Packed as `(year + 99999) << 9 | month << 5 | day`, so the packed integer
/// orders the same way as the date.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateLit {
	year_month_day: u32,
}

impl Default for DateLit {
	fn default() -> Self {
		Self::from_ymd_unchecked(1970, 1, 1)
	}
}

impl DateLit {
	pub const MAX_YEAR: i64 = MAX_YEAR;

	/// `-99999-01-01`
	pub const MIN: DateLit = DateLit {
		year_month_day: (1 << DAY_BITS) | 1,
	};

	/// `+99999-12-31`
	pub const MAX: DateLit = DateLit {
		year_month_day: (((2 * MAX_YEAR) as u32) << (DAY_BITS + MONTH_BITS)) | (12 << DAY_BITS) | 31,
	};

	pub fn new(year: i64, month: u32, day: u32) -> Option<Self> {
		if !calendar::is_valid_ymd(year, month, day) {
			return None;
		}
		Some(Self::from_ymd_unchecked(year, month, day))
	}

	fn from_ymd_unchecked(year: i64, month: u32, day: u32) -> Self {
		Self {
			year_month_day: (((year + MAX_YEAR) as u32) << (DAY_BITS + MONTH_BITS)) | (month << DAY_BITS) | day,
		}
	}

	pub fn year(&self) -> i64 {
		(self.year_month_day >> (DAY_BITS + MONTH_BITS)) as i64 - MAX_YEAR
	}

	pub fn month(&self) -> u32 {
		(self.year_month_day >> DAY_BITS) & ((1 << MONTH_BITS) - 1)
	}

	pub fn day(&self) -> u32 {
		self.year_month_day & ((1 << DAY_BITS) - 1)
	}

	pub fn to_packed(&self) -> u32 {
		self.year_month_day
	}

	pub fn from_packed(year_month_day: u32) -> Self {
		Self {
			year_month_day,
		}
	}

	pub fn to_days_since_epoch(&self) -> i64 {
		calendar::days_from_civil(self.year(), self.month(), self.day())
	}

	pub fn from_days_since_epoch(days: i64) -> Option<Self> {
		let (year, month, day) = calendar::civil_from_days(days);
		Self::new(year, month, day)
	}

	/// Returns `None` when the result leaves the representable year range.
	pub fn add_months(&self, months: i64) -> Option<Self> {
		let (year, month, day) = calendar::add_months(self.year(), self.month(), self.day(), months)?;
		Self::new(year, month, day)
	}

	/// Parses `[+-]Y-MM-DD`.
	pub fn parse(input: &str) -> Option<Self> {
		let mut cursor = Cursor::new(input);
		let date = parse_date(&mut cursor)?;
		if !cursor.is_empty() {
			return None;
		}
		Some(date)
	}
}

pub(crate) fn parse_date(cursor: &mut Cursor<'_>) -> Option<DateLit> {
	let sign = cursor.sign();
	let (year, _) = cursor.digits(1, 6)?;
	if !cursor.eat(b'-') {
		return None;
	}
	let (month, _) = cursor.digits(1, 2)?;
	if !cursor.eat(b'-') {
		return None;
	}
	let (day, _) = cursor.digits(1, 2)?;
	DateLit::new(sign * year, month as u32, day as u32)
}

impl Display for DateLit {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		calendar::write_year(f, self.year())?;
		write!(f, "-{:02}-{:02}", self.month(), self.day())
	}
}
