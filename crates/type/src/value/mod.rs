// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub(crate) mod calendar;
mod date;
mod datetime;
mod interval;
mod native;
mod typed;

pub use date::DateLit;
pub use datetime::DatetimeLit;
pub use interval::{DatetimeIntervalLit, YearMonthIntervalLit};
pub use native::NativeLiteral;
pub use typed::{OutOfLine, SerializedValue, TypedValue};
