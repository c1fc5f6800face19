// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod container;
pub mod error;
pub mod generic;
pub mod kind;
pub mod r#type;
pub mod util;
pub mod value;

pub use container::{
	ColumnVector, ColumnVectorsValueAccessor, IndirectColumnVector, NativeColumnVector, TupleIdSequence,
	ValueAccessor,
};
pub use error::{Error, diagnostic::Diagnostic};
pub use generic::GenericValue;
pub use kind::{Kind, SuperType};
pub use r#type::{SerializedType, Type, TypeFactory};
pub use value::{
	DateLit, DatetimeIntervalLit, DatetimeLit, NativeLiteral, OutOfLine, SerializedValue, TypedValue,
	YearMonthIntervalLit,
};

pub type Result<T> = std::result::Result<T, Error>;
