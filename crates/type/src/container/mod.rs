// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod accessor;
mod column;
mod tuple;

pub use accessor::{ColumnVectorsValueAccessor, ValueAccessor};
pub use column::{ColumnVector, IndirectColumnVector, NativeColumnVector};
pub use tuple::TupleIdSequence;
