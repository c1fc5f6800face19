// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod binary;
pub mod comparison;
pub mod config;
pub mod factory;
pub mod native;
pub mod operation;
pub mod signature;
mod table;
pub mod unary;

pub use binary::{BinaryOperation, BinaryOperationId, UncheckedBinaryOperator};
pub use comparison::{Comparison, ComparisonId, PatternCache, UncheckedComparator};
pub use config::{OperationConfig, PatternConfig};
pub use factory::{OperationFactory, Resolution};
pub use operation::{Operation, OperationId, OperationSuperType};
pub use signature::{OperationSignature, SerializedSignature};
pub use unary::{UnaryOperation, UnaryOperationId, UncheckedUnaryOperator};
