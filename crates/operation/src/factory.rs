// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use stratum_type::{
	GenericValue, Kind, Type, TypeFactory, TypedValue,
	error::diagnostic::operation::{
		unexpected_argument_types, unknown_operation_id, unrecognized_function, wrong_super_type,
	},
	return_error,
};
use tracing::{debug, instrument, trace, warn};

use crate::{
	binary::{ArithmeticBinaryOperation, BinaryOperation, BinaryOperationId, CmathBinaryOperation, ConcatOperation},
	comparison::{Comparison, ComparisonId, PatternCache},
	config::OperationConfig,
	operation::{Operation, OperationId, OperationSuperType},
	signature::OperationSignature,
	unary::{
		ArithmeticUnaryOperation, CastOperation, CmathUnaryOperation, DateExtractOperation, StringUnaryOperation,
		SubstringOperation, UnaryOperation,
	},
};

static INSTANCE: Lazy<OperationFactory> = Lazy::new(|| OperationFactory::with_config(OperationConfig::default()));

/// The outcome of a successful resolution: the operation plus the argument
/// types and static arguments it should be bound with. Both differ from the
/// caller's when static arguments had to be coerced.
#[derive(Debug, Clone)]
pub struct Resolution {
	pub signature: OperationSignature,
	pub operation: Operation,
	pub argument_types: Vec<&'static Type>,
	pub static_arguments: Vec<GenericValue<'static>>,
}

impl Resolution {
	pub fn static_typed_values(&self) -> Vec<TypedValue<'static>> {
		self.static_arguments.iter().map(GenericValue::to_typed_value).collect()
	}
}

/// Registry of every operation, keyed by exact signature and indexed by
/// (name, arity) for overload resolution. Read-only once built.
pub struct OperationFactory {
	config: OperationConfig,
	operations: IndexMap<OperationSignature, Operation>,
	index: HashMap<(String, usize), Vec<OperationSignature>>,
	by_id: HashMap<OperationId, Operation>,
	add: Arc<dyn BinaryOperation>,
	subtract: Arc<dyn BinaryOperation>,
	multiply: Arc<dyn BinaryOperation>,
	divide: Arc<dyn BinaryOperation>,
	cast: Arc<dyn UnaryOperation>,
}

impl OperationFactory {
	/// The process-wide factory built with the default configuration.
	pub fn instance() -> &'static OperationFactory {
		&INSTANCE
	}

	pub fn with_config(config: OperationConfig) -> Self {
		let add: Arc<dyn BinaryOperation> = Arc::new(ArithmeticBinaryOperation::add());
		let subtract: Arc<dyn BinaryOperation> = Arc::new(ArithmeticBinaryOperation::subtract());
		let multiply: Arc<dyn BinaryOperation> = Arc::new(ArithmeticBinaryOperation::multiply());
		let divide: Arc<dyn BinaryOperation> = Arc::new(ArithmeticBinaryOperation::divide());
		let cast: Arc<dyn UnaryOperation> = Arc::new(CastOperation);

		let mut factory = Self {
			config,
			operations: IndexMap::new(),
			index: HashMap::new(),
			by_id: HashMap::new(),
			add: add.clone(),
			subtract: subtract.clone(),
			multiply: multiply.clone(),
			divide: divide.clone(),
			cast: cast.clone(),
		};

		let patterns = Arc::new(PatternCache::new(factory.config.pattern.clone()));
		for id in ComparisonId::ALL {
			let comparison = Comparison::with_pattern_cache(id, patterns.clone(), factory.config.case_sensitive_like);
			factory.register(Operation::Comparison(Arc::new(comparison)));
		}

		factory.register(Operation::Unary(cast));
		factory.register(Operation::Unary(Arc::new(DateExtractOperation)));
		factory.register(Operation::Unary(Arc::new(SubstringOperation)));
		factory.register(Operation::Unary(Arc::new(ArithmeticUnaryOperation::negate())));
		factory.register(Operation::Unary(Arc::new(ArithmeticUnaryOperation::abs())));
		for id in StringUnaryOperation::IDS {
			factory.register(Operation::Unary(Arc::new(StringUnaryOperation::new(id))));
		}
		for id in CmathUnaryOperation::IDS {
			factory.register(Operation::Unary(Arc::new(CmathUnaryOperation::new(id))));
		}

		factory.register(Operation::Binary(add));
		factory.register(Operation::Binary(subtract));
		factory.register(Operation::Binary(multiply));
		factory.register(Operation::Binary(divide));
		factory.register(Operation::Binary(Arc::new(ArithmeticBinaryOperation::modulo())));
		factory.register(Operation::Binary(Arc::new(ConcatOperation)));
		factory.register(Operation::Binary(Arc::new(CmathBinaryOperation::new(BinaryOperationId::Pow))));
		factory.register(Operation::Binary(Arc::new(CmathBinaryOperation::new(BinaryOperationId::Atan2))));

		for signatures in factory.index.values_mut() {
			signatures.sort();
		}

		debug!(
			operations = factory.by_id.len(),
			signatures = factory.operations.len(),
			buckets = factory.index.len(),
			"operation factory initialised"
		);
		factory
	}

	fn register(&mut self, operation: Operation) {
		let id = operation.id();
		if self.by_id.insert(id, operation.clone()).is_some() {
			warn!(?id, "operation registered twice");
		}
		for signature in operation.signatures() {
			let key = (signature.name().to_string(), signature.arity());
			if self.operations.insert(signature.clone(), operation.clone()).is_some() {
				warn!(%signature, "signature registered twice");
				continue;
			}
			self.index.entry(key).or_default().push(signature);
		}
	}

	pub fn config(&self) -> &OperationConfig {
		&self.config
	}

	pub fn add(&self) -> &Arc<dyn BinaryOperation> {
		&self.add
	}

	pub fn subtract(&self) -> &Arc<dyn BinaryOperation> {
		&self.subtract
	}

	pub fn multiply(&self) -> &Arc<dyn BinaryOperation> {
		&self.multiply
	}

	pub fn divide(&self) -> &Arc<dyn BinaryOperation> {
		&self.divide
	}

	pub fn cast(&self) -> &Arc<dyn UnaryOperation> {
		&self.cast
	}

	pub fn has_operation(&self, name: &str, arity: usize) -> bool {
		self.index.contains_key(&(name.to_ascii_lowercase(), arity))
	}

	pub fn has_signature(&self, signature: &OperationSignature) -> bool {
		self.operations.contains_key(signature)
	}

	pub fn get_operation(&self, signature: &OperationSignature) -> Option<&Operation> {
		self.operations.get(signature)
	}

	fn expect_operation(&self, signature: &OperationSignature) -> stratum_type::Result<&Operation> {
		match self.operations.get(signature) {
			Some(operation) => Ok(operation),
			None => return_error!(unrecognized_function(signature.name(), signature.arity())),
		}
	}

	pub fn get_unary_operation(&self, signature: &OperationSignature) -> stratum_type::Result<Arc<dyn UnaryOperation>> {
		let operation = self.expect_operation(signature)?;
		match operation.as_unary() {
			Some(unary) => Ok(unary.clone()),
			None => return_error!(wrong_super_type(
				&signature.to_string(),
				OperationSuperType::Unary.name(),
				operation.super_type().name()
			)),
		}
	}

	pub fn get_binary_operation(
		&self,
		signature: &OperationSignature,
	) -> stratum_type::Result<Arc<dyn BinaryOperation>> {
		let operation = self.expect_operation(signature)?;
		match operation.as_binary() {
			Some(binary) => Ok(binary.clone()),
			None => return_error!(wrong_super_type(
				&signature.to_string(),
				OperationSuperType::Binary.name(),
				operation.super_type().name()
			)),
		}
	}

	pub fn get_comparison(&self, signature: &OperationSignature) -> stratum_type::Result<Arc<Comparison>> {
		let operation = self.expect_operation(signature)?;
		match operation.as_comparison() {
			Some(comparison) => Ok(comparison.clone()),
			None => return_error!(wrong_super_type(
				&signature.to_string(),
				OperationSuperType::Comparison.name(),
				operation.super_type().name()
			)),
		}
	}

	pub fn get_by_id(&self, id: OperationId) -> stratum_type::Result<&Operation> {
		match self.by_id.get(&id) {
			Some(operation) => Ok(operation),
			None => return_error!(unknown_operation_id(id.super_type.name(), id.id)),
		}
	}

	fn exact_signature(name: &str, leading: &[&'static Type], static_arguments: &[GenericValue<'_>]) -> OperationSignature {
		let kinds = leading.iter().map(|ty| ty.kind()).chain(static_arguments.iter().map(|value| value.ty().kind()));
		OperationSignature::new(name, kinds, static_arguments.len())
	}

	/// `false` when no unary operation has exactly this signature or the
	/// operation rejects the argument.
	pub fn can_apply_unary_operation(
		&self,
		name: &str,
		argument: &'static Type,
		static_arguments: &[GenericValue<'_>],
	) -> bool {
		let signature = Self::exact_signature(name, &[argument], static_arguments);
		let Some(unary) = self.get_operation(&signature).and_then(Operation::as_unary) else {
			return false;
		};
		let statics: Vec<_> = static_arguments.iter().map(GenericValue::to_typed_value).collect();
		unary.can_apply_to(argument, &statics).is_ok()
	}

	pub fn can_apply_binary_operation(
		&self,
		name: &str,
		left: &'static Type,
		right: &'static Type,
		static_arguments: &[GenericValue<'_>],
	) -> bool {
		let signature = Self::exact_signature(name, &[left, right], static_arguments);
		let Some(binary) = self.get_operation(&signature).and_then(Operation::as_binary) else {
			return false;
		};
		let statics: Vec<_> = static_arguments.iter().map(GenericValue::to_typed_value).collect();
		binary.can_apply_to(left, right, &statics).is_ok()
	}

	/// Resolves `name` against every argument type, static ones included.
	/// `static_arguments` are the values of the trailing arguments that are
	/// already known.
	#[instrument(
		name = "operation::factory::resolve",
		level = "trace",
		skip(self, argument_types, static_arguments),
		fields(arity = argument_types.len(), statics = static_arguments.len())
	)]
	pub fn resolve(
		&self,
		name: &str,
		argument_types: &[&'static Type],
		static_arguments: &[GenericValue<'_>],
	) -> stratum_type::Result<Resolution> {
		let arity = argument_types.len();
		let kinds: Vec<Kind> = argument_types.iter().map(|ty| ty.kind()).collect();
		let Some(bucket) = self.index.get(&(name.to_ascii_lowercase(), arity)) else {
			return_error!(unrecognized_function(name, arity));
		};
		let supplied = static_arguments.len();
		if supplied > arity {
			return_error!(unexpected_argument_types(name, &kinds));
		}

		let start = bucket.partition_point(|signature| signature.num_static_arguments() > supplied);
		let candidates = &bucket[start..];

		if let Some(signature) = candidates.iter().find(|signature| signature.argument_kinds() == kinds.as_slice()) {
			let statics: Vec<GenericValue<'static>> = static_arguments[supplied - signature.num_static_arguments()..]
				.iter()
				.map(|value| value.clone().into_owned())
				.collect();
			let operation = self.expect_operation(signature)?;
			let typed: Vec<_> = statics.iter().map(GenericValue::to_typed_value).collect();
			operation.can_apply_to(argument_types, &typed)?;
			trace!(%signature, "resolved by exact match");
			return Ok(Resolution {
				signature: signature.clone(),
				operation: operation.clone(),
				argument_types: argument_types.to_vec(),
				static_arguments: statics,
			});
		}

		for signature in prefix_candidates(candidates, &kinds) {
			let non_static = signature.num_non_static_arguments();
			let offset = supplied - signature.num_static_arguments();
			let coerced: Option<Vec<_>> = static_arguments[offset..]
				.iter()
				.zip(&signature.argument_kinds()[non_static..])
				.map(|(value, kind)| coerce_static_argument(value, *kind))
				.collect();
			let Some(coerced) = coerced else {
				continue;
			};
			let mut types = argument_types[..non_static].to_vec();
			types.extend(coerced.iter().map(GenericValue::ty));
			let Some(operation) = self.get_operation(signature) else {
				continue;
			};
			let typed: Vec<_> = coerced.iter().map(GenericValue::to_typed_value).collect();
			if operation.can_apply_to(&types, &typed).is_err() {
				continue;
			}
			trace!(%signature, "resolved by coercing static arguments");
			return Ok(Resolution {
				signature: signature.clone(),
				operation: operation.clone(),
				argument_types: types,
				static_arguments: coerced,
			});
		}

		return_error!(unexpected_argument_types(name, &kinds))
	}

	/// Distinct operations registered under (name, arity).
	fn operations_named(&self, name: &str, arity: usize) -> Vec<&Operation> {
		let mut seen = Vec::new();
		let mut operations = Vec::new();
		let Some(bucket) = self.index.get(&(name.to_ascii_lowercase(), arity)) else {
			return operations;
		};
		for signature in bucket {
			if let Some(operation) = self.operations.get(signature) {
				let id = operation.id();
				if !seen.contains(&id) {
					seen.push(id);
					operations.push(operation);
				}
			}
		}
		operations
	}

	/// The result type every operation under (name, arity) agrees on, given
	/// argument types that may be unknown.
	pub fn result_type_for_partial_argument_types(
		&self,
		name: &str,
		argument_types: &[Option<&'static Type>],
	) -> Option<&'static Type> {
		let mut result: Option<&'static Type> = None;
		for operation in self.operations_named(name, argument_types.len()) {
			let candidate = match operation {
				Operation::Comparison(_) => {
					let nullable = argument_types.iter().any(|ty| ty.is_none_or(|ty| ty.is_nullable()));
					Some(TypeFactory::get(Kind::Bool, nullable))
				}
				Operation::Unary(unary) => unary.result_type_for_partial_argument_type(argument_types[0]),
				Operation::Binary(binary) => {
					binary.result_type_for_partial_argument_types(argument_types[0], argument_types[1])
				}
			}?;
			match result {
				Some(existing) if existing != candidate => return None,
				_ => result = Some(candidate),
			}
		}
		result
	}

	/// `true` if some operation under (name, arity) could produce `result`
	/// from arguments of the known types.
	pub fn partial_type_signature_is_plausible(
		&self,
		name: &str,
		result: Option<&Type>,
		argument_types: &[Option<&Type>],
	) -> bool {
		self.operations_named(name, argument_types.len()).into_iter().any(|operation| match operation {
			Operation::Comparison(comparison) => {
				result.is_none_or(|result| result.kind() == Kind::Bool)
					&& comparison.partial_type_signature_is_plausible(argument_types[0], argument_types[1])
			}
			Operation::Unary(unary) => unary.partial_type_signature_is_plausible(result, argument_types[0]),
			Operation::Binary(binary) => {
				binary.partial_type_signature_is_plausible(result, argument_types[0], argument_types[1])
			}
		})
	}

	/// Per argument position, the type implied by `result_hint` when every
	/// operation under (name, arity) agrees on it.
	pub fn push_down_type_hint(
		&self,
		name: &str,
		arity: usize,
		result_hint: Option<&Type>,
	) -> Vec<Option<&'static Type>> {
		let mut hints: Option<Vec<Option<&'static Type>>> = None;
		for operation in self.operations_named(name, arity) {
			let mut candidate = vec![None; arity];
			match operation {
				Operation::Comparison(_) => {}
				Operation::Unary(unary) => candidate[0] = unary.push_down_type_hint(result_hint),
				Operation::Binary(binary) => {
					let (left, right) = binary.push_down_type_hint(result_hint);
					candidate[0] = left;
					candidate[1] = right;
				}
			}
			hints = Some(match hints {
				None => candidate,
				Some(existing) => {
					existing.into_iter().zip(candidate).map(|(a, b)| if a == b { a } else { None }).collect()
				}
			});
		}
		hints.unwrap_or_else(|| vec![None; arity])
	}
}

/// The run of `candidates` whose non-static kinds equal the caller's, starting
/// at the first such signature and ending where the prefix stops matching.
fn prefix_candidates<'a>(
	candidates: &'a [OperationSignature],
	kinds: &'a [Kind],
) -> impl Iterator<Item = &'a OperationSignature> + 'a {
	let prefix_matches = move |signature: &&OperationSignature| {
		let non_static = signature.num_non_static_arguments();
		signature.argument_kinds()[..non_static] == kinds[..non_static]
	};
	candidates.iter().skip_while(move |signature| !prefix_matches(signature)).take_while(prefix_matches)
}

/// Converts a static argument to `target` when that loses nothing. Strings
/// switch between Char and VarChar with the length derived from the source
/// byte length.
fn coerce_static_argument(value: &GenericValue<'_>, target: Kind) -> Option<GenericValue<'static>> {
	let source = value.ty();
	if source.kind() == target {
		return Some(value.clone().into_owned());
	}
	let nullable = source.is_nullable();
	let target_type = match (source.kind(), target) {
		(Kind::VarChar, Kind::Char) => {
			TypeFactory::try_get_with_length(Kind::Char, source.maximum_byte_length().checked_sub(1)?, nullable).ok()?
		}
		(Kind::Char, Kind::VarChar) => {
			TypeFactory::try_get_with_length(Kind::VarChar, source.maximum_byte_length().checked_add(1)?, nullable).ok()?
		}
		(_, target) => TypeFactory::try_get(target, nullable).ok()?,
	};
	if !target_type.is_safely_coercible_from(source) {
		return None;
	}
	Some(value.coerce(target_type))
}
