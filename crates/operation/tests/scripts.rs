// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{error::Error, path::Path};

use stratum_operation::{Operation, OperationFactory, Resolution};
use stratum_testing::testscript::{self, Command};
use stratum_type::{ColumnVector, GenericValue, Kind, Type, TypeFactory, TypedValue};
use test_each_file::test_each_path;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Renders a diagnostic as `CODE: message` so scripts stay on one line.
fn diagnostic(err: stratum_type::Error) -> Box<dyn Error> {
	format!("{}: {}", err.code(), err.message).into()
}

/// `Int?` is shorthand for `Int NULL`.
fn parse_type(name: &str) -> Result<&'static Type> {
	let name = match name.strip_suffix('?') {
		Some(base) => format!("{} NULL", base),
		None => name.to_string(),
	};
	TypeFactory::parse_type_name(&name).ok_or_else(|| format!("unknown type {}", name).into())
}

/// `TYPE=VALUE`, where VALUE may be `NULL` for nullable types.
fn parse_value(token: &str) -> Result<(&'static Type, TypedValue<'static>)> {
	let (ty, value) = token.split_once('=').ok_or_else(|| format!("expected TYPE=VALUE, got {}", token))?;
	let ty = parse_type(ty)?;
	if value == "NULL" {
		if !ty.is_nullable() {
			return Err(format!("{} is not nullable", ty).into());
		}
		return Ok((ty, TypedValue::Null(ty.kind())));
	}
	let value = ty.parse_value_from_string(value).ok_or_else(|| format!("cannot parse {} as {}", value, ty))?;
	Ok((ty, value))
}

/// Splits the arguments after the operation name at `;`, which introduces
/// the static arguments.
fn split_static<'a>(command: &'a Command) -> (Vec<&'a str>, Vec<&'a str>) {
	let values: Vec<&str> = command.values().skip(1).collect();
	match values.iter().position(|value| *value == ";") {
		Some(split) => (values[..split].to_vec(), values[split + 1..].to_vec()),
		None => (values, Vec::new()),
	}
}

struct OperationRunner {
	factory: &'static OperationFactory,
}

impl OperationRunner {
	fn new() -> Self {
		stratum_testing::tracing::init();
		Self {
			factory: OperationFactory::instance(),
		}
	}

	fn name(command: &Command) -> Result<&str> {
		command.arg(0).ok_or_else(|| format!("{} needs an operation name", command.name).into())
	}

	fn resolve_values(
		&self,
		name: &str,
		values: &[(&'static Type, TypedValue<'static>)],
		statics: &[(&'static Type, TypedValue<'static>)],
	) -> Result<Resolution> {
		let mut types: Vec<&'static Type> = values.iter().map(|(ty, _)| *ty).collect();
		types.extend(statics.iter().map(|(ty, _)| *ty));
		let statics: Vec<_> = statics.iter().map(|(ty, value)| GenericValue::from_typed_value(ty, value)).collect();
		self.factory.resolve(name, &types, &statics).map_err(diagnostic)
	}

	fn result_type(resolution: &Resolution) -> Option<&'static Type> {
		let types = &resolution.argument_types;
		let statics = resolution.static_typed_values();
		match &resolution.operation {
			Operation::Comparison(_) => {
				Some(TypeFactory::get(Kind::Bool, types[0].is_nullable() || types[1].is_nullable()))
			}
			Operation::Unary(unary) => unary.result_type(types[0], &statics),
			Operation::Binary(binary) => binary.result_type(types[0], types[1], &statics),
		}
	}

	fn resolve(&self, command: &Command) -> Result<String> {
		let name = Self::name(command)?;
		let (leading, statics) = split_static(command);
		let mut types = leading.iter().map(|name| parse_type(name)).collect::<Result<Vec<_>>>()?;
		let statics = statics.iter().map(|token| parse_value(token)).collect::<Result<Vec<_>>>()?;
		types.extend(statics.iter().map(|(ty, _)| *ty));
		let generic: Vec<_> = statics.iter().map(|(ty, value)| GenericValue::from_typed_value(ty, value)).collect();
		let resolution = self.factory.resolve(name, &types, &generic).map_err(diagnostic)?;

		let result = Self::result_type(&resolution).map(|ty| ty.name()).unwrap_or_else(|| "?".to_string());
		let mut output = format!("{} -> {}\n", resolution.signature, result);
		if resolution.argument_types != types {
			let coerced = resolution.argument_types.iter().map(|ty| ty.name()).collect::<Vec<_>>().join(", ");
			output.push_str(&format!("coerced ({})\n", coerced));
		}
		Ok(output)
	}

	/// Applies through the scalar path and checks the column path agrees.
	fn apply(&self, command: &Command) -> Result<String> {
		let name = Self::name(command)?;
		let (leading, statics) = split_static(command);
		let values = leading.iter().map(|token| parse_value(token)).collect::<Result<Vec<_>>>()?;
		let statics = statics.iter().map(|token| parse_value(token)).collect::<Result<Vec<_>>>()?;
		let resolution = self.resolve_values(name, &values, &statics)?;
		let types = &resolution.argument_types;
		let static_values = resolution.static_typed_values();

		let (scalar, column) = match &resolution.operation {
			Operation::Comparison(comparison) => {
				let comparator = comparison.make_unchecked_comparator(types[0], types[1]).map_err(diagnostic)?;
				let scalar = comparator.compare_typed_values(&values[0].1, &values[1].1);
				let left = ColumnVector::from_values(types[0], [values[0].1.clone()]);
				let right = ColumnVector::from_values(types[1], [values[1].1.clone()]);
				let column = comparator.compare_column_vectors(&left, &right, None).num_tuples() == 1;
				(scalar.to_string(), column.to_string())
			}
			Operation::Unary(unary) => {
				let operator = unary.make_unchecked_unary_operator(types[0], &static_values).map_err(diagnostic)?;
				let scalar = operator.apply_to_typed_value(&values[0].1);
				let argument = ColumnVector::from_values(types[0], [values[0].1.clone()]);
				let column = operator.apply_to_column_vector(&argument);
				(scalar.to_string(), column.get_typed_value(0).to_string())
			}
			Operation::Binary(binary) => {
				let operator = binary.make_unchecked_binary_operator(types[0], types[1], &static_values).map_err(diagnostic)?;
				let scalar = operator.apply_to_typed_values(&values[0].1, &values[1].1);
				let left = ColumnVector::from_values(types[0], [values[0].1.clone()]);
				let right = ColumnVector::from_values(types[1], [values[1].1.clone()]);
				let column = operator.apply_to_column_vectors(&left, &right);
				(scalar.to_string(), column.get_typed_value(0).to_string())
			}
		};
		if scalar != column {
			return Err(format!("scalar result {} differs from column result {}", scalar, column).into());
		}
		Ok(scalar)
	}

	fn compare(&self, command: &Command) -> Result<String> {
		let name = Self::name(command)?;
		let values = command.values().skip(1).map(parse_value).collect::<Result<Vec<_>>>()?;
		if values.len() != 2 {
			return Err("compare takes two values".into());
		}
		let resolution = self.resolve_values(name, &values, &[])?;
		let Operation::Comparison(comparison) = &resolution.operation else {
			return Err(format!("{} is not a comparison", name).into());
		};
		let result = comparison.compare_checked(&values[0].1, values[0].0, &values[1].1, values[1].0).map_err(diagnostic)?;
		Ok(result.to_string())
	}

	fn parse(&self, command: &Command) -> Result<String> {
		let ty = parse_type(command.arg(0).ok_or("parse needs a type")?)?;
		let input = command.arg(1).ok_or("parse needs an input")?;
		let value = ty.parse_value_from_string(input).ok_or_else(|| format!("cannot parse {} as {}", input, ty))?;
		Ok(ty.print_value_to_string(&value))
	}

	fn coerce(&self, command: &Command) -> Result<String> {
		let target = parse_type(command.arg(0).ok_or("coerce needs a target type")?)?;
		let (source, value) = parse_value(command.arg(1).ok_or("coerce needs a value")?)?;
		if !target.is_coercible_from(source) {
			return Err(format!("{} is not coercible from {}", target, source).into());
		}
		let safety = if target.is_safely_coercible_from(source) { "safe" } else { "lossy" };
		Ok(format!("{} ({})", target.coerce_value(&value, source), safety))
	}
}

impl testscript::Runner for OperationRunner {
	fn run(&mut self, command: &Command) -> Result<String> {
		match command.name.as_str() {
			"resolve" => self.resolve(command),
			"apply" => self.apply(command),
			"compare" => self.compare(command),
			"parse" => self.parse(command),
			"coerce" => self.coerce(command),
			name => Err(format!("invalid command {}", name).into()),
		}
	}
}

test_each_path! { in "crates/operation/tests/scripts" as operation => test_script }

fn test_script(path: &Path) {
	testscript::run_path(&mut OperationRunner::new(), path).expect("test failed")
}
