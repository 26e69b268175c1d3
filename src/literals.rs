//! Tagged-literal resolvers for configuration parsing.
//!
//! [`registry`] builds the resolver table for one read invocation; every
//! resolver closes over that call's `(environment, parameters)` context, so
//! nothing is registered process-wide and nothing leaks between calls.

use crate::error::{Error, Result};
use crate::ident;
use crate::reader::LiteralTable;
use crate::value::Value;
use indexmap::IndexMap;

/// The shorthand type key injected for derived parameter-store resources.
pub const SSM_PARAMETER_KEY: &str = "SSM.Parameter";

/// Builds the literal table for a single read call.
///
/// Supported literals:
/// - `#eid key` — the key qualified with the environment, `Database-prod`.
/// - `#kvp {k v ...}` — a vector of `{ParameterKey, ParameterValue}`
///   records in the input's entry order.
/// - `#ref key` — `{Ref: key}`.
/// - `#sub key` — the value bound to `key` in `parameters`, or `nil` when
///   the key is absent.
/// - `#with-ssm-params {k decl ...}` — the map itself plus, per entry, a
///   derived `<k>Param` SSM parameter resource in tuple shorthand.
pub fn registry(environment: &str, parameters: &IndexMap<String, Value>) -> LiteralTable {
    let mut table = LiteralTable::new();

    let env = environment.to_string();
    table.insert(
        "eid".to_string(),
        Box::new(move |arg: Value| -> Result<Value> {
            let key = name_of(&arg, "eid")?;
            Ok(Value::String(ident::eid(key, &env)))
        }),
    );

    table.insert(
        "kvp".to_string(),
        Box::new(|arg: Value| -> Result<Value> {
            let entries = arg
                .into_map()
                .ok_or_else(|| Error::literal_arg("kvp", "a map of parameter values"))?;
            let records = entries
                .into_iter()
                .map(|(key, value)| {
                    let mut record = IndexMap::new();
                    record.insert("ParameterKey".to_string(), Value::String(key));
                    record.insert("ParameterValue".to_string(), value);
                    Value::Map(record)
                })
                .collect();
            Ok(Value::Seq(records))
        }),
    );

    table.insert(
        "ref".to_string(),
        Box::new(|arg: Value| -> Result<Value> {
            let key = name_of(&arg, "ref")?;
            Ok(reference(key))
        }),
    );

    let params = parameters.clone();
    table.insert(
        "sub".to_string(),
        Box::new(move |arg: Value| -> Result<Value> {
            let key = name_of(&arg, "sub")?;
            // Absent keys resolve to nil rather than failing.
            Ok(params.get(key).cloned().unwrap_or(Value::Nil))
        }),
    );

    table.insert(
        "with-ssm-params".to_string(),
        Box::new(|arg: Value| -> Result<Value> {
            let resources = arg
                .into_map()
                .ok_or_else(|| Error::literal_arg("with-ssm-params", "a map of resources"))?;
            Ok(Value::Map(with_ssm_params(resources)))
        }),
    );

    table
}

/// Appends one `<key>Param` SSM parameter declaration per existing entry.
/// Original entries are preserved unchanged and keep their positions.
fn with_ssm_params(resources: IndexMap<String, Value>) -> IndexMap<String, Value> {
    let mut out = resources.clone();
    for key in resources.keys() {
        let mut properties = IndexMap::new();
        properties.insert("Name".to_string(), Value::String(key.clone()));
        properties.insert("Value".to_string(), reference(key));
        properties.insert("Type".to_string(), Value::String("String".to_string()));
        out.insert(
            format!("{key}Param"),
            Value::Seq(vec![
                Value::Symbol(SSM_PARAMETER_KEY.to_string()),
                Value::Map(properties),
            ]),
        );
    }
    out
}

fn reference(key: &str) -> Value {
    let mut record = IndexMap::new();
    record.insert("Ref".to_string(), Value::String(key.to_string()));
    Value::Map(record)
}

fn name_of<'v>(arg: &'v Value, literal: &str) -> Result<&'v str> {
    arg.name().ok_or_else(|| Error::literal_arg(literal, "a symbol, keyword or string key"))
}
