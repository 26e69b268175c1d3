//! Reads shorthand configuration text into the provisioning wire format.

use crate::error::{Error, Result};
use crate::literals;
use crate::reader::Reader;
use crate::serializer;
use crate::value::Value;
use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as Json};

/// Parses `text` with the literal table built for `(environment,
/// parameters)` and expands the result into serialized stacks, keyed by
/// stack name.
///
/// Literals are resolved inline while parsing; the table lives only for
/// this call. Parse failures propagate unchanged.
pub fn read(
    text: &str,
    environment: &str,
    parameters: &IndexMap<String, Value>,
) -> Result<JsonMap<String, Json>> {
    let literals = literals::registry(environment, parameters);
    let parsed = Reader::new(&literals).read(text)?;
    let stacks = parsed.into_map().ok_or(Error::ConfigShape)?;
    Ok(serializer::serialize(&stacks))
}
