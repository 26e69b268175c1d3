//! Extraction of SSM parameter names from serialized configurations.

use serde_json::{Map as JsonMap, Value as Json};

/// The wire-format resource type of an SSM parameter-store entry.
pub const SSM_PARAMETER_TYPE: &str = "AWS::SSM::Parameter";

/// Collects `Properties.Name` of every SSM parameter resource in a
/// serialized configuration, in per-stack then per-resource order. Stacks
/// without an inline template body contribute nothing.
pub fn parameter_names(config: &JsonMap<String, Json>) -> Vec<String> {
    let mut names = Vec::new();
    for stack in config.values() {
        let Some(resources) = stack
            .get("TemplateBody")
            .and_then(|body| body.get("Resources"))
            .and_then(Json::as_object)
        else {
            continue;
        };
        for resource in resources.values() {
            if resource.get("Type").and_then(Json::as_str) != Some(SSM_PARAMETER_TYPE) {
                continue;
            }
            if let Some(name) = resource
                .get("Properties")
                .and_then(|properties| properties.get("Name"))
                .and_then(Json::as_str)
            {
                names.push(name.to_string());
            }
        }
    }
    names
}
