//! Expansion of shorthand stack declarations into the nested-map wire
//! format consumed by the CloudFormation stack-creation API.

use crate::ident;
use crate::value::Value;
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{Map as JsonMap, Value as Json};

/// The two authored shapes of a stack declaration, discriminated once at
/// construction time instead of ad hoc during serialization.
#[derive(Debug)]
enum StackDecl<'a> {
    /// `[url extra-options]` — a remote template reference.
    Url { url: &'a str, extra: Option<&'a Value> },
    /// Anything else: inline provisioning options. A declaration that is
    /// not even a map still takes this path; the permissive fall-through is
    /// deliberate and the malformed shape propagates to the output.
    Inline(&'a Value),
}

impl<'a> StackDecl<'a> {
    fn classify(declaration: &'a Value) -> Self {
        if let Some(items) = declaration.as_seq() {
            if let Some(Value::String(url)) = items.first() {
                return StackDecl::Url { url, extra: items.get(1) };
            }
        }
        StackDecl::Inline(declaration)
    }
}

/// The two authored shapes of a resource declaration.
#[derive(Debug)]
enum Resource<'a> {
    /// `[Service.Module {props}]` tuple shorthand.
    Tuple { type_key: &'a str, properties: Option<&'a Value> },
    /// Already in `{Type, Properties}` form (or malformed; either way it
    /// passes through unchanged).
    Explicit(&'a Value),
}

impl<'a> Resource<'a> {
    fn classify(declaration: &'a Value) -> Self {
        if let Some(items) = declaration.as_seq() {
            if let Some(Value::Symbol(type_key)) = items.first() {
                return Resource::Tuple { type_key, properties: items.get(1) };
            }
        }
        Resource::Explicit(declaration)
    }
}

/// Expands every stack declaration in `config` into its wire format. The
/// input is not mutated; the result is a fresh ordered mapping keyed by the
/// original stack keys.
pub fn serialize(config: &IndexMap<String, Value>) -> JsonMap<String, Json> {
    let mut out = JsonMap::new();
    for (key, declaration) in config {
        out.insert(key.clone(), serialize_stack(key, declaration));
    }
    out
}

fn serialize_stack(key: &str, declaration: &Value) -> Json {
    let mut stack = JsonMap::new();
    stack.insert("StackName".to_string(), Json::String(key.to_string()));
    match StackDecl::classify(declaration) {
        StackDecl::Url { url, extra } => {
            stack.insert("TemplateURL".to_string(), Json::String(url.to_string()));
            // Extra options merge on top and may override StackName or
            // TemplateURL, last write wins.
            match extra {
                Some(Value::Map(extra)) => {
                    for (option, value) in extra {
                        stack.insert(option.clone(), value.clone().into_json());
                    }
                }
                Some(other) => {
                    debug!("stack '{key}' url-form extra options are not a map, dropping {other:?}");
                }
                None => {}
            }
        }
        StackDecl::Inline(options) => {
            if options.as_map().is_none() {
                warn!("stack '{key}' declaration is neither url form nor an options map");
            }
            stack.insert("TemplateBody".to_string(), template_body(options));
        }
    }
    Json::Object(stack)
}

fn template_body(options: &Value) -> Json {
    let Some(options) = options.as_map() else {
        return options.clone().into_json();
    };
    let mut body = JsonMap::new();
    for (option, value) in options {
        let expanded = if option == "Resources" {
            expand_resources(value)
        } else {
            value.clone().into_json()
        };
        body.insert(option.clone(), expanded);
    }
    Json::Object(body)
}

fn expand_resources(resources: &Value) -> Json {
    let Some(resources) = resources.as_map() else {
        return resources.clone().into_json();
    };
    let mut out = JsonMap::new();
    for (key, declaration) in resources {
        out.insert(key.clone(), expand_resource(declaration));
    }
    Json::Object(out)
}

fn expand_resource(declaration: &Value) -> Json {
    match Resource::classify(declaration) {
        Resource::Tuple { type_key, properties } => {
            let mut resource = JsonMap::new();
            resource.insert("Type".to_string(), Json::String(ident::resource_type(type_key)));
            let properties = match properties {
                Some(properties) => properties.clone().into_json(),
                None => Json::Object(JsonMap::new()),
            };
            resource.insert("Properties".to_string(), properties);
            Json::Object(resource)
        }
        Resource::Explicit(value) => value.clone().into_json(),
    }
}
