//! Attribute schemas for resources and data sources
//!
//! A [`Schema`] describes the configuration object the host exchanges with a
//! resource: top-level attributes plus single nested blocks. The host uses it
//! for planning; [`Schema::validate`] checks a configuration object before any
//! remote call is made.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::diag::{Diagnostic, Diagnostics};
use crate::json::JsonProvider;

/// Value type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Bool,
    Set(Box<AttributeType>),
    List(Box<AttributeType>),
    Object(BTreeMap<String, AttributeType>),
}

impl AttributeType {
    pub fn string_set() -> Self {
        Self::Set(Box::new(Self::String))
    }

    fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_)) | (Self::Bool, Value::Bool(_)) => true,
            (Self::Set(element) | Self::List(element), Value::Array(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (Self::Object(fields), Value::Object(map)) => map.iter().all(|(key, item)| {
                fields
                    .get(key)
                    .is_some_and(|ty| item.is_null() || ty.accepts(item))
            }),
            _ => false,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Set(_) => "set",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}

/// Validation applied to string attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringValidator {
    /// The value must be a valid JSON document.
    Json,
    /// The value must be one of the listed strings.
    OneOf(Vec<&'static str>),
}

impl StringValidator {
    fn validate(&self, path: &str, value: &str) -> Option<Diagnostic> {
        match self {
            Self::Json => JsonProvider::parse_to_value(value).err().map(|err| {
                Diagnostic::error(
                    "Invalid JSON String Value",
                    format!(
                        "A string value was provided that is not valid JSON string format (RFC 7159).\n\nGiven Value: {value}\nError: {err}"
                    ),
                )
                .with_attribute(path)
            }),
            Self::OneOf(allowed) => {
                if allowed.iter().any(|a| *a == value) {
                    return None;
                }
                let quoted: Vec<String> = allowed.iter().map(|a| format!("{a:?}")).collect();
                Some(
                    Diagnostic::error(
                        "Invalid Attribute Value Match",
                        format!(
                            "Attribute {path} value must be one of: [{}], got: {value:?}",
                            quoted.join(" ")
                        ),
                    )
                    .with_attribute(path),
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub ty: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub validators: Vec<StringValidator>,
    /// A changed value cannot be applied in place.
    pub requires_replace: bool,
    pub description: Option<String>,
}

impl Attribute {
    fn new(ty: AttributeType, required: bool, optional: bool, computed: bool) -> Self {
        Self {
            ty,
            required,
            optional,
            computed,
            validators: Vec::new(),
            requires_replace: false,
            description: None,
        }
    }

    pub fn required(ty: AttributeType) -> Self {
        Self::new(ty, true, false, false)
    }

    pub fn optional(ty: AttributeType) -> Self {
        Self::new(ty, false, true, false)
    }

    pub fn computed(ty: AttributeType) -> Self {
        Self::new(ty, false, false, true)
    }

    pub fn required_string() -> Self {
        Self::required(AttributeType::String)
    }

    /// The `id` attribute every resource carries: computed, and kept from the
    /// prior state when planning updates.
    pub fn id() -> Self {
        Self::computed(AttributeType::String)
            .with_description("Identifier of the resource, assigned by the service.")
    }

    #[must_use]
    pub fn with_validator(mut self, validator: StringValidator) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    fn validate(&self, path: &str, value: Option<&Value>, diags: &mut Diagnostics) {
        let value = match value {
            Some(value) if !value.is_null() => value,
            _ => {
                if self.required {
                    diags.push(
                        Diagnostic::error(
                            "Missing Configuration for Required Attribute",
                            format!("Must set a configuration value for the {path} attribute as the provider has marked it as required."),
                        )
                        .with_attribute(path),
                    );
                }
                return;
            }
        };

        if self.is_read_only() {
            diags.push(
                Diagnostic::error(
                    "Invalid Configuration for Read-Only Attribute",
                    format!("Cannot set value for the {path} attribute as the provider has marked it as read-only."),
                )
                .with_attribute(path),
            );
            return;
        }

        if !self.ty.accepts(value) {
            diags.push(
                Diagnostic::error(
                    "Incorrect Attribute Value Type",
                    format!("Attribute {path} expects a {} value.", self.ty.name()),
                )
                .with_attribute(path),
            );
            return;
        }

        if let Value::String(s) = value {
            for validator in &self.validators {
                if let Some(diagnostic) = validator.validate(path, s) {
                    diags.push(diagnostic);
                }
            }
        }
    }
}

/// A block holding exactly one nested object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleNestedBlock {
    pub attributes: BTreeMap<String, Attribute>,
    /// Equivalent of an object `IsRequired` validator.
    pub required: bool,
    pub description: Option<String>,
}

impl SingleNestedBlock {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    #[must_use]
    pub fn is_required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Object type equivalent, used when the block is flattened into state.
    pub fn object_type(&self) -> AttributeType {
        AttributeType::Object(
            self.attributes
                .iter()
                .map(|(name, attribute)| (name.clone(), attribute.ty.clone()))
                .collect(),
        )
    }

    fn validate(&self, path: &str, value: Option<&Value>, diags: &mut Diagnostics) {
        let object = match value {
            Some(Value::Object(object)) => object,
            Some(Value::Null) | None => {
                if self.required {
                    diags.push(
                        Diagnostic::error(
                            "Missing Configuration for Required Block",
                            format!("Must set a configuration value for the {path} block."),
                        )
                        .with_attribute(path),
                    );
                }
                return;
            }
            Some(_) => {
                diags.push(
                    Diagnostic::error(
                        "Incorrect Block Value Type",
                        format!("Block {path} expects an object value."),
                    )
                    .with_attribute(path),
                );
                return;
            }
        };

        validate_attributes(path, &self.attributes, &BTreeMap::new(), object, diags);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub description: Option<String>,
    pub attributes: BTreeMap<String, Attribute>,
    pub blocks: BTreeMap<String, SingleNestedBlock>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    #[must_use]
    pub fn with_block(mut self, name: &str, block: SingleNestedBlock) -> Self {
        self.blocks.insert(name.to_string(), block);
        self
    }

    /// Check a configuration object against this schema.
    pub fn validate(&self, config: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();

        match config {
            Value::Object(object) => {
                validate_attributes("", &self.attributes, &self.blocks, object, &mut diags);
            }
            _ => diags.add_error(
                "Invalid Configuration",
                "The configuration must be an object.",
            ),
        }

        diags
    }

    /// Top-level attributes marked [`Attribute::requires_replace`] whose
    /// planned value differs from the prior state.
    pub fn replaced_attributes<'a>(&'a self, state: &Value, plan: &Value) -> Vec<&'a str> {
        self.attributes
            .iter()
            .filter(|(name, attribute)| {
                attribute.requires_replace && state.get(name.as_str()) != plan.get(name.as_str())
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Error diagnostics for every attribute [`Schema::replaced_attributes`]
    /// reports. Resources return these from `update` instead of applying the
    /// change in place.
    pub fn check_in_place_update(&self, state: &Value, plan: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for name in self.replaced_attributes(state, plan) {
            diags.push(
                Diagnostic::error(
                    "Attribute Requires Replacement",
                    format!("Changing the {name} attribute requires replacing the resource and cannot be applied as an update."),
                )
                .with_attribute(name),
            );
        }
        diags
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn validate_attributes(
    prefix: &str,
    attributes: &BTreeMap<String, Attribute>,
    blocks: &BTreeMap<String, SingleNestedBlock>,
    object: &Map<String, Value>,
    diags: &mut Diagnostics,
) {
    for (name, attribute) in attributes {
        attribute.validate(&join_path(prefix, name), object.get(name), diags);
    }

    for (name, block) in blocks {
        block.validate(&join_path(prefix, name), object.get(name), diags);
    }

    for key in object.keys() {
        if !attributes.contains_key(key) && !blocks.contains_key(key) {
            let path = join_path(prefix, key);
            diags.push(
                Diagnostic::error(
                    "Unsupported Argument",
                    format!("An argument named {key:?} is not expected here."),
                )
                .with_attribute(path),
            );
        }
    }
}
