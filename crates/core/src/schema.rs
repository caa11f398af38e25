//! Statically declared argument schemas.
//!
//! A [`Schema`] is an explicit list of field descriptors interpreted by
//! a generic validation routine. Tools declare their accepted arguments
//! once, at construction time, and the same declaration drives both
//! validation of model-produced argument records and the JSON Schema
//! representation exported for discovery.

mod validate;

use serde_json::{Map, Value};

pub use validate::Violation;

/// The semantic type of a schema field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A plain string.
    String,
    /// A string restricted to a set of literal values.
    StringEnum {
        /// The accepted literal values.
        allowed: Vec<String>,
    },
    /// A JSON number.
    Number,
    /// A boolean.
    Boolean,
    /// An array of strings, optionally bounded in length.
    StringArray {
        /// The maximum number of items, if bounded.
        max_items: Option<usize>,
    },
}

impl FieldKind {
    /// The name of the expected type, as used in violation messages.
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::StringEnum { .. } => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::StringArray { .. } => "array of strings",
        }
    }
}

/// Describes one accepted argument field.
///
/// Fields are required unless they are marked [`optional`] or carry a
/// [`default`], in which case the caller may omit them.
///
/// [`optional`]: FieldSpec::optional
/// [`default`]: FieldSpec::with_default
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    description: Option<String>,
    default: Option<Value>,
    required: bool,
}

impl FieldSpec {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            description: None,
            default: None,
            required: true,
        }
    }

    /// Creates a plain string field.
    #[inline]
    pub fn string(name: &str) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Creates a string field restricted to the given literal values.
    #[inline]
    pub fn string_enum<I, S>(name: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        Self::new(name, FieldKind::StringEnum { allowed })
    }

    /// Creates a number field.
    #[inline]
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Creates a boolean field.
    #[inline]
    pub fn boolean(name: &str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Creates an unbounded string-array field.
    #[inline]
    pub fn string_array(name: &str) -> Self {
        Self::new(name, FieldKind::StringArray { max_items: None })
    }

    /// Bounds a string-array field to at most `max` items.
    ///
    /// # Panics
    ///
    /// Panics if the field is not a string array.
    pub fn max_items(mut self, max: usize) -> Self {
        match &mut self.kind {
            FieldKind::StringArray { max_items } => *max_items = Some(max),
            _ => panic!("`max_items` only applies to string arrays"),
        }
        self
    }

    /// Attaches a description for orchestrators and models to read.
    pub fn describe<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares a default value, taken when the field is absent.
    ///
    /// A field with a default never has to be provided by the caller.
    ///
    /// # Panics
    ///
    /// Panics if the value does not conform to the field's kind.
    pub fn with_default<V: Into<Value>>(mut self, value: V) -> Self {
        let value = value.into();
        assert!(
            validate::check_value(&self, &value).is_none(),
            "default for `{}` does not match its declared kind",
            self.name,
        );
        self.default = Some(value);
        self
    }

    /// Marks the field as optional.
    ///
    /// An absent optional field without a default stays absent in the
    /// validated record; it is never null-filled.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Returns the name of the field.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of the field.
    #[inline]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns the description of the field, if any.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the declared default value, if any.
    #[inline]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the field must be present when it has no default.
    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// An argument schema: a list of field descriptors plus the strict flag.
///
/// A schema is immutable once the descriptor holding it is registered;
/// all of its methods take `&self`.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    strict: bool,
}

impl Schema {
    /// Creates a schema that lets undeclared fields pass through.
    #[inline]
    pub fn new() -> Self {
        Self {
            fields: vec![],
            strict: false,
        }
    }

    /// Creates a schema that rejects undeclared fields.
    #[inline]
    pub fn strict() -> Self {
        Self {
            fields: vec![],
            strict: true,
        }
    }

    /// Adds a field descriptor.
    ///
    /// # Panics
    ///
    /// Panics if a field with the same name is already declared.
    pub fn field(mut self, field: FieldSpec) -> Self {
        assert!(
            self.fields.iter().all(|f| f.name != field.name),
            "duplicate field `{}`",
            field.name,
        );
        self.fields.push(field);
        self
    }

    /// Returns the declared fields, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Whether undeclared fields are rejected.
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Exports the schema as a [JSON Schema](https://json-schema.org/)
    /// object, the representation LLM providers accept for function
    /// calling declarations.
    ///
    /// Fields with a default are not listed as `required`, and their
    /// default appears on the property. Strict schemas set
    /// `additionalProperties` to `false`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut prop = Map::new();
            match &field.kind {
                FieldKind::String => {
                    prop.insert("type".to_owned(), Value::from("string"));
                }
                FieldKind::StringEnum { allowed } => {
                    prop.insert("type".to_owned(), Value::from("string"));
                    prop.insert("enum".to_owned(), Value::from(allowed.clone()));
                }
                FieldKind::Number => {
                    prop.insert("type".to_owned(), Value::from("number"));
                }
                FieldKind::Boolean => {
                    prop.insert("type".to_owned(), Value::from("boolean"));
                }
                FieldKind::StringArray { max_items } => {
                    prop.insert("type".to_owned(), Value::from("array"));
                    let mut items = Map::new();
                    items.insert("type".to_owned(), Value::from("string"));
                    prop.insert("items".to_owned(), Value::Object(items));
                    if let Some(max) = max_items {
                        prop.insert("maxItems".to_owned(), Value::from(*max));
                    }
                }
            }
            if let Some(description) = &field.description {
                prop.insert("description".to_owned(), Value::from(description.clone()));
            }
            if let Some(default) = &field.default {
                prop.insert("default".to_owned(), default.clone());
            }
            if field.required && field.default.is_none() {
                required.push(Value::from(field.name.clone()));
            }
            properties.insert(field.name.clone(), Value::Object(prop));
        }

        let mut root = Map::new();
        root.insert("type".to_owned(), Value::from("object"));
        root.insert("properties".to_owned(), Value::Object(properties));
        if !required.is_empty() {
            root.insert("required".to_owned(), Value::Array(required));
        }
        if self.strict {
            root.insert("additionalProperties".to_owned(), Value::from(false));
        }
        Value::Object(root)
    }
}

impl Default for Schema {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_schema_export() {
        let schema = Schema::strict()
            .field(
                FieldSpec::string_enum("chain", ["eth", "polygon"])
                    .describe("The chain to query")
                    .with_default("eth"),
            )
            .field(FieldSpec::string("address").describe("The wallet address"))
            .field(FieldSpec::number("to_block").optional())
            .field(
                FieldSpec::string_array("token_addresses")
                    .max_items(10)
                    .optional(),
            )
            .field(FieldSpec::boolean("exclude_spam").optional());

        let exported = schema.to_json_schema();
        assert_eq!(
            exported,
            json!({
                "type": "object",
                "properties": {
                    "chain": {
                        "type": "string",
                        "enum": ["eth", "polygon"],
                        "description": "The chain to query",
                        "default": "eth",
                    },
                    "address": {
                        "type": "string",
                        "description": "The wallet address",
                    },
                    "to_block": { "type": "number" },
                    "token_addresses": {
                        "type": "array",
                        "items": { "type": "string" },
                        "maxItems": 10,
                    },
                    "exclude_spam": { "type": "boolean" },
                },
                "required": ["address"],
                "additionalProperties": false,
            }),
        );
    }

    #[test]
    fn test_non_strict_export_allows_additional_properties() {
        let schema = Schema::new().field(FieldSpec::string("name"));
        let exported = schema.to_json_schema();
        assert!(exported.get("additionalProperties").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate field")]
    fn test_duplicate_field_names_rejected() {
        let _ = Schema::new()
            .field(FieldSpec::string("name"))
            .field(FieldSpec::number("name"));
    }

    #[test]
    #[should_panic(expected = "does not match its declared kind")]
    fn test_default_must_match_kind() {
        let _ = FieldSpec::number("count").with_default("three");
    }

    #[test]
    #[should_panic(expected = "does not match its declared kind")]
    fn test_enum_default_must_be_a_member() {
        let _ = FieldSpec::string_enum("chain", ["eth", "polygon"]).with_default("solana");
    }
}
