use std::fmt::{self, Display};

use serde_json::{Map, Value};

use super::{FieldKind, FieldSpec, Schema};

/// A single rule violation found while validating raw arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The raw arguments were not a JSON object.
    NotAnObject,
    /// A field not declared by the schema was present (strict mode only).
    UnknownField {
        /// The undeclared field.
        field: String,
    },
    /// A required field with no default was absent.
    MissingField {
        /// The absent field.
        field: String,
    },
    /// A field value did not have the declared type.
    WrongType {
        /// The offending field.
        field: String,
        /// The type the schema declares for it.
        expected: &'static str,
    },
    /// An enum field value was not one of the declared literals.
    NotInEnum {
        /// The offending field.
        field: String,
        /// The literals the schema accepts.
        allowed: Vec<String>,
    },
    /// A bounded array field had too many items.
    TooManyItems {
        /// The offending field.
        field: String,
        /// The declared bound.
        max: usize,
        /// The number of items received.
        len: usize,
    },
}

impl Violation {
    /// Returns the field this violation names, if it names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Violation::NotAnObject => None,
            Violation::UnknownField { field }
            | Violation::MissingField { field }
            | Violation::WrongType { field, .. }
            | Violation::NotInEnum { field, .. }
            | Violation::TooManyItems { field, .. } => Some(field),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotAnObject => {
                write!(f, "arguments must be a JSON object")
            }
            Violation::UnknownField { field } => {
                write!(f, "`{field}` is not a declared field")
            }
            Violation::MissingField { field } => {
                write!(f, "`{field}` is required")
            }
            Violation::WrongType { field, expected } => {
                write!(f, "`{field}` must be a {expected}")
            }
            Violation::NotInEnum { field, allowed } => {
                write!(f, "`{field}` must be one of: {}", allowed.join(", "))
            }
            Violation::TooManyItems { field, max, len } => {
                write!(f, "`{field}` accepts at most {max} items, got {len}")
            }
        }
    }
}

/// Checks a present value against a field's declared kind.
pub(super) fn check_value(field: &FieldSpec, value: &Value) -> Option<Violation> {
    let wrong_type = || Violation::WrongType {
        field: field.name().to_owned(),
        expected: field.kind().expected(),
    };

    match field.kind() {
        FieldKind::String => {
            if !value.is_string() {
                return Some(wrong_type());
            }
        }
        FieldKind::StringEnum { allowed } => match value.as_str() {
            None => return Some(wrong_type()),
            Some(literal) => {
                if !allowed.iter().any(|a| a == literal) {
                    return Some(Violation::NotInEnum {
                        field: field.name().to_owned(),
                        allowed: allowed.clone(),
                    });
                }
            }
        },
        FieldKind::Number => {
            if !value.is_number() {
                return Some(wrong_type());
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                return Some(wrong_type());
            }
        }
        FieldKind::StringArray { max_items } => {
            let Some(items) = value.as_array() else {
                return Some(wrong_type());
            };
            if items.iter().any(|item| !item.is_string()) {
                return Some(wrong_type());
            }
            if let Some(max) = max_items {
                if items.len() > *max {
                    return Some(Violation::TooManyItems {
                        field: field.name().to_owned(),
                        max: *max,
                        len: items.len(),
                    });
                }
            }
        }
    }
    None
}

impl Schema {
    /// Validates a raw argument record against the schema.
    ///
    /// Fields are checked in declaration order and every violation is
    /// accumulated, so the caller sees all the problems at once rather
    /// than the first. On success the returned record has defaults
    /// applied for absent fields that declare one; absent optional
    /// fields without a default stay absent.
    pub fn validate(&self, raw: Value) -> Result<Map<String, Value>, Vec<Violation>> {
        let Value::Object(raw) = raw else {
            return Err(vec![Violation::NotAnObject]);
        };

        let mut violations = Vec::new();
        let mut validated = Map::new();

        if self.is_strict() {
            for key in raw.keys() {
                if !self.fields().iter().any(|f| f.name() == key) {
                    violations.push(Violation::UnknownField { field: key.clone() });
                }
            }
        } else {
            for (key, value) in &raw {
                if !self.fields().iter().any(|f| f.name() == key) {
                    validated.insert(key.clone(), value.clone());
                }
            }
        }

        for field in self.fields() {
            match raw.get(field.name()) {
                Some(value) => {
                    if let Some(violation) = check_value(field, value) {
                        violations.push(violation);
                    } else {
                        validated.insert(field.name().to_owned(), value.clone());
                    }
                }
                None => {
                    if let Some(default) = field.default_value() {
                        validated.insert(field.name().to_owned(), default.clone());
                    } else if field.is_required() {
                        violations.push(Violation::MissingField {
                            field: field.name().to_owned(),
                        });
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(validated)
        } else {
            Err(violations)
        }
    }
}
