//! Collection schema declarations and `$jsonSchema` validator documents
//!
//! A `CollectionSchema` renders to the validator document handed verbatim to
//! MongoDB's `createCollection`. `check_document` evaluates the subset of
//! `$jsonSchema` these validators use, so the in-memory admin can enforce
//! them the way the engine does.

use bson::{doc, Bson, Document};

/// A required string field and its length bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub description: String,
}

impl FieldSpec {
    /// Unbounded string field with a free-form description
    pub fn string(name: &'static str, description: &str) -> Self {
        Self {
            name,
            min_length: None,
            max_length: None,
            description: description.to_string(),
        }
    }

    /// String field whose length must fall in `min..=max`
    pub fn bounded(name: &'static str, min: i32, max: i32) -> Self {
        Self {
            name,
            min_length: Some(min),
            max_length: Some(max),
            description: format!(
                "is required and must be a string with length between {} and {}",
                min, max
            ),
        }
    }

    fn to_property(&self) -> Document {
        let mut property = doc! { "bsonType": "string" };
        if let Some(min) = self.min_length {
            property.insert("minLength", min);
        }
        if let Some(max) = self.max_length {
            property.insert("maxLength", max);
        }
        property.insert("description", self.description.as_str());
        property
    }
}

/// A collection name plus the fields its validator requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl CollectionSchema {
    pub fn new(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { name, fields }
    }

    /// Names of all required fields, in declaration order
    pub fn required(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Build the `{ $jsonSchema: ... }` validator document
    pub fn validator(&self) -> Document {
        let mut properties = Document::new();
        for field in &self.fields {
            properties.insert(field.name, field.to_property());
        }

        doc! {
            "$jsonSchema": {
                "bsonType": "object",
                "required": self.required(),
                "properties": properties,
            }
        }
    }
}

/// Evaluate `candidate` against a `{ $jsonSchema: ... }` validator.
///
/// Supports `bsonType`, `required`, `properties`, `minLength` and
/// `maxLength`. String lengths are counted in code points. A validator
/// without `$jsonSchema` accepts everything.
pub fn check_document(validator: &Document, candidate: &Document) -> Result<(), Vec<String>> {
    let schema = match validator.get_document("$jsonSchema") {
        Ok(schema) => schema,
        Err(_) => return Ok(()),
    };

    let mut violations = Vec::new();
    check_value(schema, &Bson::Document(candidate.clone()), "", &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_value(schema: &Document, value: &Bson, path: &str, violations: &mut Vec<String>) {
    if let Ok(expected) = schema.get_str("bsonType") {
        if !matches_type(expected, value) {
            violations.push(format!(
                "{}: expected {}, found {:?}",
                display_path(path),
                expected,
                value.element_type()
            ));
            return;
        }
    }

    match value {
        Bson::Document(document) => {
            if let Ok(required) = schema.get_array("required") {
                for name in required.iter().filter_map(Bson::as_str) {
                    if !document.contains_key(name) {
                        violations.push(format!("missing required field '{}'", name));
                    }
                }
            }

            if let Ok(properties) = schema.get_document("properties") {
                for (name, property) in properties {
                    let (Some(field), Bson::Document(property)) = (document.get(name), property)
                    else {
                        continue;
                    };
                    check_value(property, field, &join_path(path, name), violations);
                }
            }
        }
        Bson::String(s) => {
            let len = s.chars().count() as i64;
            if let Some(min) = get_int(schema, "minLength") {
                if len < min {
                    violations.push(format!(
                        "{}: length {} is shorter than minLength {}",
                        display_path(path),
                        len,
                        min
                    ));
                }
            }
            if let Some(max) = get_int(schema, "maxLength") {
                if len > max {
                    violations.push(format!(
                        "{}: length {} exceeds maxLength {}",
                        display_path(path),
                        len,
                        max
                    ));
                }
            }
        }
        _ => {}
    }
}

fn matches_type(expected: &str, value: &Bson) -> bool {
    match expected {
        "object" => matches!(value, Bson::Document(_)),
        "string" => matches!(value, Bson::String(_)),
        "array" => matches!(value, Bson::Array(_)),
        "bool" => matches!(value, Bson::Boolean(_)),
        "int" => matches!(value, Bson::Int32(_)),
        "long" => matches!(value, Bson::Int64(_)),
        "double" => matches!(value, Bson::Double(_)),
        "objectId" => matches!(value, Bson::ObjectId(_)),
        "date" => matches!(value, Bson::DateTime(_)),
        _ => true,
    }
}

fn get_int(schema: &Document, key: &str) -> Option<i64> {
    match schema.get(key)? {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) => Some(*v as i64),
        _ => None,
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "document"
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CollectionSchema {
        CollectionSchema::new(
            "samples",
            vec![
                FieldSpec::bounded("code", 2, 4),
                FieldSpec::string("owner", "who owns it"),
            ],
        )
    }

    #[test]
    fn test_validator_shape() {
        let validator = sample().validator();
        let schema = validator.get_document("$jsonSchema").unwrap();

        assert_eq!(schema.get_str("bsonType").unwrap(), "object");
        let required: Vec<&str> = schema
            .get_array("required")
            .unwrap()
            .iter()
            .filter_map(Bson::as_str)
            .collect();
        assert_eq!(required, vec!["code", "owner"]);

        let code = schema.get_document("properties").unwrap().get_document("code").unwrap();
        assert_eq!(code.get_str("bsonType").unwrap(), "string");
        assert_eq!(code.get_i32("minLength").unwrap(), 2);
        assert_eq!(code.get_i32("maxLength").unwrap(), 4);

        let owner = schema.get_document("properties").unwrap().get_document("owner").unwrap();
        assert!(!owner.contains_key("minLength"));
        assert!(!owner.contains_key("maxLength"));
        assert_eq!(owner.get_str("description").unwrap(), "who owns it");
    }

    #[test]
    fn test_bounded_description_matches_bounds() {
        let field = FieldSpec::bounded("username", 6, 30);
        assert!(field.description.contains("between 6 and 30"));
    }

    #[test]
    fn test_check_accepts_valid_document() {
        let validator = sample().validator();
        let candidate = doc! { "code": "abc", "owner": "x", "extra": 5 };
        assert!(check_document(&validator, &candidate).is_ok());
    }

    #[test]
    fn test_check_reports_missing_and_bounds() {
        let validator = sample().validator();

        let errs = check_document(&validator, &doc! { "code": "a" }).unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().any(|e| e.contains("missing required field 'owner'")));
        assert!(errs.iter().any(|e| e.contains("shorter than minLength 2")));

        let errs = check_document(&validator, &doc! { "code": "abcde", "owner": "x" }).unwrap_err();
        assert!(errs[0].contains("exceeds maxLength 4"));
    }

    #[test]
    fn test_check_rejects_wrong_type() {
        let validator = sample().validator();
        let errs = check_document(&validator, &doc! { "code": 123, "owner": "x" }).unwrap_err();
        assert!(errs[0].starts_with("code: expected string"));
    }

    #[test]
    fn test_length_counts_code_points() {
        let validator = sample().validator();
        // four code points, eight bytes
        assert!(check_document(&validator, &doc! { "code": "éééé", "owner": "x" }).is_ok());
    }

    #[test]
    fn test_validator_without_json_schema_accepts_anything() {
        assert!(check_document(&doc! {}, &doc! { "anything": 1 }).is_ok());
    }
}
