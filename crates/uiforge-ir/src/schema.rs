//! Schema validation for IR documents.
//!
//! The validator walks an untyped JSON value once, records every violated
//! constraint with its path, and only builds an [`IrDocument`] when the
//! walk finished clean. Unknown fields are never errors: they are kept in
//! the `extra` maps so newer minor versions stay readable.

use crate::document::{ElementNode, IrDocument, ScreenNode};
use crate::error::{Result, ValidationError, Violation};
use crate::types::{Color, Rect};
use semver::Version;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// The v1 JSON Schema, shipped as a runtime asset.
pub const SCHEMA_V1: &str = include_str!("../schema/ir_schema_v1.json");

/// Only documents with this `schema_version` major are accepted.
pub const SUPPORTED_MAJOR: u64 = 1;

/// Element kinds this schema version defines, sorted.
pub const RECOGNIZED_KINDS: &[&str] = &[
    "button",
    "container",
    "image_placeholder",
    "text",
    "text_field",
];

const MISSING: &str = "required field is missing";
const TOP_LEVEL_FIELDS: &[&str] = &["schema_version", "screen", "elements"];
const SCREEN_FIELDS: &[&str] = &["name", "background", "width", "height"];
const ELEMENT_FIELDS: &[&str] = &["kind", "id", "bbox"];

/// How the validator treats an element `kind` it does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindPolicy {
    /// Keep the element; emission reports it as unsupported.
    #[default]
    Defer,
    /// Report the kind as a validation violation.
    Reject,
}

/// Validator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatorOptions {
    pub kind_policy: KindPolicy,
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject unrecognized element kinds during validation.
    pub fn strict(mut self) -> Self {
        self.kind_policy = KindPolicy::Reject;
        self
    }
}

/// Value type of a kind-specific property.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PropType {
    Str,
    Bool,
    OneOf(Vec<String>),
    /// Nested elements (`children`).
    Elements,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PropSpec {
    name: String,
    ty: PropType,
    required: bool,
}

/// Per-kind property rules read from the `allOf` branches of the schema
/// asset, plus the required `bbox` fields.
#[derive(Debug)]
struct SchemaRules {
    kinds: Vec<String>,
    properties: HashMap<String, Vec<PropSpec>>,
    bbox_fields: Vec<String>,
}

fn strings(value: Option<&Value>, what: &str) -> std::result::Result<Vec<String>, String> {
    value
        .and_then(Value::as_array)
        .ok_or_else(|| format!("{} is not an array", what))?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("{} holds a non-string", what))
        })
        .collect()
}

impl PropType {
    fn from_schema(name: &str, prop: &Value) -> std::result::Result<Self, String> {
        if let Some(allowed) = prop.get("enum") {
            return Ok(PropType::OneOf(strings(Some(allowed), name)?));
        }
        match prop.get("type").and_then(Value::as_str) {
            Some("string") => Ok(PropType::Str),
            Some("boolean") => Ok(PropType::Bool),
            Some("array")
                if prop.pointer("/items/$ref").and_then(Value::as_str)
                    == Some("#/definitions/element") =>
            {
                Ok(PropType::Elements)
            }
            other => Err(format!("property '{}' has unsupported type {:?}", name, other)),
        }
    }
}

impl SchemaRules {
    fn from_schema(source: &str) -> std::result::Result<Self, String> {
        let schema: Value = serde_json::from_str(source).map_err(|e| e.to_string())?;
        let element = schema
            .pointer("/definitions/element")
            .ok_or("missing /definitions/element")?;
        let kinds = strings(element.pointer("/properties/kind/enum"), "kind enum")?;

        let mut properties = HashMap::new();
        let branches = element
            .get("allOf")
            .and_then(Value::as_array)
            .ok_or("element has no allOf branches")?;
        for branch in branches {
            let kind = branch
                .pointer("/if/properties/kind/const")
                .and_then(Value::as_str)
                .ok_or("allOf branch without a kind const")?;
            let then = branch.get("then").ok_or("allOf branch without then")?;
            let required = match then.get("required") {
                None => Vec::new(),
                Some(v) => strings(Some(v), "required")?,
            };
            let mut specs = Vec::new();
            if let Some(props) = then.get("properties").and_then(Value::as_object) {
                for (name, prop) in props {
                    specs.push(PropSpec {
                        name: name.clone(),
                        ty: PropType::from_schema(name, prop)?,
                        required: required.contains(name),
                    });
                }
            }
            properties.insert(kind.to_string(), specs);
        }
        if let Some(kind) = kinds.iter().find(|k| !properties.contains_key(k.as_str())) {
            return Err(format!("kind '{}' has no allOf branch", kind));
        }

        let bbox_fields = strings(schema.pointer("/definitions/bbox/required"), "bbox required")?;
        Ok(Self {
            kinds,
            properties,
            bbox_fields,
        })
    }

    /// Kind-specific properties; `None` for unrecognized kinds.
    fn kind_properties(&self, kind: &str) -> Option<&[PropSpec]> {
        self.properties.get(kind).map(Vec::as_slice)
    }
}

/// Rules parsed once from [`SCHEMA_V1`].
fn rules() -> Result<&'static SchemaRules> {
    static RULES: OnceLock<std::result::Result<SchemaRules, String>> = OnceLock::new();
    RULES
        .get_or_init(|| SchemaRules::from_schema(SCHEMA_V1))
        .as_ref()
        .map_err(|e| ValidationError::single("$schema", format!("embedded schema is unusable: {}", e)))
}

/// Validate a JSON document held in a string.
pub fn validate_str(source: &str, options: &ValidatorOptions) -> Result<IrDocument> {
    let value: Value = serde_json::from_str(source)
        .map_err(|e| ValidationError::single("$", format!("not valid JSON: {}", e)))?;
    validate(&value, options)
}

/// Validate a JSON document held in raw bytes.
pub fn validate_slice(bytes: &[u8], options: &ValidatorOptions) -> Result<IrDocument> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ValidationError::single("$", format!("not valid JSON: {}", e)))?;
    validate(&value, options)
}

/// Validate an already-parsed JSON document.
pub fn validate(value: &Value, options: &ValidatorOptions) -> Result<IrDocument> {
    let mut validator = Validator::new(options, rules()?);
    let document = validator.document(value);

    if !validator.violations.is_empty() {
        debug!(
            violations = validator.violations.len(),
            "IR document rejected"
        );
        return Err(ValidationError::new(validator.violations));
    }

    let document = document
        .ok_or_else(|| ValidationError::single("$", "document could not be constructed"))?;
    debug!(
        version = %document.schema_version,
        elements = document.element_count(),
        "IR document validated"
    );
    Ok(document)
}

/// Accept `1`, `1.0` and full semver strings.
fn parse_schema_version(raw: &str) -> Option<Version> {
    let split = raw.find(|c| c == '-' || c == '+').unwrap_or(raw.len());
    let (core, suffix) = raw.split_at(split);
    let padded = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        _ => raw.to_string(),
    };
    Version::parse(&padded).ok()
}

fn extra_fields(object: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

struct Validator<'a> {
    options: &'a ValidatorOptions,
    rules: &'static SchemaRules,
    violations: Vec<Violation>,
    /// Element id -> path of its first use.
    ids: HashMap<String, String>,
}

impl<'a> Validator<'a> {
    fn new(options: &'a ValidatorOptions, rules: &'static SchemaRules) -> Self {
        Self {
            options,
            rules,
            violations: Vec::new(),
            ids: HashMap::new(),
        }
    }

    fn fail(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.violations.push(Violation::new(path, reason));
    }

    fn document(&mut self, value: &Value) -> Option<IrDocument> {
        let Some(root) = value.as_object() else {
            self.fail("$", format!("expected an object, found {}", type_name(value)));
            return None;
        };

        let schema_version = self.schema_version(root.get("schema_version"));
        let screen = self.screen(root.get("screen"));
        let elements = match root.get("elements") {
            None => {
                self.fail("elements", MISSING);
                Vec::new()
            }
            Some(Value::Array(items)) => self.element_list("elements", items),
            Some(other) => {
                self.fail("elements", format!("expected an array, found {}", type_name(other)));
                Vec::new()
            }
        };

        if let Some(screen) = &screen {
            self.check_canvas(screen, &elements);
        }

        Some(IrDocument {
            schema_version: schema_version?,
            screen: screen?,
            elements,
            extra: extra_fields(root, TOP_LEVEL_FIELDS),
        })
    }

    fn schema_version(&mut self, value: Option<&Value>) -> Option<Version> {
        let raw = match value {
            None => {
                self.fail("schema_version", MISSING);
                return None;
            }
            Some(Value::String(s)) => s,
            Some(other) => {
                self.fail(
                    "schema_version",
                    format!("expected a string, found {}", type_name(other)),
                );
                return None;
            }
        };

        let Some(version) = parse_schema_version(raw) else {
            self.fail("schema_version", format!("'{}' is not a semantic version", raw));
            return None;
        };
        if version.major != SUPPORTED_MAJOR {
            self.fail(
                "schema_version",
                format!(
                    "unsupported major version {} (supported: {})",
                    version.major, SUPPORTED_MAJOR
                ),
            );
            return None;
        }
        Some(version)
    }

    fn screen(&mut self, value: Option<&Value>) -> Option<ScreenNode> {
        let object = match value {
            None => {
                self.fail("screen", MISSING);
                return None;
            }
            Some(Value::Object(object)) => object,
            Some(other) => {
                self.fail("screen", format!("expected an object, found {}", type_name(other)));
                return None;
            }
        };

        let name = match object.get("name") {
            None => {
                self.fail("screen.name", MISSING);
                None
            }
            Some(Value::String(s)) if s.is_empty() => {
                self.fail("screen.name", "must not be empty");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.fail(
                    "screen.name",
                    format!("expected a string, found {}", type_name(other)),
                );
                None
            }
        };

        let background = match object.get("background") {
            None => None,
            Some(Value::String(s)) if Color::from_hex(s).is_some() => Some(s.clone()),
            Some(Value::String(s)) => {
                self.fail(
                    "screen.background",
                    format!("'{}' is not a #RGB, #RRGGBB or #RRGGBBAA color", s),
                );
                None
            }
            Some(other) => {
                self.fail(
                    "screen.background",
                    format!("expected a string, found {}", type_name(other)),
                );
                None
            }
        };

        let width = self.optional_dimension("screen.width", object.get("width"));
        let height = self.optional_dimension("screen.height", object.get("height"));

        Some(ScreenNode {
            name: name?,
            background,
            width,
            height,
            extra: extra_fields(object, SCREEN_FIELDS),
        })
    }

    fn optional_dimension(&mut self, path: &str, value: Option<&Value>) -> Option<f64> {
        value.and_then(|v| self.dimension(path, v))
    }

    fn dimension(&mut self, path: &str, value: &Value) -> Option<f64> {
        match value.as_f64() {
            Some(n) if n >= 0.0 => Some(n),
            Some(_) => {
                self.fail(path, "must be a non-negative number");
                None
            }
            None => {
                self.fail(path, format!("expected a number, found {}", type_name(value)));
                None
            }
        }
    }

    fn element_list(&mut self, path: &str, items: &[Value]) -> Vec<ElementNode> {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.element(&format!("{}[{}]", path, i), item))
            .collect()
    }

    fn element(&mut self, path: &str, value: &Value) -> Option<ElementNode> {
        let Some(object) = value.as_object() else {
            self.fail(path, format!("expected an object, found {}", type_name(value)));
            return None;
        };

        let kind = match object.get("kind") {
            None => {
                self.fail(format!("{}.kind", path), MISSING);
                None
            }
            Some(Value::String(s)) if s.is_empty() => {
                self.fail(format!("{}.kind", path), "must not be empty");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.fail(
                    format!("{}.kind", path),
                    format!("expected a string, found {}", type_name(other)),
                );
                None
            }
        };

        let id = self.element_id(path, object.get("id"));
        let bbox = object.get("bbox").and_then(|v| self.bbox(&format!("{}.bbox", path), v));

        let kind = kind?;
        let rules = self.rules;
        let Some(specs) = rules.kind_properties(&kind) else {
            if self.options.kind_policy == KindPolicy::Reject {
                self.fail(
                    format!("{}.kind", path),
                    format!(
                        "unrecognized element kind '{}' (expected one of: {})",
                        kind,
                        rules.kinds.join(", ")
                    ),
                );
                return None;
            }
            return Some(ElementNode {
                kind,
                id,
                bbox,
                properties: Map::new(),
                children: Vec::new(),
                extra: extra_fields(object, ELEMENT_FIELDS),
            });
        };

        let mut properties = Map::new();
        let mut children = Vec::new();
        for spec in specs {
            let field_path = format!("{}.{}", path, spec.name);
            match (object.get(&spec.name), &spec.ty) {
                (None, _) if spec.required => self.fail(field_path, MISSING),
                (None, _) => {}
                (Some(Value::Array(items)), PropType::Elements) => {
                    children = self.element_list(&field_path, items);
                }
                (Some(v), ty) => {
                    if self.check_property(&field_path, ty, v) {
                        properties.insert(spec.name.clone(), v.clone());
                    }
                }
            }
        }

        let mut known: Vec<&str> = ELEMENT_FIELDS.to_vec();
        known.extend(specs.iter().map(|s| s.name.as_str()));

        Some(ElementNode {
            kind,
            id,
            bbox,
            properties,
            children,
            extra: extra_fields(object, &known),
        })
    }

    fn element_id(&mut self, path: &str, value: Option<&Value>) -> Option<String> {
        let id_path = format!("{}.id", path);
        match value? {
            Value::String(id) => {
                if let Some(first) = self.ids.get(id) {
                    let reason = format!("duplicate id '{}' (first used at {})", id, first);
                    self.fail(id_path, reason);
                } else {
                    self.ids.insert(id.clone(), path.to_string());
                }
                Some(id.clone())
            }
            other => {
                self.fail(id_path, format!("expected a string, found {}", type_name(other)));
                None
            }
        }
    }

    fn bbox(&mut self, path: &str, value: &Value) -> Option<Rect> {
        let Some(object) = value.as_object() else {
            self.fail(path, format!("expected an object, found {}", type_name(value)));
            return None;
        };

        let rules = self.rules;
        let mut values = HashMap::new();
        for name in &rules.bbox_fields {
            let field_path = format!("{}.{}", path, name);
            match object.get(name) {
                None => self.fail(field_path, MISSING),
                Some(v) => {
                    if let Some(n) = self.dimension(&field_path, v) {
                        values.insert(name.as_str(), n);
                    }
                }
            }
        }
        let field = |name: &str| values.get(name).copied();
        let (x, y, width, height) = (field("x"), field("y"), field("width"), field("height"));

        Some(Rect::new(x?, y?, width?, height?))
    }

    fn check_property(&mut self, path: &str, ty: &PropType, value: &Value) -> bool {
        match ty {
            PropType::Str if value.is_string() => true,
            PropType::Bool if value.is_boolean() => true,
            PropType::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.iter().any(|a| a == s) => true,
                _ => {
                    self.fail(path, format!("expected one of: {}", allowed.join(", ")));
                    false
                }
            },
            PropType::Str => {
                self.fail(path, format!("expected a string, found {}", type_name(value)));
                false
            }
            PropType::Bool => {
                self.fail(path, format!("expected a boolean, found {}", type_name(value)));
                false
            }
            PropType::Elements => {
                self.fail(path, format!("expected an array, found {}", type_name(value)));
                false
            }
        }
    }

    /// Top-level boxes must fit the declared canvas.
    fn check_canvas(&mut self, screen: &ScreenNode, elements: &[ElementNode]) {
        let (Some(width), Some(height)) = (screen.width, screen.height) else {
            return;
        };
        for (i, element) in elements.iter().enumerate() {
            if let Some(bbox) = element.bbox {
                if !bbox.fits_within(width, height) {
                    self.fail(
                        format!("elements[{}].bbox", i),
                        format!("extends outside the {}x{} screen canvas", width, height),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login() -> Value {
        json!({
            "schema_version": "1.0",
            "screen": { "name": "login" },
            "elements": [
                { "kind": "text_field", "hint": "email", "secure": false },
                { "kind": "text_field", "hint": "password", "secure": true },
                { "kind": "button", "label": "Continue" }
            ]
        })
    }

    fn strict() -> ValidatorOptions {
        ValidatorOptions::new().strict()
    }

    #[test]
    fn test_valid_document() {
        let doc = validate(&login(), &ValidatorOptions::default()).unwrap();
        assert_eq!(doc.schema_version, Version::new(1, 0, 0));
        assert_eq!(doc.screen.name, "login");
        assert_eq!(doc.elements.len(), 3);
        assert_eq!(doc.elements[1].bool_property("secure"), Some(true));
        assert_eq!(doc.elements[2].str_property("label"), Some("Continue"));
    }

    #[test]
    fn test_empty_elements_is_valid() {
        let doc = validate_str(
            r#"{"schema_version":"1.2.3","screen":{"name":"blank"},"elements":[]}"#,
            &ValidatorOptions::default(),
        )
        .unwrap();
        assert!(doc.elements.is_empty());
        assert_eq!(doc.schema_version, Version::new(1, 2, 3));
    }

    #[test]
    fn test_reports_every_violation() {
        let value = json!({
            "screen": { "name": "" },
            "elements": [
                { "kind": "text_field" },
                { "kind": "button", "label": 7 },
                { "hint": "no kind" },
                { "kind": "text", "text": "ok", "bbox": { "x": -1, "y": 0, "width": 10 } }
            ]
        });
        let err = validate(&value, &ValidatorOptions::default()).unwrap_err();

        assert!(err.has_path("schema_version"));
        assert!(err.has_path("screen.name"));
        assert!(err.has_path("elements[0].hint"));
        assert!(err.has_path("elements[1].label"));
        assert!(err.has_path("elements[2].kind"));
        assert!(err.has_path("elements[3].bbox.x"));
        assert!(err.has_path("elements[3].bbox.height"));
        assert_eq!(err.violations.len(), 7);
    }

    #[test]
    fn test_missing_top_level_fields() {
        let err = validate(&json!({}), &ValidatorOptions::default()).unwrap_err();
        let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["schema_version", "screen", "elements"]);
    }

    #[test]
    fn test_non_object_root() {
        let err = validate(&json!([1, 2]), &ValidatorOptions::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].path, "$");
    }

    #[test]
    fn test_invalid_json_text() {
        let err = validate_str("{ nope", &ValidatorOptions::default()).unwrap_err();
        assert_eq!(err.violations[0].path, "$");
        assert!(err.violations[0].reason.starts_with("not valid JSON"));
    }

    #[test]
    fn test_unsupported_major_version() {
        let mut value = login();
        value["schema_version"] = json!("2.0");
        let err = validate(&value, &ValidatorOptions::default()).unwrap_err();
        assert!(err.has_path("schema_version"));
        assert!(err.violations[0].reason.contains("unsupported major version 2"));
    }

    #[test]
    fn test_schema_version_forms() {
        assert_eq!(parse_schema_version("1"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_schema_version("1.4"), Some(Version::new(1, 4, 0)));
        assert_eq!(
            parse_schema_version("1.4-beta").map(|v| v.pre.to_string()),
            Some("beta".to_string())
        );
        assert_eq!(parse_schema_version("one"), None);
        assert_eq!(parse_schema_version("1.x"), None);
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let mut value = login();
        value["generator"] = json!("detector 0.3");
        value["screen"]["density"] = json!(2.0);
        value["elements"][2]["style"] = json!({ "role": "cta" });

        let doc = validate(&value, &ValidatorOptions::default()).unwrap();
        assert_eq!(doc.extra.get("generator"), Some(&json!("detector 0.3")));
        assert_eq!(doc.screen.extra.get("density"), Some(&json!(2.0)));
        assert_eq!(doc.elements[2].extra.get("style"), Some(&json!({ "role": "cta" })));
        assert!(!doc.elements[2].properties.contains_key("style"));
    }

    #[test]
    fn test_unrecognized_kind_deferred() {
        let mut value = login();
        value["elements"][1] = json!({ "kind": "carousel", "items": [1, 2] });
        let doc = validate(&value, &ValidatorOptions::default()).unwrap();
        assert_eq!(doc.elements[1].kind, "carousel");
        assert!(doc.elements[1].extra.contains_key("items"));
    }

    #[test]
    fn test_unrecognized_kind_rejected_when_strict() {
        let mut value = login();
        value["elements"][1] = json!({ "kind": "carousel" });
        let err = validate(&value, &strict()).unwrap_err();
        assert!(err.has_path("elements[1].kind"));
        assert!(err.violations[0].reason.contains("'carousel'"));
    }

    #[test]
    fn test_kind_is_case_sensitive() {
        let mut value = login();
        value["elements"][2]["kind"] = json!("Button");
        assert!(validate(&value, &strict()).is_err());
    }

    #[test]
    fn test_duplicate_ids() {
        let value = json!({
            "schema_version": "1.0",
            "screen": { "name": "dupes" },
            "elements": [
                { "kind": "text", "text": "a", "id": "title" },
                { "kind": "container", "children": [
                    { "kind": "text", "text": "b", "id": "title" }
                ]}
            ]
        });
        let err = validate(&value, &ValidatorOptions::default()).unwrap_err();
        assert!(err.has_path("elements[1].children[0].id"));
        assert!(err.violations[0].reason.contains("first used at elements[0]"));
    }

    #[test]
    fn test_nested_children_paths() {
        let value = json!({
            "schema_version": "1.0",
            "screen": { "name": "nested" },
            "elements": [
                { "kind": "container", "direction": "diagonal", "children": [
                    { "kind": "text" }
                ]}
            ]
        });
        let err = validate(&value, &ValidatorOptions::default()).unwrap_err();
        assert!(err.has_path("elements[0].direction"));
        assert!(err.has_path("elements[0].children[0].text"));
    }

    #[test]
    fn test_children_must_be_array() {
        let value = json!({
            "schema_version": "1.0",
            "screen": { "name": "x" },
            "elements": [ { "kind": "container", "children": {} } ]
        });
        let err = validate(&value, &ValidatorOptions::default()).unwrap_err();
        assert!(err.has_path("elements[0].children"));
    }

    #[test]
    fn test_children_on_non_container_is_extra() {
        let value = json!({
            "schema_version": "1.0",
            "screen": { "name": "x" },
            "elements": [ { "kind": "text", "text": "t", "children": [] } ]
        });
        let doc = validate(&value, &ValidatorOptions::default()).unwrap();
        assert!(doc.elements[0].children.is_empty());
        assert!(doc.elements[0].extra.contains_key("children"));
    }

    #[test]
    fn test_background_color_checked() {
        let mut value = login();
        value["screen"]["background"] = json!("blue");
        let err = validate(&value, &ValidatorOptions::default()).unwrap_err();
        assert!(err.has_path("screen.background"));

        value["screen"]["background"] = json!("#F8FAFC");
        let doc = validate(&value, &ValidatorOptions::default()).unwrap();
        assert_eq!(doc.screen.background.as_deref(), Some("#F8FAFC"));
    }

    #[test]
    fn test_bbox_outside_canvas() {
        let value = json!({
            "schema_version": "1.0",
            "screen": { "name": "x", "width": 100, "height": 100 },
            "elements": [
                { "kind": "text", "text": "in", "bbox": { "x": 0, "y": 0, "width": 100, "height": 20 } },
                { "kind": "text", "text": "out", "bbox": { "x": 50, "y": 0, "width": 60, "height": 20 } }
            ]
        });
        let err = validate(&value, &ValidatorOptions::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.has_path("elements[1].bbox"));
        assert!(err.violations[0].reason.contains("100x100"));
    }

    #[test]
    fn test_schema_asset_matches_recognized_kinds() {
        let rules = rules().unwrap();
        assert_eq!(rules.kinds, RECOGNIZED_KINDS);
        for kind in RECOGNIZED_KINDS {
            assert!(rules.kind_properties(kind).is_some(), "no properties for {}", kind);
        }
        assert_eq!(rules.bbox_fields, vec!["x", "y", "width", "height"]);
    }

    #[test]
    fn test_rules_read_from_schema() {
        let rules = rules().unwrap();
        let spec = |kind: &str, name: &str| {
            rules
                .kind_properties(kind)
                .unwrap()
                .iter()
                .find(|s| s.name == name)
                .cloned()
                .unwrap()
        };
        assert_eq!(spec("text", "text").ty, PropType::Str);
        assert!(spec("text_field", "hint").required);
        assert_eq!(spec("text_field", "secure").ty, PropType::Bool);
        assert!(!spec("text_field", "secure").required);
        assert_eq!(
            spec("button", "variant").ty,
            PropType::OneOf(vec!["primary".into(), "secondary".into()])
        );
        assert!(!spec("image_placeholder", "label").required);
        assert_eq!(spec("container", "children").ty, PropType::Elements);
    }

    #[test]
    fn test_broken_schema_is_reported() {
        assert!(SchemaRules::from_schema("{}").is_err());
        let missing_branch = SCHEMA_V1.replace(r#""const": "button""#, r#""const": "knob""#);
        let err = SchemaRules::from_schema(&missing_branch).unwrap_err();
        assert!(err.contains("'button'"));
    }

    #[test]
    fn test_whitespace_name_is_non_empty() {
        let mut value = login();
        value["screen"]["name"] = json!("   ");
        let doc = validate(&value, &ValidatorOptions::default()).unwrap();
        assert_eq!(doc.screen.name, "   ");
    }
}
