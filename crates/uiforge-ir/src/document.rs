//! The validated IR document.
//!
//! These nodes are what the validator hands back: every required field is
//! known to be present and well-formed, but values are still kept close to
//! their JSON shape. [`IrModel`](crate::IrModel) construction turns them into
//! typed values.

use crate::types::Rect;
use semver::Version;
use serde_json::{Map, Value};

/// A validated IR document.
#[derive(Debug, Clone, PartialEq)]
pub struct IrDocument {
    /// Parsed `schema_version`.
    pub schema_version: Version,
    /// Screen metadata.
    pub screen: ScreenNode,
    /// Top-level elements, in document order.
    pub elements: Vec<ElementNode>,
    /// Unrecognized top-level fields, kept verbatim.
    pub extra: Map<String, Value>,
}

/// The `screen` object.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenNode {
    pub name: String,
    /// Background color exactly as written (already checked to parse).
    pub background: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub extra: Map<String, Value>,
}

/// One entry of `elements` (or of a container's `children`).
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// The `kind` tag, recognized or not.
    pub kind: String,
    pub id: Option<String>,
    pub bbox: Option<Rect>,
    /// Kind-specific properties that the schema defines for `kind`.
    pub properties: Map<String, Value>,
    /// Nested elements (containers only).
    pub children: Vec<ElementNode>,
    /// Fields the schema does not define for this kind.
    pub extra: Map<String, Value>,
}

impl ElementNode {
    /// String property, if present.
    pub fn str_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Boolean property, if present.
    pub fn bool_property(&self, key: &str) -> Option<bool> {
        self.properties.get(key).and_then(Value::as_bool)
    }
}

impl IrDocument {
    /// Total number of elements, including nested children.
    pub fn element_count(&self) -> usize {
        fn count(nodes: &[ElementNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.elements)
    }
}
