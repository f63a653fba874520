//! The typed, immutable IR model consumed by emitters.

use crate::document::{ElementNode, IrDocument};
use crate::error::{ValidationError, Violation};
use crate::types::{Color, Rect};
use semver::Version;
use std::fmt;

/// Screen metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub name: String,
    pub background: Option<Color>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Button emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

impl ButtonVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
        }
    }
}

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Column => "column",
            Direction::Row => "row",
        }
    }
}

/// The closed set of element variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text {
        text: String,
    },
    TextField {
        hint: String,
        secure: bool,
    },
    Button {
        label: String,
        variant: ButtonVariant,
    },
    ImagePlaceholder {
        label: String,
    },
    Container {
        direction: Direction,
        children: Vec<Element>,
    },
    /// A kind this schema version does not define. Emitters refuse it.
    Unrecognized {
        kind: String,
    },
}

impl ElementKind {
    /// The IR `kind` tag.
    pub fn tag(&self) -> &str {
        match self {
            ElementKind::Text { .. } => "text",
            ElementKind::TextField { .. } => "text_field",
            ElementKind::Button { .. } => "button",
            ElementKind::ImagePlaceholder { .. } => "image_placeholder",
            ElementKind::Container { .. } => "container",
            ElementKind::Unrecognized { kind } => kind,
        }
    }
}

/// One UI element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: Option<String>,
    pub bounds: Option<Rect>,
    pub kind: ElementKind,
}

impl Element {
    /// Child elements; empty for everything but containers.
    pub fn children(&self) -> &[Element] {
        match &self.kind {
            ElementKind::Container { children, .. } => children,
            _ => &[],
        }
    }
}

/// Position of an element in the tree: top-level index plus child indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementPath {
    segments: Vec<usize>,
}

impl ElementPath {
    /// Path of the `index`-th top-level element.
    pub fn top(index: usize) -> Self {
        Self {
            segments: vec![index],
        }
    }

    /// Path of this element's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index);
        Self { segments }
    }

    /// Index within the top-level `elements` sequence.
    pub fn index(&self) -> usize {
        self.segments[0]
    }

    /// Nesting depth; zero for top-level elements.
    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elements[{}]", self.segments[0])?;
        for segment in &self.segments[1..] {
            write!(f, ".children[{}]", segment)?;
        }
        Ok(())
    }
}

/// A validated, typed IR document.
///
/// Read-only once built: emitters only ever see `&IrModel`.
#[derive(Debug, Clone, PartialEq)]
pub struct IrModel {
    schema_version: Version,
    screen: Screen,
    elements: Vec<Element>,
}

impl IrModel {
    pub fn schema_version(&self) -> &Version {
        &self.schema_version
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Screen name, used as the generated app title.
    pub fn screen_name(&self) -> &str {
        &self.screen.name
    }

    pub fn background_color(&self) -> Option<Color> {
        self.screen.background
    }

    /// Top-level elements in document order. Call again to restart.
    pub fn elements(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Depth-first, pre-order walk over every element with its path.
    pub fn walk(&self) -> Walk<'_> {
        let stack = self
            .elements
            .iter()
            .enumerate()
            .rev()
            .map(|(i, e)| (ElementPath::top(i), e))
            .collect();
        Walk { stack }
    }

    /// Whether any element, at any depth, matches `predicate`.
    pub fn any_element(&self, predicate: impl Fn(&Element) -> bool) -> bool {
        self.walk().any(|(_, e)| predicate(e))
    }
}

/// Iterator returned by [`IrModel::walk`].
pub struct Walk<'a> {
    stack: Vec<(ElementPath, &'a Element)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (ElementPath, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, element) = self.stack.pop()?;
        for (i, child) in element.children().iter().enumerate().rev() {
            self.stack.push((path.child(i), child));
        }
        Some((path, element))
    }
}

impl TryFrom<IrDocument> for IrModel {
    type Error = ValidationError;

    fn try_from(doc: IrDocument) -> Result<Self, Self::Error> {
        let mut violations = Vec::new();

        let background = match doc.screen.background.as_deref() {
            None => None,
            Some(raw) => {
                let color = Color::from_hex(raw);
                if color.is_none() {
                    violations.push(Violation::new("screen.background", "not a color"));
                }
                color
            }
        };

        let elements = doc
            .elements
            .iter()
            .enumerate()
            .map(|(i, node)| build_element(node, &ElementPath::top(i), &mut violations))
            .collect();

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(IrModel {
            schema_version: doc.schema_version,
            screen: Screen {
                name: doc.screen.name,
                background,
                width: doc.screen.width,
                height: doc.screen.height,
            },
            elements,
        })
    }
}

fn build_element(node: &ElementNode, path: &ElementPath, violations: &mut Vec<Violation>) -> Element {
    let kind = match node.kind.as_str() {
        "text" => ElementKind::Text {
            text: required(node, path, "text", violations),
        },
        "text_field" => ElementKind::TextField {
            hint: required(node, path, "hint", violations),
            secure: node.bool_property("secure").unwrap_or(false),
        },
        "button" => ElementKind::Button {
            label: required(node, path, "label", violations),
            variant: match node.str_property("variant") {
                Some("secondary") => ButtonVariant::Secondary,
                _ => ButtonVariant::Primary,
            },
        },
        "image_placeholder" => ElementKind::ImagePlaceholder {
            label: node.str_property("label").unwrap_or("image").to_string(),
        },
        "container" => ElementKind::Container {
            direction: match node.str_property("direction") {
                Some("row") => Direction::Row,
                _ => Direction::Column,
            },
            children: node
                .children
                .iter()
                .enumerate()
                .map(|(i, child)| build_element(child, &path.child(i), violations))
                .collect(),
        },
        other => ElementKind::Unrecognized {
            kind: other.to_string(),
        },
    };

    Element {
        id: node.id.clone(),
        bounds: node.bbox,
        kind,
    }
}

fn required(
    node: &ElementNode,
    path: &ElementPath,
    key: &str,
    violations: &mut Vec<Violation>,
) -> String {
    match node.str_property(key) {
        Some(s) => s.to_string(),
        None => {
            violations.push(Violation::new(
                format!("{}.{}", path, key),
                "required field is missing",
            ));
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{validate, ValidatorOptions};
    use serde_json::json;

    fn model(value: serde_json::Value) -> IrModel {
        let doc = validate(&value, &ValidatorOptions::default()).unwrap();
        IrModel::try_from(doc).unwrap()
    }

    fn sample() -> IrModel {
        model(json!({
            "schema_version": "1.1",
            "screen": { "name": "profile", "background": "#0f172a" },
            "elements": [
                { "kind": "text", "text": "Profile" },
                { "kind": "container", "direction": "row", "children": [
                    { "kind": "image_placeholder" },
                    { "kind": "container", "children": [
                        { "kind": "text", "text": "Ada" },
                        { "kind": "button", "label": "Edit", "variant": "secondary" }
                    ]}
                ]},
                { "kind": "text_field", "hint": "" }
            ]
        }))
    }

    #[test]
    fn test_accessors() {
        let m = sample();
        assert_eq!(m.screen_name(), "profile");
        assert_eq!(m.background_color(), Some(Color::rgb(0x0f, 0x17, 0x2a)));
        assert_eq!(m.schema_version(), &Version::new(1, 1, 0));
        assert_eq!(m.elements().count(), 3);
    }

    #[test]
    fn test_elements_restartable() {
        let m = sample();
        let first: Vec<&str> = m.elements().map(|e| e.kind.tag()).collect();
        let second: Vec<&str> = m.elements().map(|e| e.kind.tag()).collect();
        assert_eq!(first, vec!["text", "container", "text_field"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_defaults_applied() {
        let m = sample();
        let els: Vec<&Element> = m.elements().collect();
        assert_eq!(
            els[2].kind,
            ElementKind::TextField {
                hint: String::new(),
                secure: false
            }
        );
        let image = &els[1].children()[0];
        assert_eq!(
            image.kind,
            ElementKind::ImagePlaceholder {
                label: "image".to_string()
            }
        );
    }

    #[test]
    fn test_walk_is_preorder() {
        let m = sample();
        let visited: Vec<(String, String)> = m
            .walk()
            .map(|(path, e)| (path.to_string(), e.kind.tag().to_string()))
            .collect();
        let expected = [
            ("elements[0]", "text"),
            ("elements[1]", "container"),
            ("elements[1].children[0]", "image_placeholder"),
            ("elements[1].children[1]", "container"),
            ("elements[1].children[1].children[0]", "text"),
            ("elements[1].children[1].children[1]", "button"),
            ("elements[2]", "text_field"),
        ];
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(p, k)| (p.to_string(), k.to_string()))
            .collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_unrecognized_kind_is_kept() {
        let m = model(json!({
            "schema_version": "1.0",
            "screen": { "name": "x" },
            "elements": [ { "kind": "text", "text": "a" }, { "kind": "carousel" } ]
        }));
        let (path, element) = m
            .walk()
            .find(|(_, e)| matches!(e.kind, ElementKind::Unrecognized { .. }))
            .unwrap();
        assert_eq!(path.index(), 1);
        assert_eq!(path.depth(), 0);
        assert_eq!(element.kind.tag(), "carousel");
    }

    #[test]
    fn test_path_display() {
        let path = ElementPath::top(2).child(0).child(3);
        assert_eq!(path.to_string(), "elements[2].children[0].children[3]");
        assert_eq!(path.index(), 2);
        assert_eq!(path.depth(), 2);
    }
}
