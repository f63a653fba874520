//! Versioned intermediate representation for UI screens.
//!
//! An IR document describes one screen as an ordered list of UI elements.
//! Documents arrive as untyped JSON, go through the [`schema`] validator,
//! and come out as an immutable [`IrModel`] that code emitters read.
//!
//! # Example
//!
//! ```
//! use uiforge_ir::{schema, IrModel, ValidatorOptions};
//!
//! let doc = schema::validate_str(
//!     r#"{"schema_version":"1.0","screen":{"name":"login"},"elements":[]}"#,
//!     &ValidatorOptions::default(),
//! ).unwrap();
//! let model = IrModel::try_from(doc).unwrap();
//! assert_eq!(model.screen_name(), "login");
//! ```

pub mod document;
pub mod error;
pub mod model;
pub mod schema;
pub mod types;

pub use document::{ElementNode, IrDocument, ScreenNode};
pub use error::{Result, ValidationError, Violation};
pub use model::{
    ButtonVariant, Direction, Element, ElementKind, ElementPath, IrModel, Screen, Walk,
};
pub use schema::{KindPolicy, ValidatorOptions, RECOGNIZED_KINDS, SUPPORTED_MAJOR};
pub use types::{Color, Rect};
