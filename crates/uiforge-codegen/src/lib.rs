//! Code generation from uiforge IR models to framework projects.
//!
//! Each target is an [`Emitter`] that maps an [`IrModel`](uiforge_ir::IrModel)
//! onto source files. The [`TargetRegistry`] resolves target names, and the
//! [`ProjectAssembler`] adds the target's standard scaffolding and sorts the
//! result into a [`ProjectLayout`].
//!
//! # Features
//!
//! - `web` - static HTML/CSS/JS
//! - `react` - React 18 on Vite
//! - `flutter` - Flutter with Material widgets
//!
//! # Example
//!
//! ```
//! use uiforge_codegen::{ProjectAssembler, TargetRegistry};
//! use uiforge_ir::{schema, IrModel, ValidatorOptions};
//!
//! let doc = schema::validate_str(
//!     r#"{"schema_version":"1.0","screen":{"name":"login"},
//!         "elements":[{"kind":"button","label":"Continue"}]}"#,
//!     &ValidatorOptions::default(),
//! ).unwrap();
//! let model = IrModel::try_from(doc).unwrap();
//!
//! let registry = TargetRegistry::with_defaults();
//! let emitter = registry.resolve("flutter").unwrap();
//! let tree = emitter.emit(&model).unwrap();
//! let layout = ProjectAssembler::new().unwrap()
//!     .assemble(tree, emitter.info(), model.screen_name())
//!     .unwrap();
//! assert_eq!(layout.root(), "login-flutter");
//! assert!(layout.text("lib/main.dart").unwrap().contains("ElevatedButton("));
//! ```

pub mod assembler;
pub mod error;
pub mod escape;
pub mod generators;
pub mod naming;
pub mod project;
pub mod registry;

pub use assembler::ProjectAssembler;
pub use error::{CodegenError, Result};
pub use generators::{
    Emitter, LayoutMode, ScaffoldProfile, TargetInfo, TemplateEngine, Tooling, PLACEHOLDER_PNG,
};
pub use project::{FileContent, ProjectLayout, ProjectTree};
pub use registry::{TargetRegistry, TargetSummary};

#[cfg(feature = "web")]
pub use generators::WebEmitter;

#[cfg(feature = "react")]
pub use generators::ReactEmitter;

#[cfg(feature = "flutter")]
pub use generators::FlutterEmitter;
