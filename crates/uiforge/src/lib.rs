//! Generate framework projects from a UI intermediate representation.
//!
//! A run goes Validate → Build Model → Emit → Assemble → Package, all in
//! memory, and writes its output only after every stage has succeeded.
//!
//! # Example
//!
//! ```
//! use uiforge::{GenerateOptions, Generator};
//! use serde_json::json;
//!
//! let generator = Generator::with_defaults(GenerateOptions::default());
//! let model = generator.validate(&json!({
//!     "schema_version": "1.0",
//!     "screen": { "name": "login" },
//!     "elements": [ { "kind": "button", "label": "Continue" } ]
//! })).unwrap();
//! let project = generator.render(&model, "web").unwrap();
//! assert_eq!(project.archive_name(), "login-web.zip");
//! ```

pub mod error;
pub mod pipeline;

pub use error::{GenerateError, Result};
pub use pipeline::{
    destination, GenerateOptions, GeneratedProject, GenerationReport, Generator, IrSource,
    OutputMode, OutputSpec,
};

pub use uiforge_codegen::{ProjectLayout, TargetRegistry, TargetSummary};
pub use uiforge_export::ArchiveOptions;
pub use uiforge_ir::{IrModel, KindPolicy, ValidationError, ValidatorOptions};
