//! Emitters for the supported target frameworks.

#[cfg(feature = "flutter")]
mod flutter;
#[cfg(feature = "react")]
mod react;
#[cfg(feature = "web")]
mod web;

pub(crate) mod templates;

#[cfg(feature = "flutter")]
pub use flutter::FlutterEmitter;
#[cfg(feature = "react")]
pub use react::ReactEmitter;
#[cfg(feature = "web")]
pub use web::WebEmitter;

pub use templates::TemplateEngine;

use crate::error::{CodegenError, Result};
use crate::project::ProjectTree;
use serde::Serialize;
use uiforge_ir::{ElementKind, ElementPath, IrModel};

/// Common trait for target emitters.
///
/// `emit` must be a pure function of the model: same model, same tree.
pub trait Emitter: Send + Sync {
    /// Static description of the target.
    fn info(&self) -> &TargetInfo;

    /// Map the model onto this target's source files.
    ///
    /// Fails on the first unsupported element without producing any files.
    fn emit(&self, model: &IrModel) -> Result<ProjectTree>;
}

/// How a target places elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Element `bbox` geometry is honored.
    Absolute,
    /// Elements flow in document order; geometry is ignored.
    Flow,
}

/// Build/analyze tooling for a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tooling {
    /// The project runs as generated.
    None,
    /// Commands that help but are never required to read the output.
    Optional { commands: &'static [&'static str] },
}

impl Tooling {
    pub fn describe(&self) -> String {
        match self {
            Tooling::None => "no tooling required".to_string(),
            Tooling::Optional { commands } => format!("optional: {}", commands.join(", ")),
        }
    }
}

/// Which standard scaffolding the assembler adds around the emitted files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaffoldProfile {
    StaticSite,
    Vite,
    Flutter,
}

/// Static description of one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetInfo {
    /// Registry identifier, e.g. `flutter`.
    pub name: &'static str,
    /// Human-readable framework name.
    pub framework: &'static str,
    pub layout: LayoutMode,
    pub tooling: Tooling,
    pub scaffold: ScaffoldProfile,
    /// Source files every project for this target contains, whatever the
    /// IR holds. Conditional assets are not listed.
    pub sources: &'static [&'static str],
}

/// 1x1 transparent PNG used as the image placeholder asset.
pub const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

/// Error for an element kind no emitter handles.
pub(crate) fn unsupported(kind: &str, path: &ElementPath) -> CodegenError {
    CodegenError::UnsupportedElement {
        kind: kind.to_string(),
        index: path.index(),
        path: path.to_string(),
    }
}

/// Whether any element is an image placeholder.
pub(crate) fn uses_image(model: &IrModel) -> bool {
    model.any_element(|e| matches!(e.kind, ElementKind::ImagePlaceholder { .. }))
}

/// Indent every non-empty line by `spaces`.
pub(crate) fn indent(lines: Vec<String>, spaces: usize) -> Vec<String> {
    let pad = " ".repeat(spaces);
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect()
}

/// Join lines with `\n` and end the file with a newline.
pub(crate) fn file(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// CSS pixel length. `f64` formatting is platform independent.
pub(crate) fn px(value: f64) -> String {
    format!("{}px", value)
}
