//! The generation pipeline: validate, build the model, emit, assemble,
//! package, write.
//!
//! Everything up to packaging happens in memory. Output touches the disk
//! only once a run has fully succeeded, and then through a staged rename.

use crate::error::{GenerateError, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use uiforge_codegen::{ProjectAssembler, ProjectLayout, TargetRegistry};
use uiforge_export::{commit_all, package, stage_archive, stage_tree, ArchiveOptions, StagedOutput};
use uiforge_ir::{schema, IrModel, ValidatorOptions};

/// Pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub validator: ValidatorOptions,
    pub archive: ArchiveOptions,
    /// Render every project twice and compare the archives.
    pub verify_determinism: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            validator: ValidatorOptions::default(),
            archive: ArchiveOptions::default(),
            verify_determinism: true,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject unrecognized element kinds during validation.
    pub fn strict(mut self) -> Self {
        self.validator = self.validator.strict();
        self
    }

    pub fn compression_level(mut self, level: u8) -> Self {
        self.archive = self.archive.compression_level(level);
        self
    }

    pub fn verify_determinism(mut self, verify: bool) -> Self {
        self.verify_determinism = verify;
        self
    }
}

/// Where the IR document comes from.
#[derive(Debug, Clone)]
pub enum IrSource {
    Path(PathBuf),
    /// An in-memory payload, e.g. standard input.
    Bytes(Vec<u8>),
}

impl IrSource {
    /// Name used in messages.
    pub fn describe(&self) -> String {
        match self {
            IrSource::Path(path) => path.display().to_string(),
            IrSource::Bytes(_) => "<memory>".to_string(),
        }
    }

    fn read(&self) -> Result<Vec<u8>> {
        match self {
            IrSource::Path(path) => std::fs::read(path).map_err(|source| GenerateError::Input {
                name: self.describe(),
                source,
            }),
            IrSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Archive file or unpacked directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    Archive,
    Directory,
}

/// Output destination for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    /// Directory that receives `<root>.zip` or `<root>/`. It is created once
    /// every project has rendered.
    pub dir: PathBuf,
    pub mode: OutputMode,
    pub overwrite: bool,
}

impl OutputSpec {
    pub fn archive(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mode: OutputMode::Archive,
            overwrite: false,
        }
    }

    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            mode: OutputMode::Directory,
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// A rendered project held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedProject {
    pub layout: ProjectLayout,
    /// Deterministic zip of `layout`.
    pub archive: Vec<u8>,
}

impl GeneratedProject {
    pub fn root(&self) -> &str {
        self.layout.root()
    }

    pub fn target(&self) -> &str {
        self.layout.target()
    }

    /// File name of the archive, `<root>.zip`.
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.root())
    }
}

/// Summary of one written project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub target: String,
    pub root: String,
    pub mode: OutputMode,
    pub path: PathBuf,
    pub files: usize,
    pub archive_bytes: usize,
}

/// Runs the pipeline against an immutable target registry.
///
/// A `Generator` holds no mutable state, so one instance can serve any
/// number of concurrent runs.
pub struct Generator {
    registry: TargetRegistry,
    options: GenerateOptions,
}

impl Generator {
    pub fn new(registry: TargetRegistry, options: GenerateOptions) -> Self {
        Self { registry, options }
    }

    /// Generator over every built-in target.
    pub fn with_defaults(options: GenerateOptions) -> Self {
        Self::new(TargetRegistry::with_defaults(), options)
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Validate a parsed document and build its model.
    pub fn validate(&self, value: &serde_json::Value) -> Result<IrModel> {
        let doc = schema::validate(value, &self.options.validator)?;
        Ok(IrModel::try_from(doc)?)
    }

    /// Parse, validate and build a model from raw JSON bytes.
    pub fn validate_bytes(&self, bytes: &[u8]) -> Result<IrModel> {
        let doc = schema::validate_slice(bytes, &self.options.validator)?;
        Ok(IrModel::try_from(doc)?)
    }

    /// Read and validate an IR source.
    pub fn load(&self, source: &IrSource) -> Result<IrModel> {
        let bytes = source.read()?;
        let model = self.validate_bytes(&bytes)?;
        debug!(
            source = %source.describe(),
            screen = model.screen_name(),
            elements = model.walk().count(),
            "validated IR"
        );
        Ok(model)
    }

    /// Render a project in memory: resolve, emit, assemble, package.
    #[instrument(skip(self, model), fields(screen = model.screen_name()))]
    pub fn render(&self, model: &IrModel, target_id: &str) -> Result<GeneratedProject> {
        let project = self.render_once(model, target_id)?;
        if self.options.verify_determinism {
            let again = self.render_once(model, target_id)?;
            if again != project {
                return Err(GenerateError::InternalInvariant(format!(
                    "rendering '{}' for target '{}' is not deterministic",
                    model.screen_name(),
                    target_id
                )));
            }
            debug!("determinism check passed");
        }
        Ok(project)
    }

    fn render_once(&self, model: &IrModel, target_id: &str) -> Result<GeneratedProject> {
        let emitter = self.registry.resolve(target_id)?;
        let tree = emitter.emit(model)?;
        debug!(files = tree.len(), "emitted");
        let layout = ProjectAssembler::new()?.assemble(tree, emitter.info(), model.screen_name())?;
        let archive = package(&layout, &self.options.archive)?;
        Ok(GeneratedProject { layout, archive })
    }

    fn stage(&self, project: &GeneratedProject, out: &OutputSpec) -> Result<StagedOutput> {
        let staged = match out.mode {
            OutputMode::Archive => stage_archive(
                &out.dir,
                &project.archive_name(),
                &project.archive,
                out.overwrite,
            )?,
            OutputMode::Directory => stage_tree(&out.dir, &project.layout, out.overwrite)?,
        };
        Ok(staged)
    }

    /// Write rendered projects, all or nothing.
    ///
    /// Every project is staged before any is moved into place. If one cannot
    /// be committed, those already committed are rolled back.
    pub fn write_all(
        &self,
        projects: &[GeneratedProject],
        out: &OutputSpec,
    ) -> Result<Vec<GenerationReport>> {
        let staged = projects
            .iter()
            .map(|project| self.stage(project, out))
            .collect::<Result<Vec<_>>>()?;
        let paths = commit_all(staged)?;
        Ok(projects
            .iter()
            .zip(paths)
            .map(|(project, path)| report(project, out.mode, path))
            .collect())
    }

    /// Write a rendered project.
    pub fn write(&self, project: &GeneratedProject, out: &OutputSpec) -> Result<GenerationReport> {
        let mut reports = self.write_all(std::slice::from_ref(project), out)?;
        reports.pop().ok_or_else(|| {
            GenerateError::InternalInvariant("no report for a written project".to_string())
        })
    }

    /// Full run for one target: read, validate, render, write.
    #[instrument(skip(self, source, out), fields(source = %source.describe()))]
    pub fn generate(
        &self,
        source: &IrSource,
        target_id: &str,
        out: &OutputSpec,
    ) -> Result<GenerationReport> {
        let model = self.load(source)?;
        let project = self.render(&model, target_id)?;
        let report = self.write(&project, out)?;
        info!(path = %report.path.display(), files = report.files, "generated project");
        Ok(report)
    }

    /// Full run for several targets.
    ///
    /// Targets are rendered in parallel. Nothing is written unless every
    /// target renders, and a failed write leaves none of the projects behind.
    /// Duplicates in `targets` are ignored.
    #[instrument(skip(self, source, out), fields(source = %source.describe()))]
    pub fn generate_many(
        &self,
        source: &IrSource,
        targets: &[&str],
        out: &OutputSpec,
    ) -> Result<Vec<GenerationReport>> {
        let mut unique: Vec<&str> = Vec::with_capacity(targets.len());
        for target in targets {
            if !unique.contains(target) {
                unique.push(*target);
            }
        }
        for target in &unique {
            self.registry.resolve(target)?;
        }

        let model = self.load(source)?;
        let projects = unique
            .par_iter()
            .map(|target| self.render(&model, target))
            .collect::<Result<Vec<_>>>()?;

        let reports = self.write_all(&projects, out)?;
        for report in &reports {
            info!(path = %report.path.display(), files = report.files, "generated project");
        }
        Ok(reports)
    }
}

fn report(project: &GeneratedProject, mode: OutputMode, path: PathBuf) -> GenerationReport {
    GenerationReport {
        target: project.target().to_string(),
        root: project.root().to_string(),
        mode,
        path,
        files: project.layout.len(),
        archive_bytes: project.archive.len(),
    }
}

/// Destination a project would be written to, without writing it.
pub fn destination(project: &GeneratedProject, out: &OutputSpec) -> PathBuf {
    let dir: &Path = &out.dir;
    match out.mode {
        OutputMode::Archive => dir.join(project.archive_name()),
        OutputMode::Directory => dir.join(project.root()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login() -> serde_json::Value {
        json!({
            "schema_version": "1.0",
            "screen": { "name": "login" },
            "elements": [
                { "kind": "text_field", "hint": "email" },
                { "kind": "button", "label": "Continue" }
            ]
        })
    }

    #[test]
    fn test_options_builder() {
        let options = GenerateOptions::new()
            .strict()
            .compression_level(3)
            .verify_determinism(false);
        assert_eq!(options.validator, ValidatorOptions::default().strict());
        assert_eq!(options.archive.compression_level, 3);
        assert!(!options.verify_determinism);
        assert!(GenerateOptions::default().verify_determinism);
    }

    #[test]
    fn test_render_is_repeatable() {
        let generator = Generator::with_defaults(GenerateOptions::default());
        let model = generator.validate(&login()).unwrap();
        for target in ["web", "react", "flutter"] {
            let a = generator.render(&model, target).unwrap();
            let b = generator.render(&model, target).unwrap();
            assert_eq!(a.archive, b.archive);
            assert_eq!(a.root(), format!("login-{}", target));
        }
    }

    #[test]
    fn test_strict_rejects_unknown_kind_at_validation() {
        let ir = json!({
            "schema_version": "1.0",
            "screen": { "name": "x" },
            "elements": [ { "kind": "carousel" } ]
        });
        let lenient = Generator::with_defaults(GenerateOptions::default());
        let model = lenient.validate(&ir).unwrap();
        let err = lenient.render(&model, "web").unwrap_err();
        assert_eq!(err.exit_code(), 4);

        let strict = Generator::with_defaults(GenerateOptions::new().strict());
        let err = strict.validate(&ir).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unreadable_source() {
        let generator = Generator::with_defaults(GenerateOptions::default());
        let source = IrSource::Path(PathBuf::from("/definitely/not/here.json"));
        let err = generator.load(&source).unwrap_err();
        assert!(matches!(err, GenerateError::Input { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_destination() {
        let generator = Generator::with_defaults(GenerateOptions::default());
        let model = generator.validate(&login()).unwrap();
        let project = generator.render(&model, "react").unwrap();
        assert_eq!(
            destination(&project, &OutputSpec::archive("/out")),
            PathBuf::from("/out/login-react.zip")
        );
        assert_eq!(
            destination(&project, &OutputSpec::directory("/out")),
            PathBuf::from("/out/login-react")
        );
    }
}
