//! Adds target-standard scaffolding around emitted files.
//!
//! Scaffolding depends only on the target and the screen name. Nothing else
//! from the IR reaches these files.

use crate::error::{CodegenError, Result};
use crate::generators::{ScaffoldProfile, TargetInfo, TemplateEngine, Tooling};
use crate::generators::templates::{PUBSPEC, README};
use crate::naming;
use crate::project::{FileContent, ProjectLayout, ProjectTree};
use serde_json::json;
use tracing::debug;

const EDITORCONFIG: &str = "root = true

[*]
charset = utf-8
end_of_line = lf
indent_style = space
indent_size = 2
insert_final_newline = true
trim_trailing_whitespace = true
";

const VITE_CONFIG: &str = "import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
});
";

const VITE_GITIGNORE: &str = "node_modules/
dist/
";

const FLUTTER_GITIGNORE: &str = ".dart_tool/
.packages
.flutter-plugins
.flutter-plugins-dependencies
build/
";

const ANALYSIS_OPTIONS: &str = "include: package:flutter_lints/flutter.yaml
";

/// Combines emitter output with scaffolding into a sorted [`ProjectLayout`].
pub struct ProjectAssembler<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> ProjectAssembler<'a> {
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_builtin_templates()?,
        })
    }

    /// Root directory name for a screen and target: `<screen-slug>-<target>`.
    pub fn root_name(screen_name: &str, target: &str) -> String {
        format!("{}-{}", naming::slug(screen_name), target)
    }

    /// Finalize a project.
    ///
    /// Fails with [`CodegenError::DuplicatePath`] if the emitter already
    /// produced a scaffolding path.
    pub fn assemble(
        &self,
        tree: ProjectTree,
        info: &TargetInfo,
        screen_name: &str,
    ) -> Result<ProjectLayout> {
        let mut files = tree.into_files();

        for (path, content) in self.scaffolding(info, screen_name)? {
            if files.contains_key(&path) {
                return Err(CodegenError::DuplicatePath(path));
            }
            files.insert(path, content);
        }

        let root = Self::root_name(screen_name, info.name);
        debug!(root = %root, files = files.len(), "assembled project");
        Ok(ProjectLayout::new(root, info.name, files))
    }

    fn scaffolding(
        &self,
        info: &TargetInfo,
        screen_name: &str,
    ) -> Result<Vec<(String, FileContent)>> {
        let mut listed: Vec<String> = info.sources.iter().map(|s| s.to_string()).collect();
        let mut files: Vec<(String, FileContent)> = Vec::new();

        match info.scaffold {
            ScaffoldProfile::StaticSite => {
                files.push((".editorconfig".into(), EDITORCONFIG.into()));
            }
            ScaffoldProfile::Vite => {
                files.push(("package.json".into(), self.package_json(screen_name)?.into()));
                files.push(("vite.config.js".into(), VITE_CONFIG.into()));
                files.push((".gitignore".into(), VITE_GITIGNORE.into()));
            }
            ScaffoldProfile::Flutter => {
                let pubspec = self.engine.render(
                    PUBSPEC,
                    &json!({
                        "package": naming::package_snake(screen_name),
                        "description": "A Flutter app generated by uiforge.",
                    }),
                )?;
                files.push(("pubspec.yaml".into(), pubspec.into()));
                files.push(("analysis_options.yaml".into(), ANALYSIS_OPTIONS.into()));
                files.push((".gitignore".into(), FLUTTER_GITIGNORE.into()));
            }
        }

        listed.extend(files.iter().map(|(path, _)| path.clone()));
        listed.push("README.md".to_string());
        listed.sort();

        let commands: &[&str] = match info.tooling {
            Tooling::None => &[],
            Tooling::Optional { commands } => commands,
        };
        let readme = self.engine.render(
            README,
            &json!({
                "title": screen_name,
                "target": info.name,
                "framework": info.framework,
                "files": listed,
                "commands": commands,
            }),
        )?;
        files.push(("README.md".into(), readme.into()));

        Ok(files)
    }

    fn package_json(&self, screen_name: &str) -> Result<String> {
        let manifest = json!({
            "name": naming::package_kebab(screen_name),
            "private": true,
            "version": "0.1.0",
            "type": "module",
            "scripts": {
                "dev": "vite",
                "build": "vite build",
                "preview": "vite preview"
            },
            "dependencies": {
                "react": "^18.3.1",
                "react-dom": "^18.3.1"
            },
            "devDependencies": {
                "@vitejs/plugin-react": "^4.3.1",
                "vite": "^5.4.0"
            }
        });
        let mut out = serde_json::to_string_pretty(&manifest)?;
        out.push('\n');
        Ok(out)
    }
}
