//! Static HTML/CSS/JS emitter.

use super::{
    file, indent, px, unsupported, uses_image, Emitter, LayoutMode, ScaffoldProfile, TargetInfo,
    Tooling, PLACEHOLDER_PNG,
};
use crate::error::Result;
use crate::escape;
use crate::project::ProjectTree;
use uiforge_ir::{Element, ElementKind, ElementPath, IrModel};

const STYLES_CSS: &str = r#":root {
  --primary: #2563eb;
  --radius: 12px;
  --font: system-ui, Arial, sans-serif;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: var(--font);
  color: #0f172a;
}

.screen {
  position: relative;
  display: flex;
  flex-direction: column;
  gap: 12px;
  padding: 16px;
}

.stack {
  position: relative;
  display: flex;
  gap: 8px;
}

.stack-column {
  flex-direction: column;
}

.stack-row {
  flex-direction: row;
  align-items: center;
}

.text {
  margin: 0;
}

.field {
  padding: 10px 12px;
  border: 1px solid #cbd5e1;
  border-radius: var(--radius);
  font: inherit;
}

.button {
  padding: 10px 16px;
  border-radius: var(--radius);
  font: inherit;
  cursor: pointer;
}

.button-primary {
  border: none;
  background: var(--primary);
  color: #ffffff;
}

.button-secondary {
  border: 1px solid var(--primary);
  background: transparent;
  color: var(--primary);
}

.image-placeholder {
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 8px;
  min-height: 120px;
  border: 1px dashed #94a3b8;
  border-radius: var(--radius);
  color: #64748b;
}
"#;

const APP_JS: &str = r#"// Buttons are wired to no-op handlers.
document.querySelectorAll('[data-action="noop"]').forEach((el) => {
  el.addEventListener('click', (event) => {
    event.preventDefault();
  });
});
"#;

/// Plain web emitter: one HTML page, a stylesheet and a script.
pub struct WebEmitter {
    info: TargetInfo,
}

impl WebEmitter {
    pub fn new() -> Self {
        Self {
            info: TargetInfo {
                name: "web",
                framework: "HTML/CSS/JS",
                layout: LayoutMode::Absolute,
                tooling: Tooling::None,
                scaffold: ScaffoldProfile::StaticSite,
                sources: &["app.js", "index.html", "styles.css"],
            },
        }
    }

    /// `id` and geometry attributes shared by every element.
    ///
    /// Bounding boxes are canvas coordinates, so only top-level elements are
    /// positioned absolutely. Nested elements keep their size and flow inside
    /// their stack.
    fn attributes(&self, element: &Element, path: &ElementPath) -> String {
        let mut attrs = String::new();
        if let Some(id) = &element.id {
            attrs.push_str(&format!(" id=\"{}\"", escape::html(id)));
        }
        match element.bounds {
            Some(b) if path.depth() == 0 => attrs.push_str(&format!(
                " style=\"position: absolute; left: {}; top: {}; width: {}; height: {};\"",
                px(b.x),
                px(b.y),
                px(b.width),
                px(b.height)
            )),
            Some(b) => attrs.push_str(&format!(
                " style=\"width: {}; height: {};\"",
                px(b.width),
                px(b.height)
            )),
            None => {}
        }
        attrs
    }

    /// Markup for one element, indented relative to itself.
    fn element_html(&self, element: &Element, path: &ElementPath) -> Result<Vec<String>> {
        let attrs = self.attributes(element, path);
        let lines = match &element.kind {
            ElementKind::Text { text } => {
                vec![format!("<p class=\"text\"{}>{}</p>", attrs, escape::html(text))]
            }
            ElementKind::TextField { hint, secure } => {
                let input_type = if *secure { "password" } else { "text" };
                vec![format!(
                    "<input class=\"field\" type=\"{}\" placeholder=\"{}\"{}>",
                    input_type,
                    escape::html(hint),
                    attrs
                )]
            }
            ElementKind::Button { label, variant } => vec![format!(
                "<button class=\"button button-{}\" type=\"button\" data-action=\"noop\"{}>{}</button>",
                variant.as_str(),
                attrs,
                escape::html(label)
            )],
            ElementKind::ImagePlaceholder { label } => {
                let label = escape::html(label);
                vec![format!(
                    "<div class=\"image-placeholder\" role=\"img\" aria-label=\"{}\"{}><img src=\"assets/placeholder.png\" alt=\"\"><span>{}</span></div>",
                    label, attrs, label
                )]
            }
            ElementKind::Container {
                direction,
                children,
            } => {
                let open = format!("<div class=\"stack stack-{}\"{}>", direction.as_str(), attrs);
                if children.is_empty() {
                    vec![format!("{}</div>", open)]
                } else {
                    let mut lines = vec![open];
                    for (i, child) in children.iter().enumerate() {
                        lines.extend(indent(self.element_html(child, &path.child(i))?, 2));
                    }
                    lines.push("</div>".to_string());
                    lines
                }
            }
            ElementKind::Unrecognized { kind } => return Err(unsupported(kind, path)),
        };
        Ok(lines)
    }

    /// Inline style of the screen root: background and canvas size.
    fn screen_style(&self, model: &IrModel) -> String {
        let screen = model.screen();
        let mut parts = Vec::new();
        if let Some(color) = screen.background {
            parts.push(format!("background-color: {}", color.to_css()));
        }
        if let Some(width) = screen.width {
            parts.push(format!("width: {}", px(width)));
        }
        if let Some(height) = screen.height {
            parts.push(format!("min-height: {}", px(height)));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!(" style=\"{};\"", parts.join("; "))
        }
    }

    fn index_html(&self, model: &IrModel) -> Result<String> {
        let mut body = Vec::new();
        for (i, element) in model.elements().enumerate() {
            body.extend(self.element_html(element, &ElementPath::top(i))?);
        }

        let mut lines = vec![
            "<!DOCTYPE html>".to_string(),
            "<html lang=\"en\">".to_string(),
            "<head>".to_string(),
            "  <meta charset=\"utf-8\">".to_string(),
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string(),
            format!("  <title>{}</title>", escape::html(model.screen_name())),
            "  <link rel=\"stylesheet\" href=\"styles.css\">".to_string(),
            "</head>".to_string(),
            "<body>".to_string(),
            format!("  <main class=\"screen\"{}>", self.screen_style(model)),
        ];
        lines.extend(indent(body, 4));
        lines.push("  </main>".to_string());
        lines.push("  <script src=\"app.js\"></script>".to_string());
        lines.push("</body>".to_string());
        lines.push("</html>".to_string());

        Ok(file(lines))
    }
}

impl Default for WebEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for WebEmitter {
    fn info(&self) -> &TargetInfo {
        &self.info
    }

    fn emit(&self, model: &IrModel) -> Result<ProjectTree> {
        let mut tree = ProjectTree::new();
        tree.insert("index.html", self.index_html(model)?)?;
        tree.insert("styles.css", STYLES_CSS)?;
        tree.insert("app.js", APP_JS)?;
        if uses_image(model) {
            tree.insert("assets/placeholder.png", PLACEHOLDER_PNG.to_vec())?;
        }
        Ok(tree)
    }
}
