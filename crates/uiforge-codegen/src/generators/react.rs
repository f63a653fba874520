//! React (Vite) emitter.

use super::{
    file, indent, unsupported, uses_image, Emitter, LayoutMode, ScaffoldProfile, TargetInfo,
    Tooling, PLACEHOLDER_PNG,
};
use crate::error::Result;
use crate::escape;
use crate::project::ProjectTree;
use uiforge_ir::{Element, ElementKind, ElementPath, IrModel};

const MAIN_JSX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App.jsx';

ReactDOM.createRoot(document.getElementById('root')).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
"#;

const INDEX_CSS: &str = r#":root {
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
  display: flex;
  flex-direction: column;
  gap: 12px;
  min-height: 100vh;
  padding: 16px;
}

.stack {
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

/// React emitter producing a Vite project with a single `App` component.
pub struct ReactEmitter {
    info: TargetInfo,
}

impl ReactEmitter {
    pub fn new() -> Self {
        Self {
            info: TargetInfo {
                name: "react",
                framework: "React 18 + Vite",
                layout: LayoutMode::Flow,
                tooling: Tooling::Optional {
                    commands: &["npm install", "npm run dev"],
                },
                scaffold: ScaffoldProfile::Vite,
                sources: &["index.html", "src/App.jsx", "src/index.css", "src/main.jsx"],
            },
        }
    }

    fn id_attr(&self, element: &Element) -> String {
        match &element.id {
            Some(id) => format!(" id={{{}}}", escape::js_string(id)),
            None => String::new(),
        }
    }

    /// JSX for one element.
    fn element_jsx(&self, element: &Element, path: &ElementPath) -> Result<Vec<String>> {
        let id = self.id_attr(element);
        let lines = match &element.kind {
            ElementKind::Text { text } => vec![format!(
                "<p className=\"text\"{}>{{{}}}</p>",
                id,
                escape::js_string(text)
            )],
            ElementKind::TextField { hint, secure } => {
                let input_type = if *secure { "password" } else { "text" };
                vec![format!(
                    "<input className=\"field\" type=\"{}\" placeholder={{{}}}{} />",
                    input_type,
                    escape::js_string(hint),
                    id
                )]
            }
            ElementKind::Button { label, variant } => vec![format!(
                "<button className=\"button button-{}\" type=\"button\" onClick={{noop}}{}>{{{}}}</button>",
                variant.as_str(),
                id,
                escape::js_string(label)
            )],
            ElementKind::ImagePlaceholder { label } => {
                let label = escape::js_string(label);
                vec![
                    format!(
                        "<div className=\"image-placeholder\" role=\"img\" aria-label={{{}}}{}>",
                        label, id
                    ),
                    "  <img src=\"/placeholder.png\" alt=\"\" />".to_string(),
                    format!("  <span>{{{}}}</span>", label),
                    "</div>".to_string(),
                ]
            }
            ElementKind::Container {
                direction,
                children,
            } => {
                let open = format!(
                    "<div className=\"stack stack-{}\"{}>",
                    direction.as_str(),
                    id
                );
                let mut lines = vec![open];
                for (i, child) in children.iter().enumerate() {
                    lines.extend(indent(self.element_jsx(child, &path.child(i))?, 2));
                }
                lines.push("</div>".to_string());
                lines
            }
            ElementKind::Unrecognized { kind } => return Err(unsupported(kind, path)),
        };
        Ok(lines)
    }

    fn app_jsx(&self, model: &IrModel) -> Result<String> {
        let mut body = Vec::new();
        for (i, element) in model.elements().enumerate() {
            body.extend(self.element_jsx(element, &ElementPath::top(i))?);
        }

        let main = match model.background_color() {
            Some(color) => format!(
                "<main className=\"screen\" style={{{{ backgroundColor: '{}' }}}}>",
                color.to_css()
            ),
            None => "<main className=\"screen\">".to_string(),
        };

        let mut lines = vec![
            "import './index.css';".to_string(),
            String::new(),
            "const noop = () => {};".to_string(),
            String::new(),
            "export default function App() {".to_string(),
            "  return (".to_string(),
            format!("    {}", main),
        ];
        lines.extend(indent(body, 6));
        lines.push("    </main>".to_string());
        lines.push("  );".to_string());
        lines.push("}".to_string());

        Ok(file(lines))
    }

    fn index_html(&self, model: &IrModel) -> String {
        file(vec![
            "<!DOCTYPE html>".to_string(),
            "<html lang=\"en\">".to_string(),
            "<head>".to_string(),
            "  <meta charset=\"utf-8\">".to_string(),
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string(),
            format!("  <title>{}</title>", escape::html(model.screen_name())),
            "</head>".to_string(),
            "<body>".to_string(),
            "  <div id=\"root\"></div>".to_string(),
            "  <script type=\"module\" src=\"/src/main.jsx\"></script>".to_string(),
            "</body>".to_string(),
            "</html>".to_string(),
        ])
    }
}

impl Default for ReactEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for ReactEmitter {
    fn info(&self) -> &TargetInfo {
        &self.info
    }

    fn emit(&self, model: &IrModel) -> Result<ProjectTree> {
        // Render the element tree first so an unsupported kind fails before
        // anything is added.
        let app = self.app_jsx(model)?;

        let mut tree = ProjectTree::new();
        tree.insert("index.html", self.index_html(model))?;
        tree.insert("src/main.jsx", MAIN_JSX)?;
        tree.insert("src/App.jsx", app)?;
        tree.insert("src/index.css", INDEX_CSS)?;
        if uses_image(model) {
            tree.insert("public/placeholder.png", PLACEHOLDER_PNG.to_vec())?;
        }
        Ok(tree)
    }
}
