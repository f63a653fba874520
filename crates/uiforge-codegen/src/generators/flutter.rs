//! Flutter (Material) emitter.

use super::{file, indent, unsupported, Emitter, LayoutMode, ScaffoldProfile, TargetInfo, Tooling};
use crate::error::Result;
use crate::escape::dart_string;
use crate::naming;
use crate::project::ProjectTree;
use uiforge_ir::{ButtonVariant, Direction, Element, ElementKind, ElementPath, IrModel};

/// Flutter emitter producing a single `lib/main.dart`.
pub struct FlutterEmitter {
    info: TargetInfo,
}

/// Prefix the first line of a widget with `name: ` and terminate it with a comma.
fn named(name: &str, mut widget: Vec<String>) -> Vec<String> {
    if let Some(first) = widget.first_mut() {
        *first = format!("{}: {}", name, first);
    }
    item(widget)
}

/// Terminate a widget expression with a comma, for argument and list positions.
fn item(mut widget: Vec<String>) -> Vec<String> {
    if let Some(last) = widget.last_mut() {
        last.push(',');
    }
    widget
}

impl FlutterEmitter {
    pub fn new() -> Self {
        Self {
            info: TargetInfo {
                name: "flutter",
                framework: "Flutter (Material)",
                layout: LayoutMode::Flow,
                tooling: Tooling::Optional {
                    commands: &["flutter pub get", "flutter analyze", "flutter run"],
                },
                scaffold: ScaffoldProfile::Flutter,
                sources: &["lib/main.dart"],
            },
        }
    }

    /// Widget expression for one element, without the trailing comma.
    fn widget(&self, element: &Element, path: &ElementPath) -> Result<Vec<String>> {
        let key = element
            .id
            .as_ref()
            .map(|id| format!("key: const ValueKey({}),", dart_string(id)));

        let mut args: Vec<String> = key.iter().cloned().collect();
        let lines = match &element.kind {
            ElementKind::Text { text } => {
                return Ok(match &element.id {
                    Some(id) => vec![format!(
                        "Text({}, key: const ValueKey({}))",
                        dart_string(text),
                        dart_string(id)
                    )],
                    None => vec![format!("Text({})", dart_string(text))],
                });
            }
            ElementKind::TextField { hint, secure } => {
                if *secure {
                    args.push("obscureText: true,".to_string());
                }
                args.push(format!(
                    "decoration: InputDecoration(hintText: {}),",
                    dart_string(hint)
                ));
                self.call("TextField", args)
            }
            ElementKind::Button { label, variant } => {
                let widget = match variant {
                    ButtonVariant::Primary => "ElevatedButton",
                    ButtonVariant::Secondary => "OutlinedButton",
                };
                args.push("onPressed: () {},".to_string());
                args.push(format!("child: Text({}),", dart_string(label)));
                self.call(widget, args)
            }
            ElementKind::ImagePlaceholder { label } => {
                args.extend([
                    "height: 120,".to_string(),
                    "alignment: Alignment.center,".to_string(),
                    "decoration: BoxDecoration(".to_string(),
                    "  border: Border.all(color: Colors.black26),".to_string(),
                    "  borderRadius: BorderRadius.circular(12),".to_string(),
                    "),".to_string(),
                    format!("child: Text({}),", dart_string(label)),
                ]);
                self.call("Container", args)
            }
            ElementKind::Container {
                direction,
                children,
            } => {
                let mut items = Vec::new();
                for (i, child) in children.iter().enumerate() {
                    let widget = self.widget(child, &path.child(i))?;
                    let widget = match direction {
                        Direction::Column => widget,
                        Direction::Row => self.call("Expanded", named("child", widget)),
                    };
                    items.extend(indent(item(widget), 2));
                }
                let layout = match direction {
                    Direction::Column => {
                        args.push("crossAxisAlignment: CrossAxisAlignment.stretch,".to_string());
                        "Column"
                    }
                    Direction::Row => "Row",
                };
                if items.is_empty() {
                    args.push("children: const [],".to_string());
                } else {
                    args.push("children: [".to_string());
                    args.extend(items);
                    args.push("],".to_string());
                }
                self.call(layout, args)
            }
            ElementKind::Unrecognized { kind } => return Err(unsupported(kind, path)),
        };
        Ok(lines)
    }

    /// `name(` + indented argument lines + `)`.
    fn call(&self, name: &str, args: Vec<String>) -> Vec<String> {
        let mut lines = vec![format!("{}(", name)];
        lines.extend(indent(args, 2));
        lines.push(")".to_string());
        lines
    }

    fn main_dart(&self, model: &IrModel) -> Result<String> {
        let mut items = Vec::new();
        for (i, element) in model.elements().enumerate() {
            items.extend(item(self.widget(element, &ElementPath::top(i))?));
        }

        let title = dart_string(model.screen_name());
        let screen = format!("{}Screen", naming::type_name(model.screen_name()));

        let mut lines = vec![
            "import 'package:flutter/material.dart';".to_string(),
            String::new(),
            "void main() {".to_string(),
            "  runApp(const GeneratedApp());".to_string(),
            "}".to_string(),
            String::new(),
            "class GeneratedApp extends StatelessWidget {".to_string(),
            "  const GeneratedApp({super.key});".to_string(),
            String::new(),
            "  @override".to_string(),
            "  Widget build(BuildContext context) {".to_string(),
            "    return MaterialApp(".to_string(),
            format!("      title: {},", title),
            "      debugShowCheckedModeBanner: false,".to_string(),
            "      theme: ThemeData(".to_string(),
            "        colorSchemeSeed: const Color(0xFF2563EB),".to_string(),
            "        useMaterial3: true,".to_string(),
            "      ),".to_string(),
            format!("      home: const {}(),", screen),
            "    );".to_string(),
            "  }".to_string(),
            "}".to_string(),
            String::new(),
            format!("class {} extends StatelessWidget {{", screen),
            format!("  const {}({{super.key}});", screen),
            String::new(),
            "  @override".to_string(),
            "  Widget build(BuildContext context) {".to_string(),
            "    return Scaffold(".to_string(),
        ];
        if let Some(color) = model.background_color() {
            lines.push(format!(
                "      backgroundColor: const Color(0x{:08X}),",
                color.to_argb()
            ));
        }
        lines.push(format!("      appBar: AppBar(title: const Text({})),", title));
        lines.push("      body: ListView(".to_string());
        lines.push("        padding: const EdgeInsets.all(16),".to_string());
        if items.is_empty() {
            lines.push("        children: const [],".to_string());
        } else {
            lines.push("        children: [".to_string());
            lines.extend(indent(items, 10));
            lines.push("        ],".to_string());
        }
        lines.push("      ),".to_string());
        lines.push("    );".to_string());
        lines.push("  }".to_string());
        lines.push("}".to_string());

        Ok(file(lines))
    }
}

impl Default for FlutterEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for FlutterEmitter {
    fn info(&self) -> &TargetInfo {
        &self.info
    }

    fn emit(&self, model: &IrModel) -> Result<ProjectTree> {
        let mut tree = ProjectTree::new();
        tree.insert("lib/main.dart", self.main_dart(model)?)?;
        Ok(tree)
    }
}
