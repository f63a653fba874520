//! Identifiers derived from the screen name.
//!
//! Screen names are free text. Anything that ends up as a path segment,
//! package name or class name goes through one of these functions first.

use convert_case::{Case, Casing};
use regex::Regex;
use std::sync::OnceLock;

fn non_slug() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9-]+").expect("valid regex"))
}

fn non_snake() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_]+").expect("valid regex"))
}

fn non_ident() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"))
}

fn squeeze(s: &str, sep: char) -> String {
    let doubled = format!("{}{}", sep, sep);
    let mut out = s.to_string();
    while out.contains(&doubled) {
        out = out.replace(&doubled, &sep.to_string());
    }
    out.trim_matches(sep).to_string()
}

/// Kebab-case slug restricted to `[a-z0-9-]`; `app` when nothing survives.
pub fn slug(name: &str) -> String {
    let kebab = name.to_case(Case::Kebab).to_lowercase();
    let cleaned = squeeze(&non_slug().replace_all(&kebab, ""), '-');
    if cleaned.is_empty() {
        "app".to_string()
    } else {
        cleaned
    }
}

/// Snake-case identifier usable as a Dart package name.
///
/// Always suffixed with `_app` so it can never collide with a dependency
/// such as `flutter`.
pub fn package_snake(name: &str) -> String {
    let snake = name.to_case(Case::Snake).to_lowercase();
    let cleaned = squeeze(&non_snake().replace_all(&snake, ""), '_');
    match cleaned.chars().next() {
        None => "app".to_string(),
        Some(c) if c.is_ascii_digit() => format!("app_{}_app", cleaned),
        Some(_) => format!("{}_app", cleaned),
    }
}

/// npm package name, `<slug>-app`.
pub fn package_kebab(name: &str) -> String {
    format!("{}-app", slug(name))
}

/// PascalCase type name usable in Dart and JavaScript.
pub fn type_name(name: &str) -> String {
    let pascal = name.to_case(Case::Pascal);
    let cleaned = non_ident().replace_all(&pascal, "").to_string();
    match cleaned.chars().next() {
        None => "Generated".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Screen{}", cleaned),
        Some(_) => cleaned,
    }
}
