//! Placeholder substitution for template bodies, file names and source ids
//!
//! Supported placeholders:
//! - `{{name}}` - the resource name, verbatim
//! - `{{Name}}` - the resource name with its first letter upper-cased
//! - `{{project}}` - the project (package) name
//! - `{{ext}}` - the source file extension (`js` or `ts`)
//!
//! Any other `{{...}}` sequence is left as is.

use regex_lite::Regex;
use std::sync::OnceLock;

pub const NAME: &str = "{{name}}";
pub const PASCAL_NAME: &str = "{{Name}}";
pub const PROJECT: &str = "{{project}}";
pub const EXT: &str = "{{ext}}";

/// Values substituted into templates
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    pub name: Option<String>,
    pub project: Option<String>,
    pub ext: Option<&'static str>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_ext(mut self, ext: &'static str) -> Self {
        self.ext = Some(ext);
        self
    }

    /// Substitute every bound placeholder in `template`
    pub fn apply(&self, template: &str) -> String {
        let mut out = template.to_string();
        if let Some(name) = &self.name {
            out = out.replace(NAME, name).replace(PASCAL_NAME, &pascal(name));
        }
        if let Some(project) = &self.project {
            out = out.replace(PROJECT, project);
        }
        if let Some(ext) = self.ext {
            out = out.replace(EXT, ext);
        }
        out
    }
}

/// Substitute `name` for the resource placeholders in `template`
pub fn bind(template: &str, name: &str) -> String {
    Bindings::new().with_name(name).apply(template)
}

/// Upper-case the first character, leaving the rest untouched
pub fn pascal(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Whether `name` can be used as a JavaScript identifier
///
/// Binding does not enforce this; a name that fails here produces
/// generated code that does not parse.
pub fn is_identifier(name: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    let ident = IDENT.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
    });
    ident.is_match(name) && !RESERVED.contains(&name)
}
