use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("template references ${name} but no value was supplied")]
    MissingValue { name: String },
    #[error("bare '$' at byte {offset}; use '$$' for a literal dollar sign")]
    BadPlaceholder { offset: usize },
}

/// Named substitution values for one render. Values are stored as their
/// rendered text, so anything `Display` can be supplied.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Display) -> &mut Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Substitutes `$name` and `${name}` placeholders in `template`.
///
/// Every placeholder must have a value; supplied values without a
/// matching placeholder are ignored. `$$` renders a literal `$`.
pub fn substitute(template: &str, values: &TemplateContext) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut consumed = 0;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let dollar = consumed + pos;
        let after = &rest[pos + 1..];

        let taken = if after.starts_with('$') {
            out.push('$');
            1
        } else if let Some(braced) = after.strip_prefix('{') {
            let end = braced
                .find('}')
                .ok_or(TemplateError::BadPlaceholder { offset: dollar })?;
            let name = &braced[..end];
            if !is_identifier(name) {
                return Err(TemplateError::BadPlaceholder { offset: dollar });
            }
            out.push_str(lookup(values, name)?);
            end + 2
        } else {
            let len = identifier_len(after);
            if len == 0 {
                return Err(TemplateError::BadPlaceholder { offset: dollar });
            }
            out.push_str(lookup(values, &after[..len])?);
            len
        };

        rest = &after[taken..];
        consumed = dollar + 1 + taken;
    }

    out.push_str(rest);
    Ok(out)
}

/// Reads a template file and substitutes the supplied values.
pub fn render_file(
    path: impl AsRef<Path>,
    values: &TemplateContext,
) -> Result<String, TemplateError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.display().to_string(),
        source,
    })?;
    substitute(&raw, values)
}

fn lookup<'a>(values: &'a TemplateContext, name: &str) -> Result<&'a str, TemplateError> {
    values.get(name).ok_or_else(|| TemplateError::MissingValue {
        name: name.to_string(),
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !valid {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}
