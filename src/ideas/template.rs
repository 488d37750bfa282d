use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unresolved template placeholders: {}", .0.join(", "))]
    Unresolved(Vec<String>),
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Text with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Replaces every occurrence of every placeholder. Values are inserted
    /// literally and never re-scanned.
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String, TemplateError> {
        let mut missing = BTreeSet::new();

        let rendered = placeholder_pattern().replace_all(&self.source, |caps: &Captures| {
            let name = &caps[1];
            match values.get(name) {
                Some(value) => value.clone(),
                None => {
                    missing.insert(name.to_string());
                    caps[0].to_string()
                }
            }
        });

        if missing.is_empty() {
            Ok(rendered.into_owned())
        } else {
            Err(TemplateError::Unresolved(missing.into_iter().collect()))
        }
    }
}
