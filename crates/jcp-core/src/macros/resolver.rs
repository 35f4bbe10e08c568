use std::collections::HashMap;

use tracing::trace;

use crate::macros::{Definitions, MacroError};

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Resolves `${name}` references against a borrowed definitions mapping.
///
/// The resolver holds no state between calls and can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct MacroResolver<'a> {
    defs: &'a Definitions,
}

impl<'a> MacroResolver<'a> {
    pub fn new(defs: &'a Definitions) -> Self {
        Self { defs }
    }

    /// Fully expand every macro in `text`.
    ///
    /// Rules:
    /// - `${}` is kept literally;
    /// - `${name}` must be defined, and its value is expanded before it is substituted;
    /// - a name that is re-entered while its own value is being expanded is a cycle;
    /// - an unterminated `${`, a `${` inside a name, or a `$` directly before `${` is a syntax error.
    pub fn resolve(&self, text: &str) -> Result<String, MacroError> {
        let mut expanding = Vec::new();
        let mut done = HashMap::new();
        self.expand(text, &mut expanding, &mut done)
    }

    /// Single non-recursive pass over `text`.
    ///
    /// Defined names are replaced by their raw values (which are not scanned
    /// again); undefined names, `${}` and an unterminated `${` are copied through.
    pub fn replace_macros(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while let Some(rel) = text[pos..].find(OPEN) {
            let start = pos + rel;
            let name_start = start + OPEN.len();
            let Some(len) = text[name_start..].find(CLOSE) else {
                break;
            };
            let end = name_start + len;
            if let Some(inner) = text[name_start..end].rfind(OPEN) {
                // `${a ${b}}`: the first `}` closes the inner reference.
                let inner_start = name_start + inner;
                out.push_str(&text[pos..inner_start]);
                pos = inner_start;
                continue;
            }
            out.push_str(&text[pos..start]);
            match self.defs.get(&text[name_start..end]) {
                Some(value) if len > 0 => out.push_str(value),
                _ => out.push_str(&text[start..=end]),
            }
            pos = end + 1;
        }
        out.push_str(&text[pos..]);
        out
    }

    fn expand(
        &self,
        text: &str,
        expanding: &mut Vec<String>,
        done: &mut HashMap<String, String>,
    ) -> Result<String, MacroError> {
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while let Some(rel) = text[pos..].find(OPEN) {
            let start = pos + rel;
            if start > 0 && bytes[start - 1] == b'$' {
                return Err(MacroError::Syntax {
                    position: start - 1,
                    reason: "'$' directly before '${'",
                });
            }

            let name_start = start + OPEN.len();
            let len = text[name_start..]
                .find(CLOSE)
                .ok_or(MacroError::Syntax {
                    position: start,
                    reason: "unterminated '${'",
                })?;
            let end = name_start + len;
            let name = &text[name_start..end];
            out.push_str(&text[pos..start]);
            pos = end + 1;

            if name.is_empty() {
                out.push_str("${}");
                continue;
            }
            if name.contains(OPEN) {
                return Err(MacroError::Syntax {
                    position: start,
                    reason: "'${' inside a macro name",
                });
            }
            if let Some(value) = done.get(name) {
                out.push_str(value);
                continue;
            }
            if expanding.iter().any(|n| n == name) {
                let mut chain = expanding.clone();
                chain.push(name.to_string());
                return Err(MacroError::Cycle { chain });
            }

            let raw = self.defs.get(name).ok_or_else(|| MacroError::Unresolved {
                name: name.to_string(),
            })?;
            expanding.push(name.to_string());
            let value = self.expand(raw, expanding, done)?;
            expanding.pop();

            trace!(name, value = %value, "macro resolved");
            out.push_str(&value);
            done.insert(name.to_string(), value);
        }
        out.push_str(&text[pos..]);
        Ok(out)
    }
}

/// Strictly resolve `text` against `defs`. See [`MacroResolver::resolve`].
pub fn resolve(text: &str, defs: &Definitions) -> Result<String, MacroError> {
    MacroResolver::new(defs).resolve(text)
}

/// Leniently replace top-level macros. See [`MacroResolver::replace_macros`].
pub fn replace_macros(text: &str, defs: &Definitions) -> String {
    MacroResolver::new(defs).replace_macros(text)
}
