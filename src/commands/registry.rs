//! Command registry and text resolver.
//!
//! The registry maps lookup keys to command definitions. Every command
//! contributes its canonical name and its alias (if any); a key that is
//! case-insensitive is also registered in lower case, ahead of the
//! original spelling. Keys keep insertion order, which drives both the
//! prefix search and the help listing.
//!
//! Resolution, first match wins:
//!
//! 1. blank input resolves to nothing;
//! 2. whitespace is collapsed and the statement stripped (`;`, ends);
//! 3. exact key, then lower-cased text against case-insensitive keys;
//! 4. first key the text starts with, followed by a word boundary, so
//!    `show index Singers` finds `SHOW INDEX`.

use crate::query::{normalize_whitespace, strip_statement};

use super::definitions::{CommandDef, COMMANDS};

/// A lookup key and the command it reaches.
#[derive(Debug, Clone)]
struct Entry<'a> {
    key: String,
    case_sensitive: bool,
    command: &'a CommandDef,
}

/// Ordered key → command mapping, immutable after construction.
#[derive(Debug, Clone)]
pub struct Registry<'a> {
    entries: Vec<Entry<'a>>,
}

impl Registry<'static> {
    /// Registry of the built-in commands.
    pub fn builtin() -> Self {
        Self::new(COMMANDS)
    }
}

impl<'a> Registry<'a> {
    /// Builds a registry from commands in registration order.
    pub fn new(commands: &'a [CommandDef]) -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(commands.len() * 3),
        };

        for command in commands {
            let (name, name_cs) = command.identity();
            registry.register(name, name_cs, command);
            if let Some((alias, alias_cs)) = command.alias() {
                registry.register(alias, alias_cs, command);
            }
        }

        registry
    }

    fn register(&mut self, key: &str, case_sensitive: bool, command: &'a CommandDef) {
        if !case_sensitive {
            self.insert(key.to_lowercase(), false, command);
        }
        self.insert(key.to_string(), case_sensitive, command);
    }

    /// Inserts or, for an existing key, rebinds it in place.
    fn insert(&mut self, key: String, case_sensitive: bool, command: &'a CommandDef) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.case_sensitive = case_sensitive;
                entry.command = command;
            }
            None => self.entries.push(Entry {
                key,
                case_sensitive,
                command,
            }),
        }
    }

    /// Looks up a key verbatim.
    pub fn get(&self, key: &str) -> Option<&'a CommandDef> {
        self.entry(key).map(|e| e.command)
    }

    fn entry(&self, key: &str) -> Option<&Entry<'a>> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// All lookup keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Distinct commands in first-registration order.
    pub fn commands(&self) -> Vec<&'a CommandDef> {
        let mut seen: Vec<&'a CommandDef> = Vec::new();
        for entry in &self.entries {
            if !seen.iter().any(|c| std::ptr::eq(*c, entry.command)) {
                seen.push(entry.command);
            }
        }
        seen
    }

    /// Resolves input text to a command, or `None` when the text should be
    /// treated as SQL.
    pub fn resolve(&self, text: &str) -> Option<&'a CommandDef> {
        if text.trim().is_empty() {
            return None;
        }

        let normalized = normalize_whitespace(text);
        let text = strip_statement(&normalized);
        if text.is_empty() {
            return None;
        }

        self.find_exact(text).or_else(|| self.find_prefix(text))
    }

    fn find_exact(&self, text: &str) -> Option<&'a CommandDef> {
        if let Some(command) = self.get(text) {
            return Some(command);
        }

        // Only keys registered as case-insensitive may be reached by a
        // lowered match; a case-sensitive alias like `\dt` must not answer
        // to `\DT` even though its command's canonical name is
        // case-insensitive.
        let lowered = text.to_lowercase();
        self.entry(&lowered)
            .filter(|e| !e.case_sensitive && !e.command.case_sensitive)
            .map(|e| e.command)
    }

    fn find_prefix(&self, text: &str) -> Option<&'a CommandDef> {
        let lowered = text.to_lowercase();

        self.entries
            .iter()
            .find(|entry| {
                if entry.case_sensitive {
                    starts_with_word(text, &entry.key)
                } else {
                    starts_with_word(&lowered, &entry.key.to_lowercase())
                }
            })
            .map(|e| e.command)
    }
}

/// True if `text` starts with `key` and the key is not immediately followed
/// by another word character.
fn starts_with_word(text: &str, key: &str) -> bool {
    match text.strip_prefix(key) {
        Some(rest) => rest
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_')),
        None => false,
    }
}
