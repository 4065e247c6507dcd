//! Symbolic icon keys to terminal glyphs.
//!
//! An unknown key resolves to `None`. The renderer draws nothing in that
//! slot and the rest of the topic renders as usual.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct IconRegistry {
    glyphs: HashMap<String, String>,
}

impl IconRegistry {
    pub fn empty() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.glyphs.insert(key.into(), glyph.into());
        self
    }

    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.glyphs.get(key).map(String::as_str)
    }
}

impl Default for IconRegistry {
    fn default() -> Self {
        IconRegistry::empty()
            .with("BookOpen", "📖")
            .with("Scale", "⚖")
            .with("Book", "📕")
    }
}
