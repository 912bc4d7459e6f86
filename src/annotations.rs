use std::collections::HashMap;

use crate::models::{Annotation, AnnotationKey};

/// Per-sentence annotation visibility, keyed by absolute paragraph id.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    entries: HashMap<AnnotationKey, Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the annotation for `key`, replacing any previous entry.
    pub fn reveal(&mut self, key: AnnotationKey, text: impl Into<String>) {
        self.entries.insert(
            key,
            Annotation {
                visible: true,
                original: text.into(),
            },
        );
    }

    /// Hides the annotation for `key`. The stored text is kept.
    pub fn hide(&mut self, key: AnnotationKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.visible = false;
        }
    }

    /// Reveals a hidden (or absent) annotation, hides a visible one. Returns the
    /// new visibility.
    pub fn toggle(&mut self, key: AnnotationKey, text: impl Into<String>) -> bool {
        if self.is_visible(key) {
            self.hide(key);
            false
        } else {
            self.reveal(key, text);
            true
        }
    }

    pub fn is_visible(&self, key: AnnotationKey) -> bool {
        self.entries.get(&key).is_some_and(|a| a.visible)
    }

    pub fn get(&self, key: AnnotationKey) -> Option<&Annotation> {
        self.entries.get(&key)
    }

    /// Text of a visible annotation.
    pub fn visible_text(&self, key: AnnotationKey) -> Option<&str> {
        self.entries
            .get(&key)
            .filter(|a| a.visible)
            .map(|a| a.original.as_str())
    }

    pub fn visible_count(&self) -> usize {
        self.entries.values().filter(|a| a.visible).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
