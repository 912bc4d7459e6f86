use std::ops::Range;

pub const MIN_FONT_SIZE: u16 = 12;
pub const MAX_FONT_SIZE: u16 = 24;
pub const DEFAULT_FONT_SIZE: u16 = 16;

/// Pointer inactivity after which the floating control bar hides.
pub const IDLE_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    Home,
    FileInput,
    DirectInput,
    Reader,
}

impl Default for WindowType {
    fn default() -> Self {
        WindowType::Home
    }
}

/// One blank-line-delimited block of input text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub text: String,
    pub sentences: Vec<String>,
}

/// A contiguous run of paragraph ids (absolute indices into the document).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub paragraphs: Range<usize>,
}

impl Page {
    pub fn new(paragraphs: Range<usize>) -> Self {
        Self { paragraphs }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn contains(&self, paragraph_id: usize) -> bool {
        self.paragraphs.contains(&paragraph_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationKey {
    pub paragraph: usize,
    pub sentence: usize,
}

impl AnnotationKey {
    pub fn new(paragraph: usize, sentence: usize) -> Self {
        Self {
            paragraph,
            sentence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotation {
    pub visible: bool,
    pub original: String,
}

/// Available content area, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// A zero-sized viewport belongs to a container that is not laid out yet.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_default() {
        assert_eq!(Direction::default(), Direction::Forward);
    }

    #[test]
    fn test_window_type_default() {
        assert_eq!(WindowType::default(), WindowType::Home);
    }

    #[test]
    fn test_font_size_bounds() {
        assert!(MIN_FONT_SIZE <= DEFAULT_FONT_SIZE);
        assert!(DEFAULT_FONT_SIZE <= MAX_FONT_SIZE);
    }

    #[test]
    fn test_page_range_helpers() {
        let page = Page::new(3..6);
        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert!(page.contains(3));
        assert!(page.contains(5));
        assert!(!page.contains(6));

        let empty = Page::default();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_annotation_key_ordering() {
        let a = AnnotationKey::new(0, 5);
        let b = AnnotationKey::new(1, 0);
        assert!(a < b);
        assert_eq!(AnnotationKey::new(2, 3), AnnotationKey::new(2, 3));
    }

    #[test]
    fn test_annotation_default_is_hidden() {
        let annotation = Annotation::default();
        assert!(!annotation.visible);
        assert!(annotation.original.is_empty());
    }

    #[test]
    fn test_viewport_is_empty() {
        assert!(Viewport::default().is_empty());
        assert!(Viewport::new(0, 10).is_empty());
        assert!(Viewport::new(10, 0).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
    }
}
