use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::Paragraph;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph regex"));

// Terminal punctuation (or a newline) followed by a whitespace run or the end of
// the paragraph. The delimiter itself stays with the sentence before it.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?:\n](?:\s+|$)").expect("valid sentence regex"));

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid quote regex"));

/// A segmented plain-text document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self {
            paragraphs: split_paragraphs(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn paragraph(&self, id: usize) -> Option<&Paragraph> {
        self.paragraphs.get(id)
    }

    pub fn sentence(&self, paragraph: usize, sentence: usize) -> Option<&str> {
        self.paragraphs
            .get(paragraph)
            .and_then(|p| p.sentences.get(sentence))
            .map(String::as_str)
    }

    pub fn sentence_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.sentences.len()).sum()
    }
}

pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| Paragraph {
            text: block.to_string(),
            sentences: split_sentences(block),
        })
        .collect()
}

pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(paragraph) {
        // Every delimiter in the class is a single byte.
        let end = m.start() + 1;
        push_trimmed(&mut sentences, &paragraph[start..end]);
        start = m.end();
    }
    if start < paragraph.len() {
        push_trimmed(&mut sentences, &paragraph[start..]);
    }

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

/// Byte ranges of the `"double-quoted"` spans in `text`, quotes included.
pub fn quoted_ranges(text: &str) -> Vec<Range<usize>> {
    QUOTED.find_iter(text).map(|m| m.range()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_two_paragraphs() {
        let doc = Document::from_text("Hello world.\n\nSecond para!");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.paragraphs[0].text, "Hello world.");
        assert_eq!(doc.paragraphs[1].text, "Second para!");
    }

    #[test]
    fn test_split_sentences_keeps_delimiters() {
        assert_eq!(
            split_sentences("Is this real? Yes it is."),
            vec!["Is this real?", "Yes it is."]
        );
    }

    #[test]
    fn test_split_sentences_all_delimiters() {
        assert_eq!(
            split_sentences("One. Two! Three? Four: five"),
            vec!["One.", "Two!", "Three?", "Four:", "five"]
        );
    }

    #[test]
    fn test_no_split_without_following_whitespace() {
        assert_eq!(split_sentences("Version 1.5 is out"), vec!["Version 1.5 is out"]);
        assert_eq!(split_sentences("e.g. this"), vec!["e.g.", "this"]);
    }

    #[test]
    fn test_newline_followed_by_whitespace_splits() {
        assert_eq!(split_sentences("first line\n  second line"), vec!["first line", "second line"]);
        // A bare newline directly followed by text is not a break.
        assert_eq!(split_sentences("first line\nsecond line"), vec!["first line\nsecond line"]);
    }

    #[test]
    fn test_punctuation_before_newline_splits() {
        assert_eq!(split_sentences("Done.\nNext one"), vec!["Done.", "Next one"]);
    }

    #[test]
    fn test_repeated_punctuation_stays_together() {
        assert_eq!(split_sentences("Wait... what?! Really."), vec!["Wait...", "what?!", "Really."]);
    }

    #[test]
    fn test_paragraph_without_punctuation_is_one_sentence() {
        let doc = Document::from_text("  just some words without an end  ");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.paragraphs[0].sentences, vec!["just some words without an end"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(Document::from_text("").is_empty());
        assert!(Document::from_text("   \n\n \t \n\n").is_empty());
    }

    #[test]
    fn test_blank_line_with_spaces_splits_paragraphs() {
        let doc = Document::from_text("A.\n   \nB.\r\n\r\nC.");
        let texts: Vec<&str> = doc.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["A.", "B.", "C."]);
    }

    #[test]
    fn test_sentence_lookup() {
        let doc = Document::from_text("A. B.\n\nC.");
        assert_eq!(doc.sentence(0, 1), Some("B."));
        assert_eq!(doc.sentence(1, 0), Some("C."));
        assert_eq!(doc.sentence(1, 1), None);
        assert_eq!(doc.sentence(5, 0), None);
        assert_eq!(doc.sentence_count(), 3);
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(
            split_sentences("Ça va? Très bien. 終わり"),
            vec!["Ça va?", "Très bien.", "終わり"]
        );
    }

    #[test]
    fn test_quoted_ranges() {
        let sentence = r#"He said "hello" and "bye"."#;
        let ranges = quoted_ranges(sentence);
        assert_eq!(ranges, vec![8..15, 20..25]);
        assert_eq!(&sentence[ranges[0].clone()], r#""hello""#);
        assert_eq!(&sentence[ranges[1].clone()], r#""bye""#);
    }

    #[test]
    fn test_quoted_ranges_without_quotes() {
        assert!(quoted_ranges("plain").is_empty());
        assert!(quoted_ranges(r#"empty "" quotes"#).is_empty());
        assert!(quoted_ranges(r#"unbalanced "quote"#).is_empty());
    }
}
