use std::ops::Range;

use textwrap::core::{Fragment, display_width};
use textwrap::wrap_algorithms::wrap_first_fit;

use crate::document::quoted_ranges;
use crate::models::{MIN_FONT_SIZE, Paragraph};
use crate::pagination::Measure;

/// Blank rows rendered below every paragraph.
pub const PARAGRAPH_SPACING: u16 = 1;

/// A word tagged with the sentence it belongs to. Quote ranges are computed
/// over the whole sentence, so a quote keeps its colour across line breaks.
#[derive(Debug, Clone, PartialEq)]
struct Word<'a> {
    text: &'a str,
    sentence: usize,
    width: usize,
    /// Byte ranges of `text` inside a quote.
    quoted: Vec<Range<usize>>,
    /// Whether the space before this word falls inside a quote.
    space_quoted: bool,
}

impl<'a> Word<'a> {
    fn split(sentence: usize, text: &'a str) -> Vec<Word<'a>> {
        let quotes = quoted_ranges(text);
        text.split_whitespace()
            .map(|word| {
                let start = word.as_ptr() as usize - text.as_ptr() as usize;
                let end = start + word.len();
                let quoted = quotes
                    .iter()
                    .filter(|q| q.start < end && q.end > start)
                    .map(|q| q.start.max(start) - start..q.end.min(end) - start)
                    .collect();
                let space_quoted = quotes.iter().any(|q| q.start < start && q.end >= start);
                Word {
                    text: word,
                    sentence,
                    width: display_width(word),
                    quoted,
                    space_quoted,
                }
            })
            .collect()
    }
}

impl Fragment for Word<'_> {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn whitespace_width(&self) -> f64 {
        1.0
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// A run of one sentence's words placed on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceSpan {
    pub sentence: usize,
    pub col: u16,
    pub text: String,
    /// Sorted, non-overlapping byte ranges of `text` inside a quote.
    pub quoted: Vec<Range<usize>>,
}

impl SentenceSpan {
    fn new(sentence: usize, col: u16) -> Self {
        Self {
            sentence,
            col,
            text: String::new(),
            quoted: Vec::new(),
        }
    }

    pub fn width(&self) -> u16 {
        display_width(&self.text) as u16
    }

    /// The span's text cut into `(segment, quoted)` pieces.
    pub fn segments(&self) -> Vec<(&str, bool)> {
        let mut segments = Vec::new();
        let mut last = 0;
        for range in &self.quoted {
            if range.start > last {
                segments.push((&self.text[last..range.start], false));
            }
            segments.push((&self.text[range.clone()], true));
            last = range.end;
        }
        if last < self.text.len() {
            segments.push((&self.text[last..], false));
        }
        segments
    }

    fn push_word(&mut self, word: &Word) {
        if !self.text.is_empty() {
            if word.space_quoted {
                self.mark_quoted(self.text.len()..self.text.len() + 1);
            }
            self.text.push(' ');
        }
        let offset = self.text.len();
        self.text.push_str(word.text);
        for range in &word.quoted {
            self.mark_quoted(range.start + offset..range.end + offset);
        }
    }

    fn mark_quoted(&mut self, range: Range<usize>) {
        match self.quoted.last_mut() {
            Some(last) if last.end == range.start => last.end = range.end,
            _ => self.quoted.push(range),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaidOutLine {
    pub spans: Vec<SentenceSpan>,
}

impl LaidOutLine {
    /// Sentence under column `col`, counting the gap after a span as part of it.
    pub fn sentence_at(&self, col: u16) -> Option<usize> {
        self.spans
            .iter()
            .find(|span| col >= span.col && col <= span.col + span.width())
            .map(|span| span.sentence)
    }
}

/// Characters per line for a content width at a given font size. Font size
/// `MIN_FONT_SIZE` uses the whole width; larger sizes narrow the column.
pub fn columns_for(width: u16, font_size: u16) -> u16 {
    let font_size = font_size.max(1) as u32;
    let columns = width as u32 * MIN_FONT_SIZE as u32 / font_size;
    columns.clamp(1, u16::MAX as u32) as u16
}

/// Word-wraps the given `(sentence index, text)` pairs as one flowing run of
/// text, first-fit, `columns` cells wide. Words wider than a line overflow it.
pub fn wrap_sentences<'a, I>(sentences: I, columns: u16) -> Vec<LaidOutLine>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let words: Vec<Word> = sentences
        .into_iter()
        .flat_map(|(sentence, text)| Word::split(sentence, text))
        .collect();

    if words.is_empty() {
        return Vec::new();
    }

    let line_widths = [columns.max(1) as f64];
    wrap_first_fit(&words, &line_widths)
        .into_iter()
        .map(|line| {
            let mut laid_out = LaidOutLine::default();
            let mut col = 0usize;
            for word in line {
                let same_sentence = laid_out
                    .spans
                    .last()
                    .is_some_and(|span| span.sentence == word.sentence);
                if !same_sentence {
                    let start = col.min(u16::MAX as usize) as u16;
                    laid_out.spans.push(SentenceSpan::new(word.sentence, start));
                }
                if let Some(span) = laid_out.spans.last_mut() {
                    span.push_word(word);
                }
                col += word.width + 1;
            }
            laid_out
        })
        .collect()
}

pub fn wrap_paragraph(paragraph: &Paragraph, columns: u16) -> Vec<LaidOutLine> {
    wrap_sentences(
        paragraph
            .sentences
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.as_str())),
        columns,
    )
}

/// Measures paragraphs in terminal rows, the way the board renders them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl Measure for CellMeasure {
    fn measure(&self, paragraph: &Paragraph, width: u16, font_size: u16) -> u16 {
        let columns = columns_for(width, font_size);
        let lines = wrap_paragraph(paragraph, columns).len();
        (lines.min(u16::MAX as usize) as u16).saturating_add(PARAGRAPH_SPACING)
    }
}

pub fn measure_cells(paragraph: &Paragraph, width: u16, font_size: u16) -> u16 {
    CellMeasure.measure(paragraph, width, font_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::models::MAX_FONT_SIZE;

    fn line_text(line: &LaidOutLine) -> String {
        line.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_columns_for_font_sizes() {
        assert_eq!(columns_for(60, MIN_FONT_SIZE), 60);
        assert_eq!(columns_for(60, MAX_FONT_SIZE), 30);
        assert_eq!(columns_for(60, 16), 45);
        assert_eq!(columns_for(0, 16), 1);
    }

    #[test]
    fn test_wrap_sentences_fits_width() {
        let doc = Document::from_text("The quick brown fox. Jumps over the lazy dog.");
        let lines = wrap_paragraph(&doc.paragraphs[0], 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line_text(line).chars().count() <= 20, "too wide: {:?}", line);
        }
    }

    #[test]
    fn test_spans_track_sentences_and_columns() {
        let lines = wrap_sentences([(0, "Hi there."), (1, "Bye.")], 80);
        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].sentence, spans[0].col), (0, 0));
        assert_eq!(spans[0].text, "Hi there.");
        assert_eq!((spans[1].sentence, spans[1].col), (1, 10));
        assert_eq!(spans[1].text, "Bye.");
        assert!(spans.iter().all(|span| span.quoted.is_empty()));
    }

    #[test]
    fn test_quote_keeps_marking_across_lines() {
        let lines = wrap_sentences([(0, r#"She said "go home now" loudly."#)], 12);
        let segments: Vec<Vec<(&str, bool)>> =
            lines.iter().map(|line| line.spans[0].segments()).collect();
        assert_eq!(
            segments,
            vec![
                vec![("She said ", false), (r#""go"#, true)],
                vec![(r#"home now""#, true)],
                vec![("loudly.", false)],
            ]
        );
    }

    #[test]
    fn test_quote_inside_word_marks_only_the_quote() {
        let lines = wrap_sentences([(0, r#"Say "hi". Then"#)], 40);
        assert_eq!(
            lines[0].spans[0].segments(),
            vec![("Say ", false), (r#""hi""#, true), (". Then", false)]
        );
    }

    #[test]
    fn test_sentence_at_column() {
        let lines = wrap_sentences([(0, "Hi there."), (1, "Bye.")], 80);
        assert_eq!(lines[0].sentence_at(0), Some(0));
        assert_eq!(lines[0].sentence_at(9), Some(0));
        assert_eq!(lines[0].sentence_at(10), Some(1));
        assert_eq!(lines[0].sentence_at(14), Some(1));
        assert_eq!(lines[0].sentence_at(30), None);
    }

    #[test]
    fn test_long_word_overflows_on_own_line() {
        let lines = wrap_sentences([(0, "a supercalifragilistic b")], 5);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_empty_input_has_no_lines() {
        assert!(wrap_sentences(std::iter::empty(), 10).is_empty());
    }

    #[test]
    fn test_cell_measure_counts_spacing() {
        let doc = Document::from_text("Short.");
        assert_eq!(CellMeasure.measure(&doc.paragraphs[0], 40, MIN_FONT_SIZE), 2);
    }

    #[test]
    fn test_cell_measure_grows_with_font_size() {
        let doc = Document::from_text(
            "A fairly long paragraph of text that will need to wrap across several lines. \
             It keeps going for a while so that font changes matter.",
        );
        let small = CellMeasure.measure(&doc.paragraphs[0], 40, MIN_FONT_SIZE);
        let large = CellMeasure.measure(&doc.paragraphs[0], 40, MAX_FONT_SIZE);
        assert!(large > small);
    }
}
