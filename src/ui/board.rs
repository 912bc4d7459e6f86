use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::annotations::AnnotationStore;
use crate::document::Document;
use crate::layout::{LaidOutLine, PARAGRAPH_SPACING, columns_for, wrap_sentences};
use crate::models::{AnnotationKey, Page};
use crate::ui::theme::Theme;

/// Innermost element under a click. An annotation box shadows the sentence
/// text around it, so a click that hides a box never also reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Sentence(AnnotationKey),
    Annotation(AnnotationKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardItem {
    Text {
        paragraph: usize,
        line: LaidOutLine,
    },
    Annotation {
        key: AnnotationKey,
        lines: Vec<String>,
    },
}

/// An item placed at a row offset from the top of the content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    pub row: u16,
    pub height: u16,
    pub item: BoardItem,
}

/// Positions of everything on one page, shared by rendering and hit-testing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLayout {
    pub x_offset: u16,
    pub columns: u16,
    pub items: Vec<PlacedItem>,
}

impl PageLayout {
    /// Target under a cell given relative to the content area.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<ClickTarget> {
        let placed = self
            .items
            .iter()
            .find(|item| row >= item.row && row < item.row.saturating_add(item.height))?;
        let col = col.checked_sub(self.x_offset)?;

        match &placed.item {
            BoardItem::Annotation { key, .. } => {
                (col < self.columns).then_some(ClickTarget::Annotation(*key))
            }
            BoardItem::Text { paragraph, line } => line
                .sentence_at(col)
                .map(|sentence| ClickTarget::Sentence(AnnotationKey::new(*paragraph, sentence))),
        }
    }
}

/// Board widget for rendering one page of the document
pub struct Board<'a> {
    document: &'a Document,
    page: Option<&'a Page>,
    annotations: Option<&'a AnnotationStore>,
    cursor: Option<AnnotationKey>,
    font_size: u16,
}

impl<'a> Board<'a> {
    pub fn new(document: &'a Document, font_size: u16) -> Self {
        Self {
            document,
            page: None,
            annotations: None,
            cursor: None,
            font_size,
        }
    }

    pub fn with_page(mut self, page: Option<&'a Page>) -> Self {
        self.page = page;
        self
    }

    pub fn with_annotations(mut self, annotations: &'a AnnotationStore) -> Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn with_cursor(mut self, cursor: Option<AnnotationKey>) -> Self {
        self.cursor = cursor;
        self
    }

    fn annotation_text(&self, key: AnnotationKey) -> Option<&'a str> {
        self.annotations.and_then(|store| store.visible_text(key))
    }

    /// Lays the page out for a content area `width` cells wide. Revealed
    /// annotations sit directly below their sentence and the paragraph text
    /// resumes on the next row.
    pub fn layout(&self, width: u16) -> PageLayout {
        let columns = columns_for(width, self.font_size).min(width.max(1));
        let mut layout = PageLayout {
            x_offset: width.saturating_sub(columns) / 2,
            columns,
            items: Vec::new(),
        };
        let Some(page) = self.page else {
            return layout;
        };

        let mut row: u16 = 0;
        for id in page.paragraphs.clone() {
            let Some(paragraph) = self.document.paragraph(id) else {
                continue;
            };

            let mut run: Vec<(usize, &str)> = Vec::new();
            for (index, sentence) in paragraph.sentences.iter().enumerate() {
                run.push((index, sentence.as_str()));
                let key = AnnotationKey::new(id, index);
                if let Some(text) = self.annotation_text(key) {
                    Self::place_text(&mut layout, &mut row, id, &run, columns);
                    run.clear();

                    let inner = columns.saturating_sub(4).max(1) as usize;
                    let lines: Vec<String> = textwrap::wrap(text, inner)
                        .into_iter()
                        .map(|l| l.into_owned())
                        .collect();
                    let height = (lines.len() as u16).saturating_add(2);
                    layout.items.push(PlacedItem {
                        row,
                        height,
                        item: BoardItem::Annotation { key, lines },
                    });
                    row = row.saturating_add(height);
                }
            }
            Self::place_text(&mut layout, &mut row, id, &run, columns);
            row = row.saturating_add(PARAGRAPH_SPACING);
        }

        layout
    }

    fn place_text(
        layout: &mut PageLayout,
        row: &mut u16,
        paragraph: usize,
        run: &[(usize, &str)],
        columns: u16,
    ) {
        for line in wrap_sentences(run.iter().copied(), columns) {
            layout.items.push(PlacedItem {
                row: *row,
                height: 1,
                item: BoardItem::Text { paragraph, line },
            });
            *row = row.saturating_add(1);
        }
    }

    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<ClickTarget> {
        if x < area.x || y < area.y || x >= area.right() || y >= area.bottom() {
            return None;
        }
        self.layout(area.width).hit_test(x - area.x, y - area.y)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Block::default().style(theme.base), area);

        if self.page.is_none() {
            self.render_empty(frame, area, theme);
            return;
        }

        let layout = self.layout(area.width);
        for placed in &layout.items {
            if placed.row >= area.height {
                break;
            }
            let height = placed.height.min(area.height - placed.row);
            let x = area.x + layout.x_offset;
            let rect = Rect::new(x, area.y + placed.row, area.right().saturating_sub(x), height);

            match &placed.item {
                BoardItem::Text { paragraph, line } => {
                    let rendered = self.render_line(*paragraph, line, theme);
                    frame.render_widget(Paragraph::new(rendered), rect);
                }
                BoardItem::Annotation { lines, .. } => {
                    let rect = Rect { width: layout.columns.min(rect.width), ..rect };
                    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
                    let block = Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.annotation);
                    let widget = Paragraph::new(text).style(theme.annotation).block(block);
                    frame.render_widget(widget, rect);
                }
            }
        }
    }

    fn render_line(&self, paragraph: usize, line: &LaidOutLine, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();
        let mut col: u16 = 0;

        for span in &line.spans {
            if span.col > col {
                spans.push(Span::styled(" ".repeat((span.col - col) as usize), theme.base));
            }
            let key = AnnotationKey::new(paragraph, span.sentence);
            let highlight = if self.cursor == Some(key) {
                theme.cursor
            } else {
                Style::default()
            };
            for (segment, quoted) in span.segments() {
                let style = if quoted { theme.quote } else { theme.base };
                spans.push(Span::styled(segment.to_string(), style.patch(highlight)));
            }
            col = span.col + span.width();
        }

        Line::from(spans)
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let empty_text = vec![
            Line::from("Nothing to show"),
            Line::from("The text contained no paragraphs"),
        ];

        let paragraph = Paragraph::new(empty_text)
            .style(theme.muted)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}
