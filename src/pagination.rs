use crate::models::{Page, Paragraph, Viewport};

/// Plain function form of [`Measure`], storable in long-lived state.
pub type MeasureFn = fn(&Paragraph, u16, u16) -> u16;

/// Rendered height of a paragraph at a given content width and font size.
pub trait Measure {
    fn measure(&self, paragraph: &Paragraph, width: u16, font_size: u16) -> u16;
}

impl<F> Measure for F
where
    F: Fn(&Paragraph, u16, u16) -> u16,
{
    fn measure(&self, paragraph: &Paragraph, width: u16, font_size: u16) -> u16 {
        self(paragraph, width, font_size)
    }
}

/// Greedily packs paragraphs into pages no taller than the viewport.
///
/// A paragraph is never split: one taller than the viewport gets a page of its
/// own and overflows it. Returns `None` for a zero-sized viewport, in which
/// case the caller keeps whatever pages it had.
pub fn paginate<M>(
    paragraphs: &[Paragraph],
    viewport: Viewport,
    font_size: u16,
    measure: &M,
) -> Option<Vec<Page>>
where
    M: Measure + ?Sized,
{
    if viewport.is_empty() {
        return None;
    }

    let available = viewport.height as u32;
    let mut pages = Vec::new();
    let mut page_start = 0;
    let mut accumulated: u32 = 0;

    for (id, paragraph) in paragraphs.iter().enumerate() {
        let height = measure.measure(paragraph, viewport.width, font_size) as u32;
        if accumulated + height > available && id > page_start {
            pages.push(Page::new(page_start..id));
            page_start = id;
            accumulated = height;
        } else {
            accumulated += height;
        }
    }

    if page_start < paragraphs.len() {
        pages.push(Page::new(page_start..paragraphs.len()));
    }

    Some(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(n: usize) -> Vec<Paragraph> {
        (0..n)
            .map(|i| Paragraph {
                text: format!("p{}", i),
                sentences: vec![format!("p{}", i)],
            })
            .collect()
    }

    fn fixed(height: u16) -> impl Fn(&Paragraph, u16, u16) -> u16 {
        move |_: &Paragraph, _: u16, _: u16| height
    }

    #[test]
    fn test_zero_viewport_skips() {
        let paras = paragraphs(3);
        assert_eq!(paginate(&paras, Viewport::new(0, 10), 16, &fixed(1)), None);
        assert_eq!(paginate(&paras, Viewport::new(10, 0), 16, &fixed(1)), None);
    }

    #[test]
    fn test_empty_document_has_no_pages() {
        let pages = paginate(&[], Viewport::new(10, 10), 16, &fixed(1)).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let paras = paragraphs(4);
        let pages = paginate(&paras, Viewport::new(10, 10), 16, &fixed(5)).unwrap();
        assert_eq!(pages, vec![Page::new(0..2), Page::new(2..4)]);
    }

    #[test]
    fn test_overflowing_paragraph_gets_own_page() {
        let paras = paragraphs(3);
        let heights = |p: &Paragraph, _: u16, _: u16| if p.text == "p1" { 50 } else { 3 };
        let pages = paginate(&paras, Viewport::new(10, 10), 16, &heights).unwrap();
        assert_eq!(pages, vec![Page::new(0..1), Page::new(1..2), Page::new(2..3)]);
    }

    #[test]
    fn test_first_paragraph_taller_than_viewport() {
        let paras = paragraphs(2);
        let pages = paginate(&paras, Viewport::new(10, 4), 16, &fixed(9)).unwrap();
        assert_eq!(pages, vec![Page::new(0..1), Page::new(1..2)]);
    }

    #[test]
    fn test_measure_receives_width_and_font_size() {
        let paras = paragraphs(2);
        let measure = |_: &Paragraph, width: u16, font: u16| {
            assert_eq!(width, 33);
            assert_eq!(font, 20);
            1
        };
        let pages = paginate(&paras, Viewport::new(33, 5), 20, &measure).unwrap();
        assert_eq!(pages, vec![Page::new(0..2)]);
    }

    #[test]
    fn test_idempotent() {
        let paras = paragraphs(17);
        let measure = |p: &Paragraph, _: u16, _: u16| (p.text.len() as u16 % 4) + 1;
        let a = paginate(&paras, Viewport::new(20, 7), 16, &measure);
        let b = paginate(&paras, Viewport::new(20, 7), 16, &measure);
        assert_eq!(a, b);
    }
}
