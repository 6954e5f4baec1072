//! Page list, margins, and heuristic text overflow between pages
//!
//! ## Overflow
//!
//! Free text typed into a page is checked against an estimate of how much
//! fits in the page's text area. The estimate uses a fixed line height and
//! an average character width, so it is approximate: it does not measure
//! rendered glyphs. When the estimate exceeds the area, a word-count
//! proportional tail of the text moves to the start of the next page, and
//! the check repeats on that page.

use crate::{EditError, Result};
use template_model::{px_to_cm, MarginSide, Margins, Page};
use unicode_segmentation::UnicodeSegmentation;

/// Typographic constants used by the overflow estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Height of one line of text in logical pixels
    pub line_height_px: f64,
    /// Average advance of one character in logical pixels
    pub avg_char_width_px: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            line_height_px: 20.0,
            avg_char_width_px: 7.5,
        }
    }
}

impl TextMetrics {
    /// Estimated rendered height of `text` wrapped to `width` pixels
    pub fn estimate_height(&self, text: &str, width: f64) -> f64 {
        let chars_per_line = (width / self.avg_char_width_px).floor().max(1.0) as usize;
        let lines: usize = text
            .split('\n')
            .map(|line| {
                let chars = line.chars().count();
                if chars == 0 {
                    1
                } else {
                    chars.div_ceil(chars_per_line)
                }
            })
            .sum();
        lines as f64 * self.line_height_px
    }
}

/// What a content edit did to the page list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflowReport {
    /// Pages whose content changed because text moved onto them
    pub pages_touched: Vec<u32>,
    /// Number of pages appended to hold overflow
    pub pages_created: usize,
}

/// Ordered pages plus the page new elements land on.
///
/// Pages can only be appended, never removed.
#[derive(Debug, Clone)]
pub struct PageModel {
    pages: Vec<Page>,
    /// 1-based position of the active page
    current: u32,
    /// Margins given to newly added pages
    default_margins: Margins,
    metrics: TextMetrics,
}

impl PageModel {
    /// A single blank page
    pub fn new() -> Self {
        Self::from_pages(Vec::new())
    }

    /// Wrap existing pages; an empty list becomes one blank page
    pub fn from_pages(mut pages: Vec<Page>) -> Self {
        if pages.is_empty() {
            pages.push(Page::blank());
        }
        Self {
            pages,
            current: 1,
            default_margins: Margins::default(),
            metrics: TextMetrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_default_margins(mut self, margins: Margins) -> Self {
        self.default_margins = margins;
        self
    }

    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether `page` is a valid 1-based position
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && (page as usize) <= self.pages.len()
    }

    pub fn page(&self, page: u32) -> Option<&Page> {
        if !self.contains(page) {
            return None;
        }
        self.pages.get(page as usize - 1)
    }

    fn page_mut(&mut self, page: u32) -> Result<&mut Page> {
        if !self.contains(page) {
            return Err(self.not_found(page));
        }
        let count = self.pages.len();
        self.pages
            .get_mut(page as usize - 1)
            .ok_or(EditError::PageNotFound { page, page_count: count })
    }

    fn not_found(&self, page: u32) -> EditError {
        EditError::PageNotFound {
            page,
            page_count: self.pages.len(),
        }
    }

    /// Active page
    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn set_current(&mut self, page: u32) -> Result<()> {
        if !self.contains(page) {
            return Err(self.not_found(page));
        }
        self.current = page;
        Ok(())
    }

    /// Append a blank page and make it current. Returns its position.
    pub fn add_page(&mut self) -> u32 {
        self.pages.push(Page::with_margins(self.default_margins));
        self.current = self.pages.len() as u32;
        self.current
    }

    /// Replace a page's free text, then push any overflow forward
    pub fn set_content(&mut self, page: u32, text: impl Into<String>) -> Result<ReflowReport> {
        self.page_mut(page)?.content = text.into();
        Ok(self.reflow_from(page))
    }

    /// Run the overflow heuristic starting at `page` and cascading forward
    pub fn reflow_from(&mut self, page: u32) -> ReflowReport {
        let mut report = ReflowReport::default();
        if !self.contains(page) {
            return report;
        }
        let mut index = page as usize - 1;

        while index < self.pages.len() {
            let Some((kept, overflow)) = self.split_overflow(index) else {
                break;
            };

            self.pages[index].content = kept;
            if index + 1 == self.pages.len() {
                self.pages.push(Page::with_margins(self.default_margins));
                report.pages_created += 1;
            }

            let next = &mut self.pages[index + 1];
            next.content = if next.content.is_empty() {
                overflow
            } else {
                format!("{} {}", overflow, next.content)
            };
            report.pages_touched.push(index as u32 + 2);
            index += 1;
        }

        if report.pages_created > 0 {
            tracing::debug!(
                created = report.pages_created,
                "Text overflow created new pages"
            );
        }
        report
    }

    /// Split a page's text if the estimate says it does not fit.
    /// Returns `(kept, overflow)`; at least one word always stays.
    fn split_overflow(&self, index: usize) -> Option<(String, String)> {
        let page = self.pages.get(index)?;
        let area = page.margins.content_area();
        let estimated = self.metrics.estimate_height(&page.content, area.width);
        if estimated <= area.height {
            return None;
        }

        let words: Vec<usize> = page
            .content
            .unicode_word_indices()
            .map(|(offset, _)| offset)
            .collect();
        let fraction = area.height / estimated;
        let keep = ((words.len() as f64 * fraction).floor() as usize).max(1);
        if keep >= words.len() {
            return None;
        }

        let split_at = words[keep];
        let kept = page.content[..split_at].trim_end().to_string();
        let overflow = page.content[split_at..].to_string();
        Some((kept, overflow))
    }

    /// Set one margin of a page (clamped to `[0, 10]` cm).
    /// Returns the resulting text-area inset in pixels.
    pub fn set_margin(&mut self, page: u32, side: MarginSide, cm: f64) -> Result<f64> {
        let margins = &mut self.page_mut(page)?.margins;
        margins.set(side, cm);
        Ok(margins.inset_px(side))
    }

    /// Move a ruler handle by `delta_px` document pixels along its axis.
    ///
    /// Positive deltas point right/down: they grow the top and left margins
    /// and shrink the bottom and right ones. Returns the new inset in pixels.
    pub fn drag_margin(&mut self, page: u32, side: MarginSide, delta_px: f64) -> Result<f64> {
        let current = self
            .page(page)
            .ok_or_else(|| self.not_found(page))?
            .margins
            .get(side);
        let delta_cm = px_to_cm(delta_px);
        let target = match side {
            MarginSide::Top | MarginSide::Left => current + delta_cm,
            MarginSide::Bottom | MarginSide::Right => current - delta_cm,
        };
        self.set_margin(page, side, target)
    }

    /// Page reordering is not applied; the request is only logged.
    pub fn move_page(&self, from: u32, to: u32) {
        tracing::debug!(from, to, "Page reorder requested; ignored");
    }
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new()
    }
}
