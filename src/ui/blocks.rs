//! Terminal formatting for rendered content blocks

use console::Style;
use pageforge_core::{ContentBlock, InlineSpan};

const BULLET: &str = "•";

/// Turns [`ContentBlock`]s into terminal text, styled or plain.
#[derive(Debug, Clone, Copy)]
pub struct BlockFormatter {
    color: bool,
}

impl BlockFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colors only when stdout is a terminal that supports them.
    pub fn for_stdout() -> Self {
        Self::new(console::colors_enabled())
    }

    pub fn format_block(&self, block: &ContentBlock) -> String {
        match block {
            ContentBlock::Heading1 { .. } => {
                self.paint(&block.plain_text(), Style::new().cyan().bold().underlined())
            }
            ContentBlock::Heading3 { .. } => self.paint(&block.plain_text(), Style::new().bold()),
            ContentBlock::Paragraph { spans } => self.format_spans(spans),
            ContentBlock::BulletList { items } => items
                .iter()
                .map(|item| format!("  {BULLET} {}", self.format_spans(item)))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn format_spans(&self, spans: &[InlineSpan]) -> String {
        spans
            .iter()
            .map(|span| match span {
                InlineSpan::PlainText { text } => text.clone(),
                InlineSpan::Bold { text } => self.paint(text, Style::new().bold()),
                InlineSpan::Link { text, url } => format!(
                    "{} {}",
                    self.paint(text, Style::new().blue().underlined()),
                    self.paint(&format!("({url})"), Style::new().dim())
                ),
            })
            .collect()
    }

    /// Format a run of blocks separated by blank lines.
    pub fn format_blocks(&self, blocks: &[ContentBlock]) -> String {
        blocks
            .iter()
            .map(|block| self.format_block(block))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
