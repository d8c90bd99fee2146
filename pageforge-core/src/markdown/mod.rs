//! Line-oriented Markdown renderer for streamed model output.
//!
//! The renderer understands the small Markdown subset the page prompt asks
//! for: `# ` and `### ` headings, `* ` / `- ` bullet lists, blank-line
//! separated paragraphs, and the inline `**bold**` and `[label](url)` tokens.
//! Everything else degrades to paragraph text.
//!
//! Rendering is a pure function of the whole buffer. While a response is
//! streaming the buffer is re-rendered after every chunk, so a token that is
//! still open at the tail (for example `**Reso`) shows up as plain text until
//! a later chunk closes it.

mod inline;

pub use inline::{InlineSpan, parse_inline};

use serde::Serialize;

const HEADING1_PREFIX: &str = "# ";
const HEADING3_PREFIX: &str = "### ";
const BULLET_PREFIXES: [&str; 2] = ["* ", "- "];

/// One structured unit of renderable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading1 { spans: Vec<InlineSpan> },
    Heading3 { spans: Vec<InlineSpan> },
    Paragraph { spans: Vec<InlineSpan> },
    BulletList { items: Vec<Vec<InlineSpan>> },
}

impl ContentBlock {
    /// Visible text of the block with markup removed. List items are joined
    /// with newlines.
    pub fn plain_text(&self) -> String {
        fn flatten(spans: &[InlineSpan]) -> String {
            spans.iter().map(InlineSpan::text).collect()
        }

        match self {
            Self::Heading1 { spans } | Self::Heading3 { spans } | Self::Paragraph { spans } => {
                flatten(spans)
            }
            Self::BulletList { items } => items
                .iter()
                .map(|item| flatten(item))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Render the whole buffer into an ordered list of blocks.
pub fn render(buffer: &str) -> Vec<ContentBlock> {
    let lines: Vec<&str> = buffer.split('\n').collect();
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];

        if let Some(rest) = line.strip_prefix(HEADING1_PREFIX) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(ContentBlock::Heading1 {
                spans: parse_inline(rest),
            });
        } else if let Some(rest) = line.strip_prefix(HEADING3_PREFIX) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(ContentBlock::Heading3 {
                spans: parse_inline(rest),
            });
        } else if is_bullet(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut items = Vec::new();
            while index < lines.len() && is_bullet(lines[index]) {
                items.push(parse_inline(bullet_text(lines[index])));
                index += 1;
            }
            blocks.push(ContentBlock::BulletList { items });
            // The line that ended the list still needs its own pass.
            continue;
        } else if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else {
            paragraph.push(line);
        }

        index += 1;
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

/// Number of leading blocks of `render(buffer)` that no later chunk can
/// change.
///
/// Only newline-terminated lines are considered, and the last block they
/// produce is still open: more lines may extend it. Every block before that
/// was closed by a complete line and is final.
pub fn settled_block_count(buffer: &str) -> usize {
    match buffer.rfind('\n') {
        Some(end) => render(&buffer[..end]).len().saturating_sub(1),
        None => 0,
    }
}

fn is_bullet(line: &str) -> bool {
    BULLET_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

fn bullet_text(line: &str) -> &str {
    line.split_once(' ').map_or("", |(_, rest)| rest)
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<ContentBlock>) {
    if paragraph.is_empty() {
        return;
    }
    blocks.push(ContentBlock::Paragraph {
        spans: parse_inline(&paragraph.join("\n")),
    });
    paragraph.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph {
            spans: vec![InlineSpan::plain(text)],
        }
    }

    fn bullets(items: &[&str]) -> ContentBlock {
        ContentBlock::BulletList {
            items: items.iter().map(|item| vec![InlineSpan::plain(*item)]).collect(),
        }
    }

    #[test]
    fn blank_buffers_render_nothing() {
        assert!(render("").is_empty());
        assert!(render("   \n").is_empty());
        assert!(render("\n\n\t\n").is_empty());
    }

    #[test]
    fn plain_text_is_one_paragraph_with_line_breaks() {
        let text = "Welcome home.\nQuiet streets and big skies.";
        assert_eq!(render(text), vec![paragraph(text)]);
    }

    #[test]
    fn heading_then_body() {
        assert_eq!(
            render("# Title\nBody text"),
            vec![
                ContentBlock::Heading1 {
                    spans: vec![InlineSpan::plain("Title")],
                },
                paragraph("Body text"),
            ]
        );
    }

    #[test]
    fn heading3_is_recognized_and_inline_parsed() {
        assert_eq!(
            render("### Is there an **HOA**?"),
            vec![ContentBlock::Heading3 {
                spans: vec![
                    InlineSpan::plain("Is there an "),
                    InlineSpan::bold("HOA"),
                    InlineSpan::plain("?"),
                ],
            }]
        );
    }

    #[test]
    fn other_heading_levels_are_paragraph_text() {
        assert_eq!(render("## Amenities"), vec![paragraph("## Amenities")]);
        assert_eq!(render("#NoSpace"), vec![paragraph("#NoSpace")]);
    }

    #[test]
    fn consecutive_bullets_form_one_list() {
        assert_eq!(render("* a\n* b\n* c"), vec![bullets(&["a", "b", "c"])]);
    }

    #[test]
    fn star_and_dash_bullets_share_a_list() {
        assert_eq!(render("* a\n- b"), vec![bullets(&["a", "b"])]);
    }

    #[test]
    fn list_ends_at_first_non_bullet_line() {
        assert_eq!(
            render("Before\n* x\n* y\nAfter"),
            vec![paragraph("Before"), bullets(&["x", "y"]), paragraph("After")]
        );
    }

    #[test]
    fn blank_line_splits_lists() {
        assert_eq!(
            render("* x\n\n* y"),
            vec![bullets(&["x"]), bullets(&["y"])]
        );
    }

    #[test]
    fn heading_right_after_list_is_kept() {
        assert_eq!(
            render("- x\n# Next"),
            vec![
                bullets(&["x"]),
                ContentBlock::Heading1 {
                    spans: vec![InlineSpan::plain("Next")],
                },
            ]
        );
    }

    #[test]
    fn bullet_item_keeps_text_after_first_space() {
        assert_eq!(render("*  padded"), vec![bullets(&[" padded"])]);
    }

    #[test]
    fn indented_bullet_is_paragraph_text() {
        assert_eq!(render("  * nested"), vec![paragraph("  * nested")]);
    }

    #[test]
    fn blank_lines_separate_paragraphs() {
        assert_eq!(
            render("First\n\n   \nSecond"),
            vec![paragraph("First"), paragraph("Second")]
        );
    }

    #[test]
    fn bullet_items_are_inline_parsed() {
        assert_eq!(
            render("* **Resort pool** with [cabanas](https://pool)"),
            vec![ContentBlock::BulletList {
                items: vec![vec![
                    InlineSpan::bold("Resort pool"),
                    InlineSpan::plain(" with "),
                    InlineSpan::link("cabanas", "https://pool"),
                ]],
            }]
        );
    }

    #[test]
    fn open_bold_at_the_tail_renders_plain_until_closed() {
        assert_eq!(render("Enjoy **Reso"), vec![paragraph("Enjoy **Reso")]);
        assert_eq!(
            render("Enjoy **Resort living**"),
            vec![ContentBlock::Paragraph {
                spans: vec![InlineSpan::plain("Enjoy "), InlineSpan::bold("Resort living")],
            }]
        );
    }

    #[test]
    fn plain_text_flattens_blocks() {
        let blocks = render("# **Big** Title\n* one\n* [two](u)");
        assert_eq!(blocks[0].plain_text(), "Big Title");
        assert_eq!(blocks[1].plain_text(), "one\ntwo");
    }

    #[test]
    fn settled_count_ignores_the_open_tail() {
        assert_eq!(settled_block_count(""), 0);
        assert_eq!(settled_block_count("# Title"), 0);
        assert_eq!(settled_block_count("# Title\n"), 0);
        assert_eq!(settled_block_count("# Title\nBody"), 0);
        assert_eq!(settled_block_count("# Title\nBody\n"), 1);
        assert_eq!(settled_block_count("# Title\nBody\n\nMore\n"), 2);
    }

    #[test]
    fn partial_bullet_line_does_not_settle_the_list() {
        // "*" could still become "* b" and extend the list.
        let partial = "* a\n*";
        let settled = settled_block_count(partial);
        assert_eq!(settled, 0);
        assert_eq!(render("* a\n* b"), vec![bullets(&["a", "b"])]);
    }

    #[test]
    fn settled_blocks_are_a_prefix_of_every_later_render() {
        let page = "# Willow Creek Estates\nNew homes in **Pleasantville**.\n\n\
                    ### Amenities\n* **Pool**\n* Trails\n- Dog park\nThe end of the list.\n\n\
                    ### FAQ\nWhat is the HOA? [VERIFY]\n\n[Guide](https://example.com)\n";

        let full = render(page);
        for end in 0..=page.len() {
            if !page.is_char_boundary(end) {
                continue;
            }
            let prefix = &page[..end];
            let settled = settled_block_count(prefix);
            let partial = render(prefix);
            assert!(settled <= partial.len());
            assert_eq!(&partial[..settled], &full[..settled], "prefix {prefix:?}");
        }
    }

    #[test]
    fn render_is_total_on_odd_input() {
        let odd = "***\n-\n*\n# \n### \n[x](\n**]](**\n- **\n\r\n";
        let blocks = render(odd);
        assert!(!blocks.is_empty());
    }
}
