use crate::utils::escape_html;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());

static BOLD_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*](?:.*?[^*])??)\*\*").unwrap());
static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([^_](?:.*?[^_])??)__").unwrap());
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[^*])\*([^*\n]+)\*").unwrap());
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([^_\n]+)_").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());

const FENCE: &str = "```";

/// Block currently being accumulated. `None` in the writer means no open block.
#[derive(Debug)]
enum Block {
    Paragraph(Vec<String>),
    List(Vec<String>),
    Code(Vec<String>),
}

/// Renders a small, safe subset of Markdown into an HTML fragment.
///
/// Supported blocks are ATX headings, paragraphs, bullet lists and fenced
/// code. Raw HTML in the input is always escaped. Rendering never fails:
/// anything that is not recognised ends up as paragraph text.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, markdown: &str) -> String {
        let mut writer = BlockWriter::default();

        for line in markdown.lines() {
            writer.push_line(line);
        }

        writer.finish()
    }
}

/// Convenience wrapper around [`MarkdownRenderer::render`]
pub fn render_markdown(markdown: &str) -> String {
    MarkdownRenderer::new().render(markdown)
}

/// Escape `text` and apply inline formatting to it
pub fn render_inline(text: &str) -> String {
    format_inline(&escape_html(text))
}

#[derive(Debug, Default)]
struct BlockWriter {
    html: String,
    open: Option<Block>,
    blocks: usize,
}

impl BlockWriter {
    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();

        if trimmed.starts_with(FENCE) {
            let closes_code = matches!(self.open, Some(Block::Code(_)));
            self.flush();
            if !closes_code {
                self.open = Some(Block::Code(Vec::new()));
            }
            return;
        }

        // Everything inside a fence is taken verbatim.
        if let Some(Block::Code(lines)) = self.open.as_mut() {
            lines.push(line.to_string());
            return;
        }

        if trimmed.is_empty() {
            self.flush();
            return;
        }

        if let Some(caps) = HEADING.captures(line) {
            self.flush();
            let level = caps[1].len();
            let text = render_inline(caps[2].trim());
            self.emit(&format!("<h{level}>{text}</h{level}>"));
            return;
        }

        if let Some(caps) = LIST_ITEM.captures(line) {
            let item = caps[1].trim().to_string();
            if let Some(Block::List(items)) = self.open.as_mut() {
                items.push(item);
                return;
            }
            self.flush();
            self.open = Some(Block::List(vec![item]));
            return;
        }

        if let Some(Block::Paragraph(lines)) = self.open.as_mut() {
            lines.push(trimmed.to_string());
            return;
        }
        self.flush();
        self.open = Some(Block::Paragraph(vec![trimmed.to_string()]));
    }

    fn flush(&mut self) {
        let Some(block) = self.open.take() else {
            return;
        };

        let html = match block {
            Block::Paragraph(lines) => format!("<p>{}</p>", render_inline(&lines.join("\n"))),
            Block::List(items) => {
                let mut html = String::from("<ul>");
                for item in items {
                    html.push_str("<li>");
                    html.push_str(&render_inline(&item));
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
                html
            }
            Block::Code(lines) => format!(
                "<pre><code>{}</code></pre>",
                escape_html(&lines.join("\n"))
            ),
        };

        self.emit(&html);
    }

    fn emit(&mut self, html: &str) {
        self.html.push_str(html);
        self.blocks += 1;
    }

    fn finish(mut self) -> String {
        // An unterminated fence is flushed like any other open block.
        self.flush();
        log::trace!("rendered {} markdown blocks", self.blocks);
        self.html
    }
}

/// Apply inline substitutions to already escaped text.
///
/// Order is fixed: bold, italic, inline code, links. Bold runs first so that
/// `**` is never read as two single emphasis markers. Bold content may not
/// start or end with its own marker, so `***x***` nests as `<em><strong>`.
fn format_inline(escaped: &str) -> String {
    let text = BOLD_STARS.replace_all(escaped, "<strong>${1}</strong>");
    let text = BOLD_UNDERSCORES.replace_all(&text, "<strong>${1}</strong>");
    let text = replace_single_star(&text);
    let text = ITALIC_UNDERSCORE.replace_all(&text, "<em>${1}</em>");
    let text = INLINE_CODE.replace_all(&text, "<code>${1}</code>");
    let text = LINK.replace_all(
        &text,
        r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
    );
    text.into_owned()
}

fn replace_single_star(text: &str) -> String {
    ITALIC_STAR
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let end = caps.get(0).map_or(text.len(), |m| m.end());
            if text[end..].starts_with('*') {
                return whole.to_string();
            }
            format!("{}<em>{}</em>", &caps[1], &caps[2])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let html = render_markdown("# Title\n\nSome **bold** and _italic_ text.");
        assert_eq!(
            html,
            "<h1>Title</h1><p>Some <strong>bold</strong> and <em>italic</em> text.</p>"
        );
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render_markdown("### Third"), "<h3>Third</h3>");
        assert_eq!(render_markdown("###### Six"), "<h6>Six</h6>");
        assert_eq!(render_markdown("####### Seven"), "<p>####### Seven</p>");
        assert_eq!(render_markdown("#NoSpace"), "<p>#NoSpace</p>");
    }

    #[test]
    fn test_heading_interrupts_paragraph() {
        assert_eq!(
            render_markdown("intro\n## Next\nafter"),
            "<p>intro</p><h2>Next</h2><p>after</p>"
        );
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(
            render_markdown("- one\n- two\n- three"),
            "<ul><li>one</li><li>two</li><li>three</li></ul>"
        );
    }

    #[test]
    fn test_mixed_bullet_markers_share_a_list() {
        assert_eq!(
            render_markdown("* a\n+ b\n- c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn test_list_and_paragraph_transitions() {
        assert_eq!(
            render_markdown("para\n- item\nmore text"),
            "<p>para</p><ul><li>item</li></ul><p>more text</p>"
        );
    }

    #[test]
    fn test_blank_line_splits_lists() {
        assert_eq!(
            render_markdown("- a\n\n- b"),
            "<ul><li>a</li></ul><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_paragraph_lines_are_trimmed_and_joined() {
        assert_eq!(
            render_markdown("  first line  \nsecond line"),
            "<p>first line\nsecond line</p>"
        );
    }

    #[test]
    fn test_list_items_get_inline_formatting() {
        assert_eq!(
            render_markdown("- **bold** item\n- `code`"),
            "<ul><li><strong>bold</strong> item</li><li><code>code</code></li></ul>"
        );
    }

    #[test]
    fn test_fenced_code_is_verbatim() {
        let html = render_markdown("```\n**not bold**\n  <b>&</b>\n```");
        assert_eq!(
            html,
            "<pre><code>**not bold**\n  &lt;b&gt;&amp;&lt;/b&gt;</code></pre>"
        );
    }

    #[test]
    fn test_fence_closes_open_blocks() {
        assert_eq!(
            render_markdown("text\n```rust\nlet x = 1;\n```\n- after"),
            "<p>text</p><pre><code>let x = 1;</code></pre><ul><li>after</li></ul>"
        );
    }

    #[test]
    fn test_code_keeps_blank_lines_and_markers() {
        assert_eq!(
            render_markdown("```\n# not heading\n\n- not list\n```"),
            "<pre><code># not heading\n\n- not list</code></pre>"
        );
    }

    #[test]
    fn test_unterminated_fence_is_flushed() {
        assert_eq!(
            render_markdown("```\ncode line\nsecond"),
            "<pre><code>code line\nsecond</code></pre>"
        );
    }

    #[test]
    fn test_empty_fence() {
        assert_eq!(render_markdown("```\n```"), "<pre><code></code></pre>");
    }

    #[test]
    fn test_script_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>");
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(
            render_markdown(r#"say "hi" & 'bye'"#),
            "<p>say &quot;hi&quot; &amp; &#039;bye&#039;</p>"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render_inline("see [docs](https://example.com/a?b=1&c=2)"),
            "see <a href=\"https://example.com/a?b=1&amp;c=2\" target=\"_blank\" rel=\"noopener noreferrer\">docs</a>"
        );
    }

    #[test]
    fn test_link_url_cannot_break_out_of_attribute() {
        let html = render_inline(r#"[x](http://a"onclick=b)"#);
        assert!(html.contains("&quot;onclick"));
        assert!(!html.contains("\"onclick"));
    }

    #[test]
    fn test_bold_variants() {
        assert_eq!(render_inline("__strong__"), "<strong>strong</strong>");
        assert_eq!(render_inline("**a** and **b**"), "<strong>a</strong> and <strong>b</strong>");
    }

    #[test]
    fn test_triple_markers_nest_cleanly() {
        assert_eq!(render_inline("***x***"), "<em><strong>x</strong></em>");
        assert_eq!(render_inline("___x___"), "<em><strong>x</strong></em>");
        assert_eq!(
            render_markdown("a ***loud*** word"),
            "<p>a <em><strong>loud</strong></em> word</p>"
        );
    }

    #[test]
    fn test_bold_spans_multiple_characters() {
        assert_eq!(render_inline("**a*b**"), "<strong>a*b</strong>");
        assert_eq!(render_inline("**two words**"), "<strong>two words</strong>");
    }

    #[test]
    fn test_underscores_in_link_target_are_formatted_first() {
        assert_eq!(
            render_inline("[a](u_b_c)"),
            "<a href=\"u<em>b</em>c\" target=\"_blank\" rel=\"noopener noreferrer\">a</a>"
        );
    }

    #[test]
    fn test_italic_star() {
        assert_eq!(render_inline("an *emphasised* word"), "an <em>emphasised</em> word");
        assert_eq!(render_inline("*start*"), "<em>start</em>");
    }

    #[test]
    fn test_italic_star_not_followed_by_star() {
        assert_eq!(render_inline("*a**"), "*a**");
    }

    #[test]
    fn test_unmatched_markers_stay_literal() {
        assert_eq!(render_inline("a ** b"), "a ** b");
        assert_eq!(render_inline("lonely * star"), "lonely * star");
        assert_eq!(render_inline("open `tick"), "open `tick");
        assert_eq!(render_inline("[text](no close"), "[text](no close");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown(""), "");
        assert_eq!(render_markdown("\n\n   \n"), "");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(
            render_markdown("# Title\r\n\r\ntext\r\n"),
            "<h1>Title</h1><p>text</p>"
        );
    }

    #[test]
    fn test_renderer_is_stateless() {
        let renderer = MarkdownRenderer::new();
        let first = renderer.render("- a");
        let second = renderer.render("- a");
        assert_eq!(first, second);
    }
}
