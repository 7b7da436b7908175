//! Markdown to HTML rendering for entry pages.
//!
//! # Responsibility
//! - Convert CommonMark entry bodies into an HTML fragment.
//!
//! # Invariants
//! - Raw HTML in the source is emitted as escaped text, never as markup.
//! - Link and image destinations must be relative or use an allowed scheme;
//!   anything else is rendered as its plain label.
//! - Output is deterministic for a given input.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Renders markdown `source` into an HTML fragment.
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut dropped_link = false;
    let mut dropped_image = false;

    let events = Parser::new_ext(source, options).filter_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { ref dest_url, .. }) if !is_allowed_destination(dest_url) => {
            dropped_link = true;
            None
        }
        Event::End(TagEnd::Link) if dropped_link => {
            dropped_link = false;
            None
        }
        Event::Start(Tag::Image { ref dest_url, .. }) if !is_allowed_destination(dest_url) => {
            dropped_image = true;
            None
        }
        Event::End(TagEnd::Image) if dropped_image => {
            dropped_image = false;
            None
        }
        other => Some(other),
    });

    let mut rendered = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut rendered, events);
    rendered
}

/// Accepts relative references and the allowed absolute schemes.
///
/// Any control char or whitespace before the first `:` makes the prefix an
/// unknown scheme, so obfuscated forms such as `\u{1}javascript:` fail.
fn is_allowed_destination(dest: &str) -> bool {
    if dest.chars().any(char::is_control) {
        return false;
    }
    let scheme_end = match dest.find(|ch: char| matches!(ch, ':' | '/' | '?' | '#')) {
        Some(index) if dest[index..].starts_with(':') => index,
        _ => return true,
    };
    let scheme = dest[..scheme_end].to_ascii_lowercase();
    ALLOWED_SCHEMES.contains(&scheme.as_str())
}

#[cfg(test)]
mod tests {
    use super::render_markdown;

    #[test]
    fn renders_headings_and_paragraphs() {
        let html = render_markdown("# Python\n\nPython is a language.\nIt is popular.");
        assert!(html.contains("<h1>Python</h1>"));
        assert!(html.contains("<p>Python is a language.\nIt is popular.</p>"));
    }

    #[test]
    fn renders_lists_of_both_kinds() {
        let html = render_markdown("- one\n- two\n\n1. first\n2. second");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<ol>"));
        assert!(html.contains("<li>second</li>"));
    }

    #[test]
    fn renders_inline_markup_and_safe_links() {
        let html =
            render_markdown("See **bold**, *soft* and `code` at [docs](https://example.com/a).");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>soft</em>"));
        assert!(html.contains("<code>code</code>"));
        assert!(html.contains(r#"<a href="https://example.com/a">docs</a>"#));
    }

    #[test]
    fn relative_and_mail_links_are_kept() {
        let html = render_markdown("[Django](/wiki/Django) and [mail](mailto:a@example.com)");
        assert!(html.contains(r#"href="/wiki/Django""#));
        assert!(html.contains(r#"href="mailto:a@example.com""#));
    }

    #[test]
    fn link_destination_may_contain_parentheses() {
        let html = render_markdown("[Lisp](https://en.wikipedia.org/wiki/Lisp_(language))");
        assert!(html.contains(r#"href="https://en.wikipedia.org/wiki/Lisp_(language)""#));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_markdown("Hello <script>alert(1)</script> **ok**");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<strong>ok</strong>"));
    }

    #[test]
    fn html_blocks_are_escaped() {
        let html = render_markdown("<div onclick=\"x()\">hi</div>");
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;div"));
    }

    #[test]
    fn script_schemes_render_as_plain_label() {
        for source in [
            "[click](javascript:alert(1))",
            "[click](JavaScript:alert(1))",
            "[click](\u{1}javascript:alert(document.cookie))",
            "[click](&#106;avascript:alert(1))",
            "[click](javascript&#58;alert(1))",
            "[click](vbscript:msgbox(1))",
            "[click](data:text/html;base64,PHNjcmlwdD4=)",
            "<javascript:alert(1)>",
        ] {
            let html = render_markdown(source);
            assert!(!html.contains("href"), "{source} rendered {html}");
        }
        assert!(render_markdown("[click](javascript:alert(1))").contains("click"));
    }

    #[test]
    fn unsafe_image_sources_are_dropped() {
        let html = render_markdown("![x](javascript:alert(1)) ![logo](/static/logo.png)");
        assert!(!html.contains("javascript"));
        assert!(html.contains(r#"src="/static/logo.png""#));
    }

    #[test]
    fn fenced_code_is_left_verbatim() {
        let html = render_markdown("```\nlet x = *y* < 2;\n```");
        assert!(html.contains("<pre><code>let x = *y* &lt; 2;\n</code></pre>"));
    }

    #[test]
    fn heading_keeps_trailing_hash_without_space() {
        assert!(render_markdown("## C#").contains("<h2>C#</h2>"));
    }
}
