//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::ContentError;

/// Class prefix for highlighted tokens, shared with the generated stylesheets
pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Language tag for blocks that are not highlighted
pub const PLAINTEXT: &str = "plaintext";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
}

/// A fenced block being collected
struct CodeBlock {
    lang: Option<String>,
    content: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Render markdown to HTML
    ///
    /// The output is not sanitized; callers must pass it through
    /// [`super::sanitize`] before display.
    pub fn render(&self, markdown: &str) -> Result<String, ContentError> {
        // Front-matter is split off before rendering, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<CodeBlock> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some(CodeBlock {
                        lang,
                        content: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code_block.take() {
                        let highlighted = self.highlight_code(&block.content, block.lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some(block) = code_block.as_mut() {
                        block.content.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::write_html_fmt(&mut html_output, events.into_iter())
            .map_err(|e| ContentError::Render(e.to_string()))?;

        Ok(html_output)
    }

    /// Resolve a fence tag to a highlightable syntax
    ///
    /// Plain text counts as unresolved so that it is tagged like any other
    /// unknown language.
    pub fn resolve_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))?;
        if syntax.name == self.syntax_set.find_syntax_plain_text().name {
            None
        } else {
            Some(syntax)
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang.and_then(|lang| self.resolve_syntax(lang));

        let Some(syntax) = syntax else {
            if let Some(lang) = lang {
                tracing::debug!("Unknown code block language {:?}, using plaintext", lang);
            }
            return plain_block(code);
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::warn!("Failed to highlight {} block: {}", syntax.name, e);
                return plain_block(code);
            }
        }

        format!(
            r#"<pre><code class="hljs {}">{}</code></pre>"#,
            language_class(&syntax.name),
            generator.finalize()
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn plain_block(code: &str) -> String {
    format!(
        r#"<pre><code class="hljs {}">{}</code></pre>"#,
        PLAINTEXT,
        html_escape(code)
    )
}

/// Turn a syntax name into a class token ("Bourne Again Shell (bash)" ->
/// "bourne-again-shell-bash")
fn language_class(name: &str) -> String {
    let mut class = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '+' || c == '#' {
            class.push(c);
        } else if !class.is_empty() && !class.ends_with('-') {
            class.push('-');
        }
    }
    while class.ends_with('-') {
        class.pop();
    }
    class
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<code class="hljs rust">"#));
        assert!(html.contains("hl-"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_is_plaintext() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```klingon\nqapla' <b>\n```\n\nAfter.")
            .unwrap();
        assert!(html.contains(r#"<code class="hljs plaintext">"#));
        assert!(html.contains("qapla&#39; &lt;b&gt;"));
        assert!(html.contains("<p>After.</p>"));
    }

    #[test]
    fn test_untagged_and_indented_blocks_are_plaintext() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain\n```\n\n    indented\n").unwrap();
        assert_eq!(html.matches(r#"class="hljs plaintext""#).count(), 2);
    }

    #[test]
    fn test_info_string_uses_first_word() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust ignore\nlet x = 1;\n```").unwrap();
        assert!(html.contains(r#"class="hljs rust""#));
    }

    #[test]
    fn test_resolve_syntax_by_extension() {
        let renderer = MarkdownRenderer::new();
        assert!(renderer.resolve_syntax("py").is_some());
        assert!(renderer.resolve_syntax("txt").is_none());
        assert!(renderer.resolve_syntax("not-a-language").is_none());
    }

    #[test]
    fn test_language_class() {
        assert_eq!(language_class("Rust"), "rust");
        assert_eq!(language_class("Bourne Again Shell (bash)"), "bourne-again-shell-bash");
        assert_eq!(language_class("C++"), "c++");
    }
}
