//! Преобразование HTML-фрагмента в Markdown или простой текст для экспорта черновиков.
//!
//! Это упорядоченный список замен по регулярным выражениям, а не HTML-парсер.
//! Теги вне обрабатываемого набора остаются как есть, управляющие символы
//! Markdown внутри текста не экранируются.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::error::DomainError;
use super::post::slugify;

fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).expect("conversion rule must compile")
}

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<script[^>]*>[\s\S]*?</script>"));
static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<style[^>]*>[\s\S]*?</style>"));

static HEADINGS: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
    (1..=6)
        .map(|level| {
            let pattern = format!(r"(?i)<h{level}[^>]*>(.*?)</h{level}>");
            let replacement = format!("{} ${{1}}\n\n", "#".repeat(level));
            (rule(&pattern), replacement)
        })
        .collect()
});

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<p[^>]*>(.*?)</p>"));
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<br\s*/?>"));
static STRONG: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<strong[^>]*>(.*?)</strong>"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<b[^>]*>(.*?)</b>"));
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<em[^>]*>(.*?)</em>"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<i[^>]*>(.*?)</i>"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| rule(r#"(?i)<a[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#));
static UNORDERED_LIST: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<ul[^>]*>([\s\S]*?)</ul>"));
static ORDERED_LIST: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<ol[^>]*>([\s\S]*?)</ol>"));
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<li[^>]*>(.*?)</li>"));
static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| rule(r"(?i)<blockquote[^>]*>([\s\S]*?)</blockquote>"));
static PREFORMATTED: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<pre[^>]*>([\s\S]*?)</pre>"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<code[^>]*>(.*?)</code>"));
static HORIZONTAL_RULE: LazyLock<Regex> = LazyLock::new(|| rule(r"(?i)<hr[^>]*>"));
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| rule(r"\n\s*\n\s*\n"));
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| rule(r"<[^>]+>"));

pub(crate) fn html_to_markdown(html: &str) -> String {
    let mut markdown = SCRIPT_BLOCK.replace_all(html, "").into_owned();
    markdown = STYLE_BLOCK.replace_all(&markdown, "").into_owned();

    for (pattern, replacement) in HEADINGS.iter() {
        markdown = pattern.replace_all(&markdown, replacement.as_str()).into_owned();
    }

    markdown = PARAGRAPH.replace_all(&markdown, "${1}\n\n").into_owned();
    markdown = LINE_BREAK.replace_all(&markdown, "\n").into_owned();

    markdown = STRONG.replace_all(&markdown, "**${1}**").into_owned();
    markdown = BOLD.replace_all(&markdown, "**${1}**").into_owned();
    markdown = EMPHASIS.replace_all(&markdown, "*${1}*").into_owned();
    markdown = ITALIC.replace_all(&markdown, "*${1}*").into_owned();

    markdown = LINK.replace_all(&markdown, "[${2}](${1})").into_owned();

    markdown = UNORDERED_LIST
        .replace_all(&markdown, |caps: &Captures| {
            let items = LIST_ITEM.replace_all(&caps[1], "- ${1}\n");
            format!("{items}\n")
        })
        .into_owned();

    markdown = ORDERED_LIST
        .replace_all(&markdown, |caps: &Captures| {
            // нумерация начинается с 1 в каждом списке
            let mut counter = 0;
            let items = LIST_ITEM.replace_all(&caps[1], |item: &Captures| {
                counter += 1;
                format!("{counter}. {}\n", &item[1])
            });
            format!("{items}\n")
        })
        .into_owned();

    markdown = BLOCKQUOTE
        .replace_all(&markdown, |caps: &Captures| {
            let quoted = caps[1]
                .split('\n')
                .map(|line| format!("> {}", line.trim()))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{quoted}\n\n")
        })
        .into_owned();

    markdown = PREFORMATTED
        .replace_all(&markdown, "```\n${1}\n```\n\n")
        .into_owned();
    markdown = INLINE_CODE.replace_all(&markdown, "`${1}`").into_owned();
    markdown = HORIZONTAL_RULE.replace_all(&markdown, "---\n\n").into_owned();

    let collapsed = BLANK_RUN.replace_all(&markdown, "\n\n");
    collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

pub(crate) fn html_to_text(html: &str) -> String {
    ANY_TAG.replace_all(html, "").into_owned()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    #[default]
    Markdown,
    Text,
}

impl ExportFormat {
    /// Пустой или отсутствующий параметр означает Markdown.
    pub(crate) fn parse_param(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw.map(str::trim) {
            None | Some("") | Some("markdown") | Some("md") => Ok(ExportFormat::Markdown),
            Some("text") | Some("txt") => Ok(ExportFormat::Text),
            Some(_) => Err(DomainError::validation("format", "must be markdown or text")),
        }
    }

    pub(crate) fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }

    pub(crate) fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    pub(crate) fn render(self, html: &str) -> String {
        match self {
            ExportFormat::Markdown => html_to_markdown(html),
            ExportFormat::Text => html_to_text(html),
        }
    }
}

pub(crate) fn export_filename(title: &str, format: ExportFormat) -> String {
    let stem = slugify(title);
    let stem = if stem.is_empty() { "blog-post" } else { &stem };
    format!("{stem}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::{ExportFormat, export_filename, html_to_markdown, html_to_text};

    #[test]
    fn converts_heading_and_bold_paragraph() {
        let markdown = html_to_markdown("<h1>Hi</h1><p>Bold: <strong>x</strong></p>");
        assert_eq!(markdown, "# Hi\n\nBold: **x**");
    }

    #[test]
    fn converts_all_heading_levels() {
        let markdown = html_to_markdown("<h2>a</h2><h3>b</h3><h4>c</h4><h5>d</h5><h6>e</h6>");
        assert_eq!(markdown, "## a\n\n### b\n\n#### c\n\n##### d\n\n###### e");
    }

    #[test]
    fn heading_tags_with_attributes_are_converted() {
        let markdown = html_to_markdown(r#"<H2 class="title">Section</H2>"#);
        assert_eq!(markdown, "## Section");
    }

    #[test]
    fn strips_script_and_style_blocks() {
        let html = "<style>\np { color: red; }\n</style><p>kept</p><script type=\"x\">\nalert(1)\n</script>";
        assert_eq!(html_to_markdown(html), "kept");
    }

    #[test]
    fn converts_inline_formatting_and_links() {
        let html = r#"<p><b>b</b> <em>e</em> <i>i</i> <a class="x" href="https://example.com">site</a></p>"#;
        assert_eq!(
            html_to_markdown(html),
            "**b** *e* *i* [site](https://example.com)"
        );
    }

    #[test]
    fn converts_line_breaks() {
        assert_eq!(html_to_markdown("<p>one<br>two<br/>three</p>"), "one\ntwo\nthree");
    }

    #[test]
    fn converts_unordered_list() {
        let html = "<ul><li>first</li><li>second</li></ul>";
        assert_eq!(html_to_markdown(html), "- first\n- second");
    }

    #[test]
    fn ordered_list_numbering_restarts_per_list() {
        let html = "<ol><li>a</li><li>b</li></ol><p>between</p><ol><li>c</li></ol>";
        assert_eq!(html_to_markdown(html), "1. a\n2. b\n\nbetween\n\n1. c");
    }

    #[test]
    fn prefixes_blockquote_lines() {
        let html = "<blockquote>first line\nsecond line</blockquote>";
        assert_eq!(html_to_markdown(html), "> first line\n> second line");
    }

    #[test]
    fn converts_code_blocks_and_inline_code() {
        let html = "<pre>\nlet x = 1;\n</pre>\n<p>use <code>x</code></p>";
        assert_eq!(
            html_to_markdown(html),
            "```\n\nlet x = 1;\n\n```\n\nuse `x`"
        );
    }

    #[test]
    fn single_line_pre_is_swallowed_by_paragraph_rule() {
        // `<p[^>]*>` совпадает и с `<pre>`, если `</p>` стоит в той же строке
        assert_eq!(html_to_markdown("<pre>a</pre><p>b</p>"), "a</pre><p>b");
    }

    #[test]
    fn converts_horizontal_rule() {
        assert_eq!(html_to_markdown("<p>a</p><hr/><p>b</p>"), "a\n\n---\n\nb");
    }

    #[test]
    fn collapses_blank_runs_and_trims_lines() {
        let html = "  <p>a</p>\n\n\n   \n<p>  b  </p>  ";
        assert_eq!(html_to_markdown(html), "a\n\nb");
    }

    #[test]
    fn unknown_tags_pass_through() {
        let html = r#"<table><tr><td>cell</td></tr></table><img src="a.png">"#;
        assert_eq!(html_to_markdown(html), html);
    }

    #[test]
    fn markdown_special_characters_are_not_escaped() {
        assert_eq!(html_to_markdown("<p>2 * 3 _x_</p>"), "2 * 3 _x_");
    }

    #[test]
    fn converting_output_again_is_a_no_op() {
        let inputs = [
            "<h1>Hi</h1><p>Bold: <strong>x</strong></p>",
            "<h2>List</h2><ul>\n<li><em>one</em></li>\n<li>two</li>\n</ul><hr>",
            "<ol><li>a</li><li><a href=\"/b\">b</a></li></ol><blockquote>\n<p>q</p>\n</blockquote>",
            "<p>x<br>y</p>\n<pre>\ncode\n</pre>\n<p><code>c</code></p>",
        ];

        for html in inputs {
            let once = html_to_markdown(html);
            assert_eq!(html_to_markdown(&once), once, "input: {html}");
        }
    }

    #[test]
    fn text_export_drops_every_tag() {
        assert_eq!(
            html_to_text("<h1>Title</h1><p>Body <b>bold</b></p>"),
            "TitleBody bold"
        );
    }

    #[test]
    fn export_format_renders_matching_body() {
        let html = "<p>Hello <em>world</em></p>";
        assert_eq!(ExportFormat::Markdown.render(html), "Hello *world*");
        assert_eq!(ExportFormat::Text.render(html), "Hello world");
    }

    #[test]
    fn export_filename_is_derived_from_title() {
        assert_eq!(
            export_filename("  My First Post!  ", ExportFormat::Markdown),
            "my-first-post-.md"
        );
        assert_eq!(export_filename("Notes", ExportFormat::Text), "notes.txt");
        assert_eq!(export_filename("   ", ExportFormat::Markdown), "blog-post.md");
    }

    #[test]
    fn export_format_param_defaults_to_markdown() {
        assert_eq!(ExportFormat::parse_param(None).expect("valid"), ExportFormat::Markdown);
        assert_eq!(ExportFormat::parse_param(Some("text")).expect("valid"), ExportFormat::Text);
        assert!(ExportFormat::parse_param(Some("pdf")).is_err());
    }
}
