//! Main-content extraction.
//!
//! Picks the page's main region (or the body minus navigation chrome),
//! converts it to Markdown with htmd, and falls back to the raw HTML when
//! nothing readable comes out. The model copes with HTML far better than
//! with an empty prompt.

use scraper::{Html, Selector};

/// Selectors tried in order for the primary content region.
const MAIN_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    "#content",
    "#main",
    ".content",
    ".main",
    ".post-content",
    ".entry-content",
];

/// Site chrome removed when falling back to `<body>`.
const BOILERPLATE: &[&str] = &[
    "nav",
    "header",
    "footer",
    "aside",
    ".nav",
    ".navbar",
    ".header",
    ".footer",
    ".sidebar",
    ".menu",
    ".advertisement",
    ".ads",
    "#nav",
    "#header",
    "#footer",
    "#sidebar",
];

/// Never useful to the model, wherever it appears.
const NOISE: &[&str] = &["script", "style", "noscript", "iframe", "template"];

/// Cleaned text of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub text: String,
    pub title: Option<String>,
    /// True when extraction came up empty and `text` is the raw HTML.
    pub used_fallback: bool,
}

impl PageText {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extract readable Markdown from an HTML document.
pub fn extract_page_text(html: &str) -> PageText {
    let document = Html::parse_document(html);
    let title = extract_title(&document);

    let content_html = main_content_html(&document);
    let markdown = collapse_blank_lines(&html_to_markdown(&content_html));

    if markdown.trim().is_empty() {
        tracing::debug!(html_len = html.len(), "Text extraction empty, using raw HTML");
        return PageText {
            text: html.to_string(),
            title,
            used_fallback: true,
        };
    }

    PageText {
        text: markdown,
        title,
        used_fallback: false,
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn main_content_html(document: &Html) -> String {
    for selector_str in MAIN_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(main) = document.select(&selector).next() {
                let html = main.html();
                if has_text(&main.text().collect::<String>()) {
                    return remove_elements(&html, NOISE);
                }
            }
        }
    }

    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            let html = remove_elements(&body.html(), NOISE);
            return remove_elements(&html, BOILERPLATE);
        }
    }

    remove_elements(&document.html(), NOISE)
}

/// Drop every element matching any selector from an HTML string.
fn remove_elements(html: &str, selectors: &[&str]) -> String {
    let document = Html::parse_document(html);
    let mut result = html.to_string();
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                result = result.replace(&element.html(), "");
            }
        }
    }
    result
}

fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_else(|_| {
        let document = Html::parse_document(html);
        document.root_element().text().collect::<String>()
    })
}

fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}

fn has_text(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric())
}
