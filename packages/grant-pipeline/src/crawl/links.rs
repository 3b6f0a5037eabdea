//! Anchor extraction, keyword matching and URL normalization.

use scraper::{Html, Selector};
use url::Url;

/// Keywords that mark a link as likely to describe a grant.
pub const GRANT_KEYWORDS: &[&str] = &[
    "grant",
    "apply",
    "fund",
    "fellowship",
    "opportunity",
    "scholarship",
    "award",
    "funding",
    "faq",
    "eligibility",
    "criteria",
    "how-to-apply",
    "guidelines",
    "about",
    "programs",
];

/// Keywords that mark a link as likely to describe the organization itself.
pub const ORGANIZATION_KEYWORDS: &[&str] = &[
    "home",
    "about",
    "faq",
    "contact",
    "reach",
    "mission",
    "vision",
    "history",
    "background",
    "team",
    "staff",
    "board",
    "leadership",
    "who-we-are",
    "our-story",
    "get-in-touch",
    "reach-us",
    "contact-us",
    "about-us",
    "our-vision",
    "what-we-do",
    "help",
    "support",
];

/// Case-insensitive substring filter over raw href values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords(Vec<String>);

impl Keywords {
    pub fn grant() -> Self {
        Self::custom(GRANT_KEYWORDS.iter().copied())
    }

    pub fn organization() -> Self {
        Self::custom(ORGANIZATION_KEYWORDS.iter().copied())
    }

    pub fn custom(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(
            words
                .into_iter()
                .map(|w| w.into().to_lowercase())
                .collect(),
        )
    }

    /// True when the lowercased href contains any keyword.
    pub fn matches(&self, href: &str) -> bool {
        let href = href.to_lowercase();
        self.0.iter().any(|word| href.contains(word.as_str()))
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }
}

/// Every `href` value of every `<a>` in document order.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

/// Resolve an href against the page it was found on.
///
/// Returns `None` for in-page anchors, `mailto:`/`tel:`/`javascript:`
/// links, unparsable values and anything that is not http(s). The fragment
/// is dropped so `/apply#form` and `/apply` collapse to one candidate.
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    let lower = href.to_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("javascript:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved)
}

/// Parse a root URL and strip its fragment.
pub fn normalize_root(root: &str) -> Option<Url> {
    let mut url = Url::parse(root.trim()).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
