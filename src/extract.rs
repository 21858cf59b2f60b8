//! Extraction of the documentation article from a command page.
//!
//! The page's `<main>` landmark must contain an `<article>`. The article is
//! serialized back to HTML with two changes applied on the way out:
//!
//! - the first `<nav>` inside the article (the breadcrumb bar) is dropped
//! - every `href` / `src` value starting with `/docs/` is made absolute
//!   against the site origin

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{DocsError, Result};

const RELATIVE_DOCS_PREFIX: &str = "/docs/";
const REWRITTEN_ATTRIBUTES: &[&str] = &["href", "src"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style",
    "script",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "plaintext",
    "noscript",
];

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| DocsError::extraction(format!("invalid selector {css:?}: {e:?}")))
}

/// Extracts the article fragment of `command_name`'s page.
///
/// `site_origin` is prepended to `/docs/` links, e.g. `https://developer.4d.com`.
pub fn extract_article(html: &str, command_name: &str, site_origin: &str) -> Result<String> {
    let document = Html::parse_document(html);

    let main = document.select(&selector("main")?).next().ok_or_else(|| {
        DocsError::extraction(format!(
            "No <main> tag found for command: {command_name} (no container found)"
        ))
    })?;

    let article = main.select(&selector("article")?).next().ok_or_else(|| {
        DocsError::extraction(format!(
            "No <article> tag found in <main> for command: {command_name} (no article found)"
        ))
    })?;

    let breadcrumb = article.select(&selector("nav")?).next();
    if breadcrumb.is_some() {
        tracing::debug!("Dropping breadcrumb <nav> from article for {}", command_name);
    }

    let mut out = String::with_capacity(html.len() / 2);
    let writer = FragmentWriter {
        skip: breadcrumb,
        site_origin: site_origin.trim_end_matches('/'),
    };
    writer.write_element(article, &mut out);
    Ok(out)
}

struct FragmentWriter<'a> {
    skip: Option<ElementRef<'a>>,
    site_origin: &'a str,
}

impl<'a> FragmentWriter<'a> {
    fn write_element(&self, element: ElementRef<'a>, out: &mut String) {
        if self.skip == Some(element) {
            return;
        }

        let value = element.value();
        let name = value.name();

        out.push('<');
        out.push_str(name);
        for (attr, attr_value) in value.attrs() {
            out.push(' ');
            out.push_str(attr);
            out.push_str("=\"");
            let rewritten = self.rewrite(attr, attr_value);
            escape_into(&rewritten, true, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&name) {
            return;
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&name);
        for child in element.children() {
            match child.value() {
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        self.write_element(el, out);
                    }
                }
                Node::Text(text) if raw_text => out.push_str(text),
                Node::Text(text) => escape_into(text, false, out),
                Node::Comment(comment) => {
                    out.push_str("<!--");
                    out.push_str(comment);
                    out.push_str("-->");
                }
                _ => {}
            }
        }

        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }

    fn rewrite(&self, attr: &str, value: &str) -> String {
        if REWRITTEN_ATTRIBUTES.contains(&attr) && value.starts_with(RELATIVE_DOCS_PREFIX) {
            format!("{}{}", self.site_origin, value)
        } else {
            value.to_string()
        }
    }
}

/// Escapes text for use in HTML element content.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, false, &mut out);
    out
}

fn escape_into(text: &str, in_attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
