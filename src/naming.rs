//! Pure derivations from a command name: URL slug, documentation URL and
//! cache key. None of these touch the cache or the network.

use itertools::Itertools;

/// Documentation pages for commands live under this path.
pub const DOCS_BASE_URL: &str = "https://developer.4d.com/docs/commands";

/// Origin prepended to site-relative `/docs/` links found in extracted pages.
pub const SITE_ORIGIN: &str = "https://developer.4d.com";

/// Lower-cases the name and replaces each run of whitespace with a single `-`.
///
/// ```
/// use mcp_4d_docs::naming::command_slug;
/// assert_eq!(command_slug("ARRAY TO LIST"), "array-to-list");
/// ```
pub fn command_slug(command_name: &str) -> String {
    command_name
        .to_lowercase()
        .chars()
        .chunk_by(|c| c.is_whitespace())
        .into_iter()
        .map(|(is_space, run)| {
            if is_space {
                "-".to_string()
            } else {
                run.collect::<String>()
            }
        })
        .collect()
}

/// Builds the documentation URL for a command against `base_url`.
pub fn command_url_with_base(base_url: &str, command_name: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        command_slug(command_name)
    )
}

/// Documentation URL on the public 4D developer site.
pub fn command_url(command_name: &str) -> String {
    command_url_with_base(DOCS_BASE_URL, command_name)
}

/// Hex MD5 digest of the raw command name bytes.
///
/// No case folding or trimming happens first, so `"foo"` and `"Foo"` get
/// different keys even though they share a URL.
pub fn cache_key(command_name: &str) -> String {
    format!("{:x}", md5::compute(command_name.as_bytes()))
}

/// File name of the cache entry holding a command's fragment.
pub fn cache_file_name(command_name: &str) -> String {
    format!("{}.html", cache_key(command_name))
}
