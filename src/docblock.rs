//! Docblock text cleanup.
//!
//! Tag descriptions arrive from the analyzer with HTML entities, markup and
//! list tags embedded in the free text. Cleaned descriptions end up inside
//! Markdown table cells, which is where the two non-obvious rules come from:
//!
//! - Literal pipe characters are escaped (`|` → `\|`) so they cannot break
//!   table rows. Display signatures are not table cells, so the signature
//!   builder un-escapes them again.
//! - HTML list markers become an indented-bullet plain-text form
//!   (`    * item`) that still reads as a nested list when rendered.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches blank lines (horizontal whitespace followed by line breaks).
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\r?\n").expect("blank-line pattern"));

/// Matches any HTML/XML tag.
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup pattern"));

/// Matches bare http(s) URLs in running text.
static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?://([-\w.]+)+(:\d+)?(/([\w/_.\-]*(\?\S+)?)?)?)").expect("url pattern")
});

// ============================================================================
// Entity and Markup Stripping
// ============================================================================

/// Decode the HTML entities the analyzer emits in description text.
///
/// `&amp;` is decoded last so `&amp;lt;` comes out as `&lt;`, not `<`.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Remove every HTML/XML tag, keeping the text between tags.
pub fn strip_tags(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// Decode entities, then strip tags.
pub fn strip_markup(text: &str) -> String {
    strip_tags(&decode_entities(text))
}

// ============================================================================
// Table-Cell Escaping
// ============================================================================

/// Escape literal pipes so text can sit inside a Markdown table cell.
pub fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Undo [`escape_pipes`]; used when embedding types in display signatures,
/// which are rendered as code blocks rather than table cells.
pub fn unescape_pipes(text: &str) -> String {
    text.replace("\\|", "|")
}

// ============================================================================
// Description Cleanup
// ============================================================================

/// Remove blank lines left behind by markup stripping.
pub fn remove_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "").into_owned()
}

/// Clean a `@param` tag description for table embedding.
///
/// `<li>` markers are translated before the remaining markup is stripped, so
/// list items keep their structure as indented bullets.
pub fn clean_param_description(text: &str) -> String {
    let text = decode_entities(text);
    let text = text.replace("<li>", "    * ");
    let text = strip_tags(&text);
    let text = remove_blank_lines(&text);
    escape_pipes(&text)
}

/// Clean a `@return` tag description for table embedding.
///
/// Return descriptions use plain `- ` list markers rather than HTML lists.
pub fn clean_return_description(text: &str) -> String {
    let text = strip_markup(text);
    let text = escape_pipes(&text);
    text.replace("- ", "    * ")
}

/// Rewrite bare http(s) URLs as Markdown links.
pub fn autolink_urls(text: &str) -> String {
    BARE_URL.replace_all(text, "[$1]($1)").into_owned()
}

/// Convert newlines to `<br>` so multi-line descriptions survive inside
/// Markdown table cells.
pub fn nl_to_br(text: &str) -> String {
    text.replace('\n', "<br>\n")
}

// ============================================================================
// Tests
// ============================================================================
