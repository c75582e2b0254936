//! HTML escaping for block markup.

/// Escape text for use inside an HTML element.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape text for use inside a double-quoted attribute value.
///
/// Quotes are always encoded, and so are line breaks, which some
/// consumers normalise away inside attributes.
pub fn escape_attr(s: &str) -> String {
    html_escape(s)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}
