/// Suffix table, checked in order; the first suffix found anywhere in the
/// file name wins.
const TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".gif", "image/gif"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
];

const FALLBACK: &str = "text/plain";

/// Picks the `Content-type` for a static file.
///
/// Matching is by substring, not by extension, so `page.html.bak` is still
/// `text/html`.
///
/// ```
/// # use tiny::http::mime::content_type;
/// assert_eq!(content_type("./home.html"), "text/html");
/// assert_eq!(content_type("./godzilla.jpg"), "image/jpeg");
/// assert_eq!(content_type("./notes.txt"), "text/plain");
/// ```
pub fn content_type(filename: &str) -> &'static str {
    TYPES
        .iter()
        .find(|(suffix, _)| filename.contains(suffix))
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK)
}
