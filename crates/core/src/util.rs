//! Small helpers shared across modules.

/// Reduce a topic name to a filesystem- and hashtag-safe token.
///
/// Alphanumerics are kept, everything else becomes an underscore, runs of
/// underscores collapse to one.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    out.trim_matches('_').to_string()
}
