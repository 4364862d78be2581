//! Formatting helpers for log lines and clock displays.

use std::time::Duration;

const MAX_PREVIEW: usize = 120;

/// Make player-supplied text safe for a single log line.
///
/// Control characters and backslashes are escaped with Rust escape syntax;
/// text past the preview limit is cut with an ellipsis.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        if ch == '\\' || ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `m:ss`, rounding down to the whole second.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
