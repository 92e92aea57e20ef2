use std::time::Duration;

use unicode_width::UnicodeWidthStr;

pub fn truncate_to_millis(d: Duration) -> Duration {
    Duration::from_millis(d.as_millis() as u64)
}

/// Formats a duration as `1h2m3.456s`, `12.3s` or `450ms`, dropping trailing
/// zeros from the fractional seconds.
pub fn format_record(d: Duration) -> String {
    let total_ms = d.as_millis();
    if total_ms == 0 {
        return "0s".to_string();
    }
    if total_ms < 1000 {
        return format!("{}ms", total_ms);
    }

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    out.push_str(&secs.to_string());
    if millis > 0 {
        let frac = format!("{:03}", millis);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out.push('s');
    out
}

/// Right-pads every line to the display width of the widest one, so a block
/// keeps its left edge when each line is centered on its own.
pub fn pad_block(lines: &[&str]) -> Vec<String> {
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    lines
        .iter()
        .map(|l| format!("{}{}", l, " ".repeat(width - l.width())))
        .collect()
}
