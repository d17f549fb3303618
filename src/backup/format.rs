//! Display helpers for backup files.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

const STAMP_PREFIX: &str = "backup_";
const RESTORABLE_EXTENSIONS: [&str; 3] = [".sqlite", ".db", ".zip"];

/// Finds the first `backup_<8 digits>_<6 digits>` run in `filename` and
/// returns its two digit groups.
fn find_stamp(filename: &str) -> Option<(&str, &str)> {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    filename.match_indices(STAMP_PREFIX).find_map(|(start, _)| {
        let rest = filename.get(start + STAMP_PREFIX.len()..)?;
        let date = rest.get(..8)?;
        let time = rest.get(9..15)?;
        (all_digits(date) && rest.as_bytes()[8] == b'_' && all_digits(time)).then_some((date, time))
    })
}

/// `backup_20240115_143000.sqlite` becomes `2024-01-15 14:30:00`; names
/// without a stamp are returned unchanged.
pub fn format_backup_date(filename: &str) -> String {
    match find_stamp(filename) {
        Some((date, time)) => format!(
            "{}-{}-{} {}:{}:{}",
            &date[..4],
            &date[4..6],
            &date[6..],
            &time[..2],
            &time[2..4],
            &time[4..]
        ),
        None => filename.to_string(),
    }
}

/// Calendar-checked timestamp of the stamp, if any.
pub fn parse_backup_timestamp(filename: &str) -> Option<NaiveDateTime> {
    let (date, time) = find_stamp(filename)?;
    NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S").ok()
}

/// Human-readable size, 1024-based, at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

pub fn is_restorable(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    RESTORABLE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Name to save a downloaded backup under: the `filename=` value of the
/// content disposition reduced to its last path component, else a
/// timestamped default.
pub fn resolve_download_filename(content_disposition: Option<&str>, compress: bool, now: DateTime<Utc>) -> String {
    content_disposition
        .and_then(disposition_filename)
        .unwrap_or_else(|| {
            let extension = if compress { "zip" } else { "sqlite" };
            format!("backup_{}.{}", now.to_rfc3339_opts(SecondsFormat::Millis, true), extension)
        })
}

fn disposition_filename(header: &str) -> Option<String> {
    let (_, value) = header.split_once("filename=")?;
    let value = value.split(';').next().unwrap_or_default().trim().replace('"', "");
    Path::new(&value)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
