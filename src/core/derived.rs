use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use regex::Regex;
use std::sync::OnceLock;

/// 平台的 `created_at` 格式，例如 `Wed Aug 27 13:08:45 +0000 2008`
pub const STATUS_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

pub const DATE_COLUMN_SUFFIXES: [&str; 7] =
    ["week_day", "day", "month", "year", "hour", "minute", "second"];

fn html_tag_re() -> &'static Regex {
    static HTML_TAG_RE: OnceLock<Regex> = OnceLock::new();
    HTML_TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid html tag regex"))
}

pub fn word_count(text: Option<&str>) -> usize {
    text.map_or(0, |text| text.split_whitespace().count())
}

/// `<a href="...">Twitter for iPhone</a>` → `twitter_for_iphone`
pub fn normalize_source(source: &str) -> String {
    html_tag_re()
        .replace_all(source, "")
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn parse_status_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, STATUS_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

pub fn date_labels(field: &str) -> Vec<String> {
    DATE_COLUMN_SUFFIXES
        .iter()
        .map(|suffix| format!("{}_{}", field, suffix))
        .collect()
}

/// 拆成七個欄位；無法解析時全部留空
pub fn date_cells(raw: Option<&str>) -> Vec<String> {
    match raw.and_then(parse_status_date) {
        Some(time) => vec![
            time.format("%a").to_string(),
            time.day().to_string(),
            time.month().to_string(),
            time.year().to_string(),
            time.hour().to_string(),
            time.minute().to_string(),
            time.second().to_string(),
        ],
        None => vec![String::new(); DATE_COLUMN_SUFFIXES.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(Some("this is  http://a.com/url\tand more")), 5);
        assert_eq!(word_count(Some("   ")), 0);
        assert_eq!(word_count(None), 0);
    }

    #[test]
    fn test_normalize_source() {
        assert_eq!(
            normalize_source(r#"<a href="http://twitter.com/download/iphone" rel="nofollow">Twitter for iPhone</a>"#),
            "twitter_for_iphone"
        );
        assert_eq!(normalize_source("web"), "web");
        assert_eq!(normalize_source(""), "");
    }

    #[test]
    fn test_date_cells() {
        assert_eq!(
            date_cells(Some("Wed Aug 27 13:08:45 +0000 2008")),
            vec!["Wed", "27", "8", "2008", "13", "8", "45"]
        );
        assert_eq!(
            date_cells(Some("2012-03-04T05:06:07Z")),
            vec!["Sun", "4", "3", "2012", "5", "6", "7"]
        );
        assert_eq!(date_cells(Some("yesterday")), vec![""; 7]);
        assert_eq!(date_cells(None), vec![""; 7]);
    }

    #[test]
    fn test_date_labels() {
        assert_eq!(
            date_labels("created_at"),
            vec![
                "created_at_week_day",
                "created_at_day",
                "created_at_month",
                "created_at_year",
                "created_at_hour",
                "created_at_minute",
                "created_at_second"
            ]
        );
    }
}
