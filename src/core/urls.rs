use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn url_candidate_re() -> &'static Regex {
    static URL_CANDIDATE_RE: OnceLock<Regex> = OnceLock::new();
    URL_CANDIDATE_RE.get_or_init(|| Regex::new(r"(?i)https?://\S+").expect("valid url regex"))
}

/// 依出現順序找出文字中的 http(s) URL，不去重
pub fn find_urls(text: &str) -> Vec<&str> {
    url_candidate_re()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| Url::parse(candidate).is_ok())
        .collect()
}

/// 把 URL 填進固定數量的欄位：不足補空字串，多的丟棄
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlExtractor {
    columns: usize,
}

impl UrlExtractor {
    pub fn new(columns: usize) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn header_labels(&self) -> Vec<String> {
        (1..=self.columns).map(|i| format!("url_{}", i)).collect()
    }

    pub fn cells(&self, text: Option<&str>) -> Vec<String> {
        if self.columns == 0 {
            return Vec::new();
        }

        let mut cells: Vec<String> = text
            .map(find_urls)
            .unwrap_or_default()
            .into_iter()
            .take(self.columns)
            .map(str::to_string)
            .collect();
        cells.resize(self.columns, String::new());
        cells
    }
}
