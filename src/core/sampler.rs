use crate::core::flatten::extract_from_map;
use crate::domain::model::{FieldCounts, Record};

const REPORT_PATH_WIDTH: usize = 60;

/// 統計前 N 筆 status 中出現過的欄位路徑
#[derive(Debug, Clone, Default)]
pub struct FieldSampler {
    counts: FieldCounts,
    observed: usize,
    limit: usize,
}

impl FieldSampler {
    pub fn new(limit: usize) -> Self {
        Self {
            counts: FieldCounts::new(),
            observed: 0,
            limit,
        }
    }

    /// 回傳 true 表示已達取樣上限
    pub fn observe(&mut self, record: &Record) -> bool {
        if !self.is_full() {
            extract_from_map(&record.data, None, &mut self.counts);
            self.observed += 1;
        }
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.observed >= self.limit
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    pub fn counts(&self) -> &FieldCounts {
        &self.counts
    }

    pub fn into_counts(self) -> FieldCounts {
        self.counts
    }

    pub fn report(&self) -> String {
        let mut report = format!("Sampled fields from {} statuses:\n", self.observed);
        for (field, count) in &self.counts {
            let padding = REPORT_PATH_WIDTH.saturating_sub(field.chars().count());
            report.push_str(&format!(" {}{} {}\n", field, " ".repeat(padding), count));
        }
        report
    }
}
