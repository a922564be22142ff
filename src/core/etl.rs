use crate::core::csv_builder::{CsvBuilder, Outcome};
use crate::core::sampler::FieldSampler;
use crate::domain::ports::RecordSource;
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub read: usize,
    pub written: usize,
    pub skipped: usize,
}

/// 依序把來源的每筆 status 交給 CsvBuilder，可選擇同時輸出 JSON lines
pub struct EtlEngine<W: Write> {
    builder: CsvBuilder<W>,
    json_sink: Option<Box<dyn Write>>,
    write_header: bool,
}

impl<W: Write> EtlEngine<W> {
    pub fn new(builder: CsvBuilder<W>) -> Self {
        Self {
            builder,
            json_sink: None,
            write_header: true,
        }
    }

    pub fn with_json_sink(mut self, sink: Box<dyn Write>) -> Self {
        self.json_sink = Some(sink);
        self
    }

    pub fn with_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    pub fn run<S: RecordSource>(&mut self, source: &mut S) -> Result<RunSummary> {
        tracing::info!("🚀 Starting status conversion");

        if self.write_header {
            self.builder.log_csv_header()?;
        }

        let mut summary = RunSummary::default();
        while let Some(record) = source.next_record()? {
            summary.read += 1;

            match self.builder.handle_status(&record)? {
                Outcome::Written => {
                    summary.written += 1;
                    if let Some(sink) = self.json_sink.as_mut() {
                        serde_json::to_writer(&mut *sink, &record)?;
                        sink.write_all(b"\n")?;
                        sink.flush()?;
                    }
                }
                Outcome::Skipped(_) => summary.skipped += 1,
            }
        }

        tracing::info!(
            "✅ Conversion complete: {} read, {} written, {} skipped",
            summary.read,
            summary.written,
            summary.skipped
        );
        Ok(summary)
    }

    /// 只統計欄位不寫 CSV；語言過濾照樣套用
    pub fn sample<S: RecordSource>(&self, source: &mut S, limit: usize) -> Result<FieldSampler> {
        tracing::info!("🔍 Sampling fields from up to {} statuses", limit);

        let mut sampler = FieldSampler::new(limit);
        while !sampler.is_full() {
            let Some(record) = source.next_record()? else {
                break;
            };
            if self.builder.check(&record).is_ok() {
                sampler.observe(&record);
            }
        }

        tracing::info!(
            "🔍 Sampled {} statuses, {} distinct fields",
            sampler.observed(),
            sampler.counts().len()
        );
        Ok(sampler)
    }

    pub fn builder(&self) -> &CsvBuilder<W> {
        &self.builder
    }

    pub fn into_builder(self) -> CsvBuilder<W> {
        self.builder
    }
}
