use crate::config::CsvBuilderConfig;
use crate::core::derived;
use crate::core::language::{LanguageFilter, Rejection};
use crate::core::urls::UrlExtractor;
use crate::domain::model::{FieldPath, Record};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_field_path, validate_field_paths};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

/// `handle_status` 的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Skipped(Rejection),
}

/// 把一筆筆 status 投影成 CSV 行。
///
/// 欄位順序：`fields`、衍生欄位（word_count、normalized_source、日期）、`url_1..url_N`。
/// 每個欄位都加雙引號，行尾是單一 `\n`，每寫一行就 flush。沒有任何欄位時每行只有 `\n`。
pub struct CsvBuilder<W: Write> {
    fields: Vec<FieldPath>,
    date_fields: Vec<FieldPath>,
    text_field: FieldPath,
    source_field: FieldPath,
    compute_word_count: bool,
    normalize_source: bool,
    urls: UrlExtractor,
    language: Option<LanguageFilter>,
    format: WriterBuilder,
    line: Vec<u8>,
    sink: W,
}

impl<W: Write> CsvBuilder<W> {
    pub fn new(config: &CsvBuilderConfig, sink: W) -> Result<Self> {
        let text_field = validate_field_path("text_field", &config.text_field)?;
        // 不論是否過濾語言，language_field 都必須合法
        let language_field = validate_field_path("language_field", &config.language_field)?;
        let language = config.require_english.then(|| {
            LanguageFilter::new(language_field, text_field.clone(), config.check_text_language)
        });

        let mut format = WriterBuilder::new();
        format
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'));

        Ok(Self {
            fields: validate_field_paths("fields", &config.fields)?,
            date_fields: validate_field_paths("date_fields", &config.date_fields)?,
            source_field: validate_field_path("source_field", &config.source_field)?,
            text_field,
            compute_word_count: config.compute_word_count,
            normalize_source: config.normalize_source,
            urls: UrlExtractor::new(config.url_columns),
            language,
            format,
            line: Vec::new(),
            sink,
        })
    }

    pub fn header_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.fields.iter().map(|f| f.as_str().to_string()).collect();

        if self.compute_word_count {
            labels.push("word_count".to_string());
        }
        if self.normalize_source {
            labels.push("normalized_source".to_string());
        }
        for date_field in &self.date_fields {
            labels.extend(derived::date_labels(date_field.as_str()));
        }

        labels.extend(self.urls.header_labels());
        labels
    }

    pub fn log_csv_header(&mut self) -> Result<()> {
        let labels = self.header_labels();
        tracing::debug!("📝 Writing CSV header with {} columns", labels.len());
        self.write_line(&labels)
    }

    /// 每個設定路徑一格；找不到就是空字串
    pub fn field_cells(&self, record: &Record) -> Vec<String> {
        self.fields.iter().map(|path| record.cell(path)).collect()
    }

    pub fn derived_cells(&self, record: &Record) -> Vec<String> {
        let mut cells = Vec::new();

        if self.compute_word_count {
            cells.push(derived::word_count(record.text_at(&self.text_field)).to_string());
        }
        if self.normalize_source {
            let source = record.text_at(&self.source_field).unwrap_or_default();
            cells.push(derived::normalize_source(source));
        }
        for date_field in &self.date_fields {
            cells.extend(derived::date_cells(record.text_at(date_field)));
        }

        cells
    }

    pub fn url_cells(&self, record: &Record) -> Vec<String> {
        if self.urls.columns() == 0 {
            return Vec::new();
        }
        self.urls.cells(record.text_at(&self.text_field))
    }

    pub fn row(&self, record: &Record) -> Vec<String> {
        let mut row = self.field_cells(record);
        row.extend(self.derived_cells(record));
        row.extend(self.url_cells(record));
        row
    }

    pub fn check(&self, record: &Record) -> std::result::Result<(), Rejection> {
        match &self.language {
            Some(filter) => filter.check(record),
            None => Ok(()),
        }
    }

    pub fn handle_status(&mut self, record: &Record) -> Result<Outcome> {
        if let Err(rejection) = self.check(record) {
            tracing::debug!(
                "⏭️ Skipping \"{}\" due to {}",
                record.text_at(&self.text_field).unwrap_or_default(),
                rejection
            );
            return Ok(Outcome::Skipped(rejection));
        }

        let row = self.row(record);
        self.write_line(&row)?;
        Ok(Outcome::Written)
    }

    fn write_line(&mut self, cells: &[String]) -> Result<()> {
        if cells.is_empty() {
            // csv 會把空紀錄寫成 `""`，零欄要的是空行
            self.sink.write_all(b"\n")?;
        } else {
            let mut line = self.format.from_writer(std::mem::take(&mut self.line));
            line.write_record(cells)?;
            let mut bytes = line
                .into_inner()
                .map_err(|e| EtlError::IoError(e.into_error()))?;
            self.sink.write_all(&bytes)?;
            bytes.clear();
            self.line = bytes;
        }
        self.sink.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> Result<W> {
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(fields: &[&str]) -> CsvBuilderConfig {
        CsvBuilderConfig {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            ..CsvBuilderConfig::default()
        }
    }

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn output(builder: CsvBuilder<Vec<u8>>) -> String {
        String::from_utf8(builder.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_outputs_fields_in_dot_notation() {
        let mut builder = CsvBuilder::new(
            &config(&["something", "something_else.a", "something_else.c.d"]),
            Vec::new(),
        )
        .unwrap();

        let outcome = builder
            .handle_status(&record(json!({
                "something": "hello",
                "something_else": {
                    "a": "b",
                    "c": {"d": "foo", "e": "bar"},
                    "blah": "hi"
                }
            })))
            .unwrap();

        assert_eq!(outcome, Outcome::Written);
        assert_eq!(output(builder), "\"hello\",\"b\",\"foo\"\n");
    }

    #[test]
    fn test_missing_paths_become_empty_cells() {
        let builder = CsvBuilder::new(
            &config(&["text", "user.lang", "text.length", "absent", "text"]),
            Vec::new(),
        )
        .unwrap();
        let status = record(json!({"text": "hi", "user": "not a mapping"}));

        assert_eq!(builder.row(&status), vec!["hi", "", "", "", "hi"]);
        assert_eq!(builder.row(&status), builder.row(&status));
    }

    #[test]
    fn test_header_labels_with_urls() {
        let mut builder = CsvBuilder::new(
            &CsvBuilderConfig {
                url_columns: 2,
                ..config(&["something"])
            },
            Vec::new(),
        )
        .unwrap();

        builder.log_csv_header().unwrap();
        assert_eq!(output(builder), "\"something\",\"url_1\",\"url_2\"\n");
    }

    #[test]
    fn test_header_with_derived_columns() {
        let builder = CsvBuilder::new(
            &CsvBuilderConfig {
                url_columns: 1,
                compute_word_count: true,
                normalize_source: true,
                date_fields: vec!["created_at".to_string()],
                ..config(&["id"])
            },
            Vec::new(),
        )
        .unwrap();

        let labels = builder.header_labels();
        assert_eq!(labels.len(), 1 + 1 + 1 + 7 + 1);
        assert_eq!(labels[..3], ["id", "word_count", "normalized_source"]);
        assert_eq!(labels[3], "created_at_week_day");
        assert_eq!(labels.last().unwrap(), "url_1");
    }

    #[test]
    fn test_derived_cells() {
        let builder = CsvBuilder::new(
            &CsvBuilderConfig {
                compute_word_count: true,
                normalize_source: true,
                date_fields: vec!["created_at".to_string()],
                ..config(&[])
            },
            Vec::new(),
        )
        .unwrap();

        let status = record(json!({
            "text": "four words right here",
            "source": "<a href=\"http://x.com\">Tweet Deck</a>",
            "created_at": "Wed Aug 27 13:08:45 +0000 2008"
        }));

        assert_eq!(
            builder.row(&status),
            vec!["4", "tweet_deck", "Wed", "27", "8", "2008", "13", "8", "45"]
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut builder = CsvBuilder::new(&config(&["text"]), Vec::new()).unwrap();
        builder
            .handle_status(&record(json!({"text": "say \"hi\", then go"})))
            .unwrap();

        assert_eq!(output(builder), "\"say \"\"hi\"\", then go\"\n");
    }

    #[test]
    fn test_skipped_status_writes_nothing() {
        let mut builder = CsvBuilder::new(
            &CsvBuilderConfig {
                require_english: true,
                ..config(&["text"])
            },
            Vec::new(),
        )
        .unwrap();

        let outcome = builder
            .handle_status(&record(json!({"text": "Bonjour", "user": {"lang": "fr"}})))
            .unwrap();

        assert!(matches!(outcome, Outcome::Skipped(Rejection::DeclaredLanguage(_))));
        assert!(builder.get_ref().is_empty());
    }

    #[test]
    fn test_invalid_field_path_is_rejected() {
        let result = CsvBuilder::new(&config(&["user..lang"]), Vec::new());
        assert!(matches!(
            result,
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_bad_language_field_is_rejected_even_when_unused() {
        let result = CsvBuilder::new(
            &CsvBuilderConfig {
                language_field: "user.".to_string(),
                ..config(&["text"])
            },
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(EtlError::InvalidConfigValueError { ref field, .. }) if field == "language_field"
        ));
    }

    #[test]
    fn test_zero_columns_write_empty_lines() {
        let mut builder = CsvBuilder::new(&config(&[]), Vec::new()).unwrap();
        assert!(builder.header_labels().is_empty());

        builder.log_csv_header().unwrap();
        builder.handle_status(&record(json!({"text": "hi"}))).unwrap();
        assert_eq!(output(builder), "\n\n");
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut builder = CsvBuilder::new(&config(&["text"]), FailingSink).unwrap();
        let result = builder.handle_status(&record(json!({"text": "hello"})));

        assert!(result.is_err());
    }
}
