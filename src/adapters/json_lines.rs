use crate::domain::model::Record;
use crate::domain::ports::RecordSource;
use crate::utils::error::{EtlError, Result};
use std::io::BufRead;

/// 每行一個 JSON 物件的輸入
pub struct JsonLinesSource<R: BufRead> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> RecordSource for JsonLinesSource<R> {
    fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            let value: serde_json::Value =
                serde_json::from_str(trimmed).map_err(|source| EtlError::RecordParseError {
                    line: self.line,
                    source,
                })?;

            match Record::from_value(value) {
                Ok(record) => return Ok(Some(record)),
                Err(other) => {
                    tracing::warn!(
                        "🔶 Skipping line {}: expected a JSON object, got {}",
                        self.line,
                        json_kind(&other)
                    );
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for JsonLinesSource<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
