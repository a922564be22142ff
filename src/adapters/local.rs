use crate::utils::error::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// 本機檔案的開啟方式；路徑為 `None` 或 `-` 時使用 stdin/stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

/// 已開啟的 CSV 輸出，`needs_header` 為 false 代表是接續寫入既有內容
pub struct CsvTarget {
    pub writer: Box<dyn Write>,
    pub needs_header: bool,
}

impl LocalFiles {
    pub fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>> {
        match path {
            Some(path) if path != "-" => Ok(Box::new(BufReader::new(File::open(path)?))),
            _ => Ok(Box::new(BufReader::new(io::stdin()))),
        }
    }

    pub fn open_csv(path: Option<&str>, append: bool) -> Result<CsvTarget> {
        let path = match path {
            Some(path) if path != "-" => Path::new(path),
            _ => {
                return Ok(CsvTarget {
                    writer: Box::new(io::stdout()),
                    needs_header: true,
                })
            }
        };

        Self::create_parent(path)?;

        let has_content = append && fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            File::create(path)?
        };

        Ok(CsvTarget {
            writer: Box::new(BufWriter::new(file)),
            needs_header: !has_content,
        })
    }

    pub fn open_json(path: &str, append: bool) -> Result<Box<dyn Write>> {
        let path = Path::new(path);
        Self::create_parent(path)?;

        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            File::create(path)?
        };
        Ok(Box::new(BufWriter::new(file)))
    }

    fn create_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
