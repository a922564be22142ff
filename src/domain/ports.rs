use crate::domain::model::Record;
use crate::utils::error::Result;

/// 上游資料來源：一次交出一筆已解碼的 Record，`None` 表示結束
pub trait RecordSource {
    fn next_record(&mut self) -> Result<Option<Record>>;
}

impl<S: RecordSource + ?Sized> RecordSource for &mut S {
    fn next_record(&mut self) -> Result<Option<Record>> {
        (**self).next_record()
    }
}

impl RecordSource for std::vec::IntoIter<Record> {
    fn next_record(&mut self) -> Result<Option<Record>> {
        Ok(self.next())
    }
}
