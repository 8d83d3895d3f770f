use crate::utils::dyn_reader;
use std::io::{BufRead, BufReader, Read, Result};
use std::path::Path;

/// Reader for the tab separated table files NCBI distributes, such as
/// `names.dmp`, `nodes.dmp` or plain id lists.
///
/// Lines are trimmed, then blank lines and `#` comments are skipped.
/// Every remaining line is split on the separator and yielded as one
/// record; field counts are left to the caller to validate.
pub struct TblReader<R>
where
    R: Read + Send,
{
    reader: BufReader<R>,
    separator: char,
    line: String,
}

impl<R> TblReader<R>
where
    R: Read + Send,
{
    pub fn new(reader: R) -> Self {
        Self::with_separator(reader, '\t')
    }

    pub fn with_separator(reader: R, separator: char) -> Self {
        Self {
            reader: BufReader::new(reader),
            separator,
            line: String::new(),
        }
    }
}

impl TblReader<Box<dyn Read + Send>> {
    /// Open a table file, decompressing gzip on the fly.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = dyn_reader(path)?;
        Ok(Self::new(reader))
    }
}

impl<R: Read + Send> Iterator for TblReader<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            let line = self.line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields = line.split(self.separator).map(String::from).collect();
            return Some(Ok(fields));
        }
    }
}
