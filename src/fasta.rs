use crate::utils::dyn_reader;
use std::io::{BufRead, BufReader, Read, Result, Write};
use std::path::Path;

fn trim_end(buffer: &mut Vec<u8>) {
    while let Some(&b'\n' | &b'\r' | &b'>') = buffer.last() {
        buffer.pop();
    }
}

/// One FASTA record
///
/// `seq` keeps the sequence bytes as read, internal line breaks
/// included, so a matched record prints back in its original shape.
#[derive(Debug, Clone)]
pub struct FastaRecord {
    /// First whitespace separated token of the header
    pub id: String,
    /// Full header line without the leading `>`
    pub header: String,
    pub seq: Vec<u8>,
}

impl FastaRecord {
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(b">")?;
        writer.write_all(self.header.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(&self.seq)?;
        writer.write_all(b"\n")
    }
}

/// FastaReader
pub struct FastaReader<R>
where
    R: Read + Send,
{
    reader: BufReader<R>,
    header: Vec<u8>,
    seq: Vec<u8>,
}

impl<R> FastaReader<R>
where
    R: Read + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            header: Vec::new(),
            seq: Vec::new(),
        }
    }

    fn read_next(&mut self) -> Result<Option<()>> {
        self.header.clear();
        if self.reader.read_until(b'\n', &mut self.header)? == 0 {
            return Ok(None);
        }
        self.seq.clear();
        if self.reader.read_until(b'>', &mut self.seq)? == 0 {
            return Ok(None);
        }
        trim_end(&mut self.seq);
        Ok(Some(()))
    }

    /// Read the next record, `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.read_next()?.is_none() {
            return Ok(None);
        }

        let slice = if self.header.starts_with(b">") {
            &self.header[1..]
        } else {
            &self.header[..]
        };
        let header = String::from_utf8_lossy(slice).trim_end().to_string();
        let id = header
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(Some(FastaRecord {
            id,
            header,
            seq: self.seq.clone(),
        }))
    }
}

impl FastaReader<Box<dyn Read + Send>> {
    /// Open a FASTA file, decompressing gzip on the fly.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = dyn_reader(path)?;
        Ok(Self::new(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Cursor;

    const FASTA: &str = ">NC_000001.1 Homo sapiens chromosome 1\nACGT\nGGCC\n>NC_000002.2 Homo sapiens chromosome 2\nTTTT\n";

    fn read_all(data: &'static str) -> Vec<FastaRecord> {
        let mut reader = FastaReader::new(Cursor::new(data.as_bytes()));
        let mut records = Vec::new();
        while let Some(record) = reader.next_record().unwrap() {
            records.push(record);
        }
        records
    }

    #[test]
    fn test_reads_records_with_wrapped_sequences() {
        let records = read_all(FASTA);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id, "NC_000001.1");
        assert_eq!(records[0].header, "NC_000001.1 Homo sapiens chromosome 1");
        assert_eq!(records[0].seq, b"ACGT\nGGCC");

        assert_eq!(records[1].id, "NC_000002.2");
        assert_eq!(records[1].seq, b"TTTT");
    }

    #[test]
    fn test_write_to_round_trips() {
        let records = read_all(FASTA);
        let mut out = Vec::new();
        for record in &records {
            record.write_to(&mut out).unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), FASTA);
    }

    #[test]
    fn test_record_without_trailing_newline() {
        let records = read_all(">seq1 test\nACGT");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq, b"ACGT");
    }

    #[test]
    fn test_empty_sequence_record() {
        let records = read_all(">empty\n>seq1\nACGT\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "empty");
        assert!(records[0].seq.is_empty());
        assert_eq!(records[1].seq, b"ACGT");
    }

    #[test]
    fn test_from_path_reads_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqs.fna.gz");
        let mut encoder =
            GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(FASTA.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let mut reader = FastaReader::from_path(&path).unwrap();
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.id, "NC_000001.1");
        assert_eq!(record.seq, b"ACGT\nGGCC");
    }
}
