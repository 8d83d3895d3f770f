use crate::fasta::FastaReader;
use crate::tbl::TblReader;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::io::{Read, Result, Write};
use std::path::Path;

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(r"\.\d+$").unwrap();
}

/// Drop a trailing version suffix from an accession, `ABC123.1` becomes
/// `ABC123`. An accession without one passes through unchanged.
pub fn strip_version(accession: &str) -> String {
    VERSION_RE.replace(accession, "").into_owned()
}

/// Load the accession allow-list: the first tab separated field of each
/// non-comment line, version suffix removed.
pub fn read_accession_list<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    let mut accessions = HashSet::new();
    for record in TblReader::from_path(&path)? {
        let fields = record?;
        if let Some(accession) = fields.first() {
            accessions.insert(strip_version(accession));
        }
    }
    Ok(accessions)
}

/// Stream FASTA records, writing those whose stripped id is in the
/// allow-list. Returns the number of records written.
pub fn filter_by_accession<R, W>(
    reader: &mut FastaReader<R>,
    accessions: &HashSet<String>,
    writer: &mut W,
) -> Result<usize>
where
    R: Read + Send,
    W: Write,
{
    let mut matched = 0;
    while let Some(record) = reader.next_record()? {
        if accessions.contains(&strip_version(&record.id)) {
            record.write_to(writer)?;
            matched += 1;
        }
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_strip_version() {
        assert_eq!(strip_version("ABC123.1"), "ABC123");
        assert_eq!(strip_version("NC_000001.11"), "NC_000001");
        assert_eq!(strip_version("ABC123"), "ABC123");
        assert_eq!(strip_version("AB.1.2"), "AB.1");
        assert_eq!(strip_version("ABC123.x"), "ABC123.x");
    }

    #[test]
    fn test_read_accession_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accessions.txt");
        std::fs::write(&path, "# selected\nNC_000001.11\tchr1\nABC123\n\n").unwrap();

        let accessions = read_accession_list(&path).unwrap();
        assert_eq!(accessions.len(), 2);
        assert!(accessions.contains("NC_000001"));
        assert!(accessions.contains("ABC123"));
    }

    #[test]
    fn test_filter_by_accession() {
        let fasta = ">NC_000001.11 chromosome 1\nACGT\nGG\n>NC_000002.12 chromosome 2\nTTTT\n>ABC123.1 plasmid\nCCCC\n";
        let mut reader = FastaReader::new(Cursor::new(fasta.as_bytes()));
        let accessions: HashSet<String> =
            ["NC_000001", "ABC123"].iter().map(|s| s.to_string()).collect();

        let mut out = Vec::new();
        let matched = filter_by_accession(&mut reader, &accessions, &mut out).unwrap();
        assert_eq!(matched, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">NC_000001.11 chromosome 1\nACGT\nGG\n>ABC123.1 plasmid\nCCCC\n"
        );
    }

    #[test]
    fn test_filter_matches_across_versions() {
        // list carries .1, the file carries .2
        let fasta = ">ABC123.2 updated assembly\nACGT\n";
        let mut reader = FastaReader::new(Cursor::new(fasta.as_bytes()));
        let mut accessions = HashSet::new();
        accessions.insert(strip_version("ABC123.1"));

        let mut out = Vec::new();
        let matched = filter_by_accession(&mut reader, &accessions, &mut out).unwrap();
        assert_eq!(matched, 1);
    }
}
