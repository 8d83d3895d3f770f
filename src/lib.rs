pub mod accession;
pub mod fasta;
pub mod report;
pub mod taxonomy;
pub mod tbl;
pub mod utils;

pub use taxonomy::{TaxonRecord, Taxonomy, TaxonomyOptions};
