use anyhow::Result;
use clap::Parser;
use ncbitools::accession::{filter_by_accession, read_accession_list};
use ncbitools::fasta::FastaReader;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(version, about = "Get sequences from a fasta file by accession")]
pub struct Args {
    /// File with one accession as the first tab separated field per line
    pub accession: PathBuf,

    /// Fasta file to extract sequences from
    pub fasta: PathBuf,
}

pub fn run(args: Args) -> Result<()> {
    log::info!("parsing accessions from {:?}", args.accession);
    let accessions = read_accession_list(&args.accession)?;

    log::info!("getting sequences from {:?}", args.fasta);
    let mut reader = FastaReader::from_path(&args.fasta)?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let matched = filter_by_accession(&mut reader, &accessions, &mut writer)?;
    writer.flush()?;

    log::info!("all done, {} sequences written", matched);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    run(args)
}
