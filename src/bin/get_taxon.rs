use anyhow::Result;
use clap::Parser;
use ncbitools::report::{write_header, write_row};
use ncbitools::taxonomy::{Taxonomy, TaxonomyOptions, DEFAULT_NAME_CLASS};
use ncbitools::tbl::TblReader;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about = "Get taxon lineages for a list of tax ids from NCBI taxonomy dump files"
)]
pub struct Args {
    /// File with one tax id as the first tab separated field per line
    pub file: PathBuf,

    /// Path of names.dmp downloaded from NCBI
    #[clap(long, default_value = "names.dmp")]
    pub names: PathBuf,

    /// Path of nodes.dmp downloaded from NCBI
    #[clap(long, default_value = "nodes.dmp")]
    pub nodes: PathBuf,

    /// Comma separated ranks to show in the result
    #[clap(
        long,
        default_value = "superkingdom,kingdom,phylum,class,order,family,genus,species"
    )]
    pub ranks: String,

    /// Name class used to pick taxon names
    #[clap(long = "name-class", default_value = DEFAULT_NAME_CLASS)]
    pub name_class: String,

    /// Skip nodes without a matching name instead of aborting
    #[clap(long = "skip-missing-names", action)]
    pub skip_missing_names: bool,
}

pub fn run(args: Args) -> Result<()> {
    let options = TaxonomyOptions {
        name_class: args.name_class.clone(),
        skip_missing_names: args.skip_missing_names,
    };
    let taxonomy = Taxonomy::from_dmp_with(&args.names, &args.nodes, &options)?;

    let ranks: Vec<String> = args.ranks.split(',').map(|rank| rank.to_string()).collect();

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_header(&mut writer, &ranks)?;

    for record in TblReader::from_path(&args.file)? {
        let fields = record?;
        if let Some(tax_id) = fields.first() {
            log::info!("parsing tax of {}", tax_id);
            write_row(&mut writer, &taxonomy, tax_id, &ranks)?;
        }
    }
    writer.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    run(args)
}
