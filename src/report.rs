use crate::taxonomy::Taxonomy;
use std::io::{Result, Write};

/// Write the header row: `tax_id` followed by the requested ranks, tab joined.
pub fn write_header<W: Write>(writer: &mut W, ranks: &[String]) -> Result<()> {
    let mut columns = Vec::with_capacity(ranks.len() + 1);
    columns.push("tax_id");
    columns.extend(ranks.iter().map(String::as_str));
    writeln!(writer, "{}", columns.join("\t"))
}

/// Resolve one tax id and write its row: the id followed by the name
/// for each requested rank, blank when the lineage does not carry it.
pub fn write_row<W: Write>(
    writer: &mut W,
    taxonomy: &Taxonomy,
    tax_id: &str,
    ranks: &[String],
) -> Result<()> {
    let names = taxonomy.lineage(tax_id, ranks)?;
    let mut columns = Vec::with_capacity(ranks.len() + 1);
    columns.push(tax_id.to_string());
    columns.extend(names);
    writeln!(writer, "{}", columns.join("\t"))
}
