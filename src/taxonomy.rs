use crate::tbl::TblReader;
use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind, Result};
use std::path::Path;

/// Name class used to pick taxon names when none is configured.
pub const DEFAULT_NAME_CLASS: &str = "scientific name";

/// Parse the NCBI taxonomy names file
///
/// Keeps only rows whose name class matches `name_class` and maps
/// tax id to name. A duplicate tax id keeps the last parsed name.
///
/// # Arguments
///
/// * `names_filename` - Path to the names file
/// * `name_class` - Name class rows must carry, e.g. "scientific name"
///
/// # Returns
///
/// A HashMap of tax id to name, or an error when a line does not have
/// exactly 8 tab separated fields
pub fn parse_names_dmp<P: AsRef<Path>>(
    names_filename: P,
    name_class: &str,
) -> Result<HashMap<String, String>> {
    log::info!("parsing tax names from {:?}", names_filename.as_ref());

    let mut name_map = HashMap::new();
    for record in TblReader::from_path(&names_filename)? {
        let fields = record?;
        if fields.len() != 8 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("expected 8 fields in names file, got {}", fields.len()),
            ));
        }
        if fields[6] != name_class {
            continue;
        }
        name_map.insert(fields[0].clone(), fields[2].clone());
    }

    Ok(name_map)
}

/// Parse the NCBI taxonomy nodes file
///
/// # Arguments
///
/// * `nodes_filename` - Path to the nodes file
///
/// # Returns
///
/// A HashMap of tax id to (parent tax id, rank), or an error when a
/// line has fewer than 5 tab separated fields
pub fn parse_nodes_dmp<P: AsRef<Path>>(
    nodes_filename: P,
) -> Result<HashMap<String, (String, String)>> {
    log::info!("parsing tax nodes from {:?}", nodes_filename.as_ref());

    let mut node_map = HashMap::new();
    for record in TblReader::from_path(&nodes_filename)? {
        let fields = record?;
        if fields.len() < 5 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("expected at least 5 fields in nodes file, got {}", fields.len()),
            ));
        }
        node_map.insert(fields[0].clone(), (fields[2].clone(), fields[4].clone()));
    }

    Ok(node_map)
}

/// One node of the taxonomy tree
///
/// The root node carries `parent == id`, the traversal terminator.
#[derive(Debug, Clone)]
pub struct TaxonRecord {
    pub id: String,
    pub name: String,
    pub parent: String,
    pub rank: String,
}

/// Options for building a [`Taxonomy`]
#[derive(Debug, Clone)]
pub struct TaxonomyOptions {
    /// Name class rows must carry to be used as node names
    pub name_class: String,
    /// Skip nodes without a matching name instead of aborting the build
    pub skip_missing_names: bool,
}

impl Default for TaxonomyOptions {
    fn default() -> Self {
        Self {
            name_class: DEFAULT_NAME_CLASS.to_string(),
            skip_missing_names: false,
        }
    }
}

/// In-memory taxonomy built from a names/nodes dump pair
///
/// Built once, read only afterwards.
#[derive(Debug)]
pub struct Taxonomy {
    records: HashMap<String, TaxonRecord>,
}

impl Taxonomy {
    /// Build a Taxonomy with default options, see [`Taxonomy::from_dmp_with`].
    pub fn from_dmp<P: AsRef<Path>>(names_filename: P, nodes_filename: P) -> Result<Self> {
        Self::from_dmp_with(names_filename, nodes_filename, &TaxonomyOptions::default())
    }

    /// Build a Taxonomy from NCBI dump files
    ///
    /// Every tax id of the nodes file becomes one record. A node whose
    /// tax id has no name under the configured name class aborts the
    /// build, unless `skip_missing_names` is set, in which case the
    /// node is dropped with a warning.
    ///
    /// # Arguments
    ///
    /// * `names_filename` - Path to the names file
    /// * `nodes_filename` - Path to the nodes file
    /// * `options` - Name class filter and missing name handling
    pub fn from_dmp_with<P: AsRef<Path>>(
        names_filename: P,
        nodes_filename: P,
        options: &TaxonomyOptions,
    ) -> Result<Self> {
        let name_map = parse_names_dmp(names_filename, &options.name_class)?;
        let node_map = parse_nodes_dmp(nodes_filename)?;

        let mut records = HashMap::with_capacity(node_map.len());
        for (tax_id, (parent, rank)) in node_map {
            let name = match name_map.get(&tax_id) {
                Some(name) => name.clone(),
                None if options.skip_missing_names => {
                    log::warn!("no {} entry for tax id {}, node skipped", options.name_class, tax_id);
                    continue;
                }
                None => {
                    return Err(Error::new(
                        ErrorKind::InvalidData,
                        format!("no {} entry for tax id {}", options.name_class, tax_id),
                    ));
                }
            };
            records.insert(
                tax_id.clone(),
                TaxonRecord {
                    id: tax_id,
                    name,
                    parent,
                    rank,
                },
            );
        }

        Ok(Taxonomy { records })
    }

    pub fn get(&self, tax_id: &str) -> Option<&TaxonRecord> {
        self.records.get(tax_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Walk the parent chain from `tax_id` to the root, collecting
    /// rank to name
    ///
    /// The walk stops at the self-parented root, whose own rank is not
    /// recorded, or at the first tax id absent from the index, which
    /// keeps whatever was collected so far. When two ancestors share a
    /// rank label the one closer to the leaf wins. A parent chain that
    /// revisits a tax id before reaching the root is reported as an
    /// error.
    pub fn rank_names(&self, tax_id: &str) -> Result<HashMap<String, String>> {
        let mut rank_names = HashMap::new();
        let mut visited = HashSet::new();
        let mut current = tax_id.to_string();

        loop {
            if !visited.insert(current.clone()) {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("cycle detected in parent chain at tax id {}", current),
                ));
            }
            let record = match self.records.get(&current) {
                Some(record) => record,
                None => break,
            };
            if record.parent == record.id {
                break;
            }
            rank_names
                .entry(record.rank.clone())
                .or_insert_with(|| record.name.clone());
            current = record.parent.clone();
        }

        Ok(rank_names)
    }

    /// Resolve the lineage of `tax_id` as names aligned to `ranks`,
    /// with an empty string for every rank the walk did not see.
    pub fn lineage(&self, tax_id: &str, ranks: &[String]) -> Result<Vec<String>> {
        let rank_names = self.rank_names(tax_id)?;
        Ok(ranks
            .iter()
            .map(|rank| rank_names.get(rank).cloned().unwrap_or_default())
            .collect())
    }
}
