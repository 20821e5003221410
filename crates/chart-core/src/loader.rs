// File: crates/chart-core/src/loader.rs
// Summary: Async data loading (CSV tables, TopoJSON topologies) with explicit failures.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::topology::Topology;

/// Where a data file comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSource {
    Path(PathBuf),
    #[cfg(feature = "http")]
    Url { url: String },
}

impl DataSource {
    pub fn path(p: impl Into<PathBuf>) -> Self {
        DataSource::Path(p.into())
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            DataSource::Path(p) => tokio::fs::read(p).await.map_err(|e| ChartError::Load {
                source_name: self.to_string(),
                reason: e.to_string(),
            }),
            #[cfg(feature = "http")]
            DataSource::Url { url } => {
                let fail = |e: reqwest::Error| ChartError::Load {
                    source_name: url.clone(),
                    reason: e.to_string(),
                };
                let resp = reqwest::get(url.as_str()).await.map_err(fail)?;
                let resp = resp.error_for_status().map_err(fail)?;
                Ok(resp.bytes().await.map_err(fail)?.to_vec())
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            #[cfg(feature = "http")]
            DataSource::Url { url } => f.write_str(url),
        }
    }
}

/// One CSV row: string fields keyed by column name.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self { fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Field value or `MissingColumn`.
    pub fn require(&self, column: &str) -> Result<&str> {
        self.get(column).ok_or_else(|| ChartError::MissingColumn(column.to_string()))
    }
}

/// Parsed CSV file: header columns in file order plus rows.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    /// Parse CSV with a header row. Header names and cells are trimmed.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let columns = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            rows.push(RawRecord {
                fields: columns.iter().cloned().zip(rec.iter().map(str::to_string)).collect(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Columns after the first (the first column is the row label).
    pub fn value_columns(&self) -> &[String] {
        self.columns.get(1..).unwrap_or(&[])
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Load a CSV table.
pub async fn load_table(source: &DataSource) -> Result<RawTable> {
    let bytes = source.read_bytes().await?;
    let table = RawTable::from_reader(bytes.as_slice())?;
    debug!(%source, rows = table.rows.len(), columns = table.columns.len(), "loaded table");
    Ok(table)
}

/// Load a TopoJSON topology.
pub async fn load_topology(source: &DataSource) -> Result<Topology> {
    let bytes = source.read_bytes().await?;
    let topo = Topology::from_slice(&bytes)?;
    debug!(%source, arcs = topo.arcs.len(), objects = topo.objects.len(), "loaded topology");
    Ok(topo)
}
