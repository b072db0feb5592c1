//! Read and write netlists and truth tables

mod bench;
mod csv;

use std::fs::File;
use std::path::Path;

pub use bench::{read_bench, write_bench};
pub use csv::read_truth_csv;

use crate::error::{Error, Result};
use crate::Netlist;

/// Read a netlist from a file, named after the file stem
///
/// Following extensions are supported: .bench
pub fn read_netlist_file(path: &Path) -> Result<Netlist> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.extension() {
        Some(s) if s == "bench" => read_bench(&name, File::open(path)?),
        _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}

/// Write a netlist to a file
///
/// Following extensions are supported: .bench
pub fn write_netlist_file(path: &Path, net: &Netlist) -> Result<()> {
    match path.extension() {
        Some(s) if s == "bench" => {
            let mut f = File::create(path)?;
            write_bench(&mut f, net)
        }
        _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}
