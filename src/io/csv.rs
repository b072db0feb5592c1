//! Read truth tables written as CSV by [`Evaluation::write_csv`](crate::Evaluation::write_csv)

use std::io::{BufRead, BufReader, Read};

use crate::error::{Error, Result};

fn parse_value(line: usize, field: &str) -> Result<Option<bool>> {
    match field.trim() {
        "" => Ok(None),
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        other => Err(Error::parse(line, format!("Invalid truth value {other}"))),
    }
}

/// Read the rows of a truth table CSV: the node name, then its value at each state
///
/// Empty fields are unassigned values.
pub fn read_truth_csv<R: Read>(
    r: R,
    delimiter: &str,
) -> Result<Vec<(String, Vec<Option<bool>>)>> {
    let mut ret = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let line = i + 1;
        let s = l?;
        if s.is_empty() {
            continue;
        }
        let mut fields = s.split(delimiter);
        let name = fields.next().unwrap_or_default().to_string();
        if name.is_empty() {
            return Err(Error::parse(line, "Missing node name"));
        }
        let values = fields
            .map(|f| parse_value(line, f))
            .collect::<Result<Vec<_>>>()?;
        ret.push((name, values));
    }
    Ok(ret)
}
