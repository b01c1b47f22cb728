use crate::size::human_size;
use objects::Candidate;
use std::io::{self, Write};

pub const NO_BLOBS_MESSAGE: &str = "No blobs meet the configured minimum size.";
pub const NO_PATH_PLACEHOLDER: &str = "(no path available)";

/// Width of the right-aligned size column.
const SIZE_COLUMN_WIDTH: usize = 10;

/// Largest first. The sort is stable, so equal sizes keep enumeration order.
pub fn sort_by_size_desc(blobs: &mut [Candidate]) {
    blobs.sort_by(|a, b| b.size.cmp(&a.size));
}

/// Write the report table for `blobs`, sorting them in place.
pub fn render_report<W: Write>(out: &mut W, blobs: &mut [Candidate]) -> io::Result<()> {
    if blobs.is_empty() {
        writeln!(out, "{}", NO_BLOBS_MESSAGE)?;
        return Ok(());
    }

    sort_by_size_desc(blobs);
    let width = blobs.iter().map(|b| b.oid.len()).max().unwrap_or(0);

    writeln!(out, "Found {} blob(s) exceeding the threshold:", blobs.len())?;
    writeln!(out)?;
    for blob in blobs.iter() {
        let path = blob
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(NO_PATH_PLACEHOLDER);
        writeln!(
            out,
            "{:<width$}  {:>size_width$}  {}",
            blob.oid,
            human_size(blob.size),
            path,
            width = width,
            size_width = SIZE_COLUMN_WIDTH,
        )?;
    }

    Ok(())
}
