//! CSV export in the Letterboxd import format
//!
//! Records are split into numbered files `<index><user>.csv`. The split is
//! driven by a single `ChunkPolicy`: either a byte ceiling on the rendered
//! file or a fixed number of rows per file.

use crate::record::MovieRecord;
use crate::{FilmowError, Result};
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// How records are split across files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkPolicy {
    /// Rendered file size in bytes, header included
    MaxBytes(usize),
    /// Data rows per file, header excluded
    MaxRows(usize),
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self::MaxBytes(1_000_000)
    }
}

fn csv_writer<W: std::io::Write>(inner: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner)
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| FilmowError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| FilmowError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Renders a header row followed by one row per record
pub fn render_csv(records: &[MovieRecord]) -> Result<String> {
    let mut writer = csv_writer(Vec::new());
    writer.write_record(MovieRecord::csv_titles())?;
    for record in records {
        writer.write_record(record.to_csv_row())?;
    }
    into_string(writer)
}

fn header_len() -> Result<usize> {
    Ok(render_csv(&[])?.len())
}

fn row_len(record: &MovieRecord) -> Result<usize> {
    let mut writer = csv_writer(Vec::new());
    writer.write_record(record.to_csv_row())?;
    Ok(into_string(writer)?.len())
}

/// Splits `records` into contiguous, ordered chunks under `policy`
///
/// Always returns at least one chunk; with no records that chunk is empty.
/// Under `MaxBytes`, a record too large to fit even in an empty file gets a
/// file of its own.
pub fn plan_chunks(records: &[MovieRecord], policy: ChunkPolicy) -> Result<Vec<&[MovieRecord]>> {
    let mut chunks: Vec<&[MovieRecord]> = match policy {
        ChunkPolicy::MaxRows(max_rows) => records.chunks(max_rows.max(1)).collect(),
        ChunkPolicy::MaxBytes(max_bytes) => chunk_by_bytes(records, max_bytes)?,
    };

    if chunks.is_empty() {
        chunks.push(&records[..0]);
    }

    Ok(chunks)
}

fn chunk_by_bytes(records: &[MovieRecord], max_bytes: usize) -> Result<Vec<&[MovieRecord]>> {
    let header = header_len()?;
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut size = header;

    for (index, record) in records.iter().enumerate() {
        let row = row_len(record)?;
        if size + row <= max_bytes {
            size += row;
            continue;
        }

        if index > start {
            chunks.push(&records[start..index]);
            start = index;
            size = header;
        }

        if header + row > max_bytes {
            tracing::warn!(
                "Movie too large for the {} byte limit; exporting it alone: {}",
                max_bytes,
                record.title
            );
            chunks.push(&records[index..=index]);
            start = index + 1;
        } else {
            size += row;
        }
    }

    if start < records.len() {
        chunks.push(&records[start..]);
    }

    Ok(chunks)
}

/// Writes `records` as `<index><user>.csv` files inside `output_dir`
///
/// # Returns
///
/// The written paths in index order
pub fn export_csv(
    records: &[MovieRecord],
    user: &str,
    output_dir: &Path,
    policy: ChunkPolicy,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let chunks = plan_chunks(records, policy)?;
    let mut files = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.into_iter().enumerate() {
        let path = output_dir.join(format!("{}{}.csv", index + 1, user));
        fs::write(&path, render_csv(chunk)?)?;
        tracing::debug!("Wrote {} movie(s) to {}", chunk.len(), path.display());
        files.push(path);
    }

    Ok(files)
}
