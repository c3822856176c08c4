//! Binary STL output
//!
//! Layout: an 80-byte header, a little-endian `u32` facet count, then one
//! 50-byte record per facet (normal, three vertices, 2-byte attribute).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::Facet;

const HEADER_LEN: usize = 80;
const RECORD_LEN: usize = 50;
const HEADER_TEXT: &[u8] = b"polyforge - extruded polygon layers";

/// Size in bytes of a binary STL holding `facet_count` facets
pub fn stl_size(facet_count: usize) -> usize {
    HEADER_LEN + 4 + facet_count * RECORD_LEN
}

fn encode_facet(facet: &Facet) -> [u8; RECORD_LEN] {
    let mut record = [0u8; RECORD_LEN];
    let floats = std::iter::once(facet.normal)
        .chain(facet.vertices)
        .flat_map(|v| v.to_array());

    for (chunk, value) in record.chunks_exact_mut(4).zip(floats) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    record
}

/// Encode facets as binary STL into any writer
pub fn write_stl_to<W: Write>(writer: &mut W, facets: &[Facet]) -> std::io::Result<()> {
    let mut header = [b' '; HEADER_LEN];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&(facets.len() as u32).to_le_bytes())?;

    for facet in facets {
        writer.write_all(&encode_facet(facet))?;
    }
    Ok(())
}

/// Write facets to a binary STL file, replacing any existing file
pub fn write_stl(path: &Path, facets: &[Facet]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_stl_to(&mut writer, facets)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write STL file: {}", path.display()))
}
