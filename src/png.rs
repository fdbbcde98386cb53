//! Minimal PNG writer: one IHDR, one IDAT, IEND.
//!
//! Scanlines are stored with filter type 0 and compressed with zlib at the
//! default level, so identical buffers always produce identical files.

use std::fs;
use std::io::Write;
use std::path::Path;

use crc32fast::Hasher;
use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::error::Result;
use crate::pixel::{self, ColorMode, PixelBuffer};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const IHDR: &[u8; 4] = b"IHDR";
const IDAT: &[u8; 4] = b"IDAT";
const IEND: &[u8; 4] = b"IEND";

const BIT_DEPTH: u8 = 8;
const FILTER_NONE: u8 = 0;

/// Encode `rows` as a PNG byte stream.
pub fn encode<R: AsRef<[u8]>>(width: u32, height: u32, mode: ColorMode, rows: &[R]) -> Result<Vec<u8>> {
    pixel::validate(width, height, mode, rows)?;

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    // bit depth, color type, compression, filter, interlace
    ihdr.extend_from_slice(&[BIT_DEPTH, mode.png_color_type(), 0, 0, 0]);

    let row_len = width as usize * mode.channels();
    let mut raw = Vec::with_capacity((row_len + 1) * rows.len());
    for row in rows {
        raw.push(FILTER_NONE);
        raw.extend_from_slice(row.as_ref());
    }
    let mut z = ZlibEncoder::new(Vec::new(), Compression::default());
    z.write_all(&raw)?;
    let idat = z.finish()?;

    let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + ihdr.len() + idat.len());
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, IHDR, &ihdr);
    write_chunk(&mut out, IDAT, &idat);
    write_chunk(&mut out, IEND, &[]);
    Ok(out)
}

/// Append one chunk: BE length, tag, payload, BE CRC32 over tag + payload.
fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);
    let mut crc = Hasher::new();
    crc.update(tag);
    crc.update(payload);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}

/// Encode `buf` and write it to `path`.
pub fn write_png(path: &Path, buf: &PixelBuffer) -> Result<()> {
    let bytes = buf.encode()?;
    fs::write(path, bytes)?;
    Ok(())
}
