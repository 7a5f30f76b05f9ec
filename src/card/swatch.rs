//! Solid-color background swatch encoding.
//!
//! Teams cards take a background image rather than a theme color, so the
//! theme color is synthesized into a 3x3 bitmap and inlined as a base64 PNG
//! data URI. The image depends on nothing but the color value.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

const SWATCH_SIZE: u32 = 3;
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Render a `RRGGBB` theme color (leading `#` accepted) as a PNG data URI.
pub fn data_uri(theme_color: &str) -> Result<String> {
    let (r, g, b) = parse_color(theme_color)?;
    let png = encode_png(r, g, b);
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

fn parse_color(color: &str) -> Result<(u8, u8, u8)> {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid theme color: {color}");
    }
    let channel = |range| {
        u8::from_str_radix(&hex[range], 16).with_context(|| format!("Invalid theme color: {color}"))
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// 8-bit truecolor PNG with a single stored-deflate IDAT block. The payload
/// is 30 bytes; compression would only add overhead.
fn encode_png(r: u8, g: u8, b: u8) -> Vec<u8> {
    let mut raw = Vec::new();
    for _ in 0..SWATCH_SIZE {
        raw.push(0); // filter: None
        for _ in 0..SWATCH_SIZE {
            raw.extend_from_slice(&[r, g, b]);
        }
    }

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&SWATCH_SIZE.to_be_bytes());
    ihdr.extend_from_slice(&SWATCH_SIZE.to_be_bytes());
    // bit depth 8, color type 2 (truecolor), default compression/filter/interlace
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);

    let mut png = PNG_SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &ihdr);
    write_chunk(&mut png, b"IDAT", &zlib_store(&raw));
    write_chunk(&mut png, b"IEND", &[]);
    png
}

fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let mut checked = Vec::with_capacity(4 + data.len());
    checked.extend_from_slice(kind);
    checked.extend_from_slice(data);
    out.extend_from_slice(&crc32(&checked).to_be_bytes());
}

/// zlib wrapper around one final stored (uncompressed) deflate block.
fn zlib_store(data: &[u8]) -> Vec<u8> {
    let len = data.len() as u16;
    let mut out = vec![0x78, 0x01, 0x01];
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&(!len).to_le_bytes());
    out.extend_from_slice(data);
    out.extend_from_slice(&adler32(data).to_be_bytes());
    out
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xffff_ffffu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xedb8_8320 & mask);
        }
    }
    !crc
}

fn adler32(data: &[u8]) -> u32 {
    let mut a = 1u32;
    let mut b = 0u32;
    for &byte in data {
        a = (a + byte as u32) % 65521;
        b = (b + a) % 65521;
    }
    (b << 16) | a
}
