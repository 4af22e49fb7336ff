//! Text rendering of an image through a fixed brightness ramp.

use std::io::{self, Write};

use crate::raster::PixelSource;

/// Glyphs ordered from darkest to brightest.
pub const ASCII_RAMP: [char; 10] = [' ', '.', '-', '=', '+', ':', '!', '8', '0', '#'];

/// Intensity span covered by each ramp level.
const LEVEL_WIDTH: u8 = 0xFF / (ASCII_RAMP.len() as u8 - 1);

/// Glyph for an 8-bit red intensity.
pub fn glyph_for(red: u8) -> char {
    let idx = usize::from(red / LEVEL_WIDTH).min(ASCII_RAMP.len() - 1);
    ASCII_RAMP[idx]
}

/// Writes one line per image row, two glyphs per pixel.
///
/// Only the red channel is looked at, so the output reads best after
/// greyscaling. Each glyph is doubled to keep the picture roughly square
/// in a monospace font.
pub fn render<S, W>(image: &S, out: &mut W) -> io::Result<()>
where
    S: PixelSource + ?Sized,
    W: Write + ?Sized,
{
    let bounds = image.bounds();
    let mut line = String::with_capacity(bounds.width() as usize * 2);

    for y in bounds.min_y..bounds.max_y {
        line.clear();
        push_row(image, y, &mut line);
        writeln!(out, "{line}")?;
    }

    Ok(())
}

/// Renders into a string instead of a writer.
pub fn to_ascii<S: PixelSource + ?Sized>(image: &S) -> String {
    let bounds = image.bounds();
    let mut text = String::with_capacity((bounds.width() as usize * 2 + 1) * bounds.height() as usize);

    for y in bounds.min_y..bounds.max_y {
        push_row(image, y, &mut text);
        text.push('\n');
    }

    text
}

fn push_row<S: PixelSource + ?Sized>(image: &S, y: u32, line: &mut String) {
    let bounds = image.bounds();
    for x in bounds.min_x..bounds.max_x {
        let [r, ..] = image.pixel(x, y).rgba16();
        let glyph = glyph_for((r >> 8) as u8);
        line.push(glyph);
        line.push(glyph);
    }
}
