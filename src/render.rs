use tiny_skia as sk;

use crate::dna::{Gene, Genome};
use crate::error::{EvolveError, Result};

const BYTES_PER_PIXEL: usize = 4;

pub struct CpuRenderer;

impl CpuRenderer {
    /// allocate an opaque white canvas of the given size
    pub fn blank(width: u32, height: u32) -> Result<sk::Pixmap> {
        let mut pix = sk::Pixmap::new(width, height).ok_or(EvolveError::EmptyCanvas { width, height })?;
        pix.fill(sk::Color::WHITE);
        Ok(pix)
    }

    /// full-frame render: white background, then every gene in genome order.
    /// all colors are opaque so the pixmap bytes are plain RGBA
    pub fn render(genome: &Genome) -> Result<sk::Pixmap> {
        profiling::scope!("render");
        let mut pix = Self::blank(genome.width, genome.height)?;
        for gene in &genome.genes {
            draw_circle(&mut pix, gene);
        }
        Ok(pix)
    }
}

/// solid overwrite of every pixel with dx^2 + dy^2 <= r^2. no blending, no AA.
/// the part of the bounding box outside the canvas is skipped
fn draw_circle(pix: &mut sk::Pixmap, gene: &Gene) {
    profiling::scope!("draw_circle");
    let (w, h) = (pix.width() as i64, pix.height() as i64);
    let (cx, cy) = (gene.center.0 as i64, gene.center.1 as i64);
    let r = gene.radius as i64;
    let r2 = r * r;

    // quick reject: bbox fully off-canvas
    if cx + r < 0 || cy + r < 0 || cx - r >= w || cy - r >= h {
        return;
    }

    let x_min = (cx - r).max(0);
    let x_max = (cx + r).min(w - 1);
    let y_min = (cy - r).max(0);
    let y_max = (cy + r).min(h - 1);

    let rgba = gene.rgba();
    let data = pix.data_mut();
    for y in y_min..=y_max {
        let dy = y - cy;
        let row = (y * w) as usize;
        for x in x_min..=x_max {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                let idx = (row + x as usize) * BYTES_PER_PIXEL;
                data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&rgba);
            }
        }
    }
}

/// premultiply straight RGBA so it can live in a pixmap.
/// opaque pixels come out unchanged
#[inline(always)]
pub fn premultiply(p: &[u8]) -> Vec<u8> {
    profiling::scope!("premultiply");

    let mut out = vec![0u8; p.len()];
    for (src, dst) in p.chunks_exact(4).zip(out.chunks_exact_mut(4)) {
        let a = src[3] as u16;
        // (x * a + 127) / 255 is a fast rounded divide-by-255
        dst[0] = ((src[0] as u16 * a + 127) / 255) as u8;
        dst[1] = ((src[1] as u16 * a + 127) / 255) as u8;
        dst[2] = ((src[2] as u16 * a + 127) / 255) as u8;
        dst[3] = a as u8;
    }

    out
}
