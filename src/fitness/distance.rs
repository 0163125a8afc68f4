/// Sum of Squared Differences (SSD) on RGBA (all 4 channels).
/// note: alpha is included; both rasters are opaque so it contributes zero.
use rayon::prelude::*;

/// bytes handed to one rayon task. small canvases stay on the calling thread
const MIN_CHUNK_BYTES: usize = 64 * 1024;

/// scalar SSD over two equal-length byte slices
#[inline]
fn ssd_chunk(target: &[u8], current: &[u8]) -> u64 {
    target
        .iter()
        .zip(current)
        .map(|(&t, &c)| {
            let d = t as i32 - c as i32;
            (d * d) as u64
        })
        .sum()
}

/// parallel SSD using Rayon. the caller guarantees equal lengths
#[inline]
pub fn ssd_rgba_parallel(target_rgba: &[u8], current_rgba: &[u8]) -> u64 {
    debug_assert_eq!(target_rgba.len(), current_rgba.len());
    debug_assert_eq!(target_rgba.len() % 4, 0);

    if target_rgba.len() <= MIN_CHUNK_BYTES {
        return ssd_chunk(target_rgba, current_rgba);
    }

    target_rgba
        .par_chunks(MIN_CHUNK_BYTES)
        .zip(current_rgba.par_chunks(MIN_CHUNK_BYTES))
        .map(|(t_chunk, c_chunk)| ssd_chunk(t_chunk, c_chunk))
        .sum()
}

/// euclidean distance between two rasters viewed as byte vectors
#[inline]
pub fn rgba_distance(target_rgba: &[u8], current_rgba: &[u8]) -> f64 {
    (ssd_rgba_parallel(target_rgba, current_rgba) as f64).sqrt()
}
