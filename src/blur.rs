//! Box blur and Gaussian blur.
//!
//! Both filters are separable: a horizontal pass over every row followed by a
//! vertical pass over every column. Pixels beyond the buffer edge repeat the
//! edge pixel, so a uniform buffer stays uniform. Works on any
//! [`PixelFormat`], blurring every channel independently.

use crate::pixfmt::PixelFormat;

// ============================================================================
// Line driver
// ============================================================================

/// Run a 1D `filter` over every row (`horizontal`) or column of the buffer.
///
/// The filter receives the source line and a destination line of the same
/// length, both packed `comps` bytes per pixel.
fn for_each_line<F>(
    buf: &mut [u8],
    width: usize,
    height: usize,
    comps: usize,
    horizontal: bool,
    mut filter: F,
) where
    F: FnMut(&[u8], &mut [u8], usize),
{
    let (count, len, step, line_stride) = if horizontal {
        (height, width, comps, width * comps)
    } else {
        (width, height, width * comps, comps)
    };

    let mut line = vec![0u8; len * comps];
    let mut out = vec![0u8; len * comps];
    for i in 0..count {
        let base = i * line_stride;
        for j in 0..len {
            let off = base + j * step;
            line[j * comps..(j + 1) * comps].copy_from_slice(&buf[off..off + comps]);
        }
        filter(&line, &mut out, comps);
        for j in 0..len {
            let off = base + j * step;
            buf[off..off + comps].copy_from_slice(&out[j * comps..(j + 1) * comps]);
        }
    }
}

/// Sample channel `c` at index `i`, repeating the edge pixels.
#[inline]
fn sample(src: &[u8], comps: usize, i: isize, c: usize) -> u32 {
    let len = (src.len() / comps) as isize;
    let i = i.clamp(0, len - 1) as usize;
    src[i * comps + c] as u32
}

// ============================================================================
// Box blur
// ============================================================================

/// 1D box filter: each value becomes the rounded mean of the `2r + 1` values
/// centered on it.
fn box_line(src: &[u8], dst: &mut [u8], comps: usize, radius: usize) {
    let len = src.len() / comps;
    if len == 0 {
        return;
    }
    let r = radius as isize;
    let div = (2 * radius + 1) as u32;
    for c in 0..comps {
        let mut sum: u32 = (-r..=r).map(|i| sample(src, comps, i, c)).sum();
        for x in 0..len {
            dst[x * comps + c] = ((sum + div / 2) / div) as u8;
            let xi = x as isize;
            sum += sample(src, comps, xi + r + 1, c);
            sum -= sample(src, comps, xi - r, c);
        }
    }
}

/// Box blur with a `(2 * radius + 1)²` window, in place.
pub fn box_blur<P: PixelFormat>(pf: &mut P, radius: u32) {
    let w = pf.width() as usize;
    let h = pf.height() as usize;
    if radius == 0 || w == 0 || h == 0 {
        return;
    }
    let comps = pf.pix_width();
    let radius = radius as usize;
    let buf = pf.buf_mut();
    for_each_line(buf, w, h, comps, true, |s, d, n| box_line(s, d, n, radius));
    for_each_line(buf, w, h, comps, false, |s, d, n| box_line(s, d, n, radius));
}

// ============================================================================
// Gaussian blur
// ============================================================================

/// Normalized Gaussian kernel for standard deviation `sigma`, extending three
/// deviations each side (at least one tap).
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let half = ((sigma * 3.0).ceil() as usize).max(1);
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f64> = (0..=2 * half)
        .map(|i| {
            let d = i as f64 - half as f64;
            (-d * d / denom).exp()
        })
        .collect();
    let total: f64 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= total;
    }
    kernel
}

fn gaussian_line(src: &[u8], dst: &mut [u8], comps: usize, kernel: &[f64]) {
    let len = src.len() / comps;
    let half = (kernel.len() / 2) as isize;
    for x in 0..len {
        for c in 0..comps {
            let acc: f64 = kernel
                .iter()
                .enumerate()
                .map(|(k, &wt)| wt * sample(src, comps, x as isize + k as isize - half, c) as f64)
                .sum();
            dst[x * comps + c] = (acc + 0.5).clamp(0.0, 255.0) as u8;
        }
    }
}

/// Gaussian blur with standard deviation `sigma` pixels, in place.
///
/// A non-positive or non-finite `sigma` leaves the buffer untouched.
pub fn gaussian_blur<P: PixelFormat>(pf: &mut P, sigma: f64) {
    let w = pf.width() as usize;
    let h = pf.height() as usize;
    if !(sigma > 0.0 && sigma.is_finite()) || w == 0 || h == 0 {
        return;
    }
    let comps = pf.pix_width();
    let kernel = gaussian_kernel(sigma);
    let buf = pf.buf_mut();
    for_each_line(buf, w, h, comps, true, |s, d, n| gaussian_line(s, d, n, &kernel));
    for_each_line(buf, w, h, comps, false, |s, d, n| gaussian_line(s, d, n, &kernel));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alpha_mask::AlphaMask;
    use crate::canvas::Canvas;
    use crate::color::Rgb8;

    #[test]
    fn test_uniform_buffer_is_unchanged() {
        let bg = Rgb8::new(12, 200, 77);
        let mut c = Canvas::new(20, 10, bg);
        box_blur(&mut c, 4);
        assert_eq!(c.count_non_background(bg), 0);
        gaussian_blur(&mut c, 1.0);
        assert_eq!(c.count_non_background(bg), 0);
    }

    #[test]
    fn test_box_blur_spreads_a_point() {
        let mut m = AlphaMask::new(11, 11);
        m.buf_mut()[5 * 11 + 5] = 255;
        box_blur(&mut m, 1);
        // 255 / 9 = 28.3
        assert_eq!(m.value(5, 5), 28);
        assert_eq!(m.value(4, 4), 28);
        assert_eq!(m.value(6, 6), 28);
        assert_eq!(m.value(3, 5), 0);
    }

    #[test]
    fn test_box_blur_preserves_mass_away_from_edges() {
        let mut m = AlphaMask::new(41, 41);
        for y in 15..26 {
            for x in 15..26 {
                m.buf_mut()[y * 41 + x] = 200;
            }
        }
        let before: u32 = m.buf().iter().map(|&v| v as u32).sum();
        box_blur(&mut m, 3);
        let after: u32 = m.buf().iter().map(|&v| v as u32).sum();
        let diff = (before as f64 - after as f64).abs() / before as f64;
        assert!(diff < 0.03, "mass drifted by {diff}");
        assert!(m.value(20, 20) > 150);
        assert!(m.value(13, 20) > 0);
    }

    #[test]
    fn test_gaussian_kernel_is_normalized_and_symmetric() {
        for sigma in [0.6, 1.0, 2.5] {
            let k = gaussian_kernel(sigma);
            assert_eq!(k.len() % 2, 1);
            assert!((k.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            let n = k.len();
            for i in 0..n / 2 {
                assert!((k[i] - k[n - 1 - i]).abs() < 1e-15);
            }
            assert!(k[n / 2] > k[0]);
        }
    }

    #[test]
    fn test_gaussian_blur_softens_an_edge() {
        let mut c = Canvas::new(10, 1, Rgb8::BLACK);
        for x in 5..10 {
            let off = x * 3;
            c.buf_mut()[off..off + 3].copy_from_slice(&[255, 255, 255]);
        }
        gaussian_blur(&mut c, 1.0);
        let row: Vec<u8> = (0..10).map(|x| c.pixel(x, 0).r).collect();
        assert_eq!(row[0], 0);
        assert_eq!(row[9], 255);
        assert!(row[4] > 0 && row[4] < 128);
        assert!(row[5] > 128 && row[5] < 255);
        assert!(row.windows(2).all(|p| p[0] <= p[1]));
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let mut m = AlphaMask::new(3, 3);
        m.buf_mut()[4] = 99;
        box_blur(&mut m, 0);
        gaussian_blur(&mut m, 0.0);
        gaussian_blur(&mut m, f64::NAN);
        assert_eq!(m.value(1, 1), 99);
    }
}
