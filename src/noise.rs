//! Paper grain — additive Gaussian pixel noise.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::basics::saturate_u8;
use crate::pixfmt::PixelFormat;

/// Add independent `N(0, sigma)` noise to every channel of every pixel.
///
/// Each sample is truncated toward zero before it is added, and the result
/// is clipped to `0..=255`. A non-positive `sigma` adds nothing and draws
/// nothing from `rng`.
pub fn add_gaussian_noise<P, R>(pf: &mut P, sigma: f64, rng: &mut R)
where
    P: PixelFormat,
    R: Rng + ?Sized,
{
    if !(sigma > 0.0) {
        return;
    }
    let normal = match Normal::new(0.0, sigma) {
        Ok(n) => n,
        Err(_) => return,
    };
    for v in pf.buf_mut() {
        let delta = normal.sample(rng) as i32;
        *v = saturate_u8(*v as i32 + delta);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::Rgb8;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_statistics() {
        let mut c = Canvas::new(128, 128, Rgb8::new(128, 128, 128));
        let mut rng = StdRng::seed_from_u64(7);
        add_gaussian_noise(&mut c, 25.0, &mut rng);
        let s = c.channel_stats();
        assert!((s.mean - 128.0).abs() < 1.0, "mean {}", s.mean);
        assert!((s.std_dev - 25.0).abs() < 1.5, "std {}", s.std_dev);
    }

    #[test]
    fn test_noise_clips_to_channel_range() {
        let mut c = Canvas::new(64, 64, Rgb8::WHITE);
        let mut rng = StdRng::seed_from_u64(1);
        add_gaussian_noise(&mut c, 25.0, &mut rng);
        assert!(c.channel_stats().mean < 255.0);
        assert!(c.pixels().any(|p| p.r == 255));
    }

    #[test]
    fn test_same_seed_same_grain() {
        let mut a = Canvas::new(16, 16, Rgb8::new(90, 90, 90));
        let mut b = a.clone();
        add_gaussian_noise(&mut a, 25.0, &mut StdRng::seed_from_u64(3));
        add_gaussian_noise(&mut b, 25.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_sigma_is_noop() {
        let mut c = Canvas::new(4, 4, Rgb8::BLACK);
        add_gaussian_noise(&mut c, 0.0, &mut StdRng::seed_from_u64(0));
        assert_eq!(c.count_non_background(Rgb8::BLACK), 0);
    }
}
