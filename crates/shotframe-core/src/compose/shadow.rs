//! Drop shadow: a blurred coverage mask.
//!
//! `shadow_blur` follows the CSS `box-shadow` blur radius convention, where
//! the Gaussian standard deviation is half the blur radius. The Gaussian is
//! approximated by three successive box blurs whose widths are chosen to
//! match its variance, so the cost per pixel does not grow with the radius.

/// Standard deviation for a CSS-style blur radius.
#[inline]
pub fn sigma_for_blur(blur: u32) -> f32 {
    blur as f32 / 2.0
}

/// Pixels the blur can spread beyond the shape.
#[inline]
pub fn blur_extent(blur: u32) -> u32 {
    if blur == 0 {
        return 0;
    }
    let reach: usize = box_sizes(sigma_for_blur(blur)).iter().map(|s| s / 2).sum();
    reach as u32 + 1
}

/// Odd widths of three box blurs approximating a Gaussian of `sigma`.
fn box_sizes(sigma: f32) -> [usize; 3] {
    const PASSES: f32 = 3.0;
    let variance = 12.0 * sigma * sigma;
    let ideal = (variance / PASSES + 1.0).sqrt();

    let mut lower = ideal.floor().max(1.0) as usize;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let upper = lower + 2;

    let wl = lower as f32;
    let lower_count = ((variance - PASSES * wl * wl - 4.0 * PASSES * wl - 3.0 * PASSES)
        / (-4.0 * wl - 4.0))
        .round()
        .clamp(0.0, PASSES) as usize;

    let mut sizes = [upper; 3];
    for size in sizes.iter_mut().take(lower_count) {
        *size = lower;
    }
    sizes
}

/// Blur a single-channel mask in place, treating everything outside it as zero.
pub fn blur_mask(mask: &mut [f32], width: u32, height: u32, sigma: f32) {
    debug_assert_eq!(mask.len(), (width as usize) * (height as usize));
    if sigma <= 0.0 || mask.is_empty() {
        return;
    }

    let (w, h) = (width as usize, height as usize);
    let mut tmp = vec![0.0f32; mask.len()];
    for size in box_sizes(sigma) {
        let radius = size / 2;
        if radius == 0 {
            continue;
        }
        horizontal_box(mask, &mut tmp, w, h, radius);
        vertical_box(&tmp, mask, w, h, radius);
    }
}

fn horizontal_box(src: &[f32], dst: &mut [f32], w: usize, h: usize, radius: usize) {
    let norm = 1.0 / (2 * radius + 1) as f64;
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        let out = &mut dst[y * w..(y + 1) * w];
        let mut acc: f64 = row[..(radius + 1).min(w)].iter().map(|&v| f64::from(v)).sum();
        for x in 0..w {
            out[x] = (acc * norm) as f32;
            if x + radius + 1 < w {
                acc += f64::from(row[x + radius + 1]);
            }
            if x >= radius {
                acc -= f64::from(row[x - radius]);
            }
        }
    }
}

fn vertical_box(src: &[f32], dst: &mut [f32], w: usize, h: usize, radius: usize) {
    let norm = 1.0 / (2 * radius + 1) as f64;
    let mut acc = vec![0.0f64; w];
    for y in 0..(radius + 1).min(h) {
        for (a, &v) in acc.iter_mut().zip(&src[y * w..(y + 1) * w]) {
            *a += f64::from(v);
        }
    }
    for y in 0..h {
        for (d, &a) in dst[y * w..(y + 1) * w].iter_mut().zip(&acc) {
            *d = (a * norm) as f32;
        }
        if y + radius + 1 < h {
            let add = y + radius + 1;
            for (a, &v) in acc.iter_mut().zip(&src[add * w..(add + 1) * w]) {
                *a += f64::from(v);
            }
        }
        if y >= radius {
            let sub = y - radius;
            for (a, &v) in acc.iter_mut().zip(&src[sub * w..(sub + 1) * w]) {
                *a -= f64::from(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_extent() {
        assert_eq!(blur_extent(0), 0);
        assert_eq!(blur_extent(10), 14);
        assert_eq!(blur_extent(100), 149);
    }

    #[test]
    fn test_box_sizes_match_gaussian_variance() {
        for sigma in [2.0f32, 3.0, 5.0, 12.5, 50.0] {
            let sizes = box_sizes(sigma);
            assert!(sizes.iter().all(|s| s % 2 == 1));
            // A box of width n has variance (n^2 - 1) / 12.
            let variance: f32 = sizes.iter().map(|&n| ((n * n - 1) as f32) / 12.0).sum();
            let target = sigma * sigma;
            assert!(
                (variance - target).abs() / target < 0.2,
                "sigma {}: {:?} gives variance {}",
                sigma,
                sizes,
                variance
            );
        }
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let mut mask = vec![0.0, 1.0, 0.5, 0.25];
        let original = mask.clone();
        blur_mask(&mut mask, 2, 2, 0.0);
        assert_eq!(mask, original);
    }

    #[test]
    fn test_blur_spreads_energy_from_single_pixel() {
        let (w, h) = (21u32, 21u32);
        let mut mask = vec![0.0f32; (w * h) as usize];
        mask[(10 * w + 10) as usize] = 1.0;

        blur_mask(&mut mask, w, h, 2.0);

        let nonzero = mask.iter().filter(|v| **v > 1e-4).count();
        assert!(nonzero > 1);
        let total: f32 = mask.iter().sum();
        assert!((total - 1.0).abs() < 1e-3, "energy should be preserved, got {}", total);
        assert!(mask[(10 * w + 10) as usize] > mask[(10 * w + 12) as usize]);
    }

    #[test]
    fn test_blur_softens_edge() {
        let (w, h) = (40u32, 41u32);
        let mut mask: Vec<f32> = (0..w * h)
            .map(|i| if i % w < 20 { 1.0 } else { 0.0 })
            .collect();
        blur_mask(&mut mask, w, h, 3.0);

        let row = (20 * w) as usize;
        assert!(mask[row + 19] < 1.0 && mask[row + 19] > 0.5);
        assert!(mask[row + 20] > 0.0 && mask[row + 20] < 0.5);
        assert!(mask[row + 10] > 0.99, "interior should stay solid, got {}", mask[row + 10]);
    }
}
