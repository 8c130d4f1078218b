//! Texture sampling policy.
//!
//! Mipmaps and repeat wrapping are only used for power-of-two images, other
//! sizes are clamped to the edge and filtered linearly.

/// Opaque blue, shown until the real image has been uploaded.
pub const PLACEHOLDER_PIXEL: [u8; 4] = [0, 0, 255, 255];

pub fn is_power_of_two(value: u32) -> bool {
    value.is_power_of_two()
}

/// How a texture is wrapped and filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Generate mipmaps, repeat wrapping, trilinear minification.
    Mipmapped,
    /// No mipmaps, clamp-to-edge wrapping, linear filtering.
    ClampLinear,
}

impl Sampling {
    pub fn for_size(width: u32, height: u32) -> Self {
        if is_power_of_two(width) && is_power_of_two(height) {
            Sampling::Mipmapped
        } else {
            Sampling::ClampLinear
        }
    }

    pub fn uses_mipmaps(&self) -> bool {
        *self == Sampling::Mipmapped
    }
}

/// Flips RGBA rows in place so the first image row ends up at `v = 1`.
pub fn flip_rows(pixels: &mut [u8], width: u32, height: u32) {
    let row = width as usize * 4;
    let height = height as usize;
    debug_assert_eq!(pixels.len(), row * height);
    for y in 0..height / 2 {
        let (top, bottom) = pixels.split_at_mut((height - 1 - y) * row);
        top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(256));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(300));
    }

    #[test]
    fn test_sampling_requires_both_dimensions() {
        assert_eq!(Sampling::for_size(256, 512), Sampling::Mipmapped);
        assert_eq!(Sampling::for_size(256, 300), Sampling::ClampLinear);
        assert_eq!(Sampling::for_size(300, 256), Sampling::ClampLinear);
        assert!(Sampling::for_size(1, 1).uses_mipmaps());
    }

    #[test]
    fn test_flip_rows() {
        // 1x3 image, one red channel value per row.
        let mut pixels = vec![1, 0, 0, 255, 2, 0, 0, 255, 3, 0, 0, 255];
        flip_rows(&mut pixels, 1, 3);
        assert_eq!(pixels, vec![3, 0, 0, 255, 2, 0, 0, 255, 1, 0, 0, 255]);

        let mut even = vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4];
        flip_rows(&mut even, 2, 2);
        assert_eq!(even, vec![3, 3, 3, 3, 4, 4, 4, 4, 1, 1, 1, 1, 2, 2, 2, 2]);
    }
}
