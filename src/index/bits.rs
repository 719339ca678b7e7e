//! Morton (Z-order) bit kernels.
//!
//! See <https://graphics.stanford.edu/~seander/bithacks.html#InterleaveBMN>.

/// Moves bit `i` of `v` to bit `2 * i`, leaving every odd bit clear.
pub fn spread(v: u32) -> u64 {
    let mut result = v as u64;
    result = (result | (result << 16)) & 0x0000FFFF0000FFFF;
    result = (result | (result << 8)) & 0x00FF00FF00FF00FF;
    result = (result | (result << 4)) & 0x0F0F0F0F0F0F0F0F;
    result = (result | (result << 2)) & 0x3333333333333333;
    (result | (result << 1)) & 0x5555555555555555
}

/// Inverse of [`spread`]: gathers the even bits of `v` into the low 32 bits.
///
/// Odd bits of the input are ignored.
pub fn compact(v: u64) -> u32 {
    let mut result = v & 0x5555555555555555;
    result = (result | (result >> 1)) & 0x3333333333333333;
    result = (result | (result >> 2)) & 0x0F0F0F0F0F0F0F0F;
    result = (result | (result >> 4)) & 0x00FF00FF00FF00FF;
    result = (result | (result >> 8)) & 0x0000FFFF0000FFFF;
    ((result | (result >> 16)) & 0x00000000FFFFFFFF) as u32
}

/// Interleaves `x` into the even bits and `y` into the odd bits.
///
/// Only the low 26 bits of each input are meaningful for a score; anything
/// above that still lands in the result and will be read back by
/// [`deinterleave`].
pub fn interleave(x: u32, y: u32) -> u64 {
    spread(x) | (spread(y) << 1)
}

/// Splits an interleaved value back into `(x, y)`.
pub fn deinterleave(v: u64) -> (u32, u32) {
    (compact(v), compact(v >> 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::GRID_SIZE;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_spread_places_bits_on_even_positions() {
        assert_eq!(spread(0), 0);
        assert_eq!(spread(1), 0b1);
        assert_eq!(spread(0b11), 0b101);
        assert_eq!(spread(0b1011), 0b1000101);
        assert_eq!(spread(u32::MAX), 0x5555555555555555);
    }

    #[test]
    fn test_spread_top_grid_bit() {
        let top = 1u32 << 25;
        assert_eq!(spread(top), 1u64 << 50);
        assert_eq!(spread(GRID_SIZE - 1), 0x0005555555555555);
    }

    #[test]
    fn test_compact_ignores_odd_bits() {
        assert_eq!(compact(0xAAAAAAAAAAAAAAAA), 0);
        assert_eq!(compact(0xFFFFFFFFFFFFFFFF), u32::MAX);
        assert_eq!(compact(0b1000111), 0b1011);
    }

    #[test]
    fn test_compact_inverts_spread_at_edges() {
        for v in [0, 1, 2, 0x00AB_CDEF, GRID_SIZE / 2, GRID_SIZE - 2, GRID_SIZE - 1] {
            assert_eq!(compact(spread(v)), v);
        }
    }

    #[test]
    fn test_compact_inverts_spread_sampled() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..10_000 {
            let v = rng.random_range(0..GRID_SIZE);
            assert_eq!(compact(spread(v)), v);
        }
    }

    #[test]
    fn test_interleave_ordering() {
        // x owns bit 0, y owns bit 1
        assert_eq!(interleave(1, 0), 0b01);
        assert_eq!(interleave(0, 1), 0b10);
        assert_eq!(interleave(0b11, 0b01), 0b0111);
    }

    #[test]
    fn test_deinterleave_recovers_inputs() {
        let mut rng = StdRng::seed_from_u64(26);
        for _ in 0..10_000 {
            let x = rng.random_range(0..GRID_SIZE);
            let y = rng.random_range(0..GRID_SIZE);
            assert_eq!(deinterleave(interleave(x, y)), (x, y));
        }
    }

    #[test]
    fn test_interleave_preserves_z_order_within_quadrant() {
        assert!(interleave(0, 0) < interleave(1, 0));
        assert!(interleave(1, 0) < interleave(0, 1));
        assert!(interleave(0, 1) < interleave(1, 1));
        assert!(interleave(1, 1) < interleave(2, 0));
    }
}
