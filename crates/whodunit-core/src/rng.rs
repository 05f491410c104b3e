//! Random number generator abstraction.
//!
//! Used for participant access-PIN generation. In production this wraps the
//! thread-local RNG; tests inject a seeded or recorded implementation.

use rand::Rng;

/// Abstraction over random number generation.
pub trait DeterministicRng: Send {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl DeterministicRng for ThreadRngSource {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        rand::rng().random_range(min..=max)
    }
}

/// Draws a 4-digit access PIN, zero-padding excluded by construction.
pub fn four_digit_pin(rng: &mut dyn DeterministicRng) -> String {
    rng.next_u32_range(1000, 9999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LowRng;

    impl DeterministicRng for LowRng {
        fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
            min
        }
    }

    #[test]
    fn test_four_digit_pin_is_four_digits() {
        let mut rng = LowRng;
        let pin = four_digit_pin(&mut rng);
        assert_eq!(pin.len(), 4);
        assert_eq!(pin, "1000");
    }

    #[test]
    fn test_thread_rng_stays_in_range() {
        let mut rng = ThreadRngSource;
        for _ in 0..32 {
            let value = rng.next_u32_range(1000, 9999);
            assert!((1000..=9999).contains(&value));
        }
    }
}
