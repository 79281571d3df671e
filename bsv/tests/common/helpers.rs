use bitcoinsv_codec::bitcoin::Hash160;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Initialize test logging (call once per test suite)
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Generate `count` pseudo-random 160-bit hashes from a fixed seed.
pub fn random_hashes(seed: u64, count: usize) -> Vec<Hash160> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut h = [0u8; 20];
            rng.fill_bytes(&mut h);
            Hash160::from(h)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_hashes_are_repeatable() {
        assert_eq!(random_hashes(7, 5), random_hashes(7, 5));
        assert_ne!(random_hashes(7, 1), random_hashes(8, 1));
    }
}
