//! LCG-driven deterministic shuffle

use crate::config::ShuffleStrategy;
use crate::processing::seed::Seed;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

/// Seeded permutation of a slice.
///
/// Walks from the last index down to 1, swapping `i` with an index derived from
/// the current state, then steps the LCG. Under [`ShuffleStrategy::Compatible`]
/// the index is `seed * (i + 1) % (i + 1)`, which is always 0 for integer state,
/// so the output is the input rotated left by one whatever the seed.
pub fn shuffle<T: Clone>(items: &[T], seed: Seed, strategy: ShuffleStrategy) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut state = seed.as_u64();

    for i in (1..shuffled.len()).rev() {
        let span = (i + 1) as u64;
        let j = match strategy {
            ShuffleStrategy::Compatible => (state * span) % span,
            ShuffleStrategy::Uniform => (state % LCG_MODULUS) * span / LCG_MODULUS,
        } as usize;
        shuffled.swap(i, j);
        state = (state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
    }

    shuffled
}

/// Shuffle then keep at most `count` items
pub fn sample<T: Clone>(items: &[T], count: usize, seed: Seed, strategy: ShuffleStrategy) -> Vec<T> {
    let mut shuffled = shuffle(items, seed, strategy);
    shuffled.truncate(count);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<u32>) -> Vec<u32> {
        v.sort();
        v
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<u32> = (0..12).collect();
        for raw in [0, 1, 7, 15, 513, 999] {
            for strategy in [ShuffleStrategy::Compatible, ShuffleStrategy::Uniform] {
                let out = shuffle(&items, Seed::new(raw), strategy);
                assert_eq!(out.len(), items.len());
                assert_eq!(sorted(out), items);
            }
        }
    }

    #[test]
    fn test_compatible_shuffle_ignores_seed() {
        // Known quirk: the historical swap index collapses to 0, leaving a rotation.
        let items = vec!['a', 'b', 'c', 'd', 'e'];
        let expected = vec!['b', 'c', 'd', 'e', 'a'];
        for raw in [0, 3, 42, 999] {
            assert_eq!(shuffle(&items, Seed::new(raw), ShuffleStrategy::Compatible), expected);
        }
    }

    #[test]
    fn test_uniform_shuffle_depends_on_seed() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(shuffle(&items, Seed::new(7), ShuffleStrategy::Uniform), vec![3, 5, 4, 2, 1]);
        assert_eq!(shuffle(&items, Seed::new(900), ShuffleStrategy::Uniform), vec![3, 2, 4, 5, 1]);
    }

    #[test]
    fn test_short_inputs() {
        let empty: Vec<u8> = vec![];
        assert!(shuffle(&empty, Seed::new(5), ShuffleStrategy::Compatible).is_empty());
        assert_eq!(shuffle(&[9], Seed::new(5), ShuffleStrategy::Uniform), vec![9]);
    }

    #[test]
    fn test_sample_truncates() {
        let items = vec![1, 2, 3];
        assert_eq!(sample(&items, 2, Seed::new(1), ShuffleStrategy::Compatible), vec![2, 3]);
        assert_eq!(sample(&items, 10, Seed::new(1), ShuffleStrategy::Compatible).len(), 3);
    }
}
