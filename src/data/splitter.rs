// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles records with a seeded RNG and splits them into:
//   - Training set: used to fit the scaler and the classifiers
//   - Test set:     used only to score the trained classifiers
//
// Why a SEEDED shuffle instead of thread_rng?
//   The seed is recorded in the selection report, so any training
//   run — and any test of the harness — can be reproduced exactly.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom,
// the standard unbiased shuffle algorithm.
//
// Reference: rand crate documentation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `records` deterministically and split into (train, test).
///
/// # Arguments
/// * `records`        - All available records (consumed)
/// * `train_fraction` - Proportion for training, e.g. 0.8 = 80%
/// * `seed`           - RNG seed; same seed, same split
pub fn split_train_test<T>(
    mut records: Vec<T>,
    train_fraction: f64,
    seed: u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);

    // Fisher-Yates shuffle — every permutation is equally likely
    records.shuffle(&mut rng);

    let total    = records.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] and returns them
    let test = records.split_off(split_at);

    tracing::debug!(
        "Dataset split (seed {}): {} training, {} test",
        seed,
        records.len(),
        test.len(),
    );

    (records, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.8, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_all_items_preserved() {
        // No items should be lost in the split
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = split_train_test(items, 0.7, 42);
        assert_eq!(train.len() + test.len(), 50);
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.8, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_same_seed_same_split() {
        let items: Vec<usize> = (0..100).collect();
        let (train_a, test_a) = split_train_test(items.clone(), 0.8, 7);
        let (train_b, test_b) = split_train_test(items, 0.8, 7);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
    }

    #[test]
    fn test_different_seed_different_split() {
        let items: Vec<usize> = (0..100).collect();
        let (train_a, _) = split_train_test(items.clone(), 0.8, 1);
        let (train_b, _) = split_train_test(items, 0.8, 2);
        assert_ne!(train_a, train_b);
    }
}
