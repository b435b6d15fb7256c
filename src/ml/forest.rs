// ============================================================
// Layer 5 — Random Forest (ensemble-of-trees family)
// ============================================================
// Bagged CART classification trees with gini impurity:
//   - each tree trains on a bootstrap sample (with replacement)
//   - each split considers a random sqrt-sized feature subset
//   - prediction is the majority vote over all trees
//
// Hyperparameters are the fixed defaults carried over from the
// source's library: 100 trees, unlimited depth, minimum 2 samples
// to split. The forest is seeded so a training run is reproducible.
//
// The trees are plain serde structs, so the fitted forest persists
// through the Artifact Store exactly like the other two families.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::Rng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Fixed defaults for forest fitting.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    pub n_trees:           usize,
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    pub seed:              u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees:           100,
            max_depth:         None,
            min_samples_split: 2,
            seed:              0,
        }
    }
}

/// One node of a fitted CART tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Majority class of the samples that reached this node.
    Leaf { prediction: u8 },
    /// Binary split: `feature <= threshold` goes left.
    Split {
        feature:   usize,
        threshold: f64,
        left:      Box<TreeNode>,
        right:     Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict(&self, x: &[f64]) -> u8 {
        match self {
            TreeNode::Leaf { prediction } => *prediction,
            TreeNode::Split { feature, threshold, left, right } => {
                if x[*feature] <= *threshold {
                    left.predict(x)
                } else {
                    right.predict(x)
                }
            }
        }
    }
}

/// A fitted forest: just the trees. Votes are counted at predict
/// time; ties between the two classes resolve to class 1, which
/// only matters for even tree counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<TreeNode>,
}

impl RandomForest {
    /// Fit `config.n_trees` bagged trees on the scaled training
    /// matrix. `y` must hold one 0/1 label per row of `x`.
    pub fn fit(x: &Array2<f64>, y: &[u8], config: &ForestConfig) -> Self {
        let n = x.nrows();
        let n_features = x.ncols();
        // sqrt feature subsampling, the classic forest default
        let features_per_split = (n_features as f64).sqrt().round().max(1.0) as usize;

        let trees = (0..config.n_trees)
            .map(|tree_idx| {
                // Independent, reproducible stream per tree
                let mut rng = StdRng::seed_from_u64(
                    config.seed.wrapping_add(tree_idx as u64),
                );

                // Bootstrap: n draws with replacement
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

                grow_tree(
                    x,
                    y,
                    &sample,
                    0,
                    config,
                    features_per_split,
                    &mut rng,
                )
            })
            .collect();

        Self { trees }
    }

    /// Majority vote over all trees for one scaled feature vector.
    pub fn predict(&self, x: &[f64]) -> u8 {
        let positive = self
            .trees
            .iter()
            .filter(|tree| tree.predict(x) == 1)
            .count();
        u8::from(positive * 2 >= self.trees.len())
    }

    #[cfg(test)]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Gini impurity of a set of labels given the positive count.
fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

fn majority(y: &[u8], indices: &[usize]) -> u8 {
    let positives = indices.iter().filter(|&&i| y[i] == 1).count();
    u8::from(positives * 2 >= indices.len())
}

fn grow_tree(
    x: &Array2<f64>,
    y: &[u8],
    indices: &[usize],
    depth: usize,
    config: &ForestConfig,
    features_per_split: usize,
    rng: &mut StdRng,
) -> TreeNode {
    let positives = indices.iter().filter(|&&i| y[i] == 1).count();

    // Stop: pure node, too few samples, or depth limit reached
    let pure = positives == 0 || positives == indices.len();
    let too_small = indices.len() < config.min_samples_split;
    let too_deep = config.max_depth.is_some_and(|d| depth >= d);
    if pure || too_small || too_deep {
        return TreeNode::Leaf { prediction: majority(y, indices) };
    }

    // Random feature subset for this split
    let mut candidates: Vec<usize> = (0..x.ncols()).collect();
    candidates.shuffle(rng);
    candidates.truncate(features_per_split);

    let parent_gini = gini(positives, indices.len());
    let mut best: Option<(usize, f64, f64)> = None; // (feature, threshold, gain)

    for &feature in &candidates {
        // Sort node samples by this feature and scan midpoints
        let mut sorted: Vec<(f64, u8)> = indices
            .iter()
            .map(|&i| (x[[i, feature]], y[i]))
            .collect();
        sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("feature values are finite"));

        let total = sorted.len();
        let total_pos = positives;
        let mut left_pos = 0usize;

        for split in 1..total {
            if sorted[split - 1].1 == 1 {
                left_pos += 1;
            }
            // No split between equal values
            if sorted[split].0 == sorted[split - 1].0 {
                continue;
            }

            let left_total  = split;
            let right_total = total - split;
            let right_pos   = total_pos - left_pos;

            let weighted = (left_total as f64 / total as f64) * gini(left_pos, left_total)
                + (right_total as f64 / total as f64) * gini(right_pos, right_total);
            let gain = parent_gini - weighted;

            if gain > 1e-12 && best.map_or(true, |(_, _, g)| gain > g) {
                let threshold = (sorted[split - 1].0 + sorted[split].0) / 2.0;
                best = Some((feature, threshold, gain));
            }
        }
    }

    let Some((feature, threshold, _)) = best else {
        // No candidate feature separates this node
        return TreeNode::Leaf { prediction: majority(y, indices) };
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[[i, feature]] <= threshold);

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(grow_tree(x, y, &left_idx, depth + 1, config, features_per_split, rng)),
        right: Box::new(grow_tree(x, y, &right_idx, depth + 1, config, features_per_split, rng)),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Two well-separated clusters along the first feature.
    fn separable_data() -> (Array2<f64>, Vec<u8>) {
        let mut x = Array2::zeros((40, 3));
        let mut y = Vec::new();
        for i in 0..40 {
            let class = u8::from(i >= 20);
            x[[i, 0]] = if class == 1 { 5.0 } else { -5.0 } + (i % 5) as f64 * 0.1;
            x[[i, 1]] = (i % 7) as f64;
            x[[i, 2]] = (i % 3) as f64;
            y.push(class);
        }
        (x, y)
    }

    #[test]
    fn test_learns_separable_data() {
        let (x, y) = separable_data();
        let forest = RandomForest::fit(&x, &y, &ForestConfig {
            n_trees: 25,
            seed:    42,
            ..ForestConfig::default()
        });

        assert_eq!(forest.predict(&[-5.0, 2.0, 1.0]), 0);
        assert_eq!(forest.predict(&[5.0, 2.0, 1.0]), 1);
    }

    #[test]
    fn test_seed_makes_fit_deterministic() {
        let (x, y) = separable_data();
        let config = ForestConfig { n_trees: 10, seed: 7, ..ForestConfig::default() };
        let a = RandomForest::fit(&x, &y, &config);
        let b = RandomForest::fit(&x, &y, &config);

        // Same seed, same trees — compare via serialization
        let bytes_a = bincode::serialize(&a).unwrap();
        let bytes_b = bincode::serialize(&b).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn test_single_class_yields_constant_leaf() {
        let mut x = Array2::zeros((10, 2));
        for i in 0..10 {
            x[[i, 0]] = i as f64;
        }
        let y = vec![1u8; 10];
        let forest = RandomForest::fit(&x, &y, &ForestConfig {
            n_trees: 5,
            seed:    1,
            ..ForestConfig::default()
        });
        assert_eq!(forest.predict(&[3.0, 0.0]), 1);
        assert_eq!(forest.n_trees(), 5);
    }
}
