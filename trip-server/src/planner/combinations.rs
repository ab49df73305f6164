//! City combination enumeration.
//!
//! Combinations are produced lazily in lexicographic order of candidate
//! position: every candidate is paired with each combination drawn from the
//! candidates after it. No city repeats within a combination and no
//! combination is produced twice.

use std::collections::BTreeSet;

use crate::domain::CityCode;

/// Lazy iterator over `k`-sized combinations of candidate cities.
#[derive(Debug, Clone)]
pub struct Combinations {
    pool: Vec<CityCode>,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Enumerate combinations of `k` cities from `candidates`.
    ///
    /// Excluded cities are dropped from the pool before enumeration, as are
    /// repeated codes (first occurrence wins). If `k` is zero or larger than
    /// the pool the iterator is empty.
    pub fn new(candidates: &[CityCode], k: usize, excluded: &BTreeSet<CityCode>) -> Self {
        let mut seen = BTreeSet::new();
        let pool: Vec<CityCode> = candidates
            .iter()
            .copied()
            .filter(|city| !excluded.contains(city) && seen.insert(*city))
            .collect();

        let done = k == 0 || k > pool.len();

        Self {
            pool,
            indices: (0..k).collect(),
            started: false,
            done,
        }
    }

    /// Number of cities left to choose from after exclusions.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    fn current(&self) -> Vec<CityCode> {
        self.indices.iter().map(|&i| self.pool[i]).collect()
    }

    /// Advance `indices` to the next combination, or report exhaustion.
    fn advance(&mut self) -> bool {
        let n = self.pool.len();
        let k = self.indices.len();

        // Rightmost position that can still move right.
        let Some(pos) = (0..k).rev().find(|&i| self.indices[i] != i + n - k) else {
            return false;
        };

        self.indices[pos] += 1;
        for j in pos + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<CityCode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(self.current());
        }

        if self.advance() {
            Some(self.current())
        } else {
            self.done = true;
            None
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn binomial(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    fn pool_strategy() -> impl Strategy<Value = Vec<CityCode>> {
        prop::collection::btree_set("[A-Z]{3}", 0..9).prop_map(|set| {
            set.into_iter()
                .map(|s| CityCode::parse(&s).unwrap())
                .collect()
        })
    }

    proptest! {
        /// Yields exactly C(n, k) combinations.
        #[test]
        fn count_is_binomial(pool in pool_strategy(), k in 1usize..5) {
            let n = pool.len();
            let count = Combinations::new(&pool, k, &BTreeSet::new()).count();
            prop_assert_eq!(count, binomial(n, k));
        }

        /// Every combination has k distinct cities in candidate order, and
        /// no combination repeats.
        #[test]
        fn distinct_and_ordered(pool in pool_strategy(), k in 1usize..5) {
            let mut seen = BTreeSet::new();

            for combo in Combinations::new(&pool, k, &BTreeSet::new()) {
                prop_assert_eq!(combo.len(), k);
                prop_assert!(combo.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(seen.insert(combo));
            }
        }

        /// Excluded cities never appear.
        #[test]
        fn respects_exclusions(pool in pool_strategy(), k in 1usize..4, skip in 0usize..9) {
            let excluded: BTreeSet<CityCode> = pool.iter().copied().skip(skip).take(2).collect();

            for combo in Combinations::new(&pool, k, &excluded) {
                prop_assert!(combo.iter().all(|c| !excluded.contains(c)));
            }
        }
    }
}
