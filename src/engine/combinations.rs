/// Lazy enumeration of index subsets of `0..n` with sizes `1..=max_size`.
///
/// Subsets come out in depth-first pre-order over increasing indices
/// (`[0]`, `[0, 1]`, `[0, 1, 2]`, ..., `[0, 2]`, ...), so each subset is
/// produced exactly once and the order is deterministic. At most `cap`
/// subsets are yielded. Build a new iterator to enumerate again.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    max_size: usize,
    cap: usize,
    emitted: usize,
    stack: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, max_size: usize, cap: usize) -> Self {
        Self {
            n,
            max_size,
            cap,
            emitted: 0,
            stack: Vec::with_capacity(max_size),
            started: false,
            done: n == 0 || max_size == 0 || cap == 0,
        }
    }

    /// Step `stack` to the next subset in pre-order. Returns false when exhausted.
    fn advance(&mut self) -> bool {
        if !self.started {
            self.started = true;
            self.stack.push(0);
            return true;
        }

        // Descend: extend with the next larger index
        if let Some(&last) = self.stack.last() {
            if self.stack.len() < self.max_size && last + 1 < self.n {
                self.stack.push(last + 1);
                return true;
            }
        }

        // Backtrack: bump the deepest index that still has a successor
        while let Some(last) = self.stack.pop() {
            if last + 1 < self.n {
                self.stack.push(last + 1);
                return true;
            }
        }

        false
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.emitted >= self.cap {
            return None;
        }

        if !self.advance() {
            self.done = true;
            return None;
        }

        self.emitted += 1;
        Some(self.stack.clone())
    }
}

/// Number of subsets of sizes `1..=k` from `n` items, ignoring any cap.
pub fn subset_count(n: usize, k: usize) -> usize {
    (1..=k.min(n)).map(|size| binomial(n, size)).sum()
}

fn binomial(n: usize, k: usize) -> usize {
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_preorder_sequence() {
        let combos: Vec<Vec<usize>> = Combinations::new(3, 2, 100).collect();
        assert_eq!(
            combos,
            vec![
                vec![0],
                vec![0, 1],
                vec![0, 2],
                vec![1],
                vec![1, 2],
                vec![2],
            ]
        );
    }

    #[test]
    fn test_full_enumeration_is_unique_and_complete() {
        let combos: Vec<Vec<usize>> = Combinations::new(6, 6, usize::MAX).collect();
        assert_eq!(combos.len(), 63);
        let unique: HashSet<Vec<usize>> = combos.iter().cloned().collect();
        assert_eq!(unique.len(), 63);
        assert!(combos.iter().all(|c| c.windows(2).all(|w| w[0] < w[1])));
    }

    #[test]
    fn test_respects_max_size() {
        assert!(Combinations::new(8, 3, usize::MAX).all(|c| c.len() <= 3));
        assert_eq!(Combinations::new(8, 3, usize::MAX).count(), subset_count(8, 3));
    }

    #[test]
    fn test_cap_stops_enumeration() {
        assert!(subset_count(18, 6) > 2000);
        assert_eq!(Combinations::new(18, 6, 2000).count(), 2000);
        assert_eq!(
            Combinations::new(18, 6, 2000).last(),
            Some(vec![0, 1, 7, 8, 15, 16])
        );
        // The next combination in order is never produced.
        assert_eq!(
            Combinations::new(18, 6, usize::MAX).nth(2000),
            Some(vec![0, 1, 7, 8, 15, 17])
        );

        let capped: Vec<Vec<usize>> = Combinations::new(5, 5, 4).collect();
        let uncapped: Vec<Vec<usize>> = Combinations::new(5, 5, usize::MAX).take(4).collect();
        assert_eq!(capped, uncapped);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(Combinations::new(0, 4, 2000).count(), 0);
        assert_eq!(Combinations::new(4, 0, 2000).count(), 0);
        assert_eq!(Combinations::new(4, 4, 0).count(), 0);
    }

    #[test]
    fn test_restartable() {
        let first: Vec<Vec<usize>> = Combinations::new(4, 2, 2000).collect();
        let second: Vec<Vec<usize>> = Combinations::new(4, 2, 2000).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_subset_count() {
        assert_eq!(subset_count(3, 2), 6);
        assert_eq!(subset_count(18, 6), 31179);
        assert_eq!(subset_count(2, 6), 3);
    }
}
