/// Iterator over all `k`-element index subsets of `0..n`, in lexicographic order.
///
/// `k == 0` yields a single empty subset; `k > n` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, indices: (0..k).collect(), done: k > n }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices.clone();
        let k = self.indices.len();

        // Find rightmost index that can be incremented
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - (k - i) {
                self.indices[i] += 1;
                // Reset all indices to the right
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(result)
    }
}

/// All `k`-subsets of `items`, each in input order.
///
/// ```
/// use badugi_engine::evaluator::combinations;
///
/// let subsets: Vec<Vec<u8>> = combinations(&[1, 2, 3], 2).collect();
/// assert_eq!(subsets, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
/// ```
pub fn combinations<T: Copy>(items: &[T], k: usize) -> impl Iterator<Item = Vec<T>> + '_ {
    Combinations::new(items.len(), k).map(move |idx| idx.iter().map(|&i| items[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binomial(n: usize, k: usize) -> usize {
        (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
    }

    #[test]
    fn counts_match_binomial() {
        for n in 0..=8 {
            for k in 0..=n {
                assert_eq!(Combinations::new(n, k).count(), binomial(n, k), "C({n},{k})");
            }
        }
    }

    #[test]
    fn seven_choose_five_first_and_last() {
        let all: Vec<_> = Combinations::new(7, 5).collect();
        assert_eq!(all.len(), 21);
        assert_eq!(all[0], vec![0, 1, 2, 3, 4]);
        assert_eq!(all[20], vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn lexicographic_and_strictly_increasing() {
        let all: Vec<_> = Combinations::new(6, 3).collect();
        for w in all.windows(2) {
            assert!(w[0] < w[1], "{:?} should precede {:?}", w[0], w[1]);
        }
        for c in &all {
            assert!(c.windows(2).all(|p| p[0] < p[1]));
            assert!(c.iter().all(|&i| i < 6));
        }
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(Combinations::new(3, 0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert_eq!(Combinations::new(4, 4).collect::<Vec<_>>(), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn iterator_stays_exhausted() {
        let mut it = Combinations::new(4, 2);
        for _ in 0..6 {
            assert!(it.next().is_some());
        }
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
