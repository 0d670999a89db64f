//! Presentation-order shuffling: one unbiased Fisher-Yates pass over the
//! candidate list, nothing more.

use rand::Rng;
use rand::seq::SliceRandom;

/// Return the items in a uniformly random order, leaving the input untouched.
pub fn shuffle_order<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut order = items.to_vec();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn output_is_a_permutation_of_the_input() {
        let items = vec![10, 20, 30, 40, 50, 60, 70];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let mut shuffled = shuffle_order(&items, &mut rng);
            shuffled.sort_unstable();
            assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn empty_and_singleton_inputs_pass_through() {
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(shuffle_order::<u8, _>(&[], &mut rng), Vec::<u8>::new());
        assert_eq!(shuffle_order(&[42], &mut rng), vec![42]);
    }

    /// Lehmer code of a permutation of `0..n`, used to bucket observations.
    fn permutation_index(perm: &[u8]) -> usize {
        let n = perm.len();
        let mut index = 0usize;
        for i in 0..n {
            let smaller = perm[i + 1..].iter().filter(|&&x| x < perm[i]).count();
            index = index * (n - i) + smaller;
        }
        index
    }

    #[test]
    fn five_items_cover_all_permutations_uniformly() {
        // 120 permutations, 48k trials, expected 400 per bucket. Chi-square
        // with 119 degrees of freedom stays under 180 at the 0.9998 quantile.
        const TRIALS: usize = 48_000;
        const BUCKETS: usize = 120;

        let items: Vec<u8> = vec![0, 1, 2, 3, 4];
        let mut rng = StdRng::seed_from_u64(9);
        let mut observed = [0u32; BUCKETS];

        for _ in 0..TRIALS {
            let shuffled = shuffle_order(&items, &mut rng);
            observed[permutation_index(&shuffled)] += 1;
        }

        let expected = TRIALS as f64 / BUCKETS as f64;
        let chi_square: f64 = observed
            .iter()
            .map(|&count| {
                let diff = count as f64 - expected;
                diff * diff / expected
            })
            .sum();

        assert!(
            chi_square < 180.0,
            "shuffle looks biased: chi-square = {chi_square:.1}"
        );
        assert!(observed.iter().all(|&count| count > 0));
    }
}
