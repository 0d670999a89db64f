//! Weighted facilitator selection.
//!
//! Candidates picked less often in the past are proportionally more likely to
//! be chosen, and last week's winner sits the round out. With a roster of one
//! the previous winner becomes eligible again and may repeat.

use rand::Rng;
use uuid::Uuid;

/// Roster entry as seen by the selector: a candidate and its historical count.
#[derive(Debug, Clone)]
pub struct WeightedCandidate {
    /// Candidate identifier.
    pub id: Uuid,
    /// Number of weekly selections already referencing the candidate.
    pub times_selected: u64,
}

/// Draw this week's winner from the roster.
///
/// Each eligible candidate gets weight `max(eligible counts) + 1 - own count`,
/// so every weight is at least 1 and the least-picked candidate carries the
/// largest one. The draw is a single uniform sample over `[0, total_weight)`
/// walked across the cumulative weight bands.
///
/// Returns `None` only when the roster is empty.
pub fn draw_winner<R: Rng + ?Sized>(
    roster: &[WeightedCandidate],
    previous_winner: Option<Uuid>,
    rng: &mut R,
) -> Option<Uuid> {
    if roster.is_empty() {
        return None;
    }

    let mut eligible: Vec<&WeightedCandidate> = roster
        .iter()
        .filter(|candidate| Some(candidate.id) != previous_winner)
        .collect();

    // Single-candidate roster: excluding the previous winner would leave
    // nobody, so the repeat win is allowed.
    if eligible.is_empty() {
        eligible = roster.iter().collect();
    }

    let max_count = eligible
        .iter()
        .map(|candidate| candidate.times_selected)
        .max()
        .unwrap_or(0);

    let weights: Vec<u64> = eligible
        .iter()
        .map(|candidate| max_count + 1 - candidate.times_selected)
        .collect();
    let total_weight: u64 = weights.iter().sum();

    let mut draw = rng.random_range(0..total_weight);
    for (candidate, weight) in eligible.iter().zip(&weights) {
        if draw < *weight {
            return Some(candidate.id);
        }
        draw -= weight;
    }

    eligible.last().map(|candidate| candidate.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roster(counts: &[u64]) -> Vec<WeightedCandidate> {
        counts
            .iter()
            .map(|&times_selected| WeightedCandidate {
                id: Uuid::new_v4(),
                times_selected,
            })
            .collect()
    }

    #[test]
    fn empty_roster_yields_no_winner() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_winner(&[], None, &mut rng), None);
    }

    #[test]
    fn winner_always_comes_from_the_roster() {
        let candidates = roster(&[0, 2, 7]);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let winner = draw_winner(&candidates, None, &mut rng).unwrap();
            assert!(candidates.iter().any(|candidate| candidate.id == winner));
        }
    }

    #[test]
    fn previous_winner_is_never_repeated() {
        let candidates = roster(&[3, 3, 3, 3]);
        let previous = candidates[1].id;
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let winner = draw_winner(&candidates, Some(previous), &mut rng).unwrap();
            assert_ne!(winner, previous);
        }
    }

    #[test]
    fn sole_candidate_may_repeat() {
        let candidates = roster(&[5]);
        let previous = candidates[0].id;
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            draw_winner(&candidates, Some(previous), &mut rng),
            Some(candidates[0].id)
        );
    }

    #[test]
    fn least_picked_candidate_wins_most_often() {
        // Counts [0, 5, 5] give weights [6, 1, 1]: the fresh candidate should
        // take roughly three quarters of the draws.
        let candidates = roster(&[0, 5, 5]);
        let mut rng = StdRng::seed_from_u64(5);

        let mut wins = [0u32; 3];
        for _ in 0..10_000 {
            let winner = draw_winner(&candidates, None, &mut rng).unwrap();
            let slot = candidates
                .iter()
                .position(|candidate| candidate.id == winner)
                .unwrap();
            wins[slot] += 1;
        }

        assert!(wins[0] > wins[1]);
        assert!(wins[0] > wins[2]);
        assert!(wins[0] > 6_000, "expected ~7500 wins, got {}", wins[0]);
    }

    #[test]
    fn uniform_counts_mean_uniform_chances() {
        let candidates = roster(&[2, 2, 2, 2]);
        let mut rng = StdRng::seed_from_u64(6);

        let mut wins = [0u32; 4];
        for _ in 0..20_000 {
            let winner = draw_winner(&candidates, None, &mut rng).unwrap();
            let slot = candidates
                .iter()
                .position(|candidate| candidate.id == winner)
                .unwrap();
            wins[slot] += 1;
        }

        for count in wins {
            assert!((4_500..5_500).contains(&count), "skewed draw: {wins:?}");
        }
    }
}
