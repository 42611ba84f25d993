//! Percentage derivation for tally entries.

/// Share of `votes` in `total_votes`, as a percentage rounded to two decimal
/// places, half away from zero (`f64::round` on the value scaled by 100).
///
/// A zero total yields `0.0`: an election with no cast votes must not divide
/// by zero. Rounded percentages across candidates need not sum to exactly
/// 100; the residue is accepted, not corrected.
pub fn percentage(votes: u64, total_votes: u64) -> f64 {
    if total_votes == 0 {
        return 0.0;
    }
    let share = votes as f64 / total_votes as f64 * 100.0;
    (share * 100.0).round() / 100.0
}
