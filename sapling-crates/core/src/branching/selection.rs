use super::tie_breaking::Direction;
use super::tie_breaking::InOrderTieBreaker;
use super::tie_breaking::TieBreaker;

/// Returns the candidate which minimises `evaluate` among the candidates satisfying `filter`; the
/// leftmost one on ties. Returns [`None`] if no candidate satisfies `filter`.
///
/// # Example
/// ```
/// # use sapling_core::branching::select_min;
/// let sizes = [3, 1, 4, 1, 5];
/// let selected = select_min(0..sizes.len(), |&index| sizes[index] > 1, |&index| sizes[index]);
///
/// assert_eq!(Some(0), selected);
/// ```
pub fn select_min<Candidate, Value: PartialOrd>(
    candidates: impl IntoIterator<Item = Candidate>,
    mut filter: impl FnMut(&Candidate) -> bool,
    mut evaluate: impl FnMut(&Candidate) -> Value,
) -> Option<Candidate> {
    let mut tie_breaker = InOrderTieBreaker::new(Direction::Minimum);
    candidates
        .into_iter()
        .filter(|candidate| filter(candidate))
        .for_each(|candidate| {
            let value = evaluate(&candidate);
            tie_breaker.consider(candidate, value);
        });
    tie_breaker.select()
}
