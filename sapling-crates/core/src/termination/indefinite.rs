use super::TerminationCondition;
use crate::search::SearchStatistics;

/// A [`TerminationCondition`] which never triggers.
#[derive(Clone, Copy, Debug)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self, _: &SearchStatistics) -> bool {
        false
    }
}
