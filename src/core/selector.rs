use crate::domain::model::Candidate;
use crate::utils::error::{MixError, Result};

/// Picks the candidate with the smallest difference.
///
/// Ties go to the earliest candidate in iteration order, so feeding it the
/// generator's output in order gives the same winner on every run.
pub fn select_best<I>(candidates: I) -> Result<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut best: Option<Candidate> = None;

    for candidate in candidates {
        let improves = best
            .as_ref()
            .map_or(true, |current| candidate.difference < current.difference);
        if improves {
            best = Some(candidate);
        }
    }

    best.ok_or(MixError::NoValidPartition)
}
