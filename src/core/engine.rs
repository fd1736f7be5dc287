use crate::core::constraint::SeparationConstraint;
use crate::core::partition::partitions;
use crate::core::selector::select_best;
use crate::domain::model::{Candidate, Participant, SeparatedPair};
use crate::utils::error::Result;

/// Exhaustive team balancer for a pool of ten.
#[derive(Debug, Clone, Copy)]
pub struct TeamBalancer {
    constraint: SeparationConstraint,
}

impl TeamBalancer {
    pub fn new(pair: SeparatedPair) -> Self {
        Self {
            constraint: SeparationConstraint::new(pair),
        }
    }

    /// Scored candidates that satisfy the separation constraint, in
    /// enumeration order.
    pub fn candidates(&self, pool: &[Participant]) -> Result<Vec<Candidate>> {
        let candidates: Vec<Candidate> = partitions(pool)?
            .filter(|partition| self.constraint.allows(partition))
            .map(Candidate::score)
            .collect();

        tracing::debug!("{} candidate partitions passed the constraint", candidates.len());
        Ok(candidates)
    }

    pub fn balance(&self, pool: &[Participant]) -> Result<Candidate> {
        let best = select_best(self.candidates(pool)?)?;
        tracing::debug!(
            "Best partition: {} vs {} (difference {})",
            best.partition.team_a.total_level(),
            best.partition.team_b.total_level(),
            best.difference
        );
        Ok(best)
    }
}
