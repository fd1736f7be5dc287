use crate::domain::model::{Partition, SeparatedPair, Team};

/// Rejects partitions that put both members of the designated pair on one team.
#[derive(Debug, Clone, Copy)]
pub struct SeparationConstraint {
    pair: SeparatedPair,
}

impl SeparationConstraint {
    pub fn new(pair: SeparatedPair) -> Self {
        Self { pair }
    }

    /// A pair member missing from the pool can never share a team, so such
    /// partitions always pass.
    pub fn allows(&self, partition: &Partition) -> bool {
        !(self.together_in(&partition.team_a) || self.together_in(&partition.team_b))
    }

    fn together_in(&self, team: &Team) -> bool {
        team.contains(self.pair.first) && team.contains(self.pair.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Participant;

    const ZAPGOD: u64 = 291617683416285194;
    const JOTALHA: u64 = 692595982378074222;

    fn constraint() -> SeparationConstraint {
        SeparationConstraint::new(SeparatedPair::new(ZAPGOD, JOTALHA))
    }

    fn partition(team_a: &[u64], team_b: &[u64]) -> Partition {
        let team = |ids: &[u64]| {
            Team::new(ids.iter().map(|&id| Participant::new(id, 10, "x")).collect())
        };
        Partition {
            team_a: team(team_a),
            team_b: team(team_b),
        }
    }

    #[test]
    fn test_same_team_rejected() {
        assert!(!constraint().allows(&partition(&[ZAPGOD, JOTALHA], &[1])));
        assert!(!constraint().allows(&partition(&[1], &[JOTALHA, ZAPGOD])));
    }

    #[test]
    fn test_split_pair_allowed() {
        assert!(constraint().allows(&partition(&[ZAPGOD, 1], &[JOTALHA])));
    }

    #[test]
    fn test_absent_pair_member_always_allowed() {
        assert!(constraint().allows(&partition(&[ZAPGOD, 1], &[2, 3])));
        assert!(constraint().allows(&partition(&[1, 2], &[3, 4])));
    }
}
