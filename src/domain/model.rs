use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chat-platform user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ParticipantId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ParticipantId)
    }
}

/// Persisted level entry, the value side of the member file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub level: u32,
    pub nickname: String,
}

/// A chat user as seen by the command layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: ParticipantId,
    pub display_name: String,
    pub bot: bool,
}

impl Member {
    pub fn new(id: u64, display_name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            display_name: display_name.into(),
            bot: false,
        }
    }

    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

/// A pool member with its level resolved for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub level: u32,
    pub label: String,
}

impl Participant {
    pub fn new(id: u64, level: u32, label: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            level,
            label: label.into(),
        }
    }
}

/// One side of a partition. Members keep pool order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub members: Vec<Participant>,
}

impl Team {
    pub fn new(members: Vec<Participant>) -> Self {
        Self { members }
    }

    pub fn total_level(&self) -> u64 {
        self.members.iter().map(|p| u64::from(p.level)).sum()
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.members.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub team_a: Team,
    pub team_b: Team,
}

impl Partition {
    pub fn difference(&self) -> u64 {
        self.team_a.total_level().abs_diff(self.team_b.total_level())
    }
}

/// A partition together with its skill difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub partition: Partition,
    pub difference: u64,
}

impl Candidate {
    pub fn score(partition: Partition) -> Self {
        let difference = partition.difference();
        Self {
            partition,
            difference,
        }
    }
}

/// The two participants that must never share a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatedPair {
    pub first: ParticipantId,
    pub second: ParticipantId,
}

impl SeparatedPair {
    pub fn new(first: u64, second: u64) -> Self {
        Self {
            first: ParticipantId(first),
            second: ParticipantId(second),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_parsing_and_mention() {
        let id: ParticipantId = " 291617683416285194 ".parse().unwrap();
        assert_eq!(id, ParticipantId(291617683416285194));
        assert_eq!(id.mention(), "<@291617683416285194>");
        assert!("abc".parse::<ParticipantId>().is_err());
    }

    #[test]
    fn test_partition_difference_is_absolute() {
        let partition = Partition {
            team_a: Team::new(vec![Participant::new(1, 10, "a"), Participant::new(2, 20, "b")]),
            team_b: Team::new(vec![Participant::new(3, 30, "c"), Participant::new(4, 40, "d")]),
        };
        assert_eq!(partition.team_a.total_level(), 30);
        assert_eq!(partition.team_b.total_level(), 70);
        assert_eq!(Candidate::score(partition).difference, 40);
    }
}
