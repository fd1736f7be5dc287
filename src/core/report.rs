use crate::domain::model::{Candidate, Participant};
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamReport {
    /// Highest level first; equal levels keep pool order.
    pub members: Vec<Participant>,
    pub total: u64,
}

impl TeamReport {
    pub fn new(members: &[Participant]) -> Self {
        let mut members = members.to_vec();
        members.sort_by_key(|p| Reverse(p.level));
        let total = members.iter().map(|p| u64::from(p.level)).sum();
        Self { members, total }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixReport {
    pub teams: [TeamReport; 2],
    pub difference: u64,
}

impl MixReport {
    pub fn new(team_one: &[Participant], team_two: &[Participant]) -> Self {
        let teams = [TeamReport::new(team_one), TeamReport::new(team_two)];
        let difference = teams[0].total.abs_diff(teams[1].total);
        Self { teams, difference }
    }

    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self::new(
            &candidate.partition.team_a.members,
            &candidate.partition.team_b.members,
        )
    }

    pub fn render(&self) -> String {
        let sections: Vec<String> = self
            .teams
            .iter()
            .enumerate()
            .map(|(index, team)| {
                let lines: Vec<String> = team
                    .members
                    .iter()
                    .map(|p| format!("{} (Level: {})", p.id.mention(), p.level))
                    .collect();
                format!(
                    "**Team {}:**\n{}\n**Total Skill:** {}",
                    index + 1,
                    lines.join("\n"),
                    team.total
                )
            })
            .collect();

        format!(
            "{}\n\n**Difference:** {}",
            sections.join("\n\n"),
            self.difference
        )
    }

    /// Message posted to the results channel after a mix.
    pub fn announcement(&self) -> String {
        format!("**Teams Generated:**\n{}", self.render())
    }
}
