use crate::domain::model::{Member, Participant, ParticipantId, PlayerRecord};
use crate::utils::error::{MixError, Result};
use std::collections::HashMap;

/// In-memory level table. Iteration follows insertion order, which is the
/// member file's order for loaded players.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    players: HashMap<ParticipantId, PlayerRecord>,
    order: Vec<ParticipantId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates overwrite earlier ones but keep the first position.
    pub fn from_records(records: impl IntoIterator<Item = (ParticipantId, PlayerRecord)>) -> Self {
        let mut registry = Self::new();
        for (id, record) in records {
            registry.set_level(id, record.level, record.nickname);
        }
        registry
    }

    pub fn records(&self) -> impl Iterator<Item = (ParticipantId, &PlayerRecord)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.players.get(id).map(|record| (*id, record)))
    }

    pub fn get(&self, id: ParticipantId) -> Option<&PlayerRecord> {
        self.players.get(&id)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Inserts or overwrites a level. Returns the previous record.
    pub fn set_level(
        &mut self,
        id: ParticipantId,
        level: u32,
        nickname: impl Into<String>,
    ) -> Option<PlayerRecord> {
        let previous = self.players.insert(
            id,
            PlayerRecord {
                level,
                nickname: nickname.into(),
            },
        );
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Adds a level only if the participant is unknown. Returns whether it was added.
    pub fn add_temporary(&mut self, id: ParticipantId, level: u32, nickname: impl Into<String>) -> bool {
        if self.contains(id) {
            return false;
        }
        self.set_level(id, level, nickname);
        true
    }

    pub fn find_by_nickname(&self, nickname: &str) -> Option<ParticipantId> {
        self.records()
            .find(|(_, record)| record.nickname == nickname)
            .map(|(id, _)| id)
    }

    /// Players ordered by level, highest first. Equal levels keep insertion order.
    pub fn ranked(&self) -> Vec<(ParticipantId, &PlayerRecord)> {
        let mut ranked: Vec<(ParticipantId, &PlayerRecord)> = self.records().collect();
        ranked.sort_by(|a, b| b.1.level.cmp(&a.1.level));
        ranked
    }

    /// Snapshot of the pool with levels attached, in pool order.
    pub fn resolve(&self, members: &[Member]) -> Result<Vec<Participant>> {
        members
            .iter()
            .map(|member| {
                let record = self
                    .get(member.id)
                    .ok_or(MixError::MissingLevel { participant: member.id })?;
                Ok(Participant {
                    id: member.id,
                    level: record.level,
                    label: record.nickname.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_temporary_does_not_overwrite() {
        let mut registry = Registry::new();
        assert!(registry.add_temporary(ParticipantId(1), 10, "One"));
        assert!(!registry.add_temporary(ParticipantId(1), 99, "Other"));
        assert_eq!(registry.get(ParticipantId(1)).unwrap().level, 10);
    }

    #[test]
    fn test_set_level_overwrites() {
        let mut registry = Registry::new();
        registry.set_level(ParticipantId(1), 10, "One");
        let previous = registry.set_level(ParticipantId(1), 20, "Uno");
        assert_eq!(previous.unwrap().level, 10);
        assert_eq!(registry.get(ParticipantId(1)).unwrap().nickname, "Uno");
    }

    #[test]
    fn test_ranked_highest_first() {
        let mut registry = Registry::new();
        registry.set_level(ParticipantId(3), 5, "c");
        registry.set_level(ParticipantId(1), 50, "a");
        registry.set_level(ParticipantId(2), 5, "b");
        let ids: Vec<u64> = registry.ranked().iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let mut registry = Registry::new();
        registry.set_level(ParticipantId(30), 1, "c");
        registry.set_level(ParticipantId(10), 1, "a");
        registry.set_level(ParticipantId(30), 9, "c2");
        registry.add_temporary(ParticipantId(20), 1, "b");

        let ids: Vec<u64> = registry.records().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_resolve_reports_missing_member() {
        let mut registry = Registry::new();
        registry.set_level(ParticipantId(1), 10, "One");
        let members = vec![Member::new(1, "One"), Member::new(2, "Two")];
        match registry.resolve(&members) {
            Err(MixError::MissingLevel { participant }) => assert_eq!(participant, ParticipantId(2)),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_keeps_pool_order() {
        let mut registry = Registry::new();
        registry.set_level(ParticipantId(1), 10, "One");
        registry.set_level(ParticipantId(2), 20, "Two");
        let pool = registry
            .resolve(&[Member::new(2, "Two"), Member::new(1, "One")])
            .unwrap();
        assert_eq!(pool[0].id, ParticipantId(2));
        assert_eq!(pool[1].level, 10);
    }
}
