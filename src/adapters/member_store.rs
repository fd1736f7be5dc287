use crate::core::registry::Registry;
use crate::core::Storage;
use crate::domain::model::{ParticipantId, PlayerRecord};
use crate::utils::error::{MixError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Reads and rewrites the member file (`{"<id>": {"level": n, "nickname": ".."}}`).
/// Entries keep the order they have in the file.
pub struct MemberStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> MemberStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub async fn load(&self) -> Result<Registry> {
        if !self.storage.exists(&self.file_name).await {
            tracing::warn!("Member file '{}' not found, starting with an empty list", self.file_name);
            return Ok(Registry::new());
        }

        let data = self.storage.read_file(&self.file_name).await?;
        let raw: Map<String, Value> = serde_json::from_slice(&data)?;

        let mut players = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let id: ParticipantId = key.parse().map_err(|e| MixError::InvalidConfigValueError {
                field: self.file_name.clone(),
                value: key.clone(),
                reason: format!("member id is not a number: {}", e),
            })?;
            let record: PlayerRecord = serde_json::from_value(value)?;
            players.push((id, record));
        }

        tracing::info!("Loaded {} players from '{}'", players.len(), self.file_name);
        Ok(Registry::from_records(players))
    }

    /// Rewrites the whole file from the registry.
    pub async fn save(&self, registry: &Registry) -> Result<()> {
        let mut raw = Map::new();
        for (id, record) in registry.records() {
            raw.insert(id.to_string(), serde_json::to_value(record)?);
        }

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        raw.serialize(&mut serializer)?;

        self.storage.write_file(&self.file_name, &buffer).await?;
        tracing::debug!("Wrote {} players to '{}'", registry.len(), self.file_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty_registry() {
        let dir = TempDir::new().unwrap();
        let store = MemberStore::new(LocalStorage::new(dir.path()), "members.json");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_parses_string_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("members.json"),
            r#"{"291617683416285194": {"level": 50, "nickname": "Zapgod"}}"#,
        )
        .unwrap();

        let store = MemberStore::new(LocalStorage::new(dir.path()), "members.json");
        let registry = store.load().await.unwrap();
        let record = registry.get(ParticipantId(291617683416285194)).unwrap();
        assert_eq!(record.level, 50);
        assert_eq!(record.nickname, "Zapgod");
    }

    #[tokio::test]
    async fn test_load_rejects_bad_key() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("members.json"),
            r#"{"not-an-id": {"level": 1, "nickname": "x"}}"#,
        )
        .unwrap();

        let store = MemberStore::new(LocalStorage::new(dir.path()), "members.json");
        assert!(matches!(
            store.load().await,
            Err(MixError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let store = MemberStore::new(LocalStorage::new(dir.path()), "members.json");

        let mut registry = Registry::new();
        registry.set_level(ParticipantId(7), 12, "Seven");
        store.save(&registry).await.unwrap();

        let text = std::fs::read_to_string(dir.path().join("members.json")).unwrap();
        assert!(text.contains("\n    \"7\": {\n        \"level\": 12,"));
        assert_eq!(store.load().await.unwrap(), registry);
    }

    #[tokio::test]
    async fn test_rewrite_keeps_file_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("members.json"),
            r#"{"30": {"level": 1, "nickname": "c"}, "4": {"level": 2, "nickname": "a"}, "100": {"level": 3, "nickname": "b"}}"#,
        )
        .unwrap();

        let store = MemberStore::new(LocalStorage::new(dir.path()), "members.json");
        let mut registry = store.load().await.unwrap();
        registry.set_level(ParticipantId(4), 20, "a");
        registry.set_level(ParticipantId(7), 5, "new");
        store.save(&registry).await.unwrap();

        let reloaded = store.load().await.unwrap();
        let ids: Vec<u64> = reloaded.records().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![30, 4, 100, 7]);

        let text = std::fs::read_to_string(dir.path().join("members.json")).unwrap();
        assert!(text.find("\"30\"").unwrap() < text.find("\"4\"").unwrap());
    }
}
