use crate::core::ChatChannel;
use crate::domain::ports::MessageId;
use crate::utils::error::{MixError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredMessage {
    id: MessageId,
    text: String,
    pinned: bool,
}

/// Message history shared by the in-process channels.
#[derive(Debug, Default)]
struct History {
    messages: Vec<StoredMessage>,
    next_id: u64,
}

impl History {
    fn push(&mut self, text: &str) -> MessageId {
        self.next_id += 1;
        let id = MessageId(self.next_id);
        self.messages.push(StoredMessage {
            id,
            text: text.to_string(),
            pinned: false,
        });
        id
    }

    fn purge(&mut self) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| m.pinned);
        before - self.messages.len()
    }

    fn delete(&mut self, id: MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        before != self.messages.len()
    }

    fn pin(&mut self, id: MessageId) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.pinned = true;
                true
            }
            None => false,
        }
    }
}

fn lock(history: &Mutex<History>) -> Result<std::sync::MutexGuard<'_, History>> {
    history.lock().map_err(|_| MixError::ChannelError {
        message: "channel history lock poisoned".to_string(),
    })
}

fn unknown_message(id: MessageId) -> MixError {
    MixError::ChannelError {
        message: format!("message {} does not exist", id.0),
    }
}

/// Prints every message to stdout under the channel name.
#[derive(Debug)]
pub struct ConsoleChannel {
    name: String,
    history: Mutex<History>,
}

impl ConsoleChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            history: Mutex::new(History::default()),
        }
    }
}

#[async_trait]
impl ChatChannel for ConsoleChannel {
    async fn send(&self, text: &str) -> Result<MessageId> {
        let id = lock(&self.history)?.push(text);
        println!("[#{}] {}", self.name, text);
        Ok(id)
    }

    async fn purge(&self) -> Result<usize> {
        Ok(lock(&self.history)?.purge())
    }

    async fn delete(&self, id: MessageId) -> Result<()> {
        if lock(&self.history)?.delete(id) {
            Ok(())
        } else {
            Err(unknown_message(id))
        }
    }
}

/// Collects messages in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    history: Mutex<History>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts of the messages still in the channel, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|h| h.messages.iter().map(|m| m.text.clone()).collect())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.messages().pop()
    }

    pub fn pin(&self, id: MessageId) -> Result<()> {
        if lock(&self.history)?.pin(id) {
            Ok(())
        } else {
            Err(unknown_message(id))
        }
    }
}

#[async_trait]
impl ChatChannel for MemoryChannel {
    async fn send(&self, text: &str) -> Result<MessageId> {
        Ok(lock(&self.history)?.push(text))
    }

    async fn purge(&self) -> Result<usize> {
        Ok(lock(&self.history)?.purge())
    }

    async fn delete(&self, id: MessageId) -> Result<()> {
        if lock(&self.history)?.delete(id) {
            Ok(())
        } else {
            Err(unknown_message(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_purge_keeps_pinned() {
        let channel = MemoryChannel::new();
        let pinned = channel.send("rules").await.unwrap();
        channel.pin(pinned).unwrap();
        channel.send("one").await.unwrap();
        channel.send("two").await.unwrap();

        assert_eq!(channel.purge().await.unwrap(), 2);
        assert_eq!(channel.messages(), vec!["rules".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_unknown_message_fails() {
        let channel = ConsoleChannel::new("times");
        let id = channel.send("hello").await.unwrap();
        channel.delete(id).await.unwrap();
        assert!(channel.delete(id).await.is_err());
    }
}
