use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

/// A text channel the bot can post to.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    async fn send(&self, text: &str) -> Result<MessageId>;

    /// Deletes every non-pinned message and returns how many were removed.
    async fn purge(&self) -> Result<usize>;

    async fn delete(&self, id: MessageId) -> Result<()>;
}
