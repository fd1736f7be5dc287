use crate::adapters::MemberStore;
use crate::app::command::{help_text, Command, MixArgs};
use crate::app::guard::MixGuard;
use crate::app::pagination::paginate;
use crate::app::resolve::{build_pool, MemberDirectory};
use crate::config::BotConfig;
use crate::core::engine::TeamBalancer;
use crate::core::partition::POOL_SIZE;
use crate::core::registry::Registry;
use crate::core::report::MixReport;
use crate::core::{ChatChannel, Storage};
use crate::domain::model::Member;
use crate::utils::error::{MixError, Result};
use std::time::Duration;
use tokio::sync::RwLock;

/// Who sent a command and what the bot can see about them.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub author: Member,
    pub can_manage_messages: bool,
    /// Members of the author's voice channel, `None` when not connected.
    pub voice_members: Option<Vec<Member>>,
}

impl CommandContext {
    pub fn new(author: Member) -> Self {
        Self {
            author,
            can_manage_messages: false,
            voice_members: None,
        }
    }

    pub fn with_voice(mut self, members: Vec<Member>) -> Self {
        self.voice_members = Some(members);
        self
    }

    pub fn with_manage_messages(mut self, allowed: bool) -> Self {
        self.can_manage_messages = allowed;
        self
    }
}

pub struct MixBot<S: Storage, C: ChatChannel> {
    config: BotConfig,
    balancer: TeamBalancer,
    registry: RwLock<Registry>,
    store: MemberStore<S>,
    results: C,
    guard: MixGuard,
}

impl<S: Storage, C: ChatChannel> MixBot<S, C> {
    pub fn new(config: BotConfig, registry: Registry, store: MemberStore<S>, results: C) -> Self {
        let balancer = TeamBalancer::new(config.separated_pair());
        Self {
            config,
            balancer,
            registry: RwLock::new(registry),
            store,
            results,
            guard: MixGuard::new(),
        }
    }

    /// Loads the member file and builds the bot around it.
    pub async fn load(config: BotConfig, store: MemberStore<S>, results: C) -> Result<Self> {
        let registry = store.load().await?;
        Ok(Self::new(config, registry, store, results))
    }

    pub fn results_channel(&self) -> &C {
        &self.results
    }

    pub fn guard(&self) -> &MixGuard {
        &self.guard
    }

    pub async fn registry_snapshot(&self) -> Registry {
        self.registry.read().await.clone()
    }

    /// Handles one chat message. User mistakes are answered in chat and
    /// return `Ok`; storage and channel failures are answered and returned.
    pub async fn handle<R>(&self, ctx: &CommandContext, text: &str, reply: &R) -> Result<()>
    where
        R: ChatChannel + ?Sized,
    {
        let prefix = &self.config.bot.prefix;
        let Some(name) = Command::invoked_name(prefix, text) else {
            tracing::debug!("Ignoring message: {}", text);
            return Ok(());
        };

        tracing::info!("{} invoked {}{}", ctx.author.display_name, prefix, name);

        // Admin check runs before the arguments are parsed.
        if Command::requires_admin(name) && !self.config.is_admin(ctx.author.id) {
            let err = MixError::PermissionDenied {
                command: name.to_string(),
            };
            return self.report_failure(err, reply).await;
        }

        let command = match Command::parse(prefix, text) {
            Some(Ok(command)) => command,
            Some(Err(err)) => return self.report_failure(err, reply).await,
            None => return Ok(()),
        };

        let outcome = match &command {
            Command::Mix(args) => self.mix(ctx, args).await,
            Command::Clear => self.clear(ctx).await,
            Command::SetLevel { target, level } => self.set_level(ctx, target, *level, reply).await,
            Command::AddTemp { target, level } => self.add_temp(ctx, target, *level, reply).await,
            Command::Players => self.players(reply).await,
            Command::BotAdmins => self.bot_admins(reply).await,
            Command::Help => reply
                .send(&help_text(&self.config.bot.prefix))
                .await
                .map(|_| ()),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(err) => self.report_failure(err, reply).await,
        }
    }

    async fn report_failure<R>(&self, err: MixError, reply: &R) -> Result<()>
    where
        R: ChatChannel + ?Sized,
    {
        tracing::warn!("Command failed: {}", err);

        // Pool problems are announced where the teams would have been.
        let sent = match &err {
            MixError::InvalidInput { .. } | MixError::NoValidPartition => {
                self.results.send(&err.user_friendly_message()).await
            }
            _ => reply.send(&err.user_friendly_message()).await,
        };

        if err.is_user_error() {
            sent.map(|_| ())
        } else {
            Err(err)
        }
    }

    async fn mix(&self, ctx: &CommandContext, args: &MixArgs) -> Result<()> {
        let _permit = self.guard.try_acquire()?;
        let registry = self.registry.read().await;

        let voice = ctx.voice_members.as_deref();
        let directory = MemberDirectory::new(voice.unwrap_or_default(), &registry);
        let exclusions: Vec<Member> = args
            .exclusions
            .iter()
            .filter_map(|token| directory.resolve(token))
            .collect();
        let extras: Vec<Member> = args
            .extras
            .iter()
            .filter_map(|token| directory.resolve(token))
            .collect();

        let members = build_pool(voice, &exclusions, &extras);
        if members.len() != POOL_SIZE {
            return Err(MixError::InvalidInput {
                reason: format!("expected {} participants, got {}", POOL_SIZE, members.len()),
            });
        }

        let pool = registry.resolve(&members)?;
        let best = self.balancer.balance(&pool)?;
        drop(registry);

        let report = MixReport::from_candidate(&best);
        self.results.send(&report.announcement()).await?;
        tracing::info!("Teams generated with difference {}", report.difference);
        Ok(())
    }

    async fn clear(&self, ctx: &CommandContext) -> Result<()> {
        if !ctx.can_manage_messages {
            return Err(MixError::PermissionDenied {
                command: "clear".to_string(),
            });
        }

        let deleted = self.results.purge().await?;
        let confirmation = self
            .results
            .send(&format!("Cleared {} messages from this channel.", deleted))
            .await?;

        let delay = self.config.messages.clear_confirmation_seconds;
        if delay > 0 {
            tokio::time::sleep(Duration::from_secs(delay)).await;
        }
        self.results.delete(confirmation).await
    }

    async fn resolve_target(&self, ctx: &CommandContext, target: &str, usage: &str) -> Result<Member> {
        let registry = self.registry.read().await;
        let voice = ctx.voice_members.as_deref().unwrap_or_default();
        MemberDirectory::new(voice, &registry)
            .resolve(target)
            .ok_or_else(|| MixError::UsageError {
                usage: format!("{}{} @User <level>", self.config.bot.prefix, usage),
            })
    }

    async fn set_level<R>(&self, ctx: &CommandContext, target: &str, level: u32, reply: &R) -> Result<()>
    where
        R: ChatChannel + ?Sized,
    {
        let member = self.resolve_target(ctx, target, "setlevel").await?;

        {
            let mut registry = self.registry.write().await;
            registry.set_level(member.id, level, member.display_name.clone());
            self.store.save(&registry).await?;
        }

        tracing::info!("Level of {} set to {}", member.display_name, level);
        reply
            .send(&format!("Updated {}'s level to {}.", member.mention(), level))
            .await?;
        Ok(())
    }

    async fn add_temp<R>(&self, ctx: &CommandContext, target: &str, level: u32, reply: &R) -> Result<()>
    where
        R: ChatChannel + ?Sized,
    {
        let member = self.resolve_target(ctx, target, "addtemp").await?;

        let added = self
            .registry
            .write()
            .await
            .add_temporary(member.id, level, member.display_name.clone());

        let message = if added {
            format!("Temporarily added {} with level {}.", member.mention(), level)
        } else {
            format!(
                "{} is already in the user list. Use {}setlevel to update their level.",
                member.mention(),
                self.config.bot.prefix
            )
        };
        reply.send(&message).await?;
        Ok(())
    }

    async fn players<R>(&self, reply: &R) -> Result<()>
    where
        R: ChatChannel + ?Sized,
    {
        let text = {
            let registry = self.registry.read().await;
            if registry.is_empty() {
                None
            } else {
                let mut lines = vec!["**Current Players:**".to_string()];
                lines.extend(
                    registry
                        .ranked()
                        .into_iter()
                        .map(|(_, record)| format!("**{}** - Level: {}", record.nickname, record.level)),
                );
                Some(lines.join("\n"))
            }
        };

        let Some(text) = text else {
            reply.send("No players are currently in the list.").await?;
            return Ok(());
        };

        for page in paginate(&text, self.config.messages.max_message_len) {
            reply.send(&page).await?;
        }
        Ok(())
    }

    async fn bot_admins<R>(&self, reply: &R) -> Result<()>
    where
        R: ChatChannel + ?Sized,
    {
        let registry = self.registry.read().await;
        let mut lines = vec!["**Bot Admins:**".to_string()];
        for admin in &self.config.bot.admins {
            match registry.get(*admin) {
                Some(record) => lines.push(format!(
                    "{} - Nickname: **{}**, Level: **{}**",
                    admin.mention(),
                    record.nickname,
                    record.level
                )),
                None => lines.push(format!("{} - No info available.", admin.mention())),
            }
        }
        drop(registry);

        reply.send(&lines.join("\n")).await?;
        Ok(())
    }
}
