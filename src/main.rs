use anyhow::Context;
use clap::Parser;
use std::path::Path;
use team_mixer::domain::model::{Member, ParticipantId};
use team_mixer::utils::{logger, validation::Validate};
use team_mixer::{
    BotConfig, CliConfig, CommandContext, ConsoleChannel, LocalStorage, MemberStore, MixBot,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting team-mixer");

    let mut config = match &cli.config {
        Some(path) => BotConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => BotConfig::default(),
    };
    if let Some(members_file) = &cli.members_file {
        config.storage.members_file = members_file.clone();
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }
    tracing::debug!("Bot config: {:?}", config);

    // The member file path may be absolute or relative to the working directory.
    let members_path = Path::new(&config.storage.members_file);
    let base = members_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let file_name = members_path
        .file_name()
        .and_then(|name| name.to_str())
        .context("storage.members_file has no file name")?
        .to_string();
    let store = MemberStore::new(LocalStorage::new(base), file_name);

    let results = ConsoleChannel::new(config.bot.results_channel.clone());
    let bot = MixBot::load(config, store, results)
        .await
        .context("failed to load the member list")?;

    let ctx = console_context(&bot, &cli).await;
    let reply = ConsoleChannel::new("console");

    if let Some(command) = &cli.command {
        bot.handle(&ctx, command, &reply).await?;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Err(e) = bot.handle(&ctx, &line, &reply).await {
            tracing::error!("Command failed: {}", e);
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

/// Builds the author and voice channel from the command line, naming members
/// after their registered nicknames.
async fn console_context(
    bot: &MixBot<LocalStorage, ConsoleChannel>,
    cli: &CliConfig,
) -> CommandContext {
    let registry = bot.registry_snapshot().await;
    let member = |id: u64| {
        let name = registry
            .get(ParticipantId(id))
            .map(|record| record.nickname.clone())
            .unwrap_or_else(|| format!("User{}", id));
        Member::new(id, name)
    };

    let mut ctx = CommandContext::new(member(cli.author)).with_manage_messages(cli.manage_messages);
    if !cli.voice.is_empty() {
        ctx = ctx.with_voice(cli.voice.iter().map(|&id| member(id)).collect());
    }
    ctx
}
