use crate::utils::error::{MixError, Result};

/// Raw `!mix` arguments, split by the flag each token follows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixArgs {
    pub exclusions: Vec<String>,
    pub extras: Vec<String>,
}

impl MixArgs {
    /// `-e/--exclude` and `-x/--extra` switch mode; tokens before any flag are extras.
    pub fn parse<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        #[derive(Clone, Copy)]
        enum Mode {
            Exclude,
            Extra,
        }

        let mut mode = Mode::Extra;
        let mut args = MixArgs::default();

        for token in tokens {
            match token.to_lowercase().as_str() {
                "-e" | "--exclude" => mode = Mode::Exclude,
                "-x" | "--extra" => mode = Mode::Extra,
                _ => match mode {
                    Mode::Exclude => args.exclusions.push(token.to_string()),
                    Mode::Extra => args.extras.push(token.to_string()),
                },
            }
        }

        args
    }
}

const COMMANDS: [&str; 7] = ["mix", "clear", "setlevel", "addtemp", "players", "botadmins", "help"];
const ADMIN_COMMANDS: [&str; 3] = ["clear", "setlevel", "addtemp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mix(MixArgs),
    Clear,
    SetLevel { target: String, level: u32 },
    AddTemp { target: String, level: u32 },
    Players,
    BotAdmins,
    Help,
}

impl Command {
    pub fn requires_admin(name: &str) -> bool {
        ADMIN_COMMANDS.contains(&name)
    }

    /// Name of the known command a message invokes, without looking at its
    /// arguments.
    pub fn invoked_name<'t>(prefix: &str, text: &'t str) -> Option<&'t str> {
        let name = text.trim().strip_prefix(prefix)?.split_whitespace().next()?;
        COMMANDS.contains(&name).then_some(name)
    }

    /// Parses a chat message. `None` means the message is not addressed to
    /// the bot or names an unknown command.
    pub fn parse(prefix: &str, text: &str) -> Option<Result<Command>> {
        let name = Self::invoked_name(prefix, text)?;
        let body = text.trim().strip_prefix(prefix)?;
        let tokens = body.split_whitespace().skip(1);

        let command = match name {
            "mix" => Ok(Command::Mix(MixArgs::parse(tokens))),
            "clear" => Ok(Command::Clear),
            "setlevel" => parse_member_level(prefix, "setlevel", tokens)
                .map(|(target, level)| Command::SetLevel { target, level }),
            "addtemp" => parse_member_level(prefix, "addtemp", tokens)
                .map(|(target, level)| Command::AddTemp { target, level }),
            "players" => Ok(Command::Players),
            "botadmins" => Ok(Command::BotAdmins),
            "help" => Ok(Command::Help),
            _ => return None,
        };

        Some(command)
    }
}

fn parse_member_level<'a>(
    prefix: &str,
    name: &str,
    mut tokens: impl Iterator<Item = &'a str>,
) -> Result<(String, u32)> {
    let usage = || MixError::UsageError {
        usage: format!("{}{} @User <level>", prefix, name),
    };

    let target = tokens.next().ok_or_else(usage)?;
    let level = tokens
        .next()
        .and_then(|raw| raw.parse::<u32>().ok())
        .ok_or_else(usage)?;

    Ok((target.to_string(), level))
}

/// Help text listing every command under the configured prefix.
pub fn help_text(prefix: &str) -> String {
    [
        "**Bot Commands:**".to_string(),
        format!("**{}mix [--exclude @User ...] [--extra @User ...]**", prefix),
        "   - Generates two balanced teams from exactly 10 non-bot members. It starts with all voice channel members, \n     removes those specified after --exclude, and adds those specified after --extra.".to_string(),
        format!("**{}clear**", prefix),
        "   - Clears all (non-pinned) messages from the results channel. (Requires Manage Messages permission; Bot Admins only.)".to_string(),
        format!("**{}setlevel @User <level>**", prefix),
        "   - Permanently updates a member's level and writes the change to the member file. (Bot Admins only.)".to_string(),
        format!("**{}addtemp @User <level>**", prefix),
        "   - Temporarily adds a member with a given level (in-memory only). (Bot Admins only.)".to_string(),
        format!("**{}players**", prefix),
        "   - Displays the current list of players along with their levels and nicknames.".to_string(),
        format!("**{}botadmins**", prefix),
        "   - Displays the current list of BotAdmins along with their levels and nicknames.".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_flags_split_tokens() {
        let args = MixArgs::parse("<@1> -e <@2> <@3> --EXTRA <@4>".split_whitespace());
        assert_eq!(args.extras, vec!["<@1>", "<@4>"]);
        assert_eq!(args.exclusions, vec!["<@2>", "<@3>"]);
    }

    #[test]
    fn test_parse_ignores_other_messages() {
        assert!(Command::parse("!", "hello there").is_none());
        assert!(Command::parse("!", "!dance").is_none());
        assert!(Command::parse("!", "!").is_none());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("!", "!mix").unwrap().unwrap(),
            Command::Mix(MixArgs::default())
        );
        assert_eq!(
            Command::parse("!", "!setlevel <@5> 42").unwrap().unwrap(),
            Command::SetLevel {
                target: "<@5>".to_string(),
                level: 42
            }
        );
        assert_eq!(Command::parse("?", "?players").unwrap().unwrap(), Command::Players);
    }

    #[test]
    fn test_bad_level_is_usage_error() {
        match Command::parse("!", "!addtemp <@5> -3").unwrap() {
            Err(MixError::UsageError { usage }) => assert_eq!(usage, "!addtemp @User <level>"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(Command::parse("!", "!setlevel").unwrap().is_err());
    }

    #[test]
    fn test_admin_commands() {
        assert!(Command::requires_admin("clear"));
        assert!(Command::requires_admin("setlevel"));
        assert!(!Command::requires_admin("players"));
        assert!(!Command::requires_admin("mix"));
    }

    #[test]
    fn test_invoked_name_ignores_arguments() {
        assert_eq!(Command::invoked_name("!", "!setlevel <@3> high"), Some("setlevel"));
        assert_eq!(Command::invoked_name("!", "  !mix -e <@1>"), Some("mix"));
        assert_eq!(Command::invoked_name("!", "!dance"), None);
        assert_eq!(Command::invoked_name("!", "mix"), None);
    }
}
