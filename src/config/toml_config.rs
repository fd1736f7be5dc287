use crate::domain::model::{ParticipantId, SeparatedPair};
use crate::utils::error::{MixError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ADMINS: [u64; 2] = [291617683416285194, 701661704844738580];
pub const DEFAULT_SEPARATED: [u64; 2] = [291617683416285194, 692595982378074222];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub bot: BotSection,
    pub teams: TeamsSection,
    pub storage: StorageSection,
    pub messages: MessagesSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSection {
    pub prefix: String,
    pub admins: Vec<ParticipantId>,
    pub results_channel: String,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
            admins: DEFAULT_ADMINS.iter().copied().map(ParticipantId).collect(),
            results_channel: "times".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamsSection {
    /// The two ids that may never share a team.
    pub separated: [ParticipantId; 2],
}

impl Default for TeamsSection {
    fn default() -> Self {
        Self {
            separated: [
                ParticipantId(DEFAULT_SEPARATED[0]),
                ParticipantId(DEFAULT_SEPARATED[1]),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub members_file: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            members_file: "members.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesSection {
    pub max_message_len: usize,
    pub clear_confirmation_seconds: u64,
}

impl Default for MessagesSection {
    fn default() -> Self {
        Self {
            max_message_len: 1900,
            clear_confirmation_seconds: 5,
        }
    }
}

impl BotConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MixError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MixError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MixError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn separated_pair(&self) -> SeparatedPair {
        SeparatedPair {
            first: self.teams.separated[0],
            second: self.teams.separated[1],
        }
    }

    pub fn is_admin(&self, id: ParticipantId) -> bool {
        self.bot.admins.contains(&id)
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("bot.prefix", &self.bot.prefix)?;
        validate_non_empty_string("bot.results_channel", &self.bot.results_channel)?;
        validate_path("storage.members_file", &self.storage.members_file)?;
        validate_positive_number("messages.max_message_len", self.messages.max_message_len, 1)?;
        validate_range(
            "messages.clear_confirmation_seconds",
            self.messages.clear_confirmation_seconds,
            0,
            600,
        )?;

        let [first, second] = self.teams.separated;
        if first == second {
            return Err(MixError::InvalidConfigValueError {
                field: "teams.separated".to_string(),
                value: first.to_string(),
                reason: "the separated pair must name two different ids".to_string(),
            });
        }

        Ok(())
    }
}
