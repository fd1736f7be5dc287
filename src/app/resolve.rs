use crate::core::registry::Registry;
use crate::domain::model::{Member, ParticipantId};

/// Turns mention, id or name tokens into members, looking in the author's
/// voice channel first and the level registry second.
pub struct MemberDirectory<'a> {
    voice: &'a [Member],
    registry: &'a Registry,
}

impl<'a> MemberDirectory<'a> {
    pub fn new(voice: &'a [Member], registry: &'a Registry) -> Self {
        Self { voice, registry }
    }

    pub fn resolve(&self, token: &str) -> Option<Member> {
        match parse_id(token) {
            Some(id) => Some(self.by_id(id)),
            None => self.by_name(token),
        }
    }

    fn by_id(&self, id: ParticipantId) -> Member {
        if let Some(member) = self.voice.iter().find(|m| m.id == id) {
            return member.clone();
        }

        let display_name = self
            .registry
            .get(id)
            .map(|record| record.nickname.clone())
            .unwrap_or_else(|| format!("User{}", id));

        Member {
            id,
            display_name,
            bot: false,
        }
    }

    fn by_name(&self, name: &str) -> Option<Member> {
        if let Some(member) = self.voice.iter().find(|m| m.display_name == name) {
            return Some(member.clone());
        }

        self.registry.find_by_nickname(name).map(|id| Member {
            id,
            display_name: name.to_string(),
            bot: false,
        })
    }
}

/// Accepts `<@id>`, `<@!id>` and bare ids.
fn parse_id(token: &str) -> Option<ParticipantId> {
    let raw = token
        .strip_prefix("<@")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|inner| inner.trim_start_matches('!'))
        .unwrap_or(token);

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Voice members that are not bots, minus exclusions, plus extras not already present.
pub fn build_pool(voice: Option<&[Member]>, exclusions: &[Member], extras: &[Member]) -> Vec<Member> {
    let mut pool: Vec<Member> = voice
        .unwrap_or_default()
        .iter()
        .filter(|m| !m.bot)
        .filter(|m| exclusions.iter().all(|excluded| excluded.id != m.id))
        .cloned()
        .collect();

    for extra in extras {
        if pool.iter().all(|m| m.id != extra.id) {
            pool.push(extra.clone());
        }
    }

    pool
}
