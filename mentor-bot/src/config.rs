use std::env;
use std::path::PathBuf;

use anyhow::Context as _;
use mentor_progress::XpAwards;
use mentor_progress::model::profile::DEFAULT_LEARNER_NAME;

pub const DEFAULT_PROFILE_PATH: &str = "student_data.json";

/// Bot settings read from the environment (optionally seeded from `.env`).
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub token: String,
    pub guild_id: u64,
    pub profile_path: PathBuf,
    pub learner_name: String,
    pub awards: XpAwards,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let token = read("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let guild_id = read("DISCORD_GUILD_ID")
            .context("DISCORD_GUILD_ID is not set")?
            .parse::<u64>()
            .context("DISCORD_GUILD_ID must be a numeric guild id")?;

        let profile_path = read("TUTOR_PROFILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_PATH));
        let learner_name =
            read("TUTOR_LEARNER_NAME").unwrap_or_else(|| DEFAULT_LEARNER_NAME.to_owned());

        let mut awards = match read("TUTOR_XP_PRESET") {
            Some(preset) => XpAwards::preset(&preset).with_context(|| {
                format!("unknown TUTOR_XP_PRESET `{preset}` (expected `local` or `hosted`)")
            })?,
            None => XpAwards::default(),
        };
        awards.course = u64_or(&read, "TUTOR_COURSE_XP", awards.course);
        awards.lesson = u64_or(&read, "TUTOR_LESSON_XP", awards.lesson);

        Ok(Self {
            token,
            guild_id,
            profile_path,
            learner_name,
            awards,
        })
    }
}

fn u64_or(read: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    read(key)
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use mentor_progress::XpAwards;

    use super::{BotConfig, DEFAULT_PROFILE_PATH};

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<BotConfig> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        BotConfig::from_lookup(move |key| values.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [("DISCORD_TOKEN", "token"), ("DISCORD_GUILD_ID", "42")];

    #[test]
    fn applies_defaults() {
        let config = config(&REQUIRED).unwrap();

        assert_eq!(config.guild_id, 42);
        assert_eq!(config.profile_path, PathBuf::from(DEFAULT_PROFILE_PATH));
        assert_eq!(config.learner_name, "Student");
        assert_eq!(config.awards, XpAwards::LOCAL);
    }

    #[test]
    fn requires_token_and_numeric_guild() {
        assert!(config(&[("DISCORD_GUILD_ID", "42")]).is_err());
        assert!(config(&[("DISCORD_TOKEN", "token"), ("DISCORD_GUILD_ID", "main")]).is_err());
    }

    #[test]
    fn presets_and_overrides_select_awards() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("TUTOR_XP_PRESET", "hosted"));
        assert_eq!(config(&pairs).unwrap().awards, XpAwards::HOSTED);

        pairs.push(("TUTOR_LESSON_XP", "45"));
        pairs.push(("TUTOR_COURSE_XP", "nope"));
        let awards = config(&pairs).unwrap().awards;
        assert_eq!(awards.lesson, 45);
        assert_eq!(awards.course, XpAwards::HOSTED.course);

        let mut unknown = REQUIRED.to_vec();
        unknown.push(("TUTOR_XP_PRESET", "arcade"));
        assert!(config(&unknown).is_err());
    }

    #[test]
    fn reads_profile_location_and_name() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("TUTOR_PROFILE_PATH", "/var/lib/mentor/profile.json"));
        pairs.push(("TUTOR_LEARNER_NAME", " Ada "));

        let config = config(&pairs).unwrap();
        assert_eq!(config.profile_path, PathBuf::from("/var/lib/mentor/profile.json"));
        assert_eq!(config.learner_name, "Ada");
    }
}
