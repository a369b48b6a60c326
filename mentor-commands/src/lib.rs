pub mod tutor;
pub mod utility;

use mentor_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    tutor::style::META,
    tutor::course::META,
    tutor::lesson::META,
    tutor::ask::META,
    tutor::status::META,
    tutor::weak::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::usage::usage(),
        tutor::style::style(),
        tutor::course::course(),
        tutor::lesson::lesson(),
        tutor::ask::ask(),
        tutor::status::status(),
        tutor::weak::weak(),
    ]
}

#[cfg(test)]
mod tests {
    use super::COMMANDS;

    #[test]
    fn command_names_are_unique_and_usage_matches() {
        let mut names: Vec<&str> = COMMANDS.iter().map(|command| command.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMANDS.len());

        for command in COMMANDS {
            assert!(
                command.usage.starts_with(&format!("!{}", command.name)),
                "usage for `{}` should start with its name",
                command.name
            );
        }
    }
}
