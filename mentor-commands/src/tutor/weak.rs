use crate::CommandMeta;
use crate::tutor::embeds::{send_tutor_error, usage_message};
use mentor_core::{Context, Error};
use mentor_utils::embed::build_embed;
use mentor_utils::formatting::escape_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "weak",
    desc: "Track topics the tutor should reinforce.",
    category: "tutor",
    usage: "!weak <add|remove|list> [topic]",
};

#[poise::command(prefix_command, slash_command, category = "Tutor")]
pub async fn weak(
    ctx: Context<'_>,
    #[description = "add, remove, or list"] action: Option<String>,
    #[description = "Topic to add or remove"]
    #[rest]
    topic: Option<String>,
) -> Result<(), Error> {
    let Some(action) = parse_weak_action(action.as_deref(), topic.as_deref()) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let (adding, topic) = match action {
        WeakAction::List => {
            let listing = {
                let tutor = ctx.data().tutor.lock().await;
                weak_topic_listing(&tutor.profile().weak_topics)
            };
            ctx.send(poise::CreateReply::default().embed(build_embed("Weak topics", listing)))
                .await?;
            return Ok(());
        }
        WeakAction::Add(topic) => (true, topic),
        WeakAction::Remove(topic) => (false, topic),
    };

    let result = {
        let mut tutor = ctx.data().tutor.lock().await;
        if adding {
            tutor.add_weak_topic(topic).await
        } else {
            tutor.remove_weak_topic(topic).await
        }
    };

    let topic = escape_mentions(topic);
    match (result, adding) {
        (Ok(true), true) => {
            ctx.say(format!("Added **{}** to your weak topics.", topic)).await?;
        }
        (Ok(false), true) => {
            ctx.say(format!("**{}** is already a weak topic.", topic)).await?;
        }
        (Ok(true), false) => {
            ctx.say(format!("Removed **{}** from your weak topics.", topic)).await?;
        }
        (Ok(false), false) => {
            ctx.say(format!("**{}** is not one of your weak topics.", topic)).await?;
        }
        (Err(err), _) => send_tutor_error(ctx, &err).await?,
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum WeakAction<'a> {
    List,
    Add(&'a str),
    Remove(&'a str),
}

/// `None` means the invocation should be answered with the usage line.
fn parse_weak_action<'a>(action: Option<&str>, topic: Option<&'a str>) -> Option<WeakAction<'a>> {
    let action = action?.trim();
    let topic = topic.map(str::trim).unwrap_or_default();

    if action.eq_ignore_ascii_case("list") {
        return Some(WeakAction::List);
    }
    if topic.is_empty() {
        return None;
    }

    if action.eq_ignore_ascii_case("add") {
        Some(WeakAction::Add(topic))
    } else if action.eq_ignore_ascii_case("remove") {
        Some(WeakAction::Remove(topic))
    } else {
        None
    }
}

fn weak_topic_listing(topics: &[String]) -> String {
    if topics.is_empty() {
        return "No weak topics tracked. Add one with `/weak add <topic>`.".to_owned();
    }

    topics
        .iter()
        .map(|topic| format!("• {}", escape_mentions(topic)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{WeakAction, parse_weak_action, weak_topic_listing};

    #[test]
    fn actions_without_topic_fall_back_to_usage() {
        assert_eq!(parse_weak_action(Some("remove"), None), None);
        assert_eq!(parse_weak_action(Some("remove"), Some("   ")), None);
        assert_eq!(parse_weak_action(Some("add"), None), None);
        assert_eq!(parse_weak_action(None, Some("loops")), None);
        assert_eq!(parse_weak_action(Some("shuffle"), Some("loops")), None);
    }

    #[test]
    fn parses_actions_case_insensitively() {
        assert_eq!(parse_weak_action(Some(" LIST "), None), Some(WeakAction::List));
        assert_eq!(
            parse_weak_action(Some("Add"), Some(" closures ")),
            Some(WeakAction::Add("closures"))
        );
        assert_eq!(
            parse_weak_action(Some("remove"), Some("traits")),
            Some(WeakAction::Remove("traits"))
        );
    }

    #[test]
    fn lists_topics_as_bullets() {
        let topics = vec!["lifetimes".to_owned(), "@traits".to_owned()];
        assert_eq!(weak_topic_listing(&topics), "• lifetimes\n• @\u{200B}traits");
        assert!(weak_topic_listing(&[]).starts_with("No weak topics"));
    }
}
