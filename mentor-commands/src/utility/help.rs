use crate::utility::embeds::{grouped_help_description, unknown_category_message};
use crate::{COMMANDS, CommandMeta};
use mentor_core::{Context, Error};
use mentor_utils::pagination::paginate_text_pages;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 10;

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Category to show"] category: Option<String>,
) -> Result<(), Error> {
    let category = category
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_ascii_lowercase);

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = category.as_deref()
        && !categories.contains(&wanted_category)
    {
        ctx.say(unknown_category_message(wanted_category, &categories))
            .await?;
        return Ok(());
    }

    let commands = sorted_commands(category.as_deref());
    let pages = commands
        .chunks(HELP_COMMANDS_PER_PAGE)
        .map(grouped_help_description)
        .collect::<Vec<_>>();

    paginate_text_pages(ctx, "Available Commands", &pages, None).await?;
    Ok(())
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::sorted_commands;

    #[test]
    fn sorts_by_category_then_name() {
        let names: Vec<&str> = sorted_commands(None).iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["ask", "course", "lesson", "status", "style", "weak", "help", "ping", "usage"]
        );
    }

    #[test]
    fn filters_by_category() {
        let tutor = sorted_commands(Some("tutor"));
        assert_eq!(tutor.len(), 6);
        assert!(tutor.iter().all(|command| command.category == "tutor"));
        assert!(sorted_commands(Some("moderation")).is_empty());
    }
}
