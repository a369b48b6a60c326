use crate::CommandMeta;
use crate::tutor::embeds::{send_tutor_error, usage_message};
use mentor_core::{Context, Error};
use mentor_utils::embed::PAGE_CHAR_BUDGET;
use mentor_utils::formatting::{chunk_text, escape_mentions};
use mentor_utils::pagination::paginate_text_pages;

pub const META: CommandMeta = CommandMeta {
    name: "ask",
    desc: "Ask the tutor a free-form question.",
    category: "tutor",
    usage: "!ask <question>",
};

#[poise::command(prefix_command, slash_command, category = "Tutor")]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "Your question"]
    #[rest]
    question: Option<String>,
) -> Result<(), Error> {
    let Some(question) = question
        .as_deref()
        .map(str::trim)
        .filter(|question| !question.is_empty())
    else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    ctx.defer().await?;

    let result = {
        let tutor = ctx.data().tutor.lock().await;
        tutor.ask(question).await
    };

    match result {
        Ok(answer) => {
            let pages = chunk_text(&escape_mentions(&answer), PAGE_CHAR_BUDGET);
            paginate_text_pages(ctx, "🤖 AI Tutor", &pages, None).await?;
        }
        Err(err) => send_tutor_error(ctx, &err).await?,
    }

    Ok(())
}
