use crate::CommandMeta;
use crate::tutor::embeds::{progress_note, send_tutor_error, titled_topic, usage_message};
use mentor_core::{Context, Error};
use mentor_utils::embed::PAGE_CHAR_BUDGET;
use mentor_utils::formatting::{chunk_text, escape_mentions};
use mentor_utils::pagination::paginate_text_pages;

pub const META: CommandMeta = CommandMeta {
    name: "course",
    desc: "Generate a full structured course on a topic.",
    category: "tutor",
    usage: "!course <topic>",
};

#[poise::command(prefix_command, slash_command, category = "Tutor")]
pub async fn course(
    ctx: Context<'_>,
    #[description = "What you want to learn"]
    #[rest]
    topic: Option<String>,
) -> Result<(), Error> {
    let Some(topic) = topic.as_deref().map(str::trim).filter(|topic| !topic.is_empty()) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    ctx.defer().await?;

    // Release the session before paginating; the pager waits on button presses.
    let result = {
        let mut tutor = ctx.data().tutor.lock().await;
        tutor.generate_course(topic).await
    };

    match result {
        Ok(outcome) => {
            let pages = chunk_text(&escape_mentions(&outcome.text), PAGE_CHAR_BUDGET);
            let note = progress_note(&outcome.update);
            paginate_text_pages(
                ctx,
                &titled_topic("📚 Full course: ", &outcome.topic),
                &pages,
                Some(&note),
            )
            .await?;
        }
        Err(err) => send_tutor_error(ctx, &err).await?,
    }

    Ok(())
}
