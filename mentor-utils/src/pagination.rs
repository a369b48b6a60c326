use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::embed::{DEFAULT_EMBED_COLOR, page_footer_text};

pub const PAGINATION_TIMEOUT_SECS: u64 = 60 * 5;

struct PageView<'a> {
    title: &'a str,
    pages: &'a [String],
    footer_note: Option<&'a str>,
    prev_id: String,
    next_id: String,
}

impl PageView<'_> {
    fn embed(&self, index: usize) -> serenity::CreateEmbed {
        let embed = serenity::CreateEmbed::new()
            .title(self.title.to_owned())
            .color(DEFAULT_EMBED_COLOR)
            .description(self.pages[index].clone());

        let footer = page_footer_text(index + 1, self.pages.len(), self.footer_note);
        if footer.is_empty() {
            embed
        } else {
            embed.footer(serenity::CreateEmbedFooter::new(footer))
        }
    }

    fn buttons(&self, index: usize) -> Vec<serenity::CreateActionRow> {
        vec![serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&self.prev_id)
                .label("Prev")
                .disabled(index == 0)
                .style(serenity::ButtonStyle::Secondary),
            serenity::CreateButton::new(&self.next_id)
                .label("Next")
                .disabled(index + 1 >= self.pages.len())
                .style(serenity::ButtonStyle::Secondary),
        ])]
    }
}

/// Send `pages` as one embed with Prev/Next buttons. Only the invoking user
/// can turn pages; the buttons are removed once the collector times out.
pub async fn paginate_text_pages<U, E>(
    ctx: poise::Context<'_, U, E>,
    title: &str,
    pages: &[String],
    footer_note: Option<&str>,
) -> Result<(), serenity::Error>
where
    U: Send + Sync,
    E: Send + Sync,
{
    if pages.is_empty() {
        return Ok(());
    }

    let ctx_id = ctx.id();
    let view = PageView {
        title,
        pages,
        footer_note,
        prev_id: format!("{}_prev", ctx_id),
        next_id: format!("{}_next", ctx_id),
    };
    let mut current = 0;

    if pages.len() == 1 {
        ctx.send(poise::CreateReply::default().embed(view.embed(current)))
            .await?;
        return Ok(());
    }

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(view.embed(current))
                .components(view.buttons(current)),
        )
        .await?;

    let message = reply.message().await?;
    let message_id = message.id;
    let channel_id = message.channel_id;

    while let Some(press) = serenity::collector::ComponentInteractionCollector::new(ctx)
        .filter({
            let prefix = ctx_id.to_string();
            let author_id = ctx.author().id;
            move |interaction| {
                interaction.data.custom_id.starts_with(&prefix)
                    && interaction.user.id == author_id
                    && interaction.message.id == message_id
            }
        })
        .timeout(Duration::from_secs(PAGINATION_TIMEOUT_SECS))
        .await
    {
        if press.data.custom_id == view.next_id {
            current = (current + 1).min(pages.len() - 1);
        } else if press.data.custom_id == view.prev_id {
            current = current.saturating_sub(1);
        } else {
            continue;
        }

        press
            .create_response(
                ctx.http(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(view.embed(current))
                        .components(view.buttons(current)),
                ),
            )
            .await?;
    }

    if let Err(err) = channel_id
        .edit_message(
            ctx.http(),
            message_id,
            serenity::EditMessage::new()
                .embed(view.embed(current))
                .components(Vec::new()),
        )
        .await
    {
        debug!(?err, "failed to strip pagination buttons");
    }

    Ok(())
}
