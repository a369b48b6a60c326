use crate::CommandMeta;
use crate::tutor::embeds::{send_tutor_error, status_embed, style_options, usage_message};
use mentor_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "style",
    desc: "Set your preferred learning style.",
    category: "tutor",
    usage: "!style <Text-based|Example-based|Visual|Gamified>",
};

#[poise::command(prefix_command, slash_command, category = "Tutor")]
pub async fn style(
    ctx: Context<'_>,
    #[description = "Text-based, Example-based, Visual, or Gamified"]
    #[rest]
    style: Option<String>,
) -> Result<(), Error> {
    let Some(raw_style) = style.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) else {
        let current = ctx.data().tutor.lock().await.status().learning_style;
        ctx.say(format!(
            "{}\nCurrent style: **{}**. Options: {}",
            usage_message(META.usage),
            current,
            style_options()
        ))
        .await?;
        return Ok(());
    };

    let result = {
        let mut tutor = ctx.data().tutor.lock().await;
        tutor
            .apply_style(raw_style)
            .await
            .map(|status| status_embed(&status, tutor.profile()))
    };

    match result {
        Ok(embed) => {
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(err) => send_tutor_error(ctx, &err).await?,
    }

    Ok(())
}
