use crate::CommandMeta;
use crate::tutor::embeds::status_embed;
use mentor_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "status",
    desc: "Show your level, XP, learning style, and course position.",
    category: "tutor",
    usage: "!status",
};

#[poise::command(prefix_command, slash_command, category = "Tutor")]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let embed = {
        let tutor = ctx.data().tutor.lock().await;
        status_embed(&tutor.status(), tutor.profile())
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
