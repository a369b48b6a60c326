use crate::CommandMeta;
use crate::tutor::embeds::{progress_note, send_tutor_error};
use mentor_core::{Context, Error, LessonOutcome};
use mentor_utils::embed::PAGE_CHAR_BUDGET;
use mentor_utils::formatting::{chunk_text, escape_mentions};
use mentor_utils::pagination::paginate_text_pages;

pub const META: CommandMeta = CommandMeta {
    name: "lesson",
    desc: "Start the next lesson of your current course.",
    category: "tutor",
    usage: "!lesson",
};

#[poise::command(prefix_command, slash_command, category = "Tutor")]
pub async fn lesson(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let result = {
        let mut tutor = ctx.data().tutor.lock().await;
        tutor.next_lesson().await
    };

    match result {
        Ok(outcome) => {
            let pages = chunk_text(&escape_mentions(&outcome.text), PAGE_CHAR_BUDGET);
            paginate_text_pages(
                ctx,
                &lesson_title(&outcome),
                &pages,
                Some(&lesson_note(&outcome)),
            )
            .await?;
        }
        Err(err) => send_tutor_error(ctx, &err).await?,
    }

    Ok(())
}

fn lesson_title(outcome: &LessonOutcome) -> String {
    if outcome.review {
        "🔁 Review lesson".to_owned()
    } else {
        format!("📖 Module {} • Lesson {}", outcome.module, outcome.lesson)
    }
}

fn lesson_note(outcome: &LessonOutcome) -> String {
    let note = progress_note(&outcome.update);
    if outcome.course_complete && !outcome.review {
        format!("{} • Course complete!", note)
    } else {
        note
    }
}
