use poise::serenity_prelude as serenity;
use tracing::warn;

use mentor_core::{Context, Error, TutorError};
use mentor_progress::tracker::{LEVEL_XP_STEP, MODULES_PER_COURSE};
use mentor_progress::{LearnerProfile, LearningStyle, ProgressUpdate, StatusSummary};
use mentor_utils::embed::{build_embed, build_error_embed};
use mentor_utils::formatting::{escape_mentions, progress_bar};

const TITLE_TOPIC_MAX_CHARS: usize = 200;
const PROGRESS_BAR_WIDTH: usize = 10;

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{}`", usage)
}

pub fn style_options() -> String {
    LearningStyle::ALL
        .iter()
        .map(|style| format!("`{}`", style))
        .collect::<Vec<_>>()
        .join(", ")
}

/// XP gain summary shown in the footer of generated content.
pub fn progress_note(update: &ProgressUpdate) -> String {
    if update.leveled_up() {
        format!(
            "+{} XP • Level up! You are now level {}",
            update.xp_gained, update.level
        )
    } else {
        format!("+{} XP • {} XP total", update.xp_gained, update.xp)
    }
}

pub fn level_progress_line(status: &StatusSummary) -> String {
    format!(
        "{} {}/{} XP to level {}",
        progress_bar(status.xp_into_level(), LEVEL_XP_STEP, PROGRESS_BAR_WIDTH),
        status.xp_into_level(),
        LEVEL_XP_STEP,
        status.level.saturating_add(1)
    )
}

pub fn course_line(profile: &LearnerProfile) -> String {
    let Some(course) = profile.course.as_ref() else {
        return "No course yet. Use `/course <topic>` to generate one.".to_owned();
    };

    let topic = if course.topic.is_empty() {
        "Untitled course".to_owned()
    } else {
        escape_mentions(&course.topic)
    };

    let (module, lesson) = profile.position();
    if module >= MODULES_PER_COURSE {
        format!("{} (complete, review lessons available)", topic)
    } else {
        format!("{} (next: module {}, lesson {})", topic, module + 1, lesson + 1)
    }
}

pub fn status_embed(status: &StatusSummary, profile: &LearnerProfile) -> serenity::CreateEmbed {
    let description = format!(
        "**Level :** {}\n**XP :** {}\n**Style :** {}\n\n{}\n\n**Course :** {}",
        status.level,
        status.xp,
        status.learning_style,
        level_progress_line(status),
        course_line(profile)
    );

    build_embed(&format!("{}'s progress", escape_mentions(&profile.name)), description)
        .footer(serenity::CreateEmbedFooter::new(status.to_string()))
}

/// Embed titles are capped by Discord, topics are user input.
pub fn titled_topic(prefix: &str, topic: &str) -> String {
    let topic = topic.trim();
    if topic.chars().count() > TITLE_TOPIC_MAX_CHARS {
        let shortened: String = topic.chars().take(TITLE_TOPIC_MAX_CHARS).collect();
        format!("{}{}...", prefix, shortened)
    } else {
        format!("{}{}", prefix, topic)
    }
}

pub fn tutor_error_title(err: &TutorError) -> &'static str {
    match err {
        TutorError::Progress(_) | TutorError::EmptyInput(_) => "Cannot Do That",
        TutorError::Generation(_) => "Tutor Unavailable",
        TutorError::Persistence(_) => "Progress Not Saved",
    }
}

pub fn tutor_error_description(err: &TutorError) -> String {
    match err {
        TutorError::Generation(inner) if inner.is_transient() => format!(
            "{}\nThe model may be busy or offline; try again in a moment. Your progress is unchanged.",
            err
        ),
        TutorError::Generation(_) => format!("{}\nYour progress is unchanged.", err),
        TutorError::Persistence(_) => format!("{}\nThe action was undone.", err),
        TutorError::Progress(_) | TutorError::EmptyInput(_) => err.to_string(),
    }
}

/// Report a failed tutor action to the invoking user.
pub async fn send_tutor_error(ctx: Context<'_>, err: &TutorError) -> Result<(), Error> {
    match err {
        TutorError::Generation(_) | TutorError::Persistence(_) => {
            warn!(?err, command = %ctx.command().qualified_name, "tutor action failed");
        }
        TutorError::Progress(_) | TutorError::EmptyInput(_) => {}
    }

    let embed = build_error_embed(tutor_error_title(err), tutor_error_description(err));
    ctx.send(poise::CreateReply::default().ephemeral(true).embed(embed))
        .await?;
    Ok(())
}
