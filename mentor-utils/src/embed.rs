use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x3B_82_F6;
/// Color for failed actions.
pub const ERROR_EMBED_COLOR: u32 = 0xDC_26_26;
/// Discord's hard limit on embed descriptions, in characters.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
/// Page size used when splitting generated text, leaving headroom under the limit.
pub const PAGE_CHAR_BUDGET: usize = 3800;

/// Build a standard embed with consistent styling.
pub fn build_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
}

/// Build an error embed shown when an action could not complete.
pub fn build_error_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(ERROR_EMBED_COLOR)
        .description(description)
}

/// Footer text for a page, with an optional note appended.
pub fn page_footer_text(page: usize, total_pages: usize, note: Option<&str>) -> String {
    let page = page.max(1);
    let total_pages = total_pages.max(1);

    match (total_pages > 1, note.filter(|note| !note.is_empty())) {
        (true, Some(note)) => format!("Page {}/{} • {}", page, total_pages, note),
        (true, None) => format!("Page {}/{}", page, total_pages),
        (false, Some(note)) => note.to_owned(),
        (false, None) => String::new(),
    }
}
