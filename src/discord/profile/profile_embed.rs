use poise::serenity_prelude as serenity;

use crate::core::profiles::ProfileCard;

pub const ADMIRE_BUTTON_ID: &str = "toggle_admire_opt_in";

/// Turn a core `ProfileCard` into a Discord embed.
pub fn profile_embed(card: &ProfileCard, guild_icon: Option<&str>) -> serenity::CreateEmbed {
    let mut footer = serenity::CreateEmbedFooter::new(&card.footer);
    if let Some(icon) = guild_icon {
        footer = footer.icon_url(icon);
    }

    let mut embed = serenity::CreateEmbed::new()
        .title(&card.title)
        .color(card.colour)
        .thumbnail(&card.thumbnail)
        .description(&card.description)
        .timestamp(serenity::Timestamp::now())
        .footer(footer);

    for field in &card.fields {
        embed = embed.field(field.name, &field.value, field.inline);
    }

    embed
}

pub fn admire_row(disabled: bool) -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![serenity::CreateButton::new(ADMIRE_BUTTON_ID)
        .label("Toggle Admire Opt-In")
        .style(serenity::ButtonStyle::Primary)
        .disabled(disabled)])
}
