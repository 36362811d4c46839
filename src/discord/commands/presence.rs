// Bot presence management.
//
// Discord-layer glue only: nothing here touches the profile service.

use poise::serenity_prelude as serenity;

/// Default status shown while the bot is running.
pub fn reset_status(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching("profiles | /profile");
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready so the default presence is set in one place.
pub fn on_ready(ctx: &serenity::Context) {
    reset_status(ctx);
}
