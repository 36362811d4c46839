// `/profile` - show a member's profile, with an admire opt-in toggle on your own.
//
// Same pattern as every command here:
// 1. Extract primitive data from Discord types
// 2. Call the core service / renderer
// 3. Send the result back

use std::time::Instant;

use crate::core::profiles::{
    build_profile_card, AdmirePanel, ClickOutcome, MemberFacts, UserRecord, EXPIRED_NOTICE,
};
use crate::discord::member_facts::member_facts;
use crate::discord::profile_embed::{admire_row, profile_embed, ADMIRE_BUTTON_ID};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

const LOAD_FAILED: &str =
    "Sorry, I couldn't load that profile right now. Please try again in a moment.";
const TOGGLE_FAILED: &str = "Sorry, I couldn't update your admire opt-in. Please try again.";

/// View your profile or someone else's.
#[poise::command(slash_command, guild_only)]
pub async fn profile(
    ctx: Context<'_>,
    #[description = "User to view"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or("This command only works in servers")?;
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let is_self = target.id == ctx.author().id;

    // The member fetch and the profile API can both outlast Discord's reply deadline.
    ctx.defer_ephemeral().await?;

    let member = guild_id.member(ctx, target.id).await?;

    let (facts, guild_icon) = {
        let guild = ctx
            .guild()
            .ok_or("This server isn't cached yet, try again shortly")?;
        (member_facts(&guild, &member), guild.icon_url())
    };

    let record = match ctx.data().profiles.load_or_create(target.id.get()).await {
        Ok(record) => record,
        Err(err) => {
            tracing::error!(
                user_id = target.id.get(),
                guild_id = guild_id.get(),
                "Failed to load profile: {}",
                err
            );
            ctx.send(
                poise::CreateReply::default()
                    .content(LOAD_FAILED)
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
    };

    let card = build_profile_card(&facts, &record, is_self, &ctx.data().profile_settings);
    let embed = profile_embed(&card, guild_icon.as_deref());

    if !card.show_admire_toggle {
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    }

    run_admire_panel(ctx, facts, record, guild_icon, embed).await
}

/// Send the self profile with its toggle button and serve clicks until the panel closes.
///
/// Failures inside the loop are logged and skipped so the closing edit always runs.
async fn run_admire_panel(
    ctx: Context<'_>,
    facts: MemberFacts,
    mut record: UserRecord,
    guild_icon: Option<String>,
    embed: serenity::CreateEmbed,
) -> Result<(), Error> {
    let handle = ctx
        .send(
            poise::CreateReply::default()
                .embed(embed)
                .components(vec![admire_row(false)])
                .ephemeral(true),
        )
        .await?;
    let message_id = handle.message().await?.id;

    let user_id = ctx.author().id.get();
    let settings = &ctx.data().profile_settings;
    let mut panel = AdmirePanel::open(user_id, Instant::now());

    while let Some(wait) = panel.remaining(Instant::now()) {
        let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
            .message_id(message_id)
            .custom_ids(vec![ADMIRE_BUTTON_ID.to_string()])
            .timeout(wait)
            .await
        else {
            break;
        };

        if panel.click(press.user.id.get(), Instant::now()) == ClickOutcome::Ignored {
            continue;
        }

        // Acknowledge before the toggle round trip.
        if let Err(err) = press.defer(ctx.serenity_context()).await {
            tracing::warn!(user_id, "Failed to acknowledge admire toggle: {}", err);
            continue;
        }

        match ctx.data().profiles.toggle_admire(&record).await {
            Ok(stored) => {
                record = stored;
                panel.record_toggle();
            }
            Err(err) => {
                tracing::error!(user_id, "Admire toggle failed: {}", err);
                let notice = serenity::CreateInteractionResponseFollowup::new()
                    .content(TOGGLE_FAILED)
                    .ephemeral(true);
                if let Err(err) = press.create_followup(ctx.serenity_context(), notice).await {
                    tracing::warn!(user_id, "Failed to report admire toggle failure: {}", err);
                }
                continue;
            }
        }

        // The last allowed toggle is shown by the closing edit below.
        if panel.is_expired() {
            break;
        }

        let card = build_profile_card(&facts, &record, true, settings);
        let update = poise::CreateReply::default()
            .embed(profile_embed(&card, guild_icon.as_deref()))
            .components(vec![admire_row(false)]);
        if let Err(err) = handle.edit(ctx, update).await {
            tracing::warn!(user_id, "Failed to refresh profile after toggle: {}", err);
        }
    }

    panel.expire();

    // Re-send the embed, an edit without it would drop it from the message.
    let card = build_profile_card(&facts, &record, true, settings);
    handle
        .edit(
            ctx,
            poise::CreateReply::default()
                .content(EXPIRED_NOTICE)
                .embed(profile_embed(&card, guild_icon.as_deref()))
                .components(vec![admire_row(true)]),
        )
        .await?;

    tracing::debug!(user_id, "Admire panel expired");
    Ok(())
}
