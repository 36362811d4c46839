// Developer-only commands that map straight onto the anti-cheat endpoints.

use crate::core::profiles::{BanRequest, ProfileApi};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;
use serde_json::Value;

/// Room left in an embed description once the code fence is added.
const JSON_PREVIEW_LIMIT: usize = 4000;

async fn is_developer(ctx: Context<'_>) -> Result<bool, Error> {
    let allowed = ctx
        .data()
        .profile_settings
        .developer_ids
        .contains(&ctx.author().id.get());

    if !allowed {
        tracing::warn!(user_id = ctx.author().id.get(), "Non-developer tried an EAC command");
        ctx.send(
            poise::CreateReply::default()
                .content("This command is limited to bot developers.")
                .ephemeral(true),
        )
        .await?;
    }

    Ok(allowed)
}

/// Anti-cheat (EAC) ban list tools.
#[poise::command(
    slash_command,
    subcommands("users", "lookup", "ban", "unban", "forget"),
    subcommand_required,
    check = "is_developer"
)]
pub async fn eac(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// List every entry on the EAC list.
#[poise::command(slash_command, check = "is_developer")]
pub async fn users(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;
    let reply = ctx.data().profiles.api().get_all_users().await?;
    send_json(ctx, "📋 EAC List", &reply).await
}

/// Look up a player by friend code or hashed PUID.
#[poise::command(slash_command, check = "is_developer")]
pub async fn lookup(
    ctx: Context<'_>,
    #[description = "Among Us friend code"] friendcode: Option<String>,
    #[description = "Hashed PUID"] hashpuid: Option<String>,
) -> Result<(), Error> {
    let api = ctx.data().profiles.api();
    let reply = match (friendcode, hashpuid) {
        (Some(code), None) => {
            ctx.defer_ephemeral().await?;
            api.get_user_by_friend_code(&code).await?
        }
        (None, Some(hash)) => {
            ctx.defer_ephemeral().await?;
            api.get_user_by_hash_puid(&hash).await?
        }
        _ => {
            ctx.send(
                poise::CreateReply::default()
                    .content("Give exactly one of `friendcode` or `hashpuid`.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }
    };

    send_json(ctx, "🔎 EAC Lookup", &reply).await
}

/// Add a player to the EAC ban list.
#[poise::command(slash_command, check = "is_developer")]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "Player name"] name: String,
    #[description = "Why they are banned"] reason: String,
    #[description = "Among Us friend code"] friendcode: String,
    #[description = "Hashed PUID"] hashpuid: String,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let request = BanRequest {
        name: Some(name),
        reason: Some(reason),
        friendcode: Some(friendcode),
        hashpuid: Some(hashpuid),
    };
    let outcome = ctx.data().profiles.api().ban(&request).await?;

    tracing::info!(
        moderator_id = ctx.author().id.get(),
        hashpuid = request.hashpuid.as_deref().unwrap_or_default(),
        success = outcome.success,
        "EAC ban requested"
    );

    let embed = if outcome.success {
        serenity::CreateEmbed::new()
            .title("🔨 Player Banned")
            .color(0x00ff00)
            .field("Name", request.name.unwrap_or_default(), true)
            .field("Friend Code", request.friendcode.unwrap_or_default(), true)
            .field("Reason", request.reason.unwrap_or_default(), false)
    } else {
        serenity::CreateEmbed::new()
            .title("❌ Ban Failed")
            .color(0xff0000)
            .description(
                outcome
                    .error
                    .unwrap_or_else(|| "The service did not say why.".to_string()),
            )
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Remove a player from the EAC ban list.
#[poise::command(slash_command, check = "is_developer")]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "Among Us friend code"] friendcode: Option<String>,
    #[description = "Hashed PUID"] hashpuid: Option<String>,
) -> Result<(), Error> {
    if friendcode.is_none() && hashpuid.is_none() {
        ctx.send(
            poise::CreateReply::default()
                .content("Give a `friendcode` or `hashpuid` to unban.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    ctx.defer_ephemeral().await?;
    let request = BanRequest {
        friendcode,
        hashpuid,
        ..Default::default()
    };
    let reply = ctx.data().profiles.api().unban(&request).await?;

    tracing::info!(moderator_id = ctx.author().id.get(), "EAC unban requested");
    send_json(ctx, "🕊️ EAC Unban", &reply).await
}

/// Delete a user's stored profile.
#[poise::command(slash_command, check = "is_developer")]
pub async fn forget(
    ctx: Context<'_>,
    #[description = "User whose profile should be deleted"] user: serenity::User,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;
    let reply = ctx
        .data()
        .profiles
        .api()
        .delete_user_by_id(user.id.get())
        .await?;

    tracing::info!(
        moderator_id = ctx.author().id.get(),
        user_id = user.id.get(),
        "Profile deletion requested"
    );
    send_json(ctx, &format!("🗑️ Forget {}", user.name), &reply).await
}

async fn send_json(ctx: Context<'_>, title: &str, value: &Value) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .title(title)
        .color(0x5865F2) // Blurple
        .description(json_block(value));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Pretty JSON in a code fence, cut down to fit an embed description.
fn json_block(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());

    let body = if pretty.chars().count() > JSON_PREVIEW_LIMIT {
        let mut cut: String = pretty.chars().take(JSON_PREVIEW_LIMIT).collect();
        cut.push_str("\n...");
        cut
    } else {
        pretty
    };

    format!("```json\n{}\n```", body)
}
