// This is the entry point of the profile bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (HTTP client, config)
// - `discord/` = Discord-specific adapters (commands, embeds)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;

use crate::core::profiles::ProfileService;
use crate::discord::commands::presence;
use crate::discord::{Data, Error};
use crate::infra::config::AppConfig;
use crate::infra::profiles::ProfileApiClient;

/// Log command failures and tell the user something went wrong, ephemerally.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(
                command = %ctx.command().qualified_name,
                user_id = ctx.author().id.get(),
                "Command failed: {}",
                error
            );
            let reply = poise::CreateReply::default()
                .content("Sorry, something went wrong while running that command.")
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                tracing::warn!("Failed to report command error: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()
        .context("Invalid configuration. Create a .env file with DISCORD_TOKEN and PROFILE_API_TOKEN.")?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let api_client =
        ProfileApiClient::new(config.api.clone()).context("Failed to create profile API client")?;
    let profile_service = Arc::new(ProfileService::new(api_client));

    tracing::info!(
        api_url = %config.api.base_url,
        developers = config.profiles.developer_ids.len(),
        "Profile API client ready"
    );

    let data = Data {
        profiles: Arc::clone(&profile_service),
        profile_settings: Arc::new(config.profiles.clone()),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    // Presences and members feed the status line, roles and titles on /profile.
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_PRESENCES;

    let dev_guild_id = config.dev_guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                discord::commands::profile::profile(),
                discord::commands::eac::eac(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                tracing::info!("Bot is starting up...");

                match dev_guild_id {
                    // Guild commands update instantly, global ones can take up to an hour.
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                        tracing::info!(guild_id, "Commands registered in development guild");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        tracing::info!("Commands registered globally");
                    }
                }

                presence::on_ready(ctx);
                tracing::info!("Bot is ready!");

                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;

    Ok(())
}
