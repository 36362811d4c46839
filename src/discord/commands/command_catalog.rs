// Discord commands module.
// Each feature gets its own command file.

use std::sync::Arc;

use crate::core::profiles::{ProfileService, ProfileSettings};
use crate::infra::profiles::ProfileApiClient;

pub mod profile;

// Developer tools for the anti-cheat ban list
pub mod eac;

pub mod presence;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Data that's shared across all commands.
pub struct Data {
    pub profiles: Arc<ProfileService<ProfileApiClient>>,
    pub profile_settings: Arc<ProfileSettings>,
}
