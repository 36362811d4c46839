// Discord layer - commands and the adapters they share.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "profile/member_facts.rs"]
pub mod member_facts;

#[path = "profile/profile_embed.rs"]
pub mod profile_embed;

// Re-export command types for convenience
pub use commands::{Context, Data, Error};
