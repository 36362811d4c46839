// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "profiles/mod.rs"]
pub mod profiles;
