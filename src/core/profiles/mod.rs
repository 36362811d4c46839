pub mod admire_panel;
pub mod profile_api;
pub mod profile_models;
pub mod profile_service;
pub mod profile_view;

pub use admire_panel::{AdmirePanel, ClickOutcome, EXPIRED_NOTICE};
pub use profile_api::ProfileApi;
pub use profile_models::{ApiError, BanOutcome, BanRequest, UserLookup, UserRecord};
pub use profile_service::ProfileService;
pub use profile_view::{
    build_profile_card, ClientPresence, MemberFacts, MemberPermissions, PresenceStatus,
    ProfileCard, ProfileSettings, RoleFacts,
};
