// Rendering rules for `/profile`.
//
// The Discord layer flattens a guild member into `MemberFacts` (primitive
// types only) and this module decides what the profile shows. Keeping the
// rules here means they can be tested without a gateway connection.

use chrono::{DateTime, Utc};

use super::profile_models::UserRecord;

/// Embed field values are capped at 1024 characters by Discord.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Settings injected at startup instead of being read from globals.
#[derive(Debug, Clone, Default)]
pub struct ProfileSettings {
    pub developer_ids: Vec<u64>,
    /// Appended to the `User ID` footer, e.g. where to ask for help.
    pub footer_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleFacts {
    pub name: String,
    pub position: u16,
}

/// The handful of guild permissions the title classifier cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberPermissions {
    pub administrator: bool,
    pub manage_guild: bool,
    pub manage_messages: bool,
    pub manage_roles: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Idle,
    DoNotDisturb,
    Offline,
}

/// Status per client platform, as reported by the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientPresence {
    pub desktop: Option<PresenceStatus>,
    pub mobile: Option<PresenceStatus>,
    pub web: Option<PresenceStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Desktop,
    Mobile,
    Web,
}

/// Everything the renderer needs to know about a guild member.
#[derive(Debug, Clone)]
pub struct MemberFacts {
    pub user_id: u64,
    pub display_name: String,
    pub avatar_url: String,
    pub colour: u32,
    pub created_at: DateTime<Utc>,
    pub joined_at: Option<DateTime<Utc>>,
    pub roles: Vec<RoleFacts>,
    pub is_owner: bool,
    pub permissions: MemberPermissions,
    pub presence: Option<ClientPresence>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub name: &'static str,
    pub value: String,
    pub inline: bool,
}

/// Platform-neutral description of the profile embed.
#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub title: String,
    pub colour: u32,
    pub thumbnail: String,
    pub description: String,
    pub fields: Vec<CardField>,
    pub footer: String,
    /// Only set on self views.
    pub show_admire_toggle: bool,
}

/// First match wins, so the order of the checks is the ranking.
pub fn title_for(facts: &MemberFacts, settings: &ProfileSettings) -> &'static str {
    let perms = facts.permissions;
    if settings.developer_ids.contains(&facts.user_id) {
        "🤖 Bot Developer"
    } else if facts.is_owner {
        "Server Owner"
    } else if perms.administrator {
        "Server Administrator"
    } else if perms.manage_guild {
        "Server Manager"
    } else if perms.manage_messages || perms.manage_roles {
        "Server Moderator"
    } else {
        "Server Member"
    }
}

/// Role names, highest role first.
pub fn role_list(roles: &[RoleFacts]) -> String {
    if roles.is_empty() {
        return "No Roles".to_string();
    }

    let mut sorted: Vec<&RoleFacts> = roles.iter().collect();
    sorted.sort_by(|a, b| b.position.cmp(&a.position));

    let joined = sorted
        .iter()
        .map(|role| role.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.chars().count() >= FIELD_VALUE_LIMIT {
        "Too Many Roles".to_string()
    } else {
        joined
    }
}

pub fn status_glyph(platform: Platform, status: PresenceStatus) -> &'static str {
    use Platform::*;
    use PresenceStatus::*;

    match (platform, status) {
        (Desktop, Online) => "<:d_online:1315460103151030342>",
        (Desktop, Idle) => "<:d_idle:1315460100097572904>",
        (Desktop, DoNotDisturb) => "<:d_dnd:1315460099048734800>",
        (Desktop, Offline) => "<:d_offline:1315460101661921371>",
        (Mobile, Online) => "<:m_online:1315460113875861524>",
        (Mobile, Idle) => "<:m_idle:1315460110226690120>",
        (Mobile, DoNotDisturb) => "<:m_dnd:1315460221057106010>",
        (Mobile, Offline) => "<:m_offline:1315460222156017765>",
        (Web, Online) => "<:w_online:1315460224735379516>",
        (Web, Idle) => "<:w_idle:1315460117017395241>",
        (Web, DoNotDisturb) => "<:w_dnd:1315460228309057587>",
        (Web, Offline) => "<:w_offline:1315460120594878545>",
    }
}

/// Member mention followed by one glyph per active platform (desktop, mobile, web).
pub fn presence_line(user_id: u64, presence: Option<&ClientPresence>) -> String {
    let mut line = format!("<@{}>", user_id);

    if let Some(presence) = presence {
        let platforms = [
            (Platform::Desktop, presence.desktop),
            (Platform::Mobile, presence.mobile),
            (Platform::Web, presence.web),
        ];
        for (platform, status) in platforms {
            if let Some(status) = status {
                line.push(' ');
                line.push_str(status_glyph(platform, status));
            }
        }
    }

    line
}

fn relative_time(at: DateTime<Utc>) -> String {
    format!("<t:{}:R>", at.timestamp())
}

pub fn build_profile_card(
    facts: &MemberFacts,
    record: &UserRecord,
    is_self: bool,
    settings: &ProfileSettings,
) -> ProfileCard {
    let mut fields = vec![
        CardField {
            name: "Known As:",
            value: title_for(facts, settings).to_string(),
            inline: true,
        },
        CardField {
            name: "Account Created:",
            value: relative_time(facts.created_at),
            inline: true,
        },
        CardField {
            name: "Joined Server:",
            value: facts
                .joined_at
                .map(relative_time)
                .unwrap_or_else(|| "Unknown".to_string()),
            inline: true,
        },
        CardField {
            name: "Roles:",
            value: role_list(&facts.roles),
            inline: false,
        },
    ];

    if is_self {
        fields.push(CardField {
            name: "Among Us Friend Code:",
            value: record.friend_code().unwrap_or("Not Set").to_string(),
            inline: true,
        });
        fields.push(CardField {
            name: "Admire Opt-In:",
            value: if record.admire_opt_in { "Yes" } else { "No" }.to_string(),
            inline: true,
        });
    }

    ProfileCard {
        title: format!("{}'s Profile", facts.display_name),
        colour: facts.colour,
        thumbnail: facts.avatar_url.clone(),
        description: presence_line(facts.user_id, facts.presence.as_ref()),
        fields,
        footer: match &settings.footer_note {
            Some(note) => format!("User ID: {} • {}", facts.user_id, note),
            None => format!("User ID: {}", facts.user_id),
        },
        show_admire_toggle: is_self,
    }
}
