// Flattens serenity's guild/member types into the primitive `MemberFacts` the
// core renderer works with. Cache references must not cross an `.await`, so
// callers build the facts inside a short block and drop the guild ref.

use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;

use crate::core::profiles::{
    ClientPresence, MemberFacts, MemberPermissions, PresenceStatus, RoleFacts,
};

pub fn member_facts(guild: &serenity::Guild, member: &serenity::Member) -> MemberFacts {
    let roles: Vec<&serenity::Role> = member
        .roles
        .iter()
        .filter_map(|role_id| guild.roles.get(role_id))
        .collect();

    // Guild-level permissions: @everyone plus every role the member holds.
    let everyone_id = serenity::RoleId::new(guild.id.get());
    let mut permissions = guild
        .roles
        .get(&everyone_id)
        .map(|role| role.permissions)
        .unwrap_or_else(serenity::Permissions::empty);
    for role in &roles {
        permissions |= role.permissions;
    }

    // Display colour comes from the highest coloured role.
    let colour = roles
        .iter()
        .filter(|role| role.colour.0 != 0)
        .max_by_key(|role| role.position)
        .map(|role| role.colour.0)
        .unwrap_or(0);

    let presence = guild
        .presences
        .get(&member.user.id)
        .and_then(|presence| presence.client_status.as_ref())
        .map(client_presence);

    MemberFacts {
        user_id: member.user.id.get(),
        display_name: member.display_name().to_string(),
        avatar_url: member.face(),
        colour,
        created_at: to_utc(member.user.id.created_at()),
        joined_at: member.joined_at.map(to_utc),
        roles: roles
            .iter()
            .map(|role| RoleFacts {
                name: role.name.clone(),
                position: role.position,
            })
            .collect(),
        is_owner: guild.owner_id == member.user.id,
        permissions: MemberPermissions {
            administrator: permissions.administrator(),
            manage_guild: permissions.manage_guild(),
            manage_messages: permissions.manage_messages(),
            manage_roles: permissions.manage_roles(),
        },
        presence,
    }
}

fn client_presence(status: &serenity::ClientStatus) -> ClientPresence {
    ClientPresence {
        desktop: status.desktop.map(presence_status),
        mobile: status.mobile.map(presence_status),
        web: status.web.map(presence_status),
    }
}

fn presence_status(status: serenity::OnlineStatus) -> PresenceStatus {
    match status {
        serenity::OnlineStatus::Online => PresenceStatus::Online,
        serenity::OnlineStatus::Idle => PresenceStatus::Idle,
        serenity::OnlineStatus::DoNotDisturb => PresenceStatus::DoNotDisturb,
        // Invisible shows as offline to everyone else.
        _ => PresenceStatus::Offline,
    }
}

fn to_utc(timestamp: serenity::Timestamp) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0).unwrap_or_default()
}
