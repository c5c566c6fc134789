use poise::serenity_prelude as serenity;

/// Admin capability: the Administrator permission, or the configured admin role.
pub fn has_admin_capability(
    permissions: serenity::Permissions,
    roles: &[serenity::RoleId],
    admin_role: Option<serenity::RoleId>,
) -> bool {
    permissions.administrator() || admin_role.is_some_and(|r| roles.contains(&r))
}

pub async fn author_is_admin(ctx: poise::Context<'_, crate::Data, crate::Error>) -> bool {
    let Some(member) = ctx.author_member().await else {
        return false;
    };
    // Interaction members carry resolved permissions; prefix invocations fall back to the cache.
    let permissions = match member.permissions {
        Some(p) => p,
        None => ctx
            .guild()
            .map(|g| g.member_permissions(&member))
            .unwrap_or_else(serenity::Permissions::empty),
    };
    has_admin_capability(permissions, &member.roles, ctx.data().config.admin_role)
}
