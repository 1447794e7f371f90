//! Permission resolution.
//!
//! A player's capabilities are the tokens of the permission group they are
//! assigned to, or of the `default` group when unassigned. Nothing is
//! cached: every lookup reads the catalog it is given, so a reload takes
//! effect on the next command.

use crate::catalog::Catalog;

/// Resolve the permission tokens of a player.
///
/// Returns an empty slice when the assigned group is not defined.
pub fn permissions_of<'a>(catalog: &'a Catalog, player: &str) -> &'a [String] {
    catalog
        .permission_group(catalog.user_group(player))
        .unwrap_or(&[])
}

/// Check whether a player holds a single permission token.
pub fn has_permission(catalog: &Catalog, player: &str, token: &str) -> bool {
    permissions_of(catalog, player).iter().any(|p| p == token)
}
