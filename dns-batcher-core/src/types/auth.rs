//! The authenticated principal handed to the core by the routing layer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{BatchChange, Zone};

/// Identity and group memberships of the requesting user.
///
/// Produced by the authentication middleware; the core only consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPrincipal {
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub group_ids: HashSet<String>,
    #[serde(default)]
    pub is_super: bool,
}

impl AuthPrincipal {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        group_ids: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            group_ids: group_ids.into_iter().collect(),
            is_super: false,
        }
    }

    /// Marks this principal as a super-user (administrator).
    #[must_use]
    pub fn super_user(mut self) -> Self {
        self.is_super = true;
        self
    }

    #[must_use]
    pub fn is_group_member(&self, group_id: &str) -> bool {
        self.group_ids.contains(group_id)
    }

    /// Whether this principal may modify records in `zone`.
    #[must_use]
    pub fn can_modify_zone(&self, zone: &Zone) -> bool {
        self.is_super
            || self.is_group_member(&zone.access_control.admin_group_id)
            || zone
                .access_control
                .allowed_group_ids
                .iter()
                .any(|g| self.is_group_member(g))
    }

    /// Whether this principal may view `batch`: its creator, or a super-user.
    #[must_use]
    pub fn can_view_batch(&self, batch: &BatchChange) -> bool {
        self.is_super || batch.user_id == self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ZoneAccessControl;

    fn zone_with_admin(group: &str) -> Zone {
        Zone::new("zone-1", "example.com.", ZoneAccessControl::new(group))
    }

    #[test]
    fn admin_group_member_can_modify() {
        let auth = AuthPrincipal::new("u1", "jdoe", vec!["grp-a".to_string()]);
        assert!(auth.can_modify_zone(&zone_with_admin("grp-a")));
        assert!(!auth.can_modify_zone(&zone_with_admin("grp-b")));
    }

    #[test]
    fn allowed_group_member_can_modify() {
        let mut zone = zone_with_admin("grp-admin");
        zone.access_control.allowed_group_ids = vec!["grp-ops".to_string()];
        let auth = AuthPrincipal::new("u1", "jdoe", vec!["grp-ops".to_string()]);
        assert!(auth.can_modify_zone(&zone));
    }

    #[test]
    fn super_user_bypasses_groups() {
        let auth = AuthPrincipal::new("u1", "root", Vec::new()).super_user();
        assert!(auth.can_modify_zone(&zone_with_admin("grp-a")));
    }
}
