/// Role strings with full notification visibility. Comparison is
/// case-sensitive: `"admin"` and `"Admin"` are both privileged, `"ADMIN"`
/// is not. `"Yönetici"`/`"Personel"` are the legacy Turkish role values.
pub const PRIVILEGED_ROLES: [&str; 4] = ["admin", "Admin", "manager", "Yönetici"];

/// The active user, as supplied by the embedding application's session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: i64,
    pub full_name: String,
    pub role: String,
    /// User-level preference gating `new_event` publishes.
    pub notifications_enabled: bool,
}

impl SessionUser {
    pub fn new(id: i64, full_name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            role: role.into(),
            notifications_enabled: true,
        }
    }

    pub fn is_privileged(&self) -> bool {
        PRIVILEGED_ROLES.contains(&self.role.as_str())
    }
}
