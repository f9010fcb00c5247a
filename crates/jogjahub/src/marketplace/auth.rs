use super::domain::{Department, User, UserRole};

/// Supplies the identity for a session. There is no real login on the portal.
pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self, role: UserRole) -> User;
}

/// Fixture identities used when switching roles in the demo portal.
#[derive(Debug, Clone)]
pub struct MockAuthProvider {
    pub user_id: String,
    pub phone: String,
    pub admin_department: Department,
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self {
            user_id: "u1".to_string(),
            phone: "08123456789".to_string(),
            admin_department: Department::Pariwisata,
        }
    }
}

impl MockAuthProvider {
    pub fn display_name(role: UserRole) -> &'static str {
        match role {
            UserRole::Wisatawan => "Wisatawan Jogja",
            UserRole::PelakuUsaha => "Batik Berkah",
            UserRole::AdminDinas => "Admin Dinpar",
            UserRole::SuperAdmin => "Super Admin",
        }
    }
}

impl IdentityProvider for MockAuthProvider {
    fn sign_in(&self, role: UserRole) -> User {
        User {
            id: self.user_id.clone(),
            name: Self::display_name(role).to_string(),
            phone: self.phone.clone(),
            role,
            // Only department admins carry an affiliation; super admins are portal-wide.
            department: (role == UserRole::AdminDinas).then_some(self.admin_department),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_department_admin_has_affiliation() {
        let provider = MockAuthProvider::default();
        for role in UserRole::ALL {
            let user = provider.sign_in(role);
            assert_eq!(user.role, role);
            assert_eq!(user.id, "u1");
            assert_eq!(
                user.department.is_some(),
                role == UserRole::AdminDinas,
                "unexpected affiliation for {role:?}"
            );
        }
        assert_eq!(provider.sign_in(UserRole::PelakuUsaha).name, "Batik Berkah");
    }
}
