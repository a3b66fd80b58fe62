use serde::{Deserialize, Serialize};

pub use serde_json;

/// The authenticated identity supplied by the external provider. Either the
/// whole session is absent or it carries a usable identity reference.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserIdentity,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub email: String,
}

/// Wire shape of `GET /api/v1/auth/session`. `session: None` means signed
/// out; the endpoint never reports absence as a non-200.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionResponse {
    pub session: Option<Session>,
}

/// Unit of search-result data returned by a search collaborator once one is
/// wired. Nothing in this repository produces these yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeSummary {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    pub results: Vec<RecipeSummary>,
}

/// Recoverable authentication failures, carried back to the login page as a
/// query parameter so it can show a retry message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The provider rejected the hand-off or the user cancelled it.
    AuthFailed,
    /// The provider could not be reached at all.
    ProviderUnreachable,
}

impl AuthErrorKind {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            AuthErrorKind::AuthFailed => "auth_failed",
            AuthErrorKind::ProviderUnreachable => "provider_unreachable",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "auth_failed" => Some(AuthErrorKind::AuthFailed),
            "provider_unreachable" => Some(AuthErrorKind::ProviderUnreachable),
            _ => None,
        }
    }
}

/// A member of the site roster. `name` doubles as the rendering key, so it
/// must be unique within the list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
}

impl TeamMember {
    /// Decorative badge text: the uppercased first letter of each
    /// whitespace-separated token of the name, joined with no separator.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_takes_first_letter_of_each_token() {
        assert_eq!(initials("Jamie Farrow"), "JF");
        assert_eq!(initials("Miles Taylor"), "MT");
    }

    #[test]
    fn initials_uppercases_and_ignores_extra_whitespace() {
        assert_eq!(initials("  tristan   coull "), "TC");
    }

    #[test]
    fn initials_of_single_token_name() {
        assert_eq!(initials("Cher"), "C");
    }

    #[test]
    fn initials_of_empty_name_is_empty() {
        assert_eq!(initials(""), "");
    }

    #[test]
    fn auth_error_kind_query_roundtrip() {
        for kind in [AuthErrorKind::AuthFailed, AuthErrorKind::ProviderUnreachable] {
            assert_eq!(
                AuthErrorKind::from_query_value(kind.as_query_value()),
                Some(kind)
            );
        }
        assert_eq!(AuthErrorKind::from_query_value("nope"), None);
    }
}
