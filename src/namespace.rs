//! Storage partitioning by account.
//!
//! Guest data and each signed-in user's data live behind different keys and
//! never mix. Every per-account file on disk hangs off the key produced
//! here: `<key>_tasks.json` and `<key>_progress.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Authentication state as reported by the account layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthState {
    SignedOut,
    SignedIn(String),
}

/// A storage partition: guest, or one signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    Guest,
    User(String),
}

impl Namespace {
    /// Resolve the partition for an auth state. Unauthenticated or unknown
    /// states map to the guest partition.
    pub fn resolve(auth: &AuthState) -> Self {
        match auth {
            AuthState::SignedOut => Namespace::Guest,
            AuthState::SignedIn(id) => Namespace::User(sanitize_account_id(id)),
        }
    }

    /// Stable partition key used in file names.
    pub fn key(&self) -> String {
        match self {
            Namespace::Guest => "guest".to_string(),
            Namespace::User(id) => format!("user_{id}"),
        }
    }

    /// Path of this namespace's task blob inside `dir`.
    pub fn tasks_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_tasks.json", self.key()))
    }

    /// Path of this namespace's progress blob inside `dir`.
    pub fn progress_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_progress.json", self.key()))
    }
}

/// Make an account id safe for file names.
/// Lowercases, keeps alphanumerics, and collapses everything else to
/// single underscores.
pub fn sanitize_account_id(id: &str) -> String {
    id.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Namespace::resolve(&AuthState::SignedOut), Namespace::Guest);
        assert_eq!(
            Namespace::resolve(&AuthState::SignedIn("Alice".into())),
            Namespace::User("alice".into())
        );
    }

    #[test]
    fn test_sanitize_account_id() {
        assert_eq!(sanitize_account_id("Alice"), "alice");
        assert_eq!(sanitize_account_id("a b@example.com"), "a_b_example_com");
        assert_eq!(sanitize_account_id("  spaced  out  "), "spaced_out");
        assert_eq!(sanitize_account_id(""), "");
    }

    #[test]
    fn test_paths_are_partitioned() {
        let dir = Path::new("/data");
        let guest = Namespace::Guest;
        let user = Namespace::User("alice".into());
        assert_eq!(guest.tasks_path(dir), Path::new("/data/guest_tasks.json"));
        assert_eq!(
            user.tasks_path(dir),
            Path::new("/data/user_alice_tasks.json")
        );
        assert_ne!(guest.progress_path(dir), user.progress_path(dir));
    }
}
