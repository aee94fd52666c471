//! User records keyed by username.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};

/// A registered account. `password` holds the bcrypt hash, never the
/// plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: String,
}

#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Insert a new user. Returns `false` without modifying the store if
    /// the username is already taken.
    pub fn insert(&self, user: User) -> bool {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(user);
                true
            }
        }
    }

    pub fn get(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> User {
        User {
            username: username.to_string(),
            password: "$2b$12$hash".to_string(),
            prefix: String::new(),
            first_name: "Alice".to_string(),
            last_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            date_of_birth: String::new(),
        }
    }

    #[test]
    fn duplicate_usernames_are_rejected() {
        let store = UserStore::new();

        assert!(store.insert(user("alice")));
        assert!(!store.insert(user("alice")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("alice").unwrap().first_name, "Alice");
    }

    #[test]
    fn missing_user_is_none() {
        let store = UserStore::new();
        assert!(store.get("nobody").is_none());
    }
}
