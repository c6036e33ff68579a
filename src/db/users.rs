//! In-memory user store keyed by email.
//!
//! Records keep insertion order (seed order, then registration order), which
//! is also the order used for listing. Replacing an existing key keeps the
//! record's position; rekeying moves it to the end.

use super::models::User;
use super::pagination::{NameFilter, Page, PageRequest};

#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn get(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Store `user` under its email. An existing record with the same email
    /// is overwritten in place and returned.
    pub fn insert(&mut self, user: User) -> Option<User> {
        match self.users.iter().position(|u| u.email == user.email) {
            Some(index) => Some(std::mem::replace(&mut self.users[index], user)),
            None => {
                self.users.push(user);
                None
            }
        }
    }

    pub fn remove(&mut self, email: &str) -> Option<User> {
        let index = self.users.iter().position(|u| u.email == email)?;
        Some(self.users.remove(index))
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<User> {
        let index = self.users.iter().position(|u| u.id == id)?;
        Some(self.users.remove(index))
    }

    /// Move the record stored at `old_email` to `new_email`, keeping its id.
    /// The record always goes to the end, even when the email is unchanged.
    /// Returns false when nothing is stored under `old_email`.
    pub fn rekey(&mut self, old_email: &str, new_email: &str) -> bool {
        let Some(mut user) = self.remove(old_email) else {
            return false;
        };
        user.email = new_email.to_string();
        self.insert(user);
        true
    }

    /// Filter by name, then cut one page out of the result.
    pub fn list(&self, filter: &NameFilter, page: &PageRequest) -> Page<&User> {
        page.apply(self.users.iter().filter(|u| filter.matches(&u.name)))
    }
}

impl FromIterator<User> for UserStore {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut store = Self::new();
        for user in iter {
            store.insert(user);
        }
        store
    }
}
