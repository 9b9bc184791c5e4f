use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

pub type AccountId = String;
pub type PostId = String;

pub const DEFAULT_COINS: u32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub level: u32,
    pub coins: u32,
    pub wpm: u32,
    pub accuracy: u32,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub completed_levels: BTreeSet<u32>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl UserProfile {
    /// Registration defaults.
    pub fn new(username: &str) -> Self {
        let now = Utc::now();
        Self {
            username: username.to_string(),
            level: 1,
            coins: DEFAULT_COINS,
            wpm: 0,
            accuracy: 0,
            tier: Tier::Bronze,
            completed_levels: BTreeSet::new(),
            created_at: now,
            last_login: now,
        }
    }

    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(level) = update.level {
            self.level = level.max(1);
        }
        if let Some(wpm) = update.wpm {
            self.wpm = wpm;
        }
        if let Some(accuracy) = update.accuracy {
            self.accuracy = accuracy.min(100);
        }
        if let Some(id) = update.complete_level {
            self.completed_levels.insert(id);
        }
        if let Some(at) = update.last_login {
            self.last_login = at;
        }
    }
}

/// Partial profile write. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub level: Option<u32>,
    pub wpm: Option<u32>,
    pub accuracy: Option<u32>,
    pub complete_level: Option<u32>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Likes,
    Hearts,
}

impl ReactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionKind::Likes => "likes",
            ReactionKind::Hearts => "hearts",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: AccountId,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: BTreeSet<AccountId>,
    #[serde(default)]
    pub hearts: BTreeSet<AccountId>,
}

impl Post {
    pub fn reactions(&self, kind: ReactionKind) -> &BTreeSet<AccountId> {
        match kind {
            ReactionKind::Likes => &self.likes,
            ReactionKind::Hearts => &self.hearts,
        }
    }

    /// Flip `user`'s membership. Returns whether the user now reacts.
    pub fn toggle(&mut self, kind: ReactionKind, user: &str) -> bool {
        let set = match kind {
            ReactionKind::Likes => &mut self.likes,
            ReactionKind::Hearts => &mut self.hearts,
        };
        if set.remove(user) {
            false
        } else {
            set.insert(user.to_string());
            true
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub email: String,
    pub username: String,
    /// Argon2id PHC string; carries its own salt and parameters.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub account_id: AccountId,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountsData {
    pub schema_version: u32,
    pub accounts: Vec<AccountRecord>,
}

impl Default for AccountsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            accounts: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfilesData {
    pub schema_version: u32,
    pub profiles: std::collections::BTreeMap<AccountId, UserProfile>,
}

impl Default for ProfilesData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            profiles: Default::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostsData {
    pub schema_version: u32,
    pub posts: Vec<Post>,
}

impl Default for PostsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            posts: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionData {
    pub current: Option<AuthSession>,
}
