use std::path::PathBuf;

use chrono::Utc;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use tracing::{debug, info, warn};

use crate::error::{AuthError, StoreError};
use crate::store::json_store::{
    ACCOUNTS_FILE, JsonStore, POSTS_FILE, PROFILES_FILE, SESSION_FILE,
};
use crate::store::schema::{
    AccountId, AccountRecord, AccountsData, AuthSession, Post, PostsData, ProfileUpdate,
    ProfilesData, ReactionKind, SessionData, UserProfile,
};
use crate::store::subscription::{Subscribers, Subscription};
use crate::store::{
    AccountService, AuthCallback, PostStore, PostsCallback, ProfileCallback, ProfileStore,
};

pub const MIN_PASSWORD_LEN: usize = 6;

const AUTH_TOPIC: &str = "auth";
const POSTS_TOPIC: &str = "posts";

/// File-backed stand-in for the hosted account and document services.
pub struct LocalBackend {
    store: JsonStore,
    accounts: AccountsData,
    profiles: ProfilesData,
    posts: PostsData,
    session: Option<AuthSession>,
    auth_subs: Subscribers<Option<AuthSession>>,
    profile_subs: Subscribers<UserProfile>,
    post_subs: Subscribers<Vec<Post>>,
    rng: SmallRng,
}

impl LocalBackend {
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = JsonStore::new(base_dir)?;
        let accounts: AccountsData = store.load(ACCOUNTS_FILE)?;
        let profiles: ProfilesData = store.load(PROFILES_FILE)?;
        let posts: PostsData = store.load(POSTS_FILE)?;
        let session: SessionData = store.load(SESSION_FILE)?;

        // A session pointing at a vanished account is stale
        let session = session
            .current
            .filter(|s| accounts.accounts.iter().any(|a| a.id == s.account_id));

        info!(
            dir = %store.base_dir().display(),
            accounts = accounts.accounts.len(),
            posts = posts.posts.len(),
            "opened local backend"
        );

        Ok(Self {
            store,
            accounts,
            profiles,
            posts,
            session,
            auth_subs: Subscribers::default(),
            profile_subs: Subscribers::default(),
            post_subs: Subscribers::default(),
            rng: SmallRng::from_entropy(),
        })
    }

    fn new_id(&mut self, prefix: &str) -> String {
        format!("{prefix}-{:016x}", self.rng.next_u64())
    }

    fn hash_password(&mut self, password: &str) -> Result<String, AuthError> {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        let salt =
            SaltString::encode_b64(&bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn set_session(&mut self, session: Option<AuthSession>) -> Result<(), StoreError> {
        self.store.save(
            SESSION_FILE,
            &SessionData {
                current: session.clone(),
            },
        )?;
        self.session = session;
        self.auth_subs.notify(AUTH_TOPIC, &self.session);
        Ok(())
    }

    /// Newest first.
    pub fn feed(&self) -> Vec<Post> {
        let mut posts = self.posts.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    fn publish_feed(&self) {
        self.post_subs.notify(POSTS_TOPIC, &self.feed());
    }
}

/// False for a wrong password and for an unreadable stored hash alike.
fn password_matches(stored: &str, password: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "stored password hash is unreadable");
            false
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

impl AccountService for LocalBackend {
    fn register(
        &mut self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<AccountId, AuthError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail(email));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN));
        }
        if self.accounts.accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::DuplicateAccount(email));
        }

        let id = self.new_id("u");
        let record = AccountRecord {
            id: id.clone(),
            email: email.clone(),
            username: username.to_string(),
            password_hash: self.hash_password(password)?,
            created_at: Utc::now(),
        };

        let mut next = self.accounts.clone();
        next.accounts.push(record);
        self.store.save(ACCOUNTS_FILE, &next)?;
        self.accounts = next;
        info!(account = %id, "registered account");

        self.set_session(Some(AuthSession {
            account_id: id.clone(),
            email,
        }))?;
        Ok(id)
    }

    fn login(&mut self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);
        let record = self
            .accounts
            .accounts
            .iter()
            .find(|a| a.email == email)
            .ok_or(AuthError::InvalidCredentials)?;
        if !password_matches(&record.password_hash, password) {
            warn!(account = %record.id, "rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        let session = AuthSession {
            account_id: record.id.clone(),
            email,
        };
        self.set_session(Some(session.clone()))?;
        info!(account = %session.account_id, "signed in");
        Ok(session)
    }

    fn logout(&mut self) -> Result<(), StoreError> {
        if let Some(ref s) = self.session {
            info!(account = %s.account_id, "signed out");
        }
        self.set_session(None)
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.session.clone()
    }

    fn on_auth_state_change(&self, mut callback: AuthCallback) -> Subscription {
        callback(&self.session);
        self.auth_subs.subscribe(Some(AUTH_TOPIC), callback)
    }
}

impl ProfileStore for LocalBackend {
    fn read_profile(&self, account: &str) -> Result<UserProfile, StoreError> {
        self.profiles
            .profiles
            .get(account)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("profile {account}")))
    }

    fn subscribe_profile(&self, account: &str, mut callback: ProfileCallback) -> Subscription {
        if let Some(profile) = self.profiles.profiles.get(account) {
            callback(profile);
        }
        self.profile_subs.subscribe(Some(account), callback)
    }

    fn write_profile(
        &mut self,
        account: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, StoreError> {
        let mut next = self.profiles.clone();
        let profile = next
            .profiles
            .get_mut(account)
            .ok_or_else(|| StoreError::NotFound(format!("profile {account}")))?;
        profile.apply(update);
        let updated = profile.clone();

        self.store.save(PROFILES_FILE, &next)?;
        self.profiles = next;
        debug!(account, ?update, "profile updated");
        self.profile_subs.notify(account, &updated);
        Ok(updated)
    }

    fn initialize_profile(
        &mut self,
        account: &str,
        defaults: UserProfile,
    ) -> Result<UserProfile, StoreError> {
        if let Some(existing) = self.profiles.profiles.get(account) {
            return Ok(existing.clone());
        }
        let mut next = self.profiles.clone();
        next.profiles.insert(account.to_string(), defaults.clone());
        self.store.save(PROFILES_FILE, &next)?;
        self.profiles = next;
        info!(account, username = %defaults.username, "initialized profile");
        self.profile_subs.notify(account, &defaults);
        Ok(defaults)
    }
}

impl PostStore for LocalBackend {
    fn create_post(
        &mut self,
        author_id: &str,
        author_name: &str,
        content: &str,
    ) -> Result<Post, StoreError> {
        let post = Post {
            id: self.new_id("p"),
            author_id: author_id.to_string(),
            author_name: author_name.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            likes: Default::default(),
            hearts: Default::default(),
        };
        let mut next = self.posts.clone();
        next.posts.push(post.clone());
        self.store.save(POSTS_FILE, &next)?;
        self.posts = next;
        info!(post = %post.id, author = author_id, "post created");
        self.publish_feed();
        Ok(post)
    }

    fn subscribe_posts(&self, mut callback: PostsCallback) -> Subscription {
        callback(&self.feed());
        self.post_subs.subscribe(Some(POSTS_TOPIC), callback)
    }

    fn toggle_reaction(
        &mut self,
        post_id: &str,
        kind: ReactionKind,
        user: &str,
    ) -> Result<bool, StoreError> {
        let mut next = self.posts.clone();
        let post = next
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| StoreError::NotFound(format!("post {post_id}")))?;
        let reacted = post.toggle(kind, user);
        self.store.save(POSTS_FILE, &next)?;
        self.posts = next;
        debug!(post = post_id, kind = kind.as_str(), reacted, "reaction toggled");
        self.publish_feed();
        Ok(reacted)
    }
}
