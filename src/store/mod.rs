pub mod json_store;
pub mod local;
pub mod schema;
pub mod subscription;

use crate::error::{AuthError, StoreError};
use schema::{AccountId, AuthSession, Post, ProfileUpdate, ReactionKind, UserProfile};
use subscription::Subscription;

pub use local::LocalBackend;

pub type AuthCallback = Box<dyn FnMut(&Option<AuthSession>)>;
pub type ProfileCallback = Box<dyn FnMut(&UserProfile)>;
pub type PostsCallback = Box<dyn FnMut(&Vec<Post>)>;

pub trait AccountService {
    /// Creates the account and signs it in.
    fn register(
        &mut self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<AccountId, AuthError>;
    fn login(&mut self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    fn logout(&mut self) -> Result<(), StoreError>;
    fn current_session(&self) -> Option<AuthSession>;
    /// Fires immediately with the current state, then on every sign-in/out.
    fn on_auth_state_change(&self, callback: AuthCallback) -> Subscription;
}

pub trait ProfileStore {
    fn read_profile(&self, account: &str) -> Result<UserProfile, StoreError>;
    /// Fires immediately when the profile exists, then after each write.
    fn subscribe_profile(&self, account: &str, callback: ProfileCallback) -> Subscription;
    fn write_profile(
        &mut self,
        account: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, StoreError>;
    /// Stores `defaults` unless a profile already exists; returns the stored profile.
    fn initialize_profile(
        &mut self,
        account: &str,
        defaults: UserProfile,
    ) -> Result<UserProfile, StoreError>;
}

pub trait PostStore {
    fn create_post(
        &mut self,
        author_id: &str,
        author_name: &str,
        content: &str,
    ) -> Result<Post, StoreError>;
    /// Newest first. Fires immediately, then after every change.
    fn subscribe_posts(&self, callback: PostsCallback) -> Subscription;
    /// Returns whether `user` reacts after the toggle.
    fn toggle_reaction(
        &mut self,
        post_id: &str,
        kind: ReactionKind,
        user: &str,
    ) -> Result<bool, StoreError>;
}

/// Everything the application talks to.
pub trait Backend: AccountService + ProfileStore + PostStore {}

impl<T: AccountService + ProfileStore + PostStore> Backend for T {}
