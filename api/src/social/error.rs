use crate::store::StoreError;

pub type Result<T, E = SocialError> = std::result::Result<T, E>;

/// The failure taxonomy of the social core. None of these are retried
/// internally; they are either caller-input errors or reflect current true
/// state. Only [`SocialError::Store`] is worth a caller retry, and a retried
/// `follow` must re-check for an existing edge first.
#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("already following this user")]
    AlreadyFollowing,
    #[error("you cannot follow yourself")]
    SelfFollow,
    #[error("feed is locked")]
    GateLocked,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
