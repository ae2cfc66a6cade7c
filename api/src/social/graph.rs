//! Follow-relationship management.

use serde::Serialize;

use super::{annotate, AnnotatedUser, PageRequest, Result, SocialError};
use crate::database::Follow;
use crate::store::{SocialStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowStats {
    pub followers: i64,
    pub following: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: AnnotatedUser,
    pub following_count: i64,
}

/// Creates the edge `actor -> target`. The insert itself is the uniqueness
/// check: a concurrent duplicate loses at the constraint and surfaces as
/// [`SocialError::AlreadyFollowing`], so there is no racy pre-check.
pub async fn follow<S: SocialStore + ?Sized>(
    store: &S,
    actor: i64,
    target: i64,
) -> Result<Follow> {
    if actor == target {
        return Err(SocialError::SelfFollow);
    }

    if store.user_by_id(target).await?.is_none() {
        return Err(SocialError::NotFound("user"));
    }

    match store.insert_follow(actor, target).await {
        Ok(edge) => Ok(edge),
        Err(StoreError::UniqueViolation) => Err(SocialError::AlreadyFollowing),
        Err(err) => Err(err.into()),
    }
}

/// Removes the edge `actor -> target`. A second unfollow of the same edge is
/// an error, not a no-op.
pub async fn unfollow<S: SocialStore + ?Sized>(store: &S, actor: i64, target: i64) -> Result<()> {
    if !store.delete_follow(actor, target).await? {
        return Err(SocialError::NotFound("follow"));
    }

    Ok(())
}

/// A page of `subject`'s followers, most recent relationship first, each
/// annotated as seen by `viewer`.
pub async fn followers<S: SocialStore + ?Sized>(
    store: &S,
    subject: i64,
    viewer: i64,
    page: PageRequest,
) -> Result<Vec<AnnotatedUser>> {
    let users = store.followers_of(subject, page.offset(), page.limit()).await?;

    let mut annotated = Vec::with_capacity(users.len());
    for user in &users {
        annotated.push(annotate(store, viewer, user).await?);
    }

    Ok(annotated)
}

/// A page of the users `subject` follows, most recent relationship first,
/// each annotated as seen by `viewer`.
pub async fn following<S: SocialStore + ?Sized>(
    store: &S,
    subject: i64,
    viewer: i64,
    page: PageRequest,
) -> Result<Vec<AnnotatedUser>> {
    let users = store.following_of(subject, page.offset(), page.limit()).await?;

    let mut annotated = Vec::with_capacity(users.len());
    for user in &users {
        annotated.push(annotate(store, viewer, user).await?);
    }

    Ok(annotated)
}

/// Live follower/following counts for `user`.
pub async fn stats<S: SocialStore + ?Sized>(store: &S, user: i64) -> Result<FollowStats> {
    let stats = store.user_stats(user).await?;

    Ok(FollowStats {
        followers: stats.followers,
        following: stats.following,
    })
}

/// `subject`'s profile as seen by `viewer`.
pub async fn profile<S: SocialStore + ?Sized>(
    store: &S,
    viewer: i64,
    subject: i64,
) -> Result<UserProfile> {
    let user = store
        .user_by_id(subject)
        .await?
        .ok_or(SocialError::NotFound("user"))?;

    let stats = store.user_stats(user.id).await?;
    let is_following = store.is_following(viewer, user.id).await?;

    Ok(UserProfile {
        user: AnnotatedUser::new(&user, &stats, is_following),
        following_count: stats.following,
    })
}
