//! Resolver lookup policy
//!
//! Single-item lookups never surface errors to the client: a bad id, a
//! missing entity, or an invisible course resolves the field to null. Only
//! `allCourses` re-raises after logging; that asymmetry is part of the API
//! contract.

use thiserror::Error;

use super::node_id::IdError;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("malformed id: {0}")]
    MalformedId(#[from] IdError),
    #[error("not found")]
    NotFound,
    #[error("not visible to this viewer")]
    NotVisible,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Map a lookup result to the nullable field it feeds.
///
/// Expected misses are logged at debug; unexpected failures at error with
/// the entity that was being resolved. Neither reaches the client.
pub fn absorb<T>(result: Result<T, LookupError>, entity: &'static str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err @ (LookupError::MalformedId(_) | LookupError::NotFound | LookupError::NotVisible)) => {
            tracing::debug!(entity, error = %err, "Lookup resolved to null");
            None
        }
        Err(LookupError::Internal(err)) => {
            tracing::error!(entity, error = ?err, "Error resolving field");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::node_id::decode_course_id;

    #[test]
    fn absorb_maps_every_failure_to_none() {
        let malformed: Result<(), LookupError> =
            Err(decode_course_id("???").unwrap_err().into());
        assert!(absorb(malformed, "course").is_none());
        assert!(absorb::<()>(Err(LookupError::NotFound), "course").is_none());
        assert!(absorb::<()>(Err(LookupError::NotVisible), "course").is_none());
        assert!(
            absorb::<()>(Err(anyhow::anyhow!("db went away").into()), "course").is_none()
        );
        assert_eq!(absorb(Ok(7), "course"), Some(7));
    }
}
