//! Viewer context for GraphQL operations
//!
//! The dashboard authenticates with HS256 bearer tokens issued by the host
//! application. A missing or invalid token is not an error: the request
//! proceeds as an anonymous viewer, and the visibility policy decides what
//! that viewer can see.

use async_graphql::Context;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::content::sites::Audience;

/// Viewer identity extracted from a verified token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
    pub user_id: String,
    pub email: Option<String>,
}

/// Claims structure for host-issued access tokens
#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    email: Option<String>,
    #[allow(dead_code)]
    exp: i64,
}

/// Verify a JWT token and extract the viewer
pub fn verify_token(token: &str, secret: &str) -> Result<Viewer, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_aud = false;

    let token_data = decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(secret.trim().as_bytes()),
        &validation,
    )?;

    Ok(Viewer {
        user_id: token_data.claims.sub,
        email: token_data.claims.email,
    })
}

/// Extension trait to read the viewer from a GraphQL context
pub trait ViewerExt {
    /// The authenticated viewer, if the request carried a valid token
    fn viewer(&self) -> Option<&Viewer>;

    /// The audience used by the visibility policy
    fn audience(&self) -> Audience<'_>;
}

impl ViewerExt for Context<'_> {
    fn viewer(&self) -> Option<&Viewer> {
        self.data_opt::<Viewer>()
    }

    fn audience(&self) -> Audience<'_> {
        match self.viewer() {
            Some(viewer) => Audience::Registered {
                email: viewer.email.as_deref(),
            },
            None => Audience::Anonymous,
        }
    }
}
