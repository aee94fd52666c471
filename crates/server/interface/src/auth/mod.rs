//! Token authentication: credential codec and request gate.
//!
//! ## Security
//!
//! - Standard calls carry `Authorization: Bearer <token>`
//! - Upgrade requests carry the token as a `?token=` query parameter
//! - Verification accepts HS256 only; this is a deliberate allow-list
//! - Token validation includes the expiry and not-before window

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CredentialError, JwtCodec, TOKEN_TTL_SECONDS};
pub use middleware::{AuthenticatedUser, require_auth};
