//! Admin authorization seam.
//!
//! The registry's admin "authentication" is a single shared static secret
//! compared by equality — a deliberate simplification, kept behind the
//! [`Authorizer`] trait so a real credential or session system can replace
//! it without touching the role-assignment logic.

use crate::{Error, Result};

/// Capability to approve or reject an admin credential.
pub trait Authorizer: Send + Sync {
  /// `Ok(())` if `credential` grants admin access, otherwise
  /// [`Error::Unauthorized`]. Implementations must not leak which part of
  /// the credential was wrong.
  fn authorize(&self, credential: &str) -> Result<()>;
}

/// Equality check against a secret supplied at process start.
#[derive(Clone)]
pub struct StaticSecret {
  secret: String,
}

impl StaticSecret {
  pub fn new(secret: impl Into<String>) -> Self {
    Self { secret: secret.into() }
  }
}

impl Authorizer for StaticSecret {
  fn authorize(&self, credential: &str) -> Result<()> {
    // An empty credential never authorizes, even against an empty secret.
    if credential.is_empty() || credential != self.secret {
      return Err(Error::Unauthorized);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn correct_secret_authorizes() {
    let auth = StaticSecret::new("hunter2");
    assert!(auth.authorize("hunter2").is_ok());
  }

  #[test]
  fn wrong_secret_is_rejected() {
    let auth = StaticSecret::new("hunter2");
    assert!(matches!(auth.authorize("hunter3"), Err(Error::Unauthorized)));
  }

  #[test]
  fn empty_credential_is_rejected_even_with_empty_secret() {
    let auth = StaticSecret::new("");
    assert!(matches!(auth.authorize(""), Err(Error::Unauthorized)));
  }
}
