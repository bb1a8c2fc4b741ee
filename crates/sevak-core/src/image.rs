//! The external image-host collaborator.
//!
//! Volunteer photos live in a third-party blob store; the registry only ever
//! holds URLs. Uploads happen before registration and the resulting URL is
//! passed in with the input, so the core's only obligations are the seam
//! itself and releasing images the registry no longer references.

use std::future::Future;

/// A put/delete blob store for volunteer images.
pub trait ImageStore: Send + Sync {
  /// Store `bytes` and return a URL that resolves to them.
  fn upload(
    &self,
    bytes: Vec<u8>,
  ) -> impl Future<Output = crate::Result<String>> + Send;

  /// Release the blob behind `url`. Deleting an unknown URL is not an
  /// error; the store is free to treat it as already gone.
  fn delete(&self, url: &str) -> impl Future<Output = crate::Result<()>> + Send;
}
