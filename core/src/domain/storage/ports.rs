use std::future::Future;

use bytes::Bytes;

use crate::domain::common::entities::app_errors::CoreError;

/// Port for the shared folder processed images are written to and served from
#[cfg_attr(test, mockall::automock)]
pub trait ImageStore: Send + Sync {
    /// Write a new file; must fail rather than overwrite an existing one
    fn write(
        &self,
        filename: &str,
        data: Bytes,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Read a file back, `None` when it does not exist
    fn read(&self, filename: &str) -> impl Future<Output = Result<Option<Bytes>, CoreError>> + Send;
}
