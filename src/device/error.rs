//! Device allocator error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("device memory allocation failed: {0}")]
    AllocationFailed(String),

    #[error("host-to-device copy failed: {0}")]
    UploadFailed(String),

    #[error("invalid buffer size: {0}")]
    InvalidSize(String),
}

pub type DeviceResult<T> = Result<T, DeviceError>;
