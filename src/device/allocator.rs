//! Device allocator seam
//!
//! The benchmark core never calls a device runtime directly; it allocates
//! through the [`DeviceAllocator`] trait so the actual device (HIP, CUDA,
//! or plain host memory for tests) is injected by the orchestrator.

use std::alloc::Layout;
use std::ffi::c_void;

use super::error::{DeviceError, DeviceResult};

/// Minimum alignment for device allocations (matches typical GPU
/// requirements for vectorized loads).
pub const DEVICE_ALIGNMENT: usize = 256;

/// Raw allocation primitives exposed by an external device runtime.
///
/// Implementations hand out raw pointers; ownership and exactly-once freeing
/// are enforced by [`DeviceBuffer`](super::DeviceBuffer), which is the only
/// caller of `dealloc`.
pub trait DeviceAllocator: Send + Sync + std::fmt::Debug {
    /// Allocate `bytes` of device memory. Zero-size requests are rejected.
    fn alloc(&self, bytes: usize) -> DeviceResult<*mut c_void>;

    /// Free a pointer previously returned by `alloc` with the same `bytes`.
    fn dealloc(&self, ptr: *mut c_void, bytes: usize);

    /// Copy `src` into device memory starting at `dst`. The destination
    /// allocation must be at least `src.len()` bytes.
    fn upload(&self, dst: *mut c_void, src: &[u8]) -> DeviceResult<()>;
}

/// Host-memory allocator used for tests and CPU-only builds.
///
/// Stands in for a device runtime: allocations come from the system heap
/// with device-grade alignment, and `upload` is a plain memcpy.
#[derive(Debug, Default)]
pub struct SystemAllocator;

impl SystemAllocator {
    pub fn new() -> Self {
        SystemAllocator
    }

    fn layout(bytes: usize) -> DeviceResult<Layout> {
        Layout::from_size_align(bytes, DEVICE_ALIGNMENT)
            .map_err(|e| DeviceError::InvalidSize(e.to_string()))
    }
}

impl DeviceAllocator for SystemAllocator {
    fn alloc(&self, bytes: usize) -> DeviceResult<*mut c_void> {
        if bytes == 0 {
            return Err(DeviceError::InvalidSize(
                "allocation size cannot be zero".to_string(),
            ));
        }

        let layout = Self::layout(bytes)?;
        // SAFETY: layout has non-zero size, checked above
        let ptr = unsafe { std::alloc::alloc_zeroed(layout) };
        if ptr.is_null() {
            tracing::error!("SystemAllocator: allocation of {} bytes failed", bytes);
            return Err(DeviceError::AllocationFailed(format!(
                "system allocator returned null for {} bytes",
                bytes
            )));
        }

        tracing::trace!("SystemAllocator: allocated {} bytes at {:?}", bytes, ptr);
        Ok(ptr as *mut c_void)
    }

    fn dealloc(&self, ptr: *mut c_void, bytes: usize) {
        if ptr.is_null() || bytes == 0 {
            return;
        }
        // Layout construction cannot fail here: alloc() succeeded with it
        if let Ok(layout) = Self::layout(bytes) {
            // SAFETY: ptr was returned by alloc() with this exact layout
            unsafe { std::alloc::dealloc(ptr as *mut u8, layout) };
            tracing::trace!("SystemAllocator: freed {} bytes at {:?}", bytes, ptr);
        }
    }

    fn upload(&self, dst: *mut c_void, src: &[u8]) -> DeviceResult<()> {
        if dst.is_null() {
            return Err(DeviceError::UploadFailed(
                "destination pointer is null".to_string(),
            ));
        }
        // SAFETY: dst points at an allocation of at least src.len() bytes,
        // guaranteed by DeviceBuffer which sizes uploads to the buffer
        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
        Ok(())
    }
}
