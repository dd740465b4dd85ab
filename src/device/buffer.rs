//! Owned typed device allocations

use std::ffi::c_void;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::datatype::Element;

use super::allocator::DeviceAllocator;
use super::error::{DeviceError, DeviceResult};

/// One owned device allocation holding `len` elements of type `T`.
///
/// The buffer frees its memory through the allocator that created it,
/// exactly once, when dropped. Size is fixed at creation.
#[derive(Debug)]
pub struct DeviceBuffer<T: Element> {
    ptr: *mut c_void,
    len: usize,
    allocator: Arc<dyn DeviceAllocator>,
    _marker: PhantomData<T>,
}

// SAFETY: the raw pointer is uniquely owned by this buffer and only the
// buffer (or the allocator it holds) touches it
unsafe impl<T: Element> Send for DeviceBuffer<T> {}
unsafe impl<T: Element> Sync for DeviceBuffer<T> {}

impl<T: Element> DeviceBuffer<T> {
    /// Allocate a buffer of `len` elements.
    pub fn new(len: usize, allocator: Arc<dyn DeviceAllocator>) -> DeviceResult<Self> {
        if len == 0 {
            return Err(DeviceError::InvalidSize(
                "buffer element count cannot be zero".to_string(),
            ));
        }
        let bytes = len * std::mem::size_of::<T>();
        let ptr = allocator.alloc(bytes)?;
        tracing::debug!(
            "DeviceBuffer: allocated {} elements ({} bytes) of {:?}",
            len,
            bytes,
            T::KIND
        );
        Ok(DeviceBuffer {
            ptr,
            len,
            allocator,
            _marker: PhantomData,
        })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.len * std::mem::size_of::<T>()
    }

    /// Raw device pointer for the compute collaborator.
    pub fn as_ptr(&self) -> *const T {
        self.ptr as *const T
    }

    /// Mutable raw device pointer for the compute collaborator.
    pub fn as_mut_ptr(&self) -> *mut T {
        self.ptr as *mut T
    }

    /// Copy `host` into the buffer. `host.len()` must equal the buffer's
    /// element count.
    pub fn upload(&self, host: &[T]) -> DeviceResult<()> {
        if host.len() != self.len {
            return Err(DeviceError::UploadFailed(format!(
                "host slice has {} elements, buffer holds {}",
                host.len(),
                self.len
            )));
        }
        // SAFETY: T is a plain float type with no padding; reinterpreting
        // the slice as bytes is sound
        let bytes = unsafe {
            std::slice::from_raw_parts(host.as_ptr() as *const u8, self.size_bytes())
        };
        self.allocator.upload(self.ptr, bytes)
    }
}

impl<T: Element> Drop for DeviceBuffer<T> {
    fn drop(&mut self) {
        self.allocator.dealloc(self.ptr, self.size_bytes());
    }
}
