//! Numeric element types and their representative values
//!
//! The compute collaborators that consume DNNMark's buffers take scaling
//! factors ("the 1.0 and 0.0 for this element type") through a type-erased
//! call boundary. This module provides those identities both as typed
//! constants on the [`Element`] trait and as [`Scalar`] tagged values that
//! can hand out an opaque pointer without per-call-site casts.

use std::ffi::c_void;

use half::f16;
use rand::Rng;

/// Tag identifying a supported element type at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    F16,
    F32,
    F64,
}

impl ElementKind {
    /// Size of one element in bytes.
    pub fn size_of(&self) -> usize {
        match self {
            ElementKind::F16 => std::mem::size_of::<f16>(),
            ElementKind::F32 => std::mem::size_of::<f32>(),
            ElementKind::F64 => std::mem::size_of::<f64>(),
        }
    }
}

/// A numeric element type usable in device buffers.
///
/// Implementations are plain floating-point types; the additive and
/// multiplicative identities are fixed at compile time and never mutated.
pub trait Element: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Additive identity (0)
    const ZERO: Self;
    /// Multiplicative identity (1)
    const ONE: Self;
    /// Runtime tag for this type
    const KIND: ElementKind;

    /// Draw one value from a uniform distribution over [0, 1).
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

impl Element for f16 {
    const ZERO: Self = f16::ZERO;
    const ONE: Self = f16::ONE;
    const KIND: ElementKind = ElementKind::F16;

    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        f16::from_f32(rng.gen::<f32>())
    }
}

impl Element for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const KIND: ElementKind = ElementKind::F32;

    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.gen::<f32>()
    }
}

impl Element for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const KIND: ElementKind = ElementKind::F64;

    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.gen::<f64>()
    }
}

/// A scalar value tagged with its element type.
///
/// Used where the element type is only known at runtime, e.g. when passing
/// alpha/beta scaling factors to a type-erased compute API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    F16(f16),
    F32(f32),
    F64(f64),
}

const ONE_F16: Scalar = Scalar::F16(f16::ONE);
const ONE_F32: Scalar = Scalar::F32(1.0);
const ONE_F64: Scalar = Scalar::F64(1.0);
const ZERO_F16: Scalar = Scalar::F16(f16::ZERO);
const ZERO_F32: Scalar = Scalar::F32(0.0);
const ZERO_F64: Scalar = Scalar::F64(0.0);

impl Scalar {
    /// The multiplicative identity for `kind`, with static lifetime so the
    /// opaque pointer stays valid for the life of the process.
    pub fn one(kind: ElementKind) -> &'static Scalar {
        match kind {
            ElementKind::F16 => &ONE_F16,
            ElementKind::F32 => &ONE_F32,
            ElementKind::F64 => &ONE_F64,
        }
    }

    /// The additive identity for `kind`.
    pub fn zero(kind: ElementKind) -> &'static Scalar {
        match kind {
            ElementKind::F16 => &ZERO_F16,
            ElementKind::F32 => &ZERO_F32,
            ElementKind::F64 => &ZERO_F64,
        }
    }

    /// Runtime tag of the contained value.
    pub fn kind(&self) -> ElementKind {
        match self {
            Scalar::F16(_) => ElementKind::F16,
            Scalar::F32(_) => ElementKind::F32,
            Scalar::F64(_) => ElementKind::F64,
        }
    }

    /// Opaque pointer to the contained value, for type-erased call
    /// boundaries. Valid as long as `self` is.
    pub fn as_opaque(&self) -> *const c_void {
        match self {
            Scalar::F16(v) => v as *const f16 as *const c_void,
            Scalar::F32(v) => v as *const f32 as *const c_void,
            Scalar::F64(v) => v as *const f64 as *const c_void,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Scalar::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::F64(v) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_match_trait_consts() {
        assert_eq!(Scalar::one(ElementKind::F32).as_f32(), Some(f32::ONE));
        assert_eq!(Scalar::zero(ElementKind::F32).as_f32(), Some(f32::ZERO));
        assert_eq!(Scalar::one(ElementKind::F64).as_f64(), Some(f64::ONE));
        assert_eq!(Scalar::zero(ElementKind::F64).as_f64(), Some(f64::ZERO));
        assert_eq!(*Scalar::one(ElementKind::F16), Scalar::F16(f16::ONE));
    }

    #[test]
    fn test_opaque_pointer_is_stable() {
        let a = Scalar::one(ElementKind::F32).as_opaque();
        let b = Scalar::one(ElementKind::F32).as_opaque();
        assert!(!a.is_null());
        assert_eq!(a, b);

        // The pointed-to value really is 1.0f32
        let value = unsafe { *(a as *const f32) };
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_scalar_kind() {
        assert_eq!(Scalar::F16(f16::ONE).kind(), ElementKind::F16);
        assert_eq!(Scalar::F32(1.0).kind(), ElementKind::F32);
        assert_eq!(Scalar::F64(1.0).kind(), ElementKind::F64);
    }

    #[test]
    fn test_element_kind_size() {
        assert_eq!(ElementKind::F16.size_of(), 2);
        assert_eq!(ElementKind::F32.size_of(), 4);
        assert_eq!(ElementKind::F64.size_of(), 8);
    }

    #[test]
    fn test_sample_uniform_in_range() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let v = f32::sample_uniform(&mut rng);
            assert!((0.0..1.0).contains(&v));
            let v = f64::sample_uniform(&mut rng);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
