//! Integration tests for the typed memory pools and the harness facade

use std::sync::Arc;

use half::f16;

use dnnmark::memory::MemoryError;
use dnnmark::{
    DataPool, DeviceAllocator, ElementKind, Harness, PoolRegistry, RunMode, Scalar,
    SystemAllocator, UniformGenerator,
};

fn allocator() -> Arc<dyn DeviceAllocator> {
    Arc::new(SystemAllocator::new())
}

#[test]
fn test_created_chunk_has_requested_element_count() {
    let mut pool = DataPool::<f32>::new(allocator());
    for n in [1usize, 3, 100, 4096] {
        let id = pool.create_data(n).unwrap();
        let buffer = pool.get_data(id).unwrap();
        assert_eq!(buffer.len(), n);
        assert_eq!(buffer.size_bytes(), n * 4);
    }
}

#[test]
fn test_chunk_ids_count_from_zero_per_pool() {
    let mut registry = PoolRegistry::new(allocator());

    // Mixing element types does not disturb either sequence
    assert_eq!(registry.pool_mut::<f32>().create_data(4).unwrap(), 0);
    assert_eq!(registry.pool_mut::<f64>().create_data(4).unwrap(), 0);
    assert_eq!(registry.pool_mut::<f32>().create_data(4).unwrap(), 1);
    assert_eq!(registry.pool_mut::<f16>().create_data(4).unwrap(), 0);
    assert_eq!(registry.pool_mut::<f32>().create_data(4).unwrap(), 2);
    assert_eq!(registry.pool_mut::<f64>().create_data(4).unwrap(), 1);
}

#[test]
fn test_lookup_of_unissued_id_fails() {
    let mut pool = DataPool::<f64>::new(allocator());
    pool.create_data(8).unwrap();

    assert!(pool.get_data(0).is_ok());
    assert!(matches!(pool.get_data(1), Err(MemoryError::ChunkNotFound(1))));
    assert!(matches!(
        pool.get_data(usize::MAX),
        Err(MemoryError::ChunkNotFound(_))
    ));
}

#[test]
fn test_released_id_is_never_reissued() {
    let mut pool = DataPool::<f32>::new(allocator());
    let first = pool.create_data(8).unwrap();
    pool.release(first).unwrap();

    let second = pool.create_data(8).unwrap();
    assert_ne!(first, second);
    assert!(pool.get_data(first).is_err());
}

#[test]
fn test_fill_draws_fresh_uniform_values() {
    let mut pool = DataPool::<f32>::new(allocator());
    let mut generator = UniformGenerator::from_seed(2026);
    let id = pool.create_data(256).unwrap();

    pool.fill(id, &mut generator).unwrap();
    let first: Vec<f32> = {
        let buffer = pool.get_data(id).unwrap();
        unsafe { std::slice::from_raw_parts(buffer.as_ptr(), buffer.len()) }.to_vec()
    };

    pool.fill(id, &mut generator).unwrap();
    let second: Vec<f32> = {
        let buffer = pool.get_data(id).unwrap();
        unsafe { std::slice::from_raw_parts(buffer.as_ptr(), buffer.len()) }.to_vec()
    };

    assert_ne!(first, second, "each fill must redraw values");
    for v in first.iter().chain(second.iter()) {
        assert!((0.0..1.0).contains(v), "uniform values must lie in [0, 1)");
    }
}

#[test]
fn test_fill_requires_existing_chunk() {
    let mut pool = DataPool::<f16>::new(allocator());
    let mut generator = UniformGenerator::from_seed(1);
    assert!(matches!(
        pool.fill(0, &mut generator),
        Err(MemoryError::ChunkNotFound(0))
    ));
}

#[test]
fn test_seeded_fills_are_reproducible() {
    let read = |pool: &DataPool<f64>, id| -> Vec<f64> {
        let buffer = pool.get_data(id).unwrap();
        unsafe { std::slice::from_raw_parts(buffer.as_ptr(), buffer.len()) }.to_vec()
    };

    let mut pool_a = DataPool::<f64>::new(allocator());
    let mut gen_a = UniformGenerator::from_seed(5);
    let id_a = pool_a.create_data(64).unwrap();
    pool_a.fill(id_a, &mut gen_a).unwrap();

    let mut pool_b = DataPool::<f64>::new(allocator());
    let mut gen_b = UniformGenerator::from_seed(5);
    let id_b = pool_b.create_data(64).unwrap();
    pool_b.fill(id_b, &mut gen_b).unwrap();

    assert_eq!(read(&pool_a, id_a), read(&pool_b, id_b));
}

#[test]
fn test_identity_scalars_for_all_element_kinds() {
    for kind in [ElementKind::F16, ElementKind::F32, ElementKind::F64] {
        let one = Scalar::one(kind);
        let zero = Scalar::zero(kind);
        assert_eq!(one.kind(), kind);
        assert_eq!(zero.kind(), kind);
        assert!(!one.as_opaque().is_null());
        assert!(!zero.as_opaque().is_null());
        // The handle is stable: same static value every time
        assert_eq!(one.as_opaque(), Scalar::one(kind).as_opaque());
    }

    let one_f32 = unsafe { *(Scalar::one(ElementKind::F32).as_opaque() as *const f32) };
    assert_eq!(one_f32, 1.0);
    let zero_f64 = unsafe { *(Scalar::zero(ElementKind::F64).as_opaque() as *const f64) };
    assert_eq!(zero_f64, 0.0);
}

#[test]
fn test_harness_end_to_end() {
    let text = "\
[DNNMark]
run_mode = Standalone

# input tensor
[Data]
n = 2
c = 3
h = 8
w = 8

[Convolution]
name = conv1
output_num = 16
kernel_size = 3
pad = 1
stride = 1
";
    let mut harness = Harness::from_config_str(text, allocator())
        .unwrap()
        .with_seed(7);

    assert_eq!(harness.run_mode(), RunMode::Standalone);
    assert_eq!(harness.layers().len(), 2);
    assert!(harness.warnings().is_empty());

    let params = *harness.data_layers().next().unwrap().data_params().unwrap();
    assert_eq!(params.element_count(), 2 * 3 * 8 * 8);

    let chunk_id = harness.prepare_data_chunk::<f32>(&params).unwrap();
    let buffer = harness.pool::<f32>().get_data(chunk_id).unwrap();
    assert_eq!(buffer.len(), params.element_count());

    let conv = harness.conv_layers().next().unwrap().conv_params().unwrap();
    assert_eq!(conv.output_dims(params.h, params.w), Some((8, 8)));
}
