//! Integration tests for CPU runtime
//!
//! These tests verify the public API of the CPU runtime implementation.

mod common;

use common::create_cpu_client;
use sparselt::prelude::*;
use sparselt::runtime::Allocator;

#[test]
fn test_allocate_deallocate() {
    let device = CpuDevice::new();
    let ptr = CpuRuntime::allocate(1024, &device).unwrap();
    assert_ne!(ptr, 0);
    CpuRuntime::deallocate(ptr, 1024, &device);
}

#[test]
fn test_copy_roundtrip() {
    let device = CpuDevice::new();
    let data: Vec<u8> = vec![1, 2, 3, 4, 5, 6, 7, 8];

    let ptr = CpuRuntime::allocate(data.len(), &device).unwrap();
    CpuRuntime::copy_to_device(&data, ptr, &device).unwrap();

    let mut result = vec![0u8; data.len()];
    CpuRuntime::copy_from_device(ptr, &mut result, &device).unwrap();

    assert_eq!(data, result);

    CpuRuntime::deallocate(ptr, data.len(), &device);
}

#[test]
fn test_zero_allocation() {
    let device = CpuDevice::new();
    let ptr = CpuRuntime::allocate(0, &device).unwrap();
    assert_eq!(ptr, 0);
    CpuRuntime::deallocate(ptr, 0, &device); // Should not panic
}

#[test]
fn test_client_allocator() {
    let (client, _) = create_cpu_client();

    let ptr = client.allocator().allocate(256).unwrap();
    assert_ne!(ptr, 0);
    assert_eq!(client.allocator().allocated_bytes(), 256);
    client.allocator().deallocate(ptr, 256);
    assert_eq!(client.allocator().allocated_bytes(), 0);
}

#[test]
fn test_buffers_release_memory() {
    let (client, _) = create_cpu_client();
    let a = DeviceBuffer::<CpuRuntime>::zeros(&client, 100, DType::F16).unwrap();
    let b = DeviceBuffer::<CpuRuntime>::from_slice(&client, &[1i8; 10]).unwrap();
    assert_eq!(client.allocator().allocated_bytes(), 210);

    drop(a);
    assert_eq!(client.allocator().allocated_bytes(), 10);
    drop(b);
    assert_eq!(client.allocator().allocated_bytes(), 0);
}

#[test]
fn test_streams_are_independent() {
    let (client, _) = create_cpu_client();
    let s1 = client.create_stream().unwrap();
    let s2 = client.create_stream().unwrap();
    assert_ne!(s1.id(), s2.id());
    assert!(s1.device().is_same(s2.device()));
    assert!(s1.synchronize().is_ok());
    assert!(s2.synchronize().is_ok());
}

#[test]
fn test_dedicated_stream_pool() {
    let (client, _) = create_cpu_client();
    let tuned = client.with_parallelism(ParallelismConfig::new(Some(2), None));
    let stream = tuned.create_stream().unwrap();
    assert!(stream.synchronize().is_ok());
    assert_eq!(tuned.handle_id(), client.handle_id());
}

#[test]
fn test_runtime_identity() {
    assert_eq!(CpuRuntime::name(), "cpu");
    assert_eq!(CpuRuntime::default_device().name(), "cpu");
}
