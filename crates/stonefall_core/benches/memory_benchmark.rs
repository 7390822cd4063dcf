//! Arena and pool hot-path benchmarks.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stonefall_core::{Arena, ByteReader, ByteWriter, ObjectPool};

#[derive(Default, Clone, Copy)]
struct Body {
    x: f32,
    y: f32,
    speed: f32,
}

fn bench_arena(c: &mut Criterion) {
    let payload = vec![0xABu8; 4096];
    c.bench_function("arena_copy_4k_x256_then_reset", |b| {
        let mut arena = Arena::new(4096 * 256);
        b.iter(|| {
            for _ in 0..256 {
                black_box(arena.alloc_copy(&payload).ok());
            }
            arena.reset();
        });
    });
}

fn bench_pool(c: &mut Criterion) {
    c.bench_function("pool_acquire_release_1000", |b| {
        let mut pool: ObjectPool<Body> = ObjectPool::with_capacity(1000);
        let mut handles = Vec::with_capacity(1000);
        b.iter(|| {
            for i in 0..1000 {
                let h = pool.acquire();
                if let Some(body) = pool.get_mut(h) {
                    body.x = i as f32;
                    body.speed = 90.0;
                }
                handles.push(h);
            }
            for h in handles.drain(..) {
                pool.release(h);
            }
        });
    });
}

fn bench_codec(c: &mut Criterion) {
    c.bench_function("codec_write_read_1000_bodies", |b| {
        b.iter(|| {
            let mut out = ByteWriter::new();
            for i in 0..1000 {
                let body = Body {
                    x: i as f32,
                    y: 0.5,
                    speed: 80.0,
                };
                out.write_f32(body.x);
                out.write_f32(body.y);
                out.write_f32(body.speed);
            }
            let bytes = out.into_bytes();
            let mut input = ByteReader::new(&bytes);
            let mut sum = 0.0f32;
            while input.remaining() > 0 {
                sum += input.read_f32().unwrap_or_default();
            }
            black_box(sum)
        });
    });
}

criterion_group!(benches, bench_arena, bench_pool, bench_codec);
criterion_main!(benches);
