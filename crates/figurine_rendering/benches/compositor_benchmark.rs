//! Benchmark for the per-actor composite pass.
//!
//! TARGET: 1,000 actors composited well inside one 16ms frame
//!
//! Run with: cargo bench --package figurine_rendering --bench compositor_benchmark

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use figurine_rendering::actor::EquippedItem;
use figurine_rendering::assets::{ApparelDef, ApparelLayer, Graphic};
use figurine_rendering::{
    ActorFrame, ActorRenderer, AssetCatalog, CompositorConfig, DrawList, MaterialId, MeshPool, SharedResources,
    VisualTraits,
};
use figurine_shared::{Facing, Vec2, Vec3};

fn create_shared() -> Arc<SharedResources> {
    let catalog = AssetCatalog::new()
        .with("Bodies/Naked_Male", Graphic::single(MaterialId(1)))
        .with("Heads/Male_Average", Graphic::single(MaterialId(2)))
        .with("Hair/Mop", Graphic::single(MaterialId(3)))
        .with("Apparel/Shirt_Male", Graphic::single(MaterialId(4)))
        .with("Apparel/Pants_Male", Graphic::single(MaterialId(5)))
        .with("Apparel/Duster_Male", Graphic::single(MaterialId(6)))
        .with("Apparel/Helmet", Graphic::single(MaterialId(7)));
    SharedResources::new(CompositorConfig::default(), MeshPool::standard(), Arc::new(catalog))
        .expect("benchmark setup is valid")
}

fn create_frame(seed: u32) -> ActorFrame {
    let apparel = |path: &str, layer| ApparelDef { graphic_path: path.into(), layer, ..ApparelDef::default() };
    let mut frame = ActorFrame {
        stable_variation_seed: seed,
        facing: Facing::ALL[(seed % 4) as usize],
        draw_position: Vec3::new(seed as f32, 0.0, 3.0),
        traits: VisualTraits {
            head_offset: Vec2::new(0.09, 0.34),
            naked_graphic: Some("Bodies/Naked_Male".into()),
            head_graphic: Some("Heads/Male_Average".into()),
            hair_graphic: Some("Hair/Mop".into()),
            apparel: vec![
                apparel("Apparel/Pants", ApparelLayer::OnSkin),
                apparel("Apparel/Shirt", ApparelLayer::Middle),
                apparel("Apparel/Duster", ApparelLayer::Shell),
                apparel("Apparel/Helmet", ApparelLayer::Overhead),
            ],
            ..VisualTraits::default()
        },
        equipment: Some(EquippedItem { material: MaterialId(9), angle_offset: 0.0 }),
        ..ActorFrame::default()
    };
    frame.weapon.drafted = true;
    frame
}

fn benchmark_single_actor(c: &mut Criterion) {
    let frame = create_frame(7);
    let mut renderer = ActorRenderer::new(create_shared(), frame.stable_variation_seed);
    let mut out = DrawList::with_capacity(32);

    c.bench_function("single_actor_composite", |b| {
        b.iter(|| {
            renderer.render_at(black_box(&frame), &mut out);
            black_box(out.len())
        });
    });
}

fn benchmark_thousand_actors(c: &mut Criterion) {
    let shared = create_shared();
    let frames: Vec<_> = (0..1_000).map(create_frame).collect();
    let mut renderers: Vec<_> = frames
        .iter()
        .map(|f| ActorRenderer::new(Arc::clone(&shared), f.stable_variation_seed))
        .collect();
    let mut out = DrawList::with_capacity(32);

    let mut group = c.benchmark_group("thousand_actors");
    group.throughput(Throughput::Elements(1_000));
    group.bench_function("composite", |b| {
        b.iter(|| {
            let mut total = 0;
            for (renderer, frame) in renderers.iter_mut().zip(&frames) {
                renderer.render_at(frame, &mut out);
                total += out.len();
            }
            black_box(total)
        });
    });
    group.bench_function("composite_and_pack", |b| {
        b.iter(|| {
            let mut bytes = 0;
            for (renderer, frame) in renderers.iter_mut().zip(&frames) {
                renderer.render_at(frame, &mut out);
                bytes += bytemuck::cast_slice::<_, u8>(&out.instances()).len();
            }
            black_box(bytes)
        });
    });
    group.finish();
}

fn benchmark_cold_resolve(c: &mut Criterion) {
    let frame = create_frame(3);
    let mut renderer = ActorRenderer::new(create_shared(), frame.stable_variation_seed);
    let mut out = DrawList::with_capacity(32);

    c.bench_function("composite_after_invalidate", |b| {
        b.iter(|| {
            renderer.invalidate_graphics();
            renderer.render_at(black_box(&frame), &mut out);
            black_box(out.len())
        });
    });
}

criterion_group!(benches, benchmark_single_actor, benchmark_thousand_actors, benchmark_cold_resolve);
criterion_main!(benches);
