use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use em_fields::aggregate::field_at;
use em_fields::enclosure::estimate_enclosed_charge;
use em_fields::math::R3;
use em_fields::shells::{Material, ShellSystem};
use em_fields::sources::*;
use em_fields::surfaces::GaussianSurface;

fn build_scene() -> Vec<FieldSource> {
    let shells = ShellSystem::new(
        vec![0.5, 1.0, 1.5],
        vec![Material::Conductor, Material::Dielectric, Material::Conductor],
        vec![1.0, 3.0, 1.0],
        vec![2.0, 0.0, -1.0],
    );
    vec![
        PointCharge::new(R3::new(1.0, 0.0, 0.0), 1.0).into(),
        FiniteWire::new(R3::new(-1.0, 0.0, 0.0), R3::y(), 2.0, 0.05, 0.5).into(),
        FinitePlane::new(R3::new(0.0, -2.0, 0.0), R3::y(), 3.0, 3.0, 0.2).into(),
        ChargedSphere::solid(R3::new(0.0, 2.0, 0.0), 0.4, 1.0).into(),
        ConcentricShells::spherical(R3::new(3.0, 3.0, 3.0), shells).into(),
    ]
}

fn grid(n: usize) -> Vec<R3> {
    let step = 8.0 / n as f64;
    (0..n * n * n)
        .map(|i| {
            let (x, y, z) = (i % n, (i / n) % n, i / (n * n));
            R3::new(x as f64, y as f64, z as f64) * step - R3::repeat(4.0)
        })
        .collect()
}

fn bench_field_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_grid");
    let sources = build_scene();
    for n in [8usize, 16, 32] {
        let points = grid(n);
        group.bench_function(BenchmarkId::new("mixed_scene", points.len()), |b| {
            b.iter(|| points.iter().map(|p| field_at(&sources, p)).sum::<R3>())
        });
    }
    group.finish();
}

fn bench_enclosure(c: &mut Criterion) {
    let mut group = c.benchmark_group("enclosure");
    let surface = GaussianSurface::sphere(R3::zeros(), 1.0);
    let thin: FieldSource = InfinitePlane::new(R3::new(0.0, 0.0, 0.999), R3::z(), 1.0).into();
    let solid: FieldSource = ChargedSphere::solid(R3::new(0.8, 0.0, 0.0), 0.5, 1.0).into();

    group.bench_function("thin_plane_fine_pass", |b| {
        b.iter_batched(
            || thin.clone(),
            |source| estimate_enclosed_charge(&surface, &source),
            BatchSize::SmallInput,
        )
    });
    group.bench_function("solid_sphere", |b| b.iter(|| estimate_enclosed_charge(&surface, &solid)));
    group.finish();
}

criterion_group!(benches, bench_field_grid, bench_enclosure);
criterion_main!(benches);
