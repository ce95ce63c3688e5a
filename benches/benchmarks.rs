use array_img::{
    ArrayImg, Border, Cursor, Extended, InterpolatorFactory, LinearInterpolatorFactory,
    NearestNeighborInterpolatorFactory, Positionable, RandomAccess, RealRandomAccess,
    ScaleTranslate, resample, resample_parallel,
};
use criterion::{Criterion, criterion_group, criterion_main};
use faer::rand::{Rng, SeedableRng, rngs::SmallRng};
use std::hint::black_box;

const EXTENTS: [usize; 3] = [64, 64, 32];

fn noise_img() -> ArrayImg<f32> {
    let mut rng = SmallRng::seed_from_u64(1991);
    ArrayImg::from_fn(&EXTENTS, |_| rng.random::<f32>() * 100.0).unwrap()
}

fn real_coords(n_pts: usize) -> Vec<[f64; 3]> {
    let mut rng = SmallRng::seed_from_u64(1991);
    (0..n_pts)
        .map(|_| {
            let mut pt = [0.0; 3];
            for (p, e) in pt.iter_mut().zip(EXTENTS.iter()) {
                *p = rng.random::<f64>() * (*e - 1) as f64;
            }
            pt
        })
        .collect()
}

fn iteration(c: &mut Criterion) {
    let img = noise_img();

    c.bench_function("ArrayCursor[sum]", |b| {
        b.iter(|| {
            let mut cursor = img.cursor();
            let mut total = 0.0f32;
            while let Ok(v) = cursor.next() {
                total += *v;
            }
            black_box(total)
        })
    });

    c.bench_function("ArrayLocalizingCursor[sum]", |b| {
        b.iter(|| {
            let mut cursor = img.localizing_cursor();
            let mut total = 0.0f32;
            while let Ok(v) = cursor.next() {
                total += *v;
            }
            black_box(total)
        })
    });

    c.bench_function("ArrayRandomAccess[raster]", |b| {
        b.iter(|| {
            let mut ra = img.random_access();
            let mut total = 0.0f32;
            for _ in 0..EXTENTS[2] {
                for _ in 0..EXTENTS[1] {
                    for _ in 0..EXTENTS[0] {
                        total += *ra.get();
                        ra.fwd_dim0();
                    }
                    ra.set_position_dim(0, 0);
                    ra.fwd(1);
                }
                ra.set_position_dim(0, 1);
                ra.fwd(2);
            }
            black_box(total)
        })
    });
}

fn interpolation(c: &mut Criterion) {
    let img = noise_img();
    let coords = real_coords(1000);

    c.bench_function("LinearInterpolator[coord]", |b| {
        let mut interp = LinearInterpolatorFactory.create(&img);
        b.iter(|| {
            for pt in coords.iter() {
                interp.set_real_position(pt);
                black_box(interp.get());
            }
        })
    });

    c.bench_function("NearestNeighborInterpolator[coord]", |b| {
        let mut interp = NearestNeighborInterpolatorFactory.create(&img);
        b.iter(|| {
            for pt in coords.iter() {
                interp.set_real_position(pt);
                black_box(interp.get());
            }
        })
    });

    let ext = Extended::new(&img, Border::Mirror);
    c.bench_function("LinearInterpolator[mirror]", |b| {
        let mut interp = LinearInterpolatorFactory.create(&ext);
        b.iter(|| {
            for pt in coords.iter() {
                interp.set_real_position(pt);
                black_box(interp.get());
            }
        })
    });
}

fn resampling(c: &mut Criterion) {
    let img = noise_img();
    let ext = Extended::new(&img, Border::Clamp);
    let transform = ScaleTranslate::try_new(&[0.75, 0.75, 0.5], &[0.3, -0.2, 0.1]).unwrap();
    let mut target = ArrayImg::<f32>::zeros(&EXTENTS).unwrap();

    c.bench_function("resample", |b| {
        let mut interp = LinearInterpolatorFactory.create(&ext);
        b.iter(|| resample(&mut target, &mut interp, &transform).unwrap())
    });

    c.bench_function("resample_parallel[4]", |b| {
        b.iter(|| {
            resample_parallel(&mut target, &ext, &LinearInterpolatorFactory, &transform, 4)
                .unwrap()
        })
    });
}

criterion_group!(benches, iteration, interpolation, resampling);
criterion_main!(benches);
