use std::{iter, sync::LazyLock};

use faer::rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{ArrayImg, Transformation};

pub const SMALL_NUMBER: f64 = 1e-10;
pub static COORDS_3D_1000: LazyLock<Vec<Vec<f64>>> = LazyLock::new(|| make_coords(1000, 3));

pub fn init_logger() {
    #[allow(unused_must_use)]
    env_logger::try_init();
}

fn make_coords(n_pts: usize, ndim: usize) -> Vec<Vec<f64>> {
    let mut rng = SmallRng::seed_from_u64(1991);

    iter::repeat_with(|| {
        iter::repeat_with(|| rng.random::<f64>() * 100.0)
            .take(ndim)
            .collect()
    })
    .take(n_pts)
    .collect()
}

/// An image whose every element holds its own flat offset.
pub fn counting_img(extents: &[usize]) -> ArrayImg<i64> {
    let len = extents.iter().product::<usize>() as i64;
    ArrayImg::from_vec(extents, (0..len).collect()).unwrap()
}

/// Call `f` with every position in `[0, extents)`, dimension 0 fastest.
pub fn for_each_position(extents: &[usize], mut f: impl FnMut(&[isize])) {
    let mut pos = vec![0isize; extents.len()];
    'outer: loop {
        f(&pos[..]);
        for (p, e) in pos.iter_mut().zip(extents.iter()) {
            *p += 1;
            if (*p as usize) < *e {
                continue 'outer;
            }
            *p = 0;
        }
        return;
    }
}

fn transform<T: Transformation>(t: &T, coord: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; t.output_ndim()];
    t.transform_into(coord, &mut out);
    out
}

fn bulk_transform<T: Transformation, C: AsRef<[f64]>>(t: &T, coords: &[C]) -> Vec<Vec<f64>> {
    let refs: Vec<_> = coords.iter().map(|c| c.as_ref()).collect();
    let mut out = vec![vec![f64::NAN; t.output_ndim()]; coords.len()];
    let mut out_refs: Vec<_> = out.iter_mut().map(|b| b.as_mut()).collect();
    t.bulk_transform_into(&refs, &mut out_refs);
    out
}

/// Assert that transforming coordinates in bulk matches transforming them one by one.
pub fn check_transform_bulk<T: Transformation>(t: T) {
    init_logger();
    let coords: &[Vec<f64>] = COORDS_3D_1000.as_ref();

    let results_many = bulk_transform(&t, coords);
    for (orig, many_transformed) in coords.iter().zip(results_many.iter()) {
        let result_single = transform(&t, orig);
        approx::assert_ulps_eq!(
            result_single.as_slice(),
            many_transformed.as_slice(),
            epsilon = SMALL_NUMBER
        );
    }
}

/// Assert that inverting a transformation recovers the original coordinate (more or less).
pub fn check_inverse_transform_coord<T: Transformation>(t: T) {
    init_logger();
    let Some(inv_t) = t.invert() else {
        return;
    };

    let coords: &[Vec<f64>] = COORDS_3D_1000.as_ref();
    let mut transformed = vec![f64::NAN; t.output_ndim()];
    let mut inverted = vec![f64::NAN; inv_t.output_ndim()];
    for pt in coords.iter() {
        t.transform_into(pt, &mut transformed);
        inv_t.transform_into(&transformed, &mut inverted);
        approx::assert_ulps_eq!(pt.as_slice(), inverted.as_slice(), epsilon = SMALL_NUMBER);
    }
}

#[test]
fn positions_in_canonical_order() {
    let mut seen = vec![];
    for_each_position(&[2, 3], |p| seen.push(p.to_vec()));
    assert_eq!(seen.len(), 6);
    assert_eq!(seen[0], [0, 0]);
    assert_eq!(seen[1], [1, 0]);
    assert_eq!(seen[2], [0, 1]);
    assert_eq!(seen[5], [1, 2]);
}
