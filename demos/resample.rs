use array_img::{
    ArrayImg, Border, Extended, InterpolatorFactory, LinearInterpolatorFactory, RealRandomAccess,
    ScaleTranslate, resample_parallel,
};
use image::{Rgb, RgbImage};
use std::path::PathBuf;

/// A small RGB test card: red ramps along x, green along y, blue checkerboard.
fn test_card(w: usize, h: usize) -> ArrayImg<u8> {
    ArrayImg::from_fn(&[3, w, h], |p| {
        let (c, x, y) = (p[0], p[1] as usize, p[2] as usize);
        match c {
            0 => (255 * x / (w - 1)) as u8,
            1 => (255 * y / (h - 1)) as u8,
            _ => {
                if (x / 8 + y / 8) % 2 == 0 {
                    255
                } else {
                    0
                }
            }
        }
    })
    .unwrap()
}

fn main() {
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("No output path given");
        return;
    }
    let outpath = PathBuf::from(&args[1]);

    let source = test_card(64, 48);
    let extended = Extended::new(&source, Border::Mirror);

    // cxy; zoom in 4x on the middle of the card and leave channels alone
    let transform = ScaleTranslate::try_new(&[1.0, 0.25, 0.25], &[0.0, 8.0, 6.0]).unwrap();
    let mut target = ArrayImg::zeros(&[3, 256, 192]).unwrap();
    resample_parallel(
        &mut target,
        &extended,
        &LinearInterpolatorFactory,
        &transform,
        std::thread::available_parallelism().map_or(1, |n| n.get()),
    )
    .unwrap();

    // spot check against a single interpolator
    let mut interp = LinearInterpolatorFactory.create(&extended);
    interp.set_real_position(&[0.0, 8.0, 6.0]);
    eprintln!("Red at the top-left of the zoomed image: {}", interp.get());

    let buf: RgbImage = target.into_image::<Rgb<u8>>().unwrap();
    eprintln!("Writing {outpath:?}");
    buf.save(&outpath).unwrap();
}
