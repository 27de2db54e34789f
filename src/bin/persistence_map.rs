use bilevel::image::{io, ImageF32};
use bilevel::persistence::persistence;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "persistence_map".to_string());
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", usage(&program));
        return Ok(());
    }
    if args.len() != 3 {
        return Err(usage(&program));
    }
    let input = PathBuf::from(&args[0]);
    let out_plus = PathBuf::from(&args[1]);
    let out_minus = PathBuf::from(&args[2]);

    let gray = io::load_grayscale_image(&input)?;
    let im = ImageF32::from_u8(&gray.as_view());
    let mut inverted = im.clone();
    for v in &mut inverted.data {
        *v = 255.0 - *v;
    }

    // The two maps are independent runs of the same engine.
    let (pm_plus, pm_minus) = rayon::join(|| persistence(&im), || persistence(&inverted));
    let pm_plus = pm_plus.map_err(|e| e.to_string())?;
    let pm_minus = pm_minus.map_err(|e| e.to_string())?;

    io::save_persistence_map(&out_plus, &pm_plus)?;
    io::save_persistence_map(&out_minus, &pm_minus)?;
    Ok(())
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} imgIn.png pm+.png pm-.png\n\n\
Computes the persistence maps of the bilinear interpolant of a grayscale\n\
image: pm+ from the input, pm- from its inversion (255 - input). Maps\n\
are written as 16-bit grayscale PNGs in 8.8 fixed point.\n"
    )
}
