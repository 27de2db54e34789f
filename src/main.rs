use bilevel::image::{fill_border_median, io};
use bilevel::render::{draw_line, line_color, RgbRaster};
use bilevel::{build_tree, extract_level_lines, LineType};
use serde::Serialize;
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
    let program = env::args().next().unwrap_or_else(|| "bilevel".to_string());
    let config = parse_args(&program)?;

    let mut img = io::load_grayscale_image(&config.input_path)?;
    let (w, h) = (img.width(), img.height());
    let border_level = fill_border_median(img.data_mut(), w, h);

    let extraction = extract_level_lines(&img.as_view(), config.zoom as i32 - 1, true)
        .map_err(|e| e.to_string())?;
    let intersections = extraction.row_intersections.unwrap_or_default();
    let tree = build_tree(extraction.lines, intersections);
    println!("{} level lines:", tree.len());

    let zoom = config.zoom as usize;
    let mut stats = [0usize; 4];
    let mut out = RgbRaster::new_filled(w * zoom, h * zoom, [255, 255, 255]);
    for (_, line) in tree.iter() {
        stats[line.kind as usize] += 1;
        draw_line(line, line_color(line.kind), &mut out, config.zoom);
    }
    println!(
        "Min: {}. Max: {}. Saddles: {}.",
        stats[LineType::Min as usize],
        stats[LineType::Max as usize],
        stats[LineType::Saddle as usize]
    );

    io::save_rgb_image(&config.output_path, out.data, out.w, out.h)?;

    if let Some(path) = &config.json_out {
        let summary = ExtractionSummary::build(&tree, w, h, config.zoom, border_level);
        io::write_json_file(path, &summary)?;
        println!("JSON summary written to {}", path.display());
    }

    Ok(())
}

#[derive(Serialize)]
struct LineSummary {
    level: f32,
    kind: LineType,
    points: usize,
    parent: Option<usize>,
}

#[derive(Serialize)]
struct ExtractionSummary {
    width: usize,
    height: usize,
    zoom: u32,
    border_level: u8,
    minima: usize,
    maxima: usize,
    saddles: usize,
    lines: Vec<LineSummary>,
}

impl ExtractionSummary {
    fn build(tree: &bilevel::LLTree, width: usize, height: usize, zoom: u32, border_level: u8) -> Self {
        let mut minima = 0;
        let mut maxima = 0;
        let mut saddles = 0;
        let lines = tree
            .iter()
            .map(|(i, line)| {
                match line.kind {
                    LineType::Min => minima += 1,
                    LineType::Max => maxima += 1,
                    LineType::Saddle => saddles += 1,
                    LineType::Regular => {}
                }
                LineSummary {
                    level: line.level,
                    kind: line.kind,
                    points: line.points.len(),
                    parent: tree.parent(i),
                }
            })
            .collect();
        Self {
            width,
            height,
            zoom,
            border_level,
            minima,
            maxima,
            saddles,
            lines,
        }
    }
}

struct CliConfig {
    input_path: PathBuf,
    output_path: PathBuf,
    zoom: u32,
    json_out: Option<PathBuf>,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut zoom = 1u32;
    let mut json_out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "-z" | "--zoom" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--zoom expects a value\n{}", usage(program)))?;
                zoom = value
                    .parse()
                    .map_err(|_| format!("Invalid zoom '{value}'"))?;
                if zoom < 1 {
                    return Err("The zoom factor must be strictly positive".to_string());
                }
            }
            "--json-out" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--json-out expects a path\n{}", usage(program)))?;
                json_out = Some(PathBuf::from(value));
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'\n{}", usage(program)));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if positional.len() != 2 {
        return Err(usage(program));
    }
    let output_path = positional.pop().expect("two positionals");
    let input_path = positional.pop().expect("two positionals");
    Ok(CliConfig {
        input_path,
        output_path,
        zoom,
        json_out,
    })
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [-z ZOOM] [--json-out summary.json] in.png out.png\n\n\
Extracts the level lines of the bilinear interpolant of a grayscale PNG\n\
and draws them into a color raster: regular lines black, minima blue,\n\
saddles green, maxima red. The image border is first replaced by its\n\
median value.\n\
Options:\n  -z, --zoom N    integral zoom factor of the output (default 1)\n  --json-out P    write a JSON summary of the extracted tree to P\n"
    )
}
