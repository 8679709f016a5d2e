//! Batch mask generator
//!
//! Usage:
//!   cargo run --release --bin mask_gen -- <archive.zip|dir> <output_dir> [options]
//!
//! Options:
//!   --config <file>           JSON MaskConfig (fields not given keep defaults)
//!   --snapshot <name>         latest | LineDetector | BuildingDetection | TextboxDetection
//!                             (repeatable, default: all)
//!   --thickness <px>          Stroke thickness in source pixels
//!   --target <HxW>            Output resolution, e.g. 1664x1024
//!   --source-shape            Keep each attachment's own resolution
//!   --separate                One mask per category instead of a composite
//!   --graph-scope <scope>     global | per_attachment
//!   --nearest                 Nearest-neighbour resize
//!   --strict                  Fail an attachment on unknown point ids
//!   --only-vectorized         Skip attachments flagged vectorize=false
//!   --text-class <class>      Text class for the text layer, e.g. red_parcel (repeatable, default: all)
//!   --no-text                 Skip the text box layer

use std::env;

use anyhow::Context;
use sketch_masks::io::{open_source, run_batch, PngDirectorySink, Snapshot};
use sketch_masks::{GraphScope, MaskConfig, OutputMode, PointTolerance, RasterShape, ResizeFilter};

fn print_usage(program: &str) {
    eprintln!("Usage: {} <archive.zip|dir> <output_dir> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file>          JSON mask configuration");
    eprintln!("  --snapshot <name>        latest | LineDetector | BuildingDetection | TextboxDetection (repeatable)");
    eprintln!("  --thickness <px>         Stroke thickness in source pixels (default: 8)");
    eprintln!("  --target <HxW>           Output resolution (default: 1664x1024)");
    eprintln!("  --source-shape           Keep each attachment's own resolution");
    eprintln!("  --separate               One mask per category instead of a composite");
    eprintln!("  --graph-scope <scope>    global | per_attachment (default: global)");
    eprintln!("  --nearest                Nearest-neighbour resize");
    eprintln!("  --strict                 Fail an attachment on unknown point ids");
    eprintln!("  --only-vectorized        Skip attachments flagged vectorize=false");
    eprintln!("  --text-class <class>     Text class for the text layer (repeatable, default: all)");
    eprintln!("  --no-text                Skip the text box layer");
}

fn parse_shape(text: &str) -> anyhow::Result<RasterShape> {
    let (h, w) = text
        .split_once(['x', 'X'])
        .with_context(|| format!("Expected HxW, got '{}'", text))?;
    Ok(RasterShape::new(h.trim().parse()?, w.trim().parse()?))
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> anyhow::Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{} needs a value", flag))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];

    // Config file first so flags override it regardless of order
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(pos) => {
            let path = args.get(pos + 1).context("--config needs a value")?;
            MaskConfig::from_json_file(path).with_context(|| format!("Failed to load config {}", path))?
        }
        None => MaskConfig::default(),
    };
    let mut snapshots: Vec<Snapshot> = Vec::new();

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
            }
            "--snapshot" => {
                let name = next_value(&args, &mut i, "--snapshot")?;
                let snapshot = Snapshot::from_name(name)
                    .with_context(|| format!("Unknown snapshot '{}'", name))?;
                snapshots.push(snapshot);
            }
            "--thickness" => {
                config.stroke_thickness = next_value(&args, &mut i, "--thickness")?.parse()?;
            }
            "--target" => {
                config.target_shape = Some(parse_shape(next_value(&args, &mut i, "--target")?)?);
            }
            "--source-shape" => config.target_shape = None,
            "--separate" => config.output_mode = OutputMode::Separate,
            "--graph-scope" => {
                config.line_graph_scope = match next_value(&args, &mut i, "--graph-scope")? {
                    "global" => GraphScope::Global,
                    "per_attachment" => GraphScope::PerAttachment,
                    other => anyhow::bail!("Unknown graph scope '{}'", other),
                };
            }
            "--nearest" => config.resize_filter = ResizeFilter::Nearest,
            "--strict" => config.tolerate_missing_points = PointTolerance::strict(),
            "--only-vectorized" => config.only_vectorized = true,
            "--text-class" => {
                let class = next_value(&args, &mut i, "--text-class")?;
                config.text_classes.push(class.to_string());
            }
            "--no-text" => config.categories.text = false,
            other => {
                log::warn!("Ignoring unknown option {}", other);
            }
        }
        i += 1;
    }

    if snapshots.is_empty() {
        snapshots = Snapshot::ALL.to_vec();
    }

    let start = std::time::Instant::now();
    let mut source = open_source(input)?;
    let mut sink = PngDirectorySink::new(output);
    let report = run_batch(source.as_mut(), &mut sink, &config, &snapshots)?;

    eprintln!();
    eprintln!("Sketches:     {} ({} failed)", report.sketches, report.sketches_failed);
    eprintln!(
        "Attachments:  {} rendered, {} skipped",
        report.attachments_rendered, report.attachments_skipped
    );
    eprintln!("Masks:        {} written, {} failed", report.masks_written, report.masks_failed);
    eprintln!("Elapsed:      {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
