use cellview::geometry::normalize;
use cellview::grayscale::to_grayscale;
use cellview::image::io::{load_color_image, save_grayscale_f32, save_grayscale_u8};
use cellview::PointTransform;
use std::env;
use std::path::PathBuf;

struct Options {
    input: PathBuf,
    output: PathBuf,
    angle_deg: f32,
    transform: Option<PointTransform>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", usage());
        return Ok(());
    }
    let options = parse_args(&args)?;

    let color = load_color_image(&options.input)?;
    let gray = to_grayscale(&color).map_err(|e| format!("{}: {e}", options.input.display()))?;
    let normalized = normalize(&gray, options.angle_deg);

    match options.transform {
        Some(transform) => {
            save_grayscale_u8(&transform.apply(&normalized), &options.output)?;
            println!(
                "Saved {} of {} to {}",
                transform,
                options.input.display(),
                options.output.display()
            );
        }
        None => {
            save_grayscale_f32(&normalized, &options.output)?;
            println!(
                "Saved normalized {} to {}",
                options.input.display(),
                options.output.display()
            );
        }
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    if args.len() < 2 {
        return Err(usage());
    }
    let mut options = Options {
        input: PathBuf::from(&args[0]),
        output: PathBuf::from(&args[1]),
        angle_deg: 0.0,
        transform: None,
    };

    let mut i = 2;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("--angle", Some(v)) => {
                options.angle_deg = v
                    .parse::<f32>()
                    .map_err(|e| format!("Invalid angle '{v}': {e}"))?;
                if !options.angle_deg.is_finite() {
                    return Err(format!("Angle must be finite, got {v}"));
                }
            }
            ("--transform", Some(v)) if v == "none" => options.transform = None,
            ("--transform", Some(v)) => options.transform = Some(v.parse()?),
            ("--angle" | "--transform", None) => {
                return Err(format!("{} requires a value", args[i]));
            }
            (other, _) => return Err(format!("Unknown option: {other}\n{}", usage())),
        }
        i += 2;
    }
    Ok(options)
}

fn usage() -> String {
    "Usage: point_transform <input> <output.png> [--angle DEG] \
     [--transform contrast|threshold|power|none]"
        .to_string()
}
