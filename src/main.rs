use cellview::config::study::{load_config, StudyConfig};
use cellview::run_study;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = match env::args().nth(1).as_deref() {
        Some("-h" | "--help") => {
            println!("{}", usage());
            return Ok(());
        }
        Some(path) => load_config(Path::new(path))?,
        None => StudyConfig::default(),
    };

    let report = run_study(&config)?;

    println!(
        "Prepared {} of {} samples",
        report.samples_loaded,
        config.samples.len()
    );
    for failure in &report.failures {
        println!(
            "  skipped {}{} ({}): {}",
            failure.cell_type,
            failure.index,
            failure.path.display(),
            failure.error
        );
    }
    for figure in &report.figures {
        println!("Saved '{}' to {}", figure.title, figure.path.display());
    }
    if let Some(path) = &config.output.report_json {
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: cellview [config.json]".to_string()
}
