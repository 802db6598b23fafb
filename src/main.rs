/*

    Probe a set of axis aligned boxes with rays, described
    in a JSON file, and print the results as JSON.

    Usage: aabbprobe <probe>.json [<report>.json]

    @date: Oct, 2025
    @author: Bartu

*/

use std::{env, fs, time::Instant};
use tracing::{info, warn, error};

use fury_aabb::json_parser::parse_probe_json;
use fury_aabb::probe::ProbeScene;

fn main()  -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console, stdout is kept for the report
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Parse args
    let args: Vec<String> = env::args().collect();
    let default_path = String::from("./inputs/probe.json");
    let (json_path, report_path): (&String, Option<&String>) = match args.len() {
        1 => {
            warn!("No arguments were provided, setting default probe path...");
            (&default_path, None)
        }
        2 => (&args[1], None),
        3 => (&args[1], Some(&args[2])),
        _ => {
            error!("Usage: {} <probe>.json [<report>.json]", args[0]);
            std::process::exit(1);
        }
    };

    // Parse JSON
    info!("Loading probe file from {}...", json_path);
    let file = parse_probe_json(json_path).map_err(|e| {
        error!("Failed to load probe file: {}", e);
        e
    })?;
    let scene = ProbeScene::from_file(&file);

    let start = Instant::now();
    let report = scene.run();
    info!("Probe finished in {:.2?}", start.elapsed());

    let json = serde_json::to_string_pretty(&report)?;
    match report_path {
        Some(path) => {
            fs::write(path, json)?;
            info!("Report written to {}", path);
        }
        None => println!("{json}"),
    }

    info!("Finished execution.");
    Ok(())
}
