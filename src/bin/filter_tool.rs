use edge_detector::config::{load_config, params_from_json};
use edge_detector::image::io::{load_raster, save_raster, write_json_file};
use edge_detector::pipeline::FilterPipeline;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let raster = load_raster(&config.input)?;
    let pipeline = FilterPipeline::with_builtin_filters();
    let spec = pipeline
        .registry()
        .resolve(&config.filter)
        .map_err(|e| e.to_string())?;
    let params = params_from_json(spec.schema(), &config.params).map_err(|e| e.to_string())?;

    let start = Instant::now();
    let output = pipeline
        .run(&config.filter, &raster, &params)
        .map_err(|e| e.to_string())?;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    save_raster(&output, &config.output.image)?;
    println!(
        "Saved {} output to {} ({:.3} ms)",
        config.filter,
        config.output.image.display(),
        latency_ms
    );

    if let Some(summary_path) = &config.output.summary_json {
        let summary = FilterRunSummary {
            filter: config.filter.clone(),
            width: output.width(),
            height: output.height(),
            input_channels: raster.channels(),
            parameters: params
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            latency_ms,
        };
        write_json_file(summary_path, &summary)?;
        println!("Saved run summary to {}", summary_path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: filter_tool <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterRunSummary {
    filter: String,
    width: usize,
    height: usize,
    input_channels: usize,
    parameters: Vec<(String, edge_detector::params::ParamValue)>,
    latency_ms: f64,
}
