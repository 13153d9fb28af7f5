use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing_subscriber::EnvFilter;

use squat_counter::config::Config;
use squat_counter::source::replay::write_observation;
use squat_counter::source::{CameraSource, LandmarkSource, Observation};

const CONFIG_PATH: &str = "config.toml";
const DEFAULT_OUTPUT: &str = "landmarks.jsonl";

/// カメラ（または config の動画）からランドマークを記録する
///
/// 使い方: record_landmarks [出力パス] [最大フレーム数]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let max_frames: Option<u64> = match args.next() {
        Some(n) => Some(n.parse().context("max frames must be a number")?),
        None => None,
    };

    let config = Config::load_or_default(CONFIG_PATH)?;
    let mut source = CameraSource::from_config(&config)?;

    let file = File::create(&output).with_context(|| format!("Failed to create {}", output))?;
    let mut writer = BufWriter::new(file);
    println!("Recording to {}", output);

    let mut frames = 0u64;
    let mut missing = 0u64;
    while max_frames.map_or(true, |max| frames < max) {
        let Some(observation) = source.next_observation()? else {
            break;
        };
        if observation == Observation::NoPerson {
            missing += 1;
        }
        write_observation(&mut writer, &observation)?;
        frames += 1;
    }
    writer.flush()?;

    tracing::info!(frames, missing, "recording finished");
    println!("Recorded {} frames ({} without a person)", frames, missing);
    Ok(())
}
