use anyhow::Result;
use tracing_subscriber::EnvFilter;

use squat_counter::config::Config;
use squat_counter::counter::{FrameReport, RepCounter};
use squat_counter::session::{report_lines, run_session};
use squat_counter::source::ReplaySource;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load_or_default(CONFIG_PATH)?;

    println!("Squat Rep Counter ({})", env!("GIT_VERSION"));
    println!(
        "Thresholds: squat < {}°, upright >= {}°, min visibility {}",
        config.counter.squat_below, config.counter.upright_from, config.counter.min_visibility
    );
    println!();

    let mut counter = RepCounter::new(&config.counter);

    // 引数: .jsonl なら記録の再生、それ以外は動画ファイル、なしならカメラ
    match std::env::args().nth(1) {
        Some(path) if path.ends_with(".jsonl") => {
            let mut source = ReplaySource::open(&path)?;
            run_session(&mut source, &mut counter, print_report)?;
        }
        video => run_live(config, video, &mut counter)?,
    }

    println!("Total squats: {}", counter.rep_count());
    Ok(())
}

fn print_report(report: &FrameReport) -> Result<()> {
    for line in report_lines(report) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(feature = "desktop")]
fn run_live(mut config: Config, video: Option<String>, counter: &mut RepCounter) -> Result<()> {
    use squat_counter::render::MinifbRenderer;
    use squat_counter::source::{CameraSource, LandmarkSource, Observation};

    if video.is_some() {
        config.camera.video_path = video;
    }

    let mut source = CameraSource::from_config(&config)?;

    if !config.debug.view {
        run_session(&mut source, counter, print_report)?;
        return Ok(());
    }

    let (width, height) = source.resolution();
    let mut renderer = MinifbRenderer::new("Squat Rep Counter", width as usize, height as usize)?;
    println!("Press ESC to exit");

    while renderer.is_open() {
        let Some(observation) = source.next_observation()? else {
            break;
        };
        let report = counter.process(&observation);
        print_report(&report)?;

        if let Some(frame) = source.last_frame() {
            renderer.draw_frame(frame)?;
        }
        if let Observation::Landmarks(pose) = &observation {
            renderer.draw_pose(pose, &report);
        }
        renderer.draw_rep_markers(report.rep_count);
        renderer.update()?;
    }

    Ok(())
}

#[cfg(not(feature = "desktop"))]
fn run_live(_config: Config, _video: Option<String>, _counter: &mut RepCounter) -> Result<()> {
    anyhow::bail!("built without the `desktop` feature; pass a .jsonl landmark recording instead")
}
