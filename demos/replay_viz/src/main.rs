use std::path::PathBuf;
use std::sync::Arc;

use argh::FromArgs;

use arpoints::session::announce::announcement;
use arpoints::session::cache::DistanceCache;
use arpoints::session::replay::read_frame_log_file;
use arpoints::session::tracker::NearestPointTracker;

#[derive(FromArgs)]
/// Replay a recorded frame log and log it to Rerun
struct Args {
    /// path to the frame log file
    #[argh(option)]
    log_path: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let frames = read_frame_log_file(&args.log_path)?;
    println!("Read #{} frames", frames.len());

    // create a Rerun recording stream
    let rec = rerun::RecordingStreamBuilder::new("ARPoints Replay").spawn()?;

    let cache = Arc::new(DistanceCache::new());
    let mut tracker = NearestPointTracker::new(cache.clone());

    let mut markers: Vec<rerun::Position3D> = Vec::new();

    for (i, frame) in frames.iter().enumerate() {
        let summary = tracker.process_frame(frame);

        rec.set_time_sequence("frame", i as i64);

        markers.clear();
        markers.extend(
            frame
                .cloud
                .points()
                .iter()
                .filter(|p| p.iter().all(|c| c.is_finite()))
                .map(|p| rerun::Position3D::new(p[0], p[1], p[2])),
        );
        rec.log(
            "world/points",
            &rerun::Points3D::new(markers.iter().copied())
                .with_colors([rerun::Color::from_rgb(0, 255, 255)])
                .with_radii([0.005]),
        )?;

        let camera = frame.camera.position();
        rec.log(
            "world/camera",
            &rerun::Points3D::new([rerun::Position3D::new(camera[0], camera[1], camera[2])])
                .with_colors([rerun::Color::from_rgb(255, 215, 0)])
                .with_radii([0.05]),
        )?;

        if let Some(result) = summary.result {
            rec.log(
                "nearest/distance",
                &rerun::Scalars::single(result.distance as f64),
            )?;
        }

        let status_text = frame.status.to_string();
        if !status_text.is_empty() {
            log::info!("frame {i}: {status_text}");
        }
    }

    println!("{}", announcement(cache.latest()));

    Ok(())
}
