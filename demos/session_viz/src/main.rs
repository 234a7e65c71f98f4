use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use argh::FromArgs;

use arpoints::cloud::pointcloud::FeatureCloud;
use arpoints::session::announce::announcement;
use arpoints::session::cache::DistanceCache;
use arpoints::session::frame::{CameraPose, TrackingFrame};
use arpoints::session::replay::FrameLogWriter;
use arpoints::session::status::{LimitedReason, TrackingStatus};
use arpoints::session::tracker::NearestPointTracker;

#[derive(FromArgs)]
/// Simulate an AR tracking session and log it to Rerun
struct Args {
    /// number of feature points in the simulated scene
    #[argh(option, short = 'n', default = "300")]
    num_points: usize,

    /// the tracking frames per second to simulate
    #[argh(option, short = 'f', default = "30")]
    fps: u32,

    /// the duration in seconds to run the session
    #[argh(option, short = 'd')]
    duration: Option<u64>,

    /// record the session frames to this frame log file
    #[argh(option)]
    record: Option<PathBuf>,
}

/// A fixed synthetic scene the simulated camera moves through.
struct SimulatedScene {
    points: Vec<[f32; 3]>,
}

impl SimulatedScene {
    fn new(num_points: usize) -> Self {
        // feature points scattered on the walls of a 6x3x6 room
        let points = (0..num_points)
            .map(|_| {
                let wall = rand::random::<f32>();
                let u = rand::random::<f32>() * 6.0 - 3.0;
                let v = rand::random::<f32>() * 3.0;
                if wall < 0.25 {
                    [u, v, -3.0]
                } else if wall < 0.5 {
                    [u, v, 3.0]
                } else if wall < 0.75 {
                    [-3.0, v, u]
                } else {
                    [3.0, v, u]
                }
            })
            .collect();
        Self { points }
    }

    /// Produce one frame's detections: a jittered subset of the scene, with
    /// the occasional corrupt point the tracker must reject.
    fn capture(&self) -> FeatureCloud {
        let mut points = Vec::with_capacity(self.points.len());
        let mut identifiers = Vec::with_capacity(self.points.len());
        for (i, point) in self.points.iter().enumerate() {
            // detections flicker in and out frame to frame
            if rand::random::<f32>() < 0.3 {
                continue;
            }
            if rand::random::<f32>() < 0.002 {
                points.push([f32::NAN, f32::NAN, f32::NAN]);
            } else {
                points.push([
                    point[0] + (rand::random::<f32>() - 0.5) * 0.01,
                    point[1] + (rand::random::<f32>() - 0.5) * 0.01,
                    point[2] + (rand::random::<f32>() - 0.5) * 0.01,
                ]);
            }
            identifiers.push(i as u64);
        }
        FeatureCloud::new(points, Some(identifiers))
    }

    /// Camera orbit around the room center at head height.
    fn camera_at(&self, t: f32) -> CameraPose {
        let angle = t * 0.3;
        CameraPose::from_position([angle.cos() * 1.5, 1.6, angle.sin() * 1.5])
    }

    fn status_at(&self, frame_index: u64) -> TrackingStatus {
        if frame_index < 30 {
            TrackingStatus::Limited(LimitedReason::Initializing)
        } else {
            TrackingStatus::Normal
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // create a Rerun recording stream
    let rec = rerun::RecordingStreamBuilder::new("ARPoints Session").spawn()?;

    // create a cancel token to stop the session loop
    let cancel_token = Arc::new(AtomicBool::new(false));

    ctrlc::set_handler({
        let cancel_token = cancel_token.clone();
        move || {
            println!("Received Ctrl-C signal. Sending cancel signal !!");
            cancel_token.store(true, Ordering::SeqCst);
        }
    })?;

    // we launch a timer to cancel the token after a certain duration
    std::thread::spawn({
        let cancel_token = cancel_token.clone();
        move || {
            if let Some(duration_secs) = args.duration {
                std::thread::sleep(Duration::from_secs(duration_secs));
                println!("Sending timer cancel signal !!");
                cancel_token.store(true, Ordering::SeqCst);
            }
        }
    });

    let cache = Arc::new(DistanceCache::new());
    let mut tracker = NearestPointTracker::new(cache.clone());

    // stand-in for the voice trigger: announce the cached distance every 3s
    std::thread::spawn({
        let cache = cache.clone();
        let cancel_token = cancel_token.clone();
        move || {
            while !cancel_token.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_secs(3));
                println!("{}", announcement(cache.latest()));
            }
        }
    });

    let mut frame_log = match &args.record {
        Some(path) => Some(FrameLogWriter::create(path)?),
        None => None,
    };

    let scene = SimulatedScene::new(args.num_points);
    let frame_interval = Duration::from_secs_f64(1.0 / args.fps as f64);

    // marker buffer reused across frames instead of reallocating per frame
    let mut markers: Vec<rerun::Position3D> = Vec::new();

    let mut frame_index = 0u64;
    let mut last_status = TrackingStatus::NotAvailable;

    while !cancel_token.load(Ordering::SeqCst) {
        let timestamp = frame_index as f64 / args.fps as f64;
        let frame = TrackingFrame::new(
            scene.capture(),
            scene.camera_at(timestamp as f32),
            scene.status_at(frame_index),
            timestamp,
        );

        let summary = tracker.process_frame(&frame);

        if let Some(writer) = frame_log.as_mut() {
            writer.write_frame(&frame)?;
        }

        if frame.status != last_status {
            let status_text = frame.status.to_string();
            if !status_text.is_empty() {
                println!("{status_text}");
            }
            last_status = frame.status;
        }

        rec.set_time_sequence("frame", frame_index as i64);

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
            rec.log(
                "nearest/num_points",
                &rerun::Scalars::single(result.num_points as f64),
            )?;
        }

        frame_index += 1;
        std::thread::sleep(frame_interval);
    }

    if let Some(writer) = frame_log {
        let num_frames = writer.num_frames();
        writer.finish()?;
        println!("Recorded #{num_frames} frames");
    }

    println!("Processed #{} frames", tracker.num_frames());
    println!("{}", announcement(cache.latest()));

    Ok(())
}
