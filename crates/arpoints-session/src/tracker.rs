use std::sync::Arc;

use arpoints_cloud::nearest::{find_nearest_point, NearestPointResult};

use crate::cache::{DistanceCache, NearestDistance};
use crate::frame::TrackingFrame;

/// Summary of one processed tracking frame, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    /// The nearest-point measurement for this frame, if any point was usable.
    pub result: Option<NearestPointResult>,
    /// Index of this frame since the tracker was created.
    pub frame_index: u64,
}

/// The per-frame nearest-point refresh cycle.
///
/// Consumes one [`TrackingFrame`] per tracking callback, computes the minimum
/// camera-to-cloud distance, and publishes it to the shared [`DistanceCache`].
/// The computation is a bounded synchronous scan with no locking, safe to run
/// on the host runtime's frame thread.
pub struct NearestPointTracker {
    cache: Arc<DistanceCache>,
    num_frames: u64,
}

impl NearestPointTracker {
    /// Create a tracker publishing into the given cache.
    pub fn new(cache: Arc<DistanceCache>) -> Self {
        Self {
            cache,
            num_frames: 0,
        }
    }

    /// Process one tracking frame.
    ///
    /// Updates the shared cache with this frame's measurement, or clears it
    /// when the frame carries no usable points, and returns the summary for
    /// display.
    pub fn process_frame(&mut self, frame: &TrackingFrame) -> FrameSummary {
        let result = find_nearest_point(frame.cloud.points(), &frame.camera.position());

        match &result {
            Some(r) => {
                self.cache.update(NearestDistance {
                    distance: r.distance,
                    num_points: r.num_points as u32,
                });
                log::debug!(
                    "frame {}: {} points, nearest {:.3} m ({} rejected)",
                    self.num_frames,
                    r.num_points,
                    r.distance,
                    r.num_rejected
                );
            }
            None => {
                self.cache.clear();
                log::debug!("frame {}: no usable feature points", self.num_frames);
            }
        }

        let summary = FrameSummary {
            result,
            frame_index: self.num_frames,
        };
        self.num_frames += 1;
        summary
    }

    /// Number of frames processed so far.
    pub fn num_frames(&self) -> u64 {
        self.num_frames
    }

    /// The cache this tracker publishes into.
    pub fn cache(&self) -> &Arc<DistanceCache> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CameraPose;
    use crate::status::TrackingStatus;
    use approx::assert_relative_eq;
    use arpoints_cloud::pointcloud::FeatureCloud;

    fn frame_with_points(points: Vec<[f32; 3]>, camera: [f32; 3]) -> TrackingFrame {
        TrackingFrame::new(
            FeatureCloud::new(points, None),
            CameraPose::from_position(camera),
            TrackingStatus::Normal,
            0.0,
        )
    }

    #[test]
    fn test_process_frame_publishes_to_cache() {
        let cache = Arc::new(DistanceCache::new());
        let mut tracker = NearestPointTracker::new(cache.clone());

        let summary =
            tracker.process_frame(&frame_with_points(vec![[0.0, 0.0, 0.0]], [0.0, 0.0, 5.0]));
        assert_relative_eq!(summary.result.unwrap().distance, 5.0);
        assert_eq!(summary.frame_index, 0);

        let cached = cache.latest().unwrap();
        assert_relative_eq!(cached.distance, 5.0);
        assert_eq!(cached.num_points, 1);
    }

    #[test]
    fn test_empty_frame_clears_cache() {
        let cache = Arc::new(DistanceCache::new());
        let mut tracker = NearestPointTracker::new(cache.clone());

        tracker.process_frame(&frame_with_points(vec![[1.0, 1.0, 1.0]], [0.0, 0.0, 0.0]));
        assert!(cache.latest().is_some());

        tracker.process_frame(&frame_with_points(vec![], [0.0, 0.0, 0.0]));
        assert!(cache.latest().is_none());
    }

    #[test]
    fn test_cache_holds_latest_frame_only() {
        let cache = Arc::new(DistanceCache::new());
        let mut tracker = NearestPointTracker::new(cache.clone());

        tracker.process_frame(&frame_with_points(vec![[0.0, 0.0, 3.0]], [0.0, 0.0, 0.0]));
        tracker.process_frame(&frame_with_points(
            vec![[0.0, 0.0, 1.0], [0.0, 2.0, 0.0]],
            [0.0, 0.0, 0.0],
        ));

        let cached = cache.latest().unwrap();
        assert_relative_eq!(cached.distance, 1.0);
        assert_eq!(cached.num_points, 2);
        assert_eq!(tracker.num_frames(), 2);
    }
}
