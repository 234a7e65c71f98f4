use std::sync::atomic::{AtomicU64, Ordering};

/// The last nearest-distance measurement, as kept by [`DistanceCache`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestDistance {
    /// Minimum distance from the camera to the cloud, in meters.
    pub distance: f32,
    /// Number of points the minimum was taken over, always non-zero.
    pub num_points: u32,
}

/// A thread-safe single-value cache for the most recent nearest distance.
///
/// Written from the tracking callback on every frame and read on demand from
/// other threads (e.g. a user-triggered announcement). The distance bits and
/// point count are packed into one `AtomicU64`, so a reader can never observe
/// a distance from one frame paired with a count from another. A count of
/// zero encodes "no measurement available".
#[derive(Debug, Default)]
pub struct DistanceCache {
    slot: AtomicU64,
}

impl DistanceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            slot: AtomicU64::new(0),
        }
    }

    /// Overwrite the cached measurement with this frame's result.
    pub fn update(&self, measurement: NearestDistance) {
        self.slot.store(Self::pack(measurement), Ordering::Release);
    }

    /// Drop the cached measurement, for frames with no usable points.
    pub fn clear(&self) {
        self.slot.store(0, Ordering::Release);
    }

    /// Read the most recent measurement, if any.
    pub fn latest(&self) -> Option<NearestDistance> {
        Self::unpack(self.slot.load(Ordering::Acquire))
    }

    fn pack(measurement: NearestDistance) -> u64 {
        ((measurement.distance.to_bits() as u64) << 32) | measurement.num_points as u64
    }

    fn unpack(bits: u64) -> Option<NearestDistance> {
        let num_points = bits as u32;
        if num_points == 0 {
            return None;
        }
        Some(NearestDistance {
            distance: f32::from_bits((bits >> 32) as u32),
            num_points,
        })
    }
}
