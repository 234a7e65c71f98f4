use glam::Vec3;

/// A cloud of raw feature points for a single tracking frame.
///
/// The tracking subsystem produces a fresh cloud on every frame; nothing here
/// outlives the frame it was captured on. Point order carries no meaning and
/// duplicates are allowed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, bincode::Encode, bincode::Decode)]
pub struct FeatureCloud {
    // The detected feature points, one position per point.
    points: Vec<[f32; 3]>,
    // Optional stable identifiers assigned by the tracking subsystem.
    identifiers: Option<Vec<u64>>,
}

impl FeatureCloud {
    /// Create a new feature cloud from points and optional identifiers.
    pub fn new(points: Vec<[f32; 3]>, identifiers: Option<Vec<u64>>) -> Self {
        Self {
            points,
            identifiers,
        }
    }

    /// Create an empty feature cloud, as produced on frames with no detections.
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            identifiers: None,
        }
    }

    /// Get the number of points in the cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the cloud.
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// Get as reference the identifiers of the points, if present.
    pub fn identifiers(&self) -> Option<&[u64]> {
        self.identifiers.as_deref()
    }

    /// Convert a point from [f32; 3] to Vec3.
    fn point_to_vec3(point: &[f32; 3]) -> Vec3 {
        Vec3::new(point[0], point[1], point[2])
    }

    /// Get the minimum bound of the cloud.
    pub fn get_min_bound(&self) -> Vec3 {
        if self.points.is_empty() {
            return Vec3::ZERO;
        }
        self.points()
            .iter()
            .map(Self::point_to_vec3)
            .fold(Self::point_to_vec3(&self.points[0]), |a, b| a.min(b))
    }

    /// Get the maximum bound of the cloud.
    pub fn get_max_bound(&self) -> Vec3 {
        if self.points.is_empty() {
            return Vec3::ZERO;
        }
        self.points()
            .iter()
            .map(Self::point_to_vec3)
            .fold(Self::point_to_vec3(&self.points[0]), |a, b| a.max(b))
    }
}
