use arpoints_cloud::pointcloud::FeatureCloud;
use glam::{Mat4, Vec3};

use crate::status::TrackingStatus;

/// The camera position for one tracking frame.
///
/// A read-only snapshot taken from the view transform the tracking subsystem
/// reports alongside each frame.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, bincode::Encode, bincode::Decode)]
pub struct CameraPose {
    position: [f32; 3],
}

impl CameraPose {
    /// Extract the camera position from a 4x4 column-major view transform.
    pub fn from_transform(transform: &Mat4) -> Self {
        let t = transform.w_axis;
        Self {
            position: [t.x, t.y, t.z],
        }
    }

    /// Create a pose directly from a position.
    pub fn from_position(position: [f32; 3]) -> Self {
        Self { position }
    }

    /// The camera position in the session reference frame.
    #[inline]
    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// The camera position as a glam vector.
    #[inline]
    pub fn position_vec3(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// One discrete update of the tracking session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, bincode::Encode, bincode::Decode)]
pub struct TrackingFrame {
    /// The feature points detected on this frame.
    pub cloud: FeatureCloud,
    /// The camera pose at capture time.
    pub camera: CameraPose,
    /// The session tracking status at capture time.
    pub status: TrackingStatus,
    /// Capture timestamp in seconds since session start.
    pub timestamp: f64,
}

impl TrackingFrame {
    /// Create a new frame snapshot.
    pub fn new(
        cloud: FeatureCloud,
        camera: CameraPose,
        status: TrackingStatus,
        timestamp: f64,
    ) -> Self {
        Self {
            cloud,
            camera,
            status,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_pose_from_transform() {
        let transform = Mat4::from_translation(Vec3::new(1.0, -2.0, 3.5));
        let pose = CameraPose::from_transform(&transform);
        assert_eq!(pose.position(), [1.0, -2.0, 3.5]);
    }

    #[test]
    fn test_camera_pose_ignores_rotation() {
        let transform = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2)
            * Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let pose = CameraPose::from_transform(&transform);
        // translation column only, y is unaffected by a rotation about y
        assert_relative_eq!(pose.position_vec3().y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_tracking_frame_json_roundtrip() {
        let frame = TrackingFrame::new(
            FeatureCloud::new(vec![[0.5, -1.0, 2.0]], Some(vec![7])),
            CameraPose::from_position([0.0, 1.6, 0.0]),
            TrackingStatus::Normal,
            1.5,
        );
        let json = serde_json::to_string(&frame).unwrap();
        let decoded: TrackingFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_tracking_frame() {
        let frame = TrackingFrame::new(
            FeatureCloud::new(vec![[0.0, 0.0, 1.0]], None),
            CameraPose::from_position([0.0, 0.0, 0.0]),
            TrackingStatus::Normal,
            0.033,
        );
        assert_eq!(frame.cloud.len(), 1);
        assert_eq!(frame.status, TrackingStatus::Normal);
    }
}
