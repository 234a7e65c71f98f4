/// Why the session is tracking with reduced quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, bincode::Encode, bincode::Decode)]
pub enum LimitedReason {
    /// The session has not yet gathered enough data.
    Initializing,
    /// The device is moving too fast for stable tracking.
    ExcessiveMotion,
    /// The visible scene lacks trackable detail.
    InsufficientFeatures,
    /// The session is resuming after an interruption.
    Relocalizing,
}

/// The tracking quality reported by the session for one frame.
///
/// Rendered with `Display` to produce the user-facing status line; a healthy
/// session renders as the empty string so the caller can hide the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, bincode::Encode, bincode::Decode)]
pub enum TrackingStatus {
    /// Tracking is not available.
    NotAvailable,
    /// Tracking runs with reduced quality.
    Limited(LimitedReason),
    /// Tracking is operating normally.
    Normal,
}

impl TrackingStatus {
    /// Check if the session is tracking normally.
    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, TrackingStatus::Normal)
    }
}

impl std::fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingStatus::NotAvailable => write!(f, "Tracking Unavailable"),
            TrackingStatus::Limited(reason) => match reason {
                LimitedReason::Initializing => write!(f, "Limited Tracking: Initializing"),
                LimitedReason::ExcessiveMotion => {
                    write!(f, "Limited Tracking: Excessive Motion Of The Device")
                }
                LimitedReason::InsufficientFeatures => {
                    write!(f, "Limited Tracking: Insufficient Features Visible")
                }
                LimitedReason::Relocalizing => write!(f, "Limited Tracking: Relocalizing"),
            },
            TrackingStatus::Normal => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_renders_empty() {
        assert_eq!(TrackingStatus::Normal.to_string(), "");
        assert!(TrackingStatus::Normal.is_normal());
    }

    #[test]
    fn test_limited_renders_reason() {
        let status = TrackingStatus::Limited(LimitedReason::InsufficientFeatures);
        assert_eq!(
            status.to_string(),
            "Limited Tracking: Insufficient Features Visible"
        );
        assert!(!status.is_normal());
    }

    #[test]
    fn test_not_available() {
        assert_eq!(TrackingStatus::NotAvailable.to_string(), "Tracking Unavailable");
    }
}
