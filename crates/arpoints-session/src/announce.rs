use crate::cache::NearestDistance;

/// Format the last cached measurement as spoken text.
///
/// The voice trigger reads the [`DistanceCache`](crate::cache::DistanceCache)
/// on a user action and hands this string to the platform speech synthesizer.
/// A missing measurement gets an explicit phrase, never a placeholder number.
pub fn announcement(latest: Option<NearestDistance>) -> String {
    match latest {
        Some(measurement) => format!(
            "Nearest point is {:.2} meters away, out of {} tracked points.",
            measurement.distance, measurement.num_points
        ),
        None => "No feature points detected yet.".to_string(),
    }
}
