use kiddo::immutable::float::kdtree::ImmutableKdTree;

use crate::ops::{euclidean_distance, is_finite_point};

/// Result of a nearest-point search over one frame's feature cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPointResult {
    /// Exact minimum Euclidean distance from the query to the cloud.
    pub distance: f32,
    /// Number of finite points the minimum was taken over.
    pub num_points: usize,
    /// Number of points excluded for carrying NaN or infinite coordinates.
    pub num_rejected: usize,
}

/// Find the minimum Euclidean distance from a query position to a set of points.
///
/// Performs a single linear scan with a running minimum. Points with NaN or
/// infinite coordinates are skipped and tallied in `num_rejected`. The
/// returned distance is the exact minimum over the remaining points, not an
/// approximation.
///
/// # Arguments
///
/// * `points` - The feature points to scan, may be empty.
/// * `query` - The query position, expected to be finite.
///
/// # Returns
///
/// `None` if no finite point is available to measure against, otherwise the
/// minimum distance together with the point counts.
///
/// Example:
///
/// ```
/// use arpoints_cloud::nearest::find_nearest_point;
///
/// let points = vec![[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
/// let result = find_nearest_point(&points, &[0.0, 0.0, 0.0]).unwrap();
/// assert_eq!(result.distance, 0.0);
/// assert_eq!(result.num_points, 3);
/// ```
pub fn find_nearest_point(points: &[[f32; 3]], query: &[f32; 3]) -> Option<NearestPointResult> {
    let mut min_distance = f32::INFINITY;
    let mut num_points = 0;
    let mut num_rejected = 0;

    for point in points {
        if !is_finite_point(point) {
            num_rejected += 1;
            continue;
        }
        let distance = euclidean_distance(point, query);
        if distance < min_distance {
            min_distance = distance;
        }
        num_points += 1;
    }

    if num_points == 0 {
        return None;
    }

    Some(NearestPointResult {
        distance: min_distance,
        num_points,
        num_rejected,
    })
}

/// A k-d tree index over one frame's feature points.
///
/// Serves the same contract as [`find_nearest_point`] for callers issuing
/// many queries against a large cloud; building the index costs O(n log n),
/// each query O(log n). Non-finite points are dropped at build time.
pub struct NearestPointIndex {
    tree: Option<ImmutableKdTree<f32, u32, 3, 32>>,
    num_points: usize,
    num_rejected: usize,
}

impl NearestPointIndex {
    /// Build an index from a set of points, dropping non-finite entries.
    pub fn build(points: &[[f32; 3]]) -> Self {
        let finite = points
            .iter()
            .copied()
            .filter(is_finite_point)
            .collect::<Vec<_>>();
        let num_rejected = points.len() - finite.len();
        let tree = if finite.is_empty() {
            None
        } else {
            Some(ImmutableKdTree::new_from_slice(&finite))
        };
        Self {
            tree,
            num_points: finite.len(),
            num_rejected,
        }
    }

    /// Number of finite points held by the index.
    pub fn len(&self) -> usize {
        self.num_points
    }

    /// Check if the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Find the minimum Euclidean distance from a query position to the
    /// indexed points.
    ///
    /// Returns `None` if the index was built from no finite points.
    pub fn nearest(&self, query: &[f32; 3]) -> Option<NearestPointResult> {
        let tree = self.tree.as_ref()?;
        let nn = tree.nearest_one::<kiddo::SquaredEuclidean>(query);
        Some(NearestPointResult {
            distance: nn.distance.sqrt(),
            num_points: self.num_points,
            num_rejected: self.num_rejected,
        })
    }
}
