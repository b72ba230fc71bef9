/// Axis-aligned bounding box in D-dimensional space.
///
/// The tree keeps one as the minimum enclosing box of all inserted points.
/// The nearest-point search works on a clone, temporarily slicing it along
/// splitting planes to lower-bound the distance to a subtree.
#[derive(Debug, Clone)]
pub struct HyperRect {
    pub(crate) min: Box<[f64]>,
    pub(crate) max: Box<[f64]>,
}

impl HyperRect {
    /// A degenerate box containing exactly one point.
    pub(crate) fn around(pos: &[f64]) -> Self {
        Self {
            min: pos.to_vec().into_boxed_slice(),
            max: pos.to_vec().into_boxed_slice(),
        }
    }

    /// Grow the box componentwise to include `pos`.
    pub(crate) fn extend(&mut self, pos: &[f64]) {
        for i in 0..pos.len() {
            if pos[i] < self.min[i] {
                self.min[i] = pos[i];
            }
            if pos[i] > self.max[i] {
                self.max[i] = pos[i];
            }
        }
    }

    /// Squared distance from `pos` to the box. Zero if `pos` is inside.
    pub fn dist_sq(&self, pos: &[f64]) -> f64 {
        let mut result = 0.0;
        for i in 0..pos.len() {
            if pos[i] < self.min[i] {
                result += (self.min[i] - pos[i]) * (self.min[i] - pos[i]);
            } else if pos[i] > self.max[i] {
                result += (pos[i] - self.max[i]) * (pos[i] - self.max[i]);
            }
        }
        result
    }

    /// Minimum corner.
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Maximum corner.
    pub fn max(&self) -> &[f64] {
        &self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_is_degenerate() {
        let r = HyperRect::around(&[1.0, -2.0]);
        assert_eq!(r.min(), &[1.0, -2.0]);
        assert_eq!(r.max(), &[1.0, -2.0]);
    }

    #[test]
    fn test_extend() {
        let mut r = HyperRect::around(&[0.0, 0.0]);
        r.extend(&[2.0, -1.0]);
        r.extend(&[-3.0, 4.0]);
        assert_eq!(r.min(), &[-3.0, -1.0]);
        assert_eq!(r.max(), &[2.0, 4.0]);
    }

    #[test]
    fn test_dist_sq_inside_is_zero() {
        let mut r = HyperRect::around(&[0.0, 0.0]);
        r.extend(&[4.0, 4.0]);
        assert_eq!(r.dist_sq(&[2.0, 3.0]), 0.0);
        assert_eq!(r.dist_sq(&[0.0, 4.0]), 0.0);
    }

    #[test]
    fn test_dist_sq_outside() {
        let mut r = HyperRect::around(&[0.0, 0.0]);
        r.extend(&[4.0, 4.0]);
        // 3 to the left of min.x, 4 below min.y: 9 + 16.
        assert_eq!(r.dist_sq(&[-3.0, -4.0]), 25.0);
        // Only the x component is outside.
        assert_eq!(r.dist_sq(&[6.0, 2.0]), 4.0);
    }
}
