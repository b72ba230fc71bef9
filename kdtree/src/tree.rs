use crate::error::KdError;
use crate::hyperrect::HyperRect;
use crate::pool::ResultPool;
use crate::results::{ResEntry, ResultSet};

/// Squared Euclidean distance between two points of the same dimension.
pub(crate) fn point_dist_sq(a: &[f64], b: &[f64]) -> f64 {
    let mut d = 0.0;
    for i in 0..a.len() {
        d += (a[i] - b[i]) * (a[i] - b[i]);
    }
    d
}

#[derive(Debug)]
pub(crate) struct KdNode {
    pub(crate) pos: Box<[f64]>,
    axis: usize,
    pub(crate) item: usize,
    left: Option<u32>,
    right: Option<u32>,
}

/// KdTree is a binary space-partitioning index over D-dimensional points.
///
/// Points carry a caller-chosen `usize` item identifier, typically an index
/// into parallel attribute arrays; the tree never interprets it. Nodes live
/// in an arena addressed by index and are owned by the tree: [`KdTree::clear`]
/// or dropping the tree releases everything at once.
///
/// The tree is never rebalanced. Pathological insertion orders (sorted
/// input, say) degrade query cost toward linear; random or detector-order
/// input keeps it near logarithmic.
#[derive(Debug)]
pub struct KdTree {
    dim: usize,
    nodes: Vec<KdNode>,
    root: Option<u32>,
    bounds: Option<HyperRect>,
}

impl KdTree {
    /// Create an empty index for `dim`-dimensional points.
    ///
    /// Panics if `dim` is zero.
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "kdtree: dimension must be positive");
        Self {
            dim,
            nodes: Vec::new(),
            root: None,
            bounds: None,
        }
    }

    /// Dimensionality fixed at construction.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no points have been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Minimum enclosing box of all inserted points, if any.
    pub fn bounds(&self) -> Option<&HyperRect> {
        self.bounds.as_ref()
    }

    /// Remove every point, resetting the tree to its freshly created state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.bounds = None;
    }

    pub(crate) fn node(&self, id: u32) -> &KdNode {
        &self.nodes[id as usize]
    }

    /// Insert a point with an item identifier.
    ///
    /// Descends comparing the point against each node's split coordinate:
    /// strictly less goes left, equal or greater goes right. Equal
    /// coordinates therefore always route right; duplicates are stored, not
    /// rejected, and which duplicate a nearest query returns is unspecified.
    /// The split axis cycles with depth, starting at axis 0 for the root.
    ///
    /// Either fully completes (node linked, bounds extended) or returns an
    /// error leaving the tree untouched.
    pub fn insert(&mut self, pos: &[f64], item: usize) -> Result<(), KdError> {
        if pos.len() != self.dim {
            return Err(KdError::DimensionMismatch {
                got: pos.len(),
                want: self.dim,
            });
        }

        let id = self.nodes.len() as u32;
        let axis = match self.root {
            None => 0,
            Some(mut cur) => loop {
                let node = &self.nodes[cur as usize];
                let axis = node.axis;
                let goes_left = pos[axis] < node.pos[axis];
                let child = if goes_left { node.left } else { node.right };
                match child {
                    Some(next) => cur = next,
                    None => {
                        let node = &mut self.nodes[cur as usize];
                        if goes_left {
                            node.left = Some(id);
                        } else {
                            node.right = Some(id);
                        }
                        break (axis + 1) % self.dim;
                    }
                }
            },
        };

        self.nodes.push(KdNode {
            pos: pos.to_vec().into_boxed_slice(),
            axis,
            item,
            left: None,
            right: None,
        });
        if self.root.is_none() {
            self.root = Some(id);
        }

        match &mut self.bounds {
            Some(rect) => rect.extend(pos),
            None => self.bounds = Some(HyperRect::around(pos)),
        }
        Ok(())
    }

    /// Find the single nearest point to `pos`.
    ///
    /// Returns a result set with exactly one entry, or an empty set if the
    /// tree holds no points. Ties by distance resolve to whichever point the
    /// traversal considered first; callers must not rely on which.
    pub fn nearest(&self, pos: &[f64]) -> Result<ResultSet<'_>, KdError> {
        self.nearest_impl(pos, None)
    }

    /// [`KdTree::nearest`] drawing its result buffer from `pool`.
    pub fn nearest_in<'t>(
        &'t self,
        pos: &[f64],
        pool: &'t ResultPool,
    ) -> Result<ResultSet<'t>, KdError> {
        self.nearest_impl(pos, Some(pool))
    }

    fn nearest_impl<'t>(
        &'t self,
        pos: &[f64],
        pool: Option<&'t ResultPool>,
    ) -> Result<ResultSet<'t>, KdError> {
        if pos.len() != self.dim {
            return Err(KdError::DimensionMismatch {
                got: pos.len(),
                want: self.dim,
            });
        }

        let mut entries = match pool {
            Some(p) => p.acquire(),
            None => Vec::new(),
        };

        let (Some(root), Some(bounds)) = (self.root, self.bounds.as_ref()) else {
            return Ok(ResultSet::new(self, entries, pool));
        };

        // First guess is the root; the recursion only ever improves on it.
        let mut best = root;
        let mut best_dist_sq = point_dist_sq(&self.nodes[root as usize].pos, pos);

        // Work on a clone of the bounds so slices can be undone on the way
        // back up.
        let mut rect = bounds.clone();
        self.nearest_rec(root, pos, &mut best, &mut best_dist_sq, &mut rect);

        entries.push(ResEntry {
            node: best,
            dist_sq: best_dist_sq,
        });
        Ok(ResultSet::new(self, entries, pool))
    }

    fn nearest_rec(
        &self,
        id: u32,
        pos: &[f64],
        best: &mut u32,
        best_dist_sq: &mut f64,
        rect: &mut HyperRect,
    ) {
        let node = &self.nodes[id as usize];
        let axis = node.axis;
        let split = node.pos[axis];
        let on_left = pos[axis] - split <= 0.0;
        let (nearer, farther) = if on_left {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(nearer) = nearer {
            // Slice the box down to the nearer half-space, recurse, restore.
            let saved = if on_left {
                std::mem::replace(&mut rect.max[axis], split)
            } else {
                std::mem::replace(&mut rect.min[axis], split)
            };
            self.nearest_rec(nearer, pos, best, best_dist_sq, rect);
            if on_left {
                rect.max[axis] = saved;
            } else {
                rect.min[axis] = saved;
            }
        }

        let dist_sq = point_dist_sq(&node.pos, pos);
        if dist_sq < *best_dist_sq {
            *best = id;
            *best_dist_sq = dist_sq;
        }

        if let Some(farther) = farther {
            let saved = if on_left {
                std::mem::replace(&mut rect.min[axis], split)
            } else {
                std::mem::replace(&mut rect.max[axis], split)
            };
            // Descend only if the farther half-space could still hold a
            // closer point than the best seen so far.
            if rect.dist_sq(pos) < *best_dist_sq {
                self.nearest_rec(farther, pos, best, best_dist_sq, rect);
            }
            if on_left {
                rect.min[axis] = saved;
            } else {
                rect.max[axis] = saved;
            }
        }
    }

    /// Collect every point within Euclidean distance `radius` of `pos`.
    ///
    /// A point exactly at `pos` (the query point itself, when it is indexed)
    /// is included. With `ordered` the entries come back in ascending squared
    /// distance, maintained by linear insertion (O(n) per entry in the
    /// worst case); without it the final order is unspecified.
    pub fn range(&self, pos: &[f64], radius: f64, ordered: bool) -> Result<ResultSet<'_>, KdError> {
        self.range_impl(pos, radius, ordered, None)
    }

    /// [`KdTree::range`] drawing its result buffer from `pool`.
    pub fn range_in<'t>(
        &'t self,
        pos: &[f64],
        radius: f64,
        ordered: bool,
        pool: &'t ResultPool,
    ) -> Result<ResultSet<'t>, KdError> {
        self.range_impl(pos, radius, ordered, Some(pool))
    }

    fn range_impl<'t>(
        &'t self,
        pos: &[f64],
        radius: f64,
        ordered: bool,
        pool: Option<&'t ResultPool>,
    ) -> Result<ResultSet<'t>, KdError> {
        if pos.len() != self.dim {
            return Err(KdError::DimensionMismatch {
                got: pos.len(),
                want: self.dim,
            });
        }

        let mut entries = match pool {
            Some(p) => p.acquire(),
            None => Vec::new(),
        };
        self.range_rec(self.root, pos, radius, ordered, &mut entries);
        Ok(ResultSet::new(self, entries, pool))
    }

    fn range_rec(
        &self,
        id: Option<u32>,
        pos: &[f64],
        radius: f64,
        ordered: bool,
        entries: &mut Vec<ResEntry>,
    ) {
        let Some(id) = id else { return };
        let node = &self.nodes[id as usize];

        let dist_sq = point_dist_sq(&node.pos, pos);
        if dist_sq <= radius * radius {
            let entry = ResEntry { node: id, dist_sq };
            if ordered {
                let at = entries.partition_point(|e| e.dist_sq < dist_sq);
                entries.insert(at, entry);
            } else {
                entries.push(entry);
            }
        }

        let delta = pos[node.axis] - node.pos[node.axis];
        let (nearer, farther) = if delta <= 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        self.range_rec(nearer, pos, radius, ordered, entries);
        // The far side can only contribute if the splitting plane is closer
        // than the radius.
        if delta.abs() < radius {
            self.range_rec(farther, pos, radius, ordered, entries);
        }
    }
}
