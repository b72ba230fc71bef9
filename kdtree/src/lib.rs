//! K-d tree spatial index with nearest-point and radius queries.
//!
//! The tree partitions D-dimensional points by a splitting axis that cycles
//! with depth. Nearest-point search is branch-and-bound, pruned by the
//! squared distance from the query to the bounding hyperrectangle of the
//! unexplored half-space; radius search walks the tree pruning on the
//! splitting-plane offset alone.
//!
//! Queries return a [`ResultSet`] that borrows the tree, so the borrow
//! checker enforces that results never outlive the index they were drawn
//! from. A shared [`ResultPool`] can recycle result buffers across queries
//! and threads.
//!
//! # Example
//!
//! ```rust
//! use spotfind_kdtree::KdTree;
//!
//! let mut kd = KdTree::new(2);
//! kd.insert(&[1.0, 2.0], 0).unwrap();
//! kd.insert(&[4.0, 0.5], 1).unwrap();
//!
//! let set = kd.nearest(&[4.1, 0.4]).unwrap();
//! assert_eq!(set.item().unwrap().0, 1);
//!
//! let set = kd.range(&[0.0, 0.0], 3.0, true).unwrap();
//! assert_eq!(set.len(), 1);
//! ```

pub mod error;
pub mod hyperrect;
pub mod pool;
pub mod results;
pub mod tree;

pub use error::KdError;
pub use hyperrect::HyperRect;
pub use pool::ResultPool;
pub use results::{Neighbor, ResultSet};
pub use tree::KdTree;
