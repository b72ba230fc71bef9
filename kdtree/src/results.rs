use crate::pool::ResultPool;
use crate::tree::KdTree;

/// One collected match inside the node arena.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResEntry {
    pub(crate) node: u32,
    pub(crate) dist_sq: f64,
}

/// Neighbor is a single match read out of a [`ResultSet`].
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'t> {
    /// Item identifier supplied at insertion.
    pub item: usize,

    /// Position of the matched point, borrowed from the tree.
    pub pos: &'t [f64],

    /// Squared Euclidean distance between the query and the matched point.
    pub dist_sq: f64,
}

/// Collection of matches produced by a nearest-point or radius query.
///
/// Entries reference nodes owned by the tree, so a result set borrows the
/// tree it was drawn from: it cannot outlive the tree, and the tree cannot
/// be mutated while any result set from it is alive. Both obligations are
/// enforced at compile time.
///
/// Iteration order is the order entries were collected in (ascending squared
/// distance for ordered radius queries, unspecified otherwise); it is never
/// re-sorted at read time.
#[derive(Debug)]
pub struct ResultSet<'t> {
    tree: &'t KdTree,
    entries: Vec<ResEntry>,
    cursor: usize,
    pool: Option<&'t ResultPool>,
}

impl<'t> ResultSet<'t> {
    pub(crate) fn new(
        tree: &'t KdTree,
        entries: Vec<ResEntry>,
        pool: Option<&'t ResultPool>,
    ) -> Self {
        Self {
            tree,
            entries,
            cursor: 0,
            pool,
        }
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reset the cursor to the first match.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// True once the cursor has moved past the last match.
    pub fn at_end(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// Move the cursor to the next match. Returns false once past the end.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
        !self.at_end()
    }

    /// Item identifier and position of the match under the cursor, or `None`
    /// past the end.
    pub fn item(&self) -> Option<(usize, &'t [f64])> {
        let entry = self.entries.get(self.cursor)?;
        let node = self.tree.node(entry.node);
        Some((node.item, &node.pos))
    }

    /// Squared distance of the match under the cursor, or `None` past the end.
    pub fn dist_sq(&self) -> Option<f64> {
        self.entries.get(self.cursor).map(|e| e.dist_sq)
    }

    /// Iterate over all matches without touching the cursor.
    pub fn iter<'s>(&'s self) -> impl Iterator<Item = Neighbor<'t>> + 's {
        let tree = self.tree;
        self.entries.iter().map(move |e| {
            let node = tree.node(e.node);
            Neighbor {
                item: node.item,
                pos: &node.pos,
                dist_sq: e.dist_sq,
            }
        })
    }
}

impl Drop for ResultSet<'_> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool {
            pool.release(std::mem::take(&mut self.entries));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::KdTree;

    fn three_point_tree() -> KdTree {
        let mut kd = KdTree::new(2);
        kd.insert(&[0.0, 0.0], 0).unwrap();
        kd.insert(&[1.0, 0.0], 1).unwrap();
        kd.insert(&[0.0, 2.0], 2).unwrap();
        kd
    }

    #[test]
    fn test_cursor_protocol() {
        let kd = three_point_tree();
        let mut set = kd.range(&[0.0, 0.0], 5.0, true).unwrap();
        assert_eq!(set.len(), 3);
        assert!(!set.at_end());

        let mut seen = Vec::new();
        while let Some((item, _pos)) = set.item() {
            seen.push(item);
            set.advance();
        }
        assert!(set.at_end());
        assert_eq!(seen, vec![0, 1, 2]);

        // Advancing past the end stays at the end.
        assert!(!set.advance());
        assert!(set.item().is_none());
        assert!(set.dist_sq().is_none());

        set.rewind();
        assert!(!set.at_end());
        assert_eq!(set.item().unwrap().0, 0);
        assert_eq!(set.dist_sq(), Some(0.0));
    }

    #[test]
    fn test_item_reads_position() {
        let kd = three_point_tree();
        let set = kd.range(&[1.0, 0.0], 0.1, false).unwrap();
        assert_eq!(set.len(), 1);
        let (item, pos) = set.item().unwrap();
        assert_eq!(item, 1);
        assert_eq!(pos, &[1.0, 0.0]);
    }

    #[test]
    fn test_iter_does_not_move_cursor() {
        let kd = three_point_tree();
        let set = kd.range(&[0.0, 0.0], 5.0, true).unwrap();
        let items: Vec<usize> = set.iter().map(|n| n.item).collect();
        assert_eq!(items, vec![0, 1, 2]);
        assert_eq!(set.item().unwrap().0, 0);
    }
}
