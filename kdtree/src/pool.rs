use parking_lot::Mutex;

use crate::results::ResEntry;

/// Free list of recycled result-entry buffers.
///
/// Query-heavy callers issue thousands of short-lived radius queries; a pool
/// lets each query reuse a previously grown buffer instead of allocating a
/// fresh one. Pooling is semantically transparent: queries answered through a
/// pool return exactly the same results as queries that are not.
///
/// The free list is guarded by a mutex, so one pool may be shared by
/// independent trees queried from separate threads.
#[derive(Debug, Default)]
pub struct ResultPool {
    free: Mutex<Vec<Vec<ResEntry>>>,
}

impl ResultPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffers currently parked in the free list.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    pub(crate) fn acquire(&self) -> Vec<ResEntry> {
        self.free.lock().pop().unwrap_or_default()
    }

    pub(crate) fn release(&self, mut buf: Vec<ResEntry>) {
        buf.clear();
        self.free.lock().push(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_empty_pool() {
        let pool = ResultPool::new();
        assert_eq!(pool.idle(), 0);
        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_release_then_acquire_reuses() {
        let pool = ResultPool::new();
        let mut buf = pool.acquire();
        buf.reserve(64);
        let cap = buf.capacity();
        pool.release(buf);
        assert_eq!(pool.idle(), 1);

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
        assert_eq!(pool.idle(), 0);
    }
}
