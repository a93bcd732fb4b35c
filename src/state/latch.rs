use std::sync::OnceLock;

/// Single-assignment cell for the catalog's total entry count
///
/// The total is unknown until the first page fetch succeeds; the first
/// successful write wins and later writes are ignored. A later page
/// reporting a different total is never reconciled — the first value stays
/// authoritative for short-circuit decisions.
#[derive(Debug, Default)]
pub struct TotalLatch {
    total: OnceLock<u64>,
}

impl TotalLatch {
    /// Creates an unset latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the total; no-op if a value is already latched
    pub fn set(&self, total: u64) {
        let _ = self.total.set(total);
    }

    /// Reads the latched total, or None while still unknown
    pub fn get(&self) -> Option<u64> {
        self.total.get().copied()
    }

    /// True when `page` (1-based) starts at or beyond the latched total
    ///
    /// Returns false while the total is unknown: a page can only be proven
    /// out of range once the catalog size is authoritative.
    pub fn page_out_of_range(&self, page: u32, page_size: u32) -> bool {
        match self.get() {
            Some(total) => u64::from(page.saturating_sub(1)) * u64::from(page_size) >= total,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_wins() {
        let latch = TotalLatch::new();
        assert_eq!(latch.get(), None);

        latch.set(120);
        latch.set(999);
        assert_eq!(latch.get(), Some(120));
    }

    #[test]
    fn test_unknown_total_never_out_of_range() {
        let latch = TotalLatch::new();
        assert!(!latch.page_out_of_range(500, 50));
    }

    #[test]
    fn test_page_range_boundaries() {
        let latch = TotalLatch::new();
        latch.set(120);

        // Pages 1 and 2 cover rows 1-100, page 3 starts at 101 <= 120.
        assert!(!latch.page_out_of_range(1, 50));
        assert!(!latch.page_out_of_range(2, 50));
        assert!(!latch.page_out_of_range(3, 50));
        // Page 4 starts at row 151, beyond 120.
        assert!(latch.page_out_of_range(4, 50));
    }

    #[test]
    fn test_exact_multiple_boundary() {
        let latch = TotalLatch::new();
        latch.set(100);

        assert!(!latch.page_out_of_range(2, 50));
        assert!(latch.page_out_of_range(3, 50));
    }
}
