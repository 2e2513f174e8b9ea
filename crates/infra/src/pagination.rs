/// Limit/offset pair applied to list queries.
///
/// The limit is clamped so a single request cannot pull the whole table.
#[derive(Debug, Clone, Copy)]
pub struct LimitOffset {
    pub limit: i64,
    pub offset: i64,
}

pub const MAX_PAGE_SIZE: i64 = 100;

impl LimitOffset {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: offset.max(0),
        }
    }
}

impl Default for LimitOffset {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_limit_and_offset() {
        let p = LimitOffset::new(10_000, -5);
        assert_eq!(p.limit, MAX_PAGE_SIZE);
        assert_eq!(p.offset, 0);

        let p = LimitOffset::new(0, 20);
        assert_eq!(p.limit, 1);
        assert_eq!(p.offset, 20);
    }

    #[test]
    fn default_is_first_page() {
        let p = LimitOffset::default();
        assert_eq!(p.limit, 50);
        assert_eq!(p.offset, 0);
    }
}
