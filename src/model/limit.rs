use crate::{Error, Result};
use std::convert::TryFrom;

/// Is the number of rows a query returns and the number of rows it skips first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Limit {
    row_limit: usize,
    offset: usize,
}

impl Limit {
    /// Is the limit of queries that return every row.
    pub const NONE: Limit = Limit {
        row_limit: usize::MAX,
        offset: 0,
    };

    pub const fn new(row_limit: usize, offset: usize) -> Self {
        Self { row_limit, offset }
    }

    #[inline(always)]
    pub fn row_limit(&self) -> usize {
        self.row_limit
    }

    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true if neither the number of rows nor the first row are restricted.
    pub fn is_unlimited(&self) -> bool {
        self.row_limit == usize::MAX && self.offset == 0
    }

    pub fn is_offset(&self) -> bool {
        self.offset > 0
    }

    pub fn has_row_limited(&self) -> bool {
        self.row_limit != usize::MAX
    }

    pub fn is_limited_to_single_row_with_no_offset(&self) -> bool {
        self.row_limit == 1 && self.offset == 0
    }

    pub fn with_row_limit(self, row_limit: usize) -> Self {
        Self { row_limit, ..self }
    }

    pub fn with_offset(self, offset: usize) -> Self {
        Self { offset, ..self }
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<(i64, i64)> for Limit {
    type Error = Error;

    /// Creates a limit from signed values, as produced by query parsers.
    fn try_from((row_limit, offset): (i64, i64)) -> Result<Self> {
        let row_limit =
            usize::try_from(row_limit).map_err(|_| Error::invalid("row_limit", "may not be negative"))?;
        let offset = usize::try_from(offset).map_err(|_| Error::invalid("offset", "may not be negative"))?;
        Ok(Self::new(row_limit, offset))
    }
}

visitable!(Limit);
