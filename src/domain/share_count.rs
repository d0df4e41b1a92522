//! `ShareCount` newtype

use anyhow::{Result, bail};

/// Number of shares to create (2..=255)
///
/// Every party needs a distinct abscissa in GF(256), and a split needs at
/// least as many parties as the smallest threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShareCount(u8);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u8 = 2;

    /// Maximum valid share count
    pub const MAX: u8 = 255;

    /// Creates a new share count
    ///
    /// # Errors
    /// Returns an error if count is below 2
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blakley::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// let max_count = ShareCount::new(ShareCount::MAX).unwrap();
    /// assert_eq!(*max_count, 255);
    ///
    /// assert!(ShareCount::new(0).is_err());
    /// assert!(ShareCount::new(1).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value < Self::MIN {
            bail!("Share count must be at least {} (got {value})", Self::MIN);
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
