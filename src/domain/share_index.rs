//! `ShareIndex` newtype

use anyhow::{Result, bail};

/// Zero-based position of a share within its split (0..=254)
///
/// At most 255 shares exist, so 255 is never a valid position. The index is
/// a label for humans and for duplicate detection; reconstruction does not
/// depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareIndex(u8);

impl ShareIndex {
    /// Maximum valid share index (254)
    pub const MAX: u8 = 254;

    /// Creates a new share index
    ///
    /// # Errors
    /// Returns an error if index is 255
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blakley::domain::ShareIndex;
    ///
    /// let index = ShareIndex::new(0).unwrap();
    /// assert_eq!(*index, 0);
    ///
    /// let max_index = ShareIndex::new(ShareIndex::MAX).unwrap();
    /// assert_eq!(*max_index, 254);
    ///
    /// assert!(ShareIndex::new(255).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            bail!("Share index {value} out of range (max {})", Self::MAX);
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareIndex {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
