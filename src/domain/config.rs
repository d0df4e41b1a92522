//! Split configuration

use anyhow::{Result, bail};

use super::{ShareCount, Threshold};

/// Threshold and share count that are known to fit together
///
/// A split with more required shares than created shares could never be
/// recombined, so such a pair cannot be built.
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    threshold: Threshold,
    share_count: ShareCount,
}

impl SplitConfig {
    /// Pairs a threshold with a share count
    ///
    /// # Errors
    /// Returns an error if threshold exceeds share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blakley::domain::{ShareCount, SplitConfig, Threshold};
    ///
    /// let config = SplitConfig::new(Threshold::new(3)?, ShareCount::new(8)?)?;
    /// assert_eq!(config.parts(), 8);
    /// assert_eq!(config.degree(), 3);
    ///
    /// assert!(SplitConfig::new(Threshold::new(5)?, ShareCount::new(3)?).is_err());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(threshold: Threshold, share_count: ShareCount) -> Result<Self> {
        if *threshold > *share_count {
            bail!(
                "Threshold {} cannot exceed share count {}",
                *threshold,
                *share_count
            );
        }
        Ok(Self {
            threshold,
            share_count,
        })
    }

    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }

    /// Number of shares, as the splitter takes it
    #[must_use]
    pub fn parts(&self) -> usize {
        usize::from(*self.share_count)
    }

    /// Dimension of the hyperplane space, equal to the threshold
    #[must_use]
    pub fn degree(&self) -> usize {
        usize::from(*self.threshold)
    }
}
