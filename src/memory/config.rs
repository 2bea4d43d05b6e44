//! Simulator configuration

use crate::interpreter::constants::{
    DEFAULT_ADDRESS_SPACE_SIZE, DEFAULT_CACHE_SIZE, DEFAULT_PAGE_SIZE,
};
use crate::interpreter::errors::SimError;

/// Sizes (in bytes) the three tiers are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    pub address_space_size: usize,
    pub page_size: usize,
    pub cache_size: usize,
    /// Seed for the disk layout; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl MemoryConfig {
    pub fn new(address_space_size: usize, page_size: usize, cache_size: usize) -> Self {
        MemoryConfig {
            address_space_size,
            page_size,
            cache_size,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of pages in the authoritative and disk tiers
    pub fn page_count(&self) -> usize {
        self.address_space_size / self.page_size
    }

    /// Number of pages the cache can hold
    pub fn cache_pages(&self) -> usize {
        self.cache_size / self.page_size
    }

    /// Check that every size lines up with the page size
    pub fn validate(&self) -> Result<(), SimError> {
        if self.page_size == 0 {
            return Err(SimError::invalid_config("page size must be positive"));
        }
        if self.address_space_size == 0 {
            return Err(SimError::invalid_config(
                "address space size must be positive",
            ));
        }
        if self.address_space_size % self.page_size != 0 {
            return Err(SimError::invalid_config(format!(
                "address space size {} is not a multiple of page size {}",
                self.address_space_size, self.page_size
            )));
        }
        if self.cache_size % self.page_size != 0 {
            return Err(SimError::invalid_config(format!(
                "cache size {} is not a multiple of page size {}",
                self.cache_size, self.page_size
            )));
        }
        if self.cache_size > self.address_space_size {
            return Err(SimError::invalid_config(format!(
                "cache size {} exceeds address space size {}",
                self.cache_size, self.address_space_size
            )));
        }
        if self.cache_size < self.page_size {
            return Err(SimError::invalid_config(
                "cache must hold at least one page",
            ));
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADDRESS_SPACE_SIZE,
            DEFAULT_PAGE_SIZE,
            DEFAULT_CACHE_SIZE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MemoryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_count(), 8);
        assert_eq!(config.cache_pages(), 3);
    }

    #[test]
    fn test_rejects_uneven_page_size() {
        let err = MemoryConfig::new(30, 4, 8).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidPageConfiguration { .. }));
    }

    #[test]
    fn test_rejects_bad_cache_sizes() {
        for (cache, reason) in [(6, "not a multiple"), (64, "exceeds"), (0, "at least one")] {
            let err = MemoryConfig::new(32, 4, cache).validate().unwrap_err();
            assert!(
                err.to_string().contains(reason),
                "cache {}: unexpected error {}",
                cache,
                err
            );
        }
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = MemoryConfig::new(32, 0, 0).validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidPageConfiguration { .. }));
    }
}
