// Constants for the memory simulator

/// Default size of the simulated address space, in bytes
pub const DEFAULT_ADDRESS_SPACE_SIZE: usize = 32;

/// Default page size, in bytes
/// Must evenly divide both the address space and the cache size
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Default cache size, in bytes (three pages)
pub const DEFAULT_CACHE_SIZE: usize = 12;

/// How deep `load` may nest before a script is assumed to include itself
pub const MAX_LOAD_DEPTH: usize = 8;
