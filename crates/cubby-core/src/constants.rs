//! Shared defaults for the gateway.

/// Default expiry for presigned URLs, in seconds.
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 900;

/// Default capacity of each existence-cache map (buckets, objects).
pub const DEFAULT_EXISTENCE_CACHE_CAPACITY: usize = 10_000;

/// Default cap on uploaded request bodies, in bytes.
pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 100 * 1024 * 1024;
