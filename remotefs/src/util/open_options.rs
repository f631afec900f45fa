use bitflags::bitflags;

// Flags used by the OPEN reply.
/// Bypass page cache for this open file.
const FOPEN_DIRECT_IO: u32 = 1;

/// Don't invalidate the data cache on open.
const FOPEN_KEEP_CACHE: u32 = 2;

bitflags! {
    /// Options controlling how the kernel treats a file opened through the
    /// remote namespace.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenOptions: u32 {
        /// Bypass page cache: every read reaches the remote side and short
        /// reads are passed through unchanged.
        const DIRECT_IO = FOPEN_DIRECT_IO;
        /// Keep cached pages across opens.
        const KEEP_CACHE = FOPEN_KEEP_CACHE;
    }
}

impl OpenOptions {
    /// Reply flags for a file open: page-cached when `kernel_cache` is set,
    /// direct I/O otherwise.
    pub fn for_open(kernel_cache: bool) -> Self {
        if kernel_cache {
            OpenOptions::KEEP_CACHE
        } else {
            OpenOptions::DIRECT_IO
        }
    }
}
