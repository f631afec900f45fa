// Library crate for remotefs: re-export internal modules for reuse by the
// binary and integration tests.
pub mod cadapter;
pub mod cli;
pub mod fuse;
pub mod util;
pub mod vfs;
