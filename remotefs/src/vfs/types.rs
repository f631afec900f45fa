//! Attribute and listing records exchanged between the adapter and the
//! transport.

use std::fmt;

pub const DIR_PERM: u16 = 0o755;
pub const FILE_PERM: u16 = 0o644;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileAttributes {
    pub kind: FileKind,
    pub size: u64,
    pub perm: u16,
}

impl FileAttributes {
    /// Directories carry no meaningful size.
    pub fn directory() -> Self {
        Self {
            kind: FileKind::Directory,
            size: 0,
            perm: DIR_PERM,
        }
    }

    pub fn file(size: u64) -> Self {
        Self {
            kind: FileKind::File,
            size,
            perm: FILE_PERM,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: FileKind,
}

/// Absolute path on the remote side: namespace prefix followed by the
/// kernel-supplied relative name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RemotePath(String);

impl RemotePath {
    pub(crate) fn join(prefix: &str, name: &str) -> Self {
        let mut p = String::with_capacity(prefix.len() + name.len());
        p.push_str(prefix);
        p.push_str(name);
        Self(p)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
