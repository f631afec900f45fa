//! Inode table: the transport addresses files by inode number, the adapter by
//! relative name. Root is inode 1 with the empty name.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const ROOT_INO: u64 = 1;

/// Reported in plain readdir entries the kernel has not looked up yet.
pub const UNKNOWN_INO: u64 = 0xffff_ffff;

struct Node {
    name: String,
    // kernel lookup count; the node is dropped when it reaches zero
    nlookup: u64,
}

struct Inner {
    by_ino: HashMap<u64, Node>,
    by_name: HashMap<String, u64>,
    next: u64,
}

pub struct InodeTable {
    inner: Mutex<Inner>,
}

impl Default for InodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative name of `child` inside the directory named `parent`.
pub fn child_name(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}/{child}")
    }
}

/// Name of the directory containing `name`; the root is its own parent.
pub fn parent_name(name: &str) -> &str {
    name.rsplit_once('/').map(|(p, _)| p).unwrap_or("")
}

impl InodeTable {
    pub fn new() -> Self {
        let mut by_ino = HashMap::new();
        let mut by_name = HashMap::new();
        by_ino.insert(
            ROOT_INO,
            Node {
                name: String::new(),
                nlookup: 1,
            },
        );
        by_name.insert(String::new(), ROOT_INO);
        Self {
            inner: Mutex::new(Inner {
                by_ino,
                by_name,
                next: ROOT_INO + 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name_of(&self, ino: u64) -> Option<String> {
        self.lock().by_ino.get(&ino).map(|n| n.name.clone())
    }

    /// Inode already assigned to `name`, if the kernel still holds it.
    pub fn peek(&self, name: &str) -> Option<u64> {
        self.lock().by_name.get(name).copied()
    }

    /// Inode for `name` with its lookup count raised by one, as required for
    /// every entry handed to the kernel by lookup or readdirplus.
    pub fn lookup(&self, name: &str) -> u64 {
        let mut inner = self.lock();
        if let Some(&ino) = inner.by_name.get(name) {
            if let Some(node) = inner.by_ino.get_mut(&ino) {
                node.nlookup += 1;
            }
            return ino;
        }
        let ino = inner.next;
        inner.next += 1;
        inner.by_ino.insert(
            ino,
            Node {
                name: name.to_string(),
                nlookup: 1,
            },
        );
        inner.by_name.insert(name.to_string(), ino);
        ino
    }

    pub fn forget(&self, ino: u64, nlookup: u64) {
        if ino == ROOT_INO {
            return;
        }
        let mut inner = self.lock();
        let Some(node) = inner.by_ino.get_mut(&ino) else {
            return;
        };
        node.nlookup = node.nlookup.saturating_sub(nlookup);
        if node.nlookup == 0 {
            if let Some(node) = inner.by_ino.remove(&ino) {
                inner.by_name.remove(&node.name);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().by_ino.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_parents() {
        assert_eq!(child_name("", "a.txt"), "a.txt");
        assert_eq!(child_name("sub", "b"), "sub/b");
        assert_eq!(parent_name("sub/b"), "sub");
        assert_eq!(parent_name("a.txt"), "");
        assert_eq!(parent_name(""), "");
    }

    #[test]
    fn test_lookup_and_forget() {
        let table = InodeTable::new();
        assert_eq!(table.name_of(ROOT_INO).as_deref(), Some(""));

        let a = table.lookup("a.txt");
        assert_eq!(table.lookup("a.txt"), a);
        assert_eq!(table.name_of(a).as_deref(), Some("a.txt"));

        table.forget(a, 1);
        assert!(table.name_of(a).is_some());
        table.forget(a, 1);
        assert!(table.name_of(a).is_none());

        // a forgotten name gets a fresh inode
        assert_ne!(table.lookup("a.txt"), a);
        table.forget(ROOT_INO, 100);
        assert_eq!(table.name_of(ROOT_INO).as_deref(), Some(""));
    }

    #[test]
    fn test_peek_never_allocates() {
        let table = InodeTable::new();
        assert_eq!(table.peek(""), Some(ROOT_INO));
        assert_eq!(table.peek("a.txt"), None);
        assert_eq!(table.len(), 1);

        let a = table.lookup("a.txt");
        assert_eq!(table.peek("a.txt"), Some(a));
        table.forget(a, 1);
        assert_eq!(table.peek("a.txt"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_concurrent_lookup_and_forget_keep_table_consistent() {
        let table = std::sync::Arc::new(InodeTable::new());
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let table = table.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let ino = table.lookup("a.txt");
                        // our own reference keeps the node alive until forgotten
                        assert_eq!(table.name_of(ino).as_deref(), Some("a.txt"));
                        table.forget(ino, 1);
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        assert_eq!(table.peek("a.txt"), None);
        assert_eq!(table.len(), 1);
    }
}
