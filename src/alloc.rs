// SPDX-FileCopyrightText: The midi-defaults authors
// SPDX-License-Identifier: MPL-2.0

//! Fallible heap allocation of scratch buffers

use derive_more::{Deref, DerefMut};

/// Owned, zero-initialized block of memory
#[derive(Debug, Clone, PartialEq, Eq, Deref, DerefMut)]
pub struct Block(Box<[u8]>);

impl Block {
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }
}

/// Allocate a zero-initialized block of `size` bytes.
///
/// Returns `None` instead of aborting if the memory is exhausted.
#[must_use]
pub fn allocate(size: usize) -> Option<Block> {
    let mut buf = Vec::new();
    if let Err(err) = buf.try_reserve_exact(size) {
        log::warn!("Failed to allocate {size} byte(s): {err}");
        return None;
    }
    buf.resize(size, 0);
    Some(Block(buf.into_boxed_slice()))
}

/// Release a block that has been obtained from [`allocate()`].
///
/// Does nothing if there is no block.
pub fn release(block: Option<Block>) {
    let Some(block) = block else {
        return;
    };
    log::trace!("Releasing {size} byte(s)", size = block.size());
    drop(block);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_zeroed_block() {
        let block = allocate(16).unwrap();
        assert_eq!(16, block.size());
        assert!(block.iter().all(|&byte| byte == 0));
        release(Some(block));
    }

    #[test]
    fn allocate_empty_block() {
        let block = allocate(0).unwrap();
        assert!(block.is_empty());
        release(Some(block));
    }

    #[test]
    fn allocation_failure_returns_none() {
        assert!(allocate(usize::MAX).is_none());
    }

    #[test]
    fn write_to_block() {
        let mut block = allocate(4).unwrap();
        block.copy_from_slice(b"midi");
        assert_eq!(b"midi", &block[..]);
        release(Some(block));
    }

    #[test]
    fn release_nothing() {
        release(None);
    }
}
