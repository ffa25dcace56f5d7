//! Descriptor registry: maps blocks to their behavior records.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::trace;

use qmine_world::Block;

use crate::descriptor::BlockDescriptor;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("block tag {0:?} registered twice")]
    DuplicateTag(String),
    #[error("block id {0:?} registered twice")]
    DuplicateBlock(String),
}

/// Registry of block descriptors keyed by block tag or type id. Tags win
/// over ids when both match.
pub struct BlockRegistry {
    tags: HashMap<String, Arc<BlockDescriptor>>,
    blocks: HashMap<String, Arc<BlockDescriptor>>,
    sentinel: Arc<BlockDescriptor>,
    /// Single-entry memo of the last classified type id. Runs hit the
    /// same block type many times in a row.
    cache: Mutex<Option<(String, Arc<BlockDescriptor>)>>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
            blocks: HashMap::new(),
            sentinel: Arc::new(BlockDescriptor::sentinel()),
            cache: Mutex::new(None),
        }
    }

    /// Register a descriptor for every block carrying this tag.
    pub fn register_tag(
        &mut self,
        tag: impl Into<String>,
        descriptor: BlockDescriptor,
    ) -> Result<(), RegistryError> {
        let tag = tag.into();
        if self.tags.contains_key(&tag) {
            return Err(RegistryError::DuplicateTag(tag));
        }
        self.tags.insert(tag, Arc::new(descriptor));
        Ok(())
    }

    /// Register a descriptor for one block type id.
    pub fn register_block(
        &mut self,
        type_id: impl Into<String>,
        descriptor: BlockDescriptor,
    ) -> Result<(), RegistryError> {
        self.register_block_shared(type_id, Arc::new(descriptor))
    }

    /// Register one shared descriptor under several type ids. Families
    /// with many interchangeable members use this.
    pub fn register_blocks(
        &mut self,
        type_ids: &[&str],
        descriptor: BlockDescriptor,
    ) -> Result<(), RegistryError> {
        let shared = Arc::new(descriptor);
        for id in type_ids {
            self.register_block_shared(*id, Arc::clone(&shared))?;
        }
        Ok(())
    }

    fn register_block_shared(
        &mut self,
        type_id: impl Into<String>,
        descriptor: Arc<BlockDescriptor>,
    ) -> Result<(), RegistryError> {
        let type_id = type_id.into();
        if self.blocks.contains_key(&type_id) {
            return Err(RegistryError::DuplicateBlock(type_id));
        }
        self.blocks.insert(type_id, descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.blocks.len() + self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.tags.is_empty()
    }

    /// Look up the descriptor for a block. Total: unknown blocks get the
    /// sentinel, which no tool is suitable for.
    pub fn classify(&self, block: &Block) -> Arc<BlockDescriptor> {
        for tag in block.tags.iter() {
            if let Some(desc) = self.tags.get(tag) {
                return Arc::clone(desc);
            }
        }

        let type_id = block.type_id();
        if let Ok(cache) = self.cache.lock() {
            if let Some((cached_id, desc)) = cache.as_ref() {
                if cached_id == type_id {
                    return Arc::clone(desc);
                }
            }
        }

        let desc = match self.blocks.get(type_id) {
            Some(desc) => Arc::clone(desc),
            None => {
                trace!(type_id, "unclassified block");
                Arc::clone(&self.sentinel)
            }
        };
        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some((type_id.to_string(), Arc::clone(&desc)));
        }
        desc
    }
}
