use tracing::trace;

use crate::{
    branch::{decode_branch, encode_branch, BranchType, NOP},
    memory, GameAddress, Result,
};

/// One reversible overwrite of game memory.
///
/// The original bytes are captured on construction; nothing is written until
/// [`GamePatch::apply`].
pub struct GamePatch {
    address: GameAddress,
    patch_bytes: Vec<u8>,
    old_bytes: Vec<u8>,
    applied: bool,
}

impl GamePatch {
    pub fn buffer(address: GameAddress, bytes: &[u8]) -> Self {
        let old_bytes = unsafe { memory::read(address.raw(), bytes.len()) };
        Self {
            address,
            patch_bytes: bytes.to_vec(),
            old_bytes,
            applied: false,
        }
    }

    pub fn nop(address: GameAddress, size: usize) -> Self {
        Self::buffer(address, &vec![NOP; size])
    }

    /// Replaces `size` bytes at `address` with a branch to `destination`.
    pub fn branch(
        address: GameAddress,
        branch_type: BranchType,
        destination: usize,
        size: usize,
    ) -> Result<Self> {
        let bytes = encode_branch(address.raw(), branch_type, destination, size)?;
        Ok(Self::buffer(address, &bytes))
    }

    pub fn address(&self) -> GameAddress {
        self.address
    }

    pub fn patch_bytes(&self) -> &[u8] {
        &self.patch_bytes
    }

    pub fn old_bytes(&self) -> &[u8] {
        &self.old_bytes
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Destination of the call or jump this patch overwrites, if any.
    pub fn original_branch_destination(&self) -> Option<usize> {
        decode_branch(self.address.raw(), &self.old_bytes).map(|(_, destination)| destination)
    }

    pub fn apply(&mut self) -> Result<()> {
        debug_assert!(!self.applied, "patch at {} applied twice", self.address);
        unsafe { memory::write(self.address.raw(), &self.patch_bytes) }?;
        self.applied = true;
        trace!("applied {} bytes at {}", self.patch_bytes.len(), self.address);
        Ok(())
    }

    pub fn remove(&mut self) -> Result<()> {
        debug_assert!(self.applied, "patch at {} removed before apply", self.address);
        unsafe { memory::write(self.address.raw(), &self.old_bytes) }?;
        self.applied = false;
        trace!("removed {} bytes at {}", self.old_bytes.len(), self.address);
        Ok(())
    }
}
