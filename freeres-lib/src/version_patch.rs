use crate::{GamePatch, Result};

/// The patches one game version needs for one feature.
pub trait VersionPatch {
    fn apply(&mut self) -> Result<()>;
    fn remove(&mut self) -> Result<()>;
}

/// Primitives in construction order.
///
/// The regions must not overlap: removal restores them in the same order they
/// were applied, which is only correct when no patch captured another's bytes.
#[derive(Default)]
pub struct PatchSet {
    patches: Vec<GamePatch>,
}

impl PatchSet {
    pub fn new(patches: Vec<GamePatch>) -> Self {
        Self { patches }
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GamePatch> {
        self.patches.iter()
    }
}

impl From<Vec<GamePatch>> for PatchSet {
    fn from(patches: Vec<GamePatch>) -> Self {
        Self::new(patches)
    }
}

impl VersionPatch for PatchSet {
    fn apply(&mut self) -> Result<()> {
        for patch in &mut self.patches {
            patch.apply()?;
        }
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        for patch in &mut self.patches {
            patch.remove()?;
        }
        Ok(())
    }
}
