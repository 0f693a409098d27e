/// Implements [`VersionPatch`](crate::VersionPatch) for a struct by
/// delegating to its `patches: PatchSet` field.
#[macro_export]
macro_rules! version_patch {
    ($type:ty) => {
        impl $crate::VersionPatch for $type {
            fn apply(&mut self) -> $crate::Result<()> {
                $crate::VersionPatch::apply(&mut self.patches)
            }

            fn remove(&mut self) -> $crate::Result<()> {
                $crate::VersionPatch::remove(&mut self.patches)
            }
        }
    };
}
