use freeres_lib::{
    fatal::or_exit, version_patch, BranchType, Error, GameOffset, GamePatch, GameVersion,
    GridLayout, Library, PatchContext, PatchDefinition, PatchSet, Result, VersionPatch,
};

use crate::{
    interception, inventory::global_inventory_grid_layout, props,
    resolution::ingame_resolution_from_id,
};

/// Moves the item grids together with their inventory panels.
pub struct GetGlobalInventoryGridLayout;

impl PatchDefinition for GetGlobalInventoryGridLayout {
    const NAME: &'static str = "get global inventory grid layout";

    fn is_applicable(_ctx: &PatchContext) -> bool {
        true
    }

    fn init_patch(ctx: &PatchContext) -> Result<Box<dyn VersionPatch>> {
        let destination = interception::stubs().get_global_inventory_grid_layout;
        Ok(Box::new(GetGlobalInventoryGridLayoutPatch::new(
            ctx,
            destination,
        )?))
    }
}

pub struct GetGlobalInventoryGridLayoutPatch {
    patches: PatchSet,
}
version_patch!(GetGlobalInventoryGridLayoutPatch);

impl GetGlobalInventoryGridLayoutPatch {
    pub fn new(ctx: &PatchContext, destination: usize) -> Result<Self> {
        let offset = match ctx.game_version {
            GameVersion::V1_09D => 0x8040,
            GameVersion::V1_13C => 0x2B5A0,
            GameVersion::V1_13D => 0x1BC30,
            GameVersion::LodV1_14C => 0x261550,
            GameVersion::LodV1_14D => 0x2633D0,
            version => return Err(Error::unsupported_version(version)),
        };
        let entry = ctx.resolve(GameOffset::new(Library::D2Common, offset))?;
        Ok(Self {
            patches: PatchSet::new(vec![GamePatch::branch(
                entry,
                BranchType::Jump,
                destination,
                5,
            )?]),
        })
    }
}

pub(crate) extern "C" fn on_get_global_inventory_grid_layout(
    record_index: u32,
    _arrange_mode: u32,
    out: *mut GridLayout,
) {
    let props = props();
    let resolution = or_exit(
        ingame_resolution_from_id(props.host.resolution_mode(), &props.config).map_err(Into::into),
    );
    let grid_layout = global_inventory_grid_layout(resolution, |mode| {
        props.host.inventory_grid_layout(record_index, mode as u32)
    });
    unsafe { *out = grid_layout };
}
