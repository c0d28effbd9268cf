pub mod assets;
pub mod grid;
pub mod mesh;
pub mod normals;
pub mod render;
pub mod sampler;
pub mod types;
pub mod wave;

pub use mesh::*;
pub use types::*;
pub use wave::*;

use bevy::prelude::*;

/// Spawns the demo grid surfaces (flat, heightmap, wave) and keeps the
/// wave animated. The host app supplies the camera, lights and clock.
pub struct GridMeshPlugin {
    pub config: types::GridMeshConfig,
}

impl Plugin for GridMeshPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_asset::<assets::ColorRampAsset>()
            .init_asset_loader::<assets::ColorRampAssetLoader>()
            .add_systems(Startup, render::setup_surfaces)
            .add_systems(
                Update,
                (
                    render::finish_heightmap_spawn,
                    render::animate_wave_surfaces,
                    render::draw_normal_overlays,
                ),
            );
    }
}
