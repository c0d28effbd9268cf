use bevy::prelude::*;

use gridmesh::sampler::NoiseSettings;
use gridmesh::{GridDimensions, GridMeshConfig, GridMeshPlugin, WaveSettings};

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.60, 0.80, 0.95)))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 30.0,
            affects_lightmapped_meshes: false,
        })
        .add_plugins(DefaultPlugins)
        .add_plugins(GridMeshPlugin {
            config: GridMeshConfig {
                flat_grid: GridDimensions::new(32, 32),
                heightmap_path: None,
                heightmap_height_scale: 30.0,
                synth_heightmap: GridDimensions::new(64, 64),
                noise: NoiseSettings {
                    seed: 12345,
                    base_frequency: 0.02,
                    octaves: 4,
                    persistence: 0.5,
                },
                wave_grid: GridDimensions::new(100, 100),
                wave: WaveSettings {
                    period_scale: 4.0,
                    time_scale: 2.0,
                    height_scale: 3.0,
                },
                normal_scale: 0.5,
            },
        })
        .add_systems(Startup, setup_scene)
        .run();
}

fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(30.0, 140.0, 240.0).looking_at(Vec3::new(30.0, 0.0, 50.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 20_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, 0.7, 0.0)),
    ));
}
