use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use glam::Vec3;

use crate::assets::ColorRampAsset;
use crate::mesh::{GridMeshData, build_grid_mesh};
use crate::normals::face_normals;
use crate::sampler::{FlatSampler, HeightMapSampler, HeightSampler, NoiseSampler, luminance_srgb};
use crate::types::{GridDimensions, GridMeshConfig};
use crate::wave::WaveField;

/// A spawned grid surface, keeping the CPU-side buffers alongside the
/// uploaded mesh so debug overlays can read them back.
#[derive(Component)]
pub struct GridSurface {
    pub data: GridMeshData,
}

#[derive(Component)]
pub struct WaveSurface {
    field: WaveField,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalOverlayMode {
    PerVertex,
    PerFace,
}

/// Draws normal rays for the surface this is attached to.
#[derive(Component, Clone, Copy, Debug)]
pub struct NormalOverlay {
    pub mode: NormalOverlayMode,
    pub scale: f32,
}

/// Handles polled until the heightmap image and the color ramp are both
/// loaded, then removed.
#[derive(Resource)]
pub(crate) struct HeightmapPending {
    image: Handle<Image>,
    ramp: Handle<ColorRampAsset>,
}

pub fn setup_surfaces(
    mut commands: Commands,
    config: Res<GridMeshConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    asset_server: Res<AssetServer>,
) {
    let gap = 8.0;

    // Flat reference grid with a per-vertex normal overlay.
    let flat = build_grid_mesh(config.flat_grid, &FlatSampler::default(), 1.0, None);
    let flat_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.45, 0.50),
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(mesh_from_grid_mesh(&flat))),
        MeshMaterial3d(flat_material),
        Transform::default(),
        GridSurface { data: flat },
        NormalOverlay {
            mode: NormalOverlayMode::PerVertex,
            scale: config.normal_scale,
        },
    ));

    // Animated wave grid. The first tick fixes the topology; later ticks
    // only rewrite heights and normals.
    let mut field = WaveField::new(config.wave_grid, config.wave);
    let data = field.tick(0.0).clone();
    let wave_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.10, 0.25, 0.80),
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(mesh_from_grid_mesh(&data))),
        MeshMaterial3d(wave_material),
        Transform::from_translation(Vec3::new(
            -(config.wave_grid.width as f32 + gap),
            0.0,
            0.0,
        )),
        GridSurface { data },
        WaveSurface { field },
    ));

    // Vertex-colored heightmap surface; spawned by finish_heightmap_spawn
    // once the image and ramp assets are in.
    let image = match &config.heightmap_path {
        Some(path) => asset_server.load(path.clone()),
        None => images.add(make_heightmap_image(
            &NoiseSampler::new(config.noise),
            config.synth_heightmap,
        )),
    };
    let ramp = asset_server.load("ramp.ron");
    commands.insert_resource(HeightmapPending { image, ramp });
}

pub fn finish_heightmap_spawn(
    mut commands: Commands,
    pending: Option<Res<HeightmapPending>>,
    config: Res<GridMeshConfig>,
    images: Res<Assets<Image>>,
    ramps: Res<Assets<ColorRampAsset>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(pending) = pending else {
        return;
    };
    let (Some(image), Some(ramp)) = (images.get(&pending.image), ramps.get(&pending.ramp)) else {
        return;
    };

    commands.remove_resource::<HeightmapPending>();

    let Some(sampler) = sampler_from_image(image) else {
        warn!("heightmap image has no readable pixel data, skipping surface");
        return;
    };

    let dims = sampler.dimensions();
    if dims.cell_count() == 0 {
        warn!(
            "heightmap image is {}x{}, too small for any triangles",
            dims.width, dims.length
        );
    }

    let data = build_grid_mesh(dims, &sampler, config.heightmap_height_scale, Some(&ramp.0));
    info!(
        "heightmap surface: {}x{} grid, {} vertices, {} triangles",
        dims.width,
        dims.length,
        data.vertex_count(),
        data.triangle_count()
    );

    let material = materials.add(StandardMaterial {
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(mesh_from_grid_mesh(&data))),
        MeshMaterial3d(material),
        Transform::from_translation(Vec3::new(config.flat_grid.width as f32 + 8.0, 0.0, 0.0)),
        GridSurface { data },
        NormalOverlay {
            mode: NormalOverlayMode::PerFace,
            scale: config.normal_scale,
        },
    ));
}

/// Rewrites each wave surface's heights and normals from the app clock.
/// Only POSITION and NORMAL are touched; the index buffer set at spawn
/// time stays as it is.
pub fn animate_wave_surfaces(
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surfaces: Query<(&mut WaveSurface, &mut GridSurface, &Mesh3d)>,
) {
    let t = time.elapsed_secs();

    for (mut wave, mut surface, mesh_handle) in &mut surfaces {
        let data = wave.field.tick(t);

        surface.data.positions.clone_from(&data.positions);
        surface.data.normals.clone_from(&data.normals);

        let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
            continue;
        };
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, surface.data.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normalized(&surface.data.normals));
    }
}

/// Debug view of a surface's normals: one ray per vertex, or one per
/// triangle centroid using the averaged face normal.
pub fn draw_normal_overlays(
    mut gizmos: Gizmos,
    surfaces: Query<(&GridSurface, &NormalOverlay, &GlobalTransform)>,
) {
    for (surface, overlay, transform) in &surfaces {
        let data = &surface.data;
        match overlay.mode {
            NormalOverlayMode::PerVertex => {
                for (position, normal) in data.positions.iter().zip(&data.normals) {
                    draw_ray(
                        &mut gizmos,
                        transform,
                        Vec3::from(*position),
                        Vec3::from(*normal),
                        overlay.scale,
                    );
                }
            }
            NormalOverlayMode::PerFace => {
                for face in face_normals(&data.positions, &data.normals, &data.indices) {
                    draw_ray(
                        &mut gizmos,
                        transform,
                        Vec3::from(face.centroid),
                        Vec3::from(face.normal),
                        overlay.scale,
                    );
                }
            }
        }
    }
}

fn draw_ray(
    gizmos: &mut Gizmos,
    transform: &GlobalTransform,
    origin: Vec3,
    normal: Vec3,
    scale: f32,
) {
    let start = transform.transform_point(origin);
    let dir = transform.affine().transform_vector3(normal.normalize_or_zero());
    gizmos.line(start, start + dir * scale, Color::WHITE);
}

/// Upload core buffers into a renderable mesh. Vertex normals are
/// normalized here; the core keeps the raw accumulated sums.
pub fn mesh_from_grid_mesh(data: &GridMeshData) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, data.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normalized(&data.normals));
    if let Some(colors) = &data.colors {
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors.clone());
    }
    mesh.insert_indices(Indices::U32(data.indices.clone()));
    mesh
}

fn normalized(normals: &[[f32; 3]]) -> Vec<[f32; 3]> {
    normals
        .iter()
        .map(|n| Vec3::from(*n).normalize_or_zero().to_array())
        .collect()
}

fn sampler_from_image(image: &Image) -> Option<HeightMapSampler> {
    let width = image.width();
    let height = image.height();

    let mut samples = Vec::with_capacity(width as usize * height as usize);
    for row in 0..height {
        for col in 0..width {
            let color = image.get_color_at(col, row).ok()?.to_srgba();
            samples.push(luminance_srgb(color.red, color.green, color.blue));
        }
    }

    HeightMapSampler::new(GridDimensions::new(width, height), samples).ok()
}

/// Bake a sampler into a grayscale RGBA8 texture, used when no heightmap
/// asset is configured.
fn make_heightmap_image(sampler: &NoiseSampler, dims: GridDimensions) -> Image {
    let mut data = Vec::with_capacity(dims.vertex_count() * 4);
    for row in 0..dims.length {
        for col in 0..dims.width {
            let v = (sampler.sample(col, row).clamp(0.0, 1.0) * 255.0) as u8;
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }

    Image::new(
        Extent3d {
            width: dims.width,
            height: dims.length,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}
