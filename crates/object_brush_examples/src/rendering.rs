use std::path::Path;

use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

use crate::terrain::HeightfieldScene;

/// Installs a `fmt` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be set when several examples share a process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Top-down render settings.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width and height in pixels.
    pub size: u32,
    pub low_color: [u8; 3],
    pub high_color: [u8; 3],
    /// Height mapped to `low_color` and `high_color`.
    pub height_range: (f32, f32),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 800,
            low_color: [38, 70, 40],
            high_color: [170, 190, 120],
            height_range: (-3.0, 3.0),
        }
    }
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Stable color per template name.
fn name_color(name: &str) -> [u8; 3] {
    let hash = name
        .bytes()
        .fold(0x811c_9dc5u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
    [
        128 + (hash & 0x7f) as u8,
        64 + ((hash >> 8) & 0x7f) as u8,
        32 + ((hash >> 16) & 0x7f) as u8,
    ]
}

/// Renders the terrain shaded by height with every instance drawn as a disc.
pub fn render_instances_to_png(
    scene: &HeightfieldScene,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let size = config.size.max(1);
    let extent = scene.half_extent();
    let units_per_px = 2.0 * extent / size as f32;
    let (low, high) = config.height_range;
    let mut image = RgbImage::new(size, size);

    for (px, pz, pixel) in image.enumerate_pixels_mut() {
        let x = -extent + (px as f32 + 0.5) * units_per_px;
        let z = -extent + (pz as f32 + 0.5) * units_per_px;
        let t = (scene.height_at(x, z) - low) / (high - low);
        *pixel = Rgb(lerp_color(config.low_color, config.high_color, t));
    }

    for (_, instance) in scene.instances() {
        let center = instance.transform.translation;
        let radius_px =
            (scene.instance_radius() * instance.transform.scale / units_per_px).max(1.0);
        let cx = (center.x + extent) / units_per_px;
        let cz = (center.z + extent) / units_per_px;
        let color = Rgb(name_color(&instance.name));

        let min_x = (cx - radius_px).floor().max(0.0) as u32;
        let max_x = ((cx + radius_px).ceil() as u32).min(size - 1);
        let min_z = (cz - radius_px).floor().max(0.0) as u32;
        let max_z = ((cz + radius_px).ceil() as u32).min(size - 1);
        for pz in min_z..=max_z {
            for px in min_x..=max_x {
                let dx = px as f32 + 0.5 - cx;
                let dz = pz as f32 + 0.5 - cz;
                if dx * dx + dz * dz <= radius_px * radius_px {
                    image.put_pixel(px, pz, color);
                }
            }
        }
    }

    image.save(path)?;
    Ok(())
}
