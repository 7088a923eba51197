use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const IMAGE_SIZE: u32 = 32;

/// Class name, base colour, and number of images. Sizes are uneven on purpose so
/// small classes exercise the per-class clamping of stratified splits.
const CLASSES: [(&str, [u8; 3], usize); 4] = [
    ("cat", [200, 120, 60], 24),
    ("dog", [90, 70, 50], 16),
    ("bird", [60, 140, 220], 9),
    ("fish", [40, 200, 160], 3),
];

/// A noisy solid-colour square.
fn generate_image(base: [u8; 3], noise: u8, rng: &mut ChaCha8Rng) -> RgbImage {
    RgbImage::from_fn(IMAGE_SIZE, IMAGE_SIZE, |_, _| {
        let mut px = base;
        for channel in &mut px {
            let delta = rng.gen_range(-(noise as i16)..=noise as i16);
            *channel = (*channel as i16 + delta).clamp(0, 255) as u8;
        }
        Rgb(px)
    })
}

fn write_class(root: &Path, class: &str, base: [u8; 3], n: usize, rng: &mut ChaCha8Rng) -> Result<()> {
    let dir = root.join(class);
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    for i in 0..n {
        let path = dir.join(format!("{class}_{i:03}.png"));
        generate_image(base, 25, rng)
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output_dir: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_dataset"));

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut total = 0;
    for (class, base, n) in CLASSES {
        write_class(&output_dir, class, base, n, &mut rng)?;
        log::info!("Wrote {n} images for class '{class}'");
        total += n;
    }

    // Non-image files that include/exclude filters can skip.
    std::fs::write(output_dir.join("README.txt"), "Synthetic classification dataset\n")
        .context("writing README.txt")?;

    println!(
        "Wrote {} images in {} classes to {}",
        total,
        CLASSES.len(),
        output_dir.display()
    );
    Ok(())
}
