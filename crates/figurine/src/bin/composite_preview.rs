//! # Composite Preview
//!
//! Loads a scene file, composites every actor and prints both draw lists,
//! one entry per line, in draw order.
//!
//! ```text
//! composite_preview crates/figurine/scenes/colony.toml
//! RUST_LOG=figurine_rendering=debug composite_preview scene.toml
//! ```

use std::fmt::Write as _;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use figurine::rendering::{DrawEntry, DrawList, RenderResult};
use figurine::Scene;

const DEFAULT_SCENE: &str = "crates/figurine/scenes/colony.toml";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SCENE.to_owned());
    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%path, "{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> RenderResult<()> {
    let scene = Scene::load(path)?;
    for composite in scene.composite()? {
        println!("══ {} ══", composite.name);
        print_list("map", &composite.map);
        print_list("portrait", &composite.portrait);
        println!();
    }
    Ok(())
}

fn print_list(label: &str, list: &DrawList) {
    println!("  {label} ({} entries)", list.len());
    for entry in list.entries() {
        println!("    {}", describe(entry));
    }
}

fn describe(entry: &DrawEntry) -> String {
    let mut variant = String::new();
    if entry.material.invisible {
        variant.push_str(" invisible");
    }
    if entry.material.flash_ticks > 0 {
        let _ = write!(variant, " flash={}", entry.material.flash_ticks);
    }
    if entry.immediate {
        variant.push_str(" immediate");
    }
    format!(
        "{:<14} mesh={:<3} mat={:<10} pos=({:.3}, {:.5}, {:.3}) angle={:.1}{variant}",
        entry.layer.name(),
        entry.mesh.0,
        entry.material.id.0,
        entry.position.x,
        entry.position.y,
        entry.position.z,
        entry.angle,
    )
}
