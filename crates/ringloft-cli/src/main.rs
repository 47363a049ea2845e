//! ringloft CLI - rebuild a 3D body from flat pattern panels.
//!
//! Reads a JSON panel list and an optional TOML build config, runs the
//! ring-loft engine, and writes meshes, outlines, ring wires and textures.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use ringloft::{BuildConfig, NoTextures, PanelMaterial, RingLoft};
use ringloft_pattern::{panels_from_json, Edge, Panel};

mod export;

#[derive(Parser)]
#[command(name = "ringloft")]
#[command(about = "Reconstruct a body of revolution from flat pattern panels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build meshes, outlines and ring wires
    Build {
        /// Panel list (.json)
        #[arg(short, long)]
        panels: PathBuf,
        /// Build config (.toml); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        /// Render panel textures and emit UVs
        #[arg(long)]
        textures: bool,
    },
    /// Print per-ring measurements
    Info {
        /// Panel list (.json)
        #[arg(short, long)]
        panels: PathBuf,
        /// Build config (.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            panels,
            config,
            out,
            textures,
        } => {
            let panels = load_panels(&panels)?;
            let config = load_config(config.as_deref())?;
            build(&panels, config, &out, textures)?;
        }
        Commands::Info { panels, config } => {
            let panels = load_panels(&panels)?;
            let config = load_config(config.as_deref())?;
            show_info(&panels, config)?;
        }
    }

    Ok(())
}

fn load_panels(path: &Path) -> Result<Vec<Panel>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading panels from {}", path.display()))?;
    let panels = panels_from_json(&json)
        .with_context(|| format!("parsing panels from {}", path.display()))?;
    log::info!("loaded {} panels from {}", panels.len(), path.display());
    Ok(panels)
}

fn load_config(path: Option<&Path>) -> Result<BuildConfig> {
    let Some(path) = path else {
        return Ok(BuildConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    BuildConfig::from_toml_str(&text).with_context(|| format!("loading config {}", path.display()))
}

fn build(panels: &[Panel], config: BuildConfig, out: &Path, textures: bool) -> Result<()> {
    let loft = RingLoft::new(panels, config)?;
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;

    let mesh_path = out.join("mesh.obj");
    let meshes = if textures {
        loft.textured_meshes(&loft.texture_renderer())
    } else {
        loft.textured_meshes(&NoTextures)
    };
    export::write_obj(&mesh_path, &meshes, textures)?;
    println!("Wrote {}", mesh_path.display());
    println!("Wrote {}", mesh_path.with_extension("mtl").display());

    for tm in &meshes {
        if let PanelMaterial::Texture(img) = &tm.material {
            let png = out.join(format!("panel_{}.png", tm.panel));
            img.save(&png)
                .with_context(|| format!("writing {}", png.display()))?;
            log::info!("wrote texture {}", png.display());
        }
    }

    let outlines_path = out.join("outlines.json");
    let outlines: Vec<_> = Edge::BOTH
        .iter()
        .flat_map(|&edge| loft.outlines(edge))
        .collect();
    export::write_json(&outlines_path, &export::outlines_doc(&outlines))?;
    println!("Wrote {}", outlines_path.display());

    let rings_path = out.join("rings.json");
    export::write_json(&rings_path, &export::rings_doc(&loft.ring_wires()))?;
    println!("Wrote {}", rings_path.display());

    Ok(())
}

fn show_info(panels: &[Panel], config: BuildConfig) -> Result<()> {
    let loft = RingLoft::new(panels, config)?;
    let m = loft.metrics();

    println!("Panels: {}", panels.len());
    for &i in loft.order() {
        println!("  {} (waist y = {:.2} mm)", panels[i].id, loft.waist_y(i));
    }
    println!();
    println!(
        "{:>4} {:>10} {:>12} {:>10} {:>7}",
        "ring", "offset", "half-circ", "radius", "valid"
    );
    for k in 0..m.num_rings() {
        let marker = if k == m.reference { "*" } else { "" };
        println!(
            "{:>4} {:>10.2} {:>12.3} {:>10.3} {:>4}/{:<2}{}",
            k,
            m.offsets_mm[k],
            m.c_half[k],
            m.radius[k],
            m.valid_count(k),
            m.num_panels(),
            marker
        );
    }

    Ok(())
}
