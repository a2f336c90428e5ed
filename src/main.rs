// docindex CLI: build a compressed search index artifact from a page
// manifest.
//
// Usage: docindex <manifest.json> [output-dir]
//
// The manifest names the site configuration and the ordered page list;
// the artifact lands at <output-dir>/search_index.json.gz. An empty page
// list is a successful no-op.

use anyhow::{Context, Result, bail};
use docindex::{Manifest, generate_index, write_artifact};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let manifest_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => bail!("Usage: docindex <manifest.json> [output-dir]"),
    };
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;
    let base_dir = manifest_path.parent().unwrap_or(Path::new("."));
    let pages = manifest
        .resolve_pages(base_dir)
        .context("Failed to resolve manifest pages")?;

    log::info!("Indexing {} page(s)", pages.len());

    match generate_index(&manifest.site, &pages)? {
        Some(asset) => {
            std::fs::create_dir_all(&output_dir).with_context(|| {
                format!("Failed to create output directory {}", output_dir.display())
            })?;
            let path = write_artifact(&asset, &output_dir)?;
            println!("{}", path.display());
        }
        None => {
            log::info!("No pages to index, no artifact written");
        }
    }

    Ok(())
}
