//! `sx available`: print the catalog.

use super::Context;
use sx_core::Result;
use sx_toolchain::{VersionSet, compare_versions};

pub fn run(ctx: &Context, max_snapshots: Option<usize>) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let max_snapshots = max_snapshots.unwrap_or(ctx.config.display.max_snapshots);

    if catalog.is_empty() {
        ctx.output.info("No versions available; run `sx update` to refresh the list");
        return Ok(());
    }

    let mut sets: Vec<&VersionSet> = catalog.values().collect();
    sets.sort_by(|a, b| compare_versions(&b.base, &a.base));

    for set in sets {
        ctx.output.line(&format!("Version {}:", set.base));
        for release in set.releases_desc() {
            ctx.output.line(&format!("  - release: {}", release.version));
        }
        for snapshot in set.snapshots_desc(max_snapshots) {
            if let Some(date) = snapshot.build.date() {
                ctx.output.line(&format!("  - snapshot: {}", date));
            }
        }
    }

    Ok(())
}
