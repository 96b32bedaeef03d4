//! `sx remove`: delete an installed version.

use super::Context;
use sx_core::Result;
use sx_toolchain::resolve;

pub fn run(ctx: &Context, version: &str, snapshot: Option<&str>) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let record = resolve(&catalog, version, snapshot, &ctx.output)?;

    let path = sx_toolchain::remove(&ctx.layout, record)?;

    ctx.output
        .success(&format!("Removed {} from {}", record, path.display()));
    Ok(())
}
