//! `sx list`: print the installed versions.

use super::Context;
use sx_core::Result;
use sx_toolchain::list_installed;

pub fn run(ctx: &Context) -> Result<()> {
    let installed = list_installed(&ctx.layout)?;

    if installed.is_empty() {
        ctx.output.info("No versions installed");
        return Ok(());
    }

    for version in installed {
        ctx.output.line(&format!(
            "{} {} {} ({})",
            version.marker(),
            version.name,
            version.version,
            version.build
        ));
    }

    Ok(())
}
