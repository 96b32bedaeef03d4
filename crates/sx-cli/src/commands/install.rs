//! `sx install`: download and unpack a version into the store.

use super::Context;
use sx_core::{ProgressSink, Result};
use sx_telemetry::TimingGuard;
use sx_toolchain::{
    HttpDownloader, InstallOptions, Installer, TarExtractor, activate, resolve,
};
use sx_ui::{Progress, Style};

pub async fn run(ctx: &Context, version: &str, snapshot: Option<&str>, activate_after: bool) -> Result<()> {
    let _timing = TimingGuard::new("install");
    let catalog = ctx.load_catalog()?;
    let record = resolve(&catalog, version, snapshot, &ctx.output)?;

    let downloader = HttpDownloader::new(ctx.timeout())?;
    let extractor = TarExtractor::new(ctx.config.install.archive_tool.as_str());
    let installer = Installer {
        layout: &ctx.layout,
        downloader: &downloader,
        extractor: &extractor,
        reporter: &ctx.output,
        options: InstallOptions {
            download_base: ctx.config.catalog.download_base.clone(),
            strip_components: ctx.config.install.strip_components,
        },
    };

    let progress = Progress::new(format!("Downloading {}", record), ctx.printer);
    let result = installer.install(record, &progress).await;
    progress.finish();
    let target = result?;

    ctx.output
        .success(&format!("Installed {} to {}", record, target.display()));

    if activate_after {
        activate(&ctx.layout, record)?;
        ctx.output.success(&format!("Activated {}", record));
    } else {
        ctx.output.info(&format!(
            "Run {} to use it",
            Style::command(activate_hint(version, snapshot))
        ));
    }

    Ok(())
}

fn activate_hint(version: &str, snapshot: Option<&str>) -> String {
    match snapshot {
        Some(date) => format!("sx activate {} --snapshot {}", version, date),
        None => format!("sx activate {}", version),
    }
}
