//! `sx update`: rebuild the catalog from the download page.

use super::Context;
use sx_core::Result;
use sx_telemetry::TimingGuard;
use sx_toolchain::{Catalog, CatalogBuilder, HttpPageFetcher, detect_platform_tag, fetch_listing};
use sx_ui::Spinner;
use tracing::info;

pub async fn run(ctx: &Context, platform: Option<&str>) -> Result<()> {
    let _timing = TimingGuard::new("update");
    let catalog_config = &ctx.config.catalog;

    let platform = match platform {
        Some(tag) => tag.to_string(),
        None => {
            ctx.output.info(&format!(
                "Determining {} version...",
                catalog_config.platform_family
            ));
            detect_platform_tag(catalog_config.platform.as_deref()).await?
        }
    };
    info!("Selecting builds for {} {}", catalog_config.platform_family, platform);
    ctx.output.status(
        "Selecting",
        &format!("{} {} builds", catalog_config.platform_family, platform),
    );

    let fetcher = HttpPageFetcher::new(ctx.timeout())?;
    let spinner = Spinner::new("Downloading list of Swift versions...", ctx.printer);
    let links = match fetch_listing(
        &fetcher,
        &catalog_config.listing_url,
        &catalog_config.platform_family,
    )
    .await
    {
        Ok(links) => {
            spinner.finish_success(format!("Found {} downloads", links.len()));
            links
        }
        Err(e) => {
            spinner.finish_error("Failed to download the list of Swift versions");
            return Err(e);
        }
    };

    let builder = CatalogBuilder::new(
        &catalog_config.platform_family,
        catalog_config.fallback_platform.as_str(),
    )?;
    let catalog = builder.build(&links, &platform, &ctx.output);

    ctx.output.info("Saving version list...");
    ctx.catalog_store().save(&catalog)?;

    ctx.output.success(&format!(
        "Saved {} Swift builds ({} versions) to {}",
        count_builds(&catalog),
        catalog.len(),
        ctx.layout.catalog_file.display()
    ));
    Ok(())
}

/// Number of individual builds across every version set.
fn count_builds(catalog: &Catalog) -> usize {
    catalog
        .values()
        .map(|set| set.release.len() + set.snapshots.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sx_core::SilentReporter;

    #[test]
    fn test_count_builds_counts_every_record() {
        let links = [
            "/builds/swift-5.3-release/ubuntu2004/swift-5.3-RELEASE/swift-5.3-RELEASE-ubuntu20.04.tar.gz",
            "/builds/swift-5.3.2-release/ubuntu2004/swift-5.3.2-RELEASE/swift-5.3.2-RELEASE-ubuntu20.04.tar.gz",
            "/builds/swift-5.3-branch/ubuntu2004/swift-5.3-DEVELOPMENT-SNAPSHOT-2021-06-01-a/swift-5.3-DEVELOPMENT-SNAPSHOT-2021-06-01-a-ubuntu20.04.tar.gz",
            "/builds/swift-4.2-release/ubuntu2004/swift-4.2-RELEASE/swift-4.2-RELEASE-ubuntu20.04.tar.gz",
        ];
        let catalog = CatalogBuilder::new("ubuntu", "16.10")
            .unwrap()
            .build(links, "20.04", &SilentReporter);

        assert_eq!(catalog.len(), 2);
        assert_eq!(count_builds(&catalog), 4);
    }

    #[test]
    fn test_count_builds_empty_catalog() {
        assert_eq!(count_builds(&Catalog::new()), 0);
    }
}
