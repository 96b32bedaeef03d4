//! Command implementations.

mod activate;
mod available;
mod install;
mod list;
mod remove;
mod update;

use crate::cli::{Cli, Commands, GlobalArgs};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use sx_config::{GlobalConfig, load_global_config, state_dir};
use sx_core::{Error, ExitCode};
use sx_toolchain::{Catalog, CatalogStore, StoreLayout};
use sx_ui::{Output, Printer, colors_enabled};
use tracing::debug;

/// Everything a command needs, resolved once per invocation.
pub struct Context {
    pub config: GlobalConfig,
    pub layout: StoreLayout,
    pub output: Output,
    pub printer: Printer,
}

impl Context {
    fn load(global: &GlobalArgs, printer: Printer) -> sx_core::Result<Self> {
        let config = load_config(global.config_file.as_deref())?;

        let root = state_dir(&config)?;
        let root =
            std::path::absolute(&root).map_err(|e| Error::io("failed to resolve", &root, e))?;
        debug!("Using state directory {}", root.display());

        Ok(Self {
            config,
            layout: StoreLayout::new(root),
            output: Output::from_printer(printer),
            printer,
        })
    }

    /// The persisted catalog file.
    pub fn catalog_store(&self) -> CatalogStore {
        CatalogStore::new(&self.layout.catalog_file)
    }

    /// Load the catalog written by the last `sx update`.
    pub fn load_catalog(&self) -> sx_core::Result<Catalog> {
        self.catalog_store().load()
    }

    /// HTTP timeout from the config; `None` waits indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        self.config.catalog.timeout.map(Duration::from_secs)
    }
}

fn load_config(explicit: Option<&Path>) -> sx_core::Result<GlobalConfig> {
    load_global_config(explicit).map_err(|err| match explicit {
        Some(path) => Error::Config {
            message: err.to_string(),
            path: Some(path.to_path_buf()),
            source: Some(Box::new(err)),
        },
        None => err.into(),
    })
}

/// Run the CLI command and return the process exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    let printer = Printer::from_flags(cli.global.quiet, cli.global.verbose);
    let output = Output::from_printer(printer);

    if cli.global.no_color || !colors_enabled() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = match Context::load(&cli.global, printer) {
        Ok(ctx) => dispatch(cli.command, &ctx).await,
        Err(err) => Err(err),
    };
    output.flush();

    match result {
        Ok(()) => Ok(ExitCode::Success.into()),
        Err(err) => {
            debug!("Command failed: {:?}", err);
            output.print_error(&err);
            Ok(ExitCode::from(err.kind()).into())
        }
    }
}

async fn dispatch(command: Commands, ctx: &Context) -> sx_core::Result<()> {
    match command {
        Commands::Update { platform } => update::run(ctx, platform.as_deref()).await,
        Commands::Available { max_snapshots } => available::run(ctx, max_snapshots),
        Commands::List => list::run(ctx),
        Commands::Install {
            version,
            snapshot,
            activate,
        } => install::run(ctx, &version, snapshot.as_deref(), activate).await,
        Commands::Activate { version, snapshot } => {
            activate::run(ctx, &version, snapshot.as_deref())
        }
        Commands::Remove { version, snapshot } => remove::run(ctx, &version, snapshot.as_deref()),
    }
}
