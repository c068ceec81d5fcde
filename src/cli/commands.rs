//! Command implementations

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::adapters::TomlConfigAdapter;
use crate::app::{
    AppContainer, InspectRequest, InspectSource, OrganizeRequest, ProcessRequest,
};
use crate::cli::args::{ConfigArgs, InspectArgs, OrganizeArgs, ProcessArgs};
use crate::config_initialization::Settings;
use crate::output::Render;

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    let source = match (args.input, args.report) {
        (Some(input), None) => InspectSource::Container(input),
        (None, Some(report)) => InspectSource::Report(report),
        _ => bail!("Exactly one of --input or --report is required"),
    };

    let response = container
        .inspect_interactor()
        .execute(InspectRequest { source })
        .await
        .context("Failed to inspect tracks")?;

    print!("{}", response.render(args.format)?);
    Ok(())
}

/// Execute the process command
pub async fn process(container: &dyn AppContainer, args: ProcessArgs) -> Result<()> {
    if args.dry_run {
        info!("Dry run: commands will be printed, not executed");
    }

    let report = container
        .process_interactor()
        .execute(ProcessRequest {
            input: args.input,
            dry_run: args.dry_run,
        })
        .await
        .context("Processing failed")?;

    print!("{}", report.render(args.format)?);

    if report.failed() > 0 {
        bail!("{} of {} containers failed", report.failed(), report.episodes.len());
    }
    Ok(())
}

/// Execute the organize command
pub async fn organize(container: &dyn AppContainer, args: OrganizeArgs) -> Result<()> {
    let response = container
        .organize_interactor()
        .execute(OrganizeRequest {
            dry_run: args.dry_run,
        })
        .await
        .context("Failed to organize rips")?;

    print!("{}", response.render(args.format)?);
    Ok(())
}

/// Execute the config command
pub fn config(settings: &Settings, args: ConfigArgs) -> Result<()> {
    match args.write {
        Some(path) => {
            TomlConfigAdapter::save(settings, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Configuration written to {}", path.display());
        }
        None => print!("{}", TomlConfigAdapter::serialize(settings)?),
    }
    Ok(())
}
