//! # cinescope Main Entry Point

use anyhow::{bail, Context, Result};
use cinescope::browser::io::{TerminalEventStream, TerminalRenderStream};
use cinescope::catalog::{CatalogClient, HttpCatalogClient, ImageResolver};
use cinescope::cmd_args::CommandLineArgs;
use cinescope::config::{self, CatalogConfig};
use cinescope::logging::init_tracing_subscriber;
use cinescope::{AppController, ViewModel};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.log_file());

    let profile_name = cmd_args.profile();
    let profile_path = config::get_profile_path();
    let catalog_config = CatalogConfig::load(profile_name, &profile_path, cmd_args.overrides()?)
        .context("cannot start without a usable catalog configuration")?;
    tracing::debug!("Catalog configuration: {:?}", catalog_config);

    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        bail!("cinescope needs an interactive terminal");
    }

    let client: Arc<dyn CatalogClient> = Arc::new(HttpCatalogClient::new(&catalog_config)?);
    let images = ImageResolver::new(catalog_config.image_base_url.clone());

    let mut view_model = ViewModel::new(client, images);
    view_model.set_profile_info(profile_name.to_string(), profile_path);
    if let Some(query) = cmd_args.query() {
        view_model.search(query);
    }

    let mut app = AppController::with_io_streams(
        view_model,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await
}
