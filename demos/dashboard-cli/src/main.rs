mod cli;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use ticker_dashboard::{AsyncDashboard, DashboardConfig, Section, Tab};

fn preprocess() {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger
    env_logger::init();
}

fn load_config(cli: &cli::Cli) -> Result<DashboardConfig> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?.apply_env()?,
        None => DashboardConfig::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();
    let cli = cli::Cli::parse();
    log::info!("Command line input recorded: {cli:#?}");

    let mut builder = AsyncDashboard::builder().config(load_config(&cli)?);
    if let Some(symbol) = &cli.symbol {
        builder = builder.symbol(symbol.clone());
    }
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let dashboard = builder.build().await?;

    let (range, trends, peaks) = (cli.range, cli.trends, cli.peaks);
    dashboard
        .run(move |d| {
            d.select_range(range);
            d.set_trends_view(trends);
            d.set_peaks_view(peaks);
            Ok(())
        })
        .await?;

    let snapshot = dashboard.activate().await?;
    let failed: Vec<&str> = Section::all()
        .iter()
        .filter(|s| snapshot.error(**s).is_some())
        .map(|s| s.label())
        .collect();
    if !failed.is_empty() {
        log::warn!("Sections failed: {}", failed.join(", "));
    }

    let tabs: Vec<Tab> = if cli.all_tabs {
        Tab::all().to_vec()
    } else {
        vec![cli.tab]
    };
    for tab in tabs {
        dashboard.select_tab(tab).await?;
        println!("{}\n", dashboard.render().await?);
    }

    dashboard.close().await?;
    Ok(())
}
