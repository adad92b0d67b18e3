use std::{io, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use price_dashboard::{
    cli::{
        commands::{Cli, Commands},
        params::{brush_from_args, InteractiveCommand, ParseCommandError, HELP},
        report::DashboardReport,
    },
    config::DashboardConfig,
    controller::DashboardController,
    providers::price_service::PriceServiceProvider,
    store::{DashboardState, LoadState},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Controller = DashboardController<PriceServiceProvider>;

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    config.validate().context("invalid dashboard configuration")?;
    Ok(config)
}

fn build_controller(config: &DashboardConfig) -> Result<Controller> {
    let provider = PriceServiceProvider::from_config(config).context("failed to set up price service client")?;
    debug!(endpoint = %provider.endpoint(), "price service client ready");
    let state = DashboardState::from_config(config)?;
    Ok(DashboardController::new(state, Arc::new(provider)))
}

fn print_assets(state: &DashboardState) {
    let selected = &state.selected_asset().symbol;
    for asset in state.selector().assets() {
        let marker = if &asset.symbol == selected { "*" } else { " " };
        println!("{marker} {:<10} {:<24} {}", asset.symbol, asset.name, asset.kind);
    }
}

async fn show(config: &DashboardConfig, symbol: Option<String>, brush: Option<Vec<usize>>, json: bool) -> Result<()> {
    let mut ctl = build_controller(config)?;
    match symbol {
        Some(symbol) => ctl.select_asset(&symbol)?,
        None => ctl.refresh()?,
    }
    ctl.settle().await?;

    if let LoadState::Unavailable { message } = ctl.state().load_state() {
        bail!("price data for {} is unavailable: {message}", ctl.state().selected_asset());
    }
    if let Some(selection) = brush.as_deref().and_then(brush_from_args) {
        ctl.brush(selection.start_index, selection.end_index)
            .context("brush selection rejected")?;
    }

    let report = DashboardReport::from_state(ctl.state());
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

/// Applies one interactive command. Returns `false` when the session should end.
fn handle_command(ctl: &mut Controller, command: InteractiveCommand) -> Result<bool> {
    let outcome = match command {
        InteractiveCommand::Quit => return Ok(false),
        InteractiveCommand::Help => {
            println!("{HELP}");
            Ok(())
        }
        InteractiveCommand::Assets => {
            print_assets(ctl.state());
            Ok(())
        }
        InteractiveCommand::Status => {
            print!("{}", DashboardReport::from_state(ctl.state()));
            Ok(())
        }
        InteractiveCommand::Select(symbol) => ctl.select_asset(&symbol),
        InteractiveCommand::Refresh => ctl.refresh(),
        InteractiveCommand::Brush(selection) => ctl
            .brush(selection.start_index, selection.end_index)
            .map(|()| print!("{}", DashboardReport::from_state(ctl.state()))),
    };
    // Rejected input is reported and the session continues.
    if let Err(err) = outcome {
        eprintln!("error: {err}");
    }
    Ok(true)
}

async fn interactive(config: &DashboardConfig) -> Result<()> {
    let mut ctl = build_controller(config)?;
    ctl.refresh()?;
    eprintln!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match line.parse::<InteractiveCommand>() {
                    Ok(command) => {
                        if !handle_command(&mut ctl, command)? {
                            break;
                        }
                    }
                    Err(ParseCommandError::Empty) => {}
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            applied = ctl.next_outcome(), if ctl.state().is_loading() => {
                if applied?.is_some() && !ctl.state().is_loading() {
                    print!("{}", DashboardReport::from_state(ctl.state()));
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("price_dashboard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Assets => {
            let state = DashboardState::from_config(&config)?;
            print_assets(&state);
        }
        Commands::Show { symbol, brush, json } => show(&config, symbol, brush, json).await?,
        Commands::Interactive => {
            interactive(&config).await?;
            debug!("interactive session ended");
        }
    }

    Ok(())
}
