use clap::Parser;
use folio::config;
use folio::content;
use folio::gui::app::{AppInit, AppModel};
use folio::sys::{preload, runtime};
use folio_core::route::Route;
use folio_core::theme::ThemeChoice;
use relm4::prelude::*;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Desktop portfolio viewer")]
struct Cli {
    /// View to open first: home, projects, about or contact
    #[arg(long)]
    route: Option<Route>,

    /// Overrides the configured initial theme: system, light or dark
    #[arg(long)]
    theme: Option<ThemeChoice>,

    /// Config file to use instead of the per-user one
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = config::resolve_config_path(cli.config)?;
    if cli.init_config {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);
    let content = content::load_content(config.content_path(&config_path).as_deref())?;
    let assets = config.assets_dir();
    let jobs = preload::jobs_for(&content, &assets);
    log::info!(
        "{} projects, {} images under {}",
        content.len(),
        jobs.len(),
        assets.display()
    );

    let (tx, rx) = async_channel::bounded(32);
    let preload_total = jobs.len();

    let targets = config::WatchTargets::new(&config, &config_path);
    runtime::start_background_services(tx, jobs, targets);

    let app = RelmApp::new("org.folio.Folio").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        theme: cli.theme.unwrap_or(config.theme.initial),
        start: cli.route.unwrap_or_default(),
        config,
        config_path,
        content: Rc::new(content),
        assets,
        preload_total,
        rx,
    });
    Ok(())
}
