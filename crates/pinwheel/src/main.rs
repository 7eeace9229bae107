use clap::Parser;
use pinwheel::config::{self, StyleOverrides};
use pinwheel::gui::actions::DemoAction;
use pinwheel::gui::app::{AppInit, AppModel};
use pinwheel::gui::render;
use pinwheel::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Outer radius of the menu (overrides the config file)
    #[arg(short, long)]
    radius: Option<f64>,

    /// Inner radius, used to place the labels
    #[arg(long)]
    inner_radius: Option<f64>,

    /// Read this config file instead of the default one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render the idle menu to a PNG file and exit
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let overrides = StyleOverrides {
        outer_radius: args.radius,
        inner_radius: args.inner_radius,
    };
    let style = overrides.apply(config::load_or_default(&config_path).menu);
    style.validate()?;

    if let Some(path) = args.snapshot {
        let sectors = wedge::geometry::layout(&DemoAction::labels(), &style)?;
        render::write_png(&sectors, &style, &path)?;
        log::info!("Wrote {}", path.display());
        return Ok(());
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    // clap already consumed the arguments
    let app = RelmApp::new("org.pinwheel.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        style,
        config_path,
        overrides,
        events: rx,
    });
    Ok(())
}
