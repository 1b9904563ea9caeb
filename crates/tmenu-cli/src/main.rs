//! tmenu: a terminal menu launcher.
//!
//! The menu is described by a TOML file (see `menu_config.toml`) and shown as
//! one of three layouts: `simple` (one panel at a time), `horizontal`
//! (side-by-side lanes) or `cascading` (nested boxes).
//!
//! # Environment Variables
//!
//! - `TMENU_LOG`: log filter directive, e.g. `debug` or `tmenu_runtime=trace`

mod logging;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tmenu_engine::Engine;
use tmenu_runtime::ProcessRunner;
use tmenu_types::config::{self, Menu};
use tmenu_types::MenuType;
use tracing::{debug, info};

/// Configuration file looked up in the current directory.
const DEFAULT_CONFIG: &str = "menu_config.toml";

/// Terminal menu launcher
#[derive(Parser, Debug)]
#[command(name = "tmenu")]
#[command(version, about, long_about = None)]
struct Args {
    /// Menu configuration file (default: ./menu_config.toml, then
    /// <config dir>/tmenu/menu.toml)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured layout (simple, horizontal, cascading)
    #[arg(long, value_name = "TYPE")]
    menu_type: Option<MenuType>,

    /// Validate the configuration, print a summary and exit
    #[arg(long)]
    check: bool,

    /// Log file path (default: <cache dir>/tmenu/tmenu.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level unless TMENU_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

/// The configuration file to load: the explicit argument, else
/// `menu_config.toml` in `cwd`, else the per-user fallback when it exists.
fn resolve_config_path(explicit: Option<&Path>, cwd: &Path, user_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = cwd.join(DEFAULT_CONFIG);
    if local.exists() {
        return local;
    }
    user_dir
        .map(|dir| dir.join("tmenu").join("menu.toml"))
        .filter(|p| p.exists())
        .unwrap_or(local)
}

fn load_menu(path: &Path, menu_type: Option<MenuType>) -> Result<(Menu, config::MenuFile)> {
    let file = config::load_config(path)
        .with_context(|| format!("loading menu configuration from {}", path.display()))?;
    let mut menu = file
        .to_menu()
        .with_context(|| format!("invalid menu configuration in {}", path.display()))?;
    if let Some(menu_type) = menu_type {
        menu.menu_type = menu_type;
    }
    Ok((menu, file))
}

fn summary(menu: &Menu) -> String {
    // The root itself is not an item.
    let items = menu.root.count() - 1;
    format!(
        "{}: {} menu, {} items, depth {}",
        menu.root.label(),
        menu.menu_type,
        items,
        menu.root.depth()
    )
}

fn main() -> Result<()> {
    let args = Args::parse();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config_dir = dirs::config_dir();
    let path = resolve_config_path(args.config.as_deref(), &cwd, config_dir.as_deref());

    // Configuration errors end the program before the terminal is touched.
    let (menu, file) = load_menu(&path, args.menu_type)?;
    if args.check {
        println!("{}", summary(&menu));
        return Ok(());
    }

    logging::init(args.log_file.as_deref(), args.verbose);
    info!(config = %path.display(), menu_type = %menu.menu_type, "Loaded menu");

    let runner = match file.python.as_deref() {
        Some(python) => ProcessRunner::new().with_python(python),
        None => ProcessRunner::new(),
    };
    let theme = tui::theme::Theme::from_palette(&file.menu_colors);

    let mut engine = Engine::from_menu(&menu, runner);
    engine.on_transition(|event, old, new| {
        debug!(?event, ?old, ?new, "Transition");
    });

    tui::run(engine, &theme).context("terminal UI failed")?;
    Ok(())
}
