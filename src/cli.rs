use crate::routines;
use anyhow::{Context, Result};
use auton_selector::{
    FileStore, GridLayout, GridSize, HeadlessSurface, Registry, Selector, SelectorContext,
    SelectorSurface,
};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "auton-selector",
    version,
    about = "Pick, persist and run autonomous routines"
)]
pub struct Cli {
    /// File holding the last selected routine
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Rows in the selection grid
    #[arg(long, default_value_t = auton_selector::model::DEFAULT_ROWS, value_parser = clap::value_parser!(u16).range(1..=8))]
    pub rows: u16,

    /// Columns in the selection grid
    #[arg(long, default_value_t = auton_selector::model::DEFAULT_COLS, value_parser = clap::value_parser!(u16).range(1..=8))]
    pub cols: u16,

    /// List registered routines and exit (no TUI)
    #[arg(long)]
    pub list: bool,

    /// Print the saved selection and exit (no TUI)
    #[arg(long)]
    pub status: bool,

    /// Print --list / --status output as JSON
    #[arg(long)]
    pub json: bool,

    /// Select a routine by name and persist it
    #[arg(long, value_name = "NAME")]
    pub select: Option<String>,

    /// Run a routine by name and exit
    #[arg(long, value_name = "NAME")]
    pub run: Option<String>,

    /// Run the saved selection and exit
    #[arg(long)]
    pub run_selected: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// True when no non-interactive action was requested.
    pub fn is_interactive(&self) -> bool {
        !(self.list
            || self.status
            || self.run_selected
            || self.select.is_some()
            || self.run.is_some())
    }
}

/// Effective settings derived from the command line.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub state_file: PathBuf,
    pub grid: GridSize,
}

pub fn build_config(args: &Cli) -> SelectorConfig {
    SelectorConfig {
        state_file: args
            .state_file
            .clone()
            .unwrap_or_else(auton_selector::storage::default_state_path),
        grid: GridSize::new(args.rows, args.cols),
    }
}

/// Build the selector context with every compiled-in routine registered.
pub fn build_context<F>(cfg: &SelectorConfig, make_surface: F) -> SelectorContext
where
    F: FnMut() -> Box<dyn SelectorSurface> + Send + 'static,
{
    let mut registry = Registry::new();
    routines::register_all(&mut registry);
    tracing::debug!(
        routines = registry.len(),
        state_file = %cfg.state_file.display(),
        "selector context ready"
    );
    SelectorContext::new(
        registry,
        Arc::new(FileStore::new(&cfg.state_file)),
        cfg.grid,
        make_surface,
    )
}

#[derive(Debug, Serialize)]
struct RoutineEntry<'a> {
    index: usize,
    name: &'a str,
    row: Option<u16>,
    col: Option<u16>,
}

#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    selected: &'a str,
    is_selected: bool,
    state_file: &'a Path,
}

fn status_report<'a>(selector: &'a Selector, cfg: &'a SelectorConfig) -> StatusReport<'a> {
    StatusReport {
        selected: selector.selected_auton_name(),
        is_selected: selector.is_auton_selected(),
        state_file: &cfg.state_file,
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.json && !(args.list || args.status) {
        return Err(anyhow::anyhow!(
            "--json only applies to --list or --status."
        ));
    }

    let cfg = build_config(&args);

    if args.is_interactive() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(cfg).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            let mut ctx = build_context(&cfg, headless);
            return print_status(&mut ctx, &cfg, false);
        }
    }

    let mut ctx = build_context(&cfg, headless);

    if let Some(name) = args.select.as_deref() {
        let (id, _) = ctx
            .registry()
            .find(name)
            .with_context(|| format!("no routine named {name:?}"))?;
        ctx.get().select_routine(id);
        eprintln!("Selected: {}", ctx.get().selected_auton_name());
    }
    if args.list {
        print_list(&ctx, args.json)?;
    }
    if args.status {
        print_status(&mut ctx, &cfg, args.json)?;
    }
    if let Some(name) = args.run.as_deref() {
        if !ctx.get().run_auton(name) {
            return Err(anyhow::anyhow!("no routine named {name:?}"));
        }
    }
    if args.run_selected && !ctx.get().run_selected_auton() {
        eprintln!("No auton selected");
    }
    Ok(())
}

fn headless() -> Box<dyn SelectorSurface> {
    Box::new(HeadlessSurface::new())
}

fn print_list(ctx: &SelectorContext, json: bool) -> Result<()> {
    let layout = GridLayout::build(ctx.registry(), ctx.grid());
    let entries: Vec<RoutineEntry> = ctx
        .registry()
        .iter()
        .map(|(id, routine)| {
            let at = layout.position_of(id);
            RoutineEntry {
                index: id.index(),
                name: routine.name(),
                row: at.map(|c| c.row),
                col: at.map(|c| c.col),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for e in &entries {
        match (e.row, e.col) {
            (Some(r), Some(c)) => println!("{:>2}  {:<16} row {} col {}", e.index, e.name, r, c),
            _ => println!("{:>2}  {:<16} (not shown)", e.index, e.name),
        }
    }
    Ok(())
}

fn print_status(ctx: &mut SelectorContext, cfg: &SelectorConfig, json: bool) -> Result<()> {
    let selector = ctx.get();
    if json {
        let report = status_report(selector, cfg);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", auton_selector::model::status_text(selector.selected_auton_name()));
        println!("State file: {}", cfg.state_file.display());
    }
    Ok(())
}
