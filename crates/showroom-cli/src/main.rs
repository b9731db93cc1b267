use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use serde::Serialize;
use tracing::Level;

use showroom_core::{
    fetch_snapshot, parse_script, CategorizedMenu, CategoryClassifier, Config,
    ConfiguratorEngine, ConfiguratorEvent, ConfiguratorSnapshot, ImageView, JsonCatalog, Result,
    ShowroomError, VehicleFilter, VehicleRecord,
};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Commands::Menu {
            catalog,
            name,
            max_price,
            limit,
            compact,
            json,
        } => {
            let filter = VehicleFilter {
                name_contains: name,
                max_price_cents: max_price,
                limit,
            };
            handle_menu(&base_dir, catalog, &filter, compact, json)
        }
        Commands::Categories => handle_categories(&base_dir),
        Commands::Configure {
            model,
            events,
            script,
            strict,
            json,
        } => handle_configure(&base_dir, &model, &events, script.as_deref(), strict, json),
        Commands::Validate {
            models,
            deny_unused,
        } => handle_validate(&base_dir, &models, deny_unused),
        Commands::Config { action } => handle_config(action, &base_dir),
        Commands::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "showroom", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("SHOWROOM_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".showroom"))
        .unwrap_or_else(|| PathBuf::from(".showroom"))
}

fn handle_menu(
    base_dir: &Path,
    catalog: Option<PathBuf>,
    filter: &VehicleFilter,
    compact: bool,
    json: bool,
) -> Result<()> {
    let config = Config::load(base_dir)?;
    let repository = match catalog {
        Some(path) => JsonCatalog::new(path),
        None => config.catalog(base_dir),
    };
    let classifier = CategoryClassifier::new(config.category_store()?);

    let snapshot = fetch_snapshot(&repository, filter)?;
    let menu = classifier.classify(&snapshot.vehicles);

    if json {
        println!("{}", serde_json::to_string_pretty(&menu)?);
        return Ok(());
    }

    println!();
    println!(
        "Catalog: {} ({} vehicles, fetched {})",
        repository.path().display(),
        snapshot.vehicles.len(),
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    print_menu(&menu, compact);
    Ok(())
}

fn print_menu(menu: &CategorizedMenu, compact: bool) {
    println!();
    for category in &menu.categories {
        if compact && category.vehicles.is_empty() {
            continue;
        }
        println!(
            "{} ({})",
            category.label.cyan().bold(),
            category.vehicles.len()
        );
        if category.vehicles.is_empty() {
            println!("  {}", "(empty)".dimmed());
        }
        for vehicle in &category.vehicles {
            println!("  {}", describe_vehicle(vehicle));
        }
        println!();
    }

    if !menu.unmatched.is_empty() {
        println!(
            "{} {} vehicle(s) matched no category: {}",
            "Note:".yellow(),
            menu.unmatched.len(),
            menu.unmatched.join(", ")
        );
        println!();
    }
}

fn describe_vehicle(vehicle: &VehicleRecord) -> String {
    let mut line = vehicle.label().to_string();
    if let Some(price) = vehicle.price_cents {
        line.push_str(&format!("  {}", format_price(price).green()));
    }
    if let Some(slug) = &vehicle.slug {
        line.push_str(&format!("  /{}", slug).dimmed().to_string());
    }
    line
}

/// Cents as Brazilian real, e.g. `R$ 129.990,00`.
fn format_price(cents: u64) -> String {
    let reais = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("R$ {},{:02}", grouped, cents % 100)
}

fn handle_categories(base_dir: &Path) -> Result<()> {
    let config = Config::load(base_dir)?;
    let store = config.category_store()?;

    println!();
    for (idx, rule) in store.rules().iter().enumerate() {
        if rule.is_catch_all() {
            println!(
                "{:>2}. {} {}",
                idx + 1,
                rule.label.cyan(),
                "(catch-all)".dimmed()
            );
        } else {
            println!(
                "{:>2}. {} [{}]",
                idx + 1,
                rule.label.cyan(),
                rule.keywords.join(", ")
            );
        }
    }
    if store.catch_all().is_none() {
        println!();
        println!(
            "{} no catch-all rule; unmatched vehicles are left out of the menu",
            "Note:".yellow()
        );
    }
    println!();
    Ok(())
}

fn handle_configure(
    base_dir: &Path,
    model: &str,
    events: &str,
    script: Option<&Path>,
    strict: bool,
    json: bool,
) -> Result<()> {
    let config = Config::load(base_dir)?;
    let table = config.load_model(base_dir, model)?;
    let mut engine = ConfiguratorEngine::new(table)?;

    let events = match script {
        Some(path) => parse_script(&fs::read_to_string(path)?)?,
        None => parse_script(events)?,
    };

    let mut steps = Vec::new();
    if !json {
        println!();
    }
    let replayed = replay(&mut engine, &events, strict, |step| {
        if !json {
            print_step(step);
        }
        steps.push(step.clone());
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
    } else {
        println!();
    }
    replayed?;

    match engine.snapshot().image {
        ImageView::Unresolved { key } => Err(ShowroomError::UnresolvedImageKey { key }),
        ImageView::Image { .. } => Ok(()),
    }
}

/// One entry of a replay: the initial state, or an event and the state after it.
#[derive(Debug, Clone, Serialize)]
struct ReplayStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<String>,
    /// Set when the engine refused the event; the snapshot is then unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<String>,
    snapshot: ConfiguratorSnapshot,
}

/// Applies `events` in order, reporting the initial state and one step per event.
///
/// Rejected events are reported and skipped, or end the replay when `strict`.
fn replay(
    engine: &mut ConfiguratorEngine,
    events: &[ConfiguratorEvent],
    strict: bool,
    mut on_step: impl FnMut(&ReplayStep),
) -> Result<()> {
    on_step(&ReplayStep {
        event: None,
        rejected: None,
        snapshot: engine.snapshot(),
    });

    for event in events {
        let rejected = match engine.apply(event) {
            Ok(()) => None,
            Err(e) if e.is_rejection() => Some(e),
            Err(e) => return Err(e),
        };
        on_step(&ReplayStep {
            event: Some(event.to_string()),
            rejected: rejected.as_ref().map(ToString::to_string),
            snapshot: engine.snapshot(),
        });
        match rejected {
            Some(e) if strict => return Err(e),
            _ => {}
        }
    }
    Ok(())
}

fn print_step(step: &ReplayStep) {
    let event = step.event.as_deref();
    match &step.rejected {
        Some(reason) => println!(
            "{} {}: {}",
            "Rejected:".yellow(),
            event.unwrap_or_default(),
            reason
        ),
        None => print_snapshot(event, &step.snapshot),
    }
}

fn print_snapshot(event: Option<&str>, snapshot: &ConfiguratorSnapshot) {
    let heading = match event {
        Some(event) => format!("> {}", event),
        None => format!("{} (initial)", snapshot.model),
    };
    println!("{} {}", format!("[v{}]", snapshot.version).dimmed(), heading.bold());

    let selections: Vec<String> = snapshot
        .selections
        .iter()
        .map(|s| format!("{}={}", s.axis, s.option))
        .collect();
    println!("  selections: {}", selections.join(", "));
    if let Some(tab) = &snapshot.active_tab {
        println!("  tab:        {}", tab);
    }

    match &snapshot.image {
        ImageView::Image { url } => println!(
            "  image:      {} ({}/{})",
            url.green(),
            snapshot.position + 1,
            snapshot.length
        ),
        ImageView::Unresolved { key } => println!(
            "  image:      {} no image set for key '{}'",
            "MISSING".red().bold(),
            key
        ),
    }
    println!(
        "  lightbox:   {}",
        if snapshot.lightbox_open { "open" } else { "closed" }
    );
}

fn handle_validate(base_dir: &Path, models: &[String], deny_unused: bool) -> Result<()> {
    let config = Config::load(base_dir)?;
    let targets: Vec<String> = if models.is_empty() {
        list_model_tables(&base_dir.join(&config.configurator.models_dir))?
    } else {
        models.to_vec()
    };

    if targets.is_empty() {
        println!("No configurator tables found.");
        return Ok(());
    }

    println!();
    let mut failed = Vec::new();
    for target in &targets {
        let table = match config.load_model(base_dir, target) {
            Ok(table) => table,
            Err(e) => {
                println!("{} {}: {}", "FAIL".red().bold(), target, e);
                failed.push(target.clone());
                continue;
            }
        };

        let report = table.validate();
        let ok = report.is_ok() && !(deny_unused && !report.unused.is_empty());
        let status = if ok { "OK".green().bold() } else { "FAIL".red().bold() };
        println!("{} {} ({} keys checked)", status, report.model, report.checked);

        for key in &report.missing {
            println!("    missing: {}", key.red());
        }
        for key in &report.empty {
            println!("    empty:   {}", key.red());
        }
        for key in &report.unused {
            println!("    unused:  {}", key.yellow());
        }

        if !ok {
            failed.push(report.model.clone());
        }
    }
    println!();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(ShowroomError::InvalidConfigurator {
            message: format!(
                "{} of {} table(s) failed: {}",
                failed.len(),
                targets.len(),
                failed.join(", ")
            ),
        })
    }
}

/// Table files under `models_dir`, sorted by name.
fn list_model_tables(models_dir: &Path) -> Result<Vec<String>> {
    if !models_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut tables: Vec<String> = fs::read_dir(models_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == "toml" || ext == "json")
        })
        .map(|path| path.display().to_string())
        .collect();
    tables.sort();
    Ok(tables)
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(ShowroomError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            if !config.categories.is_empty() {
                println!(
                    "{} = {} override(s)",
                    "categories".cyan(),
                    config.categories.len()
                );
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
