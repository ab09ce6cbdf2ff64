use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use clap::Parser;
use clipstack::app::{ActionOutcome, App};
use clipstack::cli::{Cli, Commands};
use clipstack::clipboard::SystemPasteboard;
use clipstack::config::Config;
use clipstack::controller::{CaptureOutcome, RestoreOutcome, SelectionOutcome};
use clipstack::keybindings::{Action, ShortcutMap};
use clipstack::notifier::DesktopNotifier;
use clipstack::stack::{MAX_CAPACITY, MIN_CAPACITY, StackStore};
use clipstack::storage::FileDefaults;
use clipstack::ui::{TerminalSelector, theme::Theme};
use clipstack::utils::paths::{ensure_directories_exist, get_defaults_dir};
use clipstack::utils::unicode::{fit_to_width, single_line};
use dialoguer::Confirm;
use tracing_subscriber::{EnvFilter, fmt};

const LIST_LABEL_WIDTH: usize = 40;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config);

    ensure_directories_exist()?;
    let store = StackStore::open(FileDefaults::new(get_defaults_dir()?));

    match cli.command {
        Some(Commands::Capture) => {
            let mut app = build_app(store, &config)?;
            report_capture(app.on_capture())?;
        }
        Some(Commands::Paste { index }) => {
            let mut app = build_app(store, &config)?;
            match index {
                Some(index) => handle_paste_at(&mut app, index)?,
                None => report_selection(app.on_restore_popup()?),
            }
        }
        Some(Commands::Delete { index, all, yes }) => {
            let mut app = build_app(store, &config)?;
            if all {
                handle_delete_all(&mut app, yes)?;
            } else {
                match index {
                    Some(index) => {
                        app.delete_at(to_position(index)?)?;
                        println!("✓ Deleted item {index}");
                    }
                    None => report_selection(app.on_delete_popup()?),
                }
            }
        }
        Some(Commands::Capacity { value }) => {
            handle_capacity(store, value)?;
        }
        Some(Commands::Shortcuts) => {
            handle_shortcuts(&config);
        }
        Some(Commands::Trigger { action }) => {
            let mut app = build_app(store, &config)?;
            match app.dispatch(action)? {
                ActionOutcome::Capture(outcome) => report_capture(outcome)?,
                ActionOutcome::Selection(outcome) => report_selection(outcome),
            }
        }
        Some(Commands::List) | None => {
            handle_list(&store);
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .init();
}

fn build_app(store: StackStore<FileDefaults>, config: &Config) -> Result<App<FileDefaults>> {
    let pasteboard = SystemPasteboard::new()?;
    let selector = TerminalSelector::new(Theme::from_config(config));

    Ok(App::new(
        store,
        Box::new(pasteboard),
        Box::new(DesktopNotifier),
        Box::new(selector),
    )
    .with_delays(config.copy_delay(), config.paste_delay()))
}

/// Command-line positions start at 1.
fn to_position(index: usize) -> Result<usize> {
    index
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Positions start at 1, as shown by `clipstack list`"))
}

fn report_capture(outcome: CaptureOutcome) -> Result<()> {
    match outcome {
        CaptureOutcome::Captured(kind) => println!("✓ Captured {kind}"),
        CaptureOutcome::StackFull => {}
        CaptureOutcome::NothingToCapture => println!("Nothing to capture"),
        CaptureOutcome::CopyFailed => {
            bail!("Could not send the copy keystroke; check input permissions")
        }
    }
    Ok(())
}

fn report_selection(outcome: SelectionOutcome) {
    match outcome {
        SelectionOutcome::Restored(kind) => println!("✓ Pasted {kind}"),
        SelectionOutcome::Deleted(index) => println!("✓ Deleted item {}", index + 1),
        SelectionOutcome::DeletedAll => println!("✓ Stack cleared"),
        SelectionOutcome::Ignored => {}
    }
}

fn handle_paste_at(app: &mut App<FileDefaults>, index: usize) -> Result<()> {
    match app.restore_at(to_position(index)?)? {
        RestoreOutcome::Restored(kind) => println!("✓ Pasted {kind}"),
        RestoreOutcome::NoSuchItem => {
            bail!("No item {index} on the stack ({} items)", app.store().len())
        }
    }
    Ok(())
}

fn handle_delete_all(app: &mut App<FileDefaults>, yes: bool) -> Result<()> {
    let count = app.store().len();
    if count == 0 {
        println!("Stack is empty");
        return Ok(());
    }

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("Delete all {count} items?"))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

    if confirmed {
        app.delete_all();
        println!("✓ Deleted {count} items");
    } else {
        println!("Nothing deleted");
    }
    Ok(())
}

fn handle_capacity(mut store: StackStore<FileDefaults>, value: Option<usize>) -> Result<()> {
    match value {
        Some(capacity) => {
            store.set_capacity(capacity)?;
            println!("✓ Stack holds up to {capacity} items");
        }
        None => println!(
            "Capacity: {} ({}/{} used, allowed {MIN_CAPACITY}-{MAX_CAPACITY})",
            store.capacity(),
            store.len(),
            store.capacity()
        ),
    }
    Ok(())
}

fn handle_shortcuts(config: &Config) {
    let shortcuts = ShortcutMap::from_config(&config.shortcuts);

    for action in Action::ALL {
        let chord = shortcuts
            .chord_for(action)
            .map(|chord| chord.to_string())
            .unwrap_or_default();
        println!("{chord:<16} {action:<18} {}", action.description());
    }
}

fn handle_list(store: &StackStore<FileDefaults>) {
    if store.is_empty() {
        println!("Stack is empty ({} slots)", store.capacity());
        return;
    }

    println!("\n📋 Clipboard stack - {}/{} items\n", store.len(), store.capacity());

    for (idx, snapshot) in store.items().iter().enumerate() {
        let label = fit_to_width(&single_line(&snapshot.preview_label()), LIST_LABEL_WIDTH);
        let time = snapshot.captured_at().with_timezone(&Local).format("%b %d %H:%M");
        println!(
            "{:>3}. {:<width$}  {}  {}",
            idx + 1,
            label,
            time,
            snapshot.kind(),
            width = LIST_LABEL_WIDTH
        );
    }

    println!();
}
