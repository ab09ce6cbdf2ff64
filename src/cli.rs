use clap::{Parser, Subcommand};
use crate::keybindings::Action;

#[derive(Parser, Debug)]
#[command(name = "clipstack")]
#[command(about = "A stack of clipboard snapshots you can paste back in any order", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the focused selection onto the stack
    Capture,
    /// Paste a stacked item into the focused application
    Paste {
        /// Position as shown by `list`; opens the picker when omitted
        index: Option<usize>,
    },
    /// Remove an item, or every item
    Delete {
        /// Position as shown by `list`; opens the picker when omitted
        index: Option<usize>,

        /// Delete every item on the stack
        #[arg(short, long, conflicts_with = "index")]
        all: bool,

        /// Skip the confirmation for --all
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the stack, newest first (default)
    List,
    /// Show or change how many items the stack holds
    Capacity {
        /// New capacity
        value: Option<usize>,
    },
    /// Show the shortcut bound to each action
    Shortcuts,
    /// Run the handler for an action, for use from a hotkey daemon
    Trigger {
        /// capture_to_stack, paste_from_stack or delete_from_stack
        action: Action,
    },
}
