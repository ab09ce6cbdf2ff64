pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod keybindings;
pub mod notifier;
pub mod stack;
pub mod storage;
pub mod ui;
pub mod utils;
