pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod item;
pub mod list;
pub mod remote;
pub mod time;
pub mod ui;
pub mod wire;
