mod common;
mod config;
mod intake;
