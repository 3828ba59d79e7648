mod check;
mod cli;
mod demo;
mod render;

use laa_eligibility::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
