mod cli;
mod commands;
mod infra;

use firesafe::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
