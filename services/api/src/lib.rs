mod cli;
mod infra;
mod model;
mod routes;
mod server;
mod toolkit;

use excipient_ai::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
