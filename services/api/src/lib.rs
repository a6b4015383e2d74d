mod cli;
mod generate;
mod infra;
mod routes;
mod server;

use seo_report::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
