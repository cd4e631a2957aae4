use crate::model::LogisticCompatibilityModel;
use crate::server;
use crate::toolkit::LightweightToolkit;
use clap::{Args, Parser, Subcommand};
use excipient_ai::config::AppConfig;
use excipient_ai::error::AppError;
use excipient_ai::workflows::compatibility::{CompatibilityService, PredictionRequest};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Compatibility Prediction Service",
    about = "Serve or invoke the drug-excipient compatibility predictor from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one drug/excipient pair and print the JSON result
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured model weights path
    #[arg(long)]
    pub(crate) model: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Display name of the drug
    #[arg(long)]
    drug: String,
    /// Display name of the excipient
    #[arg(long)]
    excipient: String,
    /// SMILES descriptor of the drug's structure
    #[arg(long)]
    smiles: String,
    /// Override the configured model weights path
    #[arg(long)]
    model: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
    }
}

fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let weights_path = args.model.unwrap_or(config.model.weights_path);
    let model = LogisticCompatibilityModel::from_path(&weights_path)?;
    let service =
        CompatibilityService::new(Arc::new(LightweightToolkit::new()), Arc::new(model));

    let response = service.predict(&PredictionRequest {
        drug_name: args.drug,
        excipient_name: args.excipient,
        smiles: args.smiles,
    });

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
