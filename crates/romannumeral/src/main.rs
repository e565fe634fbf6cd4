use crate::prelude::*;
use clap::Parser;

mod convert;
mod error;
mod prelude;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Convert integers between 1 and 3999 to Roman numerals"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(
        long,
        env = "ROMANNUMERAL_VERBOSE",
        global = true,
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert a number to its Roman numeral
    Convert(crate::convert::App),

    /// Roman numeral conversion HTTP server
    Serve(crate::server::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Convert(sub_app) => crate::convert::run(sub_app, app.global).await,
        SubCommands::Serve(sub_app) => crate::server::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
