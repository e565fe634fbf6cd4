#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Roman numeral conversion HTTP server")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,
}
