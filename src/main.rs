use clap::{error::ErrorKind, CommandFactory, Parser};
use pricewatch::{
    app::{self, App},
    cli::Cli,
    utils::logging,
};

#[tokio::main]
async fn main() {
    // Malformed arguments print usage and exit here, before any I/O
    let cli = Cli::parse();

    let prepared = match App::prepare(cli) {
        Err(e) if e.is_fatal() => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
        other => other,
    };

    let log_path = prepared.as_ref().ok().map(App::log_path);
    let _guard = logging::init(log_path.as_deref());

    app::finish(prepared).await;
}
