use clap::Parser;
use clap::error::ErrorKind;
use notion_notes::cli::{self, Cli};
use notion_notes::error::NotesError;
use notion_notes::output;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let err = NotesError::invalid(e.to_string().trim().to_string());
            output::emit(&output::error_envelope(&err));
            std::process::exit(1);
        }
    };

    let (envelope, code) = output::envelope_for(cli::run(&cli.command).await);
    output::emit(&envelope);
    std::process::exit(code);
}
