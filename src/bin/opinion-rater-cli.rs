use opinion_rater::cli::{self, CliCommand};
use opinion_rater::config;
use opinion_rater::http_client::UreqTransport;
use opinion_rater::logging::{self, ConsoleTarget};

fn main() {
    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    };
    if options.command != CliCommand::Help
        && let Err(err) = logging::init(ConsoleTarget::Stderr)
    {
        eprintln!("Logging disabled: {err}");
    }

    let settings = match config::load_or_default() {
        Ok(settings) => settings,
        Err(err) if options.endpoint.is_some() => {
            tracing::warn!("Ignoring unreadable config: {err}");
            config::AppSettings::default()
        }
        Err(err) => {
            eprintln!("Failed to load config: {err}");
            std::process::exit(2);
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = cli::run(
        options,
        settings,
        UreqTransport,
        &mut stdin.lock(),
        &mut stdout.lock(),
    );
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
