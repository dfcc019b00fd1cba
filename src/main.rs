use clap::Parser;
use ioffice::cli::args::Cli;
use ioffice::cli::commands::execute_command;
use ioffice::cli::output;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // stdout carries tables; logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_no_arguments_when_parsing_then_no_subcommand() {
        let cli = Cli::try_parse_from(["ioffice"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.debug, 0);
    }

    #[test]
    fn given_repeated_debug_flag_when_parsing_then_counted() {
        let cli = Cli::try_parse_from(["ioffice", "-dd", "list"]).unwrap();
        assert_eq!(cli.debug, 2);
    }

    #[test]
    fn given_checkin_without_id_when_parsing_then_clap_rejects() {
        assert!(Cli::try_parse_from(["ioffice", "checkin"]).is_err());
    }

    #[test]
    fn given_non_numeric_reservation_id_when_parsing_then_clap_rejects() {
        assert!(Cli::try_parse_from(["ioffice", "cancel", "abc"]).is_err());
    }
}
