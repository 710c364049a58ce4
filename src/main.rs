use ezdeploy::cli::commands::{CliArgs, Commands};
use ezdeploy::cli::handlers::{handle_generate, handle_kinds, handle_render};
use ezdeploy::util::logging::{level_from_verbosity, parse_level};
use ezdeploy::{init_logging, LoggingConfig, VERSION};

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("ezdeploy v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args),
        Commands::Render(render_args) => handle_render(render_args),
        Commands::Kinds(kinds_args) => handle_kinds(kinds_args),
    };

    std::process::exit(exit_code);
}

/// `--log-level` wins over `-v`/`-q`, which win over `EZDEPLOY_LOG_LEVEL`
fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if let Some(level) = level_from_verbosity(args.verbose, args.quiet) {
        config.level = level;
    }

    init_logging(config);
}
