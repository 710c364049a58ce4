use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Deployment bundle generator for small multi-container web projects
#[derive(Parser, Debug)]
#[command(
    name = "ezdeploy",
    about = "Deployment bundle generator for small multi-container web projects",
    version,
    author,
    long_about = "ezdeploy turns a project description (containers, ports, environment \
                  variables, repository, domain) into Dockerfiles, a compose file, an \
                  Nginx site with TLS, and deploy/update scripts for a single Ubuntu host."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase verbosity (can be used multiple times)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate the deployment bundle into a project",
        long_about = "Checks that the project has no uncommitted changes, validates the \
                      configuration, and writes the bundle into the project root.\n\n\
                      Examples:\n  \
                      ezdeploy generate ezdeploy.yaml\n  \
                      ezdeploy generate ezdeploy.json --root ../shop\n  \
                      ezdeploy generate ezdeploy.toml --skip-preflight --format json"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Print the bundle without writing anything",
        long_about = "Validates and compiles the configuration, then prints the artifacts.\n\n\
                      Examples:\n  \
                      ezdeploy render ezdeploy.yaml\n  \
                      ezdeploy render ezdeploy.yaml --file docker-compose.yml"
    )]
    Render(RenderArgs),

    #[command(about = "List supported container kinds")]
    Kinds(KindsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(value_name = "CONFIG", help = "Project configuration (.json, .yaml, .yml or .toml)")]
    pub config: PathBuf,

    #[arg(
        short = 'r',
        long,
        value_name = "PATH",
        default_value = ".",
        help = "Project root to write into"
    )]
    pub root: PathBuf,

    #[arg(long, help = "Generate even with uncommitted changes or outside a git repository")]
    pub skip_preflight: bool,

    #[arg(long, help = "Write real secret values into the env files instead of placeholders")]
    pub include_sensitive: bool,

    #[arg(long, help = "Leave .gitignore untouched")]
    pub no_gitignore: bool,

    #[arg(long, help = "Do not patch next.config.* / svelte.config.js / package.json")]
    pub no_patch: bool,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(value_name = "CONFIG", help = "Project configuration (.json, .yaml, .yml or .toml)")]
    pub config: PathBuf,

    #[arg(long, help = "Write real secret values into the env files instead of placeholders")]
    pub include_sensitive: bool,

    #[arg(long, value_name = "PATH", help = "Print only this artifact's content")]
    pub file: Option<String>,

    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct KindsArgs {
    #[arg(short = 'f', long, value_enum, default_value = "human", help = "Output format")]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
