//! Subcommand handlers. Each returns the process exit code.

use crate::cli::commands::{GenerateArgs, KindsArgs, RenderArgs};
use crate::cli::output::{OutputFormat, OutputFormatter};
use crate::config::GeneratorConfig;
use crate::pipeline::Generator;
use crate::project::ProjectConfig;
use std::path::Path;
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

fn load_project(path: &Path, include_sensitive: bool) -> Result<ProjectConfig, i32> {
    match ProjectConfig::from_path(path) {
        Ok(mut config) => {
            if include_sensitive {
                config.include_sensitive_values = true;
            }
            Ok(config)
        }
        Err(e) => {
            error!("{}", e);
            Err(EXIT_CONFIG_ERROR)
        }
    }
}

fn emit(rendered: anyhow::Result<String>) -> bool {
    match rendered {
        Ok(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            true
        }
        Err(e) => {
            error!("{:#}", e);
            false
        }
    }
}

pub fn handle_generate(args: &GenerateArgs) -> i32 {
    info!("Generating deployment bundle");
    debug!("Config: {}, root: {}", args.config.display(), args.root.display());

    let project = match load_project(&args.config, args.include_sensitive) {
        Ok(project) => project,
        Err(code) => return code,
    };

    let defaults = GeneratorConfig::default();
    let settings = GeneratorConfig {
        skip_preflight: args.skip_preflight || defaults.skip_preflight,
        update_gitignore: !args.no_gitignore && defaults.update_gitignore,
        patch_framework_configs: !args.no_patch && defaults.patch_framework_configs,
        ..defaults
    };
    debug!("{}", settings);

    if let Err(e) = settings.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your EZDEPLOY_* environment variables.");
        return EXIT_CONFIG_ERROR;
    }

    let result = Generator::new(settings).generate(&project, &args.root);

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    if !emit(formatter.format_generation(&result)) {
        return EXIT_FAILURE;
    }

    if result.success {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

pub fn handle_render(args: &RenderArgs) -> i32 {
    let project = match load_project(&args.config, args.include_sensitive) {
        Ok(project) => project,
        Err(code) => return code,
    };

    let generator = Generator::default();
    let set = match generator.render(&project) {
        Ok(set) => set,
        Err(e) => {
            error!("{}", e);
            return EXIT_FAILURE;
        }
    };

    if let Some(path) = &args.file {
        return match set.get(path) {
            Some(artifact) => {
                print!("{}", artifact.content);
                EXIT_SUCCESS
            }
            None => {
                error!(
                    "No artifact named '{}'. Available: {}",
                    path,
                    set.paths().join(", ")
                );
                EXIT_FAILURE
            }
        };
    }

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    if emit(formatter.format_render(&set)) {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

pub fn handle_kinds(args: &KindsArgs) -> i32 {
    let generator = Generator::default();
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    if emit(formatter.format_kinds(generator.registry())) {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}
