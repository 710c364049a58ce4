//! `update.sh`, redeploys the latest commit on an already provisioned host

use super::shell::{self, ScriptBuilder};
use super::CompileContext;

pub fn compile(ctx: &CompileContext<'_>) -> String {
    let compose = shell::COMPOSE_COMMAND;
    let mut script = ScriptBuilder::new();

    script
        .section("Script variables")
        .lines(shell::repository_variables(ctx.config));

    script.section("Pull the latest changes from the Git repository");
    shell::checkout(&mut script);

    script.section("Rebuild the Docker images without using cache").lines([
        "echo \"Building Docker containers without cache...\"".to_string(),
        format!("{} build --no-cache", compose),
    ]);

    script.section("Restart the Docker containers after the build").lines([
        "echo \"Restarting Docker containers...\"".to_string(),
        format!("{} down", compose),
        format!("{} up -d", compose),
    ]);

    script.section("Check that at least one service is running").lines([
        format!("if [ -z \"$({} ps --status running -q)\" ]; then", compose),
        "  echo \"Docker containers failed to start. Check logs with 'docker compose logs'.\"".to_string(),
        "  exit 1".to_string(),
        "fi".to_string(),
    ]);

    script
        .blank()
        .line("echo \"Update complete. Your application has been redeployed with the latest changes.\"");

    script.build()
}
