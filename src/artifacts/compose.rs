//! `docker-compose.yml`
//!
//! Service fields are emitted in a fixed order and only when they apply:
//! build (or image), ports, networks, depends_on, volumes, env_file,
//! environment. Each service reads its variables from its own env file, so
//! two containers may use the same key with different values and secrets
//! never land in this file. Only the API URL is written inline, pointing at
//! the backend service.

use super::CompileContext;
use crate::project::types::to_slash;
use crate::project::ContainerInstance;

pub fn volume_name(container: &ContainerInstance) -> String {
    format!("{}_data", container.internal_name)
}

pub fn compile(ctx: &CompileContext<'_>) -> String {
    let network = ctx
        .topology
        .network_required
        .then(|| ctx.config.network_name_or_default());

    let services: Vec<String> = ctx
        .config
        .containers
        .iter()
        .map(|c| service_block(ctx, c, network))
        .collect();

    let mut sections = vec![format!("services:\n{}", services.join("\n\n"))];

    let volumes: Vec<String> = ctx
        .config
        .containers
        .iter()
        .filter(|c| ctx.registry.data_dir(&c.kind).is_some())
        .map(|c| format!("  {}:", volume_name(c)))
        .collect();
    if !volumes.is_empty() {
        sections.push(format!("volumes:\n{}", volumes.join("\n")));
    }

    if let Some(name) = network {
        sections.push(format!("networks:\n  {}:\n    driver: bridge", name));
    }

    let mut content = sections.join("\n\n");
    content.push('\n');
    content
}

fn service_block(ctx: &CompileContext<'_>, container: &ContainerInstance, network: Option<&str>) -> String {
    let mut lines = vec![format!("  {}:", container.internal_name)];

    match ctx.registry.image(&container.kind) {
        Some(image) => lines.push(format!("    image: {}", image)),
        None => match container.context_dir() {
            Some(_) => {
                lines.push("    build:".to_string());
                lines.push(format!("      context: {}", container.compose_context()));
            }
            None => lines.push("    build: .".to_string()),
        },
    }

    let internal_port = ctx
        .registry
        .internal_port(&container.kind, container.external_port);
    lines.push("    ports:".to_string());
    lines.push(format!(
        "      - \"{}:{}\"",
        container.external_port, internal_port
    ));

    if let Some(name) = network {
        lines.push("    networks:".to_string());
        lines.push(format!("      - {}", name));
    }

    let depends_on = ctx.topology.dependencies_of(&container.internal_name);
    if !depends_on.is_empty() {
        lines.push("    depends_on:".to_string());
        for dependency in depends_on {
            lines.push(format!("      - {}", dependency));
        }
    }

    if let Some(data_dir) = ctx.registry.data_dir(&container.kind) {
        lines.push("    volumes:".to_string());
        lines.push(format!("      - {}:{}", volume_name(container), data_dir));
    }

    let env = ctx.env();
    let env_file = to_slash(&env.env_file_path(container));
    if ctx.env_plan.file(&env_file).is_some() {
        lines.push("    env_file:".to_string());
        lines.push(format!("      - ./{}", env_file));
    }

    let variables = env.container_env(container);

    let api_url: Vec<_> = variables
        .into_iter()
        .filter(|v| env.is_api_url_key(&v.key))
        .collect();
    if !api_url.is_empty() {
        lines.push("    environment:".to_string());
        for variable in api_url {
            lines.push(format!("      {}: \"{}\"", variable.key, variable.value));
        }
    }

    lines.join("\n")
}
