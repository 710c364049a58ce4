//! `deploy.sh`, first-time provisioning of a fresh Ubuntu host
//!
//! Phases run in a fixed order and each one is safe to repeat: packages,
//! swap, Docker, checkout, env files, Nginx with TLS, compose up.

use super::nginx::certificate_dir;
use super::shell::{self, ScriptBuilder};
use super::CompileContext;
use crate::project::types::to_slash;

pub const SWAP_SIZE: &str = "1G";
pub const HEREDOC_DELIMITER: &str = "EOF";

/// Single-quoted so compose and dotenv loaders take the value literally
/// (no `$` interpolation, no ` #` comments). Validation rejects `'` in values.
pub fn env_line(key: &str, value: &str) -> String {
    format!("{}='{}'", key, value)
}

pub fn compile(ctx: &CompileContext<'_>) -> String {
    let config = ctx.config;
    let mut script = ScriptBuilder::new();

    script
        .section("Script variables")
        .lines(shell::repository_variables(config))
        .line(format!("DOMAIN=\"{}\"", config.domain.trim()))
        .line(format!("EMAIL=\"{}\"", config.contact_email.trim()))
        .line(format!("NGINX_CONFIG=\"{}\"", config.proxy_config_name));

    script.section("Update system packages").lines([
        "echo \"Updating system packages...\"",
        "sudo apt-get update",
        "sudo apt-get upgrade -y",
    ]);

    script.section("Add swap space").lines([
        "if [ ! -f /swapfile ]; then".to_string(),
        "  echo \"Adding swap space...\"".to_string(),
        format!("  sudo fallocate -l {} /swapfile", SWAP_SIZE),
        "  sudo chmod 600 /swapfile".to_string(),
        "  sudo mkswap /swapfile".to_string(),
        "  sudo swapon /swapfile".to_string(),
        "  echo '/swapfile none swap sw 0 0' | sudo tee -a /etc/fstab".to_string(),
        "else".to_string(),
        "  echo \"Swap file already exists, skipping.\"".to_string(),
        "fi".to_string(),
    ]);

    script.section("Install Docker and the compose plugin").lines([
        "if ! command -v docker > /dev/null 2>&1; then",
        "  echo \"Installing Docker...\"",
        "  sudo apt-get install -y ca-certificates curl",
        "  sudo install -m 0755 -d /etc/apt/keyrings",
        "  sudo curl -fsSL https://download.docker.com/linux/ubuntu/gpg -o /etc/apt/keyrings/docker.asc",
        "  sudo chmod a+r /etc/apt/keyrings/docker.asc",
        "  echo \"deb [arch=$(dpkg --print-architecture) signed-by=/etc/apt/keyrings/docker.asc] https://download.docker.com/linux/ubuntu $(. /etc/os-release && echo \"$VERSION_CODENAME\") stable\" | sudo tee /etc/apt/sources.list.d/docker.list > /dev/null",
        "  sudo apt-get update",
        "  sudo apt-get install -y docker-ce docker-ce-cli containerd.io docker-buildx-plugin docker-compose-plugin",
        "else",
        "  echo \"Docker already installed, skipping.\"",
        "fi",
    ]);

    script.section("Fetch the application source");
    shell::checkout(&mut script);

    if !ctx.env_plan.files.is_empty() {
        script
            .section("Write environment files (replace placeholder values before running)")
            .line("echo \"Writing environment files...\"");
        for file in &ctx.env_plan.files {
            let path = file.path_str();
            if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                script.line(format!("mkdir -p \"{}\"", to_slash(parent)));
            }
            script.line(format!("cat > \"{}\" << '{}'", path, HEREDOC_DELIMITER));
            for entry in &file.entries {
                script.line(env_line(&entry.key, &entry.value));
            }
            script.line(HEREDOC_DELIMITER);
        }
    }

    script.section("Install Nginx and issue the TLS certificate").lines([
        "sudo apt-get install -y nginx certbot".to_string(),
        "sudo systemctl stop nginx".to_string(),
        format!("if [ ! -d \"{}\" ]; then", certificate_dir("$DOMAIN")),
        "  echo \"Requesting certificate for $DOMAIN...\"".to_string(),
        "  sudo certbot certonly --standalone -d \"$DOMAIN\" --non-interactive --agree-tos -m \"$EMAIL\" --pre-hook \"systemctl stop nginx\" --post-hook \"systemctl start nginx\"".to_string(),
        "else".to_string(),
        "  echo \"Certificate for $DOMAIN already exists, skipping.\"".to_string(),
        "fi".to_string(),
    ]);

    script.section("Activate the Nginx site").lines([
        "sudo cp \"$APP_DIR/$NGINX_CONFIG\" \"/etc/nginx/sites-available/$NGINX_CONFIG\"",
        "sudo ln -sf \"/etc/nginx/sites-available/$NGINX_CONFIG\" \"/etc/nginx/sites-enabled/$NGINX_CONFIG\"",
    ]);
    if config.proxy_config_name != "default" {
        script.line("sudo rm -f /etc/nginx/sites-enabled/default");
    }
    script.lines(["sudo nginx -t", "sudo systemctl restart nginx"]);

    let compose = shell::COMPOSE_COMMAND;
    script.section("Build and start the containers").lines([
        "echo \"Building and starting containers...\"".to_string(),
        format!("{} up -d --build", compose),
    ]);

    script
        .blank()
        .line("echo \"Deployment complete. Your application is available at https://$DOMAIN\"");

    script.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ContainerKindId, ContainerRegistry};
    use crate::project::{ContainerInstance, ProjectConfig, Repository};
    use crate::redaction::REDACTED_PLACEHOLDER;

    fn config(is_private: bool, include: bool) -> ProjectConfig {
        ProjectConfig {
            containers: vec![
                ContainerInstance::new("web", 3004, ContainerKindId::Next)
                    .with_context("./frontend")
                    .with_proxy("/")
                    .with_env("API_URL", "http://localhost:8080")
                    .with_env("SESSION_SECRET", "abc"),
                ContainerInstance::new("api", 8080, ContainerKindId::Laravel)
                    .with_context("./backend")
                    .with_proxy("/api")
                    .with_env("APP_KEY", "base64:xyz"),
                ContainerInstance::new("db", 9891, ContainerKindId::Postgres)
                    .with_env("POSTGRES_PASSWORD", "pw"),
            ],
            global_env_variables: vec![],
            network_name: Some("shop_net".into()),
            repository: Repository {
                is_private,
                uri: "github.com/acme/shop".into(),
                branch: "main".into(),
            },
            domain: "shop.example.com".into(),
            contact_email: "ops@example.com".into(),
            api_url_variable_name: "API_URL".into(),
            include_sensitive_values: include,
            remote_deploy_path: "/shop".into(),
            proxy_config_name: "shop".into(),
        }
    }

    fn render(config: &ProjectConfig) -> String {
        let registry = ContainerRegistry::with_defaults();
        compile(&CompileContext::new(config, &registry))
    }

    #[test]
    fn test_phases_are_ordered() {
        let script = render(&config(false, false));
        let markers = [
            "apt-get upgrade",
            "fallocate",
            "docker-compose-plugin",
            "git clone",
            "cat > \".env\"",
            "certbot certonly",
            "nginx -t",
            "up -d --build",
        ];

        let positions: Vec<usize> = markers
            .iter()
            .map(|m| script.find(m).unwrap_or_else(|| panic!("missing {}", m)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_env_heredocs() {
        let script = render(&config(false, false));

        assert!(script.contains("cat > \".env\" << 'EOF'"));
        assert!(script.contains("mkdir -p \"backend\""));
        assert!(script.contains("cat > \"backend/.env\" << 'EOF'"));
        assert!(script.contains("cat > \".env.db\" << 'EOF'"));
        assert!(script.contains("API_URL='http://api'\n"));
        assert!(script.contains(&format!("SESSION_SECRET='{}'\n", REDACTED_PLACEHOLDER)));
        assert!(!script.contains("base64:xyz"));
    }

    #[test]
    fn test_sensitive_values_included_on_request() {
        let script = render(&config(false, true));
        assert!(script.contains("SESSION_SECRET='abc'\n"));
        assert!(script.contains("APP_KEY='base64:xyz'\n"));
    }

    #[test]
    fn test_private_repository_uses_token_placeholder() {
        let script = render(&config(true, false));
        assert!(script.contains("GITHUB_TOKEN=\"your-github-token\""));
        assert!(script.contains("REPO_URL=\"https://$GITHUB_TOKEN@github.com/acme/shop.git\""));

        let public = render(&config(false, false));
        assert!(!public.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_idempotent_guards() {
        let script = render(&config(false, false));
        assert!(script.contains("if [ ! -f /swapfile ]; then"));
        assert!(script.contains("if ! command -v docker"));
        assert!(script.contains("if [ -d \"$APP_DIR\" ]; then"));
        assert!(script.contains("if [ ! -d \"/etc/letsencrypt/live/$DOMAIN\" ]; then"));
    }

    #[test]
    fn test_compose_runs_without_shared_env_scope() {
        let script = render(&config(false, false));
        assert!(script.contains("sudo docker compose up -d --build"));
        assert!(!script.contains("--env-file"));
    }

    #[test]
    fn test_site_is_activated_after_certificate_issuance() {
        let script = render(&config(false, false));
        let link = script.find("/etc/nginx/sites-enabled/$NGINX_CONFIG").unwrap();
        let restart = script.rfind("sudo systemctl restart nginx").unwrap();
        let check = script.rfind("sudo nginx -t").unwrap();

        assert!(link < check && check < restart);
        assert!(script.find("--post-hook").unwrap() < link);
        assert!(!script[link..].contains("systemctl start nginx"));
    }

    #[test]
    fn test_env_values_are_single_quoted() {
        let mut config = config(false, true);
        config.containers[1]
            .env_variables
            .push(crate::project::EnvVariable::new("DB_PASSWORD", "pa$s #1"));
        let script = render(&config);
        assert!(script.contains("DB_PASSWORD='pa$s #1'\n"));
        assert_eq!(env_line("EMPTY", ""), "EMPTY=''");
    }

    #[test]
    fn test_default_site_kept_when_config_is_named_default() {
        let mut config = config(false, false);
        config.proxy_config_name = "default".into();
        assert!(!render(&config).contains("rm -f /etc/nginx/sites-enabled/default"));
    }
}
