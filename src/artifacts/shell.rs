//! Pieces shared by the two deployment scripts

use crate::project::{ProjectConfig, Repository};

pub const TOKEN_VARIABLE: &str = "GITHUB_TOKEN";
pub const TOKEN_PLACEHOLDER: &str = "your-github-token";

/// Line-oriented script text with comment-headed sections
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    lines: Vec<String>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            lines: vec!["#!/bin/bash".to_string(), "set -e".to_string()],
        }
    }

    pub fn section(&mut self, title: &str) -> &mut Self {
        self.blank();
        self.lines.push(format!("# {}", title));
        self
    }

    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Clone URL, with the token placeholder spliced in for private repositories
pub fn repo_url(repository: &Repository) -> String {
    if repository.is_private {
        format!("https://${}@{}.git", TOKEN_VARIABLE, repository.clone_path())
    } else {
        format!("https://{}.git", repository.clone_path())
    }
}

/// Deploy path resolved under the operator's home directory
pub fn app_dir(remote_deploy_path: &str) -> String {
    let relative = remote_deploy_path
        .trim()
        .trim_start_matches('~')
        .trim_matches('/');
    if relative.is_empty() {
        "$HOME".to_string()
    } else {
        format!("$HOME/{}", relative)
    }
}

/// Variable block at the top of both scripts
pub fn repository_variables(config: &ProjectConfig) -> Vec<String> {
    let mut lines = Vec::new();
    if config.repository.is_private {
        lines.push("# Replace with a token that can read the repository".to_string());
        lines.push(format!("{}=\"{}\"", TOKEN_VARIABLE, TOKEN_PLACEHOLDER));
    }
    lines.push(format!("REPO_URL=\"{}\"", repo_url(&config.repository)));
    lines.push(format!("BRANCH=\"{}\"", config.repository.branch));
    lines.push(format!("APP_DIR=\"{}\"", app_dir(&config.remote_deploy_path)));
    lines
}

/// Pull when the checkout exists, clone otherwise
pub fn checkout(builder: &mut ScriptBuilder) {
    builder.lines([
        "if [ -d \"$APP_DIR\" ]; then",
        "  echo \"Pulling latest changes from the repository...\"",
        "  cd \"$APP_DIR\"",
        "  git pull origin \"$BRANCH\"",
        "else",
        "  echo \"Cloning repository from $REPO_URL...\"",
        "  git clone --branch \"$BRANCH\" \"$REPO_URL\" \"$APP_DIR\"",
        "  cd \"$APP_DIR\"",
        "fi",
    ]);
}

/// Services read their own env files, so compose runs without `--env-file`
pub const COMPOSE_COMMAND: &str = "sudo docker compose";

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(is_private: bool) -> Repository {
        Repository {
            is_private,
            uri: "github.com/acme/shop.git".into(),
            branch: "main".into(),
        }
    }

    #[test]
    fn test_repo_url() {
        assert_eq!(repo_url(&repository(false)), "https://github.com/acme/shop.git");
        assert_eq!(
            repo_url(&repository(true)),
            "https://$GITHUB_TOKEN@github.com/acme/shop.git"
        );
    }

    #[test]
    fn test_app_dir() {
        assert_eq!(app_dir("/shop"), "$HOME/shop");
        assert_eq!(app_dir("~/apps/shop/"), "$HOME/apps/shop");
        assert_eq!(app_dir("/"), "$HOME");
    }

    #[test]
    fn test_builder_sections() {
        let mut builder = ScriptBuilder::new();
        builder.section("Say hello").line("echo hello");

        assert_eq!(builder.build(), "#!/bin/bash\nset -e\n\n# Say hello\necho hello\n");
    }
}
