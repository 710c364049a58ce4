use super::result::{FileOutcome, GenerationResult};
use crate::artifacts::gitignore::{self, GITIGNORE_FILE};
use crate::artifacts::{self, Artifact, ArtifactSet};
use crate::catalog::ContainerRegistry;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::fs::{materialize, FileSystem, RealFileSystem};
use crate::patchers::PatchOutcome;
use crate::preflight::{GitWorkingTree, WorkingTree, WorkingTreeState};
use crate::project::ProjectConfig;
use crate::validation::Validator;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Turns a project configuration into a deployment bundle on disk
pub struct Generator {
    registry: ContainerRegistry,
    validator: Validator,
    settings: GeneratorConfig,
    fs: Box<dyn FileSystem>,
    working_tree: Box<dyn WorkingTree>,
}

impl Generator {
    pub fn new(settings: GeneratorConfig) -> Self {
        Self {
            registry: ContainerRegistry::with_defaults(),
            validator: Validator::new(),
            settings,
            fs: Box::new(RealFileSystem::new()),
            working_tree: Box::new(GitWorkingTree),
        }
    }

    pub fn with_file_system(mut self, fs: Box<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_working_tree(mut self, working_tree: Box<dyn WorkingTree>) -> Self {
        self.working_tree = working_tree;
        self
    }

    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &GeneratorConfig {
        &self.settings
    }

    /// Validate and compile without touching disk
    pub fn render(&self, config: &ProjectConfig) -> Result<ArtifactSet, GenerationError> {
        let errors = self.validator.errors(config);
        if !errors.is_empty() {
            return Err(GenerationError::InvalidConfig(errors));
        }

        let mut set = artifacts::compile_all(config, &self.registry);
        let mut warnings = self.validator.warnings(config, &self.registry);
        warnings.append(&mut set.warnings);
        set.warnings = warnings;
        Ok(set)
    }

    /// Run the whole pipeline against `root`. Every failure is folded into
    /// the returned result.
    pub fn generate(&self, config: &ProjectConfig, root: &Path) -> GenerationResult {
        let start = Instant::now();
        info!("Generating deployment bundle in {}", root.display());

        let mut files = Vec::new();
        let mut warnings = Vec::new();

        match self.run(config, root, &mut files, &mut warnings) {
            Ok(()) => {
                info!(
                    files = files.len(),
                    warnings = warnings.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Generation complete"
                );
                GenerationResult::succeeded(files, warnings)
            }
            Err(e) => {
                warn!(kind = %e.kind(), "Generation failed: {}", e);
                GenerationResult::failed(&e, files, warnings)
            }
        }
    }

    fn run(
        &self,
        config: &ProjectConfig,
        root: &Path,
        files: &mut Vec<FileOutcome>,
        warnings: &mut Vec<String>,
    ) -> Result<(), GenerationError> {
        if !self.fs.exists(root) {
            return Err(GenerationError::Generation(format!(
                "Project root {} does not exist",
                root.display()
            )));
        }

        info!("Phase: Preflight");
        self.preflight(root)?;

        info!("Phase: Compile");
        let set = self.render(config)?;
        warnings.extend(set.warnings.iter().cloned());

        let patches = if self.settings.patch_framework_configs {
            info!("Phase: PatchFrameworkConfigs");
            let outcome = self.patch_framework_configs(config, root);
            warnings.extend(outcome.warnings.iter().cloned());
            outcome.edits
        } else {
            Vec::new()
        };

        info!("Phase: Materialize");
        files.extend(materialize(self.fs.as_ref(), root, &set.artifacts));
        files.extend(
            materialize(self.fs.as_ref(), root, &patches)
                .into_iter()
                .map(FileOutcome::into_patched),
        );

        if self.settings.update_gitignore {
            info!("Phase: Gitignore");
            if let Some(outcome) = self.update_gitignore(root) {
                files.push(outcome);
            }
        }

        let failed = files.iter().filter(|f| f.is_failed()).count();
        if failed > 0 {
            return Err(GenerationError::WriteFailed {
                failed,
                total: files.len(),
            });
        }

        Ok(())
    }

    fn preflight(&self, root: &Path) -> Result<(), GenerationError> {
        if self.settings.skip_preflight {
            debug!("Preflight check skipped");
            return Ok(());
        }

        match self.working_tree.state(root)? {
            WorkingTreeState::Clean => Ok(()),
            WorkingTreeState::Dirty { changed } => {
                Err(GenerationError::UncommittedChanges { changed })
            }
            WorkingTreeState::NotARepository => {
                Err(GenerationError::NotARepository(root.to_path_buf()))
            }
        }
    }

    fn patch_framework_configs(&self, config: &ProjectConfig, root: &Path) -> PatchOutcome {
        let mut outcome = PatchOutcome::default();

        for container in &config.containers {
            let Some(patcher) = self
                .registry
                .get(&container.kind)
                .and_then(|kind| kind.config_patcher())
            else {
                continue;
            };

            let context_dir = container.context_dir().unwrap_or_else(PathBuf::new);
            debug!(
                container = %container.internal_name,
                patcher = patcher.name(),
                "Patching framework config"
            );
            outcome.merge(patcher.patch(self.fs.as_ref(), root, &context_dir));
        }

        outcome
    }

    fn update_gitignore(&self, root: &Path) -> Option<FileOutcome> {
        let path = root.join(GITIGNORE_FILE);
        let existing = if self.fs.is_file(&path) {
            match self.fs.read_to_string(&path) {
                Ok(content) => Some(content),
                Err(e) => return Some(FileOutcome::failed(GITIGNORE_FILE, format!("{:#}", e))),
            }
        } else {
            None
        };

        let merged = gitignore::merge(existing.as_deref())?;
        materialize(self.fs.as_ref(), root, &[Artifact::new(GITIGNORE_FILE, merged)])
            .into_iter()
            .next()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
