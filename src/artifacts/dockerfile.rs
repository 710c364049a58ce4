//! Per-container Dockerfiles

use super::{Artifact, CompileContext};
use crate::catalog::{ContainerKindId, ContainerRegistry};
use crate::project::ContainerInstance;
use std::path::PathBuf;

pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Dockerfile text for a kind, `None` for prebuilt images and unknown kinds
pub fn compile(registry: &ContainerRegistry, kind: &ContainerKindId, internal_port: u16) -> Option<String> {
    registry.get(kind)?.dockerfile(internal_port)
}

/// Where a container's Dockerfile lives: the root of its build context
pub fn path_for(container: &ContainerInstance) -> PathBuf {
    match container.context_dir() {
        Some(dir) => dir.join(DOCKERFILE_NAME),
        None => PathBuf::from(DOCKERFILE_NAME),
    }
}

pub fn compile_all(ctx: &CompileContext<'_>) -> Vec<Artifact> {
    ctx.config
        .containers
        .iter()
        .filter_map(|container| {
            let port = ctx
                .registry
                .internal_port(&container.kind, container.external_port);
            compile(ctx.registry, &container.kind, port)
                .map(|text| Artifact::new(path_for(container), text))
        })
        .collect()
}
