use super::kinds::*;
use super::{ContainerKindId, TypeClass};
use std::collections::HashMap;

/// Minimum similarity before an unknown kind gets a "did you mean" hint
const SUGGESTION_THRESHOLD: f64 = 0.7;

pub struct ContainerRegistry {
    kinds: HashMap<ContainerKindId, Box<dyn ContainerKind>>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for id in ContainerKindId::all_variants() {
            let kind: Box<dyn ContainerKind> = match id {
                ContainerKindId::Next => Box::new(NextKind),
                ContainerKindId::SvelteKit => Box::new(SvelteKitKind),
                ContainerKindId::Nuxt => Box::new(NuxtKind),
                ContainerKindId::Laravel => Box::new(LaravelKind),
                ContainerKindId::Express => Box::new(ExpressKind),
                ContainerKindId::Postgres => Box::new(PostgresKind),
                ContainerKindId::MySql => Box::new(MySqlKind),
                ContainerKindId::Redis => Box::new(RedisKind),
                ContainerKindId::Adminer => Box::new(AdminerKind),
                ContainerKindId::Custom(_) => continue,
            };
            registry.kinds.insert(id.clone(), kind);
        }

        registry
    }

    pub fn get(&self, id: &ContainerKindId) -> Option<&dyn ContainerKind> {
        self.kinds.get(id).map(|k| k.as_ref())
    }

    /// Known kinds in declaration order
    pub fn all(&self) -> Vec<&dyn ContainerKind> {
        ContainerKindId::all_variants()
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    pub fn type_class(&self, id: &ContainerKindId) -> Option<TypeClass> {
        self.get(id).and_then(|k| k.type_class())
    }

    /// Internal port of the kind; unknown kinds listen on their published port.
    pub fn internal_port(&self, id: &ContainerKindId, external_port: u16) -> u16 {
        self.get(id)
            .map(|k| k.internal_port())
            .unwrap_or(external_port)
    }

    pub fn image(&self, id: &ContainerKindId) -> Option<&'static str> {
        self.get(id).and_then(|k| k.image())
    }

    pub fn is_prebuilt(&self, id: &ContainerKindId) -> bool {
        self.get(id).map(|k| k.is_prebuilt()).unwrap_or(false)
    }

    pub fn data_dir(&self, id: &ContainerKindId) -> Option<&'static str> {
        self.get(id).and_then(|k| k.data_dir())
    }

    pub fn centralizes_env_at_root(&self, id: &ContainerKindId) -> bool {
        self.get(id)
            .map(|k| k.centralizes_env_at_root())
            .unwrap_or(false)
    }

    pub fn public_origin_keys(&self, id: &ContainerKindId) -> Vec<&'static str> {
        self.get(id)
            .map(|k| k.public_origin_keys())
            .unwrap_or_default()
    }

    /// Closest known kind for a misspelled slug
    pub fn suggest(&self, slug: &str) -> Option<ContainerKindId> {
        let slug = slug.to_ascii_lowercase();
        self.all()
            .into_iter()
            .map(|k| {
                let id = k.id();
                let score = strsim::jaro_winkler(&slug, id.slug());
                (id, score)
            })
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
