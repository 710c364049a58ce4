//! SvelteKit frontend served by adapter-node

use super::*;
use crate::patchers::SvelteKitConfigPatcher;

pub struct SvelteKitKind;

impl ContainerKind for SvelteKitKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::SvelteKit
    }

    fn type_class(&self) -> Option<TypeClass> {
        Some(TypeClass::Frontend)
    }

    fn internal_port(&self) -> u16 {
        3000
    }

    // adapter-node rejects cross-origin form posts unless ORIGIN matches
    fn public_origin_keys(&self) -> Vec<&'static str> {
        vec!["ORIGIN"]
    }

    fn dockerfile(&self, internal_port: u16) -> Option<String> {
        Some(format!(
            r#"FROM node:alpine

WORKDIR /app
COPY package.json ./
RUN npm install --force

COPY . .
RUN npm run build

ENV PORT={port}

CMD ["node", "build"]

EXPOSE {port}
"#,
            port = internal_port
        ))
    }

    fn config_patcher(&self) -> Option<Box<dyn ConfigPatcher>> {
        Some(Box::new(SvelteKitConfigPatcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sveltekit_dockerfile() {
        let dockerfile = SvelteKitKind.dockerfile(3000).unwrap();
        assert!(dockerfile.contains("RUN npm install --force"));
        assert!(dockerfile.contains(r#"CMD ["node", "build"]"#));
        assert!(dockerfile.contains("EXPOSE 3000"));
    }

    #[test]
    fn test_sveltekit_origin_is_public() {
        assert_eq!(SvelteKitKind.public_origin_keys(), vec!["ORIGIN"]);
        assert!(!SvelteKitKind.centralizes_env_at_root());
    }
}
