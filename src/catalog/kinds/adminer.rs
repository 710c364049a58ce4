use super::*;

/// Database admin UI. Has no tier, so it is never wired as a dependency.
pub struct AdminerKind;

impl ContainerKind for AdminerKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::Adminer
    }

    fn type_class(&self) -> Option<TypeClass> {
        None
    }

    fn internal_port(&self) -> u16 {
        8080
    }

    fn image(&self) -> Option<&'static str> {
        Some("adminer:latest")
    }
}
