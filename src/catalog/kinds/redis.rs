use super::*;

/// Cache-only Redis; nothing is persisted across restarts.
pub struct RedisKind;

impl ContainerKind for RedisKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::Redis
    }

    fn type_class(&self) -> Option<TypeClass> {
        Some(TypeClass::Database)
    }

    fn internal_port(&self) -> u16 {
        6379
    }

    fn image(&self) -> Option<&'static str> {
        Some("redis:7-alpine")
    }
}
