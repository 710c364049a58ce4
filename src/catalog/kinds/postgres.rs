use super::*;

pub struct PostgresKind;

impl ContainerKind for PostgresKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::Postgres
    }

    fn type_class(&self) -> Option<TypeClass> {
        Some(TypeClass::Database)
    }

    fn internal_port(&self) -> u16 {
        5432
    }

    fn image(&self) -> Option<&'static str> {
        Some("postgres:16")
    }

    fn default_env_keys(&self) -> Vec<&'static str> {
        vec!["POSTGRES_PASSWORD", "POSTGRES_USER", "POSTGRES_DB"]
    }

    fn data_dir(&self) -> Option<&'static str> {
        Some("/var/lib/postgresql/data")
    }
}
