use super::*;

pub struct MySqlKind;

impl ContainerKind for MySqlKind {
    fn id(&self) -> ContainerKindId {
        ContainerKindId::MySql
    }

    fn type_class(&self) -> Option<TypeClass> {
        Some(TypeClass::Database)
    }

    fn internal_port(&self) -> u16 {
        3306
    }

    fn image(&self) -> Option<&'static str> {
        Some("mysql:8.0")
    }

    fn default_env_keys(&self) -> Vec<&'static str> {
        vec![
            "MYSQL_ROOT_PASSWORD",
            "MYSQL_USER",
            "MYSQL_PASSWORD",
            "MYSQL_DATABASE",
        ]
    }

    fn data_dir(&self) -> Option<&'static str> {
        Some("/var/lib/mysql")
    }
}
