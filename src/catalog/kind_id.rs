crate::define_id_enum! {
    /// Container kind identifier. Unrecognized kinds load as `Custom`.
    ContainerKindId {
        Next => "next" : "Next.js" | "nextjs" | "next.js",
        SvelteKit => "sveltekit" : "SvelteKit" | "svelte-kit",
        Nuxt => "nuxt" : "Nuxt" | "nuxtjs",
        Laravel => "laravel" : "Laravel",
        Express => "express" : "Express" | "expressjs",
        Postgres => "postgres" : "PostgreSQL" | "postgresql",
        MySql => "mysql" : "MySQL",
        Redis => "redis" : "Redis",
        Adminer => "adminer" : "Adminer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_id_serializes_to_slug() {
        assert_eq!(
            serde_json::to_string(&ContainerKindId::Next).unwrap(),
            "\"next\""
        );
        assert_eq!(
            serde_json::to_string(&ContainerKindId::MySql).unwrap(),
            "\"mysql\""
        );
    }

    #[test]
    fn test_kind_id_aliases_resolve() {
        assert_eq!(
            ContainerKindId::from_slug("nextjs"),
            Some(ContainerKindId::Next)
        );
        assert_eq!(
            ContainerKindId::from_slug("PostgreSQL"),
            Some(ContainerKindId::Postgres)
        );
        assert_eq!(ContainerKindId::from_slug("django"), None);
    }

    #[test]
    fn test_unknown_kind_deserializes_to_custom() {
        let id: ContainerKindId = serde_json::from_str("\"django\"").unwrap();
        assert_eq!(id, ContainerKindId::Custom("django".to_string()));
        assert!(id.is_custom());
        assert_eq!(id.display_name(), "django");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"django\""
        );
    }

    #[test]
    fn test_all_variants_excludes_custom() {
        assert!(ContainerKindId::all_variants()
            .iter()
            .all(|id| !id.is_custom()));
        assert_eq!(ContainerKindId::all_variants().len(), 9);
    }
}
