/// Declares a closed identifier enum with a `Custom(String)` fallback.
///
/// Each variant carries its slug (the serialized form), a display name and
/// optional extra slugs that parse to the same variant. Any other string
/// deserializes to `Custom`, so unrecognized identifiers survive a load and
/// can be reported instead of rejected.
#[macro_export]
macro_rules! define_id_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $slug:literal : $display_name:literal
                $( | $alias:literal )*
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            Custom(String),
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.slug())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from_slug(&s).unwrap_or(Self::Custom(s)))
            }
        }

        impl $enum_name {
            pub fn slug(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $slug,
                    )*
                    Self::Custom(slug) => slug.as_str(),
                }
            }

            pub fn display_name(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $display_name,
                    )*
                    Self::Custom(slug) => slug.as_str(),
                }
            }

            pub fn from_slug(slug: &str) -> Option<Self> {
                match slug.trim().to_ascii_lowercase().as_str() {
                    $(
                        $slug $(| $alias)* => Some(Self::$variant),
                    )*
                    _ => None,
                }
            }

            pub fn is_custom(&self) -> bool {
                matches!(self, Self::Custom(_))
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.slug())
            }
        }
    };
}
