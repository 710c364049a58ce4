use serde::{Deserialize, Serialize};
use std::fmt;

/// Tier a container occupies in the service graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeClass {
    Frontend,
    Backend,
    Database,
}

impl TypeClass {
    /// The tier this one depends on. Databases are leaves.
    pub fn next_tier_down(self) -> Option<TypeClass> {
        match self {
            TypeClass::Frontend => Some(TypeClass::Backend),
            TypeClass::Backend => Some(TypeClass::Database),
            TypeClass::Database => None,
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeClass::Frontend => "frontend",
            TypeClass::Backend => "backend",
            TypeClass::Database => "database",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_chain() {
        assert_eq!(
            TypeClass::Frontend.next_tier_down(),
            Some(TypeClass::Backend)
        );
        assert_eq!(
            TypeClass::Backend.next_tier_down(),
            Some(TypeClass::Database)
        );
        assert_eq!(TypeClass::Database.next_tier_down(), None);
    }
}
