//! Schema allow-list and identifier qualification
//!
//! Schema and table names cannot be bound as query parameters, so every
//! identifier that is interpolated into SQL text must come out of
//! [`SchemaRegistry`]: a [`SchemaRef`] can only be obtained through
//! [`SchemaRegistry::resolve`], and the registry only admits names that
//! were configured AND match the identifier charset. Quoting lives in one
//! place ([`SchemaRef::table`]).

use crate::utils::AppError;

const FALLBACK_SCHEMA: &str = "public";

/// Maximum identifier length accepted (PostgreSQL's NAMEDATALEN - 1).
const MAX_IDENT_LEN: usize = 63;

/// Allow-list of database schemas the API may target.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    allowed: Vec<String>,
}

impl SchemaRegistry {
    /// Build the registry from configured names. Entries that are empty or
    /// fail the identifier check are dropped with a warning; an empty
    /// result falls back to `public`.
    pub fn from_names(names: &[String]) -> Self {
        let mut allowed = Vec::new();
        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if !is_valid_identifier(name) {
                tracing::warn!(schema = name, "Ignoring invalid schema name in ALLOWED_SCHEMAS");
                continue;
            }
            if !allowed.iter().any(|s| s == name) {
                allowed.push(name.to_string());
            }
        }

        if allowed.is_empty() {
            allowed.push(FALLBACK_SCHEMA.to_string());
        }

        Self { allowed }
    }

    /// The default schema (first configured entry).
    pub fn default_schema(&self) -> &str {
        &self.allowed[0]
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Resolve a caller-supplied schema selector against the allow-list.
    /// `None` yields the default schema; anything not configured is
    /// rejected before it can reach SQL.
    pub fn resolve(&self, requested: Option<&str>) -> Result<SchemaRef, AppError> {
        match requested {
            None => Ok(SchemaRef {
                name: self.allowed[0].clone(),
            }),
            Some(name) => self
                .allowed
                .iter()
                .find(|s| s.as_str() == name)
                .map(|s| SchemaRef { name: s.clone() })
                .ok_or_else(|| AppError::schema_not_allowed(name)),
        }
    }
}

/// A schema name that passed the allow-list. Only the registry can
/// construct one.
#[derive(Debug, Clone)]
pub struct SchemaRef {
    name: String,
}

impl SchemaRef {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quoted `"schema"."table"` reference for SQL interpolation.
    pub fn table(&self, table: &str) -> String {
        debug_assert!(is_valid_identifier(table));
        format!("\"{}\".\"{}\"", self.name, table)
    }
}

fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_IDENT_LEN
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> SchemaRegistry {
        let owned: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        SchemaRegistry::from_names(&owned)
    }

    #[test]
    fn test_empty_config_falls_back_to_public() {
        let reg = registry(&[]);
        assert_eq!(reg.default_schema(), "public");
        assert_eq!(reg.allowed(), ["public"]);
    }

    #[test]
    fn test_first_entry_is_default() {
        let reg = registry(&["tienda", "public"]);
        assert_eq!(reg.default_schema(), "tienda");
    }

    #[test]
    fn test_invalid_identifiers_are_dropped() {
        let reg = registry(&["good_1", "bad-name", "\"x\"; DROP TABLE t;--", ""]);
        assert_eq!(reg.allowed(), ["good_1"]);
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let reg = registry(&["public", " public", "public"]);
        assert_eq!(reg.allowed(), ["public"]);
    }

    #[test]
    fn test_resolve_none_yields_default() {
        let reg = registry(&["tienda", "bodega"]);
        assert_eq!(reg.resolve(None).unwrap().name(), "tienda");
    }

    #[test]
    fn test_resolve_listed_schema() {
        let reg = registry(&["tienda", "bodega"]);
        assert_eq!(reg.resolve(Some("bodega")).unwrap().name(), "bodega");
    }

    #[test]
    fn test_resolve_rejects_unlisted_schema() {
        let reg = registry(&["public"]);
        assert!(reg.resolve(Some("pg_catalog")).is_err());
        assert!(reg.resolve(Some("")).is_err());
    }

    #[test]
    fn test_table_qualification_is_quoted() {
        let reg = registry(&["tienda"]);
        let schema = reg.resolve(None).unwrap();
        assert_eq!(schema.table("inv_items"), "\"tienda\".\"inv_items\"");
    }
}
