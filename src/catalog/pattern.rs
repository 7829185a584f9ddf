//! Name filters: SQL `LIKE` patterns and excluded system names.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::CatalogResult;

/// Databases that are never listed.
pub const DEFAULT_EXCLUDED_DATABASES: &str = "admin|config|local|system";

/// Collections that are never listed.
pub const DEFAULT_EXCLUDED_COLLECTIONS: &str =
    r"(system\.(namespace|indexes|profiles|js|views))|__sql_schemas";

static EXCLUDED_DATABASES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&anchored(DEFAULT_EXCLUDED_DATABASES)).unwrap());

static EXCLUDED_COLLECTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&anchored(DEFAULT_EXCLUDED_COLLECTIONS)).unwrap());

fn anchored(expr: &str) -> String {
    format!("^(?:{expr})$")
}

/// A compiled SQL `LIKE` pattern.
///
/// `%` matches any run of characters, `_` exactly one, and a backslash
/// makes the next character literal. A missing pattern matches every name.
#[derive(Debug, Clone, Default)]
pub struct NamePattern {
    regex: Option<Regex>,
}

impl NamePattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn new(pattern: Option<&str>) -> CatalogResult<Self> {
        let regex = pattern.map(|p| Regex::new(&like_to_regex(p))).transpose()?;
        Ok(Self { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().map_or(true, |re| re.is_match(name))
    }
}

/// Translate a `LIKE` pattern into an anchored regular expression.
pub fn like_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?s)^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => out.push_str(".*"),
            '_' => out.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => out.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4]))),
                None => out.push_str(r"\\"),
            },
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');
    out
}

/// Database and collection names hidden from every listing.
///
/// The defaults borrow the process-wide compiled expressions.
#[derive(Debug, Clone)]
pub struct Exclusions {
    databases: Cow<'static, Regex>,
    collections: Cow<'static, Regex>,
}

impl Default for Exclusions {
    fn default() -> Self {
        Self {
            databases: Cow::Borrowed(&*EXCLUDED_DATABASES),
            collections: Cow::Borrowed(&*EXCLUDED_COLLECTIONS),
        }
    }
}

impl Exclusions {
    /// Compile exclusion expressions; each must match a whole name.
    pub fn new(databases: &str, collections: &str) -> CatalogResult<Self> {
        Ok(Self {
            databases: Cow::Owned(Regex::new(&anchored(databases))?),
            collections: Cow::Owned(Regex::new(&anchored(collections))?),
        })
    }

    /// Empty database names are never listed.
    pub fn allows_database(&self, name: &str) -> bool {
        !name.is_empty() && !self.databases.is_match(name)
    }

    pub fn allows_collection(&self, name: &str) -> bool {
        !self.collections.is_match(name)
    }
}
