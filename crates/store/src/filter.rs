/// Listing criteria: free-text search over code, name and serial, plus exact
/// filters on location and category.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub search: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub category: Option<String>,
    /// Include soft-deleted records (`deleted != 0`).
    pub include_deleted: bool,
}

impl AssetFilter {
    /// WHERE clause (with leading space, or empty) and its positional arguments.
    pub(crate) fn to_sql(&self) -> (String, Vec<String>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(text) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            args.push(format!("%{}%", escape_like(text)));
            let n = args.len();
            conditions.push(format!(
                "(codigo LIKE ?{n} ESCAPE '\\' OR nombre LIKE ?{n} ESCAPE '\\' OR serie LIKE ?{n} ESCAPE '\\')"
            ));
        }

        for (column, value) in [
            ("edificio", &self.building),
            ("nivel", &self.floor),
            ("categoria", &self.category),
        ] {
            if let Some(v) = value {
                args.push(v.clone());
                conditions.push(format!("{column} = ?{}", args.len()));
            }
        }

        if !self.include_deleted {
            conditions.push("COALESCE(deleted, 0) = 0".to_string());
        }

        if conditions.is_empty() {
            (String::new(), args)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), args)
        }
    }
}

fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
