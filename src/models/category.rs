#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Names and fixed ids seeded into an empty registry.
pub const DEFAULT_CATEGORIES: &[(i64, &str)] =
    &[(1, "Bills"), (2, "Personal"), (3, "Travel"), (4, "Food")];
