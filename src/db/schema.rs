pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    category_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    category_type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    recipient_or_payer TEXT NOT NULL,
    amount             TEXT NOT NULL,
    type               TEXT NOT NULL,
    date               TEXT NOT NULL,
    category_id        INTEGER
);

CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id);
CREATE INDEX IF NOT EXISTS idx_transactions_type ON transactions(type);

CREATE TABLE IF NOT EXISTS budgets (
    budget_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id   INTEGER NOT NULL,
    budget_amount TEXT NOT NULL,
    start_date    TEXT NOT NULL,
    end_date      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_budgets_category ON budgets(category_id);

CREATE TABLE IF NOT EXISTS goals (
    goal_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL,
    goal_target TEXT NOT NULL,
    due_date    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_goals_category ON goals(category_id);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
