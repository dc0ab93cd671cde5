//! Embedded migration SQL

/// A single schema migration
pub struct Migration {
    /// Stable identifier recorded in schema_version
    pub id: &'static str,
    /// SQL applied inside one transaction
    pub sql: &'static str,
}

/// App-store migrations in application order
pub fn app_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_app_schema",
            sql: include_str!("../../migrations/app/001_app_schema.sql"),
        },
        Migration {
            id: "002_seed_run_ledger",
            sql: include_str!("../../migrations/app/002_seed_run_ledger.sql"),
        },
    ]
}

/// Analytics-store migrations in application order
pub fn analytics_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_analytics_schema",
        sql: include_str!("../../migrations/analytics/001_analytics_schema.sql"),
    }]
}
