//! Names of generated schema objects.

/// Trigger event used in trigger names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// BEFORE/AFTER INSERT.
    Insert,
    /// BEFORE/AFTER UPDATE.
    Update,
}

impl TriggerEvent {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Insert => "ins",
            Self::Update => "upd",
        }
    }
}

/// `seq_<table>_<column>`
#[must_use]
pub fn sequence(table: &str, column: &str) -> String {
    format!("seq_{table}_{column}")
}

/// `trg_<table>_<column>_<ins|upd>`
#[must_use]
pub fn trigger(table: &str, column: &str, event: TriggerEvent) -> String {
    format!("trg_{table}_{column}_{}", event.suffix())
}

/// `fn_<table>_<column>_<ins|upd>`
#[must_use]
pub fn trigger_function(table: &str, column: &str, event: TriggerEvent) -> String {
    format!("fn_{table}_{column}_{}", event.suffix())
}

/// `ty_<table>_<column>`
#[must_use]
pub fn enum_type(table: &str, column: &str) -> String {
    format!("ty_{table}_{column}")
}

/// `idx_<table>_<index or column>`
#[must_use]
pub fn index(table: &str, suffix: &str) -> String {
    format!("idx_{table}_{suffix}")
}

/// `pk_<table>`
#[must_use]
pub fn primary_key(table: &str) -> String {
    format!("pk_{table}")
}

/// `uq_<table>_<name>`, or the joined columns when unnamed.
#[must_use]
pub fn unique(table: &str, name: Option<&str>, columns: &[String]) -> String {
    match name {
        Some(name) => format!("uq_{table}_{name}"),
        None => format!("uq_{table}_{}", columns.join("_")),
    }
}

/// `fk_<table>_<columns>`
#[must_use]
pub fn foreign_key(table: &str, columns: &[String]) -> String {
    format!("fk_{table}_{}", columns.join("_"))
}

/// `ck_<table>_<name>`, or the 1-based `position` when unnamed.
#[must_use]
pub fn check(table: &str, position: usize, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("ck_{table}_{name}"),
        None => format!("ck_{table}_{position}"),
    }
}

/// `ck_<table>_<column>`
#[must_use]
pub fn column_check(table: &str, column: &str) -> String {
    format!("ck_{table}_{column}")
}

/// `ck_<table>_<column>_range`
#[must_use]
pub fn range_check(table: &str, column: &str) -> String {
    format!("ck_{table}_{column}_range")
}

/// `ck_<table>_<column>_enum`
#[must_use]
pub fn enum_check(table: &str, column: &str) -> String {
    format!("ck_{table}_{column}_enum")
}

/// `ck_<table>_<column>_bool`
#[must_use]
pub fn boolean_check(table: &str, column: &str) -> String {
    format!("ck_{table}_{column}_bool")
}
