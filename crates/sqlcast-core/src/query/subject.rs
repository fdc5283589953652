//! FROM subjects: table references and derived tables.

use std::sync::atomic::{AtomicU64, Ordering};

use super::expr::ColumnRef;
use super::select::Select;

static NEXT_SUBJECT: AtomicU64 = AtomicU64::new(0);

/// Identity of a subject. Clones of a subject share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectId(u64);

impl SubjectId {
    fn next() -> Self {
        Self(NEXT_SUBJECT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A reference to a table.
///
/// Two calls to [`TableRef::new`] with the same name are distinct subjects
/// (a self-join); clones are the same subject.
#[derive(Debug, Clone)]
pub struct TableRef {
    id: SubjectId,
    name: String,
}

impl TableRef {
    /// Creates a fresh subject for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubjectId::next(),
            name: name.into(),
        }
    }

    /// Subject identity.
    #[must_use]
    pub const fn id(&self) -> SubjectId {
        self.id
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A column of this table.
    #[must_use]
    pub fn col(&self, name: &str) -> ColumnRef {
        ColumnRef {
            subject: Some(self.id),
            name: String::from(name),
            indirection: None,
        }
    }
}

/// A sub-select used as a FROM subject.
#[derive(Debug, Clone)]
pub struct DerivedTable {
    id: SubjectId,
    select: Box<Select>,
}

impl DerivedTable {
    /// Wraps `select` as a fresh subject.
    #[must_use]
    pub fn new(select: Select) -> Self {
        Self {
            id: SubjectId::next(),
            select: Box::new(select),
        }
    }

    /// Subject identity.
    #[must_use]
    pub const fn id(&self) -> SubjectId {
        self.id
    }

    /// The wrapped select.
    #[must_use]
    pub fn select(&self) -> &Select {
        &self.select
    }

    /// A column projected by the wrapped select.
    #[must_use]
    pub fn col(&self, name: &str) -> ColumnRef {
        ColumnRef {
            subject: Some(self.id),
            name: String::from(name),
            indirection: None,
        }
    }
}

/// Anything that can appear in FROM or JOIN.
#[derive(Debug, Clone)]
pub enum Subject {
    /// A table.
    Table(TableRef),
    /// A sub-select.
    Derived(DerivedTable),
}

impl Subject {
    /// Subject identity.
    #[must_use]
    pub const fn id(&self) -> SubjectId {
        match self {
            Self::Table(table) => table.id,
            Self::Derived(derived) => derived.id,
        }
    }
}

impl From<TableRef> for Subject {
    fn from(table: TableRef) -> Self {
        Self::Table(table)
    }
}

impl From<&TableRef> for Subject {
    fn from(table: &TableRef) -> Self {
        Self::Table(table.clone())
    }
}

impl From<DerivedTable> for Subject {
    fn from(derived: DerivedTable) -> Self {
        Self::Derived(derived)
    }
}
