//! Table dependency resolution.
//!
//! Flattens inheritance, validates cross-table references and orders the
//! materialized tables so that every referenced table is created before the
//! tables referencing it. Ties keep schema input order, so the result is
//! deterministic.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{Column, ForeignKey, Index, NamedCheck, Schema, Table, UniqueSet};

/// A materialized table with its inherited columns and constraints merged in.
#[derive(Debug, Clone)]
pub struct ResolvedTable<'s> {
    /// The declared table.
    pub table: &'s Table,
    /// Effective columns, ancestors first.
    pub columns: Vec<&'s Column>,
    /// Own primary key, or the nearest ancestor's.
    pub primary_key: Option<&'s [String]>,
    /// Unique sets, ancestors first.
    pub unique: Vec<&'s UniqueSet>,
    /// Table checks, ancestors first.
    pub checks: Vec<&'s NamedCheck>,
    /// Column level and table level foreign keys, ancestors first.
    pub foreign_keys: Vec<ForeignKey>,
    /// Table level indexes, ancestors first.
    pub indexes: Vec<&'s Index>,
    /// Materialized tables that must exist first.
    pub dependencies: Vec<&'s str>,
    /// Whether a foreign key points back at the table itself.
    pub self_referencing: bool,
}

impl<'s> ResolvedTable<'s> {
    /// Table name.
    #[must_use]
    pub fn name(&self) -> &'s str {
        &self.table.name
    }

    /// Looks up an effective column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&'s Column> {
        self.columns.iter().copied().find(|c| c.name == name)
    }
}

/// Materialized tables in creation order.
#[derive(Debug, Clone)]
pub struct Resolution<'s> {
    tables: Vec<ResolvedTable<'s>>,
}

impl<'s> Resolution<'s> {
    /// Tables in creation order.
    #[must_use]
    pub fn tables(&self) -> &[ResolvedTable<'s>] {
        &self.tables
    }

    /// Table names in creation order.
    #[must_use]
    pub fn create_order(&self) -> Vec<&'s str> {
        self.tables.iter().map(ResolvedTable::name).collect()
    }

    /// Table names in drop order, the reverse of creation.
    #[must_use]
    pub fn drop_order(&self) -> Vec<&'s str> {
        self.tables.iter().rev().map(ResolvedTable::name).collect()
    }

    /// Looks up a resolved table by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedTable<'s>> {
        self.tables.iter().find(|t| t.name() == name)
    }
}

/// Resolves the schema into creation order.
///
/// # Errors
///
/// - [`Error::DuplicateTable`] / [`Error::DuplicateColumn`]
/// - [`Error::UnknownTable`] for a missing parent or referenced table
/// - [`Error::UnknownColumn`] for a missing referenced column
/// - [`Error::CircularDependency`] for inheritance or foreign key cycles
/// - [`Error::InvalidSchema`] for malformed foreign keys
pub fn resolve(schema: &Schema) -> Result<Resolution<'_>> {
    let tables = &schema.tables;
    let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(tables.len());
    for (i, table) in tables.iter().enumerate() {
        if by_name.insert(table.name.as_str(), i).is_some() {
            return Err(Error::DuplicateTable(table.name.clone()));
        }
    }

    let lineages = (0..tables.len())
        .map(|i| lineage(tables, &by_name, i))
        .collect::<Result<Vec<_>>>()?;
    let columns = lineages
        .iter()
        .zip(tables)
        .map(|(lineage, table)| effective_columns(tables, lineage, table))
        .collect::<Result<Vec<_>>>()?;

    let mut resolved = Vec::new();
    let mut dependencies: Vec<Vec<usize>> = Vec::new();
    for (i, table) in tables.iter().enumerate().filter(|(_, t)| t.is_materialized()) {
        let mut entry = merge(table, tables, &lineages[i], columns[i].clone());
        let mut deps = Vec::new();
        for fk in &entry.foreign_keys {
            let target = check_reference(table, fk, tables, &by_name, &columns)?;
            if target == i {
                entry.self_referencing = true;
            } else if tables[target].is_materialized() && !deps.contains(&target) {
                deps.push(target);
                entry.dependencies.push(tables[target].name.as_str());
            }
        }
        resolved.push(entry);
        dependencies.push(deps);
    }

    // Node ids follow input order among materialized tables.
    let node_of: HashMap<&str, usize> = resolved
        .iter()
        .enumerate()
        .map(|(node, t)| (t.name(), node))
        .collect();
    let deps: Vec<Vec<usize>> = dependencies
        .iter()
        .map(|ds| {
            ds.iter()
                .filter_map(|&t| node_of.get(tables[t].name.as_str()).copied())
                .collect()
        })
        .collect();

    let order = topological_order(&deps)
        .map_err(|cycle| circular(&cycle, |node| resolved[node].name().to_string()))?;

    let mut slots: Vec<Option<ResolvedTable<'_>>> = resolved.into_iter().map(Some).collect();
    let tables: Vec<ResolvedTable<'_>> =
        order.iter().filter_map(|&node| slots[node].take()).collect();
    debug!(
        tables = tables.len(),
        order = ?tables.iter().map(ResolvedTable::name).collect::<Vec<_>>(),
        "Resolved table order"
    );
    Ok(Resolution { tables })
}

/// Ancestors of `start`, root first and `start` last.
fn lineage(tables: &[Table], by_name: &HashMap<&str, usize>, start: usize) -> Result<Vec<usize>> {
    let mut chain = vec![start];
    let mut current = start;
    while let Some(parent) = &tables[current].extends {
        let p = *by_name.get(parent.as_str()).ok_or_else(|| Error::UnknownTable {
            table: tables[current].name.clone(),
            referenced: parent.clone(),
        })?;
        if let Some(pos) = chain.iter().position(|&c| c == p) {
            return Err(circular(&chain[pos..], |i| tables[i].name.clone()));
        }
        chain.push(p);
        current = p;
    }
    chain.reverse();
    Ok(chain)
}

fn effective_columns<'s>(
    tables: &'s [Table],
    lineage: &[usize],
    table: &Table,
) -> Result<Vec<&'s Column>> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for column in lineage.iter().flat_map(|&i| &tables[i].columns) {
        if !seen.insert(column.name.as_str()) {
            return Err(Error::DuplicateColumn {
                table: table.name.clone(),
                column: column.name.clone(),
            });
        }
        columns.push(column);
    }
    Ok(columns)
}

fn merge<'s>(
    table: &'s Table,
    tables: &'s [Table],
    lineage: &[usize],
    columns: Vec<&'s Column>,
) -> ResolvedTable<'s> {
    let mut resolved = ResolvedTable {
        table,
        columns,
        primary_key: None,
        unique: Vec::new(),
        checks: Vec::new(),
        foreign_keys: Vec::new(),
        indexes: Vec::new(),
        dependencies: Vec::new(),
        self_referencing: false,
    };
    for ancestor in lineage.iter().map(|&i| &tables[i]) {
        let constraints = &ancestor.constraints;
        if let Some(pk) = &constraints.primary_key {
            resolved.primary_key = Some(pk.as_slice());
        }
        resolved.unique.extend(&constraints.unique);
        resolved.checks.extend(&constraints.checks);
        resolved.indexes.extend(&ancestor.indexes);
        resolved.foreign_keys.extend(ancestor.columns.iter().filter_map(|c| {
            c.references.as_ref().map(|r| ForeignKey {
                columns: vec![c.name.clone()],
                references_table: r.table.clone(),
                references_columns: vec![r.column.clone()],
                on_delete: r.on_delete,
                on_update: r.on_update,
            })
        }));
        resolved.foreign_keys.extend(constraints.foreign_keys.iter().cloned());
    }
    resolved
}

/// Validates one foreign key and returns the referenced table index.
fn check_reference(
    table: &Table,
    fk: &ForeignKey,
    tables: &[Table],
    by_name: &HashMap<&str, usize>,
    columns: &[Vec<&Column>],
) -> Result<usize> {
    let target = *by_name
        .get(fk.references_table.as_str())
        .ok_or_else(|| Error::UnknownTable {
            table: table.name.clone(),
            referenced: fk.references_table.clone(),
        })?;
    if tables[target].is_abstract {
        return Err(Error::InvalidSchema(format!(
            "'{}' references abstract table '{}'",
            table.name, fk.references_table
        )));
    }
    if fk.columns.is_empty() || fk.columns.len() != fk.references_columns.len() {
        return Err(Error::InvalidSchema(format!(
            "foreign key of '{}' on ({}) does not match the referenced columns ({})",
            table.name,
            fk.columns.join(", "),
            fk.references_columns.join(", ")
        )));
    }
    for referenced in &fk.references_columns {
        if !columns[target].iter().any(|c| &c.name == referenced) {
            return Err(Error::UnknownColumn {
                table: fk.references_table.clone(),
                column: referenced.clone(),
            });
        }
    }
    Ok(target)
}

/// Kahn's algorithm, lowest node first among ready nodes.
///
/// On failure returns one cycle, each node depending on the next.
fn topological_order(deps: &[Vec<usize>]) -> std::result::Result<Vec<usize>, Vec<usize>> {
    let mut in_degree: Vec<usize> = deps.iter().map(Vec::len).collect();
    let mut dependents = vec![Vec::new(); deps.len()];
    for (node, ds) in deps.iter().enumerate() {
        for &d in ds {
            dependents[d].push(node);
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..deps.len())
        .filter(|&n| in_degree[n] == 0)
        .map(Reverse)
        .collect();
    let mut order = Vec::with_capacity(deps.len());
    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for &dependent in &dependents[node] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }
    if order.len() == deps.len() {
        return Ok(order);
    }

    // Every unsorted node still waits on another unsorted node.
    let Some(mut current) = (0..deps.len()).find(|&n| in_degree[n] > 0) else {
        return Ok(order);
    };
    let mut path = Vec::new();
    loop {
        if let Some(pos) = path.iter().position(|&p| p == current) {
            return Err(path.split_off(pos));
        }
        path.push(current);
        match deps[current].iter().copied().find(|&d| in_degree[d] > 0) {
            Some(next) => current = next,
            None => return Err(path),
        }
    }
}

/// Builds the cycle error, starting at the member declared first.
fn circular(members: &[usize], name: impl Fn(usize) -> String) -> Error {
    let start = members
        .iter()
        .enumerate()
        .min_by_key(|(_, m)| **m)
        .map_or(0, |(pos, _)| pos);
    let mut cycle: Vec<String> = members[start..]
        .iter()
        .chain(&members[..start])
        .map(|&m| name(m))
        .collect();
    let table = cycle.first().cloned().unwrap_or_default();
    cycle.push(table.clone());
    Error::CircularDependency { table, cycle }
}
