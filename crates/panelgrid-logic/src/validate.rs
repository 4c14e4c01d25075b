//! Structural checks over a tiled store snapshot.
//!
//! Pure functions that take cell records and return validation errors.
//! An empty result means the snapshot obeys every tiling invariant.

use crate::config::TilingConfig;
use crate::constants::categories;
use crate::group::TileGroup;
use crate::lattice::LatticePos;
use crate::orientation::{axis_distance, column_axis};
use crate::store::CellRecord;
use std::collections::{BTreeMap, HashMap};

/// A tiling validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// Records grouped by master position; cells without a group are skipped.
fn by_master(records: &[CellRecord]) -> BTreeMap<LatticePos, Vec<&CellRecord>> {
    let mut groups: BTreeMap<LatticePos, Vec<&CellRecord>> = BTreeMap::new();
    for r in records {
        if let Some(g) = r.group {
            groups.entry(g.master).or_default().push(r);
        }
    }
    groups
}

// ── Per-cell ────────────────────────────────────────────────────────────

/// Every cell carries a group assignment.
pub fn check_coverage(records: &[CellRecord]) -> Vec<ValidationError> {
    records
        .iter()
        .filter(|r| r.group.is_none())
        .map(|r| ValidationError {
            category: categories::COVERAGE,
            severity: Severity::Error,
            message: format!("Cell {} has no group assignment", r.pos),
        })
        .collect()
}

/// Width and height stay within `1..=max_size`.
pub fn check_group_sizes(records: &[CellRecord], config: &TilingConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in records {
        let Some(g) = r.group else { continue };
        let ok = |n: u32| (1..=config.max_size).contains(&n);
        if !ok(g.width) || !ok(g.height) {
            errors.push(ValidationError {
                category: categories::GROUP_SIZE,
                severity: Severity::Error,
                message: format!(
                    "Cell {} has group {}×{}, limit is {}",
                    r.pos, g.width, g.height, config.max_size
                ),
            });
        }
    }
    errors
}

// ── Per-group ───────────────────────────────────────────────────────────

/// Cells sharing a master form exactly that master's w×h rectangle.
pub fn check_rectangles(records: &[CellRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let lookup: HashMap<LatticePos, &CellRecord> = records.iter().map(|r| (r.pos, r)).collect();

    for (master, members) in by_master(records) {
        let first = members[0];
        let Some(group) = first.group else { continue };

        if members
            .iter()
            .any(|m| m.group != Some(group) || m.orientation != first.orientation)
        {
            errors.push(ValidationError {
                category: categories::RECTANGLE,
                severity: Severity::Error,
                message: format!("Group at {} has members with disagreeing metadata", master),
            });
            continue;
        }

        let expected = group.member_positions(first.orientation);
        let holes: Vec<LatticePos> = expected
            .iter()
            .filter(|pos| {
                lookup
                    .get(*pos)
                    .and_then(|r| r.group)
                    .map_or(true, |g: TileGroup| g.master != master)
            })
            .copied()
            .collect();
        if !holes.is_empty() {
            errors.push(ValidationError {
                category: categories::RECTANGLE,
                severity: Severity::Error,
                message: format!(
                    "Group at {} ({}×{}) is missing {} cell(s), e.g. {}",
                    master,
                    group.width,
                    group.height,
                    holes.len(),
                    holes[0]
                ),
            });
        }

        let strays = members
            .iter()
            .filter(|m| group.local_offset(m.pos, first.orientation).is_none())
            .count();
        if strays > 0 {
            errors.push(ValidationError {
                category: categories::RECTANGLE,
                severity: Severity::Error,
                message: format!(
                    "Group at {} has {} cell(s) outside its {}×{} rectangle",
                    master, strays, group.width, group.height
                ),
            });
        }
    }
    errors
}

/// The master is the top row's left-most cell as seen by the viewer.
pub fn check_master_placement(records: &[CellRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (master, members) in by_master(records) {
        let col_axis = column_axis(members[0].orientation);
        let top = members.iter().map(|m| m.pos.y).max().unwrap_or(master.y);
        let leftmost = members
            .iter()
            .filter(|m| m.pos.y == top)
            .map(|m| axis_distance(master, m.pos, col_axis))
            .min()
            .unwrap_or(0);
        if master.y != top || leftmost != 0 {
            errors.push(ValidationError {
                category: categories::MASTER,
                severity: Severity::Error,
                message: format!(
                    "Group master {} is not top-left (top row y={}, left offset {})",
                    master, top, leftmost
                ),
            });
        }
        if !members
            .iter()
            .any(|m| m.group.is_some_and(|g| g.is_master(m.pos)))
        {
            errors.push(ValidationError {
                category: categories::MASTER,
                severity: Severity::Warning,
                message: format!("Group master {} is not itself a member", master),
            });
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all tiling validations and return combined results.
pub fn validate_all(records: &[CellRecord], config: &TilingConfig) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_coverage(records));
    all.extend(check_group_sizes(records, config));
    all.extend(check_rectangles(records));
    all.extend(check_master_placement(records));
    all
}
