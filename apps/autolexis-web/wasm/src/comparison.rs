//! Side-by-side clause comparison view.
//!
//! Wraps the reconciler output and owns per-row expansion state. Rows
//! are addressed by index paths ("2" for the third top-level clause,
//! "2.0" for its first sub-clause) so clause names never need escaping.

use std::collections::HashSet;

use clause_engine::{format_value, ClauseSetReconciler, FormatMode};
use contract_types::{ComparisonRow, ContractRecord, RiskTier};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One flattened row handed to the HTML shell.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub path: String,
    pub clause: String,
    pub depth: usize,
    pub values: Vec<String>,
    pub risk: RiskTier,
    pub expandable: bool,
    pub expanded: bool,
}

#[wasm_bindgen]
pub struct ComparisonPanel {
    headers: Vec<String>,
    rows: Vec<ComparisonRow>,
    expanded: HashSet<String>,
}

impl Default for ComparisonPanel {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            expanded: HashSet::new(),
        }
    }
}

impl ComparisonPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the comparison for a fresh record set. Below two
    /// records the panel reverts to its empty placeholder state.
    /// Expansion state does not survive a data change.
    pub fn set_records(&mut self, records: &[ContractRecord]) {
        self.expanded.clear();
        if records.len() < 2 {
            self.headers.clear();
            self.rows.clear();
            return;
        }
        self.headers = records.iter().map(|r| r.file_name.clone()).collect();
        self.rows = ClauseSetReconciler::new().reconcile(records);
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    /// Per-row state machine: collapsed <-> expanded on toggle, only
    /// for rows that actually have sub-rows. Returns the state after
    /// the call.
    pub fn toggle(&mut self, path: &str) -> bool {
        let expandable = self
            .find(path)
            .map(ComparisonRow::is_expandable)
            .unwrap_or(false);
        if !expandable {
            return false;
        }
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_string());
        }
        self.expanded.contains(path)
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Depth-first flattening of the row tree. Sub-rows of a collapsed
    /// row are withheld; cell values use the collapsed format (the
    /// full dump is available per row via `dump`).
    pub fn display_rows(&self) -> Vec<DisplayRow> {
        let mut out = Vec::new();
        flatten(&self.rows, &self.expanded, String::new(), 0, &mut out);
        out
    }

    /// Full recursive text dump of one row's aligned values, the
    /// expanded display mode for a single clause.
    pub fn dump(&self, path: &str) -> Option<Vec<String>> {
        self.find(path).map(|row| {
            row.values
                .iter()
                .map(|v| format_value(v, FormatMode::Expanded))
                .collect()
        })
    }

    fn find(&self, path: &str) -> Option<&ComparisonRow> {
        let mut rows = &self.rows;
        let mut current: Option<&ComparisonRow> = None;
        for segment in path.split('.') {
            let index: usize = segment.parse().ok()?;
            current = rows.get(index);
            rows = &current?.subrows;
        }
        current
    }
}

fn flatten(
    rows: &[ComparisonRow],
    expanded: &HashSet<String>,
    prefix: String,
    depth: usize,
    out: &mut Vec<DisplayRow>,
) {
    for (index, row) in rows.iter().enumerate() {
        let path = if prefix.is_empty() {
            index.to_string()
        } else {
            format!("{prefix}.{index}")
        };
        let is_expanded = expanded.contains(&path);

        out.push(DisplayRow {
            clause: row.clause.clone(),
            depth,
            values: row
                .values
                .iter()
                .map(|v| format_value(v, FormatMode::Collapsed))
                .collect(),
            risk: row.risk,
            expandable: row.is_expandable(),
            expanded: is_expanded,
            path: path.clone(),
        });

        if is_expanded {
            flatten(&row.subrows, expanded, path, depth + 1, out);
        }
    }
}

#[wasm_bindgen]
impl ComparisonPanel {
    #[wasm_bindgen(constructor)]
    pub fn new_panel() -> ComparisonPanel {
        Self::new()
    }

    /// Contract file names, one per column, in selection order.
    #[wasm_bindgen(js_name = headersJson)]
    pub fn headers_json(&self) -> String {
        serde_json::to_string(&self.headers).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = displayRowsJson)]
    pub fn display_rows_json(&self) -> String {
        serde_json::to_string(&self.display_rows()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = toggleRow)]
    pub fn toggle_row(&mut self, path: &str) -> bool {
        self.toggle(path)
    }

    #[wasm_bindgen(js_name = rowDumpJson)]
    pub fn row_dump_json(&self, path: &str) -> Option<String> {
        self.dump(path)
            .and_then(|values| serde_json::to_string(&values).ok())
    }

    /// True when fewer than two contracts are selected and the shell
    /// should render the "select at least two" placeholder.
    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
