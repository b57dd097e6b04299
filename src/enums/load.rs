use serde::Serialize;

use crate::enums::tables::GoldTable;

/// Rows removed while superseding a previously loaded guest check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletedSubtree {
    pub variant_rows: usize,
    pub detail_lines: usize,
    pub tax_lines: usize,
    pub guest_checks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedCheck {
    pub guest_check_id: i64,
    pub replaced: Option<DeletedSubtree>,
    pub tax_lines: usize,
    pub detail_lines: usize,
    pub skipped_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OrderOutcome {
    Loaded(LoadedCheck),
    Failed {
        guest_check_id: Option<i64>,
        reason: String,
    },
}

impl OrderOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, OrderOutcome::Loaded(_))
    }

    pub fn guest_check_id(&self) -> Option<i64> {
        match self {
            OrderOutcome::Loaded(loaded) => Some(loaded.guest_check_id),
            OrderOutcome::Failed { guest_check_id, .. } => *guest_check_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub restaurants: usize,
    pub employees: usize,
}

/// Result of one batch run. `ran` is false when the run never had a
/// connection to work with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub ran: bool,
    pub catalog: CatalogSummary,
    pub outcomes: Vec<OrderOutcome>,
}

impl BatchReport {
    pub fn not_run() -> Self {
        Self::default()
    }

    pub fn started(catalog: CatalogSummary) -> Self {
        Self {
            ran: true,
            catalog,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: OrderOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn loaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn replaced(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, OrderOutcome::Loaded(LoadedCheck { replaced: Some(_), .. })))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.loaded()
    }

    pub fn skipped_lines(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                OrderOutcome::Loaded(loaded) => loaded.skipped_lines,
                OrderOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCount {
    #[serde(serialize_with = "serialize_table")]
    pub table: GoldTable,
    pub rows: i64,
}

fn serialize_table<S: serde::Serializer>(table: &GoldTable, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(table.name())
}
