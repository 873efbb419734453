//! Selection state: column partition of chosen horses.
//!
//! A selection is always three columns (`col1`, `col2`, `col3`). What each
//! column means depends on the (wager type, bet method) pair and is resolved
//! once into a [`SelectionShape`]. [`SelectionState`] applies toggle events
//! under that shape's capacity and exclusion rules. Invalid toggles are
//! ignored, never rejected.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::calculator;
use super::wager::{BetMethod, HorseNumber, WagerLine, WagerType};

// ────────────────────────────────────────────
// Columns
// ────────────────────────────────────────────

/// One of the three selection columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Col1,
    Col2,
    Col3,
}

impl Column {
    pub const ALL: [Self; 3] = [Self::Col1, Self::Col2, Self::Col3];

    /// Zero-based position of the column.
    pub const fn index(self) -> usize {
        match self {
            Self::Col1 => 0,
            Self::Col2 => 1,
            Self::Col3 => 2,
        }
    }
}

/// Horse numbers chosen per column.
///
/// Columns are sets: insertion order is irrelevant and duplicates within a
/// column cannot exist. Horse number 0 is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawColumns")]
pub struct ColumnSelections {
    col1: BTreeSet<HorseNumber>,
    col2: BTreeSet<HorseNumber>,
    col3: BTreeSet<HorseNumber>,
}

#[derive(Deserialize)]
struct RawColumns {
    #[serde(default)]
    col1: Vec<HorseNumber>,
    #[serde(default)]
    col2: Vec<HorseNumber>,
    #[serde(default)]
    col3: Vec<HorseNumber>,
}

impl From<RawColumns> for ColumnSelections {
    fn from(raw: RawColumns) -> Self {
        Self::from_columns(raw.col1, raw.col2, raw.col3)
    }
}

impl ColumnSelections {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw column contents. Zero entries are dropped.
    pub fn from_columns(
        col1: impl IntoIterator<Item = HorseNumber>,
        col2: impl IntoIterator<Item = HorseNumber>,
        col3: impl IntoIterator<Item = HorseNumber>,
    ) -> Self {
        let valid = |it: &HorseNumber| *it > 0;
        Self {
            col1: col1.into_iter().filter(valid).collect(),
            col2: col2.into_iter().filter(valid).collect(),
            col3: col3.into_iter().filter(valid).collect(),
        }
    }

    /// Contents of a column, ascending.
    pub const fn column(&self, column: Column) -> &BTreeSet<HorseNumber> {
        match column {
            Column::Col1 => &self.col1,
            Column::Col2 => &self.col2,
            Column::Col3 => &self.col3,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut BTreeSet<HorseNumber> {
        match column {
            Column::Col1 => &mut self.col1,
            Column::Col2 => &mut self.col2,
            Column::Col3 => &mut self.col3,
        }
    }

    /// Whether `horse` is in `column`.
    pub fn contains(&self, column: Column, horse: HorseNumber) -> bool {
        self.column(column).contains(&horse)
    }

    /// Number of horses in `column`.
    pub fn len(&self, column: Column) -> usize {
        self.column(column).len()
    }

    /// True when no column holds a horse.
    pub fn is_empty(&self) -> bool {
        self.col1.is_empty() && self.col2.is_empty() && self.col3.is_empty()
    }

    /// Remove every horse from every column.
    pub fn clear(&mut self) {
        self.col1.clear();
        self.col2.clear();
        self.col3.clear();
    }
}

// ────────────────────────────────────────────
// Shape resolution
// ────────────────────────────────────────────

/// Column layout for a (wager type, bet method) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionShape {
    /// `col1` only. `limit` caps its size (`normal`); `None` is unbounded (`box`).
    SingleColumn { limit: Option<usize> },
    /// Axis pool in `col1` (at most `axis_limit`), partners in `col2`.
    AxisPartner { axis_limit: usize },
    /// Axis pools in `col1` and `col3`, partners in `col2`.
    DualAxisPartner,
    /// One independent pool per finishing position or slot, `col1..colK`.
    Formation(usize),
}

impl SelectionShape {
    /// Resolve the layout, or `None` when the method does not apply to the type.
    pub const fn resolve(wager_type: WagerType, method: BetMethod) -> Option<Self> {
        use BetMethod as M;
        use WagerType as W;

        let required = wager_type.required_horse_count();
        let shape = match (wager_type, method) {
            (_, M::Normal) => Self::SingleColumn { limit: Some(required) },
            (_, M::Box) => Self::SingleColumn { limit: None },
            (W::Quinella | W::QuinellaPlace | W::Trio, M::Nagashi)
            | (W::Exacta | W::Trifecta, M::Nagashi1 | M::Nagashi2)
            | (W::Exacta, M::NagashiMulti)
            | (W::Trifecta, M::Nagashi3 | M::Nagashi1Multi) => Self::AxisPartner { axis_limit: 1 },
            (W::Trio, M::Nagashi2) => Self::AxisPartner { axis_limit: 2 },
            (W::Trifecta, M::Nagashi12 | M::Nagashi13 | M::Nagashi23 | M::Nagashi2Multi) => {
                Self::DualAxisPartner
            }
            (_, M::Formation) if required >= 2 => Self::Formation(required),
            _ => return None,
        };
        Some(shape)
    }

    /// Capacity of `column` under this shape. `None` means unbounded.
    ///
    /// Columns outside the shape have capacity `Some(0)`.
    pub const fn capacity(self, column: Column) -> Option<usize> {
        match (self, column) {
            (Self::SingleColumn { limit }, Column::Col1) => limit,
            (Self::AxisPartner { axis_limit }, Column::Col1) => Some(axis_limit),
            (Self::AxisPartner { .. }, Column::Col2) => None,
            (Self::DualAxisPartner, Column::Col1 | Column::Col3) => Some(1),
            (Self::DualAxisPartner, Column::Col2) => None,
            (Self::Formation(k), column) if column.index() < k => None,
            _ => Some(0),
        }
    }

    /// Role of `column` under this shape, or `None` if the column is unused.
    pub const fn role(self, column: Column) -> Option<ColumnRole> {
        match (self, column) {
            (Self::SingleColumn { .. }, Column::Col1) => Some(ColumnRole::Pool),
            (Self::AxisPartner { .. } | Self::DualAxisPartner, Column::Col1)
            | (Self::DualAxisPartner, Column::Col3) => Some(ColumnRole::Axis),
            (Self::AxisPartner { .. } | Self::DualAxisPartner, Column::Col2) => {
                Some(ColumnRole::Partner)
            }
            (Self::Formation(k), column) if column.index() < k => {
                Some(ColumnRole::Formation(column.index() + 1))
            }
            _ => None,
        }
    }

    /// Columns that must be non-empty for any line to exist.
    pub fn active_columns(self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| self.role(*c).is_some())
            .collect()
    }
}

/// What a column holds under the active shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// The single pool of `normal`/`box`.
    Pool,
    Axis,
    Partner,
    /// Formation pool for finishing position (ordered) or slot (unordered), 1-based.
    Formation(usize),
}

/// Display configuration of one active column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnConfig {
    pub column: Column,
    pub role: ColumnRole,
    pub label: &'static str,
    /// Maximum number of horses; `None` is unbounded.
    pub limit: Option<usize>,
}

/// Active columns, with labels, for a (wager type, bet method) pair.
///
/// Empty when the method does not apply to the type.
pub fn column_configs(wager_type: WagerType, method: BetMethod) -> Vec<ColumnConfig> {
    let Some(shape) = SelectionShape::resolve(wager_type, method) else {
        return Vec::new();
    };
    shape
        .active_columns()
        .into_iter()
        .filter_map(|column| {
            let role = shape.role(column)?;
            Some(ColumnConfig {
                column,
                role,
                label: column_label(wager_type, method, column, role),
                limit: shape.capacity(column),
            })
        })
        .collect()
}

fn column_label(
    wager_type: WagerType,
    method: BetMethod,
    column: Column,
    role: ColumnRole,
) -> &'static str {
    use BetMethod as M;

    const POSITIONS: [&str; 3] = ["1st", "2nd", "3rd"];
    const SLOTS: [&str; 3] = ["Slot 1", "Slot 2", "Slot 3"];

    match role {
        ColumnRole::Pool => match method {
            M::Box => "Box",
            _ => "Selection",
        },
        ColumnRole::Formation(n) if wager_type.is_ordered() => POSITIONS[n - 1],
        ColumnRole::Formation(n) => SLOTS[n - 1],
        // col3 is the second axis of the dual-axis variants, always run 3rd
        ColumnRole::Axis if column == Column::Col3 => match method {
            M::Nagashi12 | M::Nagashi13 | M::Nagashi23 => "3rd (axis)",
            _ => "Axis (any position)",
        },
        ColumnRole::Axis => match (wager_type, method) {
            (WagerType::Trio, M::Nagashi2) => "Axis (2 horses)",
            (_, M::Nagashi1 | M::Nagashi12 | M::Nagashi13) => "1st (axis)",
            (_, M::Nagashi2 | M::Nagashi23) => "2nd (axis)",
            (_, M::Nagashi3) => "3rd (axis)",
            (_, M::NagashiMulti | M::Nagashi1Multi | M::Nagashi2Multi) => "Axis (any position)",
            _ => "Axis",
        },
        ColumnRole::Partner => match (wager_type, method) {
            (WagerType::Exacta, M::Nagashi1) => "2nd (partners)",
            (WagerType::Exacta, M::Nagashi2) => "1st (partners)",
            (WagerType::Trifecta, M::Nagashi1) => "2nd/3rd (partners)",
            (WagerType::Trifecta, M::Nagashi2) => "1st/3rd (partners)",
            (WagerType::Trifecta, M::Nagashi3) => "1st/2nd (partners)",
            (WagerType::Trifecta, M::Nagashi12 | M::Nagashi13) => "2nd (partners)",
            (WagerType::Trifecta, M::Nagashi23) => "1st (partners)",
            _ => "Partners",
        },
    }
}

// ────────────────────────────────────────────
// Selection state manager
// ────────────────────────────────────────────

/// Column partition owned by a selection screen.
///
/// Changing the wager type or method discards the current columns so that
/// stale picks never leak into a new counting context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    wager_type: WagerType,
    method: BetMethod,
    shape: Option<SelectionShape>,
    selections: ColumnSelections,
}

impl SelectionState {
    /// Empty selection for a (wager type, bet method) pair.
    pub fn new(wager_type: WagerType, method: BetMethod) -> Self {
        Self {
            wager_type,
            method,
            shape: SelectionShape::resolve(wager_type, method),
            selections: ColumnSelections::default(),
        }
    }

    pub const fn wager_type(&self) -> WagerType {
        self.wager_type
    }

    pub const fn method(&self) -> BetMethod {
        self.method
    }

    /// Resolved layout, `None` when the pair is unsupported.
    pub const fn shape(&self) -> Option<SelectionShape> {
        self.shape
    }

    pub const fn selections(&self) -> &ColumnSelections {
        &self.selections
    }

    /// Switch wager type and/or method. Resets the columns on any change.
    pub fn set_context(&mut self, wager_type: WagerType, method: BetMethod) {
        if wager_type != self.wager_type || method != self.method {
            *self = Self::new(wager_type, method);
        }
    }

    /// Empty every column, keeping the context.
    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Toggle `horse` in `column`. Returns whether the selection changed.
    ///
    /// Adds that would exceed a capacity or violate axis/partner exclusion
    /// are ignored.
    pub fn toggle(&mut self, horse: HorseNumber, column: Column) -> bool {
        let Some(shape) = self.shape else {
            return false;
        };
        if horse == 0 || shape.role(column).is_none() {
            return false;
        }

        if self.selections.column_mut(column).remove(&horse) {
            return true;
        }

        let under_capacity = shape
            .capacity(column)
            .is_none_or(|cap| self.selections.len(column) < cap);

        match shape.role(column) {
            Some(ColumnRole::Axis) if under_capacity => {
                self.selections.column_mut(Column::Col2).remove(&horse);
                if shape == SelectionShape::DualAxisPartner {
                    let other = if column == Column::Col1 { Column::Col3 } else { Column::Col1 };
                    self.selections.column_mut(other).remove(&horse);
                }
                self.selections.column_mut(column).insert(horse)
            }
            Some(ColumnRole::Partner) => {
                let is_axis = self.selections.contains(Column::Col1, horse)
                    || (shape == SelectionShape::DualAxisPartner
                        && self.selections.contains(Column::Col3, horse));
                !is_axis && self.selections.column_mut(column).insert(horse)
            }
            Some(ColumnRole::Pool | ColumnRole::Formation(_)) if under_capacity => {
                self.selections.column_mut(column).insert(horse)
            }
            _ => false,
        }
    }

    /// Number of wager lines the current selection represents.
    pub fn bet_count(&self) -> u64 {
        calculator::calculate_bet_count(self.wager_type, self.method, &self.selections)
    }

    /// Concrete wager lines for the current selection.
    pub fn lines(&self) -> Vec<WagerLine> {
        calculator::enumerate_lines(self.wager_type, self.method, &self.selections)
    }
}
