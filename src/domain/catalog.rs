//! Method catalog: which bet methods each wager type offers.
//!
//! Static presentation metadata (labels, multiplier badges). The counting
//! engine accepts every method listed here.

use serde::Serialize;

use super::selection::SelectionShape;
use super::wager::{BetMethod, WagerType};

/// One selectable bet method for a wager type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodEntry {
    pub method: BetMethod,
    pub label: &'static str,
    /// Multiplier badge for multi-position flows, e.g. `×6`.
    pub badge: Option<&'static str>,
}

const fn entry(method: BetMethod, label: &'static str) -> MethodEntry {
    MethodEntry { method, label, badge: None }
}

const fn badged(method: BetMethod, label: &'static str, badge: &'static str) -> MethodEntry {
    MethodEntry { method, label, badge: Some(badge) }
}

const SINGLE: &[MethodEntry] = &[entry(BetMethod::Normal, "Straight")];

const PAIR_UNORDERED: &[MethodEntry] = &[
    entry(BetMethod::Normal, "Straight"),
    entry(BetMethod::Box, "Box"),
    entry(BetMethod::Nagashi, "Axis flow"),
    entry(BetMethod::Formation, "Formation"),
];

const EXACTA: &[MethodEntry] = &[
    entry(BetMethod::Normal, "Straight"),
    entry(BetMethod::Box, "Box"),
    entry(BetMethod::Nagashi1, "Axis 1st"),
    entry(BetMethod::Nagashi2, "Axis 2nd"),
    badged(BetMethod::NagashiMulti, "Axis any position", "×2"),
    entry(BetMethod::Formation, "Formation"),
];

const TRIO: &[MethodEntry] = &[
    entry(BetMethod::Normal, "Straight"),
    entry(BetMethod::Box, "Box"),
    entry(BetMethod::Nagashi, "One-axis flow"),
    entry(BetMethod::Nagashi2, "Two-axis flow"),
    entry(BetMethod::Formation, "Formation"),
];

const TRIFECTA: &[MethodEntry] = &[
    entry(BetMethod::Normal, "Straight"),
    entry(BetMethod::Box, "Box"),
    entry(BetMethod::Nagashi1, "Axis 1st"),
    entry(BetMethod::Nagashi2, "Axis 2nd"),
    entry(BetMethod::Nagashi3, "Axis 3rd"),
    badged(BetMethod::Nagashi1Multi, "Axis any position", "×3"),
    entry(BetMethod::Nagashi12, "Axes 1st & 2nd"),
    entry(BetMethod::Nagashi13, "Axes 1st & 3rd"),
    entry(BetMethod::Nagashi23, "Axes 2nd & 3rd"),
    badged(BetMethod::Nagashi2Multi, "Two axes any position", "×6"),
    entry(BetMethod::Formation, "Formation"),
];

/// Methods offered for `wager_type`, in display order.
pub const fn methods_for(wager_type: WagerType) -> &'static [MethodEntry] {
    match wager_type {
        WagerType::Win | WagerType::Place => SINGLE,
        WagerType::Quinella | WagerType::QuinellaPlace => PAIR_UNORDERED,
        WagerType::Exacta => EXACTA,
        WagerType::Trio => TRIO,
        WagerType::Trifecta => TRIFECTA,
    }
}

/// Catalog entry for a pair, if the catalog lists it.
pub fn lookup(wager_type: WagerType, method: BetMethod) -> Option<&'static MethodEntry> {
    methods_for(wager_type).iter().find(|e| e.method == method)
}

/// Whether the engine can count `method` for `wager_type`.
///
/// A superset of the catalog: `box` is also countable on single-horse types.
pub const fn is_supported(wager_type: WagerType, method: BetMethod) -> bool {
    SelectionShape::resolve(wager_type, method).is_some()
}
