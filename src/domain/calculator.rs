//! Bet combination calculator.
//!
//! Maps a (wager type, bet method, column selections) triple to the number
//! of distinct wager lines it represents, and enumerates those lines.
//!
//! Each method family is a [`CountingRule`] chosen from a dispatch table
//! keyed by (ordered, required horse count, method). Every rule provides
//! both a count and an enumeration, and the two agree on every input,
//! overlapping columns included:
//! - partner pools exclude axis horses
//! - tuples that repeat a horse are dropped
//! - unordered lines are de-duplicated as sets
//!
//! Both entry points are pure and total: incomplete or unsupported
//! selections yield `0` / no lines.

use std::collections::BTreeSet;

use super::combinatorics::{binomial, combinations, falling_factorial, permutations};
use super::selection::{Column, ColumnSelections};
use super::wager::{BetMethod, HorseNumber, WagerLine, WagerType};

/// Counting discipline for one method family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountingRule {
    /// `col1` is exactly one line.
    Straight,
    /// Every combination (unordered) or permutation (ordered) of `col1`.
    Box,
    /// Unordered: `axis` horses in `col1` plus any partners from `col2`.
    UnorderedAxis { axis: usize },
    /// Ordered: one axis horse from `col1` placed at each of `positions`
    /// (0-based), remaining positions filled in order from `col2`.
    OrderedAxis { positions: &'static [usize] },
    /// Ordered: one horse from each column, `order[i]` naming the column
    /// (0-based) that fills finishing position `i`.
    DualAxisFixed { order: [usize; 3] },
    /// Ordered: every arrangement of an axis from `col1`, an axis from
    /// `col3` and a partner from `col2`.
    DualAxisMulti,
    /// Independent pools per position (ordered) or slot (unordered).
    Formation,
}

/// Look up the counting rule for a (wager type, bet method) pair.
///
/// `None` when the method does not apply to the type.
pub const fn rule_for(wager_type: WagerType, method: BetMethod) -> Option<CountingRule> {
    use BetMethod as M;
    use CountingRule as R;

    let rule = match (wager_type.is_ordered(), wager_type.required_horse_count(), method) {
        (_, _, M::Normal) => R::Straight,
        (_, _, M::Box) => R::Box,

        // unordered flow
        (false, 2 | 3, M::Nagashi) => R::UnorderedAxis { axis: 1 },
        (false, 3, M::Nagashi2) => R::UnorderedAxis { axis: 2 },

        // ordered flow, single axis
        (true, 2 | 3, M::Nagashi1) => R::OrderedAxis { positions: &[0] },
        (true, 2 | 3, M::Nagashi2) => R::OrderedAxis { positions: &[1] },
        (true, 3, M::Nagashi3) => R::OrderedAxis { positions: &[2] },
        (true, 2, M::NagashiMulti) => R::OrderedAxis { positions: &[0, 1] },
        (true, 3, M::Nagashi1Multi) => R::OrderedAxis { positions: &[0, 1, 2] },

        // ordered flow, two axes
        (true, 3, M::Nagashi12 | M::Nagashi13) => R::DualAxisFixed { order: [0, 1, 2] },
        (true, 3, M::Nagashi23) => R::DualAxisFixed { order: [1, 0, 2] },
        (true, 3, M::Nagashi2Multi) => R::DualAxisMulti,

        (_, 2 | 3, M::Formation) => R::Formation,
        _ => return None,
    };
    Some(rule)
}

/// Number of distinct wager lines implied by `selections`.
pub fn calculate_bet_count(
    wager_type: WagerType,
    method: BetMethod,
    selections: &ColumnSelections,
) -> u64 {
    rule_for(wager_type, method).map_or(0, |rule| rule.count(wager_type, selections))
}

/// Concrete wager lines implied by `selections`, in a stable order.
pub fn enumerate_lines(
    wager_type: WagerType,
    method: BetMethod,
    selections: &ColumnSelections,
) -> Vec<WagerLine> {
    rule_for(wager_type, method).map_or_else(Vec::new, |rule| {
        rule.enumerate(wager_type, selections)
            .into_iter()
            .map(|horses| WagerLine::new(wager_type, horses))
            .collect()
    })
}

impl CountingRule {
    /// Count lines without materializing them where a closed form exists.
    pub fn count(self, wager_type: WagerType, selections: &ColumnSelections) -> u64 {
        let k = wager_type.required_horse_count();
        let pools = Pools::new(selections);

        match self {
            Self::Straight => u64::from(pools.col1.len() == k),
            Self::Box if wager_type.is_ordered() => falling_factorial(pools.col1.len(), k),
            Self::Box => binomial(pools.col1.len(), k),
            Self::UnorderedAxis { axis } => {
                if pools.col1.len() != axis || k <= axis {
                    return 0;
                }
                binomial(pools.partners().len(), k - axis)
            }
            Self::OrderedAxis { positions } => {
                if pools.col1.len() != 1 {
                    return 0;
                }
                (positions.len() as u64)
                    .saturating_mul(falling_factorial(pools.partners().len(), k - 1))
            }
            Self::DualAxisFixed { order } => ordered_formation_count(&pools.ordered(order)),
            Self::DualAxisMulti => {
                let columns = pools.dual_axis();
                let sets = if pairwise_disjoint(&columns) {
                    product_len(&columns)
                } else {
                    distinct_sets(&columns).len() as u64
                };
                sets.saturating_mul(6)
            }
            Self::Formation => {
                let columns = pools.first(k);
                if wager_type.is_ordered() {
                    ordered_formation_count(&columns)
                } else if pairwise_disjoint(&columns) {
                    product_len(&columns)
                } else {
                    distinct_sets(&columns).len() as u64
                }
            }
        }
    }

    /// Enumerate lines as horse sequences (finishing order for ordered types).
    pub fn enumerate(
        self,
        wager_type: WagerType,
        selections: &ColumnSelections,
    ) -> Vec<Vec<HorseNumber>> {
        let k = wager_type.required_horse_count();
        let pools = Pools::new(selections);

        match self {
            Self::Straight if pools.col1.len() == k => vec![pools.col1],
            Self::Straight => Vec::new(),
            Self::Box if wager_type.is_ordered() => permutations(&pools.col1, k),
            Self::Box => combinations(&pools.col1, k),
            Self::UnorderedAxis { axis } => {
                if pools.col1.len() != axis || k <= axis {
                    return Vec::new();
                }
                combinations(&pools.partners(), k - axis)
                    .into_iter()
                    .map(|partners| {
                        let mut line = pools.col1.clone();
                        line.extend(partners);
                        line.sort_unstable();
                        line
                    })
                    .collect()
            }
            Self::OrderedAxis { positions } => {
                let [axis] = pools.col1[..] else {
                    return Vec::new();
                };
                let fills = permutations(&pools.partners(), k - 1);
                positions
                    .iter()
                    .flat_map(|&pos| {
                        fills.iter().map(move |fill| {
                            let mut line = fill.clone();
                            line.insert(pos, axis);
                            line
                        })
                    })
                    .collect()
            }
            Self::DualAxisFixed { order } => distinct_tuples(&pools.ordered(order)),
            Self::DualAxisMulti => distinct_sets(&pools.dual_axis())
                .into_iter()
                .flat_map(|set| permutations(&set, set.len()))
                .collect(),
            Self::Formation => {
                let columns = pools.first(k);
                if wager_type.is_ordered() {
                    distinct_tuples(&columns)
                } else {
                    distinct_sets(&columns).into_iter().collect()
                }
            }
        }
    }
}

// ────────────────────────────────────────────
// Pool helpers
// ────────────────────────────────────────────

/// Column contents as ascending vectors.
struct Pools {
    col1: Vec<HorseNumber>,
    col2: Vec<HorseNumber>,
    col3: Vec<HorseNumber>,
}

impl Pools {
    fn new(selections: &ColumnSelections) -> Self {
        let collect = |c: Column| -> Vec<HorseNumber> { selections.column(c).iter().copied().collect() };
        Self {
            col1: collect(Column::Col1),
            col2: collect(Column::Col2),
            col3: collect(Column::Col3),
        }
    }

    /// Partner pool (`col2`) with any axis horse removed.
    fn partners(&self) -> Vec<HorseNumber> {
        self.col2
            .iter()
            .copied()
            .filter(|h| !self.col1.contains(h))
            .collect()
    }

    /// All three columns in column order.
    fn columns(&self) -> [&[HorseNumber]; 3] {
        [&self.col1, &self.col2, &self.col3]
    }

    /// Columns rearranged so that `order[i]` comes `i`-th.
    fn ordered(&self, order: [usize; 3]) -> [&[HorseNumber]; 3] {
        let columns = self.columns();
        order.map(|i| columns[i])
    }

    /// Axis, second axis, partner: `col1`, `col3`, `col2`.
    fn dual_axis(&self) -> [&[HorseNumber]; 3] {
        [&self.col1, &self.col3, &self.col2]
    }

    /// The first `k` columns.
    fn first(&self, k: usize) -> Vec<&[HorseNumber]> {
        self.columns().into_iter().take(k).collect()
    }
}

fn product_len(columns: &[&[HorseNumber]]) -> u64 {
    columns
        .iter()
        .fold(1u64, |acc, c| acc.saturating_mul(c.len() as u64))
}

fn intersection_len(columns: &[&[HorseNumber]]) -> u64 {
    match columns.split_first() {
        Some((head, rest)) => head
            .iter()
            .filter(|&&h| rest.iter().all(|c| c.contains(&h)))
            .count() as u64,
        None => 0,
    }
}

fn pairwise_disjoint(columns: &[&[HorseNumber]]) -> bool {
    columns.iter().enumerate().all(|(i, a)| {
        columns[i + 1..]
            .iter()
            .all(|b| intersection_len(&[*a, *b]) == 0)
    })
}

/// Tuples of the cartesian product with no repeated horse, by inclusion–exclusion.
fn ordered_formation_count(columns: &[&[HorseNumber]]) -> u64 {
    match *columns {
        [a, b] => product_len(columns).saturating_sub(intersection_len(&[a, b])),
        [a, b, c] => {
            let collisions = intersection_len(&[a, b]) * c.len() as u64
                + intersection_len(&[a, c]) * b.len() as u64
                + intersection_len(&[b, c]) * a.len() as u64;
            (product_len(columns) + 2 * intersection_len(&[a, b, c])).saturating_sub(collisions)
        }
        _ => distinct_tuples(columns).len() as u64,
    }
}

/// Cartesian product of `columns` in column order, skipping repeated horses.
fn distinct_tuples(columns: &[&[HorseNumber]]) -> Vec<Vec<HorseNumber>> {
    let mut tuples: Vec<Vec<HorseNumber>> = vec![Vec::with_capacity(columns.len())];
    for column in columns {
        let mut extended = Vec::with_capacity(tuples.len() * column.len());
        for prefix in &tuples {
            for &horse in *column {
                if prefix.contains(&horse) {
                    continue;
                }
                let mut next = prefix.clone();
                next.push(horse);
                extended.push(next);
            }
        }
        tuples = extended;
    }
    tuples
}

/// Distinct horse sets reachable by picking one horse per column.
fn distinct_sets(columns: &[&[HorseNumber]]) -> BTreeSet<Vec<HorseNumber>> {
    distinct_tuples(columns)
        .into_iter()
        .map(|mut tuple| {
            tuple.sort_unstable();
            tuple
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(col1: &[u8], col2: &[u8], col3: &[u8]) -> ColumnSelections {
        ColumnSelections::from_columns(col1.iter().copied(), col2.iter().copied(), col3.iter().copied())
    }

    fn horses(lines: &[WagerLine]) -> Vec<Vec<u8>> {
        lines.iter().map(|l| l.horses.clone()).collect()
    }

    #[test]
    fn test_win_normal() {
        let s = sel(&[7], &[], &[]);
        assert_eq!(calculate_bet_count(WagerType::Win, BetMethod::Normal, &s), 1);
        let lines = enumerate_lines(WagerType::Win, BetMethod::Normal, &s);
        assert_eq!(horses(&lines), vec![vec![7]]);
    }

    #[test]
    fn test_normal_requires_exact_count() {
        let s = sel(&[1, 2], &[], &[]);
        assert_eq!(calculate_bet_count(WagerType::Trio, BetMethod::Normal, &s), 0);
        assert_eq!(calculate_bet_count(WagerType::Quinella, BetMethod::Normal, &s), 1);
        assert_eq!(calculate_bet_count(WagerType::Win, BetMethod::Normal, &s), 0);
    }

    #[test]
    fn test_box_counts() {
        assert_eq!(calculate_bet_count(WagerType::Quinella, BetMethod::Box, &sel(&[1, 2, 3], &[], &[])), 3);
        assert_eq!(calculate_bet_count(WagerType::Trio, BetMethod::Box, &sel(&[1, 2, 3, 4], &[], &[])), 4);
        assert_eq!(calculate_bet_count(WagerType::Exacta, BetMethod::Box, &sel(&[1, 2, 3], &[], &[])), 6);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Box, &sel(&[1, 2, 3, 4], &[], &[])), 24);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Box, &sel(&[1, 2], &[], &[])), 0);
    }

    #[test]
    fn test_quinella_nagashi_lines() {
        let s = sel(&[1], &[2, 3, 4], &[]);
        assert_eq!(calculate_bet_count(WagerType::Quinella, BetMethod::Nagashi, &s), 3);
        let lines = enumerate_lines(WagerType::Quinella, BetMethod::Nagashi, &s);
        assert_eq!(horses(&lines), vec![vec![1, 2], vec![1, 3], vec![1, 4]]);
    }

    #[test]
    fn test_unordered_nagashi_excludes_overlap() {
        let s = sel(&[2], &[1, 2, 3], &[]);
        assert_eq!(calculate_bet_count(WagerType::QuinellaPlace, BetMethod::Nagashi, &s), 2);
        assert_eq!(enumerate_lines(WagerType::QuinellaPlace, BetMethod::Nagashi, &s).len(), 2);
    }

    #[test]
    fn test_trio_axis_variants() {
        let one = sel(&[1], &[2, 3, 4, 5], &[]);
        assert_eq!(calculate_bet_count(WagerType::Trio, BetMethod::Nagashi, &one), 6);
        let two = sel(&[1, 2], &[3, 4, 5], &[]);
        assert_eq!(calculate_bet_count(WagerType::Trio, BetMethod::Nagashi2, &two), 3);
        assert_eq!(
            horses(&enumerate_lines(WagerType::Trio, BetMethod::Nagashi2, &two)),
            vec![vec![1, 2, 3], vec![1, 2, 4], vec![1, 2, 5]]
        );
        // axis-2 needs exactly two axis horses
        assert_eq!(calculate_bet_count(WagerType::Trio, BetMethod::Nagashi2, &one), 0);
    }

    #[test]
    fn test_exacta_axis_positions() {
        let s = sel(&[5], &[1, 2], &[]);
        assert_eq!(
            horses(&enumerate_lines(WagerType::Exacta, BetMethod::Nagashi1, &s)),
            vec![vec![5, 1], vec![5, 2]]
        );
        assert_eq!(
            horses(&enumerate_lines(WagerType::Exacta, BetMethod::Nagashi2, &s)),
            vec![vec![1, 5], vec![2, 5]]
        );
        assert_eq!(calculate_bet_count(WagerType::Exacta, BetMethod::NagashiMulti, &s), 4);
    }

    #[test]
    fn test_trifecta_single_axis() {
        let s = sel(&[1], &[2, 3, 4], &[]);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi3, &s), 6);
        assert!(
            enumerate_lines(WagerType::Trifecta, BetMethod::Nagashi3, &s)
                .iter()
                .all(|l| l.horses[2] == 1)
        );
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi1Multi, &s), 18);
    }

    #[test]
    fn test_trifecta_nagashi_12_scenario() {
        let s = sel(&[1], &[3, 4, 5], &[2]);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi12, &s), 3);
        assert_eq!(
            horses(&enumerate_lines(WagerType::Trifecta, BetMethod::Nagashi12, &s)),
            vec![vec![1, 3, 2], vec![1, 4, 2], vec![1, 5, 2]]
        );
    }

    #[test]
    fn test_dual_axis_fixed_positions() {
        let s = sel(&[1], &[3, 4], &[2]);
        assert_eq!(
            horses(&enumerate_lines(WagerType::Trifecta, BetMethod::Nagashi13, &s)),
            vec![vec![1, 3, 2], vec![1, 4, 2]]
        );
        // partners run 1st, col1 axis 2nd, col3 axis 3rd
        assert_eq!(
            horses(&enumerate_lines(WagerType::Trifecta, BetMethod::Nagashi23, &s)),
            vec![vec![3, 1, 2], vec![4, 1, 2]]
        );
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi23, &s), 2);
    }

    #[test]
    fn test_dual_axis_fixed_overlap_dropped() {
        let s = sel(&[1], &[1, 3], &[2]);
        assert_eq!(
            horses(&enumerate_lines(WagerType::Trifecta, BetMethod::Nagashi23, &s)),
            vec![vec![3, 1, 2]]
        );
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi23, &s), 1);
    }

    #[test]
    fn test_dual_axis_general_product() {
        let s = sel(&[1, 2], &[5, 6, 7], &[3]);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi23, &s), 6);
        let missing_axis = sel(&[1], &[5, 6], &[]);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi13, &missing_axis), 0);
    }

    #[test]
    fn test_nagashi_2_multi() {
        let s = sel(&[1], &[3, 4], &[2]);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi2Multi, &s), 12);
        let lines = enumerate_lines(WagerType::Trifecta, BetMethod::Nagashi2Multi, &s);
        assert_eq!(lines.len(), 12);
        let unique: BTreeSet<_> = lines.iter().collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn test_nagashi_2_multi_swapped_axes_dedup() {
        // {1,2,p} is reachable as (a=1,b=2) and (a=2,b=1)
        let s = sel(&[1, 2], &[3], &[1, 2]);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi2Multi, &s), 6);
        assert_eq!(enumerate_lines(WagerType::Trifecta, BetMethod::Nagashi2Multi, &s).len(), 6);
    }

    #[test]
    fn test_quinella_formation_dedup() {
        let s = sel(&[1, 2], &[2, 3], &[]);
        assert_eq!(calculate_bet_count(WagerType::Quinella, BetMethod::Formation, &s), 3);
        assert_eq!(
            horses(&enumerate_lines(WagerType::Quinella, BetMethod::Formation, &s)),
            vec![vec![1, 2], vec![1, 3], vec![2, 3]]
        );
    }

    #[test]
    fn test_trifecta_formation() {
        let s = sel(&[1, 2], &[2, 3], &[3, 4]);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Formation, &s), 4);
        assert_eq!(
            horses(&enumerate_lines(WagerType::Trifecta, BetMethod::Formation, &s)),
            vec![vec![1, 2, 3], vec![1, 2, 4], vec![1, 3, 4], vec![2, 3, 4]]
        );
    }

    #[test]
    fn test_trio_formation_overlapping_pools() {
        let s = sel(&[1, 2, 3], &[1, 2, 3], &[1, 2, 3, 4]);
        // sets of 3 from {1,2,3,4} that use at most one 4: {1,2,3},{1,2,4},{1,3,4},{2,3,4}
        assert_eq!(calculate_bet_count(WagerType::Trio, BetMethod::Formation, &s), 4);
        assert_eq!(enumerate_lines(WagerType::Trio, BetMethod::Formation, &s).len(), 4);
    }

    #[test]
    fn test_formation_ignores_unused_column() {
        let s = sel(&[1], &[2], &[3]);
        assert_eq!(calculate_bet_count(WagerType::Exacta, BetMethod::Formation, &s), 1);
    }

    #[test]
    fn test_empty_required_column_collapses() {
        let s = sel(&[1, 2], &[], &[3]);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Formation, &s), 0);
        assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Nagashi12, &s), 0);
        assert!(enumerate_lines(WagerType::Trifecta, BetMethod::Formation, &s).is_empty());
    }

    #[test]
    fn test_unsupported_pair_is_zero() {
        let s = sel(&[1], &[2, 3], &[4]);
        assert_eq!(rule_for(WagerType::Win, BetMethod::Nagashi), None);
        assert_eq!(calculate_bet_count(WagerType::Exacta, BetMethod::Nagashi12, &s), 0);
        assert!(enumerate_lines(WagerType::Quinella, BetMethod::Nagashi1, &s).is_empty());
    }

    #[test]
    fn test_calculator_does_not_mutate() {
        let s = sel(&[1, 2], &[2, 3], &[3, 4]);
        let before = s.clone();
        let _ = calculate_bet_count(WagerType::Trifecta, BetMethod::Formation, &s);
        let _ = enumerate_lines(WagerType::Trifecta, BetMethod::Formation, &s);
        assert_eq!(s, before);
    }
}
