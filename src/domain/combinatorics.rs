//! Counting primitives and index generators.
//!
//! `binomial` and `falling_factorial` back the closed-form counts;
//! `combinations` and `permutations` back line enumeration. Counts are
//! `u64` and saturate rather than overflow.

use super::wager::HorseNumber;

/// C(n, k): unordered selections of `k` from `n`. Zero when `n < k`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u64 = 1;
    for i in 0..k {
        // acc * (n - i) is always divisible by (i + 1) at this point
        acc = acc.saturating_mul((n - i) as u64) / (i as u64 + 1);
    }
    acc
}

/// n·(n−1)·…·(n−k+1): ordered selections of `k` from `n`. Zero when `n < k`.
pub fn falling_factorial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    (0..k).fold(1u64, |acc, i| acc.saturating_mul((n - i) as u64))
}

/// Every `k`-subset of `pool`, preserving `pool` order inside each subset.
pub fn combinations(pool: &[HorseNumber], k: usize) -> Vec<Vec<HorseNumber>> {
    fn backtrack(
        start: usize,
        pool: &[HorseNumber],
        k: usize,
        current: &mut Vec<HorseNumber>,
        output: &mut Vec<Vec<HorseNumber>>,
    ) {
        if current.len() == k {
            output.push(current.clone());
            return;
        }
        for idx in start..pool.len() {
            current.push(pool[idx]);
            backtrack(idx + 1, pool, k, current, output);
            current.pop();
        }
    }

    if k > pool.len() {
        return Vec::new();
    }
    let mut output = Vec::new();
    backtrack(0, pool, k, &mut Vec::with_capacity(k), &mut output);
    output
}

/// Every ordered `k`-arrangement of distinct elements of `pool`.
pub fn permutations(pool: &[HorseNumber], k: usize) -> Vec<Vec<HorseNumber>> {
    fn backtrack(
        pool: &[HorseNumber],
        k: usize,
        used: &mut [bool],
        current: &mut Vec<HorseNumber>,
        output: &mut Vec<Vec<HorseNumber>>,
    ) {
        if current.len() == k {
            output.push(current.clone());
            return;
        }
        for idx in 0..pool.len() {
            if used[idx] {
                continue;
            }
            used[idx] = true;
            current.push(pool[idx]);
            backtrack(pool, k, used, current, output);
            current.pop();
            used[idx] = false;
        }
    }

    if k > pool.len() {
        return Vec::new();
    }
    let mut output = Vec::new();
    let mut used = vec![false; pool.len()];
    backtrack(pool, k, &mut used, &mut Vec::with_capacity(k), &mut output);
    output
}
