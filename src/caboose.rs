//! # Caboose — Parallel Search for Prime-Generating Polynomials
//!
//! A caboose number is a positive integer c such that f_c(n) = n² − n + c is
//! prime for every n in [0, c). The classical result (Rabinowitz 1913, via the
//! class number of ℚ(√(1−4c))) is that exactly six exist: 2, 3, 5, 11, 17, 41.
//! The search recomputes them from scratch rather than trusting the theorem.
//!
//! ## Rejection structure
//!
//! f_c(0) = f_c(1) = c, so a composite c fails immediately on a single
//! primality test — no probe loop is entered. For prime c the probes run
//! n = 2, 3, … with an early exit on the first composite value; almost every
//! prime candidate dies within the first handful of probes, which keeps the
//! per-candidate cost near O(1) and makes the outer loop the right place to
//! parallelise.
//!
//! ## Parallelism and ordering
//!
//! The candidate range is cut into fixed-size tiles. Within a tile, rayon
//! evaluates candidates in parallel and the indexed collect preserves range
//! order; tiles are processed low to high, so emission is strictly ascending
//! in c without a global sort. Workers share nothing but the final per-tile
//! drain — no per-probe locks, no per-probe allocation.

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::io::Write;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::primality::is_prime;
use crate::progress::Progress;

/// Largest candidate for which every probe value fits the modular kernel:
/// f_c(c−1) = c² − 2c + 2 must stay below 2^63, i.e. c ≤ ⌊√(2^63)⌋.
pub const MAX_CANDIDATE: u64 = 3_037_000_499;

/// Candidates evaluated per parallel tile. Large enough to amortize the
/// rayon fork/join, small enough that progress stays fresh.
const TILE_SIZE: u64 = 65_536;

/// The Euler polynomial f_c(n) = n² − n + c.
///
/// Total over the probe domain: n² ≥ n for every u64, so the subtraction
/// never underflows, including at n = 0 where the value is c itself.
#[inline]
fn polynomial(n: u64, c: u64) -> u64 {
    n * n - n + c
}

/// Decide the caboose predicate for a single candidate.
///
/// Probes f_c(n) for n in [0, c) and returns true iff every value is prime.
/// The n = 0 and n = 1 probes both evaluate to c itself, so the test on c
/// doubles as the composite fast-reject.
pub fn is_caboose(c: u64) -> bool {
    debug_assert!(c <= MAX_CANDIDATE, "candidate {} overflows probe values", c);
    if c == 0 {
        return false;
    }
    // f_c(0) = f_c(1) = c; covers c = 1 as well since 1 is not prime.
    if !is_prime(c) {
        return false;
    }
    (2..c).all(|n| is_prime(polynomial(n, c)))
}

/// Evaluate all candidates in `lo..=hi` in parallel, returning the caboose
/// numbers in ascending order. The indexed parallel collect keeps range order,
/// so no sort is needed.
pub fn find_in_range(lo: u64, hi: u64) -> Vec<u64> {
    (lo..=hi)
        .into_par_iter()
        .filter(|&c| is_caboose(c))
        .collect()
}

/// Search 1..=limit for caboose numbers, writing one line per hit to `sink`
/// in strictly ascending order. Returns the full hit list.
///
/// Fails on limit = 0, on limits past the overflow-safe bound, and on any
/// sink write error.
pub fn search<W: Write>(limit: u64, progress: &Arc<Progress>, sink: &mut W) -> Result<Vec<u64>> {
    if limit == 0 {
        bail!("limit must be at least 1");
    }
    if limit > MAX_CANDIDATE {
        bail!(
            "limit {} exceeds {} (probe values would overflow 64 bits)",
            limit,
            MAX_CANDIDATE
        );
    }

    let mut hits = Vec::new();
    let mut tile_start = 1u64;

    while tile_start <= limit {
        let tile_end = (tile_start + TILE_SIZE - 1).min(limit);

        *progress.current.lock().unwrap() = format!("c=[{}..{}]", tile_start, tile_end);

        let tile_hits = find_in_range(tile_start, tile_end);

        progress
            .tested
            .fetch_add(tile_end - tile_start + 1, Ordering::Relaxed);

        for &c in &tile_hits {
            progress.found.fetch_add(1, Ordering::Relaxed);
            writeln!(sink, "{} is a caboose number", c).context("failed to write result")?;
        }
        hits.extend_from_slice(&tile_hits);

        tile_start = tile_end + 1;
    }

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(limit: u64) -> (Vec<u64>, String) {
        let progress = Progress::new();
        let mut out = Vec::new();
        let hits = search(limit, &progress, &mut out).unwrap();
        (hits, String::from_utf8(out).unwrap())
    }

    #[test]
    fn polynomial_endpoints() {
        // f_c(0) = f_c(1) = c, and f_c(c) = c² is always composite.
        // n = 0 is the underflow hazard: n² − n must not wrap below zero.
        assert_eq!(polynomial(0, 2), 2);
        assert_eq!(polynomial(1, 2), 2);
        assert_eq!(polynomial(0, 41), 41);
        assert_eq!(polynomial(1, 41), 41);
        assert_eq!(polynomial(41, 41), 41 * 41);
        assert_eq!(polynomial(2, 7), 9);
    }

    #[test]
    fn known_cabooses_accepted() {
        for &c in &[2u64, 3, 5, 11, 17, 41] {
            assert!(is_caboose(c), "{} should be a caboose number", c);
        }
    }

    #[test]
    fn zero_and_one_rejected() {
        assert!(!is_caboose(0));
        // f_1(0) = 1, not prime
        assert!(!is_caboose(1));
    }

    /// Prime candidates that fail on a specific probe: 7 at n=2 (f=9),
    /// 13 at n=4 (f=25), 23 at n=2 (f=25), 29 at n=5 (f=49 after the
    /// prime f_29(2)=31 passes).
    #[test]
    fn targeted_prime_rejections() {
        for &c in &[7u64, 13, 23, 29] {
            assert!(!is_caboose(c), "{} should be rejected", c);
        }
        assert_eq!(polynomial(2, 7), 9);
        assert_eq!(polynomial(4, 13), 25);
        assert_eq!(polynomial(2, 23), 25);
        assert!(is_prime(polynomial(2, 29)));
        assert_eq!(polynomial(5, 29), 49);
    }

    #[test]
    fn search_limit_one_is_empty() {
        let (hits, out) = run(1);
        assert!(hits.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn search_limit_two_emits_two() {
        let (hits, out) = run(2);
        assert_eq!(hits, vec![2]);
        assert_eq!(out, "2 is a caboose number\n");
    }

    #[test]
    fn search_limit_ten() {
        let (hits, _) = run(10);
        assert_eq!(hits, vec![2, 3, 5]);
    }

    #[test]
    fn search_limit_41_finds_all_six() {
        let (hits, out) = run(41);
        assert_eq!(hits, vec![2, 3, 5, 11, 17, 41]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5], "41 is a caboose number");
    }

    /// Rabinowitz: no caboose number exceeds 41, so pushing the limit well
    /// past it must add nothing to the six.
    #[test]
    fn search_limit_1000_finds_exactly_six() {
        let (hits, _) = run(1_000);
        assert_eq!(hits, vec![2, 3, 5, 11, 17, 41]);
    }

    /// A limit past TILE_SIZE drives `search` through the multi-tile path:
    /// the tile fencepost, the low-to-high tile drain, and ascending emission
    /// across the tile boundary all get exercised. Still exactly six hits.
    #[test]
    fn search_spanning_multiple_tiles() {
        let limit = TILE_SIZE + 4_129;
        let (hits, out) = run(limit);
        assert_eq!(hits, vec![2, 3, 5, 11, 17, 41]);
        assert_eq!(out.lines().count(), 6);

        // The tile split is invisible to find_in_range callers too.
        let mut split = find_in_range(1, TILE_SIZE);
        split.extend(find_in_range(TILE_SIZE + 1, limit));
        assert_eq!(split, hits);
    }

    #[test]
    fn emissions_ascending_and_prime() {
        let (hits, _) = run(500);
        for w in hits.windows(2) {
            assert!(w[0] < w[1], "emission order not ascending: {:?}", hits);
        }
        for &c in &hits {
            assert!(is_prime(c), "emitted caboose {} is not prime", c);
        }
    }

    #[test]
    fn search_rejects_zero_limit() {
        let progress = Progress::new();
        let mut out = Vec::new();
        assert!(search(0, &progress, &mut out).is_err());
    }

    #[test]
    fn search_rejects_overflowing_limit() {
        let progress = Progress::new();
        let mut out = Vec::new();
        assert!(search(MAX_CANDIDATE + 1, &progress, &mut out).is_err());
    }

    #[test]
    fn find_in_range_respects_bounds() {
        assert_eq!(find_in_range(12, 100), vec![17, 41]);
        assert_eq!(find_in_range(42, 10_000), Vec::<u64>::new());
    }

    #[test]
    fn sink_failure_propagates() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("sink closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let progress = Progress::new();
        assert!(search(10, &progress, &mut FailingSink).is_err());
    }
}
