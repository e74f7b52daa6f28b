//! Workload driver for comparing the engines
//!
//! Runs the same operation sequence against any [`PriorityQueue`] and records
//! wall-clock timings per call. The engines themselves never measure time;
//! everything here sits on top of the public trait.
//!
//! A profile for one engine and one size runs, in order:
//!
//! 1. build: create an empty queue and insert every generated key
//! 2. `FindMin` repeated `num_ops` times
//! 3. `DeleteMin` repeated up to `num_ops` times (stops once the queue is empty)
//! 4. `Insert` of `num_ops` fresh keys
//!
//! # Example
//!
//! ```rust
//! use lab_heaps::array_heap::ArrayHeap;
//! use lab_heaps::workload::{profile, KeyGen};
//!
//! let mut keygen = KeyGen::new(7);
//! let keys = keygen.keys(1_000);
//! let report = profile::<ArrayHeap<u32>>("ArrayHeap", &keys, 100, &mut keygen);
//!
//! assert_eq!(report.size, 1_000);
//! assert_eq!(report.delete_min.samples, 100);
//! ```

use crate::traits::PriorityQueue;
use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Heap sizes measured by default: 10^3 through 10^7
pub const DEFAULT_SIZES: [usize; 5] = [1_000, 10_000, 100_000, 1_000_000, 10_000_000];

/// Calls per timed operation
pub const DEFAULT_OPS: usize = 1_000;

/// Largest key produced by [`KeyGen`]
pub const MAX_KEY: u32 = 1_000_000;

/// Deterministic key source (64-bit LCG)
///
/// Produces keys uniformly enough in `1..=MAX_KEY` for benchmarking, and the
/// same seed always yields the same sequence so both engines see identical
/// input.
#[derive(Debug, Clone)]
pub struct KeyGen {
    state: u64,
}

impl KeyGen {
    pub fn new(seed: u64) -> Self {
        KeyGen { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Next key in `1..=MAX_KEY`
    pub fn next_key(&mut self) -> u32 {
        // Low LCG bits have short periods, use the high half
        ((self.next() >> 32) % MAX_KEY as u64) as u32 + 1
    }

    /// `n` fresh keys
    pub fn keys(&mut self, n: usize) -> Vec<u32> {
        (0..n).map(|_| self.next_key()).collect()
    }
}

/// Operations timed by [`time_operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FindMin,
    DeleteMin,
    Insert,
}

impl Operation {
    /// All operations in the order a profile runs them
    pub const ALL: [Operation; 3] = [
        Operation::FindMin,
        Operation::DeleteMin,
        Operation::Insert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::FindMin => "find_min",
            Operation::DeleteMin => "delete_min",
            Operation::Insert => "insert",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Average and worst single-call time of an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpStats {
    pub avg: Duration,
    pub max: Duration,
    pub samples: usize,
}

impl OpStats {
    /// Aggregates individual call timings; no samples gives all zeros
    pub fn from_samples(samples: &[Duration]) -> Self {
        if samples.is_empty() {
            return OpStats::default();
        }
        let total: Duration = samples.iter().sum();
        OpStats {
            avg: total / samples.len() as u32,
            max: samples.iter().copied().max().unwrap_or_default(),
            samples: samples.len(),
        }
    }
}

/// Timings of one engine at one size
#[derive(Debug, Clone)]
pub struct EngineReport {
    pub engine: String,
    pub size: usize,
    /// Time to construct the queue and insert every key
    pub build: Duration,
    pub find_min: OpStats,
    pub delete_min: OpStats,
    pub insert: OpStats,
}

impl EngineReport {
    pub fn stats(&self, op: Operation) -> OpStats {
        match op {
            Operation::FindMin => self.find_min,
            Operation::DeleteMin => self.delete_min,
            Operation::Insert => self.insert,
        }
    }
}

/// Inserts every key into `heap`, returning the elapsed time
pub fn fill<H: PriorityQueue<u32>>(heap: &mut H, keys: &[u32]) -> Duration {
    let start = Instant::now();
    for &key in keys {
        heap.insert(key);
    }
    start.elapsed()
}

/// Runs `op` up to `num_ops` times, timing each call on its own
///
/// `DeleteMin` stops after the first call that finds the queue empty. Keys for
/// `Insert` are drawn from `keygen` before the clock starts.
pub fn time_operation<H: PriorityQueue<u32>>(
    heap: &mut H,
    op: Operation,
    num_ops: usize,
    keygen: &mut KeyGen,
) -> OpStats {
    let mut samples = Vec::with_capacity(num_ops);

    for _ in 0..num_ops {
        match op {
            Operation::FindMin => {
                let start = Instant::now();
                black_box(heap.peek_min());
                samples.push(start.elapsed());
            }
            Operation::DeleteMin => {
                let start = Instant::now();
                let result = black_box(heap.extract_min());
                samples.push(start.elapsed());
                if result.is_none() {
                    break;
                }
            }
            Operation::Insert => {
                let key = keygen.next_key();
                let start = Instant::now();
                heap.insert(black_box(key));
                samples.push(start.elapsed());
            }
        }
    }

    OpStats::from_samples(&samples)
}

/// Builds an `H` from `keys` and times every [`Operation`] against it
pub fn profile<H: PriorityQueue<u32>>(
    engine: &str,
    keys: &[u32],
    num_ops: usize,
    keygen: &mut KeyGen,
) -> EngineReport {
    let start = Instant::now();
    let mut heap = H::new();
    let build = start.elapsed() + fill(&mut heap, keys);

    let find_min = time_operation(&mut heap, Operation::FindMin, num_ops, keygen);
    let delete_min = time_operation(&mut heap, Operation::DeleteMin, num_ops, keygen);
    let insert = time_operation(&mut heap, Operation::Insert, num_ops, keygen);

    EngineReport {
        engine: engine.to_string(),
        size: keys.len(),
        build,
        find_min,
        delete_min,
        insert,
    }
}

/// Heap sizes from `10^exp` command-line arguments
///
/// Arguments starting with `--` (cargo forwards `--bench`) are skipped.
/// Arguments that are not an exponent, or whose power of ten overflows
/// `usize`, are reported on stderr and ignored. Falls back to
/// [`DEFAULT_SIZES`] when nothing usable remains.
pub fn sizes_from_exponents<I: IntoIterator<Item = String>>(args: I) -> Vec<usize> {
    let sizes: Vec<usize> = args
        .into_iter()
        .filter(|arg| !arg.starts_with("--"))
        .filter_map(|arg| {
            match arg.parse::<u32>().ok().and_then(|exp| 10usize.checked_pow(exp)) {
                Some(size) => Some(size),
                None => {
                    eprintln!("ignoring size argument {:?}: expected a power of ten", arg);
                    None
                }
            }
        })
        .collect();

    if sizes.is_empty() {
        DEFAULT_SIZES.to_vec()
    } else {
        sizes
    }
}
