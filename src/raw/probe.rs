/// The polynomial base of the hash that picks the first slot of a probe sequence.
pub const HASH_PRIME_A: u64 = 151;

/// The polynomial base of the hash that picks the probe step.
///
/// Must differ from [`HASH_PRIME_A`], otherwise keys that share a first slot
/// also share every later one.
pub const HASH_PRIME_B: u64 = 163;

// A polynomial rolling hash of `key` modulo `m`.
//
// Computes `sum(a^(len - 1 - i) * key[i]) mod m` over the bytes of the key,
// evaluated in Horner form so every intermediate stays below `m * 256`.
#[inline]
pub fn hash(key: &str, a: u64, m: usize) -> usize {
    let m = m as u128;
    let a = a as u128 % m;

    let hash = key
        .bytes()
        .fold(0u128, |hash, byte| (hash * a + byte as u128) % m);

    hash as usize
}

// The distance between consecutive probes for a key with secondary hash `h2`.
//
// `h2 + 1` is never zero, but equals `len` when `h2 == len - 1`, which would
// pin the probe to a single slot. Reducing `h2` modulo `len - 1` only affects
// that case and keeps the step in `1..len`, coprime with the prime length.
#[inline]
fn step(h2: usize, len: usize) -> usize {
    if len <= 2 {
        return 1;
    }

    h2 % (len - 1) + 1
}

// A double-hashing probe sequence.
//
// Attempt `n` visits `(h1 + n * step) mod len`. With a prime table length the
// first `len` attempts visit every slot exactly once.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    // The current index in the probe sequence.
    pub i: usize,
    // The number of probes made so far.
    pub attempt: usize,
    // The length of the table.
    len: usize,
    // The per-attempt stride.
    step: usize,
}

impl Probe {
    // Initialize the probe sequence for `key` in a table of `len` slots.
    #[inline]
    pub fn start(key: &str, len: usize) -> Probe {
        debug_assert!(len >= 2, "table length must be a prime");

        Probe {
            i: hash(key, HASH_PRIME_A, len),
            attempt: 0,
            len,
            step: step(hash(key, HASH_PRIME_B, len), len),
        }
    }

    // Returns `true` once every slot has been visited.
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.attempt >= self.len
    }

    // Advance to the next slot in the probe sequence.
    #[inline]
    pub fn next(&mut self) {
        self.attempt += 1;
        self.i = (self.i + self.step) % self.len;
    }
}
