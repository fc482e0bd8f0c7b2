/// Append-only cache of the primes produced so far.
///
/// Each instance is independent; callers that want one running sequence
/// across several matrices pass the same `PrimeSequence` to each of them.
#[derive(Debug, Clone, Default)]
pub struct PrimeSequence {
    primes: Vec<u64>,
}

impl PrimeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next prime and remember it
    pub fn next_prime(&mut self) -> u64 {
        let mut candidate = match self.primes.last() {
            None => 2,
            Some(2) => 3,
            Some(&p) => p + 2,
        };
        while !self.is_prime(candidate) {
            candidate += 2;
        }
        self.primes.push(candidate);
        candidate
    }

    /// Trial division by the cached primes up to √candidate
    fn is_prime(&self, candidate: u64) -> bool {
        self.primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
    }

    /// Produce the next `n` primes
    pub fn next_n(&mut self, n: usize) -> Vec<u64> {
        (0..n).map(|_| self.next_prime()).collect()
    }

    /// Every prime produced so far, in increasing order
    pub fn known(&self) -> &[u64] {
        &self.primes
    }
}

impl Iterator for PrimeSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_prime())
    }
}
