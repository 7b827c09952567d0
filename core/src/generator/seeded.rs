use super::*;

/// Bespoke linear congruential stream shared by every daily computation.
///
/// `state = state * 6364136223846793005 + 1442695040888963407 (mod 2^64)`.
/// Other platforms reproduce the same daily puzzle from the same seed, so the
/// constants and the draw helpers below must never change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DailyRng {
    state: u64,
}

impl DailyRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Negative seeds keep their two's-complement bit pattern.
    pub const fn new(seed: i64) -> Self {
        Self { state: seed as u64 }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state
    }

    /// Plain modulo draw in `0..upper`, used by the daily grid walk.
    pub fn next_index(&mut self, upper: usize) -> usize {
        (self.next_u64() % upper as u64) as usize
    }

    /// Unbiased draw in `0..upper` by widening multiply with rejection, used
    /// to pick the daily word.
    pub fn next_bounded(&mut self, upper: u64) -> u64 {
        let mut wide = u128::from(self.next_u64()) * u128::from(upper);
        if (wide as u64) < upper {
            let threshold = upper.wrapping_neg() % upper;
            while (wide as u64) < threshold {
                wide = u128::from(self.next_u64()) * u128::from(upper);
            }
        }
        (wide >> 64) as u64
    }
}

/// Deterministic daily generator. Never gives up: a dead end throws the whole
/// partial walk away and starts over from the same stream.
#[derive(Clone, Debug, PartialEq)]
pub struct SeededPathGenerator {
    seed: i64,
}

impl SeededPathGenerator {
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }
}

impl PuzzleGenerator for SeededPathGenerator {
    fn generate(self, word: &str, size: Coord) -> core::result::Result<Puzzle, GenerationError> {
        let letters = word_letters(word, size)?;
        let mut rng = DailyRng::new(self.seed);
        let mut restarts = 0u32;
        let dim = usize::from(size);

        let random_pos = |rng: &mut DailyRng| {
            let row = rng.next_index(dim) as Coord;
            let col = rng.next_index(dim) as Coord;
            GridPos::new(row, col)
        };

        let mut current = random_pos(&mut rng);
        let mut path = vec![current];
        while path.len() < letters.len() {
            let options: Vec<GridPos> = current
                .iter_neighbors(size)
                .filter(|pos| !path.contains(pos))
                .collect();
            if options.is_empty() {
                restarts += 1;
                path.clear();
                current = random_pos(&mut rng);
                path.push(current);
                continue;
            }
            current = options[rng.next_index(options.len())];
            path.push(current);
        }
        log::debug!(
            "daily walk for seed {} settled after {} restart(s)",
            self.seed,
            restarts
        );

        let path = EmbeddedPath::new_unchecked(path);
        let noise = || ALPHABET[rng.next_index(ALPHABET.len())];
        Ok(Puzzle::fill(size, &letters, path, noise))
    }
}
