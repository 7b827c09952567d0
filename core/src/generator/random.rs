use super::*;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

/// Upper bound of walks tried before giving up.
pub const MAX_ATTEMPTS: u32 = 300;

/// Embeds the word as a random self-avoiding walk, restarting from scratch on
/// every dead end.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPathGenerator {
    seed: u64,
    max_attempts: u32,
}

impl RandomPathGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }
}

impl PuzzleGenerator for RandomPathGenerator {
    fn generate(self, word: &str, size: Coord) -> core::result::Result<Puzzle, GenerationError> {
        let letters = word_letters(word, size)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        for attempt in 1..=self.max_attempts {
            let Some(path) = random_walk(&mut rng, letters.len(), size) else {
                log::trace!("walk attempt {} hit a dead end", attempt);
                continue;
            };
            log::debug!("embedded {} after {} attempt(s)", word, attempt);

            let first = letters[0];
            let noise = || {
                let letter = *ALPHABET.choose(&mut rng).unwrap_or(&'A');
                // one re-roll only, other letters may still repeat the word
                if letter == first {
                    *ALPHABET.choose(&mut rng).unwrap_or(&'A')
                } else {
                    letter
                }
            };
            return Ok(Puzzle::fill(size, &letters, path, noise));
        }

        Err(GenerationError::NoPathFound {
            attempts: self.max_attempts,
        })
    }
}

fn random_walk(rng: &mut SmallRng, length: usize, size: Coord) -> Option<EmbeddedPath> {
    let dim = usize::from(size);
    let mut visited: Array2<bool> = Array2::default((dim, dim));
    let mut current = GridPos::new(rng.random_range(0..size), rng.random_range(0..size));
    let mut path = Vec::with_capacity(length);

    visited[current.to_nd_index()] = true;
    path.push(current);

    while path.len() < length {
        let mut options: Vec<GridPos> = current
            .iter_neighbors(size)
            .filter(|pos| !visited[pos.to_nd_index()])
            .collect();
        options.shuffle(rng);
        current = *options.choose(rng)?;
        visited[current.to_nd_index()] = true;
        path.push(current);
    }

    Some(EmbeddedPath::new_unchecked(path))
}
