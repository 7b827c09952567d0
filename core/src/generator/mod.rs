use crate::*;
pub use random::*;
pub use seeded::*;

mod random;
mod seeded;

pub trait PuzzleGenerator {
    fn generate(self, word: &str, size: Coord) -> core::result::Result<Puzzle, GenerationError>;
}

/// Uppercased letters of `word`, checked against the grid capacity.
fn word_letters(word: &str, size: Coord) -> core::result::Result<Vec<char>, GenerationError> {
    let letters: Vec<char> = word.chars().map(|c| c.to_ascii_uppercase()).collect();
    if letters.is_empty() || letters.len() > usize::from(mult(size, size)) {
        return Err(GenerationError::WordDoesNotFit { len: letters.len() });
    }
    Ok(letters)
}
