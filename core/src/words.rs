use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Pool drawn from by standard rounds.
pub const STANDARD_WORDS: [&str; 70] = [
    "ALGORITMOS", "ALMACENADO", "ALTERNADOR", "ANTIAEREOS", "ARQUITECTO", "ATMOSFERAS",
    "AEROPUERTO", "AERONAUTAS", "BIOGRAFIAS", "BIBLIOTECA", "BOTELLAZOS", "BUSCADORES",
    "CALENDARIO", "CALIBRADOR", "CAPITANEOS", "CARRETERAS", "CARTOGRAFO", "CIRCULARES",
    "COMPUTADOR", "COMBUSTION", "CONTRATADO", "DIRECTORIO", "ENCRIPTADO", "EQUILIBRIO",
    "FABRICANTE", "FOTOGRAFIA", "FRAGMENTOS", "FUNCIONADO", "GEOMETRICO", "GOBERNADOR",
    "HIPERTEXTO", "ILUMINADOR", "IMPRESORAS", "INGENIEROS", "JARDINEROS", "JUGUETERIA",
    "LANZADORES", "LIDERAZGOS", "MAGNETICAS", "MANTENEDOR", "MATRICULAS", "METALURGIA",
    "MICROFONOS", "NAVEGACION", "NORMALIDAD", "ORBITACION", "ORGANIZADO", "ORQUESTADO",
    "PARTITURAL", "PERFORADOR", "PLANETARIO", "PROGRAMADO", "RADARISTAS", "RASTREADOR",
    "REACTIVADO", "REGULACION", "SOBRECARGA", "SUBSISTEMA", "TERRITORIO", "TERMOSTATO",
    "TRANSVERSO", "TRIANGULAR", "TURBINADOS", "URBANISTAS", "VENTILADOR", "VERIFICADO",
    "XILOFONIAS", "YODIFICADO", "ZAPATERIAS", "ZONIFICADO",
];

/// Pool drawn from by daily rounds. Order matters for seed parity.
pub const DAILY_WORDS: [&str; 4] = ["ALGORITMOS", "ALMACENADO", "ALTERNADOR", "ANTIAEREOS"];

/// Uppercase words of one fixed length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBook {
    words: Vec<String>,
    length: usize,
}

impl WordBook {
    /// Keeps the words of exactly `length` letters, uppercased.
    pub fn new<I, S>(words: I, length: usize) -> core::result::Result<Self, GenerationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| word.chars().count() == length)
            .collect();
        if words.is_empty() {
            return Err(GenerationError::EmptyWordBook);
        }
        Ok(Self { words, length })
    }

    pub fn standard() -> Self {
        Self::from_static(&STANDARD_WORDS)
    }

    pub fn daily() -> Self {
        Self::from_static(&DAILY_WORDS)
    }

    fn from_static(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|&word| word.into()).collect(),
            length: 10,
        }
    }

    pub fn word_length(&self) -> usize {
        self.length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // books are never empty
        self.words.choose(rng).map_or("", String::as_str)
    }

    /// Word of the day for `seed`, identical on every platform.
    pub fn for_seed(&self, seed: i64) -> &str {
        let index = DailyRng::new(seed).next_bounded(self.words.len() as u64);
        &self.words[index as usize]
    }
}

/// `yyyymmdd` as an integer, the seed of that day's challenge.
pub fn daily_seed(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// `yyyy-mm-dd` key of a calendar day.
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}
