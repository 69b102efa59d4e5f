use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LjError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("xyz file is empty, expected the number of atoms on the first line")]
    MissingAtomCount,

    #[error("invalid atom count '{0}' on the first line")]
    InvalidAtomCount(String),

    #[error("xyz file ended after {found} of {expected} atoms")]
    UnexpectedEof { expected: usize, found: usize },

    #[error("line {line}: missing {axis} coordinate")]
    MissingCoordinate { line: usize, axis: char },

    #[error("line {line}: invalid {axis} coordinate '{value}'")]
    InvalidCoordinate {
        line: usize,
        axis: char,
        value: String,
    },

    #[error("invalid bounds [{low}, {high}), expected finite low < high")]
    InvalidBounds { low: f64, high: f64 },

    #[error("positions must have shape (nb_atoms, 3), got {0:?}")]
    InvalidShape(Vec<usize>),
}
