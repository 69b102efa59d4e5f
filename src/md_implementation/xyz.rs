use super::cluster::Cluster;
use super::error::LjError;
use log::debug;
use ndarray::Array2;
use std::fs;
use std::io;
use std::io::prelude::*;
use std::path::Path;

// The header count is untrusted, rows beyond this are allocated as they are read.
const MAX_PREALLOCATED_ATOMS: usize = 1 << 20;

pub fn read_xyz<P: AsRef<Path>>(file_path: P) -> Result<Cluster, LjError> {
    let file = fs::File::open(file_path.as_ref())?;
    debug!("reading cluster from {}", file_path.as_ref().display());
    read_xyz_from(io::BufReader::new(file))
}

/// Parses positions from an (extended) XYZ stream. Columns after x, y, z
/// (e.g. velocities) are ignored.
pub fn read_xyz_from<R: BufRead>(mut reader: R) -> Result<Cluster, LjError> {
    // First line has number of atoms
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(LjError::MissingAtomCount);
    }
    let nb_atoms: usize = line
        .trim()
        .parse()
        .map_err(|_| LjError::InvalidAtomCount(line.trim().to_string()))?;

    // In extended XYZ this contains cell information, we ignore it for now
    line.clear();
    reader.read_line(&mut line)?;

    let mut positions: Vec<f64> = Vec::with_capacity(3 * nb_atoms.min(MAX_PREALLOCATED_ATOMS));
    for i in 0..nb_atoms {
        let line_number = i + 3;
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(LjError::UnexpectedEof {
                expected: nb_atoms,
                found: i,
            });
        }
        let mut columns = line.split_whitespace().skip(1);
        for axis in ['x', 'y', 'z'] {
            let value = columns.next().ok_or(LjError::MissingCoordinate {
                line: line_number,
                axis,
            })?;
            positions.push(value.parse().map_err(|_| LjError::InvalidCoordinate {
                line: line_number,
                axis,
                value: value.to_string(),
            })?);
        }
    }
    debug!("read {} atoms", nb_atoms);

    let positions = Array2::from_shape_vec((nb_atoms, 3), positions)
        .map_err(|_| LjError::InvalidShape(vec![nb_atoms, 3]))?;
    Cluster::from_positions(positions)
}
