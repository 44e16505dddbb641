use std::{fmt, str::FromStr};

use alloy::primitives::I256;
use serde::{Deserialize, Serialize};

use crate::Error;

/// One parcel of land on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Column, growing eastwards.
    pub x: i64,
    /// Row, growing northwards.
    pub y: i64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The coordinate as a pair of `int256` contract arguments.
    pub fn to_int256(self) -> Result<(I256, I256), Error> {
        let convert = |v: i64| {
            I256::try_from(v)
                .map_err(|_| Error::OutOfBounds(format!("parcel {self} does not fit int256")))
        };
        Ok((convert(self.x)?, convert(self.y)?))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCoordinate(s.to_string());

        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i64>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i64>().map_err(|_| invalid())?;

        Ok(Self { x, y })
    }
}

/// A bounded, inclusive rectangle of parcels, enumerated row by row from the north-west corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Westmost column.
    pub x_min: i64,
    /// Eastmost column.
    pub x_max: i64,
    /// Southmost row.
    pub y_min: i64,
    /// Northmost row.
    pub y_max: i64,
}

impl Grid {
    /// The genesis continent: `x ∈ [-112, -68]`, `y ∈ [-22, 22]`.
    pub const GENESIS: Grid = Grid { x_min: -112, x_max: -68, y_min: -22, y_max: 22 };

    /// Number of columns.
    pub fn width(&self) -> i64 {
        self.x_max - self.x_min + 1
    }

    /// Number of rows.
    pub fn height(&self) -> i64 {
        self.y_max - self.y_min + 1
    }

    /// Number of parcels.
    pub fn len(&self) -> usize {
        usize::try_from(self.width() * self.height()).unwrap_or(0)
    }

    /// Whether the grid has no parcels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `coordinate` lies on the grid.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.x_min..=self.x_max).contains(&coordinate.x) &&
            (self.y_min..=self.y_max).contains(&coordinate.y)
    }

    /// The coordinate of the `index`-th parcel:
    /// `x = x_min + index mod width`, `y = y_max - index div width`.
    pub fn coordinate_at(&self, index: usize) -> Result<Coordinate, Error> {
        if index >= self.len() {
            return Err(Error::OutOfBounds(format!(
                "index {} exceeds the grid's {} parcels",
                index,
                self.len()
            )));
        }

        let index = i64::try_from(index)
            .map_err(|_| Error::OutOfBounds(format!("index {index} is too large")))?;
        let width = self.width();

        Ok(Coordinate { x: self.x_min + index % width, y: self.y_max - index / width })
    }

    /// The enumeration index of `coordinate`, the inverse of [`Grid::coordinate_at`].
    pub fn index_of(&self, coordinate: Coordinate) -> Result<usize, Error> {
        if !self.contains(coordinate) {
            return Err(Error::OutOfBounds(format!("parcel {coordinate} is not on the grid")));
        }

        let index = (self.y_max - coordinate.y) * self.width() + (coordinate.x - self.x_min);
        usize::try_from(index)
            .map_err(|_| Error::OutOfBounds(format!("parcel {coordinate} is not on the grid")))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::GENESIS
    }
}
