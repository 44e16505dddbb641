use atlantis_common::utils::io::file::read_file;
use hashbrown::HashSet;
use tracing::debug;

use crate::{Coordinate, Error};

/// Parcels kept out of the genesis auction, one `x,y` per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreList {
    coordinates: HashSet<Coordinate>,
}

impl IgnoreList {
    /// Parse an ignore list. Blank lines are skipped; any other malformed line is an error.
    pub fn parse(contents: &str) -> Result<Self, Error> {
        let coordinates = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::parse::<Coordinate>)
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(Self { coordinates })
    }

    /// Read the ignore list at `path`.
    pub fn load(path: &str) -> Result<Self, Error> {
        let contents = read_file(path).map_err(|e| Error::ResourceFile(e.to_string()))?;
        let list = Self::parse(&contents)?;
        debug!("loaded {} ignored parcels from '{}'", list.len(), path);
        Ok(list)
    }

    /// Whether `coordinate` is on the list.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.coordinates.contains(&coordinate)
    }

    /// Number of distinct parcels on the list.
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}
