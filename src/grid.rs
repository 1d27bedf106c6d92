pub use self::{
    earth::{EarthShapeDefinition, ShapeOfTheEarth},
    latlon::LatLonGridDefinition,
    rotated_ll::{RotatedLatLonGridDefinition, Rotation},
};

mod earth;
#[cfg(test)]
pub(crate) mod helpers;
mod latlon;
mod rotated_ll;

/// An iterator over `(i, j)` of grid points in the order they are stored.
///
/// Indices are zero-based; the first stored point is always `(0, 0)`, whose
/// coordinates are those of the first grid point in the template. Scan
/// directions change the sign of the increments, not the index order.
#[derive(Clone)]
pub struct GridPointIndexIterator {
    major_len: usize,
    minor_len: usize,
    scanning_mode: ScanningMode,
    major_pos: usize,
    minor_pos: usize,
    increments: bool,
}

impl GridPointIndexIterator {
    pub(crate) fn new(i_len: usize, j_len: usize, scanning_mode: ScanningMode) -> Self {
        let (major_len, minor_len) = if scanning_mode.is_consecutive_for_i() {
            (j_len, i_len)
        } else {
            (i_len, j_len)
        };
        Self {
            major_len,
            minor_len,
            scanning_mode,
            minor_pos: 0,
            major_pos: 0,
            increments: true,
        }
    }
}

impl Iterator for GridPointIndexIterator {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.major_pos == self.major_len || self.minor_len == 0 {
            return None;
        }

        let minor = if self.increments {
            self.minor_pos
        } else {
            self.minor_len - self.minor_pos - 1
        };
        let major = self.major_pos;

        self.minor_pos += 1;
        if self.minor_pos == self.minor_len {
            self.major_pos += 1;
            self.minor_pos = 0;
            if self.scanning_mode.scans_alternating_rows() {
                self.increments = !self.increments;
            }
        }

        if self.scanning_mode.is_consecutive_for_i() {
            Some((minor, major))
        } else {
            Some((major, minor))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = if self.minor_len == 0 {
            0
        } else {
            (self.major_len - self.major_pos) * self.minor_len - self.minor_pos
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for GridPointIndexIterator {}

/// Scanning mode flags (GRIB2 Flag Table 3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanningMode(pub u8);

impl ScanningMode {
    pub fn scans_positively_for_i(&self) -> bool {
        self.0 & 0b10000000 == 0
    }

    pub fn scans_positively_for_j(&self) -> bool {
        self.0 & 0b01000000 != 0
    }

    pub fn is_consecutive_for_i(&self) -> bool {
        self.0 & 0b00100000 == 0
    }

    pub fn scans_alternating_rows(&self) -> bool {
        self.0 & 0b00010000 != 0
    }

    /// Row offsets and staggered points (bits 5 to 8) are not handled.
    pub fn has_unsupported_flags(&self) -> bool {
        self.0 & 0b00001111 != 0
    }
}

/// Resolution and component flags (GRIB2 Flag Table 3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolutionAndComponentFlags(pub u8);

impl ResolutionAndComponentFlags {
    pub fn i_direction_increments_given(&self) -> bool {
        self.0 & 0b00100000 != 0
    }

    pub fn j_direction_increments_given(&self) -> bool {
        self.0 & 0b00010000 != 0
    }

    /// Whether vector components are resolved relative to the grid rather
    /// than to easterly and northerly directions.
    pub fn winds_relative_to_grid(&self) -> bool {
        self.0 & 0b00001000 != 0
    }
}
