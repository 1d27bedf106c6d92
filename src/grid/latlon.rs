use super::{
    EarthShapeDefinition, GridPointIndexIterator, ResolutionAndComponentFlags, ScanningMode,
};
use crate::{
    error::GdswzdError,
    projection::{MapJacobian, Projection},
    utils::{GribFloat, normalize_longitude, wrap_degrees},
};

/// Regular latitude/longitude grid (template 3.0), also the grid of rotated
/// coordinates underlying template 3.1.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonGridDefinition<F> {
    pub earth_shape: EarthShapeDefinition,
    pub ni: u32,
    pub nj: u32,
    pub first_point_lat: F,
    pub first_point_lon: F,
    pub last_point_lat: F,
    pub last_point_lon: F,
    pub resolution_and_component_flags: ResolutionAndComponentFlags,
    pub scanning_mode: ScanningMode,
    lon_origin: F,
    i_increment: F,
    j_increment: F,
    radius: F,
}

impl<F: GribFloat> LatLonGridDefinition<F> {
    pub(crate) const NUM_FIELDS: usize = 19;

    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    ///
    /// Examples
    ///
    /// ```
    /// let template = gdswzd::GridTemplate::<f64>::decode(
    ///     0_i64,
    ///     &[
    ///         6, 255, -1, 255, -1, 255, -1, 2, 3, 0, -1, 0, 0, 48, 2_000_000, 1_000_000,
    ///         1_000_000, 1_000_000, 64,
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(template.grid_shape(), (2, 3));
    /// ```
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.ni as usize, self.nj as usize)
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        "regular_ll"
    }

    /// Returns an iterator over `(i, j)` of grid points in storage order.
    pub fn ij(&self) -> GridPointIndexIterator {
        GridPointIndexIterator::new(self.ni as usize, self.nj as usize, self.scanning_mode)
    }

    /// Returns `(dlon, dlat)` in degrees, signed by the scan directions.
    pub fn increments(&self) -> (F, F) {
        (self.i_increment, self.j_increment)
    }

    /// Radius of the spherical earth in meters.
    pub fn earth_radius(&self) -> F {
        self.radius
    }

    /// Whether the columns wrap around the whole parallel.
    pub fn is_global(&self) -> bool {
        let span = self.i_increment.abs() * F::from_f64_lossy(f64::from(self.ni));
        let full = F::from_f64_lossy(360.);
        (span - full).abs() < self.i_increment.abs() * F::from_f64_lossy(1e-3)
    }

    pub fn winds_relative_to_grid(&self) -> bool {
        self.resolution_and_component_flags.winds_relative_to_grid()
    }

    pub(crate) fn is_consistent(&self) -> bool {
        let lat_diff = self.last_point_lat - self.first_point_lat;
        self.nj == 1
            || (lat_diff != F::zero()
                && !((lat_diff > F::zero()) ^ self.scanning_mode.scans_positively_for_j()))
    }

    /// `(lon, lat)` at fractional grid indices, longitude not normalized.
    pub(crate) fn index_to_lonlat(&self, x: F, y: F) -> (F, F) {
        let one = F::one();
        let lon = self.lon_origin + (x - one) * self.i_increment;
        let lat = self.first_point_lat + (y - one) * self.j_increment;
        (lon, lat)
    }

    /// Fractional grid indices of `(lon, lat)`, or `None` off the grid.
    pub(crate) fn lonlat_to_index(&self, lon: F, lat: F) -> Option<(F, F)> {
        let one = F::one();
        let two = one + one;
        let ni = F::from_f64_lossy(f64::from(self.ni));
        let nj = F::from_f64_lossy(f64::from(self.nj));
        let tol = F::index_tolerance();

        // measure longitudes from the middle of the grid so that points on
        // both edges stay close to it
        let mid = (ni - one) * self.i_increment / two;
        let diff = wrap_degrees(lon - self.lon_origin - mid) + mid;
        let mut x = one + diff / self.i_increment;
        let y = one + (lat - self.first_point_lat) / self.j_increment;

        let x_max = if self.is_global() {
            if x < one - tol {
                x = x + ni;
            }
            ni + one - tol
        } else {
            ni + tol
        };
        let on_grid = x >= one - tol && x <= x_max && y >= one - tol && y <= nj + tol;
        (on_grid && x.is_finite() && y.is_finite()).then_some((x, y))
    }

    pub(crate) fn from_fields(fields: &[i64]) -> Result<Self, GdswzdError> {
        let malformed = |msg: String| Err(GdswzdError::MalformedTemplate(msg));

        let earth_shape =
            EarthShapeDefinition::from_fields(&fields[..EarthShapeDefinition::NUM_FIELDS]);
        let Some(radius) = earth_shape.spherical_radius() else {
            return malformed(format!(
                "shape of the earth {} is not a sphere of known radius",
                earth_shape.shape_of_the_earth
            ));
        };

        let (ni, nj) = (fields[7], fields[8]);
        let (Ok(ni), Ok(nj)) = (u32::try_from(ni), u32::try_from(nj)) else {
            return malformed(format!("grid shape {ni}x{nj} is not positive"));
        };
        if ni == 0 || nj == 0 {
            return malformed(format!("grid shape {ni}x{nj} is not positive"));
        }

        let unit = AngleUnit::new(fields[9], fields[10]);
        let first_point_lat = unit.to_degrees(fields[11]);
        let first_point_lon = unit.to_degrees(fields[12]);
        let last_point_lat = unit.to_degrees(fields[14]);
        let last_point_lon = unit.to_degrees(fields[15]);
        let (Ok(flags), Ok(scanning_mode)) = (u8::try_from(fields[13]), u8::try_from(fields[18]))
        else {
            return malformed(format!(
                "flags {} and {} must fit in one octet",
                fields[13], fields[18]
            ));
        };
        let resolution_and_component_flags = ResolutionAndComponentFlags(flags);
        let scanning_mode = ScanningMode(scanning_mode);
        if scanning_mode.has_unsupported_flags() {
            let ScanningMode(mode) = scanning_mode;
            return malformed(format!("scanning mode {mode} is not supported"));
        }
        if first_point_lat.abs() > 90. || last_point_lat.abs() > 90. {
            return malformed(format!(
                "latitudes {first_point_lat} and {last_point_lat} out of range"
            ));
        }

        if !is_longitude(first_point_lon) || !is_longitude(last_point_lon) {
            return malformed(format!(
                "longitudes {first_point_lon} and {last_point_lon} out of range"
            ));
        }

        let i_increment = if ni > 1 {
            let span = (last_point_lon - first_point_lon).rem_euclid(360.);
            let span = if scanning_mode.scans_positively_for_i() {
                if span == 0. { 360. } else { span }
            } else if span == 0. {
                -360.
            } else {
                span - 360.
            };
            span / f64::from(ni - 1)
        } else {
            let Some(di) = explicit_increment(fields[16], &unit) else {
                return malformed("i-direction increment missing for a single column".to_owned());
            };
            if scanning_mode.scans_positively_for_i() { di } else { -di }
        };

        let j_increment = if nj > 1 {
            (last_point_lat - first_point_lat) / f64::from(nj - 1)
        } else {
            let Some(dj) = explicit_increment(fields[17], &unit) else {
                return malformed("j-direction increment missing for a single row".to_owned());
            };
            if scanning_mode.scans_positively_for_j() { dj } else { -dj }
        };

        let grid = Self {
            earth_shape,
            ni,
            nj,
            first_point_lat: F::from_f64_lossy(first_point_lat),
            first_point_lon: F::from_f64_lossy(first_point_lon),
            last_point_lat: F::from_f64_lossy(last_point_lat),
            last_point_lon: F::from_f64_lossy(last_point_lon),
            resolution_and_component_flags,
            scanning_mode,
            lon_origin: F::from_f64_lossy(wrap_degrees(first_point_lon)),
            i_increment: F::from_f64_lossy(i_increment),
            j_increment: F::from_f64_lossy(j_increment),
            radius: F::from_f64_lossy(radius),
        };
        if !grid.is_consistent() {
            return malformed(
                "latitudes of first/last grid points are not consistent with scanning mode"
                    .to_owned(),
            );
        }
        Ok(grid)
    }
}

/// Unit of angles in a template: the basic angle divided by its
/// subdivisions, or 10^-6 degree when the basic angle is zero or missing.
pub(crate) struct AngleUnit {
    basic_angle: f64,
    subdivisions: f64,
}

impl AngleUnit {
    pub(crate) fn new(basic_angle: i64, subdivisions: i64) -> Self {
        if basic_angle <= 0 || basic_angle == 0xff {
            Self::default()
        } else if subdivisions <= 0 || subdivisions == 0xffffffff {
            Self {
                basic_angle: basic_angle as f64,
                subdivisions: 1.,
            }
        } else {
            Self {
                basic_angle: basic_angle as f64,
                subdivisions: subdivisions as f64,
            }
        }
    }

    pub(crate) fn to_degrees(&self, value: i64) -> f64 {
        value as f64 * self.basic_angle / self.subdivisions
    }
}

impl Default for AngleUnit {
    fn default() -> Self {
        Self {
            basic_angle: 1.,
            subdivisions: 1_000_000.,
        }
    }
}

fn explicit_increment(value: i64, unit: &AngleUnit) -> Option<f64> {
    if value <= 0 || value == 0xffffffff {
        return None;
    }
    let degrees = unit.to_degrees(value);
    (degrees.is_finite() && degrees <= 360.).then_some(degrees)
}

fn is_longitude(degrees: f64) -> bool {
    degrees.is_finite() && degrees.abs() <= 360.
}

impl<F: GribFloat> Projection<F> for LatLonGridDefinition<F> {
    fn forward(&self, x: F, y: F) -> Option<(F, F)> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let (lon, lat) = self.index_to_lonlat(x, y);
        let pole = F::from_f64_lossy(90.);
        let slack = self.j_increment.abs() * F::index_tolerance();
        if lat.abs() > pole + slack {
            return None;
        }
        Some((lat.max(-pole).min(pole), normalize_longitude(lon)))
    }

    fn inverse(&self, lat: F, lon: F) -> Option<(F, F)> {
        if !(lat.is_finite() && lon.is_finite()) || lat.abs() > F::from_f64_lossy(90.) {
            return None;
        }
        self.lonlat_to_index(lon, lat)
    }

    fn rotation_coefficients(&self, x: F, y: F) -> Option<(F, F)> {
        self.forward(x, y)?;
        Some((F::one(), F::zero()))
    }

    fn map_jacobian(&self, x: F, y: F) -> Option<MapJacobian<F>> {
        self.forward(x, y)?;
        Some(MapJacobian {
            xlon: self.i_increment.recip(),
            xlat: F::zero(),
            ylon: F::zero(),
            ylat: self.j_increment.recip(),
        })
    }

    fn area_factor(&self, x: F, y: F) -> Option<F> {
        let (lat, _) = self.forward(x, y)?;
        let pole = F::from_f64_lossy(90.);
        let half = self.j_increment.abs() / (F::one() + F::one());
        let north = (lat + half).min(pole).to_radians();
        let south = (lat - half).max(-pole).to_radians();
        let width = self.i_increment.abs().to_radians();
        Some(self.radius * self.radius * width * (north.sin() - south.sin()))
    }
}
