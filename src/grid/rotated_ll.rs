use super::latlon::{AngleUnit, LatLonGridDefinition};
use crate::{
    error::GdswzdError,
    projection::{MapJacobian, Projection},
    utils::{GribFloat, normalize_longitude, wrap_degrees},
};

/// Rotated latitude/longitude grid (template 3.1).
///
/// `rotated` describes the grid in rotated coordinates; `rotation` locates
/// the rotated frame on the earth.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedLatLonGridDefinition<F> {
    pub rotated: LatLonGridDefinition<F>,
    pub rotation: Rotation<F>,
    pole: RotatedPole<F>,
}

impl<F: GribFloat> RotatedLatLonGridDefinition<F> {
    pub(crate) const NUM_FIELDS: usize = 22;

    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        self.rotated.grid_shape()
    }

    /// Returns the grid type.
    pub fn short_name(&self) -> &'static str {
        "rotated_ll"
    }

    pub(crate) fn from_fields(fields: &[i64]) -> Result<Self, GdswzdError> {
        let rotated =
            LatLonGridDefinition::from_fields(&fields[..LatLonGridDefinition::<F>::NUM_FIELDS])?;
        let unit = AngleUnit::new(fields[9], fields[10]);
        let south_pole_lat = unit.to_degrees(fields[19]);
        if south_pole_lat.abs() > 90. {
            return Err(GdswzdError::MalformedTemplate(format!(
                "latitude of the southern pole of projection {south_pole_lat} out of range"
            )));
        }
        let rotation = Rotation {
            south_pole_lat: F::from_f64_lossy(south_pole_lat),
            south_pole_lon: F::from_f64_lossy(unit.to_degrees(fields[20])),
            rot_angle: F::from_f64_lossy(unit.to_degrees(fields[21])),
        };
        let pole = RotatedPole::new(&rotation);
        Ok(Self {
            rotated,
            rotation,
            pole,
        })
    }

    /// True coordinates and rotated latitude of a grid point, longitude not
    /// normalized.
    fn locate(&self, x: F, y: F) -> Option<Located<F>> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let (lon_r, lat_r) = self.rotated.index_to_lonlat(x, y);
        let pole = F::from_f64_lossy(90.);
        if lat_r.abs() > pole + F::index_tolerance() {
            return None;
        }
        let lat_r = lat_r.max(-pole).min(pole);
        let (lat, lon) = self.pole.unrotate(lat_r, lon_r);
        (lat.is_finite() && lon.is_finite()).then_some(Located { lat, lon, lat_r })
    }

    /// `(cos, sin)` of the angle from true north to rotated north.
    fn grid_rotation(&self, at: &Located<F>) -> Option<(F, F)> {
        let cos_lat_r = at.lat_r.to_radians().cos();
        if cos_lat_r <= F::epsilon() {
            return None;
        }
        let (sin_lat, cos_lat) = at.lat.to_radians().sin_cos();
        let (sin_dlon, cos_dlon) = wrap_degrees(at.lon - self.pole.lon).to_radians().sin_cos();
        let pole = &self.pole;
        let cos = (pole.cos_lat * cos_lat + pole.sin_lat * sin_lat * cos_dlon) / cos_lat_r;
        let sin = pole.sin_lat * sin_dlon / cos_lat_r;
        Some((cos, sin))
    }
}

impl<F: GribFloat> Projection<F> for RotatedLatLonGridDefinition<F> {
    fn forward(&self, x: F, y: F) -> Option<(F, F)> {
        let at = self.locate(x, y)?;
        Some((at.lat, normalize_longitude(at.lon)))
    }

    fn inverse(&self, lat: F, lon: F) -> Option<(F, F)> {
        if !(lat.is_finite() && lon.is_finite()) || lat.abs() > F::from_f64_lossy(90.) {
            return None;
        }
        let (lat_r, lon_r) = self.pole.rotate(lat, lon);
        self.rotated.lonlat_to_index(lon_r, lat_r)
    }

    fn rotation_coefficients(&self, x: F, y: F) -> Option<(F, F)> {
        let at = self.locate(x, y)?;
        if self.rotated.winds_relative_to_grid() {
            self.grid_rotation(&at)
        } else {
            Some((F::one(), F::zero()))
        }
    }

    fn map_jacobian(&self, x: F, y: F) -> Option<MapJacobian<F>> {
        let at = self.locate(x, y)?;
        let (cos, sin) = self.grid_rotation(&at)?;
        let cos_lat = at.lat.to_radians().cos();
        let cos_lat_r = at.lat_r.to_radians().cos();
        let (dlon, dlat) = self.rotated.increments();
        Some(MapJacobian {
            xlon: cos * cos_lat / (cos_lat_r * dlon),
            xlat: -sin / (cos_lat_r * dlon),
            ylon: sin * cos_lat / dlat,
            ylat: cos / dlat,
        })
    }

    fn area_factor(&self, x: F, y: F) -> Option<F> {
        let at = self.locate(x, y)?;
        let cos_lat_r = at.lat_r.to_radians().cos();
        if cos_lat_r <= F::epsilon() {
            return None;
        }
        let (dlon, dlat) = self.rotated.increments();
        let radius = self.rotated.earth_radius();
        Some(radius * radius * cos_lat_r * dlon.abs().to_radians() * dlat.abs().to_radians())
    }
}

/// Location of the rotated frame given as in the template.
#[derive(Debug, PartialEq, Clone)]
pub struct Rotation<F> {
    pub south_pole_lat: F,
    pub south_pole_lon: F,
    pub rot_angle: F,
}

/// Precomputed terms of the rotation.
///
/// The rotated frame has its origin (rotated latitude and longitude both
/// zero) at true latitude `south_pole_lat + 90` and true longitude
/// `south_pole_lon`.
#[derive(Debug, PartialEq, Clone)]
struct RotatedPole<F> {
    sin_lat: F,
    cos_lat: F,
    lon: F,
    gamma: F,
}

impl<F: GribFloat> RotatedPole<F> {
    fn new(rot: &Rotation<F>) -> Self {
        let lat = (rot.south_pole_lat + F::from_f64_lossy(90.)).to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        Self {
            sin_lat,
            cos_lat,
            lon: rot.south_pole_lon,
            gamma: rot.rot_angle,
        }
    }

    /// Rotated `(lat, lon)` to true `(lat, lon)` in degrees.
    fn unrotate(&self, lat_r: F, lon_r: F) -> (F, F) {
        let (sin_lat_r, cos_lat_r) = lat_r.to_radians().sin_cos();
        let (sin_lon_r, cos_lon_r) = wrap_degrees(lon_r - self.gamma).to_radians().sin_cos();

        // components of the unit vector in the true frame
        let z = self.cos_lat * sin_lat_r + self.sin_lat * cos_lat_r * cos_lon_r;
        let y = cos_lat_r * sin_lon_r;
        let x = self.cos_lat * cos_lat_r * cos_lon_r - self.sin_lat * sin_lat_r;
        let lat = z.atan2(x.hypot(y));
        let lon = self.lon + y.atan2(x).to_degrees();

        (lat.to_degrees(), lon)
    }

    /// True `(lat, lon)` to rotated `(lat, lon)` in degrees.
    fn rotate(&self, lat: F, lon: F) -> (F, F) {
        let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
        let (sin_dlon, cos_dlon) = wrap_degrees(lon - self.lon).to_radians().sin_cos();

        let z = self.cos_lat * sin_lat - self.sin_lat * cos_lat * cos_dlon;
        let y = cos_lat * sin_dlon;
        let x = self.sin_lat * sin_lat + self.cos_lat * cos_lat * cos_dlon;
        let lat_r = z.atan2(x.hypot(y));
        let lon_r = y.atan2(x).to_degrees() + self.gamma;

        (lat_r.to_degrees(), lon_r)
    }
}

struct Located<F> {
    lat: F,
    lon: F,
    lat_r: F,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::helpers::test_helpers::{assert_almost_eq, assert_coord_almost_eq};

    fn b_grid_fields() -> Vec<i64> {
        vec![
            6, 255, -1, 255, -1, 255, -1, 251, 201, 0, -1, -45036000, 299961000, 56, 45036000,
            60039000, 0, 0, 64, -36000000, 254000000, 0,
        ]
    }

    fn b_grid<F: GribFloat>() -> RotatedLatLonGridDefinition<F> {
        RotatedLatLonGridDefinition::from_fields(&b_grid_fields()).unwrap()
    }

    #[test]
    fn rotated_latlon_grid_definition_from_fields() {
        let grid = b_grid::<f64>();
        assert_eq!(grid.grid_shape(), (251, 201));
        assert_eq!(grid.short_name(), "rotated_ll");
        assert_eq!(
            grid.rotation,
            Rotation {
                south_pole_lat: -36.,
                south_pole_lon: 254.,
                rot_angle: 0.,
            }
        );
        let (dlon, dlat) = grid.rotated.increments();
        assert_almost_eq!(dlon, 0.480312, 1e-12);
        assert_almost_eq!(dlat, 0.45036, 1e-12);
        assert!(grid.rotated.winds_relative_to_grid());
        assert!(!grid.rotated.is_global());
    }

    macro_rules! test_b_grid_forward {
        ($(($name:ident, $ty:ty, $xy:expr, $expected:expr, $delta:expr),)*) => ($(
            #[test]
            fn $name() {
                let grid = b_grid::<$ty>();
                let (x, y) = $xy;
                let actual = grid.forward(x, y).unwrap();
                assert_coord_almost_eq(actual, $expected, $delta);
            }
        )*);
    }

    test_b_grid_forward! {
        (b_grid_first_point_f64, f64, (1., 1.), (-7.491213598723597, 215.86632043961646), 1e-9),
        (b_grid_last_point_f64, f64, (251., 201.), (44.539583318372394, 14.801497528547486), 1e-9),
        (b_grid_centre_f64, f64, (126., 101.), (54., 254.), 1e-9),
        (b_grid_north_west_corner_f64, f64, (1., 201.), (44.53958331837237, 133.19850247145254), 1e-9),
        (b_grid_south_east_corner_f64, f64, (251., 1.), (-7.491213598723581, 292.1336795603836), 1e-9),
        (b_grid_first_point_f32, f32, (1., 1.), (-7.491214_f32, 215.86632_f32), 1e-3),
        (b_grid_last_point_f32, f32, (251., 201.), (44.539583_f32, 14.801498_f32), 1e-3),
    }

    macro_rules! test_rotation{
        ($(($name:ident, $rot:expr, $input:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                let pole = RotatedPole::new(&$rot);
                let (lat_r, lon_r) = $input;
                let (lat, lon) = pole.unrotate(lat_r, lon_r);
                let actual = (lat, normalize_longitude(lon));
                assert_coord_almost_eq(actual, $expected, 1e-3);
                let (lat_r2, lon_r2) = pole.rotate(lat, lon);
                let expected = (lat_r, normalize_longitude(lon_r));
                assert_coord_almost_eq((lat_r2, normalize_longitude(lon_r2)), expected, 1e-3);
            }
        )*);
    }

    test_rotation! {
        (
            no_rotation,
            Rotation {
                south_pole_lat: -90_f32,
                south_pole_lon: 0.,
                rot_angle: 0.,
            },
            (-12.302501_f32, 345.178780_f32),
            (-12.302501_f32, 345.178780_f32)
        ),
        (
            rotation_for_first_point,
            Rotation {
                south_pole_lat: -36.08852_f32,
                south_pole_lon: 245.305142,
                rot_angle: 0.,
            },
            (-12.302501_f32, 345.178780_f32),
            // taken from results from pygrib
            (39.626032, -133.62952 + 360.)
        ),
    }

    #[test]
    fn rotation_angle_shifts_rotated_longitudes() {
        let mut fields = b_grid_fields();
        fields[21] = 10_000_000;
        let rotated = RotatedLatLonGridDefinition::<f64>::from_fields(&fields).unwrap();
        let plain = b_grid::<f64>();
        let (dlon, _) = plain.rotated.increments();
        // moving 10 degrees along rotated longitudes cancels the rotation
        let columns = 10. / dlon;
        let expected = plain.forward(1., 1.).unwrap();
        let actual = rotated.forward(1. + columns, 1.).unwrap();
        assert_coord_almost_eq(actual, expected, 1e-9);
        let (lat, lon) = actual;
        assert_coord_almost_eq(rotated.inverse(lat, lon).unwrap(), (1. + columns, 1.), 1e-9);
    }

    #[test]
    fn inverse_recovers_grid_indices() {
        let grid = b_grid::<f64>();
        for (x, y) in [(1., 1.), (251., 201.), (1., 201.), (251., 1.), (37.25, 150.5)] {
            let (lat, lon) = grid.forward(x, y).unwrap();
            assert_coord_almost_eq(grid.inverse(lat, lon).unwrap(), (x, y), 1e-9);
        }
    }

    #[test]
    fn inverse_outside_grid_footprint_is_none() {
        let grid = b_grid::<f64>();
        // antipode of the grid centre
        assert!(grid.inverse(-54., 74.).is_none());
        assert!(grid.inverse(f64::NAN, 0.).is_none());
        assert!(grid.inverse(91., 0.).is_none());
    }

    #[test]
    fn rotation_coefficients_are_unit_vectors() {
        let grid = b_grid::<f64>();
        let (cos, sin) = grid.rotation_coefficients(1., 1.).unwrap();
        assert_almost_eq!(cos, 0.707275262436055, 1e-9);
        assert_almost_eq!(sin, -0.7069382597837024, 1e-9);
        let (cos, sin) = grid.rotation_coefficients(251., 201.).unwrap();
        assert_almost_eq!(cos, 0.18167650666094937, 1e-9);
        assert_almost_eq!(sin, 0.9833583512267919, 1e-9);
        let centre = grid.rotation_coefficients(126., 101.).unwrap();
        assert_coord_almost_eq(centre, (1., 0.), 1e-9);
        for (x, y) in [(10., 20.), (200., 180.), (126., 181.)] {
            let (cos, sin) = grid.rotation_coefficients(x, y).unwrap();
            assert_almost_eq!(cos * cos + sin * sin, 1., 1e-9);
        }
    }

    #[test]
    fn earth_relative_winds_need_no_rotation() {
        let mut fields = b_grid_fields();
        fields[13] = 48;
        let grid = RotatedLatLonGridDefinition::<f64>::from_fields(&fields).unwrap();
        assert_eq!(grid.rotation_coefficients(1., 1.), Some((1., 0.)));
    }

    #[test]
    fn rotated_pole_is_degenerate() {
        let fields = vec![
            6, 255, -1, 255, -1, 255, -1, 3, 3, 0, -1, 88_000_000, 0, 56, 90_000_000, 2_000_000,
            0, 0, 64, -36000000, 254000000, 0,
        ];
        let grid = RotatedLatLonGridDefinition::<f64>::from_fields(&fields).unwrap();
        assert!(grid.forward(1., 3.).is_some());
        assert!(grid.rotation_coefficients(1., 3.).is_none());
        assert!(grid.area_factor(1., 3.).is_none());
        assert!(grid.map_jacobian(1., 3.).is_none());
        assert!(grid.rotation_coefficients(1., 1.).is_some());
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let grid = b_grid::<f64>();
        let (x, y) = (60.5, 140.25);
        let (lat, lon) = grid.forward(x, y).unwrap();
        let jacobian = grid.map_jacobian(x, y).unwrap();
        let h = 1e-5;
        let (x_e, y_e) = grid.inverse(lat, lon + h).unwrap();
        let (x_n, y_n) = grid.inverse(lat + h, lon).unwrap();
        assert_almost_eq!(jacobian.xlon, (x_e - x) / h, 1e-4);
        assert_almost_eq!(jacobian.ylon, (y_e - y) / h, 1e-4);
        assert_almost_eq!(jacobian.xlat, (x_n - x) / h, 1e-4);
        assert_almost_eq!(jacobian.ylat, (y_n - y) / h, 1e-4);
    }

    #[test]
    fn area_of_grid_box_at_rotated_equator() {
        let grid = b_grid::<f64>();
        // rotated latitude zero lies on row 101
        let area = grid.area_factor(126., 101.).unwrap();
        assert_almost_eq!(area, 2674757494.120727, 1.);
    }

    #[test]
    fn south_pole_beyond_range_is_malformed() {
        let mut fields = b_grid_fields();
        fields[19] = -91_000_000;
        let result = RotatedLatLonGridDefinition::<f64>::from_fields(&fields);
        assert!(matches!(result, Err(GdswzdError::MalformedTemplate(_))));
    }
}
