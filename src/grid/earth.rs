use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Shape of the earth (GRIB2 Code Table 3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ShapeOfTheEarth {
    SphericalRadius6367470 = 0,
    SphericalRadiusSpecified = 1,
    OblateIau1965 = 2,
    OblateSpecifiedInKm = 3,
    OblateIagGrs80 = 4,
    Wgs84 = 5,
    SphericalRadius6371229 = 6,
    OblateSpecifiedInM = 7,
    SphericalRadius6371200 = 8,
    OblateOsgb1936 = 9,
}

/// Earth shape parameters held in the first seven values of every grid
/// definition template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarthShapeDefinition {
    pub shape_of_the_earth: i64,
    pub scale_factor_of_radius_of_spherical_earth: i64,
    pub scaled_value_of_radius_of_spherical_earth: i64,
    pub scale_factor_of_earth_major_axis: i64,
    pub scaled_value_of_earth_major_axis: i64,
    pub scale_factor_of_earth_minor_axis: i64,
    pub scaled_value_of_earth_minor_axis: i64,
}

impl EarthShapeDefinition {
    pub(crate) const NUM_FIELDS: usize = 7;

    /// Returns `(major, minor)` radii in meters, or `None` if the shape code
    /// is unknown or the specified values are missing.
    ///
    /// Examples
    ///
    /// ```
    /// let earth = gdswzd::EarthShapeDefinition {
    ///     shape_of_the_earth: 6,
    ///     scale_factor_of_radius_of_spherical_earth: 255,
    ///     scaled_value_of_radius_of_spherical_earth: -1,
    ///     scale_factor_of_earth_major_axis: 255,
    ///     scaled_value_of_earth_major_axis: -1,
    ///     scale_factor_of_earth_minor_axis: 255,
    ///     scaled_value_of_earth_minor_axis: -1,
    /// };
    /// assert_eq!(earth.radii(), Some((6_371_229., 6_371_229.)));
    /// ```
    pub fn radii(&self) -> Option<(f64, f64)> {
        let shape = u8::try_from(self.shape_of_the_earth).ok()?;
        let shape = ShapeOfTheEarth::try_from(shape).ok()?;
        let radii = match shape {
            ShapeOfTheEarth::SphericalRadius6367470 => (6367470.0, 6367470.0),
            ShapeOfTheEarth::SphericalRadiusSpecified => {
                let radius = scaled(
                    self.scaled_value_of_radius_of_spherical_earth,
                    self.scale_factor_of_radius_of_spherical_earth,
                )?;
                (radius, radius)
            }
            ShapeOfTheEarth::OblateIau1965 => (6378160.0, 6356775.0),
            ShapeOfTheEarth::OblateSpecifiedInKm => {
                let (major, minor) = self.radii_defined()?;
                (major * 1000., minor * 1000.)
            }
            ShapeOfTheEarth::OblateIagGrs80 => (6378137.0, 6356752.314),
            ShapeOfTheEarth::Wgs84 => (6378137.0, 6356752.3142),
            ShapeOfTheEarth::SphericalRadius6371229 => (6371229.0, 6371229.0),
            ShapeOfTheEarth::OblateSpecifiedInM => self.radii_defined()?,
            ShapeOfTheEarth::SphericalRadius6371200 => (6371200.0, 6371200.0),
            ShapeOfTheEarth::OblateOsgb1936 => (6377563.396, 6356256.909),
        };
        Some(radii)
    }

    /// Returns the radius in meters if the earth is a sphere.
    pub fn spherical_radius(&self) -> Option<f64> {
        let (major, minor) = self.radii()?;
        (major == minor).then_some(major)
    }

    fn radii_defined(&self) -> Option<(f64, f64)> {
        let major = scaled(
            self.scaled_value_of_earth_major_axis,
            self.scale_factor_of_earth_major_axis,
        )?;
        let minor = scaled(
            self.scaled_value_of_earth_minor_axis,
            self.scale_factor_of_earth_minor_axis,
        )?;
        Some((major, minor))
    }

    pub(crate) fn from_fields(fields: &[i64]) -> Self {
        Self {
            shape_of_the_earth: fields[0],
            scale_factor_of_radius_of_spherical_earth: fields[1],
            scaled_value_of_radius_of_spherical_earth: fields[2],
            scale_factor_of_earth_major_axis: fields[3],
            scaled_value_of_earth_major_axis: fields[4],
            scale_factor_of_earth_minor_axis: fields[5],
            scaled_value_of_earth_minor_axis: fields[6],
        }
    }
}

// Scale factors are one octet and scaled values four octets; negative numbers
// and all-ones octets mean "missing".
fn scaled(value: i64, factor: i64) -> Option<f64> {
    if value <= 0 || !(0..255).contains(&factor) {
        return None;
    }
    Some(value as f64 / 10_f64.powi(factor as i32))
}
