use crate::utils::GribFloat;

/// Partial derivatives of the fractional grid indices with respect to
/// longitude and latitude, per degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapJacobian<F> {
    /// dx/dlon
    pub xlon: F,
    /// dx/dlat
    pub xlat: F,
    /// dy/dlon
    pub ylon: F,
    /// dy/dlat
    pub ylat: F,
}

/// Mapping between fractional grid indices and geographic coordinates for
/// one family of grid definition templates.
///
/// Grid indices are one-based: `(1, 1)` is the first grid point of the
/// template. Latitudes and longitudes are in degrees, and returned
/// longitudes lie in `[0, 360)`. `None` marks a point outside the domain of
/// the grid, including points where the computation degenerates.
pub trait Projection<F: GribFloat>: Send + Sync {
    /// Grid indices to `(lat, lon)`.
    fn forward(&self, x: F, y: F) -> Option<(F, F)>;

    /// `(lat, lon)` to grid indices.
    fn inverse(&self, lat: F, lon: F) -> Option<(F, F)>;

    /// `(cos, sin)` of the angle between grid-relative and earth-relative
    /// north at the point.
    ///
    /// Grid winds `(u, v)` rotate to earth winds as
    /// `(cos * u + sin * v, -sin * u + cos * v)`. Templates whose vector
    /// components are already earth-relative always give `(1, 0)`.
    fn rotation_coefficients(&self, x: F, y: F) -> Option<(F, F)>;

    fn map_jacobian(&self, x: F, y: F) -> Option<MapJacobian<F>>;

    /// Area in square meters of the grid box centered at the point.
    fn area_factor(&self, x: F, y: F) -> Option<F>;
}
