use log::debug;

use crate::{
    error::GdswzdError,
    grid::{GridPointIndexIterator, LatLonGridDefinition, RotatedLatLonGridDefinition},
    projection::{MapJacobian, Projection},
    utils::{GribFloat, TemplateInt},
};

/// Decoded and validated grid definition template.
///
/// Angles are held in degrees of type `F`; the raw fixed-point integers are
/// not kept once decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTemplate<F> {
    number: i64,
    definition: GridDefinitionTemplateValues<F>,
}

impl<F: GribFloat> GridTemplate<F> {
    /// Decodes the integer template values of template number
    /// `template_number`.
    ///
    /// Examples
    ///
    /// ```
    /// use gdswzd::{GdswzdError, GridTemplate};
    ///
    /// let fields = [
    ///     6, 255, -1, 255, -1, 255, -1, 251, 201, 0, -1, -45036000, 299961000, 56, 45036000,
    ///     60039000, 0, 0, 64, -36000000, 254000000, 0,
    /// ];
    /// let template = GridTemplate::<f32>::decode(1_i32, &fields)?;
    /// assert_eq!(template.grid_shape(), (251, 201));
    /// assert_eq!(template.short_name(), "rotated_ll");
    ///
    /// let result = GridTemplate::<f32>::decode(30_i32, &fields);
    /// assert_eq!(result, Err(GdswzdError::UnsupportedProjection(30)));
    /// # Ok::<(), GdswzdError>(())
    /// ```
    pub fn decode<I: TemplateInt>(template_number: I, fields: &[I]) -> Result<Self, GdswzdError> {
        let number = template_number.as_i64();
        let expected = match number {
            0 => LatLonGridDefinition::<F>::NUM_FIELDS,
            1 => RotatedLatLonGridDefinition::<F>::NUM_FIELDS,
            _ => return Err(GdswzdError::UnsupportedProjection(number)),
        };
        if fields.len() != expected {
            return Err(GdswzdError::MalformedTemplate(format!(
                "template {number} has {expected} fields, got {}",
                fields.len()
            )));
        }

        let fields = fields.iter().map(|v| v.as_i64()).collect::<Vec<_>>();
        let definition = match number {
            0 => GridDefinitionTemplateValues::Template0(LatLonGridDefinition::from_fields(
                &fields,
            )?),
            _ => GridDefinitionTemplateValues::Template1(RotatedLatLonGridDefinition::from_fields(
                &fields,
            )?),
        };
        let template = Self { number, definition };
        debug!(
            "decoded grid definition template {} ({}), shape {:?}",
            number,
            template.short_name(),
            template.grid_shape()
        );
        Ok(template)
    }

    pub fn template_number(&self) -> i64 {
        self.number
    }

    pub fn definition(&self) -> &GridDefinitionTemplateValues<F> {
        &self.definition
    }

    pub fn grid_shape(&self) -> (usize, usize) {
        self.definition.grid_shape()
    }

    /// Total number of grid points.
    pub fn num_points(&self) -> usize {
        let (ni, nj) = self.grid_shape();
        ni * nj
    }

    pub fn short_name(&self) -> &'static str {
        self.definition.short_name()
    }

    /// Returns an iterator over zero-based `(i, j)` of grid points in the
    /// order they are stored.
    pub fn ij(&self) -> GridPointIndexIterator {
        self.lat_lon().ij()
    }

    /// Grid of the template in its own (possibly rotated) coordinates.
    pub fn lat_lon(&self) -> &LatLonGridDefinition<F> {
        match &self.definition {
            GridDefinitionTemplateValues::Template0(def) => def,
            GridDefinitionTemplateValues::Template1(def) => &def.rotated,
        }
    }

    pub fn earth_radius(&self) -> F {
        self.lat_lon().earth_radius()
    }

    pub fn winds_relative_to_grid(&self) -> bool {
        self.lat_lon().winds_relative_to_grid()
    }
}

/// Grid definitions of the supported template numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum GridDefinitionTemplateValues<F> {
    Template0(LatLonGridDefinition<F>),
    Template1(RotatedLatLonGridDefinition<F>),
}

impl<F: GribFloat> GridDefinitionTemplateValues<F> {
    pub fn grid_shape(&self) -> (usize, usize) {
        match self {
            Self::Template0(def) => def.grid_shape(),
            Self::Template1(def) => def.grid_shape(),
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Template0(def) => def.short_name(),
            Self::Template1(def) => def.short_name(),
        }
    }
}

impl<F: GribFloat> Projection<F> for GridDefinitionTemplateValues<F> {
    fn forward(&self, x: F, y: F) -> Option<(F, F)> {
        match self {
            Self::Template0(def) => def.forward(x, y),
            Self::Template1(def) => def.forward(x, y),
        }
    }

    fn inverse(&self, lat: F, lon: F) -> Option<(F, F)> {
        match self {
            Self::Template0(def) => def.inverse(lat, lon),
            Self::Template1(def) => def.inverse(lat, lon),
        }
    }

    fn rotation_coefficients(&self, x: F, y: F) -> Option<(F, F)> {
        match self {
            Self::Template0(def) => def.rotation_coefficients(x, y),
            Self::Template1(def) => def.rotation_coefficients(x, y),
        }
    }

    fn map_jacobian(&self, x: F, y: F) -> Option<MapJacobian<F>> {
        match self {
            Self::Template0(def) => def.map_jacobian(x, y),
            Self::Template1(def) => def.map_jacobian(x, y),
        }
    }

    fn area_factor(&self, x: F, y: F) -> Option<F> {
        match self {
            Self::Template0(def) => def.area_factor(x, y),
            Self::Template1(def) => def.area_factor(x, y),
        }
    }
}
