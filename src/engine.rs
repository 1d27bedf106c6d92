use log::{debug, trace};
use num::NumCast;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    error::GdswzdError,
    projection::{MapJacobian, Projection},
    template::GridTemplate,
    utils::{GribFloat, TemplateInt},
};

/// Fill value used by [`TransformOptions::default`].
pub const DEFAULT_FILL: f64 = -9999.;

/// Direction of a transform, given as `iopt` in the flat interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Grid indices to earth coordinates (`iopt = 1`).
    Forward,
    /// Earth coordinates to grid indices (`iopt = -1`).
    Inverse,
}

impl Direction {
    pub fn iopt(&self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Inverse => -1,
        }
    }
}

impl TryFrom<i64> for Direction {
    type Error = GdswzdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Inverse),
            _ => Err(GdswzdError::InvalidDirection(value)),
        }
    }
}

/// Placement of results in the output buffers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Packing {
    /// Valid points are moved to the front of every buffer in input order
    /// and the remaining slots hold the fill value.
    #[default]
    Compacted,
    /// Slot `i` of the outputs belongs to input `i`; outputs of invalid
    /// points hold the fill value and inputs are left untouched.
    InPlace,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOptions<F> {
    pub fill: F,
    pub packing: Packing,
}

impl<F: GribFloat> TransformOptions<F> {
    pub fn with_fill(fill: F) -> Self {
        Self {
            fill,
            ..Self::default()
        }
    }
}

impl<F: GribFloat> Default for TransformOptions<F> {
    fn default() -> Self {
        Self {
            fill: F::from_f64_lossy(DEFAULT_FILL),
            packing: Packing::default(),
        }
    }
}

/// Caller-owned buffers of one batch.
///
/// `xpts`/`ypts` and `rlon`/`rlat` are inputs or outputs depending on the
/// direction. Optional buffers are computed only when present.
#[derive(Debug)]
pub struct PointBuffers<'a, F> {
    pub xpts: &'a mut [F],
    pub ypts: &'a mut [F],
    pub rlon: &'a mut [F],
    pub rlat: &'a mut [F],
    pub crot: Option<&'a mut [F]>,
    pub srot: Option<&'a mut [F]>,
    pub xlon: Option<&'a mut [F]>,
    pub xlat: Option<&'a mut [F]>,
    pub ylon: Option<&'a mut [F]>,
    pub ylat: Option<&'a mut [F]>,
    pub area: Option<&'a mut [F]>,
}

impl<'a, F: GribFloat> PointBuffers<'a, F> {
    pub fn new(
        xpts: &'a mut [F],
        ypts: &'a mut [F],
        rlon: &'a mut [F],
        rlat: &'a mut [F],
    ) -> Self {
        Self {
            xpts,
            ypts,
            rlon,
            rlat,
            crot: None,
            srot: None,
            xlon: None,
            xlat: None,
            ylon: None,
            ylat: None,
            area: None,
        }
    }

    pub fn with_rotation(mut self, crot: &'a mut [F], srot: &'a mut [F]) -> Self {
        self.crot = Some(crot);
        self.srot = Some(srot);
        self
    }

    pub fn with_jacobian(
        mut self,
        xlon: &'a mut [F],
        xlat: &'a mut [F],
        ylon: &'a mut [F],
        ylat: &'a mut [F],
    ) -> Self {
        self.xlon = Some(xlon);
        self.xlat = Some(xlat);
        self.ylon = Some(ylon);
        self.ylat = Some(ylat);
        self
    }

    pub fn with_area(mut self, area: &'a mut [F]) -> Self {
        self.area = Some(area);
        self
    }

    fn requested(&self) -> Requested {
        Requested {
            rotation: self.crot.is_some() || self.srot.is_some(),
            jacobian: self.xlon.is_some()
                || self.xlat.is_some()
                || self.ylon.is_some()
                || self.ylat.is_some(),
            area: self.area.is_some(),
        }
    }

    fn check_len(&self, npts: usize) -> Result<(), GdswzdError> {
        let lens = [
            ("xpts", Some(self.xpts.len())),
            ("ypts", Some(self.ypts.len())),
            ("rlon", Some(self.rlon.len())),
            ("rlat", Some(self.rlat.len())),
            ("crot", optional_len(&self.crot)),
            ("srot", optional_len(&self.srot)),
            ("xlon", optional_len(&self.xlon)),
            ("xlat", optional_len(&self.xlat)),
            ("ylon", optional_len(&self.ylon)),
            ("ylat", optional_len(&self.ylat)),
            ("area", optional_len(&self.area)),
        ];
        for (name, len) in lens {
            match len {
                Some(len) if len < npts => {
                    return Err(GdswzdError::BufferTooShort { name, len, npts });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn write_outputs(&mut self, slot: usize, point: &PointEvaluation<F>, direction: Direction) {
        match direction {
            Direction::Forward => {
                self.rlon[slot] = point.lon;
                self.rlat[slot] = point.lat;
            }
            Direction::Inverse => {
                self.xpts[slot] = point.x;
                self.ypts[slot] = point.y;
            }
        }
        let (crot, srot) = point.rotation.unzip();
        set_optional(&mut self.crot, slot, crot);
        set_optional(&mut self.srot, slot, srot);
        let jacobian = point.jacobian.as_ref();
        set_optional(&mut self.xlon, slot, jacobian.map(|j| j.xlon));
        set_optional(&mut self.xlat, slot, jacobian.map(|j| j.xlat));
        set_optional(&mut self.ylon, slot, jacobian.map(|j| j.ylon));
        set_optional(&mut self.ylat, slot, jacobian.map(|j| j.ylat));
        set_optional(&mut self.area, slot, point.area);
    }

    fn write_inputs(&mut self, slot: usize, point: &PointEvaluation<F>, direction: Direction) {
        match direction {
            Direction::Forward => {
                self.xpts[slot] = point.x;
                self.ypts[slot] = point.y;
            }
            Direction::Inverse => {
                self.rlon[slot] = point.lon;
                self.rlat[slot] = point.lat;
            }
        }
    }

    fn fill_outputs(&mut self, slot: usize, fill: F, direction: Direction) {
        match direction {
            Direction::Forward => {
                self.rlon[slot] = fill;
                self.rlat[slot] = fill;
            }
            Direction::Inverse => {
                self.xpts[slot] = fill;
                self.ypts[slot] = fill;
            }
        }
        for buf in [
            &mut self.crot,
            &mut self.srot,
            &mut self.xlon,
            &mut self.xlat,
            &mut self.ylon,
            &mut self.ylat,
            &mut self.area,
        ] {
            set_optional(buf, slot, Some(fill));
        }
    }

    fn fill_inputs(&mut self, slot: usize, fill: F, direction: Direction) {
        match direction {
            Direction::Forward => {
                self.xpts[slot] = fill;
                self.ypts[slot] = fill;
            }
            Direction::Inverse => {
                self.rlon[slot] = fill;
                self.rlat[slot] = fill;
            }
        }
    }
}

fn optional_len<F>(buf: &Option<&mut [F]>) -> Option<usize> {
    buf.as_ref().map(|buf| buf.len())
}

fn set_optional<F>(buf: &mut Option<&mut [F]>, slot: usize, value: Option<F>) {
    if let (Some(buf), Some(value)) = (buf.as_deref_mut(), value) {
        buf[slot] = value;
    }
}

/// Optional outputs asked for by the caller. A point is valid only if all
/// of them can be computed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Requested {
    rotation: bool,
    jacobian: bool,
    area: bool,
}

/// Complete result for one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointEvaluation<F> {
    /// Fractional i index, one-based.
    pub x: F,
    /// Fractional j index, one-based.
    pub y: F,
    pub lon: F,
    pub lat: F,
    /// `(cos, sin)` of the vector rotation, `None` where degenerate.
    pub rotation: Option<(F, F)>,
    pub jacobian: Option<MapJacobian<F>>,
    /// Grid box area in square meters.
    pub area: Option<F>,
}

/// Batch driver for one decoded template.
#[derive(Debug, Clone)]
pub struct TransformEngine<F> {
    template: GridTemplate<F>,
}

impl<F: GribFloat> TransformEngine<F> {
    pub fn new(template: GridTemplate<F>) -> Self {
        debug!(
            "using {} kernel for template {}",
            template.short_name(),
            template.template_number()
        );
        Self { template }
    }

    /// Decodes the template and builds an engine for it.
    pub fn from_template<I: TemplateInt>(
        template_number: I,
        fields: &[I],
    ) -> Result<Self, GdswzdError> {
        Ok(Self::new(GridTemplate::decode(template_number, fields)?))
    }

    pub fn template(&self) -> &GridTemplate<F> {
        &self.template
    }

    /// Evaluates one point. `first` and `second` are `(x, y)` for
    /// [`Direction::Forward`] and `(lon, lat)` for [`Direction::Inverse`].
    ///
    /// Returns `None` when the point is outside the domain of the grid.
    /// Optional quantities that degenerate at a valid point are `None`.
    ///
    /// Examples
    ///
    /// ```
    /// use gdswzd::{Direction, TransformEngine};
    ///
    /// let fields = [
    ///     6, 255, -1, 255, -1, 255, -1, 251, 201, 0, -1, -45036000, 299961000, 56, 45036000,
    ///     60039000, 0, 0, 64, -36000000, 254000000, 0,
    /// ];
    /// let engine = TransformEngine::<f64>::from_template(1_i64, &fields)?;
    /// let point = engine.evaluate(Direction::Forward, 1., 1.).unwrap();
    /// assert!((point.lat - -7.4912136).abs() < 1e-6);
    /// assert!((point.lon - 215.8663204).abs() < 1e-6);
    /// # Ok::<(), gdswzd::GdswzdError>(())
    /// ```
    pub fn evaluate(
        &self,
        direction: Direction,
        first: F,
        second: F,
    ) -> Option<PointEvaluation<F>> {
        let mut point = self.evaluate_requested(direction, first, second, Requested::default())?;
        let kernel = self.template.definition();
        point.rotation = kernel.rotation_coefficients(point.x, point.y);
        point.jacobian = kernel.map_jacobian(point.x, point.y);
        point.area = kernel.area_factor(point.x, point.y);
        Some(point)
    }

    /// Grid indices to `(lat, lon)`.
    pub fn forward(&self, x: F, y: F) -> Option<(F, F)> {
        self.template.definition().forward(x, y)
    }

    /// `(lat, lon)` to grid indices `(x, y)`.
    pub fn inverse(&self, lat: F, lon: F) -> Option<(F, F)> {
        self.template.definition().inverse(lat, lon)
    }

    fn evaluate_requested(
        &self,
        direction: Direction,
        first: F,
        second: F,
        requested: Requested,
    ) -> Option<PointEvaluation<F>> {
        let kernel = self.template.definition();
        let (x, y, lon, lat) = match direction {
            Direction::Forward => {
                let (lat, lon) = kernel.forward(first, second)?;
                (first, second, lon, lat)
            }
            Direction::Inverse => {
                let (x, y) = kernel.inverse(second, first)?;
                (x, y, first, second)
            }
        };
        let rotation = if requested.rotation {
            Some(kernel.rotation_coefficients(x, y)?)
        } else {
            None
        };
        let jacobian = if requested.jacobian {
            Some(kernel.map_jacobian(x, y)?)
        } else {
            None
        };
        let area = if requested.area {
            Some(kernel.area_factor(x, y)?)
        } else {
            None
        };
        Some(PointEvaluation {
            x,
            y,
            lon,
            lat,
            rotation,
            jacobian,
            area,
        })
    }

    /// Transforms the first `npts` points of `buffers` and returns the number
    /// of valid points.
    ///
    /// Every buffer is checked to hold at least `npts` elements before
    /// anything is written; on error the buffers are left untouched.
    pub fn transform(
        &self,
        direction: Direction,
        npts: usize,
        buffers: &mut PointBuffers<'_, F>,
        options: &TransformOptions<F>,
    ) -> Result<usize, GdswzdError> {
        buffers.check_len(npts)?;
        let requested = buffers.requested();

        let (first, second) = match direction {
            Direction::Forward => (&buffers.xpts[..npts], &buffers.ypts[..npts]),
            Direction::Inverse => (&buffers.rlon[..npts], &buffers.rlat[..npts]),
        };
        #[cfg(feature = "parallel")]
        let points = first
            .par_iter()
            .zip(second.par_iter())
            .map(|(a, b)| self.evaluate_requested(direction, *a, *b, requested))
            .collect::<Vec<_>>();
        #[cfg(not(feature = "parallel"))]
        let points = first
            .iter()
            .zip(second.iter())
            .map(|(a, b)| self.evaluate_requested(direction, *a, *b, requested))
            .collect::<Vec<_>>();

        let fill = options.fill;
        let nret = match options.packing {
            Packing::Compacted => {
                let mut nret = 0;
                for point in points.iter().flatten() {
                    buffers.write_inputs(nret, point, direction);
                    buffers.write_outputs(nret, point, direction);
                    nret += 1;
                }
                for slot in nret..npts {
                    buffers.fill_inputs(slot, fill, direction);
                    buffers.fill_outputs(slot, fill, direction);
                }
                nret
            }
            Packing::InPlace => {
                let mut nret = 0;
                for (slot, point) in points.iter().enumerate() {
                    match point {
                        Some(point) => {
                            buffers.write_outputs(slot, point, direction);
                            nret += 1;
                        }
                        None => buffers.fill_outputs(slot, fill, direction),
                    }
                }
                nret
            }
        };
        trace!(
            "{:?} transform of {} points on {}: {} valid",
            direction,
            npts,
            self.template.short_name(),
            nret
        );
        Ok(nret)
    }
}

/// Owned outputs of a batch, with every optional quantity computed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult<F> {
    pub xpts: Vec<F>,
    pub ypts: Vec<F>,
    pub rlon: Vec<F>,
    pub rlat: Vec<F>,
    pub crot: Vec<F>,
    pub srot: Vec<F>,
    pub xlon: Vec<F>,
    pub xlat: Vec<F>,
    pub ylon: Vec<F>,
    pub ylat: Vec<F>,
    pub area: Vec<F>,
    pub nret: usize,
}

impl<F: GribFloat> TransformResult<F> {
    /// Transforms owned inputs: `(x, y)` for [`Direction::Forward`] and
    /// `(lon, lat)` for [`Direction::Inverse`]. Both inputs must have the
    /// same length.
    pub fn compute(
        engine: &TransformEngine<F>,
        direction: Direction,
        first: Vec<F>,
        second: Vec<F>,
        options: &TransformOptions<F>,
    ) -> Result<Self, GdswzdError> {
        let npts = first.len();
        if second.len() != npts {
            let names = match direction {
                Direction::Forward => ("xpts", "ypts"),
                Direction::Inverse => ("rlon", "rlat"),
            };
            let (name, len, npts) = if second.len() < npts {
                (names.1, second.len(), npts)
            } else {
                (names.0, npts, second.len())
            };
            return Err(GdswzdError::BufferTooShort { name, len, npts });
        }
        let blank = vec![options.fill; npts];
        let (xpts, ypts, rlon, rlat) = match direction {
            Direction::Forward => (first, second, blank.clone(), blank.clone()),
            Direction::Inverse => (blank.clone(), blank.clone(), first, second),
        };
        let mut result = Self {
            xpts,
            ypts,
            rlon,
            rlat,
            crot: blank.clone(),
            srot: blank.clone(),
            xlon: blank.clone(),
            xlat: blank.clone(),
            ylon: blank.clone(),
            ylat: blank.clone(),
            area: blank,
            nret: 0,
        };
        let mut buffers = PointBuffers::new(
            &mut result.xpts,
            &mut result.ypts,
            &mut result.rlon,
            &mut result.rlat,
        )
        .with_rotation(&mut result.crot, &mut result.srot)
        .with_jacobian(
            &mut result.xlon,
            &mut result.xlat,
            &mut result.ylon,
            &mut result.ylat,
        )
        .with_area(&mut result.area);
        let nret = engine.transform(direction, npts, &mut buffers, options)?;
        result.nret = nret;
        Ok(result)
    }

    /// Forward transform of every grid point in storage order.
    pub fn forward_all(
        engine: &TransformEngine<F>,
        options: &TransformOptions<F>,
    ) -> Result<Self, GdswzdError> {
        let one = F::one();
        let (xpts, ypts): (Vec<_>, Vec<_>) = engine
            .template()
            .ij()
            .map(|(i, j)| {
                (
                    F::from_f64_lossy(i as f64) + one,
                    F::from_f64_lossy(j as f64) + one,
                )
            })
            .unzip();
        Self::compute(engine, Direction::Forward, xpts, ypts, options)
    }

    /// Number of slots, valid or not.
    pub fn len(&self) -> usize {
        self.xpts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xpts.is_empty()
    }
}

/// Transforms `npts` points between grid indices and earth coordinates for
/// the grid described by template `igdtnum`.
///
/// `igdtlen` is the number of meaningful values in `igdtmpl`. `iopt` is `1`
/// for grid indices to earth coordinates and `-1` for the reverse. Results
/// are compacted: the first `nret` slots of every buffer hold the valid
/// points in input order, and the rest hold `fill`. `nret` is written only
/// on success.
#[allow(clippy::too_many_arguments)]
pub fn gdswzd<F, I>(
    igdtnum: I,
    igdtmpl: &[I],
    igdtlen: I,
    iopt: I,
    npts: I,
    fill: F,
    xpts: &mut [F],
    ypts: &mut [F],
    rlon: &mut [F],
    rlat: &mut [F],
    nret: &mut I,
    crot: Option<&mut [F]>,
    srot: Option<&mut [F]>,
    xlon: Option<&mut [F]>,
    xlat: Option<&mut [F]>,
    ylon: Option<&mut [F]>,
    ylat: Option<&mut [F]>,
    area: Option<&mut [F]>,
) -> Result<(), GdswzdError>
where
    F: GribFloat,
    I: TemplateInt,
{
    let len = igdtlen.as_i64();
    let fields = usize::try_from(len)
        .ok()
        .and_then(|len| igdtmpl.get(..len))
        .ok_or_else(|| {
            GdswzdError::MalformedTemplate(format!(
                "template length {len} does not fit {} values",
                igdtmpl.len()
            ))
        })?;
    let engine = TransformEngine::from_template(igdtnum, fields)?;
    let direction = Direction::try_from(iopt.as_i64())?;
    let npts = usize::try_from(npts.as_i64()).unwrap_or(0);

    let mut buffers = PointBuffers {
        xpts,
        ypts,
        rlon,
        rlat,
        crot,
        srot,
        xlon,
        xlat,
        ylon,
        ylat,
        area,
    };
    let options = TransformOptions {
        fill,
        packing: Packing::Compacted,
    };
    let count = engine.transform(direction, npts, &mut buffers, &options)?;
    if let Some(count) = <I as NumCast>::from(count) {
        *nret = count;
    }
    Ok(())
}
