//! Transformations between fractional grid indices and earth coordinates for
//! grids described by GRIB2 grid definition templates.
//!
//! Supported templates:
//!
//! * 3.0: regular latitude/longitude
//! * 3.1: rotated latitude/longitude
//!
//! ```
//! use gdswzd::{GridTemplate, TransformEngine, TransformOptions, TransformResult};
//!
//! let fields = [
//!     6, 255, -1, 255, -1, 255, -1, 251, 201, 0, -1, -45036000, 299961000, 56, 45036000,
//!     60039000, 0, 0, 64, -36000000, 254000000, 0,
//! ];
//! let template = GridTemplate::<f64>::decode(1_i64, &fields)?;
//! let engine = TransformEngine::new(template);
//! let result = TransformResult::forward_all(&engine, &TransformOptions::default())?;
//! assert_eq!(result.nret, 50451);
//!
//! let (x, y) = engine.inverse(result.rlat[0], result.rlon[0]).unwrap();
//! assert!((x - 1.).abs() < 1e-9 && (y - 1.).abs() < 1e-9);
//! # Ok::<(), gdswzd::GdswzdError>(())
//! ```

mod engine;
mod error;
mod grid;
mod projection;
mod template;
mod utils;

pub use crate::{engine::*, error::*, grid::*, projection::*, template::*, utils::*};
