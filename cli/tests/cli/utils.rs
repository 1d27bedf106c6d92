use std::io::{self, Write};

use tempfile::NamedTempFile;

/// Rotated latitude/longitude grid with B-grid winds, 251 x 201 points.
pub(crate) const ROTATED_LL: &str = "1:6,255,-1,255,-1,255,-1,251,201,0,-1,-45036000,299961000,56,\
    45036000,60039000,0,0,64,-36000000,254000000,0";

/// Regular 1-degree global grid.
pub(crate) const GLOBAL_LL: &str =
    "0:6,255,-1,255,-1,255,-1,360,181,0,-1,90000000,0,48,-90000000,359000000,0,0,0";

pub(crate) fn template_file(content: &str) -> Result<NamedTempFile, io::Error> {
    let mut out = NamedTempFile::new()?;
    out.write_all(content.as_bytes())?;
    Ok(out)
}
