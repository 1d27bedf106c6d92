use std::fmt::{self, Display, Formatter};

use anyhow::Result;
use clap::{ArgMatches, Command};
use gdswzd::{GridDefinitionTemplateValues, GridTemplate, ShapeOfTheEarth};

use super::batch;
use crate::cli::CliTemplate;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Show the decoded grid definition")
        .arg(batch::template_arg())
}

pub fn exec(args: &ArgMatches) -> Result<()> {
    let template = args.get_one::<String>("TEMPLATE").unwrap();
    let CliTemplate { number, fields } = CliTemplate::from_arg(template)?;
    let template = GridTemplate::<f64>::decode(number, &fields)?;
    print!("{}", InfoView(&template));
    Ok(())
}

struct InfoView<'i>(&'i GridTemplate<f64>);

impl Display for InfoView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self(template) = self;
        let grid = template.lat_lon();
        let (ni, nj) = template.grid_shape();
        let (dlon, dlat) = grid.increments();
        let shape = u8::try_from(grid.earth_shape.shape_of_the_earth)
            .ok()
            .and_then(|code| ShapeOfTheEarth::try_from(code).ok())
            .map(|shape| format!("{shape:?}"))
            .unwrap_or_else(|| "unknown".to_owned());
        let winds = if template.winds_relative_to_grid() {
            "grid"
        } else {
            "easterly and northerly directions"
        };
        write!(
            f,
            "\
Grid definition template:               {} ({})
Shape of the earth:                     {} (radius {} m)
Number of points along a parallel:      {}
Number of points along a meridian:      {}
Latitude of first grid point:           {}
Longitude of first grid point:          {}
Latitude of last grid point:            {}
Longitude of last grid point:           {}
i direction increment:                  {}
j direction increment:                  {}
Scanning mode:                          {:#010b}
Vector components relative to:          {}
",
            template.template_number(),
            template.short_name(),
            shape,
            template.earth_radius(),
            ni,
            nj,
            grid.first_point_lat,
            grid.first_point_lon,
            grid.last_point_lat,
            grid.last_point_lon,
            dlon,
            dlat,
            grid.scanning_mode.0,
            winds,
        )?;
        if let GridDefinitionTemplateValues::Template1(def) = template.definition() {
            write!(
                f,
                "\
Latitude of the southern pole:          {}
Longitude of the southern pole:         {}
Angle of rotation of projection:        {}
",
                def.rotation.south_pole_lat, def.rotation.south_pole_lon, def.rotation.rot_angle,
            )?;
        }
        Ok(())
    }
}
