use std::fmt::{self, Display, Formatter};

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, arg};
use console::Style;
use gdswzd::{
    Direction, GribFloat, Packing, TransformEngine, TransformOptions, TransformResult,
};

use crate::cli::{self, CliPoint, CliTemplate};

pub(crate) fn template_arg() -> Arg {
    arg!(<TEMPLATE> "Template as 'N:V1,V2,...', or a file containing it (or a single dash (`-`) for standard input)")
}

pub(crate) fn batch_args() -> Vec<Arg> {
    vec![
        arg!(-s --single "Compute in single precision").action(ArgAction::SetTrue),
        arg!(--fill <VALUE> "Value written for points outside the grid")
            .required(false)
            .allow_negative_numbers(true)
            .default_value("-9999")
            .value_parser(clap::value_parser!(f64)),
        arg!(--"in-place" "Keep each result in the slot of its input instead of compacting valid results")
            .action(ArgAction::SetTrue),
        arg!(-l --list "Show every point instead of a summary").action(ArgAction::SetTrue),
    ]
}

pub(crate) fn point_arg(help: &'static str) -> Arg {
    Arg::new("point")
        .short('p')
        .long("point")
        .value_name("A,B")
        .help(help)
        .action(ArgAction::Append)
        .allow_negative_numbers(true)
        .value_parser(clap::value_parser!(CliPoint))
}

/// Inputs of a batch in the precision selected on the command line.
pub(crate) struct Batch {
    template: CliTemplate,
    points: Option<Vec<CliPoint>>,
    fill: f64,
    packing: Packing,
    list: bool,
    single: bool,
}

impl Batch {
    pub(crate) fn from_args(args: &ArgMatches) -> Result<Self> {
        let template = args.get_one::<String>("TEMPLATE").unwrap();
        let template = CliTemplate::from_arg(template)?;
        let points = args
            .get_many::<CliPoint>("point")
            .map(|points| points.copied().collect());
        let packing = if args.get_flag("in-place") {
            Packing::InPlace
        } else {
            Packing::Compacted
        };
        Ok(Self {
            template,
            points,
            fill: *args.get_one::<f64>("fill").unwrap(),
            packing,
            list: args.get_flag("list"),
            single: args.get_flag("single"),
        })
    }

    pub(crate) fn run(&self, direction: Direction) -> Result<()> {
        if self.single {
            let number = i32::try_from(self.template.number)?;
            let fields = self.template.fields_as::<i32>()?;
            let engine = TransformEngine::<f32>::from_template(number, &fields)?;
            self.run_with(&engine, direction)
        } else {
            let engine =
                TransformEngine::<f64>::from_template(self.template.number, &self.template.fields)?;
            self.run_with(&engine, direction)
        }
    }

    fn run_with<F: GribFloat>(&self, engine: &TransformEngine<F>, direction: Direction) -> Result<()> {
        let options = TransformOptions {
            fill: F::from_f64_lossy(self.fill),
            packing: self.packing,
        };
        let result = match &self.points {
            Some(points) => {
                let (first, second) = points
                    .iter()
                    .map(|CliPoint(a, b)| (F::from_f64_lossy(*a), F::from_f64_lossy(*b)))
                    .unzip();
                TransformResult::compute(engine, direction, first, second, &options)?
            }
            None if direction == Direction::Forward => {
                TransformResult::forward_all(engine, &options)?
            }
            None => anyhow::bail!("no points given"),
        };

        if self.list {
            let rows = match self.packing {
                Packing::Compacted => result.nret,
                Packing::InPlace => result.len(),
            };
            cli::display_in_pager(PointListView { result: &result, rows });
        } else {
            print!(
                "{}",
                SummaryView {
                    engine,
                    result: &result,
                    packing: self.packing,
                    fill: options.fill,
                }
            );
        }
        Ok(())
    }
}

struct SummaryView<'a, F> {
    engine: &'a TransformEngine<F>,
    result: &'a TransformResult<F>,
    packing: Packing,
    fill: F,
}

impl<F: GribFloat> SummaryView<'_, F> {
    fn write_point(&self, f: &mut Formatter, label: &str, i: usize) -> fmt::Result {
        let r = self.result;
        writeln!(
            f,
            "{label:<20}x {:.4}  y {:.4}  lat {:.7}  lon {:.7}",
            r.xpts[i], r.ypts[i], r.rlat[i], r.rlon[i]
        )
    }
}

impl<F: GribFloat> Display for SummaryView<'_, F> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let template = self.engine.template();
        let (ni, nj) = template.grid_shape();
        let r = self.result;
        writeln!(
            f,
            "{:<20}{} (template {}), {} x {}",
            "Grid:",
            template.short_name(),
            template.template_number(),
            ni,
            nj
        )?;
        writeln!(f, "{:<20}{} of {}", "Points returned:", r.nret, r.len())?;

        let valid = |i: &usize| r.xpts[*i] != self.fill && r.rlat[*i] != self.fill;
        let (first, last) = match self.packing {
            Packing::Compacted => (0, r.nret.checked_sub(1)),
            Packing::InPlace => {
                let mut slots = (0..r.len()).filter(valid);
                let first = slots.next();
                (first.unwrap_or(0), slots.last().or(first))
            }
        };
        if let Some(last) = last {
            self.write_point(f, "First point:", first)?;
            self.write_point(f, "Last point:", last)?;
        }
        Ok(())
    }
}

struct PointListView<'a, F> {
    result: &'a TransformResult<F>,
    rows: usize,
}

impl<F> cli::PredictableNumLines for PointListView<'_, F> {
    fn num_lines(&self) -> usize {
        let header_height = 1;
        header_height + self.rows
    }
}

impl<F: GribFloat> Display for PointListView<'_, F> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let header = format!(
            "{:>12} {:>12} {:>14} {:>14} {:>11} {:>11} {:>18}",
            "x", "y", "lat", "lon", "crot", "srot", "area",
        );
        let style = Style::new().bold();
        writeln!(f, "{}", style.apply_to(header))?;

        let r = self.result;
        for i in 0..self.rows {
            writeln!(
                f,
                "{:>12.4} {:>12.4} {:>14.7} {:>14.7} {:>11.7} {:>11.7} {:>18.2}",
                r.xpts[i], r.ypts[i], r.rlat[i], r.rlon[i], r.crot[i], r.srot[i], r.area[i],
            )?;
        }
        Ok(())
    }
}
