use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
    sync::LazyLock,
};

#[cfg(unix)]
use pager::Pager;
use regex::Regex;
#[cfg(unix)]
use which::which;

/// Grid definition template given on the command line as `N:v1,v2,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CliTemplate {
    pub(crate) number: i64,
    pub(crate) fields: Vec<i64>,
}

impl CliTemplate {
    /// Parses `source` as a template, or reads the template from the file it
    /// names (or standard input for a single dash).
    pub(crate) fn from_arg(source: &str) -> anyhow::Result<Self> {
        if source.contains(':') {
            return source.parse();
        }
        let mut buf = String::new();
        if is_dash(source) {
            std::io::stdin().read_to_string(&mut buf)?;
        } else {
            let f = File::open(source)?;
            let mut f = BufReader::new(f);
            f.read_to_string(&mut buf)?;
        }
        buf.parse()
    }

    pub(crate) fn fields_as<I: TryFrom<i64>>(&self) -> anyhow::Result<Vec<I>> {
        self.fields
            .iter()
            .map(|v| {
                I::try_from(*v)
                    .map_err(|_| anyhow::anyhow!("template value {v} out of range"))
            })
            .collect()
    }
}

impl FromStr for CliTemplate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"(?x)                        # insignificant whitespace mode
                ^\s*
                ([0-9]+)                      # template number
                \s*:\s*
                (-?[0-9]+(?:\s*,\s*-?[0-9]+)*)  # comma-separated values
                \s*$",
            )
            .unwrap()
        });
        let cap = RE.captures(s).ok_or_else(|| {
            anyhow::anyhow!(
                "template must be specified as 'N:V1,V2,...' where N and all values are integers"
            )
        })?;
        let number = cap.get(1).unwrap().as_str();
        let number = i64::from_str(number)?;
        let fields = cap
            .get(2)
            .unwrap()
            .as_str()
            .split(',')
            .map(|v| i64::from_str(v.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { number, fields })
    }
}

/// Pair of coordinates given as `A,B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CliPoint(pub(crate) f64, pub(crate) f64);

impl FromStr for CliPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, second) = s
            .split_once(',')
            .ok_or_else(|| anyhow::anyhow!("point must be specified as 'A,B': {s}"))?;
        let first = f64::from_str(first.trim())?;
        let second = f64::from_str(second.trim())?;
        Ok(Self(first, second))
    }
}

pub(crate) fn display_in_pager<V>(view: V)
where
    V: PredictableNumLines + std::fmt::Display,
{
    let user_attended = console::user_attended();

    let term = console::Term::stdout();
    let (height, _width) = term.size();
    if user_attended && view.num_lines() > height.into() {
        start_pager();
    }

    if user_attended {
        console::set_colors_enabled(true);
    }

    print!("{view}");
}

pub(crate) trait PredictableNumLines {
    fn num_lines(&self) -> usize;
}

#[cfg(unix)]
fn start_pager() {
    if which("less").is_ok() {
        Pager::with_pager("less -R").setup();
    } else {
        Pager::new().setup();
    }
}

#[cfg(not(unix))]
fn start_pager() {}

fn is_dash<P: AsRef<Path>>(path: P) -> bool {
    matches!(path.as_ref().to_str(), Some("-"))
}

macro_rules! module_component {
    () => {
        module_path!().split("::").last().unwrap_or("")
    };
}
pub(crate) use module_component;
