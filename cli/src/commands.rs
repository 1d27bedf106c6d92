use clap::{ArgMatches, Command};

pub fn cli() -> Vec<Command> {
    vec![
        completions::cli(),
        forward::cli(),
        info::cli(),
        inverse::cli(),
    ]
}

pub fn dispatch(matches: ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("completions", args)) => completions::exec(args),
        Some(("forward", args)) => forward::exec(args),
        Some(("info", args)) => info::exec(args),
        Some(("inverse", args)) => inverse::exec(args),
        _ => unreachable!(),
    }
}

pub mod completions;
pub mod forward;
pub mod info;
pub mod inverse;
mod batch;
