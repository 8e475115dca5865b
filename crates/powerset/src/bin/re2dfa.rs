//! Compile one of a handful of sample regular expressions to a DFA

#![deny(
    clippy::disallowed_methods,
    clippy::suspicious,
    clippy::style,
    clippy::clone_on_ref_ptr,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use powerset::{
    nfa::StateIds,
    re::{ArityError, Regex},
};
use tracing_subscriber::{filter::LevelFilter, prelude::*};

#[derive(Debug, Parser)]
#[command(version, author, about)]
struct Opts {
    /// Print more verbose logs
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Regular expression to compile
    #[arg(short, long, default_value = "ab-star")]
    sample: Sample,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    format: Format,

    /// Print the intermediate NFA instead of the DFA
    #[arg(long)]
    nfa: bool,

    /// First NFA state number to hand out
    #[arg(long, env = "RE2DFA_FIRST_STATE", default_value_t = 0)]
    first_state: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    /// Start and accepting states, followed by every edge
    Summary,
    /// Graphviz DOT
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Sample {
    /// A
    Lit,
    /// (a|b)*ab
    AbStar,
    /// ((a|b)*ab)*
    AbStarStar,
    /// (a|b)*ab(a|b)*ab
    AbAb,
    /// (a|b)*abb
    Abb,
    /// sign?digit+(.digit+)?(e sign?digit+)?
    SmlReal,
    /// NEAR|NOT|AND|OR|,|[ADNEROT]+
    Keywords,
}

fn lit(s: &str) -> Regex { Regex::lit(s) }

fn word(s: &str) -> Result<Regex, ArityError> {
    Regex::cat(s.chars().map(|c| Regex::lit(c.to_string())))
}

impl Sample {
    fn regex(self) -> Result<Regex, ArityError> {
        let ab_star =
            || -> Result<_, ArityError> { Ok(Regex::alt([lit("a"), lit("b")])?.star()) };
        let ab_star_ab = || -> Result<_, ArityError> {
            Regex::cat([ab_star()?, Regex::cat([lit("a"), lit("b")])?])
        };

        Ok(match self {
            Self::Lit => lit("A"),
            Self::AbStar => ab_star_ab()?,
            Self::AbStarStar => ab_star_ab()?.star(),
            Self::AbAb => Regex::cat([ab_star_ab()?, ab_star_ab()?])?,
            Self::Abb => Regex::cat([
                ab_star()?,
                Regex::cat([lit("a"), lit("b"), lit("b")])?,
            ])?,
            Self::SmlReal => {
                let digits = lit("digit").plus();
                let sign = lit("sign").opt();
                let mantissa = Regex::cat([
                    sign.clone(),
                    digits.clone(),
                    Regex::cat([lit("."), digits.clone()])?.opt(),
                ])?;
                let exponent = Regex::cat([lit("e"), sign, digits])?.opt();

                Regex::cat([mantissa, exponent])?
            },
            Self::Keywords => {
                let not_comma = Regex::alt("ADNEROT".chars().map(|c| lit(&c.to_string())))?;

                Regex::alt([
                    word("NEAR")?,
                    word("NOT")?,
                    word("AND")?,
                    word("OR")?,
                    lit(","),
                    not_comma.plus(),
                ])?
            },
        })
    }
}

fn main() {
    let opts = Opts::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(false)
                .with_line_number(false),
        )
        .with(match (cfg!(debug_assertions), opts.verbose) {
            (false, 0) => LevelFilter::INFO,
            (false, 1) | (true, 0) => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        })
        .init();

    tracing::debug!("{opts:#?}");

    std::process::exit(run(opts).map_or_else(
        |e| {
            tracing::error!("{e}");
            1
        },
        |()| 0,
    ));
}

fn run(
    Opts {
        verbose: _,
        sample,
        format,
        nfa: print_nfa,
        first_state,
    }: Opts,
) -> Result<(), ArityError> {
    let re = sample.regex()?;
    tracing::info!(%re, "Compiling");

    let nfa = re.build_nfa(&mut StateIds::from(first_state));

    if print_nfa {
        match format {
            Format::Summary => {
                println!("{nfa}");
                for (from, label, to) in nfa.edges() {
                    println!("  {from} -{}-> {to}", label.unwrap_or("ϵ"));
                }
            },
            Format::Dot => println!("{}", nfa.dot(|s| s.to_owned().into())),
        }

        return Ok(());
    }

    let dfa = nfa.compile();
    tracing::info!(states = dfa.len(), accept = dfa.accept().len(), "Compiled DFA");

    match format {
        Format::Summary => {
            println!("{dfa}");
            for (from, label, to) in dfa.edges() {
                println!("  {from} -{label}-> {to}");
            }
        },
        Format::Dot => println!("{}", dfa.dot(|s| s.to_owned().into())),
    }

    Ok(())
}
