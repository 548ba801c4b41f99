use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use matrixkit::config::{InitConfig, InitKind};
use matrixkit::display::{render, DisplayOptions};
use matrixkit::Matrix;

fn matrix_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::builder::NonEmptyStringValueParser::new())
        .value_hint(ValueHint::Other)
}

fn binary_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(matrix_arg("left", "Left operand as a JSON nested list, e.g. '[[1,2],[3,4]]'"))
        .arg(matrix_arg("right", "Right operand as a JSON nested list"))
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATRIXKIT_LOG", "error,matrixkit=info"))
        .init();

    let matches = Command::new("matrixkit")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("Dense matrix arithmetic from the command line")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .help("Number of decimal places to print")
                .value_parser(clap::value_parser!(usize))
                .global(true),
        )
        .subcommand(binary_command("multiply", "Matrix product of two matrices"))
        .subcommand(binary_command(
            "hadamard",
            "Elementwise product of two equally shaped matrices",
        ))
        .subcommand(binary_command("add", "Elementwise sum of two equally shaped matrices"))
        .subcommand(binary_command(
            "subtract",
            "Elementwise difference of two equally shaped matrices",
        ))
        .subcommand(
            Command::new("transpose")
                .about("Transpose a matrix")
                .arg(matrix_arg("matrix", "Matrix as a JSON nested list")),
        )
        .subcommand(
            Command::new("random")
                .about("Generate a matrix filled by an initialization strategy")
                .arg(
                    Arg::new("rows")
                        .short('r')
                        .long("rows")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("cols")
                        .short('c')
                        .long("cols")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("kind")
                        .short('k')
                        .long("kind")
                        .help("Fill strategy")
                        .value_parser(["uniform", "zero", "identity"])
                        .default_value("uniform"),
                )
                .arg(
                    Arg::new("lower")
                        .long("lower")
                        .help("Inclusive lower bound for uniform fills")
                        .value_parser(clap::value_parser!(f64))
                        .allow_hyphen_values(true)
                        .default_value("0"),
                )
                .arg(
                    Arg::new("upper")
                        .long("upper")
                        .help("Exclusive upper bound for uniform fills")
                        .value_parser(clap::value_parser!(f64))
                        .allow_hyphen_values(true)
                        .default_value("1"),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .help("Seed for reproducible uniform fills")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("round")
                        .long("round")
                        .help("Round every cell to the nearest integer")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    let options = DisplayOptions {
        precision: matches.get_one::<usize>("precision").copied(),
        ..DisplayOptions::default()
    };

    let result = match matches.subcommand() {
        Some(("transpose", sub_m)) => {
            let m = parse_matrix(sub_m, "matrix")?;
            Matrix::transposed(&m)
        }
        Some(("random", sub_m)) => build_random(sub_m)?,
        Some((op, sub_m)) => handle_binary(op, sub_m)?,
        None => unreachable!("Subcommand is required by CLI configuration"),
    };

    println!("{}", render(&result, &options));
    Ok(())
}

fn parse_matrix(matches: &ArgMatches, name: &str) -> Result<Matrix> {
    let raw: &String = matches
        .get_one(name)
        .with_context(|| format!("missing argument '{}'", name))?;
    serde_json::from_str(raw).with_context(|| format!("failed to parse '{}' as a matrix", name))
}

fn handle_binary(op: &str, matches: &ArgMatches) -> Result<Matrix> {
    let mut left = parse_matrix(matches, "left")?;
    let right = parse_matrix(matches, "right")?;
    log::info!(
        "[matrixkit] {} {:?} with {:?}",
        op,
        left.shape(),
        right.shape()
    );

    match op {
        "multiply" => return Ok(Matrix::matmul(&left, &right)?),
        "hadamard" => {
            left.hadamard(&right)?;
        }
        "add" => {
            left.add_matrix(&right)?;
        }
        "subtract" => {
            left.sub_matrix(&right)?;
        }
        _ => unreachable!(),
    }
    Ok(left)
}

fn build_random(matches: &ArgMatches) -> Result<Matrix> {
    let rows = *matches.get_one::<usize>("rows").context("missing --rows")?;
    let cols = *matches.get_one::<usize>("cols").context("missing --cols")?;
    let kind_name: &String = matches.get_one("kind").context("missing --kind")?;

    let kind = match kind_name.parse::<InitKind>().map_err(anyhow::Error::msg)? {
        InitKind::Uniform { .. } => InitKind::Uniform {
            lower: *matches.get_one::<f64>("lower").context("missing --lower")?,
            upper: *matches.get_one::<f64>("upper").context("missing --upper")?,
        },
        other => other,
    };

    let mut config = InitConfig::new(rows, cols, kind);
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(*seed);
    }

    let mut m = config.build();
    if matches.get_flag("round") {
        m.round();
    }
    Ok(m)
}
