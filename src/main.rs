use clap::{Parser, Subcommand};
use semaver::{latest, SemaverError, Version, VersionRange};
use std::cmp::Ordering;

#[derive(thiserror::Error, Debug)]
enum SemaverCliError {
    #[error("{0}")]
    LibraryError(#[from] SemaverError),
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help(true))]
enum Commands {
    /// Checks whether a version lies within a range
    Check {
        /// The version to check
        version: String,

        /// The range expression to check against
        #[arg(short, long)]
        range: String,
    },

    /// Prints the latest of the given versions, optionally restricted to a range
    Latest {
        /// The versions to select from
        versions: Vec<String>,

        /// Only consider versions within this range
        #[arg(short, long)]
        range: Option<String>,
    },

    /// Compares two versions, printing `<`, `=` or `>`
    Compare {
        /// The left-hand version
        left: String,

        /// The right-hand version
        right: String,
    },
}

type Output = (String, i32);

fn main() {
    let cli = Cli::parse();

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
}

fn do_work(cli: Cli) -> Result<Output, SemaverCliError> {
    match cli.command {
        Commands::Check { version, range } => {
            let version: Version = version.parse()?;
            let range: VersionRange = range.parse()?;
            Ok(if range.contains(&version) {
                ("true".to_string(), 0)
            } else {
                ("false".to_string(), 1)
            })
        }
        Commands::Latest { versions, range } => {
            let versions = versions
                .iter()
                .map(|s| s.parse())
                .collect::<Result<Vec<Version>, _>>()?;
            let range = range.map(|s| s.parse::<VersionRange>()).transpose()?;

            Ok(match latest(&versions, range.as_ref()) {
                Some(version) => (version.to_string(), 0),
                None => ("no matching version".to_string(), 1),
            })
        }
        Commands::Compare { left, right } => {
            let left: Version = left.parse()?;
            let right: Version = right.parse()?;
            let symbol = match left.cmp(&right) {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            Ok((symbol.to_string(), 0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_subcommand() {
        let cli = Cli::try_parse_from(["semaver", "check", "1.2.3", "--range", "^1.2"]).unwrap();
        let (output, exit_code) = do_work(cli).unwrap();
        assert_eq!("true", output);
        assert_eq!(0, exit_code);

        let cli = Cli::try_parse_from(["semaver", "check", "2.0.0", "--range", "^1.2"]).unwrap();
        let (output, exit_code) = do_work(cli).unwrap();
        assert_eq!("false", output);
        assert_eq!(1, exit_code);
    }

    #[test]
    fn test_latest_subcommand() {
        let cli = Cli::try_parse_from([
            "semaver", "latest", "1.2.3", "4.5.6", "1.4.0", "--range", "1.x",
        ])
        .unwrap();
        let (output, exit_code) = do_work(cli).unwrap();
        assert_eq!("1.4.0", output);
        assert_eq!(0, exit_code);
    }

    #[test]
    fn test_compare_subcommand() {
        let cli = Cli::try_parse_from(["semaver", "compare", "1.2", "1.10"]).unwrap();
        let (output, _) = do_work(cli).unwrap();
        assert_eq!("<", output);
    }

    #[test]
    fn test_bad_range_reports_library_error() {
        let cli = Cli::try_parse_from(["semaver", "check", "1.2.3", "--range", "a.b.c"]).unwrap();
        let err = do_work(cli).unwrap_err();
        assert!(matches!(err, SemaverCliError::LibraryError(_)));
    }
}
