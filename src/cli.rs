// Command-line parsing
//
// Three required flags and one optional one. Both `--flag value` and
// `--flag=value` are accepted; paths are kept as OsStrings so non-UTF-8
// file names work with the separated form.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

pub const USAGE: &str =
    "Usage: shader-dump --input <path> --output <path> --var_name <name> [--config <path>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
    pub var_name: String,
    pub config: Option<PathBuf>,
}

/// Result of parsing: either something to run, or a request for usage text
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
pub enum UsageError {
    MissingFlag(&'static str),
    MissingValue(String),
    UnknownArgument(String),
    NotUnicode(&'static str),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingFlag(flag) => write!(f, "the following argument is required: {}", flag),
            UsageError::MissingValue(flag) => write!(f, "argument {}: expected one value", flag),
            UsageError::UnknownArgument(arg) => write!(f, "unrecognized argument: {}", arg),
            UsageError::NotUnicode(flag) => write!(f, "argument {}: value is not valid UTF-8", flag),
        }
    }
}

impl std::error::Error for UsageError {}

impl Command {
    /// Parse the process arguments
    pub fn parse() -> Result<Self, UsageError> {
        Self::parse_from(std::env::args_os().skip(1))
    }

    /// Parse arguments, not including the program name.
    pub fn parse_from<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut input: Option<OsString> = None;
        let mut output: Option<OsString> = None;
        let mut var_name: Option<OsString> = None;
        let mut config: Option<OsString> = None;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            // Flags are ASCII; a non-UTF-8 argument here can only be a stray value
            let Some(arg) = arg.to_str() else {
                return Err(UsageError::UnknownArgument(arg.to_string_lossy().into_owned()));
            };

            if arg == "-h" || arg == "--help" {
                return Ok(Command::Help);
            }

            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(OsString::from(value))),
                _ => (arg, None),
            };

            let (name, slot) = match flag {
                "--input" => ("--input", &mut input),
                "--output" => ("--output", &mut output),
                "--var_name" => ("--var_name", &mut var_name),
                "--config" => ("--config", &mut config),
                _ => return Err(UsageError::UnknownArgument(flag.to_string())),
            };

            let value = match inline {
                Some(value) => value,
                None => match args.next() {
                    Some(value) if !value.to_string_lossy().starts_with("--") => value,
                    _ => return Err(UsageError::MissingValue(name.to_string())),
                },
            };
            // Repeated flags: last one wins
            *slot = Some(value);
        }

        let input = input.ok_or(UsageError::MissingFlag("--input"))?;
        let output = output.ok_or(UsageError::MissingFlag("--output"))?;
        let var_name = var_name
            .ok_or(UsageError::MissingFlag("--var_name"))?
            .into_string()
            .map_err(|_| UsageError::NotUnicode("--var_name"))?;

        Ok(Command::Run(Args {
            input: input.into(),
            output: output.into(),
            var_name,
            config: config.map(PathBuf::from),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Args {
        match Command::parse_from(args.iter().copied()).unwrap() {
            Command::Run(args) => args,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn all_required_flags() {
        let args = run(&["--input", "a.spv", "--output", "a.h", "--var_name", "spirv_a"]);
        assert_eq!(args.input, PathBuf::from("a.spv"));
        assert_eq!(args.output, PathBuf::from("a.h"));
        assert_eq!(args.var_name, "spirv_a");
        assert_eq!(args.config, None);
    }

    #[test]
    fn equals_form_and_any_order() {
        let args = run(&["--var_name=x", "--config", "c.toml", "--output=o.h", "--input=i.spv"]);
        assert_eq!(args.var_name, "x");
        assert_eq!(args.input, PathBuf::from("i.spv"));
        assert_eq!(args.output, PathBuf::from("o.h"));
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn missing_required() {
        let err = Command::parse_from(["--input", "a.spv", "--var_name", "x"]).unwrap_err();
        assert_eq!(err, UsageError::MissingFlag("--output"));

        let err = Command::parse_from(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, UsageError::MissingFlag("--input"));
    }

    #[test]
    fn missing_value() {
        let err = Command::parse_from(["--output", "o.h", "--input"]).unwrap_err();
        assert_eq!(err, UsageError::MissingValue("--input".to_string()));
    }

    #[test]
    fn flag_is_not_taken_as_value() {
        let err = Command::parse_from(["--input", "--output", "o.h", "--var_name", "x"]).unwrap_err();
        assert_eq!(err, UsageError::MissingValue("--input".to_string()));
    }

    #[test]
    fn unknown_flag() {
        let err = Command::parse_from(["--verbose"]).unwrap_err();
        assert_eq!(err, UsageError::UnknownArgument("--verbose".to_string()));
    }

    #[test]
    fn help() {
        assert_eq!(Command::parse_from(["--input", "a", "-h"]).unwrap(), Command::Help);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let odd = OsStr::from_bytes(b"sh\xffader.spv");
        let args = [OsStr::new("--input"), odd, OsStr::new("--output"), odd, OsStr::new("--var_name"), OsStr::new("x")];
        match Command::parse_from(args).unwrap() {
            Command::Run(args) => {
                assert_eq!(args.input.as_os_str(), odd);
                assert_eq!(args.output.as_os_str(), odd);
            }
            Command::Help => panic!("unexpected help"),
        }

        let args = [OsStr::new("--input"), OsStr::new("a"), OsStr::new("--output"), OsStr::new("b"), OsStr::new("--var_name"), odd];
        assert_eq!(Command::parse_from(args).unwrap_err(), UsageError::NotUnicode("--var_name"));
    }
}
