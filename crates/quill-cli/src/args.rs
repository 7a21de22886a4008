use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use quill_binder::CompatMode;

/// CLI arguments for the quill-bind binary.
#[derive(Parser, Debug)]
#[command(
    name = "quill-bind",
    version,
    about = "Resolve augmented/inline assignment targets in Quill scope-event streams"
)]
pub struct CliArgs {
    /// Scope-event stream files (JSON), one compilation unit per file.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Compatibility staging for unbound-target diagnostics.
    #[arg(long, value_enum, ignore_case = true, default_value = "warn")]
    pub compat: Compat,

    /// Print the full resolution annotations as JSON instead of diagnostics.
    #[arg(long)]
    pub json: bool,

    /// Suppress per-diagnostic lines; print only the summary.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// `--compat` values, mapped onto the resolver's compatibility mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Compat {
    Legacy,
    Warn,
    Strict,
}

impl From<Compat> for CompatMode {
    fn from(value: Compat) -> Self {
        match value {
            Compat::Legacy => CompatMode::Legacy,
            Compat::Warn => CompatMode::Warn,
            Compat::Strict => CompatMode::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compat_defaults_to_warn() {
        let args = CliArgs::try_parse_from(["quill-bind", "unit.json"]).unwrap();
        assert_eq!(args.compat, Compat::Warn);
        assert!(!args.json);
        assert!(!args.quiet);
    }

    #[test]
    fn compat_accepts_all_modes_case_insensitively() {
        for (text, expected) in [
            ("legacy", Compat::Legacy),
            ("WARN", Compat::Warn),
            ("Strict", Compat::Strict),
        ] {
            let args =
                CliArgs::try_parse_from(["quill-bind", "--compat", text, "unit.json"]).unwrap();
            assert_eq!(args.compat, expected, "{text}");
        }
    }

    #[test]
    fn at_least_one_file_is_required() {
        assert!(CliArgs::try_parse_from(["quill-bind"]).is_err());
    }

    #[test]
    fn compat_maps_onto_resolver_mode() {
        assert_eq!(CompatMode::from(Compat::Strict), CompatMode::Strict);
        assert_eq!(CompatMode::from(Compat::Legacy), CompatMode::Legacy);
    }
}
