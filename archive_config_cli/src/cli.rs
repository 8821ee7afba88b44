//! Command-line interface definitions for `archive-config`.

use camino::Utf8PathBuf;
use clap::Parser;

/// Environment variable naming the resource directory.
pub const RESOURCES_ENV: &str = "ARCHIVE_CONFIG_RESOURCES";

/// Parsed CLI arguments for `archive-config`.
#[derive(Debug, Parser)]
#[command(name = "archive-config")]
#[command(about = "Normalize an archive server configuration document")]
#[command(version)]
pub struct Args {
    /// YAML configuration document to normalize.
    #[arg(value_name = "path")]
    pub input: Utf8PathBuf,
    /// Directory external content is resolved against (defaults to the
    /// directory holding the input).
    #[arg(long, env = RESOURCES_ENV, value_name = "dir")]
    pub resources: Option<Utf8PathBuf>,
    /// Write the normalized JSON document here instead of standard output.
    #[arg(long, short, value_name = "path")]
    pub output: Option<Utf8PathBuf>,
    /// Log every normalization pass.
    #[arg(long = "verbose", short = 'v')]
    pub is_verbose: bool,
}

impl Args {
    /// Directory resources are resolved against.
    #[must_use]
    pub fn resource_root(&self) -> Utf8PathBuf {
        self.resources.clone().unwrap_or_else(|| {
            self.input
                .parent()
                .filter(|parent| !parent.as_str().is_empty())
                .map_or_else(|| Utf8PathBuf::from("."), ToOwned::to_owned)
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use camino::Utf8PathBuf;
    use clap::Parser;
    use rstest::rstest;
    use test_helpers::env;

    use super::{Args, RESOURCES_ENV};

    #[rstest]
    #[case::beside_input(&["archive-config", "conf/app.yml"], "conf")]
    #[case::bare_file_name(&["archive-config", "app.yml"], ".")]
    #[case::explicit(&["archive-config", "conf/app.yml", "--resources", "res"], "res")]
    fn resolves_resource_root(#[case] argv: &[&str], #[case] expected: &str) -> Result<()> {
        let _lock = env::lock();
        let _unset = env::remove_var(RESOURCES_ENV);
        let args = Args::try_parse_from(argv)?;
        assert_eq!(args.resource_root(), Utf8PathBuf::from(expected));
        Ok(())
    }

    #[test]
    fn reads_resource_root_from_environment() -> Result<()> {
        let _lock = env::lock();
        let _set = env::set_var(RESOURCES_ENV, "/srv/resources");
        let args = Args::try_parse_from(["archive-config", "app.yml"])?;
        assert_eq!(args.resource_root(), Utf8PathBuf::from("/srv/resources"));
        Ok(())
    }

    #[test]
    fn requires_an_input() {
        assert!(Args::try_parse_from(["archive-config"]).is_err());
    }
}
