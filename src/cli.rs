//! # Hydrate CLI
//!
//! Command-line interface definition.
//!
//! ## Usage
//!
//! ```bash
//! # Hydrate a JSON file
//! hydrate --path=/app/sit1 no-secrets.json > secrets.json
//!
//! # Hydrate YAML data from stdin
//! echo 'data: $SECRET:/app/sit1/app_secret_data_key' | hydrate --format=yml - > secret.yml
//!
//! # Hydrate Kubernetes Secret/ConfigMap data files and values
//! hydrate --k8s --path=/app/sit1 k8s-secret.yml | kubectl apply -f -
//! ```

use clap::Parser;

const AFTER_HELP: &str = "\
Replaces all matching values with secrets from AWS SSM Parameter Store:
    1. \"$SECRET:/custom/parameter/path\"   explicit parameter path
    2. \"$$\"                               the value's own key under --path
    3. \"$SECRET\"                          same as \"$$\"

Example:
    Parameter Store:
        PATH                     VALUE
        /custom/parameter/path   a
        /prefix/db_passwd        bb
        /prefix/db_pwd           ccc

    input.json:
        {\"db_password\": \"$SECRET:/custom/parameter/path\", \"db_passwd\": \"$$\", \"db_pwd\": \"$SECRET\"}

    hydrate --path=/prefix input.json > output.json

    output.json:
        {\"db_passwd\":\"bb\",\"db_password\":\"a\",\"db_pwd\":\"ccc\"}

With --k8s, Secret and ConfigMap manifests have their data, stringData and
binaryData entries hydrated; base64 encoding is handled automatically and
entries named *.json, *.yaml, *.yml or *.toml are hydrated as nested files.
";

/// Hydrate JSON, YAML and TOML config files with secrets from AWS SSM Parameter Store
#[derive(Debug, Parser)]
#[command(name = "hydrate")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")"),
    about = "Hydrate JSON, YAML and TOML config files with secrets from AWS SSM Parameter Store",
    long_about = None,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Input file, or `-` to read from stdin
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Input file format: json, yaml, yml, toml
    /// Defaults to the input file extension, or yaml when reading stdin
    #[arg(short, long)]
    pub format: Option<String>,

    /// Base path for AWS SSM Parameter Store parameters (env: HYDRATE_BASE_PATH)
    #[arg(short = 'p', long = "path", value_name = "BASE_PATH")]
    pub base_path: Option<String>,

    /// AWS region (defaults to $AWS_DEFAULT_REGION)
    #[arg(short, long)]
    pub region: Option<String>,

    /// Hydrate Kubernetes Secret/ConfigMap objects' data, stringData and binaryData fields
    #[arg(long)]
    pub k8s: bool,

    /// Print debug info to stderr
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_flag_set() {
        let cli = Cli::try_parse_from([
            "hydrate",
            "--format",
            "yml",
            "--path",
            "/app/sit1",
            "--region",
            "us-west-2",
            "--k8s",
            "--debug",
            "secret.yml",
        ])
        .unwrap();

        assert_eq!(cli.input, "secret.yml");
        assert_eq!(cli.format.as_deref(), Some("yml"));
        assert_eq!(cli.base_path.as_deref(), Some("/app/sit1"));
        assert_eq!(cli.region.as_deref(), Some("us-west-2"));
        assert!(cli.k8s);
        assert!(cli.debug);
    }

    #[test]
    fn test_parse_stdin_input() {
        let cli = Cli::try_parse_from(["hydrate", "--path=/prefix", "-"]).unwrap();
        assert_eq!(cli.input, "-");
        assert!(!cli.k8s);
        assert_eq!(cli.format, None);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["hydrate"]).is_err());
    }
}
