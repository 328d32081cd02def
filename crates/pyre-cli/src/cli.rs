use clap::Parser;
use std::path::PathBuf;

/// `pyre <options-token> <artifact-path> <entry-point-id> [forwarded-arg ...]`
///
/// Strictly positional; supplying fewer than three arguments is a fatal
/// usage error, reported before anything is scheduled for deletion.
#[derive(Parser)]
#[command(
    name = "pyre",
    version,
    about = "Run an entry point out of a short-lived artifact, then delete the artifact"
)]
pub struct Cli {
    /// Opaque options token; containing the substring "-debug " (trailing
    /// space included) enables diagnostic output on stderr
    #[arg(allow_hyphen_values = true)]
    pub options: String,

    /// Loadable artifact (native dynamic library); deleted after the run
    pub artifact: PathBuf,

    /// Namespace-qualified entry point id resolved inside the artifact
    pub entry_point: String,

    /// Arguments forwarded verbatim to the entry point
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub forwarded: Vec<String>,
}

impl Cli {
    pub fn into_request(self) -> pyre_core::RunRequest {
        pyre_core::RunRequest {
            options: self.options,
            artifact: self.artifact,
            entry_point: self.entry_point,
            forwarded: self.forwarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_contract_parses_in_order() {
        let cli = Cli::try_parse_from([
            "pyre",
            "run -debug now",
            "/tmp/payload.so",
            "demo.tool",
            "a",
            "-b",
            "--see",
        ])
        .unwrap();
        let request = cli.into_request();

        assert!(request.debug_enabled());
        assert_eq!(request.artifact, PathBuf::from("/tmp/payload.so"));
        assert_eq!(request.entry_point, "demo.tool");
        assert_eq!(request.forwarded, ["a", "-b", "--see"]);
    }

    #[test]
    fn fewer_than_three_arguments_is_rejected() {
        assert!(Cli::try_parse_from(["pyre", "opts", "/tmp/payload.so"]).is_err());
    }

    #[test]
    fn options_token_may_lead_with_a_hyphen() {
        let cli = Cli::try_parse_from(["pyre", "-debug ", "payload.so", "demo.tool"]).unwrap();
        assert!(cli.into_request().debug_enabled());
    }
}
