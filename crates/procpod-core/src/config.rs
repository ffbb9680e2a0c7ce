use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

/// Disposition of one standard stream of a launched process.
///
/// Forwarded verbatim to the launch facility. The group never reads or
/// buffers child output; whoever owns a pipe end is responsible for
/// draining it.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StdioSpec {
    /// Share the parent's stream (the platform default).
    #[default]
    Inherit,
    /// Connect the stream to the null device.
    Null,
    /// Create a pipe whose parent end lives on the process handle.
    Piped,
}

impl From<StdioSpec> for Stdio {
    fn from(spec: StdioSpec) -> Self {
        match spec {
            StdioSpec::Inherit => Stdio::inherit(),
            StdioSpec::Null => Stdio::null(),
            StdioSpec::Piped => Stdio::piped(),
        }
    }
}

/// Ready-to-launch command specification.
///
/// Everything except `program` is optional and is handed to the process
/// launch facility unchanged. The group applies no shell interpretation,
/// no PATH tricks, and no argument rewriting of its own.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into, strip_option))]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    /// Executable to launch, resolved through PATH unless absolute.
    pub program: String,

    /// Arguments passed to the program, in order.
    #[serde(default)]
    #[builder(default)]
    #[builder(setter(custom))]
    pub args: Vec<String>,

    /// Environment variables set for the child on top of the inherited
    /// (or cleared) environment.
    #[serde(default)]
    #[builder(default)]
    #[builder(setter(custom))]
    pub env: HashMap<String, String>,

    /// Start the child from an empty environment instead of inheriting
    /// the parent's.
    #[serde(default)]
    #[builder(default)]
    pub clear_env: bool,

    /// Working directory for the child.
    #[serde(default)]
    #[builder(default)]
    pub working_directory: Option<PathBuf>,

    /// Standard input disposition.
    #[serde(default)]
    #[builder(default)]
    pub stdin: StdioSpec,

    /// Standard output disposition.
    #[serde(default)]
    #[builder(default)]
    pub stdout: StdioSpec,

    /// Standard error disposition.
    #[serde(default)]
    #[builder(default)]
    pub stderr: StdioSpec,
}

impl CommandSpec {
    pub fn builder() -> CommandSpecBuilder {
        CommandSpecBuilder::default()
    }
}

impl CommandSpecBuilder {
    pub fn args<S: ToString, I: IntoIterator<Item = S>>(&mut self, iter: I) -> &mut Self {
        let args: Vec<String> = iter.into_iter().map(|s| s.to_string()).collect();
        self.args = Some(args);
        self
    }

    pub fn env<T: ToString>(&mut self, key: T, value: T) -> &mut Self {
        let map = self.env.get_or_insert_with(HashMap::new);
        map.insert(key.to_string(), value.to_string());
        self
    }

    pub fn env_multi<T: ToString, I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) -> &mut Self {
        let env = self.env.get_or_insert_with(HashMap::new);
        for (key, value) in iter {
            env.insert(key.to_string(), value.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_program_only() {
        let spec = CommandSpec::builder().program("sleep").build().unwrap();
        assert_eq!(spec.program, "sleep");
        assert!(spec.args.is_empty());
        assert!(spec.env.is_empty());
        assert!(!spec.clear_env);
        assert_eq!(spec.working_directory, None);
        assert_eq!(spec.stdin, StdioSpec::Inherit);
        assert_eq!(spec.stdout, StdioSpec::Inherit);
        assert_eq!(spec.stderr, StdioSpec::Inherit);
    }

    #[test]
    fn test_builder_requires_program() {
        let result = CommandSpec::builder().args(["-c", "exit 0"]).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_with_all_fields() {
        let spec = CommandSpec::builder()
            .program("sh")
            .args(["-c", "env"])
            .env("FIRST", "1")
            .env_multi([("SECOND", "2"), ("THIRD", "3")])
            .clear_env(true)
            .working_directory("/tmp")
            .stdin(StdioSpec::Null)
            .stdout(StdioSpec::Piped)
            .stderr(StdioSpec::Null)
            .build()
            .unwrap();

        assert_eq!(spec.args, vec!["-c", "env"]);
        assert_eq!(spec.env.len(), 3);
        assert_eq!(spec.env.get("SECOND"), Some(&"2".to_string()));
        assert!(spec.clear_env);
        assert_eq!(spec.working_directory, Some(PathBuf::from("/tmp")));
        assert_eq!(spec.stdout, StdioSpec::Piped);
    }

    #[test]
    fn test_env_accumulates_across_calls() {
        let spec = CommandSpec::builder()
            .program("env")
            .env("A", "1")
            .env("B", "2")
            .build()
            .unwrap();
        assert_eq!(spec.env.len(), 2);
    }

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec: CommandSpec = serde_json::from_str(r#"{"program": "sleep"}"#).unwrap();
        assert_eq!(spec.program, "sleep");
        assert!(spec.args.is_empty());
        assert_eq!(spec.stdout, StdioSpec::Inherit);
    }

    #[test]
    fn test_serialization_round_trip() {
        let spec = CommandSpec::builder()
            .program("sleep")
            .args(["5"])
            .working_directory("/var/tmp")
            .stderr(StdioSpec::Null)
            .build()
            .unwrap();

        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"workingDirectory\""));
        assert!(json.contains("\"null\""));

        let deserialized: CommandSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, deserialized);
    }
}
