//! GitHub Actions runner conventions: `INPUT_*` environment variables for
//! inputs, the `GITHUB_OUTPUT` file (or legacy `::set-output`) for outputs,
//! and `::error::` for the failure message.

use crate::domain::ports::{InputSource, OutputSink};
use crate::utils::error::{Result, StepError};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";

/// Snapshot of the runner environment.
#[derive(Debug, Clone, Default)]
pub struct ActionsEnv {
    vars: HashMap<String, String>,
}

impl ActionsEnv {
    pub fn from_env() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Pairs whose name or value is not valid UTF-8 are skipped.
    pub fn from_os_vars<T: IntoIterator<Item = (OsString, OsString)>>(vars: T) -> Self {
        Self {
            vars: vars
                .into_iter()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    pub fn from_vars<K, V, T>(vars: T) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        T: IntoIterator<Item = (K, V)>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn output_file(&self) -> Option<PathBuf> {
        self.vars
            .get(OUTPUT_FILE_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    }
}

/// `apigw-url` -> `INPUT_APIGW-URL`
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

impl InputSource for ActionsEnv {
    fn input(&self, name: &str) -> Option<String> {
        self.vars
            .get(&input_env_name(name))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// Writes workflow commands to `writer` and, when configured, outputs to the
/// `GITHUB_OUTPUT` file.
pub struct ActionsOutput<W: Write> {
    writer: W,
    output_file: Option<PathBuf>,
}

impl<W: Write> ActionsOutput<W> {
    pub fn new(writer: W, output_file: Option<PathBuf>) -> Self {
        Self {
            writer,
            output_file,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn issue_command(
        &mut self,
        command: &str,
        properties: &[(&str, &str)],
        message: &str,
    ) -> Result<()> {
        let mut line = format!("::{}", command);
        if !properties.is_empty() {
            let rendered: Vec<String> = properties
                .iter()
                .map(|(key, value)| format!("{}={}", key, escape_property(value)))
                .collect();
            line.push(' ');
            line.push_str(&rendered.join(","));
        }
        line.push_str("::");
        line.push_str(&escape_data(message));

        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputSink for ActionsOutput<W> {
    fn set_output(&mut self, name: &str, value: &serde_json::Value) -> Result<()> {
        let rendered = render_value(value)?;
        tracing::debug!("Setting output {}={}", name, rendered);

        match &self.output_file {
            Some(path) => append_to_output_file(path, name, &rendered),
            None => self.issue_command("set-output", &[("name", name)], &rendered),
        }
    }

    fn set_failed(&mut self, message: &str) -> Result<()> {
        self.issue_command("error", &[], message)
    }
}

/// Strings are written raw, `null` as empty, everything else as compact JSON.
pub fn render_value(value: &serde_json::Value) -> Result<String> {
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => serde_json::to_string(other)?,
    })
}

fn append_to_output_file(path: &Path, name: &str, value: &str) -> Result<()> {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(StepError::OutputError {
            message: format!("Output {} contains the heredoc delimiter", name),
        });
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)?;
    Ok(())
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_env_name() {
        assert_eq!(input_env_name("apigw-url"), "INPUT_APIGW-URL");
        assert_eq!(input_env_name("fail if not found"), "INPUT_FAIL_IF_NOT_FOUND");
    }

    #[test]
    fn test_inputs_are_trimmed_and_blank_is_absent() {
        let env = ActionsEnv::from_vars([
            ("INPUT_API-NAME", "  Swagger Petstore  "),
            ("INPUT_API-VERSION", "   "),
        ]);

        assert_eq!(env.input("api-name").as_deref(), Some("Swagger Petstore"));
        assert_eq!(env.input("api-version"), None);
        assert_eq!(env.input("apigw-url"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_variables_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let env = ActionsEnv::from_os_vars([
            (OsString::from("UNRELATED"), OsString::from_vec(b"f\xffo".to_vec())),
            (OsString::from_vec(b"BAD\xffNAME".to_vec()), OsString::from("x")),
            (OsString::from("INPUT_API-NAME"), OsString::from("Swagger Petstore")),
        ]);

        assert_eq!(env.input("api-name").as_deref(), Some("Swagger Petstore"));
        assert_eq!(env.vars.len(), 1);
    }

    #[test]
    fn test_output_file_from_env() {
        let env = ActionsEnv::from_vars([("GITHUB_OUTPUT", "/tmp/out")]);
        assert_eq!(env.output_file(), Some(PathBuf::from("/tmp/out")));
        assert_eq!(ActionsEnv::default().output_file(), None);
    }

    #[test]
    fn test_legacy_set_output_command() {
        let mut sink = ActionsOutput::new(Vec::new(), None);
        sink.set_output("api-name", &json!("Swagger Petstore")).unwrap();
        sink.set_output("api-is-active", &json!(true)).unwrap();
        sink.set_output("api-id", &json!("")).unwrap();

        let stdout = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(
            lines,
            vec![
                "::set-output name=api-name::Swagger Petstore",
                "::set-output name=api-is-active::true",
                "::set-output name=api-id::",
            ]
        );
    }

    #[test]
    fn test_error_command_escapes_message() {
        let mut sink = ActionsOutput::new(Vec::new(), None);
        sink.set_failed("100% broken\nsecond line").unwrap();

        let stdout = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(stdout.trim_end(), "::error::100%25 broken%0Asecond line");
    }

    #[test]
    fn test_property_escaping() {
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!(false)).unwrap(), "false");
        assert_eq!(render_value(&json!(null)).unwrap(), "");
        assert_eq!(render_value(&json!("REST")).unwrap(), "REST");
    }
}
