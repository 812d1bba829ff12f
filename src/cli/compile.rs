//! Compile CQL queries into query fragments

use super::CliError;
use crate::output::{FragmentPrinter, OutputFormat};
use crate::{CompilerConfig, ResultShape, parse};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The CQL query to compile
    pub query: String,
    /// Result shape; the config's default when absent
    pub shape: Option<ResultShape>,
    /// Extra condition ANDed into every fragment
    pub filter: Option<String>,
    pub format: OutputFormat,
}

/// Execute a cql compile operation, returning the rendered fragments
pub fn execute_compile(
    options: &CompileOptions,
    config: &CompilerConfig,
) -> Result<String, CliError> {
    let query = parse(options.query.trim())?;
    let shape = options.shape.unwrap_or(config.default_shape);
    let fragments = config
        .codegen()
        .compile(&query, shape, options.filter.as_deref());
    Ok(FragmentPrinter::new(options.format).print(&fragments)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_config_default_shape() {
        let config = CompilerConfig {
            default_shape: ResultShape::DistinctWork,
            ..CompilerConfig::default()
        };
        let options = CompileOptions {
            query: "spe(a)".into(),
            ..CompileOptions::default()
        };
        let out = execute_compile(&options, &config).unwrap();
        assert!(out.starts_with("select distinct work from Work work, WorkPart workPart, Word w0"));
    }

    #[test]
    fn test_one_line_per_phrase() {
        let options = CompileOptions {
            query: "a|b|c".into(),
            shape: Some(ResultShape::WordId),
            ..CompileOptions::default()
        };
        let out = execute_compile(&options, &CompilerConfig::default()).unwrap();
        assert_eq!(out.lines().count(), 3);
    }
}
