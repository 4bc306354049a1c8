//! `${VAR}` expansion in configuration values.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` in `value`.
///
/// Unset variables without a default fail with [`ConfigError::EnvVar`]
/// naming `field`. Values with no `${` are copied as-is, which leaves bare
/// `$VAR` and command placeholders such as `{version}` alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| std::env::var(name).map(Some).map_err(|_| name.to_owned());
    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(Cow::into_owned(expanded)),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause),
        }),
    }
}

/// Expand each argument of an argv list. Errors name the argument as `field[i]`.
pub(crate) fn expand_args(args: &[String], field: &str) -> Result<Vec<String>, ConfigError> {
    let mut expanded = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        expanded.push(expand_env(arg, &format!("{field}[{i}]"))?);
    }
    Ok(expanded)
}
