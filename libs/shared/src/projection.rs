use crate::models::value::Variables;

/// Play variables exposed to AWX as template extra_vars.
pub const EXTRA_VAR_KEYS: [&str; 5] = [
    "k3s_context",
    "esphome_namespace",
    "esphome_deployment_name",
    "esphome_timeout",
    "esphome_no_logs",
];

const PATTERNS_SUFFIX: &str = "_patterns";
const SEGMENT_SEPARATOR: &str = " | ";

/// Copies the allow-listed variables, values untouched.
pub fn project_variables(variables: &Variables) -> Variables {
    EXTRA_VAR_KEYS
        .iter()
        .filter_map(|key| {
            variables
                .get(*key)
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}

/// Builds a template description from its name plus one `Patterns: ...`
/// segment per `*_patterns` list variable, in variable order.
pub fn build_description(name: &str, variables: &Variables) -> String {
    let mut segments = vec![name.to_string()];

    for (key, value) in variables {
        if !key.ends_with(PATTERNS_SUFFIX) {
            continue;
        }
        if let Some(patterns) = value.as_sequence() {
            let joined = patterns
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            segments.push(format!("Patterns: {}", joined));
        }
    }

    segments.join(SEGMENT_SEPARATOR)
}
