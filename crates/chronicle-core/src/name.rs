//! Application name normalization

use crate::types::ExecutionContext;

/// Convert an application name into its on-disk form.
///
/// Compiled programs keep the name verbatim. Interpreted programs get a
/// hyphen before every uppercase character except the first, and the
/// whole name lowercased: `HelloWorld` becomes `hello-world`.
pub fn normalize(raw_name: &str, context: ExecutionContext) -> String {
    match context {
        ExecutionContext::Compiled => raw_name.to_string(),
        ExecutionContext::Interpreted => kebab_case(raw_name),
    }
}

fn kebab_case(raw_name: &str) -> String {
    let mut out = String::with_capacity(raw_name.len() + 4);
    for (i, c) in raw_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
