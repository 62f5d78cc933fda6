//! Standard problem messages for resource operations.

use std::fmt::Display;

use aws_provider_names::ServiceNames;

use crate::diag::Diagnostic;

pub const ERR_ACTION_CREATING: &str = "creating";
pub const ERR_ACTION_READING: &str = "reading";
pub const ERR_ACTION_UPDATING: &str = "updating";
pub const ERR_ACTION_DELETING: &str = "deleting";

/// `"{action} {service} {resource} ({id}): {error}"`, with the service rendered
/// as its brand-prefixed human-friendly name.
pub fn problem_standard_message(
    names: &ServiceNames,
    service: &str,
    action: &str,
    resource: &str,
    id: &str,
    got_error: Option<&dyn Display>,
) -> String {
    let got = got_error.map(ToString::to_string);

    let human_friendly = match names.full_human_friendly(service) {
        Ok(name) => name,
        Err(err) => {
            return format!(
                "finding human-friendly name for service ({service}) while creating error ({action}, {resource}, {id}, {}): {err}",
                got.as_deref().unwrap_or("<nil>")
            );
        }
    };

    match got {
        Some(got) => format!("{action} {human_friendly} {resource} ({id}): {got}"),
        None => format!("{action} {human_friendly} {resource} ({id})"),
    }
}

/// Error diagnostic with the standard message as summary and the error itself
/// as detail.
pub fn problem_diagnostic(
    names: &ServiceNames,
    service: &str,
    action: &str,
    resource: &str,
    id: &str,
    err: &dyn Display,
) -> Diagnostic {
    Diagnostic::error(
        problem_standard_message(names, service, action, resource, id, Some(err)),
        err.to_string(),
    )
}
