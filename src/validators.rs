//! Positional argument validation for firewall commands
//!
//! Validation is purely syntactic. Whether a service exists, or whether a
//! port, protocol or expiry is legal, is decided by the control-plane API.

use crate::core::error::UsageError;

/// Index of the numeric service id
pub const SERVICE_ID: usize = 1;
/// Index of the action token
pub const ACTION: usize = 2;
/// Exact number of positional arguments a firewall command takes
pub const EXPECTED_ARGS: usize = 3;

/// Validates the positional arguments of a firewall command.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. at least one argument
/// 2. exactly three arguments
/// 3. the service id parses as an integer
/// 4. the action does NOT parse as an integer (catches a missing action)
///
/// # Examples
///
/// ```
/// use fwctl::validators::validate_args;
///
/// let ok: Vec<String> = ["server", "15", "on"].iter().map(|s| s.to_string()).collect();
/// assert!(validate_args(&ok).is_ok());
///
/// let numeric_action: Vec<String> = ["0", "42", "7"].iter().map(|s| s.to_string()).collect();
/// assert!(validate_args(&numeric_action).is_err());
/// ```
///
/// # Errors
///
/// Returns the [`UsageError`] for the first failing check.
pub fn validate_args(args: &[String]) -> Result<(), UsageError> {
    if args.is_empty() {
        return Err(UsageError::MissingArguments);
    }

    if args.len() != EXPECTED_ARGS {
        return Err(UsageError::WrongArity { found: args.len() });
    }

    if !is_integer(&args[SERVICE_ID]) {
        return Err(UsageError::InvalidServiceId(args[SERVICE_ID].clone()));
    }

    if is_integer(&args[ACTION]) {
        return Err(UsageError::NumericAction(args[ACTION].clone()));
    }

    Ok(())
}

/// Accepts an optional sign followed by digits, within `i64` range.
fn is_integer(token: &str) -> bool {
    token.parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_args_rejected() {
        assert_eq!(validate_args(&[]), Err(UsageError::MissingArguments));
    }

    #[test]
    fn test_too_few_args_rejected() {
        assert_eq!(
            validate_args(&args(&["server", "15"])),
            Err(UsageError::WrongArity { found: 2 })
        );
    }

    #[test]
    fn test_extra_arg_rejected() {
        assert_eq!(
            validate_args(&args(&["0", "15", "add", "extra"])),
            Err(UsageError::WrongArity { found: 4 })
        );
    }

    #[test]
    fn test_non_numeric_service_id_rejected() {
        assert_eq!(
            validate_args(&args(&["server", "web01", "on"])),
            Err(UsageError::InvalidServiceId("web01".to_string()))
        );
    }

    #[test]
    fn test_numeric_action_rejected() {
        assert_eq!(
            validate_args(&args(&["0", "42", "7"])),
            Err(UsageError::NumericAction("7".to_string()))
        );
    }

    #[test]
    fn test_service_id_checked_before_action() {
        // Both checks would fail; the service id check runs first
        assert_eq!(
            validate_args(&args(&["0", "abc", "7"])),
            Err(UsageError::InvalidServiceId("abc".to_string()))
        );
    }

    #[test]
    fn test_signed_service_ids_accepted() {
        assert!(validate_args(&args(&["server", "+15", "status"])).is_ok());
        assert!(validate_args(&args(&["server", "-15", "status"])).is_ok());
    }

    #[test]
    fn test_out_of_range_service_id_rejected() {
        assert!(validate_args(&args(&["server", "99999999999999999999", "on"])).is_err());
    }

    #[test]
    fn test_unknown_action_passes_validation() {
        // Unknown actions are rejected by dispatch, not here
        assert!(validate_args(&args(&["server", "15", "restart"])).is_ok());
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert!(validate_args(&args(&["server", " 15", "on"])).is_err());
    }
}
