//! Action dispatch: one validated invocation, one remote call, one render.
//!
//! Each [`Action`] maps to exactly one [`FirewallApi`] operation. The
//! response goes to the [`Presenter`] unchanged; a rejected request is
//! rendered like any other result and is not an error here.
//!
//! | action   | remote call                     | presenter            |
//! |----------|---------------------------------|----------------------|
//! | `on/off` | `change_status`                 | `message(Outcome)`   |
//! | `add`    | `add_rule`                      | `message(Outcome)`   |
//! | `edit`   | `edit_rule` (rule + position)   | `message(Outcome)`   |
//! | `del`    | `remove_rule`                   | `message(Outcome)`   |
//! | `status` | `firewall_status`               | `status`             |
//! | `rules`  | `firewall_rules`                | `rules` (+ "No rules found.") |

use crate::command::{Action, Invocation};
use crate::core::api::FirewallApi;
use crate::core::error::{Result, UsageError};
use crate::core::firewall::FirewallSwitch;
use crate::output::{FirewallMessage, Presenter};
use tracing::{debug, info};

/// Text shown before an empty rule listing
pub const NO_RULES_MESSAGE: &str = "No rules found.";

/// Runs a validated invocation against the API and presents the result.
///
/// # Errors
///
/// - `Error::Usage(UsageError::UnknownAction)` for an action outside the
///   known set; no request is made
/// - Transport errors from `api`
/// - `Error::Io` if the presenter cannot write
pub async fn dispatch<A, P>(invocation: &Invocation, api: &A, presenter: &mut P) -> Result<()>
where
    A: FirewallApi,
    P: Presenter,
{
    let service_id = invocation.service_id.as_str();
    let scope = invocation.product_scope.as_str();
    let flags = &invocation.flags;

    debug!(
        action = invocation.action.as_str(),
        service_id, scope, "Dispatching firewall action"
    );

    match &invocation.action {
        Action::On | Action::Off => {
            let switch = if invocation.action == Action::On {
                FirewallSwitch::On
            } else {
                FirewallSwitch::Off
            };
            let result = api.change_status(service_id, switch, scope).await?;
            info!(service_id, %switch, success = result.success, "Firewall status change");
            presenter.message(&result.into())?;
        }
        Action::Add => {
            let rule = flags.to_rule();
            let result = api.add_rule(service_id, &rule, scope).await?;
            info!(service_id, direction = %rule.direction, success = result.success, "Rule added");
            presenter.message(&result.into())?;
        }
        Action::Edit => {
            let rule = flags.to_positioned_rule();
            let result = api.edit_rule(service_id, &rule, scope).await?;
            info!(service_id, position = ?rule.position, success = result.success, "Rule edited");
            presenter.message(&result.into())?;
        }
        Action::Del => {
            let position = flags.position();
            let result = api
                .remove_rule(service_id, position.as_deref(), scope)
                .await?;
            info!(service_id, ?position, success = result.success, "Rule removed");
            presenter.message(&result.into())?;
        }
        Action::Status => {
            let status = api.firewall_status(service_id, scope).await?;
            presenter.status(&status)?;
        }
        Action::Rules => {
            let rules = api.firewall_rules(service_id, scope).await?;
            if rules.is_empty() {
                presenter.message(&FirewallMessage::text(NO_RULES_MESSAGE))?;
            }
            presenter.rules(&rules)?;
        }
        Action::Unknown(token) => {
            debug!(token = token.as_str(), "Unknown firewall action");
            return Err(UsageError::UnknownAction(token.clone()).into());
        }
    }

    Ok(())
}
