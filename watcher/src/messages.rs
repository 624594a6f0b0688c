//! MarkdownV2 notification texts. Literal markup characters in the fixed
//! parts are pre-escaped; anything coming from outside goes through
//! [`escape_markdown`].

use shared::escape_markdown;

use crate::error::CycleError;

/// Announce that `option` can be bought.
pub fn found(option: &str) -> String {
    format!(
        "🏎️💨 *F1 CAR IN STOCK AT MCDONALD'S\\!* 💨🏎️\n\n\
         The option \"*{}*\" is available\\.\n\n\
         Go get it on Rappi\\! 🏁",
        escape_markdown(option)
    )
}

/// Report a failed check so the operator can act (usually a stale token).
pub fn cycle_error(error: &CycleError) -> String {
    format!(
        "🚨 *F1 TRACKER ERROR* 🚨\n\n\
         The availability check could not be completed\\. The Rappi token may have expired\\.\n\n\
         *Error detail:*\n\
         `{}`",
        escape_markdown(&error.to_string())
    )
}
