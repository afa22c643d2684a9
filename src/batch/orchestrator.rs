use crate::config::model::MessageTemplate;
use crate::foundation::error::CertigenResult;
use crate::mail::channel::{Delivery, OutgoingMail};
use crate::render::certificate::RenderRow;
use crate::roster::model::{RosterRow, validate_roster};

/// Aggregate outcome of one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Rows whose delivery was acknowledged by the relay.
    pub success_count: usize,
}

/// Process a roster sequentially: render each row, then deliver the artifact.
///
/// Rows are processed in input order, one fully rendered and sent (or failed)
/// before the next begins. Each row is a failure boundary: a render or
/// delivery error is logged and counted against the row, never allowed to
/// stop the remaining rows. `success_count` increments only on an
/// acknowledged delivery.
///
/// With `channel: None` the batch renders artifacts without sending anything
/// (and `success_count` stays zero).
///
/// The roster is validated up front; a blank name/email or duplicate address
/// aborts before any row is rendered.
#[tracing::instrument(skip_all, fields(rows = roster.len()))]
pub fn run_batch(
    roster: &[RosterRow],
    renderer: &dyn RenderRow,
    channel: Option<&dyn Delivery>,
    message: &MessageTemplate,
) -> CertigenResult<BatchResult> {
    validate_roster(roster)?;

    let mut success_count = 0usize;
    for row in roster {
        let artifact = match renderer.render(row) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(recipient = %row.email, error = %e, "render failed, skipping row");
                continue;
            }
        };

        let Some(channel) = channel else {
            continue;
        };

        let mail = OutgoingMail {
            to: row.email.clone(),
            subject: message.subject.clone(),
            body: message.body_for(&row.name),
            attachment: artifact,
        };
        match channel.send(&mail) {
            Ok(()) => success_count += 1,
            Err(e) => {
                tracing::warn!(recipient = %row.email, error = %e, "delivery failed");
            }
        }
    }

    tracing::info!(success_count, rows = roster.len(), "batch complete");
    Ok(BatchResult { success_count })
}

#[cfg(test)]
#[path = "../../tests/unit/batch/orchestrator.rs"]
mod tests;
