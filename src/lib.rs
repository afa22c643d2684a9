//! Certigen bulk-generates personalized certificate images and emails each one
//! to its recipient.
//!
//! The pipeline turns one roster row into one delivered artifact:
//!
//! 1. **Load**: roster CSV -> `Vec<RosterRow>`; template + fonts are loaded once
//!    per batch into a [`CertificateRenderer`].
//! 2. **Render**: `RosterRow -> CertificateArtifact` (template + centered text,
//!    optional QR payload, one PNG per recipient).
//! 3. **Deliver**: artifact attached to a plain-text email and sent over an
//!    authenticated implicit-TLS SMTP session.
//! 4. **Aggregate**: the orchestrator walks the roster in input order and
//!    returns a [`BatchResult`] success count.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic rendering**: the same row and config produce the same
//!   artifact bytes.
//! - **Batch-constant IO is front-loaded**: template and fonts are read at
//!   renderer construction; a missing font or template fails the whole batch
//!   before any row is processed.
//! - **Row failures are isolated**: a render or delivery failure is logged and
//!   counted, never allowed to abort the remaining rows.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod config;
mod foundation;
mod mail;
mod qr;
mod render;
mod roster;
mod text;

pub use batch::orchestrator::{BatchResult, run_batch};
pub use config::model::{FontSpec, HAlign, MessageTemplate, RenderConfig, SmtpConfig};
pub use foundation::error::{CertigenError, CertigenResult};
pub use mail::channel::{Delivery, MailError, OutgoingMail, SmtpChannel};
pub use qr::encode::{QR_SIZE_PX, encode_qr, qr_origin, qr_payload};
pub use render::certificate::{CertificateRenderer, RenderRow, artifact_file_name};
pub use roster::model::{RosterRow, load_roster, validate_roster};
pub use text::placement::{LoadedFont, draw_text, placement_origin, system_font_path};
