use std::cell::RefCell;
use std::path::PathBuf;

use super::*;
use crate::foundation::error::CertigenError;
use crate::mail::channel::MailError;

struct FakeRenderer {
    rendered: RefCell<Vec<String>>,
    fail_for: Option<String>,
}

impl FakeRenderer {
    fn new() -> Self {
        Self {
            rendered: RefCell::new(Vec::new()),
            fail_for: None,
        }
    }

    fn failing_for(name: &str) -> Self {
        Self {
            rendered: RefCell::new(Vec::new()),
            fail_for: Some(name.to_owned()),
        }
    }
}

impl RenderRow for FakeRenderer {
    fn render(&self, row: &RosterRow) -> CertigenResult<PathBuf> {
        self.rendered.borrow_mut().push(row.name.clone());
        if self.fail_for.as_deref() == Some(row.name.as_str()) {
            return Err(CertigenError::render("simulated"));
        }
        Ok(PathBuf::from(format!("out/{}.png", row.name)))
    }
}

struct FakeChannel {
    sent: RefCell<Vec<OutgoingMail>>,
    fail_for: Option<String>,
}

impl FakeChannel {
    fn new() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_for: None,
        }
    }

    fn failing_for(email: &str) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_for: Some(email.to_owned()),
        }
    }
}

impl Delivery for FakeChannel {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        if self.fail_for.as_deref() == Some(mail.to.as_str()) {
            return Err(MailError::Transport("simulated auth failure".into()));
        }
        self.sent.borrow_mut().push(mail.clone());
        Ok(())
    }
}

fn roster(n: usize) -> Vec<RosterRow> {
    (0..n)
        .map(|i| RosterRow {
            name: format!("Person{i}"),
            institution: "ABC".into(),
            email: format!("p{i}@x.com"),
            roll_number: None,
        })
        .collect()
}

#[test]
fn every_row_is_rendered_and_delivered_once() {
    let rows = roster(3);
    let renderer = FakeRenderer::new();
    let channel = FakeChannel::new();

    let result = run_batch(
        &rows,
        &renderer,
        Some(&channel),
        &MessageTemplate::default(),
    )
    .unwrap();

    assert_eq!(result.success_count, 3);
    assert_eq!(renderer.rendered.borrow().len(), 3);
    assert_eq!(channel.sent.borrow().len(), 3);
    // Input order preserved.
    assert_eq!(renderer.rendered.borrow()[0], "Person0");
    assert_eq!(channel.sent.borrow()[2].to, "p2@x.com");
}

#[test]
fn delivery_failure_does_not_stop_the_batch() {
    let rows = roster(3);
    let renderer = FakeRenderer::new();
    let channel = FakeChannel::failing_for("p1@x.com");

    let result = run_batch(
        &rows,
        &renderer,
        Some(&channel),
        &MessageTemplate::default(),
    )
    .unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(renderer.rendered.borrow().len(), 3);
    assert_eq!(channel.sent.borrow().len(), 2);
}

#[test]
fn render_failure_skips_delivery_for_that_row_only() {
    let rows = roster(3);
    let renderer = FakeRenderer::failing_for("Person0");
    let channel = FakeChannel::new();

    let result = run_batch(
        &rows,
        &renderer,
        Some(&channel),
        &MessageTemplate::default(),
    )
    .unwrap();

    // The failed row still gets its render attempt, but no email.
    assert_eq!(renderer.rendered.borrow().len(), 3);
    assert_eq!(channel.sent.borrow().len(), 2);
    assert_eq!(result.success_count, 2);
    assert!(channel.sent.borrow().iter().all(|m| m.to != "p0@x.com"));
}

#[test]
fn render_only_mode_sends_nothing() {
    let rows = roster(2);
    let renderer = FakeRenderer::new();

    let result = run_batch(&rows, &renderer, None, &MessageTemplate::default()).unwrap();

    assert_eq!(result.success_count, 0);
    assert_eq!(renderer.rendered.borrow().len(), 2);
}

#[test]
fn invalid_roster_aborts_before_any_render() {
    let mut rows = roster(2);
    rows[1].email = rows[0].email.clone();
    let renderer = FakeRenderer::new();
    let channel = FakeChannel::new();

    let err = run_batch(
        &rows,
        &renderer,
        Some(&channel),
        &MessageTemplate::default(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("duplicate Email"));
    assert!(renderer.rendered.borrow().is_empty());
    assert!(channel.sent.borrow().is_empty());
}

#[test]
fn message_fields_use_the_template_and_row() {
    let rows = roster(1);
    let renderer = FakeRenderer::new();
    let channel = FakeChannel::new();

    run_batch(
        &rows,
        &renderer,
        Some(&channel),
        &MessageTemplate::default(),
    )
    .unwrap();

    let sent = channel.sent.borrow();
    assert_eq!(sent[0].subject, "Your Certificate of Achievement");
    assert!(sent[0].body.contains("Dear Person0,"));
    assert_eq!(sent[0].attachment, PathBuf::from("out/Person0.png"));
}

#[test]
fn empty_roster_is_a_successful_empty_batch() {
    let renderer = FakeRenderer::new();
    let result = run_batch(&[], &renderer, None, &MessageTemplate::default()).unwrap();
    assert_eq!(result, BatchResult { success_count: 0 });
}
