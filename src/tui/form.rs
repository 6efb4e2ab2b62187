//! Full-screen support ticket form
//!
//! Every keystroke becomes a `FieldUpdate` applied to the shared
//! `TicketForm`, so what is rendered is always a normalized snapshot. Submitting
//! runs the validation gate on the render path and hands the validated
//! snapshot to an async handler for delivery.

use std::path::Path;
use std::time::Duration;

use iocraft::prelude::*;

use crate::commands::SUCCESS_MESSAGE;
use crate::config::Config;
use crate::error::{Result, SupportError};
use crate::form::{PendingSubmission, SubmissionStatus, TicketForm};
use crate::submit::Submitter;
use crate::ticket::{Attachment, Field, FieldUpdate, TicketSubmission};
use crate::tui::components::{
    Footer, Select, TextField, Toast, cycle, form_shortcuts, render_toast, submitting_shortcuts,
};
use crate::tui::theme::theme;
use crate::types::{ContactMethod, IssueType};

/// Which input currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Email,
    Phone,
    FullName,
    IssueType,
    SubReason,
    OrderSuffix,
    Description,
    ContactMethod,
    Attachment,
}

impl FormField {
    /// Tab order
    pub const ALL: &'static [FormField] = &[
        FormField::Email,
        FormField::Phone,
        FormField::FullName,
        FormField::IssueType,
        FormField::SubReason,
        FormField::OrderSuffix,
        FormField::Description,
        FormField::ContactMethod,
        FormField::Attachment,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Sub-reason only exists for issue types that define reasons; the order
    /// reference disappears for issue types that never need one
    pub fn is_visible(self, snapshot: &TicketSubmission) -> bool {
        match self {
            FormField::SubReason => snapshot
                .issue_type()
                .is_some_and(|issue| issue.requires_sub_reason()),
            FormField::OrderSuffix => snapshot.order_reference_required(),
            _ => true,
        }
    }

    /// Next visible field (wrapping)
    pub fn next(self, snapshot: &TicketSubmission) -> Self {
        self.step(snapshot, 1)
    }

    /// Previous visible field (wrapping)
    pub fn prev(self, snapshot: &TicketSubmission) -> Self {
        self.step(snapshot, Self::ALL.len() - 1)
    }

    fn step(self, snapshot: &TicketSubmission, by: usize) -> Self {
        let len = Self::ALL.len();
        let mut index = self.position();
        for _ in 0..len {
            index = (index + by) % len;
            if Self::ALL[index].is_visible(snapshot) {
                return Self::ALL[index];
            }
        }
        self
    }

    /// The model field this input edits
    pub fn field(self) -> Field {
        match self {
            FormField::Email => Field::Email,
            FormField::Phone => Field::Phone,
            FormField::FullName => Field::FullName,
            FormField::IssueType => Field::IssueType,
            FormField::SubReason => Field::SubReason,
            FormField::OrderSuffix => Field::OrderReference,
            FormField::Description => Field::Description,
            FormField::ContactMethod => Field::ContactMethod,
            FormField::Attachment => Field::Attachment,
        }
    }
}

impl From<Field> for FormField {
    fn from(field: Field) -> Self {
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.field() == field)
            .unwrap_or_default()
    }
}

/// Apply a typing key to a text value; `None` if the key does not edit text
fn edit_text(current: &str, code: KeyCode, multiline: bool) -> Option<String> {
    let mut value = current.to_string();
    match code {
        KeyCode::Char(c) => value.push(c),
        KeyCode::Backspace => {
            value.pop()?;
        }
        KeyCode::Enter if multiline => value.push('\n'),
        _ => return None,
    }
    Some(value)
}

/// Direction for a select key: `Some(true)` forward, `Some(false)` back
fn select_direction(code: KeyCode) -> Option<bool> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(false),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter | KeyCode::Char(' ') => Some(true),
        _ => None,
    }
}

/// Translate a key press on `field` into a model update.
///
/// The attachment path is plain text held by the view and loaded on submit,
/// so it never produces an update here.
pub fn key_update(field: FormField, snapshot: &TicketSubmission, code: KeyCode) -> Option<FieldUpdate> {
    match field {
        FormField::Email => edit_text(snapshot.email(), code, false).map(FieldUpdate::Email),
        FormField::Phone => edit_text(snapshot.phone(), code, false).map(FieldUpdate::Phone),
        FormField::FullName => {
            edit_text(snapshot.full_name(), code, false).map(FieldUpdate::FullName)
        }
        FormField::OrderSuffix => edit_text(snapshot.order_reference().suffix(), code, false)
            .map(FieldUpdate::OrderSuffix),
        FormField::Description => {
            edit_text(snapshot.description(), code, true).map(FieldUpdate::Description)
        }
        FormField::IssueType => select_direction(code).map(|forward| {
            FieldUpdate::IssueType(cycle(IssueType::ALL, snapshot.issue_type(), forward))
        }),
        FormField::SubReason => select_direction(code).map(|forward| {
            FieldUpdate::SubReason(cycle(
                snapshot.sub_reason_options(),
                snapshot.sub_reason(),
                forward,
            ))
        }),
        FormField::ContactMethod => select_direction(code).map(|forward| {
            FieldUpdate::ContactMethod(cycle(
                ContactMethod::ALL,
                snapshot.preferred_contact_method(),
                forward,
            ))
        }),
        FormField::Attachment => None,
    }
}

/// Read the attachment named by the path input, if any
fn load_attachment(path: &str, max_bytes: u64) -> Result<Option<Attachment>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    Attachment::from_path(Path::new(path), max_bytes).map(Some)
}

/// Props for the SupportForm component
#[derive(Default, Props)]
pub struct SupportFormProps {
    pub config: Config,
    /// `--endpoint` override
    pub endpoint: Option<String>,
}

#[component]
pub fn SupportForm<'a>(props: &SupportFormProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let theme = theme();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let mut form = hooks.use_state(|| {
        TicketForm::new(
            props.config.order_prefix.clone(),
            props.config.attachment.clone(),
        )
    });
    let mut focused = hooks.use_state(FormField::default);
    let mut attachment_path = hooks.use_state(String::new);
    let mut toast: State<Option<Toast>> = hooks.use_state(|| None);
    let mut should_submit = hooks.use_state(|| false);
    let mut should_exit = hooks.use_state(|| false);

    // Drop expired toasts
    hooks.use_future(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(250)).await;
            let expired = toast.read().as_ref().is_some_and(Toast::is_expired);
            if expired {
                toast.set(None);
            }
        }
    });

    let submit_handler: Handler<PendingSubmission> = hooks.use_async_handler({
        let config = props.config.clone();
        let endpoint = props.endpoint.clone();

        move |pending: PendingSubmission| {
            let mut form = form;
            let mut toast = toast;
            let mut attachment_path = attachment_path;
            let config = config.clone();
            let endpoint = endpoint.clone();

            async move {
                let outcome = match Submitter::from_config(&config, endpoint.as_deref()) {
                    Ok(submitter) => submitter.deliver(pending).await,
                    Err(e) => Err(e),
                };

                let finished = form.write().finish(outcome);
                match finished {
                    Ok(_) => {
                        attachment_path.set(String::new());
                        toast.set(Some(Toast::success(SUCCESS_MESSAGE)));
                    }
                    Err(e) => toast.set(Some(Toast::error(e.to_string()))),
                }
            }
        }
    });

    // Handle submit request
    if should_submit.get() {
        should_submit.set(false);

        if !form.read().status().is_busy() {
            let max_bytes = form.read().policy().max_bytes;
            match load_attachment(&attachment_path.to_string(), max_bytes) {
                Err(e) => {
                    focused.set(FormField::Attachment);
                    toast.set(Some(Toast::error(format!("Could not read attachment: {e}"))));
                }
                Ok(attachment) => {
                    let begun = {
                        let mut current = form.write();
                        current
                            .update(FieldUpdate::Attachment(attachment))
                            .and_then(|_| current.begin_submit())
                    };
                    match begun {
                        Ok(pending) => {
                            toast.set(None);
                            submit_handler(pending);
                        }
                        Err(SupportError::Validation(error)) => {
                            focused.set(FormField::from(error.field));
                        }
                        Err(e) => toast.set(Some(Toast::error(e.to_string()))),
                    }
                }
            }
        }
    }

    // Keep focus on something that is rendered
    {
        let current = form.read();
        if !focused.get().is_visible(current.snapshot()) {
            focused.set(FormField::IssueType);
        }
    }

    // Keyboard handling
    hooks.use_terminal_events({
        move |event| {
            if let TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            {
                if kind == KeyEventKind::Release {
                    return;
                }

                if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('s') {
                    should_submit.set(true);
                    return;
                }

                match code {
                    KeyCode::Esc => {
                        should_exit.set(true);
                        return;
                    }
                    KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => {
                        let prev = focused.get().prev(form.read().snapshot());
                        focused.set(prev);
                        return;
                    }
                    KeyCode::Tab => {
                        let next = focused.get().next(form.read().snapshot());
                        focused.set(next);
                        return;
                    }
                    KeyCode::BackTab => {
                        let prev = focused.get().prev(form.read().snapshot());
                        focused.set(prev);
                        return;
                    }
                    _ => {}
                }

                if form.read().status().is_busy() {
                    return;
                }

                let field = focused.get();
                if field == FormField::Attachment {
                    if let Some(path) = edit_text(&attachment_path.to_string(), code, false) {
                        attachment_path.set(path);
                    }
                    return;
                }

                let update = key_update(field, form.read().snapshot(), code);
                if let Some(update) = update {
                    let applied = form.write().update(update);
                    if let Err(e) = applied {
                        toast.set(Some(Toast::error(e.to_string())));
                    }
                }
            }
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let current = form.read();
    let snapshot = current.snapshot();
    let status = current.status().clone();
    let focus = focused.get();
    let error_for = |field: FormField| {
        current
            .field_error()
            .filter(|e| e.field == field.field())
            .map(|e| e.message.clone())
    };

    let status_text = match &status {
        SubmissionStatus::Idle => String::new(),
        SubmissionStatus::Submitting => "Submitting...".to_string(),
        SubmissionStatus::Succeeded => "Submitted".to_string(),
        SubmissionStatus::Failed(_) => "Not submitted".to_string(),
    };
    let shortcuts = if status.is_busy() {
        submitting_shortcuts()
    } else {
        form_shortcuts()
    };

    let sub_reason_visible = FormField::SubReason.is_visible(snapshot);
    let order_visible = FormField::OrderSuffix.is_visible(snapshot);
    let order_prefix = snapshot.order_reference().prefix().to_string();

    element! {
        View(
            width: 100pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            // Header
            View(
                width: 100pct,
                height: 1,
                flex_shrink: 0.0,
                padding_left: 1,
                padding_right: 1,
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                background_color: theme.border,
            ) {
                Text(content: "Customer Support", color: theme.text, weight: Weight::Bold)
                Text(content: status_text, color: theme.status_color(&status))
            }

            // Fields
            View(
                flex_grow: 1.0,
                width: 100pct,
                padding: 1,
                flex_direction: FlexDirection::Column,
                gap: 1,
                overflow: Overflow::Hidden,
            ) {
                View(flex_direction: FlexDirection::Row, gap: 2, width: 100pct) {
                    View(width: 50pct) {
                        TextField(
                            label: "Email ID",
                            value: snapshot.email().to_string(),
                            placeholder: Some("you@example.com"),
                            has_focus: focus == FormField::Email,
                            required: true,
                            error: error_for(FormField::Email),
                        )
                    }
                    View(width: 50pct) {
                        TextField(
                            label: "Contact Number",
                            value: snapshot.phone().to_string(),
                            placeholder: Some("10 digits"),
                            has_focus: focus == FormField::Phone,
                            required: true,
                            error: error_for(FormField::Phone),
                        )
                    }
                }

                TextField(
                    label: "Full Name",
                    value: snapshot.full_name().to_string(),
                    has_focus: focus == FormField::FullName,
                    error: error_for(FormField::FullName),
                )

                View(flex_direction: FlexDirection::Column) {
                    Select(
                        label: Some("Issue Type"),
                        value: snapshot.issue_type().map(|i| i.label().to_string()),
                        has_focus: focus == FormField::IssueType,
                        required: true,
                    )
                    #(error_for(FormField::IssueType).map(|message| element! {
                        Text(content: message, color: theme.field_error)
                    }))
                }

                #(sub_reason_visible.then(|| element! {
                    View(flex_direction: FlexDirection::Column) {
                        Select(
                            label: Some("Reason"),
                            value: snapshot.sub_reason().map(|r| r.label().to_string()),
                            has_focus: focus == FormField::SubReason,
                            required: true,
                        )
                        #(error_for(FormField::SubReason).map(|message| element! {
                            Text(content: message, color: theme.field_error)
                        }))
                    }
                }))

                #(order_visible.then(|| element! {
                    TextField(
                        label: "Order ID",
                        value: snapshot.order_reference().suffix().to_string(),
                        prefix: Some(order_prefix.clone()),
                        has_focus: focus == FormField::OrderSuffix,
                        required: true,
                        error: error_for(FormField::OrderSuffix),
                    )
                }))

                TextField(
                    label: "Description",
                    value: snapshot.description().to_string(),
                    placeholder: Some("Tell us what happened"),
                    has_focus: focus == FormField::Description,
                    required: true,
                    error: error_for(FormField::Description),
                    multiline: true,
                )

                Select(
                    label: Some("Preferred Contact Method"),
                    value: snapshot.preferred_contact_method().map(|m| m.label().to_string()),
                    has_focus: focus == FormField::ContactMethod,
                )

                TextField(
                    label: "Attachment",
                    value: attachment_path.to_string(),
                    placeholder: Some("Path to an image or document (optional)"),
                    has_focus: focus == FormField::Attachment,
                    error: error_for(FormField::Attachment),
                )
            }

            #(render_toast(&toast.read()))

            Footer(shortcuts: shortcuts)
        }
    }
}
