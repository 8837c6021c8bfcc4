//! Form application state and key handling

use crate::input::{self, Edit};
use crate::keymap::KeyMap;
use crossterm::event::{KeyCode, KeyModifiers};
use resume::{FormCollector, FormError, FormField, ResumeRenderer};
use std::path::PathBuf;

/// Something that can hold the focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FormField),
    AddEducation,
    Generate,
}

/// Tab order
pub const FOCUS_ORDER: [Focus; 12] = [
    Focus::Field(FormField::Name),
    Focus::Field(FormField::Email),
    Focus::Field(FormField::Phone),
    Focus::Field(FormField::Summary),
    Focus::Field(FormField::Degree),
    Focus::Field(FormField::Institution),
    Focus::Field(FormField::Year),
    Focus::Field(FormField::Percentage),
    Focus::AddEducation,
    Focus::Field(FormField::Experience),
    Focus::Field(FormField::Skills),
    Focus::Generate,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub kind: ModalKind,
    pub title: String,
    pub message: String,
}

impl Modal {
    fn new(kind: ModalKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct App {
    pub form: FormCollector,
    focus: usize,
    cursors: [usize; FormField::ALL.len()],
    modal: Option<Modal>,
    status: Option<String>,
    renderer: ResumeRenderer,
    output: PathBuf,
    clear_after_render: bool,
    should_quit: bool,
}

impl App {
    pub fn new(renderer: ResumeRenderer, output: impl Into<PathBuf>) -> Self {
        Self {
            form: FormCollector::new(),
            focus: 0,
            cursors: [0; FormField::ALL.len()],
            modal: None,
            status: None,
            renderer,
            output: output.into(),
            clear_after_render: false,
            should_quit: false,
        }
    }

    pub fn with_clear_after_render(mut self, clear: bool) -> Self {
        self.clear_after_render = clear;
        self
    }

    pub fn focus(&self) -> Focus {
        FOCUS_ORDER[self.focus]
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if let Some(index) = FOCUS_ORDER.iter().position(|f| *f == focus) {
            self.focus = index;
        }
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn output(&self) -> &PathBuf {
        &self.output
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn field_index(field: FormField) -> usize {
        FormField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default()
    }

    /// Cursor of a field as a char index
    pub fn cursor(&self, field: FormField) -> usize {
        self.cursors[Self::field_index(field)]
    }

    fn focused_field(&self) -> Option<FormField> {
        match self.focus() {
            Focus::Field(field) => Some(field),
            _ => None,
        }
    }

    fn next_focus(&mut self) {
        self.focus = (self.focus + 1) % FOCUS_ORDER.len();
    }

    fn prev_focus(&mut self) {
        self.focus = (self.focus + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        // A dialog swallows everything but its own dismiss keys
        if self.modal.is_some() {
            if KeyMap::is_dismiss(code) {
                self.modal = None;
            }
            return;
        }

        if KeyMap::is_quit(code, modifiers) {
            self.should_quit = true;
            return;
        }
        if KeyMap::is_add_education(code, modifiers) {
            self.add_education();
            return;
        }
        if KeyMap::is_generate(code, modifiers) {
            self.generate();
            return;
        }
        if KeyMap::is_clear_education(code, modifiers) {
            self.clear_education();
            return;
        }

        let multiline = self.focused_field().is_some_and(FormField::is_multiline);
        if KeyMap::is_next(code, multiline) {
            self.next_focus();
            return;
        }
        if KeyMap::is_prev(code, multiline) {
            self.prev_focus();
            return;
        }

        match self.focus() {
            Focus::Field(field) => {
                if let Some(edit) = KeyMap::edit(code, modifiers, multiline) {
                    self.edit(field, edit);
                } else if code == KeyCode::Enter {
                    self.next_focus();
                }
            }
            Focus::AddEducation if KeyMap::is_press(code) => self.add_education(),
            Focus::Generate if KeyMap::is_press(code) => self.generate(),
            _ => {}
        }
    }

    fn edit(&mut self, field: FormField, edit: Edit) {
        let index = Self::field_index(field);
        input::apply(self.form.fields.get_mut(field), &mut self.cursors[index], edit);
    }

    /// "Add Education" action
    pub fn add_education(&mut self) {
        match self.form.add_education_row() {
            Ok(row) => {
                for field in FormField::EDUCATION {
                    self.cursors[Self::field_index(field)] = 0;
                }
                self.modal = Some(Modal::new(
                    ModalKind::Info,
                    "Added",
                    format!(
                        "Added: {}, {}, {}, {}",
                        row.degree, row.institution, row.year, row.percentage
                    ),
                ));
            }
            Err(FormError::MissingEducationField(field)) => {
                tracing::warn!(%field, "education row incomplete");
                self.modal = Some(Modal::new(
                    ModalKind::Warning,
                    "Missing Data",
                    "Please fill all education fields before adding.",
                ));
            }
        }
    }

    pub fn clear_education(&mut self) {
        let count = self.form.education().len();
        self.form.clear_education();
        self.status = Some(format!("Cleared {count} education row(s)"));
    }

    /// "Generate Resume" action
    pub fn generate(&mut self) {
        let submission = self.form.submit();

        self.status = if submission.skipped_lines.is_empty() {
            None
        } else {
            let lines: Vec<String> = submission
                .skipped_lines
                .iter()
                .map(|l| l.line_number.to_string())
                .collect();
            Some(format!(
                "Skipped experience line(s) {}: expected Role,Company,Duration,Points",
                lines.join(", ")
            ))
        };

        match self.renderer.render(&submission.record, &self.output) {
            Ok(path) => {
                if self.clear_after_render {
                    self.form.clear_education();
                }
                self.modal = Some(Modal::new(
                    ModalKind::Info,
                    "Success",
                    format!("Resume saved as {}", path.display()),
                ));
            }
            Err(err) => {
                tracing::error!(error = %err, path = %self.output.display(), "render failed");
                self.modal = Some(Modal::new(
                    ModalKind::Error,
                    "Render failed",
                    err.to_string(),
                ));
            }
        }
    }
}
