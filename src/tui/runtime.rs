//! Calculator application state for the TUI.

use crate::config::CalculatorConfig;
use crate::form::{Field, FormState};
use crate::projection::{ProjectionResult, Summary, project, round2};

/// Text being typed into the selected field.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    pub field: Field,
    pub text: String,
}

/// TUI application state.
///
/// The projection is recomputed from scratch on every committed edit.
pub struct App {
    /// Current form values, always synced.
    pub form: FormState,
    /// Projection for the current form.
    pub result: ProjectionResult,
    /// Summary for `result`.
    pub summary: Summary,
    /// Index into [`Field::ALL`] of the highlighted field.
    pub selected: usize,
    /// Active edit, if the user is typing.
    pub editing: Option<EditBuffer>,
    /// Latest advisory text shown in the status line.
    pub status: Option<String>,
    /// Currency symbol for money values.
    pub currency: String,
    /// Name of the active preset.
    pub preset_name: String,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Configuration the form was loaded from (kept for reset).
    config: CalculatorConfig,
}

impl App {
    /// Creates an app from a validated configuration.
    pub fn new(config: CalculatorConfig) -> Self {
        Self::with_preset_name(config, "custom")
    }

    fn with_preset_name(config: CalculatorConfig, preset_name: &str) -> Self {
        let (form, advisories) = config.to_form();
        let result = project(&form.input_set());
        let summary = Summary::from_result(&result);
        Self {
            form,
            result,
            summary,
            selected: 0,
            editing: None,
            status: advisories.first().map(ToString::to_string),
            currency: config.display.currency.clone(),
            preset_name: preset_name.to_string(),
            quit: false,
            config,
        }
    }

    /// Currently highlighted field.
    pub fn selected_field(&self) -> Field {
        Field::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        if self.editing.is_none() {
            self.selected = (self.selected + 1) % Field::ALL.len();
        }
    }

    pub fn select_prev(&mut self) {
        if self.editing.is_none() {
            self.selected = (self.selected + Field::ALL.len() - 1) % Field::ALL.len();
        }
    }

    /// Starts editing the selected field, seeded with its rounded value.
    pub fn begin_edit(&mut self) {
        let field = self.selected_field();
        self.editing = Some(EditBuffer {
            field,
            text: format_value(self.form.get(field)),
        });
    }

    /// Appends a typed character if it can be part of a number.
    pub fn push_char(&mut self, c: char) {
        if let Some(buf) = self.editing.as_mut() {
            if c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E' | '+') {
                buf.text.push(c);
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(buf) = self.editing.as_mut() {
            buf.text.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Applies the edit buffer to the form and recomputes the projection.
    pub fn commit_edit(&mut self) {
        let Some(buf) = self.editing.take() else {
            return;
        };
        let advisories = self.form.edit(buf.field, &buf.text);
        self.status = advisories.first().map(ToString::to_string);
        self.recompute();
    }

    /// Switches to a named preset, discarding edits.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(config) = CalculatorConfig::from_preset(name) else {
            return;
        };
        *self = Self::with_preset_name(config, name);
    }

    /// Restores the form to the configuration it was loaded from.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        let name = self.preset_name.clone();
        *self = Self::with_preset_name(config, &name);
    }

    fn recompute(&mut self) {
        self.result = project(&self.form.input_set());
        self.summary = Summary::from_result(&self.result);
    }
}

/// Formats a field value the way the form displays it: two decimals, no
/// trailing zeros.
pub fn format_value(value: f64) -> String {
    let rounded = round2(value);
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
