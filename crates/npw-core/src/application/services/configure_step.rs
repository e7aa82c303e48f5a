//! The "configure template parameters" wizard step.
//!
//! This is the orchestrator behind the second wizard page: it materializes a
//! row per widget of the active template, keeps row values, visibility and
//! enablement up to date, and aggregates validation into a single message.
//!
//! ## Validity model
//!
//! Validity of ALL parameters is recomputed whenever any parameter changes,
//! and only the first error found is kept. This sidesteps the implicit
//! relationships between parameters (changing one can make another
//! valid/invalid) that per-field validators cannot see.
//!
//! ## Evaluation coalescing
//!
//! Edits never trigger evaluation inline. A request is parked in a single
//! pending slot and drained by [`process_pending`]; any number of edits
//! between drains collapse into one evaluation pass. The tri-state
//! [`EvaluationState`] also lets the step distinguish user edits from its
//! own writes while a pass is running.
//!
//! [`process_pending`]: ConfigureTemplateParametersStep::process_pending

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use crate::application::error::ApplicationError;
use crate::application::ports::RecentsStore;
use crate::domain::catalog::{labels, resolve_template_data};
use crate::domain::constraint::Constraint;
use crate::domain::naming;
use crate::domain::parameter::{ParamValue, SuggestContext, WizardContext};
use crate::domain::template::{Template, UiContext};
use crate::domain::validation::{self, ProjectQuery};
use crate::domain::{DomainError, TemplateData};
use crate::error::NpwResult;

/// Iteration cap for the uniqueness suffix search. Exhausting it means the
/// environment can never satisfy the constraint, which is a configuration
/// problem rather than a user mistake.
const DEDUP_SUFFIX_CAP: usize = 10_000;

/// Where the step is in its evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EvaluationState {
    NotEvaluating,
    /// An evaluation request is parked; further requests coalesce into it.
    RequestEnqueued,
    /// A pass is running; value writes observed now come from the engine,
    /// not the user.
    Evaluating,
}

/// One widget's live state. Chrome widgets (labels, separators) have no row.
#[derive(Debug, Clone)]
struct Row {
    parameter: crate::domain::Parameter,
    value: ParamValue,
    visible: bool,
    enabled: bool,
    recents_key: Option<String>,
}

/// Read-only view of a parameter row, for front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    pub name: &'a str,
    pub value: &'a ParamValue,
    pub visible: bool,
    pub enabled: bool,
}

/// Keeps the package name derived from the project name until the user
/// breaks the link by editing the package directly. The flag is sticky: once
/// broken, the link never re-engages for the lifetime of the step.
#[derive(Debug, Clone)]
struct PackageSync {
    package_idx: usize,
    project_idx: usize,
    is_synced: bool,
}

pub struct ConfigureTemplateParametersStep {
    template: Template,
    query: Box<dyn ProjectQuery>,
    wizard: WizardContext,
    /// Index-aligned with `template.widgets`.
    rows: Vec<Option<Row>>,
    /// Values the user typed, keyed by widget position. A recorded value
    /// always wins over suggestions, even when siblings change later.
    user_values: HashMap<usize, ParamValue>,
    state: EvaluationState,
    invalid_parameter_message: String,
    package_sync: Option<PackageSync>,
    entered: bool,
}

impl ConfigureTemplateParametersStep {
    pub fn new(template: Template, query: Box<dyn ProjectQuery>, wizard: WizardContext) -> Self {
        Self {
            template,
            query,
            wizard,
            rows: Vec::new(),
            user_values: HashMap::new(),
            state: EvaluationState::NotEvaluating,
            invalid_parameter_message: String::new(),
            package_sync: None,
            entered: false,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The single aggregated validation message. Empty when every visible,
    /// enabled parameter is valid.
    pub fn invalid_parameter_message(&self) -> &str {
        &self.invalid_parameter_message
    }

    /// Enter (or re-enter) the step. Idempotent: a re-entry rebuilds the
    /// rows from the template, discarding previous edits.
    #[instrument(skip(self), fields(template = %self.template.name))]
    pub fn on_entering(&mut self) -> NpwResult<()> {
        self.reset();

        for widget in &self.template.widgets {
            let row = widget.parameter().map(|parameter| {
                let recents_key = widget.wants_recents().then(|| {
                    format!("npw.template.{}.{}", self.template.name, parameter.name())
                });
                Row {
                    value: parameter.value(),
                    visible: true,
                    enabled: true,
                    parameter,
                    recents_key,
                }
            });
            self.rows.push(row);
        }

        self.install_package_sync();
        self.entered = true;
        self.evaluate_parameters()?;
        debug!(rows = self.rows.len(), "entered parameter step");
        Ok(())
    }

    /// Record a user edit. The value is pushed into the row immediately; the
    /// resulting re-evaluation is coalesced and runs on the next
    /// [`process_pending`](Self::process_pending).
    pub fn set_user_value(&mut self, name: &str, value: ParamValue) -> NpwResult<()> {
        if !self.entered {
            return Err(ApplicationError::StepNotEntered.into());
        }
        // Writes observed mid-pass come from the engine itself, not the
        // user; recording them would freeze suggested values forever.
        if self.state == EvaluationState::Evaluating {
            trace!(name, "ignoring engine write during evaluation");
            return Ok(());
        }

        let idx = self
            .widget_index(name)
            .ok_or_else(|| DomainError::UnknownParameter {
                name: name.to_owned(),
                template: self.template.name.clone(),
            })?;

        if let Some(Some(row)) = self.rows.get_mut(idx) {
            row.parameter.set_value(value.clone())?;
            row.value = value.clone();
        }
        self.user_values.insert(idx, value.clone());

        // Sticky sync: editing the package directly breaks the link unless
        // the typed value happens to equal the computed one.
        let package_idx = self.package_sync.as_ref().map(|s| s.package_idx);
        if package_idx == Some(idx) {
            let computed = self.computed_package();
            if let Some(sync) = self.package_sync.as_mut() {
                sync.is_synced = computed.as_deref() == value.as_str();
            }
        }

        self.enqueue_evaluate_parameters();
        Ok(())
    }

    /// Drain the pending evaluation request, if any. Safe to call at any
    /// time; a no-op when nothing is parked.
    pub fn process_pending(&mut self) -> NpwResult<()> {
        if self.state == EvaluationState::RequestEnqueued {
            self.evaluate_parameters()?;
        }
        Ok(())
    }

    pub fn can_go_forward(&self) -> bool {
        self.entered && self.invalid_parameter_message.is_empty()
    }

    /// Commit the step: run each row's accept side effect (recents) and push
    /// the displayed values into the parameters.
    #[instrument(skip_all, fields(template = %self.template.name))]
    pub fn on_proceeding(&mut self, recents: &mut dyn RecentsStore) -> NpwResult<()> {
        if !self.entered {
            return Err(ApplicationError::StepNotEntered.into());
        }
        if !self.can_go_forward() {
            return Err(ApplicationError::CannotProceed {
                message: self.invalid_parameter_message.clone(),
            }
            .into());
        }

        for row in self.rows.iter_mut().flatten() {
            if let (Some(key), Some(value)) = (&row.recents_key, row.value.as_str()) {
                recents.push(key, value);
            }
            row.parameter.set_value(row.value.clone())?;
        }
        debug!("parameter step committed");
        Ok(())
    }

    /// Release the step's state. Idempotent.
    pub fn dispose(&mut self) {
        self.reset();
    }

    /// The committed value of a parameter, by display name.
    pub fn value_of(&self, name: &str) -> Option<ParamValue> {
        let idx = self.widget_index(name)?;
        self.rows.get(idx)?.as_ref().map(|r| r.value.clone())
    }

    /// The parameter rows in widget order, for display.
    pub fn rows(&self) -> Vec<RowView<'_>> {
        self.rows
            .iter()
            .flatten()
            .map(|r| RowView {
                name: r.parameter.name(),
                value: &r.value,
                visible: r.visible,
                enabled: r.enabled,
            })
            .collect()
    }

    /// Map the step's values into the generator payload.
    pub fn resolve_data(&self) -> Result<TemplateData, DomainError> {
        resolve_template_data(&self.template, &|label| self.value_of(label))
    }

    fn reset(&mut self) {
        self.rows.clear();
        self.user_values.clear();
        self.invalid_parameter_message.clear();
        self.state = EvaluationState::NotEvaluating;
        self.package_sync = None;
        self.entered = false;
    }

    /// Park an evaluation request; repeated calls coalesce.
    fn enqueue_evaluate_parameters(&mut self) {
        if self.state == EvaluationState::RequestEnqueued {
            return;
        }
        self.state = EvaluationState::RequestEnqueued;
    }

    /// Run through all parameters of the current template and update their
    /// values, visibility and enablement, then recompute the aggregated
    /// validation message. Idempotent when no edits intervene.
    #[instrument(skip(self))]
    fn evaluate_parameters(&mut self) -> NpwResult<()> {
        self.state = EvaluationState::Evaluating;

        for row in self.rows.iter_mut().flatten() {
            row.visible = row.parameter.visible(&self.wizard);
            row.enabled = row.parameter.enabled(&self.wizard);
        }

        // Resolve every string value against a snapshot taken up front, so
        // one pass cannot feed its own outputs back into its inputs.
        let snapshot = self.sibling_snapshot();
        let mut resolved = Vec::new();
        for (idx, row) in self.rows.iter().enumerate() {
            let Some(row) = row else { continue };
            if row.parameter.as_string().is_none() {
                continue;
            }
            let value = match self.user_values.get(&idx) {
                Some(user) => user.clone(),
                None => ParamValue::Str(self.deduplicate(idx, &snapshot)?),
            };
            resolved.push((idx, value));
        }
        for (idx, value) in resolved {
            if let Some(Some(row)) = self.rows.get_mut(idx) {
                row.parameter.set_value(value.clone())?;
                row.value = value;
            }
        }

        self.apply_package_sync()?;

        self.state = EvaluationState::NotEvaluating;
        self.invalid_parameter_message = self.validate_all_parameters().unwrap_or_default();
        trace!(message = %self.invalid_parameter_message, "evaluation pass done");
        Ok(())
    }

    /// First validation failure across visible, enabled string parameters,
    /// in widget order.
    fn validate_all_parameters(&self) -> Option<String> {
        let package = self.ambient_package();
        self.rows.iter().enumerate().find_map(|(idx, row)| {
            let row = row.as_ref()?;
            if !(row.visible && row.enabled) {
                return None;
            }
            let parameter = row.parameter.as_string()?;
            let value = row.value.as_str()?;
            validation::validate(
                parameter,
                self.query.as_ref(),
                package.as_deref(),
                value,
                &self.related_values(idx),
            )
        })
    }

    /// Suggested value for a parameter, made unique when it must be: strip
    /// any file extension and trailing digits, then append 2, 3, ... until
    /// nothing else claims the name.
    ///
    /// Trailing digits are stripped because a previous pass probably put
    /// them there. With two related parameters, resolving "Name" to "Name2"
    /// makes "Layout" collide and become "Layout2"; resolving that again
    /// must not yield "Layout22".
    fn deduplicate(&self, idx: usize, snapshot: &[(String, ParamValue)]) -> NpwResult<String> {
        let Some(Some(row)) = self.rows.get(idx) else {
            return Ok(String::new());
        };
        let Some(parameter) = row.parameter.as_string() else {
            return Ok(String::new());
        };

        let ctx = SuggestContext::new(&self.wizard, snapshot);
        let value = parameter
            .suggest(&ctx)
            .or_else(|| row.value.as_str().map(str::to_owned))
            .unwrap_or_default();
        if value.is_empty() || !parameter.has_constraint(Constraint::Unique) {
            return Ok(value);
        }

        let (stem, extension) = match value.rsplit_once('.') {
            Some((stem, ext)) => (stem, Some(ext.to_owned())),
            None => (value.as_str(), None),
        };
        let stem = stem.trim_end_matches(|c: char| c.is_ascii_digit()).to_owned();

        let package = self.ambient_package();
        let related = self.related_values(idx);
        let mut suggested = value.clone();
        let mut suffix = 2usize;
        while !validation::uniqueness_satisfied(
            parameter,
            self.query.as_ref(),
            package.as_deref(),
            &suggested,
            &related,
        ) {
            if suffix > DEDUP_SUFFIX_CAP {
                return Err(DomainError::SuffixSearchExhausted {
                    parameter: parameter.name.clone(),
                    cap: DEDUP_SUFFIX_CAP,
                }
                .into());
            }
            suggested = match &extension {
                Some(ext) => format!("{stem}{suffix}.{ext}"),
                None => format!("{stem}{suffix}"),
            };
            suffix += 1;
        }
        Ok(suggested)
    }

    /// Values of all parameters related to the one at `idx` (sharing a type
    /// constraint), used for uniqueness checks.
    fn related_values(&self, idx: usize) -> Vec<String> {
        let Some(Some(target)) = self.rows.get(idx) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .filter_map(|(_, r)| r.as_ref())
            .filter(|r| validation::is_related(&target.parameter, &r.parameter))
            .filter_map(|r| r.value.as_str().map(str::to_owned))
            .collect()
    }

    fn sibling_snapshot(&self) -> Vec<(String, ParamValue)> {
        self.rows
            .iter()
            .flatten()
            .map(|r| (r.parameter.name().to_owned(), r.value.clone()))
            .collect()
    }

    fn widget_index(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|row| {
            row.as_ref().is_some_and(|r| r.parameter.name() == name)
        })
    }

    /// The package prefix used to qualify bare class names: the package
    /// row's current value, falling back to the wizard's.
    fn ambient_package(&self) -> Option<String> {
        self.widget_index(labels::PACKAGE_NAME)
            .and_then(|idx| self.rows.get(idx)?.as_ref())
            .and_then(|r| r.value.as_str().map(str::to_owned))
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.wizard.package_name.clone()).filter(|s| !s.is_empty()))
    }

    /// Wire the package row to follow the project name. New-project flow
    /// only; a module inherits its package from the enclosing project.
    fn install_package_sync(&mut self) {
        if self.template.supports(UiContext::NewModule) {
            return;
        }
        let (Some(package_idx), Some(project_idx)) = (
            self.widget_index(labels::PACKAGE_NAME),
            self.widget_index(labels::PROJECT_NAME),
        ) else {
            return;
        };
        self.package_sync = Some(PackageSync {
            package_idx,
            project_idx,
            is_synced: true,
        });
    }

    fn computed_package(&self) -> Option<String> {
        let sync = self.package_sync.as_ref()?;
        let project = self
            .rows
            .get(sync.project_idx)?
            .as_ref()?
            .value
            .as_str()?
            .to_owned();
        Some(format!(
            "{}.{}",
            self.wizard.base_package,
            naming::name_to_package_segment(&project)
        ))
    }

    fn apply_package_sync(&mut self) -> NpwResult<()> {
        let Some(sync) = self.package_sync.clone() else {
            return Ok(());
        };
        if !sync.is_synced {
            return Ok(());
        }
        let Some(computed) = self.computed_package() else {
            return Ok(());
        };
        if let Some(Some(row)) = self.rows.get_mut(sync.package_idx) {
            row.parameter.set_value(ParamValue::Str(computed.clone()))?;
            row.value = ParamValue::Str(computed);
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConfigureTemplateParametersStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigureTemplateParametersStep")
            .field("template", &self.template.name)
            .field("entered", &self.entered)
            .field("state", &self.state)
            .field("invalid_parameter_message", &self.invalid_parameter_message)
            .finish_non_exhaustive()
    }
}
