//! End-of-wizard orchestration: commit the parameter step and hand the
//! resolved data to the generator.

use tracing::{info, instrument};

use crate::application::ports::{ProjectGenerator, RecentsStore};
use crate::application::services::ConfigureTemplateParametersStep;
use crate::domain::TemplateData;
use crate::error::NpwResult;

/// Drives the finish path of the wizard.
pub struct WizardService {
    generator: Box<dyn ProjectGenerator>,
    recents: Box<dyn RecentsStore>,
}

impl WizardService {
    pub fn new(generator: Box<dyn ProjectGenerator>, recents: Box<dyn RecentsStore>) -> Self {
        Self { generator, recents }
    }

    /// Commit the step and generate the project. Returns the resolved data
    /// so callers can report what was created.
    #[instrument(skip_all, fields(template = %step.template().name))]
    pub fn finish(&mut self, step: &mut ConfigureTemplateParametersStep) -> NpwResult<TemplateData> {
        step.process_pending()?;
        step.on_proceeding(self.recents.as_mut())?;
        let data = step.resolve_data()?;
        let recipe = step.template().recipe;
        self.generator.generate(recipe, &data)?;
        info!(project = %data.project().project_name, "project generated");
        Ok(data)
    }
}
