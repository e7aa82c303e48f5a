//! End-to-end wizard flows against the public API.

use std::cell::RefCell;
use std::rc::Rc;

use npw_core::application::ports::{ProjectGenerator, RecentsStore};
use npw_core::application::{ApplicationError, ConfigureTemplateParametersStep, WizardService};
use npw_core::domain::catalog::{
    default_selected_template_index, labels, module_templates, project_templates, ProjectType,
};
use npw_core::domain::{ProjectQuery, Recipe, TemplateData, WizardContext};
use npw_core::error::NpwError;

struct StubQuery {
    sdk_root: &'static str,
}

impl ProjectQuery for StubQuery {
    fn module_exists(&self, _name: &str) -> bool {
        false
    }
    fn class_exists(&self, _fq_name: &str) -> bool {
        false
    }
    fn package_exists(&self, _name: &str) -> bool {
        false
    }
    fn path_exists(&self, _path: &str) -> bool {
        false
    }
    fn is_sdk_root(&self, path: &str) -> bool {
        path == self.sdk_root
    }
}

#[derive(Default)]
struct RecordingGenerator {
    runs: Rc<RefCell<Vec<(Recipe, TemplateData)>>>,
}

impl ProjectGenerator for RecordingGenerator {
    fn generate(&mut self, recipe: Recipe, data: &TemplateData) -> Result<(), ApplicationError> {
        self.runs.borrow_mut().push((recipe, data.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingRecents {
    pushes: Rc<RefCell<Vec<(String, String)>>>,
}

impl RecentsStore for RecordingRecents {
    fn push(&mut self, key: &str, value: &str) {
        self.pushes.borrow_mut().push((key.to_owned(), value.to_owned()));
    }
    fn recent(&self, key: &str) -> Vec<String> {
        self.pushes
            .borrow()
            .iter()
            .rev()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

#[test]
fn new_project_wizard_flow() {
    // Gallery: pick the application template.
    let gallery = project_templates("com.example").unwrap();
    let idx = default_selected_template_index(&gallery, "Flutter Application").unwrap();
    let template = gallery[idx].clone();

    let mut step = ConfigureTemplateParametersStep::new(
        template,
        Box::new(StubQuery { sdk_root: "/opt/flutter" }),
        WizardContext::new("", false, "com.example"),
    );
    step.on_entering().unwrap();
    assert!(!step.can_go_forward());

    step.set_user_value(labels::PROJECT_NAME, "corner_shop".into()).unwrap();
    step.set_user_value(labels::FLUTTER_SDK, "/opt/flutter".into()).unwrap();
    step.set_user_value(labels::LOCATION, "/home/dev/work".into()).unwrap();
    step.process_pending().unwrap();
    assert!(step.can_go_forward());

    let generator = RecordingGenerator::default();
    let runs = Rc::clone(&generator.runs);
    let mut service = WizardService::new(
        Box::new(generator),
        Box::new(RecordingRecents::default()),
    );
    let data = service.finish(&mut step).unwrap();

    let TemplateData::Project(project) = data else {
        panic!("expected project payload");
    };
    assert_eq!(project.project_name, "corner_shop");
    assert_eq!(project.package_name, "com.example.corner_shop");
    assert!(project.use_kotlin);
    assert!(project.androidx_support);
    assert!(project.is_new_project);

    let runs = runs.borrow();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].0, Recipe::CreateProject(ProjectType::App));
}

#[test]
fn new_module_wizard_flow_records_recents() {
    let gallery = module_templates("com.example").unwrap();
    // No "Empty Activity" entry exists, so the first real template wins.
    let idx = default_selected_template_index(&gallery, "Empty Activity").unwrap();
    let template = gallery[idx].clone();
    assert_eq!(template.name, "Flutter Application");

    let mut step = ConfigureTemplateParametersStep::new(
        template,
        Box::new(StubQuery { sdk_root: "/opt/flutter" }),
        WizardContext::new("com.example", true, "com.example"),
    );
    step.on_entering().unwrap();
    step.set_user_value(labels::FLUTTER_SDK, "/opt/flutter".into()).unwrap();
    step.set_user_value(labels::LOCATION, "/home/dev/host-app".into()).unwrap();
    step.process_pending().unwrap();

    let recents = RecordingRecents::default();
    let pushes = Rc::clone(&recents.pushes);
    let mut service = WizardService::new(
        Box::new(RecordingGenerator::default()),
        Box::new(recents),
    );
    let data = service.finish(&mut step).unwrap();

    let TemplateData::Module(module) = data else {
        panic!("expected module payload");
    };
    assert_eq!(module.name, "flutter_app");
    assert!(!module.project.is_new_project);

    let pushes = pushes.borrow();
    assert_eq!(
        pushes.as_slice(),
        [(
            "npw.template.Flutter Application.Package name".to_owned(),
            "com.example".to_owned()
        )]
    );
}

#[test]
fn invalid_wizard_cannot_finish() {
    let gallery = project_templates("com.example").unwrap();
    let mut step = ConfigureTemplateParametersStep::new(
        gallery[0].clone(),
        Box::new(StubQuery { sdk_root: "/opt/flutter" }),
        WizardContext::new("", false, "com.example"),
    );
    step.on_entering().unwrap();

    let mut service = WizardService::new(
        Box::new(RecordingGenerator::default()),
        Box::new(RecordingRecents::default()),
    );
    let err = service.finish(&mut step).unwrap_err();
    assert!(matches!(
        err,
        NpwError::Application(ApplicationError::CannotProceed { .. })
    ));
}
