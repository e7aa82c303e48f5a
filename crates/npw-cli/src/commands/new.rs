//! Implementation of the `npw new` command.
//!
//! Responsibility: translate CLI arguments into wizard parameter values,
//! drive the configure step to a valid state, and hand the result to the
//! generator. No validation logic lives here — the wizard step owns it.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use npw_adapters::{FileRecentsStore, FlutterCreateGenerator, LocalProjectQuery, generator};
use npw_core::application::{ConfigureTemplateParametersStep, WizardService};
use npw_core::domain::{
    Language as CoreLanguage, ParamValue, ProjectType, Template, WizardContext,
    catalog::{self, labels},
};
use npw_core::error::NpwError;

use crate::{
    cli::{AndroidLanguage, IosLanguage, NewArgs, ProjectKind, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `npw new` command.
///
/// Dispatch sequence:
/// 1. Resolve the gallery (project or module templates) and pick the entry
/// 2. Gate the template against the environment (context, host languages)
/// 3. Enter the configure step and seed it with the CLI arguments
/// 4. Prompt for anything still missing (interactive builds only)
/// 5. Confirm with user unless `--yes` or `--quiet`
/// 6. Early-exit if `--dry-run`, otherwise run the generator
#[instrument(skip_all, fields(kind = %args.kind, module = args.module))]
pub fn execute(
    args: NewArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Pick the template out of the catalog.
    let base_package = args
        .org
        .clone()
        .unwrap_or_else(|| config.defaults.base_package.clone());
    let template = select_template(&args, &base_package)?;

    // 2. Environmental gates. `--legacy-android-libraries` means no AndroidX.
    if let Some(message) = template.check_constraints(
        args.module,
        !args.legacy_android_libraries,
        convert_android_language(args.android_language),
        convert_ios_language(args.ios_language),
    ) {
        return Err(CliError::TemplateNotAvailable { message });
    }

    debug!(template = %template.name, base_package, "Template selected");

    // 3. Enter the step and seed it.
    let wizard = WizardContext::new(base_package.clone(), args.module, base_package);
    let query = match &args.project {
        Some(root) => LocalProjectQuery::with_project_root(root),
        None => LocalProjectQuery::new(),
    };
    let mut step = ConfigureTemplateParametersStep::new(template, Box::new(query), wizard);
    step.on_entering().map_err(CliError::Core)?;

    if args.module && args.project.is_none() {
        output.warning("no --project given; uniqueness checks against the open project are skipped")?;
    }

    seed_arguments(&mut step, &args, &config)?;

    // 4. Interactive fill-in for whatever the arguments left open.
    #[cfg(feature = "interactive")]
    if !args.yes && !output.is_quiet() && std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        prompt_parameters(&mut step, &output)?;
    }

    if !step.can_go_forward() {
        return Err(CliError::InvalidParameters {
            message: step.invalid_parameter_message().to_owned(),
        });
    }

    // The recipe survives `finish`; the data is rebuilt there.
    let recipe = step.template().recipe;
    let data = step.resolve_data().map_err(NpwError::from)?;
    let project = data.project();
    let target: PathBuf = project.project_path.join(&project.project_name);

    if target.exists() {
        return Err(CliError::ProjectExists { path: target });
    }

    // 5. Show configuration and confirm.
    if !output.is_quiet() && !args.yes {
        show_configuration(&step, &target, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 6. Dry run: describe but do not write.
    let command = generator::command_line(recipe, &data).map_err(NpwError::from)?;
    if args.dry_run {
        output.info(&format!(
            "Dry run: would create '{}' at {}",
            project.project_name,
            target.display(),
        ))?;
        output.print(&format!("  {}", command.join(" ")))?;
        return Ok(());
    }

    info!(project = %project.project_name, path = %target.display(), "Generation started");

    let recents = FileRecentsStore::load(AppConfig::recents_path());
    let mut service = WizardService::new(
        Box::new(FlutterCreateGenerator::new()),
        Box::new(recents),
    );
    let data = service.finish(&mut step).map_err(CliError::Core)?;
    let project = data.project();

    // 7. Success + next steps.
    output.success(&format!("Project '{}' configured!", project.project_name))?;
    output.print(&format!("  {}", command.join(" ")))?;

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", target.display()))?;
        output.print("  flutter run")?;
    }

    step.dispose();
    Ok(())
}

// ── Template selection ────────────────────────────────────────────────────────

/// Resolve the gallery for the requested context and pick the entry whose
/// name matches the requested project type.
fn select_template(args: &NewArgs, base_package: &str) -> CliResult<Template> {
    let mut entries = if args.module {
        catalog::module_templates(base_package)
    } else {
        catalog::project_templates(base_package)
    }
    .map_err(NpwError::from)?;

    let wanted = gallery_label(args.kind);
    let idx = catalog::default_selected_template_index(&entries, &wanted)
        .map_err(NpwError::from)?;
    let template = entries.swap_remove(idx);

    // The gallery picker falls back to the first real entry when the label
    // is absent (e.g. `--type import` outside `--module`). The CLI asked for
    // a specific type, so a fallback is an error here.
    if template.name != wanted {
        return Err(CliError::InvalidInput {
            message: format!(
                "the '{}' type is not available {}",
                args.kind,
                if args.module {
                    "when adding a module"
                } else {
                    "for new projects; pass --module"
                }
            ),
        });
    }
    Ok(template)
}

/// The display name the catalog gives the template for this kind.
fn gallery_label(kind: ProjectKind) -> String {
    format!("Flutter {}", convert_kind(kind).title())
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_kind(kind: ProjectKind) -> ProjectType {
    match kind {
        ProjectKind::App => ProjectType::App,
        ProjectKind::Plugin => ProjectType::Plugin,
        ProjectKind::Package => ProjectType::Package,
        ProjectKind::Module => ProjectType::Module,
        ProjectKind::Import => ProjectType::Import,
    }
}

fn convert_android_language(lang: AndroidLanguage) -> CoreLanguage {
    match lang {
        AndroidLanguage::Kotlin => CoreLanguage::Kotlin,
        AndroidLanguage::Java => CoreLanguage::Java,
    }
}

fn convert_ios_language(lang: IosLanguage) -> CoreLanguage {
    match lang {
        IosLanguage::Swift => CoreLanguage::Swift,
        IosLanguage::Objc => CoreLanguage::ObjC,
    }
}

// ── Seeding the step from CLI arguments ───────────────────────────────────────

/// Push every argument the user supplied into the step.  Unsupplied values
/// keep their catalog defaults and suggestions.
fn seed_arguments(
    step: &mut ConfigureTemplateParametersStep,
    args: &NewArgs,
    config: &AppConfig,
) -> CliResult<()> {
    if let Some(name) = &args.name {
        set(step, labels::PROJECT_NAME, ParamValue::from(name.as_str()))?;
    }

    let sdk = args.sdk.clone().or_else(|| config.defaults.sdk_path.clone());
    if let Some(sdk) = sdk {
        set(step, labels::FLUTTER_SDK, path_value(&sdk))?;
    }

    // Modules land inside the existing project by default.
    let location = args
        .location
        .clone()
        .or_else(|| config.defaults.location.clone())
        .or_else(|| args.module.then(|| args.project.clone()).flatten())
        .unwrap_or_else(|| PathBuf::from("."));
    set(step, labels::LOCATION, path_value(&location))?;

    if let Some(package) = &args.package {
        set(step, labels::PACKAGE_NAME, ParamValue::from(package.as_str()))?;
    }

    // The toggles exist on every template; where a template hides them the
    // value is simply carried through to the generator payload.
    let kotlin = args.android_language == AndroidLanguage::Kotlin;
    let swift = args.ios_language == IosLanguage::Swift;
    set(step, labels::USE_KOTLIN, ParamValue::Bool(kotlin))?;
    set(step, labels::USE_SWIFT, ParamValue::Bool(swift))?;
    set(
        step,
        labels::USE_LEGACY_LIBRARIES,
        ParamValue::Bool(args.legacy_android_libraries),
    )?;
    set(step, labels::OFFLINE, ParamValue::Bool(args.offline))?;

    Ok(())
}

fn set(
    step: &mut ConfigureTemplateParametersStep,
    name: &str,
    value: ParamValue,
) -> CliResult<()> {
    step.set_user_value(name, value).map_err(CliError::Core)?;
    step.process_pending().map_err(CliError::Core)?;
    Ok(())
}

fn path_value(path: &std::path::Path) -> ParamValue {
    ParamValue::from(path.to_string_lossy().as_ref())
}

// ── Interactive fill-in ───────────────────────────────────────────────────────

/// Walk the visible rows and offer each one for editing, with the wizard's
/// current value (default or suggestion) pre-filled.  Repeats once if the
/// first pass left the step invalid, so a corrected value gets re-checked.
#[cfg(feature = "interactive")]
fn prompt_parameters(
    step: &mut ConfigureTemplateParametersStep,
    output: &OutputManager,
) -> CliResult<()> {
    use dialoguer::{Confirm, Input};

    for _round in 0..2 {
        // Snapshot first: prompting must not hold a borrow on the step.
        let rows: Vec<(String, ParamValue)> = step
            .rows()
            .iter()
            .filter(|row| row.visible && row.enabled)
            .map(|row| (row.name.to_owned(), row.value.clone()))
            .collect();

        for (name, value) in rows {
            match value {
                ParamValue::Str(current) => {
                    let typed: String = Input::new()
                        .with_prompt(&name)
                        .with_initial_text(&current)
                        .allow_empty(true)
                        .interact_text()
                        .map_err(prompt_error)?;
                    if typed != current {
                        set(step, &name, ParamValue::from(typed.as_str()))?;
                    }
                }
                ParamValue::Bool(current) => {
                    let answer = Confirm::new()
                        .with_prompt(&name)
                        .default(current)
                        .interact()
                        .map_err(prompt_error)?;
                    if answer != current {
                        set(step, &name, ParamValue::Bool(answer))?;
                    }
                }
            }
        }

        if step.can_go_forward() {
            break;
        }
        output.error(step.invalid_parameter_message())?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn prompt_error(err: dialoguer::Error) -> CliError {
    match err {
        dialoguer::Error::IO(io) => CliError::IoError {
            message: "prompt failed".into(),
            source: io,
        },
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    step: &ConfigureTemplateParametersStep,
    target: &std::path::Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Template:     {}", step.template().name))?;
    for row in step.rows() {
        if !row.visible {
            continue;
        }
        out.print(&format!("  {:<13} {}", format!("{}:", row.name), row.value))?;
    }
    out.print(&format!("  Target:       {}", target.display()))?;
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
