//! Implementation of the `npw list` command.

use npw_core::domain::{Template, catalog};
use npw_core::error::NpwError;

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let base_package = &config.defaults.base_package;
    let templates = if args.module {
        catalog::module_templates(base_package)
    } else {
        catalog::project_templates(base_package)
    }
    .map_err(NpwError::from)
    .map_err(CliError::Core)?;

    // A global `--output-format json` wins over the listing default.
    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(if args.module {
                "Available module templates:"
            } else {
                "Available project templates:"
            })?;
            for template in &templates {
                output.print(&format!(
                    "  {:<22} {}",
                    template.name, template.description
                ))?;
            }
        }

        ListFormat::List => {
            for template in &templates {
                output.print(&template.name)?;
            }
        }

        ListFormat::Json => {
            // Serialise as a JSON array to stdout (bypasses OutputManager
            // because JSON output must be parseable even in non-TTY pipes).
            let json = serde_json::to_string_pretty(
                &templates.iter().map(template_json).collect::<Vec<_>>(),
            )
            .map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise template list: {e}"),
                source: Some(Box::new(e)),
            })?;
            println!("{json}");
        }
    }

    Ok(())
}

fn template_json(template: &Template) -> serde_json::Value {
    serde_json::json!({
        "name": template.name,
        "description": template.description,
        "documentation_url": template.documentation_url,
        "parameters": template
            .parameters()
            .iter()
            .map(|p| p.name().to_owned())
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_projection_carries_parameters() {
        let templates = catalog::project_templates("com.example").unwrap();
        let value = template_json(&templates[0]);
        assert_eq!(value["name"], "Flutter Application");
        assert!(
            value["parameters"]
                .as_array()
                .is_some_and(|params| params.iter().any(|p| p == "Project name"))
        );
    }

    #[test]
    fn module_gallery_starts_with_the_empty_entry() {
        let templates = catalog::module_templates("com.example").unwrap();
        assert_eq!(template_json(&templates[0])["name"], "None");
    }
}
