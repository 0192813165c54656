//! `texlinks generate`: walk a tree and write the macro document

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Result, anyhow};
use texlinks_core::{ErrorPolicy, Generator, GeneratorConfig, NamespaceClose};
use tracing::debug;

use crate::cli::GenerateArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, write_generation_summary, write_json};
use crate::utils::settings;

/// `lean` and `.lean` both select `Foo.lean`.
fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

/// Layer command-line flags over a loaded configuration.
pub fn apply_args(args: &GenerateArgs, mut config: GeneratorConfig) -> Result<GeneratorConfig> {
    if let Some(root) = &args.root {
        config.root.clone_from(root);
    }
    if let Some(output) = &args.output {
        config.output.clone_from(output);
    }
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.iter().map(|e| normalize_extension(e)).collect();
    }
    config.exclude.extend(args.exclude.iter().cloned());
    if let Some(mode) = args.scan.mode {
        config.mode = mode.into();
    }
    if args.scan.lenient_end {
        config.namespace_close = NamespaceClose::Lenient;
    }
    if args.keep_going {
        config.on_error = ErrorPolicy::KeepGoing;
    }
    if let Some(url) = &args.repo_url {
        config.links.repo_url.clone_from(url);
    }
    if let Some(prefix) = &args.code_prefix {
        config.links.code_prefix.clone_from(prefix);
    }
    if let Some(style) = args.link_path {
        config.link_path = style.into();
    }

    config.validate().map_err(CliError::from)?;
    Ok(config)
}

/// Execute the generate command
pub fn execute(args: &GenerateArgs, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    if args.stdout && args.format.is_machine() {
        return Err(CliError::usage(anyhow!("cannot use --stdout with --format json")).into());
    }

    let loaded = settings::load(config_path)?;
    let config = apply_args(args, loaded.config)?;
    debug!(
        root = %config.root.display(),
        mode = %config.mode,
        on_error = %config.on_error,
        "starting generation"
    );

    let generator = Generator::new(&config);
    let report = if args.stdout {
        let generation = generator.generate().map_err(CliError::from)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(generation.document.render().as_bytes())?;
        stdout.flush()?;
        generation.report
    } else {
        generator.run().map_err(CliError::from)?
    };

    match args.format {
        OutputFormat::Json => write_json(&mut io::stdout().lock(), &report)?,
        OutputFormat::Text if quiet => {},
        // The document owns stdout when it is printed there
        OutputFormat::Text if args.stdout => {
            write_generation_summary(&mut io::stderr().lock(), &report)?;
        },
        OutputFormat::Text => write_generation_summary(&mut io::stdout().lock(), &report)?,
    }
    Ok(())
}
