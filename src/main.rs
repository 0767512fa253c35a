use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, info};

use test_discovery::cli::{self, Isolation};
use test_discovery::discovery::utils::collect_assembly_paths;
use test_discovery::discovery::{
    serve_worker, AssemblyEnumeratorWrapper, ManifestLoader, ProcessHost, WarningList,
};
use test_discovery::logging::{self, Verbosity};
use test_discovery::output::{DiscoveryReport, OutputFormatter};
use test_discovery::settings::DiscoverySettings;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    if args.worker {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        serve_worker(stdin.lock(), stdout.lock(), Arc::new(ManifestLoader::new()))
            .context("Discovery worker failed")?;
        return Ok(());
    }

    args.validate().context("Invalid arguments")?;
    let root = args.path.as_deref().context("--path is required")?;

    let settings = match args.settings {
        Some(ref path) => DiscoverySettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => DiscoverySettings::default(),
    };
    let filters = args.parsed_filters()?;

    let wrapper = match args.isolation {
        Isolation::InProcess => AssemblyEnumeratorWrapper::in_process(),
        Isolation::Process => AssemblyEnumeratorWrapper::with_host(Arc::new(
            ProcessHost::current_exe().context("Cannot locate worker executable")?,
        )),
    };

    let assemblies = collect_assembly_paths(root)
        .with_context(|| format!("Failed to collect assemblies under {}", root.display()))?;
    info!(count = assemblies.len(), "discovering tests");

    let mut reports = Vec::with_capacity(assemblies.len());
    for assembly in &assemblies {
        let source = assembly.display().to_string();
        let mut warnings = WarningList::new();
        let mut tests = wrapper.get_tests(&source, &settings, &mut warnings);

        if !filters.is_empty() {
            if let Some(ref mut found) = tests {
                found.retain(|d| filters.iter().any(|f| f.matches(d)));
            }
        }
        debug!(
            assembly = %source,
            tests = tests.as_ref().map_or(0, Vec::len),
            warnings = warnings.len(),
            "assembly done"
        );

        reports.push(DiscoveryReport::new(
            source,
            tests.as_deref(),
            warnings,
            settings.test_id_generation_strategy,
        ));
    }

    let rendered = OutputFormatter::format(reports, args.format)?;
    match args.output_file {
        Some(ref path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
