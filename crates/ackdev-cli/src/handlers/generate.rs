use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use ackdev_runtime::{
    ManifestModelProvider, ModelProvider, Settings, generator_path, initial_generator,
    list_services, write_generator,
};
use ackdev_types::CrdCatalog;
use anyhow::{Context, Result, bail};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{CrosstermBackend, TestBackend},
};
use tracing::{info, warn};

use crate::args::GenerateArgs;
use crate::tui::{
    KeyScript, Keymap, Navigator, Session, SessionOutcome, SessionReport, TerminalEventSource,
    parse_script,
};

/// Where key input comes from for every session of one invocation
enum Driver {
    Scripted(KeyScript),
    Terminal {
        interrupted: Arc<AtomicBool>,
        poll_interval: Duration,
    },
}

pub fn handle(args: GenerateArgs, settings: &Settings) -> Result<()> {
    let keymap = Keymap::from_settings(&settings.keys)?;
    let services = select_services(&args)?;

    let driver = match &args.script {
        Some(path) => Driver::Scripted(load_script(path)?),
        None => Driver::Terminal {
            interrupted: install_interrupt_flag(),
            poll_interval: Duration::from_millis(settings.session.poll_interval_ms),
        },
    };

    for service in &services {
        if args.all {
            println!("Generate generator.yaml for {}", service);
        }
        let outcome = generate_service(service, &args, settings, &keymap, &driver)?;

        if outcome == SessionOutcome::Interrupted {
            info!("Interrupted; skipping remaining services");
            break;
        }
    }

    Ok(())
}

fn select_services(args: &GenerateArgs) -> Result<Vec<String>> {
    if args.all {
        let models_dir = &args.models_dir;
        let services = list_services(models_dir)
            .with_context(|| format!("failed to list services in {}", models_dir.display()))?;
        return Ok(services
            .into_iter()
            .filter(|service| !args.ignore.contains(service))
            .collect());
    }

    match &args.service {
        Some(service) => Ok(vec![service.clone()]),
        None => bail!("generate requires the name of a single service (or --all)"),
    }
}

fn load_script(path: &Path) -> Result<KeyScript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read key script {}", path.display()))?;
    parse_script(&content).with_context(|| format!("invalid key script {}", path.display()))
}

fn install_interrupt_flag() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        warn!("Failed to install interrupt handler: {}", e);
    }
    interrupted
}

fn generate_service(
    service: &str,
    args: &GenerateArgs,
    settings: &Settings,
    keymap: &Keymap,
    driver: &Driver,
) -> Result<SessionOutcome> {
    let provider = ManifestModelProvider::open(&args.models_dir, service)?;
    let crds = provider.crds()?;
    let path = generator_path(&args.output_dir, service);
    let document = initial_generator(&path, provider.model_name(), &crds, !args.include_all)?;

    let catalog = CrdCatalog::new(crds);
    let navigator = Navigator::new(provider.service(), catalog, keymap.clone(), &document);
    let session = Session::new(navigator, document, settings.session.intent_queue_capacity);

    let report = match driver {
        Driver::Scripted(script) => run_scripted(session, script)?,
        Driver::Terminal {
            interrupted,
            poll_interval,
        } => run_in_terminal(session, Arc::clone(interrupted), *poll_interval)?,
    };

    match report.outcome {
        SessionOutcome::Completed => {
            write_generator(&report.document, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        SessionOutcome::Aborted => {
            println!("aborted; {} not written", path.display());
        }
        SessionOutcome::Interrupted => {
            println!("interrupted; {} not written", path.display());
        }
    }
    Ok(report.outcome)
}

fn run_scripted(session: Session, script: &KeyScript) -> Result<SessionReport> {
    let (width, height) = script.size;
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    let mut source = script.clone().into_source();
    session.run(&mut terminal, &mut source)
}

fn run_in_terminal(
    session: Session,
    interrupted: Arc<AtomicBool>,
    poll_interval: Duration,
) -> Result<SessionReport> {
    enable_raw_mode()?;
    if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let result = drive_terminal(session, interrupted, poll_interval);
    let restored = restore_terminal();

    let report = result?;
    restored?;
    Ok(report)
}

fn drive_terminal(
    session: Session,
    interrupted: Arc<AtomicBool>,
    poll_interval: Duration,
) -> Result<SessionReport> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut source = TerminalEventSource::new(interrupted, poll_interval);
    session.run(&mut terminal, &mut source)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
