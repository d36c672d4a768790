use std::sync::Arc;

use citelens::commands::results::{get_open_publication, get_results, ResultsStatus, ResultsView};
use citelens::commands::settings::{get_settings, init_settings, settings_path};
use citelens::utils::logging::{default_log_dir, init_logging};
use citelens::{HttpBackend, QueryOrchestrator};
use tracing::{debug, info, warn};

const USAGE: &str = "usage: citelens [--open <n>] <question>\n       citelens --init-settings";

struct Args {
    query: String,
    open: Option<usize>,
    init_settings: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        query: String::new(),
        open: None,
        init_settings: false,
    };
    let mut words = Vec::new();

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--init-settings" => args.init_settings = true,
            "--open" => {
                let n = iter.next().ok_or(USAGE)?;
                args.open = Some(n.parse().map_err(|_| format!("Invalid entry number: {}", n))?);
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => words.push(arg),
        }
    }

    args.query = words.join(" ");
    Ok(args)
}

fn print_results(view: &ResultsView) {
    if let ResultsStatus::Failed(ref message) = view.status {
        println!("No se pudo obtener el resumen: {}", message);
    }

    if let Some(ref header) = view.header {
        println!("{} artículos encontrados\n", header.total_publications);
        println!("# {}\n", header.heading);
        println!("{}\n", header.body);
    }

    if !view.findings.is_empty() {
        println!("## Hallazgos clave");
        for finding in &view.findings {
            println!("- {}", finding.title);
            if finding.expanded {
                println!("  {}", finding.summary);
            }
        }
        println!();
    }

    if !view.bibliography.is_empty() {
        println!("## Bibliografía");
        for entry in &view.bibliography {
            println!("[{}] {}. {}", entry.number, entry.byline, entry.title);
        }
        println!();
    }

    if let Some(ref stats) = view.stats {
        let sections = [
            ("Autores principales", &stats.top_authors),
            ("Instituciones principales", &stats.top_institutions),
            ("Países", &stats.top_countries),
            ("Publicaciones por año", &stats.years),
        ];
        for (title, rows) in sections {
            if rows.is_empty() {
                continue;
            }
            println!("## {}", title);
            for row in rows {
                println!("{:>6}  {}", row.count, row.label);
            }
            println!();
        }
    }

    if let Some(ref header) = view.header {
        if !header.related_queries.is_empty() {
            println!("## Búsquedas relacionadas");
            for related in &header.related_queries {
                println!("- {}", related);
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    let args = parse_args()?;

    if args.init_settings {
        let path = settings_path()?;
        init_settings(&path)?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    let _guard = init_logging(&default_log_dir())?;

    let settings = get_settings()?;
    debug!("Using settings: {:?}", settings);

    let backend = HttpBackend::from_settings(&settings)?;
    let orchestrator = QueryOrchestrator::new(Arc::new(backend));
    let mut updates = orchestrator.subscribe();

    let Some(handle) = orchestrator.submit(&args.query) else {
        return Err(USAGE.to_string());
    };
    info!("Waiting on query {}", handle.key().id);

    let mut shown_facts = false;
    let done = handle.wait();
    tokio::pin!(done);

    loop {
        tokio::select! {
            _ = &mut done => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if shown_facts || !snapshot.loading {
                    continue;
                }
                if let Some(ref facts) = snapshot.facts {
                    println!("Mientras esperas...");
                    for fact in facts {
                        println!("  * {}", fact);
                    }
                    println!();
                    shown_facts = true;
                }
            }
        }
    }

    let snapshot = orchestrator.snapshot();
    if snapshot.errors.any() {
        warn!("Query {:?} settled with errors: {:?}", snapshot.query(), snapshot.errors);
    }
    if let Some(ref error) = snapshot.errors.stats {
        println!("No se pudieron calcular las estadísticas: {}\n", error);
    }
    if let Some(finding) = snapshot.summary().and_then(|s| s.key_findings.first()) {
        orchestrator.toggle_finding(&finding.title);
    }
    print_results(&get_results(&orchestrator.snapshot()));

    if let Some(n) = args.open {
        let id = snapshot
            .citations
            .entries()
            .get(n.wrapping_sub(1))
            .map(|p| p.id.clone())
            .ok_or_else(|| format!("No bibliography entry {}", n))?;

        orchestrator.open_publication(&id);
        if let Some(details) = get_open_publication(&orchestrator.snapshot()) {
            println!("\n# {}", details.title);
            println!("{}", details.byline);
            println!("Citado {} veces", details.cited_by_count);
            if let Some(url) = details.source_url {
                println!("{}", url);
            }
        }
        orchestrator.close_publication();
    }

    Ok(())
}
