use anyhow::{Context, Result};
use gh_autolink::{Config, ExtensionKind, MarkdownRenderer};
use std::fs;
use std::io::{self, Read, Write};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber, `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads markdown from the configured file or stdin.
fn read_input(config: &Config) -> Result<String> {
    if config.reads_stdin() {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read markdown from stdin")?;
        return Ok(content);
    }

    fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))
}

fn main() -> Result<()> {
    init_tracing();

    let config = Config::parse();

    if config.list {
        for kind in ExtensionKind::ALL {
            let marker = if kind.requires_repository() {
                " (requires repository)"
            } else {
                ""
            };
            println!("{}{}", kind, marker);
        }
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    let renderer = match config.extensions()? {
        Some(extensions) => {
            if config.repository.is_none()
                && extensions.iter().any(|ext| ext.kind().requires_repository())
            {
                warn!("No --repository given, bare references will render unlinked");
            }
            MarkdownRenderer::with_extensions(extensions)
        }
        None => MarkdownRenderer::new(),
    };

    let content = read_input(&config)?;
    let html = renderer
        .render(&content)
        .context("Failed to render markdown")?;

    match &config.output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!(path = %path.display(), bytes = html.len(), "Wrote HTML");
        }
        None => {
            io::stdout()
                .write_all(html.as_bytes())
                .context("Failed to write HTML to stdout")?;
        }
    }

    Ok(())
}
