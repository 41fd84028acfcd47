use crate::config::toml_config::DefaultsConfig;
use crate::domain::model::ServiceInputs;
use crate::domain::ports::Prompter;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Line-based prompter over any reader/writer pair, normally stdin/stderr.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompter<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, label: &str, default: &str) -> Result<String> {
        write!(self.output, "{} [{}]: ", label, default)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        let answer = line.trim();

        // EOF or a bare newline takes the suggestion.
        if read == 0 || answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

/// Accepts every suggestion without asking.
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn ask(&mut self, label: &str, default: &str) -> Result<String> {
        tracing::debug!("Using suggested {}: {}", label, default);
        Ok(default.to_string())
    }
}

/// Values supplied on the command line; each one skips its prompt.
#[derive(Debug, Clone, Default)]
pub struct InputOverrides {
    pub name: Option<String>,
    pub route: Option<String>,
    pub port: Option<String>,
}

/// Collects name, route and port, in that order.
pub fn collect_inputs<P: Prompter + ?Sized>(
    prompter: &mut P,
    defaults: &DefaultsConfig,
    overrides: &InputOverrides,
) -> Result<ServiceInputs> {
    let name = match &overrides.name {
        Some(name) => name.clone(),
        None => prompter.ask("Service name", defaults.name())?,
    };

    let route = match &overrides.route {
        Some(route) => route.clone(),
        None => prompter.ask("Route", &defaults.route_for(&name))?,
    };

    let port = match &overrides.port {
        Some(port) => port.clone(),
        None => prompter.ask("Port", defaults.port())?,
    };

    Ok(ServiceInputs { name, route, port })
}
