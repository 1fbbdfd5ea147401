//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, RequestArgs};
use crate::client::{Client, RequestOptions};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::PageRequest;
use crate::types::{Domain, JsonValue, LogLevel, Method};
use futures::StreamExt;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: ClientConfig,
}

impl Runner {
    /// Create a runner, loading and overriding the client config
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(domain) = &cli.domain {
            config.domain = Domain::from(domain.clone());
        }
        if let Some(token) = &cli.token {
            config.access_token = Some(token.clone());
        }
        config.validate()?;

        Ok(Self { cli, config })
    }

    /// The effective client config
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Log level for the subscriber: `--verbose` wins over the config
    pub fn log_level(&self) -> LogLevel {
        if self.cli.verbose {
            LogLevel::Debug
        } else {
            self.config.log_level
        }
    }

    /// Run the CLI command, writing to stdout
    pub async fn run(&self) -> Result<()> {
        self.run_with_output(&mut std::io::stdout()).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<()> {
        let client = Client::new(self.config.clone())?;

        match &self.cli.command {
            Commands::Get { request } => {
                let options = build_request(request);
                self.single(&client, Method::GET, &request.path, options, out)
                    .await
            }
            Commands::Post { request, body } => {
                let mut options = build_request(request);
                if let Some(body) = body {
                    let body: JsonValue = serde_json::from_str(body)
                        .map_err(|e| Error::config(format!("Invalid body JSON: {e}")))?;
                    options = options.json(body);
                }
                self.single(&client, Method::POST, &request.path, options, out)
                    .await
            }
            Commands::List {
                request,
                max_pages,
                items,
            } => {
                self.list(&client, request, *max_pages, items.as_deref(), out)
                    .await
            }
        }
    }

    /// Send one request and print the response
    async fn single<W: Write>(
        &self,
        client: &Client,
        method: Method,
        path: &str,
        options: RequestOptions,
        out: &mut W,
    ) -> Result<()> {
        let response = client.request(method, path, options).await?;
        self.emit(out, &serde_json::to_value(&response)?)?;

        if response.is_success() {
            Ok(())
        } else {
            Err(Error::api(response.code, response.msg))
        }
    }

    /// Follow the cursor and print each page
    async fn list<W: Write>(
        &self,
        client: &Client,
        request: &RequestArgs,
        max_pages: Option<usize>,
        items_field: Option<&str>,
        out: &mut W,
    ) -> Result<()> {
        let mut pages = client
            .paginate(Method::GET, &request.path, build_request(request))
            .pages();
        let limit = max_pages.unwrap_or(usize::MAX);
        let mut count = 0;

        while count < limit {
            let Some(page) = pages.next().await else {
                break;
            };
            let Some(mut page) = page else {
                return Err(Error::Other(format!(
                    "Page {} of {} could not be fetched",
                    count + 1,
                    request.path
                )));
            };
            count += 1;

            match items_field {
                Some(field) => {
                    if let Some(JsonValue::Array(values)) = page.remove(field) {
                        for value in &values {
                            self.emit(out, value)?;
                        }
                    }
                }
                None => self.emit(out, &JsonValue::Object(page))?,
            }
        }

        info!(pages = count, path = %request.path, "Listing finished");
        Ok(())
    }

    /// Write one JSON document in the chosen format
    fn emit<W: Write>(&self, out: &mut W, value: &JsonValue) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        writeln!(out, "{text}")?;
        Ok(())
    }
}

/// Turn CLI arguments into request parameters
fn build_request(args: &RequestArgs) -> PageRequest {
    let mut request = PageRequest::new();
    for (key, value) in &args.path_params {
        request = request.path_param(key, value);
    }
    for (key, value) in &args.query {
        request = request.query(key, value);
    }
    request
}
