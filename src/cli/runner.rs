//! Runs one parsed command against the API

use crate::cli::args::{
    Args, Command, GcCommand, OutputFormat, RegistryCommand, RepositoryCommand, TokenCommand,
};
use crate::client::ApiClient;
use crate::error::{CraasError, Result};
use crate::logging::Logger;
use crate::transport::{Outcome, RequestContext, TransportSettings};
use crate::{v1, v2};
use serde::Serialize;
use std::time::Duration;

pub struct Runner {
    args: Args,
    output: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(args.verbose)
        };

        Self { args, output }
    }

    pub fn output(&self) -> &Logger {
        &self.output
    }

    pub async fn run(&self) -> Result<()> {
        let timeout = Duration::from_secs(self.args.timeout);
        let ctx = RequestContext::background().with_timeout(timeout);
        self.output.detail(&format!("Endpoint: {}", self.args.endpoint));

        if self.args.output == OutputFormat::Text {
            self.output.section(self.args.command.title());
        }

        match &self.args.command {
            Command::Registries(command) => self.run_registries(&ctx, command).await?,
            Command::Repositories(command) => self.run_repositories(&ctx, command).await?,
            Command::Gc(command) => self.run_gc(&ctx, command).await?,
            Command::Tokens(command) => self.run_tokens(&ctx, command).await?,
        }

        self.output.detail(&format!(
            "Finished in {}",
            self.output.format_duration(self.output.elapsed())
        ));
        Ok(())
    }

    fn transport_settings(&self) -> TransportSettings {
        TransportSettings::default().with_timeout(self.args.timeout)
    }

    fn v1_client(&self) -> Result<v1::Client> {
        v1::Client::builder(&self.args.token, &self.args.endpoint)
            .transport_settings(self.transport_settings())
            .build()
    }

    fn v2_client(&self) -> Result<v2::Client> {
        v2::Client::builder(&self.args.token, &self.args.endpoint)
            .transport_settings(self.transport_settings())
            .build()
    }

    /// Print `value` as JSON, or hand it to `text` for human-readable output
    fn emit<T: Serialize>(
        &self,
        value: &T,
        outcome: &Outcome,
        text: impl FnOnce(&Logger, &T),
    ) -> Result<()> {
        self.output.detail(&format!("HTTP status: {}", outcome.status()));
        match self.args.output {
            OutputFormat::Json => self.output.raw(&render_json(value)?),
            OutputFormat::Text => text(&self.output, value),
        }
        Ok(())
    }

    async fn run_registries(&self, ctx: &RequestContext, command: &RegistryCommand) -> Result<()> {
        let client = self.v1_client()?;
        let registries = client.registries();

        match command {
            RegistryCommand::List => {
                let (list, outcome) = registries.list(ctx).await?;
                self.emit(&list, &outcome, |out, list| {
                    let items: Vec<String> = list
                        .iter()
                        .map(|r| {
                            format!("{} {} ({:?}, {:.2}% used)", r.id, r.name, r.status, r.used)
                        })
                        .collect();
                    out.list("Registries", &items);
                })
            }
            RegistryCommand::Get { registry_id } => {
                let (registry, outcome) = registries.get(ctx, registry_id).await?;
                self.emit(&registry, &outcome, |out, r| {
                    out.summary_kv(
                        &r.name,
                        &[
                            ("ID", r.id.clone()),
                            ("Status", format!("{:?}", r.status)),
                            ("Created", r.created_at.to_rfc3339()),
                            ("Size", out.format_size(r.size.max(0) as u64)),
                            ("Limit", out.format_size(r.size_limit.max(0) as u64)),
                        ],
                    );
                })
            }
            RegistryCommand::Create { name } => {
                let (registry, outcome) = registries.create(ctx, name).await?;
                self.emit(&registry, &outcome, |out, r| {
                    out.success(&format!("Registry {} created with id {}", r.name, r.id));
                })
            }
            RegistryCommand::Delete { registry_id } => {
                registries.delete(ctx, registry_id).await?;
                self.output.success(&format!("Registry {} deleted", registry_id));
                Ok(())
            }
        }
    }

    async fn run_repositories(
        &self,
        ctx: &RequestContext,
        command: &RepositoryCommand,
    ) -> Result<()> {
        let client = self.v1_client()?;
        let repositories = client.repositories();

        match command {
            RepositoryCommand::List { registry_id } => {
                let (list, outcome) = repositories.list_repositories(ctx, registry_id).await?;
                self.emit(&list, &outcome, |out, list| {
                    let items: Vec<String> = list
                        .iter()
                        .map(|r| format!("{} ({})", r.name, out.format_size(r.size.max(0) as u64)))
                        .collect();
                    out.list("Repositories", &items);
                })
            }
            RepositoryCommand::Images {
                registry_id,
                repository,
            } => {
                let (images, outcome) = repositories
                    .list_images(ctx, registry_id, repository)
                    .await?;
                self.emit(&images, &outcome, |out, images| {
                    let items: Vec<String> = images
                        .iter()
                        .map(|i| format!("{} [{}]", i.digest, i.tags.join(", ")))
                        .collect();
                    out.list("Images", &items);
                })
            }
            RepositoryCommand::Tags {
                registry_id,
                repository,
            } => {
                let (tags, outcome) = repositories.list_tags(ctx, registry_id, repository).await?;
                self.emit(&tags, &outcome, |out, tags| out.list("Tags", tags))
            }
        }
    }

    async fn run_gc(&self, ctx: &RequestContext, command: &GcCommand) -> Result<()> {
        let client = self.v1_client()?;
        let gc = client.gc();

        match command {
            GcCommand::Size { registry_id } => {
                let (size, outcome) = gc.garbage_size(ctx, registry_id).await?;
                self.emit(&size, &outcome, |out, size| {
                    if size.size_summary <= 0 {
                        out.info("Nothing to collect");
                        return;
                    }
                    let bytes = |value: i64| out.format_size(value.max(0) as u64);
                    out.summary_kv(
                        "Garbage",
                        &[
                            ("Non-referenced", bytes(size.size_non_referenced)),
                            ("Untagged", bytes(size.size_untagged)),
                            ("Total", bytes(size.size_summary)),
                        ],
                    );
                })
            }
            GcCommand::Start {
                registry_id,
                delete_untagged,
            } => {
                if *delete_untagged {
                    self.output
                        .warning("Untagged images will be deleted along with unreferenced layers");
                }
                let opts = v1::StartGcOpts {
                    delete_untagged: *delete_untagged,
                };
                let outcome = gc.start(ctx, registry_id, Some(opts)).await?;
                self.output.success(&format!(
                    "Garbage collection started for {} (status {})",
                    registry_id,
                    outcome.status()
                ));
                Ok(())
            }
        }
    }

    async fn run_tokens(&self, ctx: &RequestContext, command: &TokenCommand) -> Result<()> {
        let client = self.v2_client()?;
        let tokens = client.tokens();

        match command {
            TokenCommand::List {
                limit,
                offset,
                search,
            } => {
                let opts = v2::ListOpts {
                    limit: *limit,
                    offset: *offset,
                    search: search.clone(),
                    ..Default::default()
                };
                let (list, outcome) = tokens.list(ctx, &opts).await?;
                self.emit(&list, &outcome, |out, list| {
                    let items: Vec<String> = list
                        .tokens
                        .iter()
                        .map(|t| {
                            format!(
                                "{} {} ({})",
                                t.id.as_deref().unwrap_or("-"),
                                t.name.as_deref().unwrap_or("-"),
                                t.status.as_deref().unwrap_or("unknown")
                            )
                        })
                        .collect();
                    out.list(&format!("Tokens ({} total)", list.total_count), &items);
                })
            }
            TokenCommand::Get { token_id } => {
                let (token, outcome) = tokens.get(ctx, token_id).await?;
                self.emit(&token, &outcome, |out, t| {
                    out.summary_kv(
                        t.name.as_deref().unwrap_or(token_id),
                        &[
                            ("ID", t.id.clone().unwrap_or_default()),
                            ("Status", t.status.clone().unwrap_or_default()),
                            ("Read-write", t.scope.mode_rw.to_string()),
                            ("All registries", t.scope.all_registries.to_string()),
                        ],
                    );
                })
            }
            TokenCommand::Create {
                name,
                read_write,
                registry_ids,
            } => {
                let request = v2::TokenV2 {
                    name: Some(name.clone()),
                    scope: v2::Scope {
                        mode_rw: *read_write,
                        all_registries: registry_ids.is_empty(),
                        registry_ids: registry_ids.clone(),
                    },
                    ..Default::default()
                };
                let (token, outcome) = tokens.create(ctx, &request, None).await?;
                self.emit(&token, &outcome, |out, t| {
                    out.success(&format!("Token {} created", t.id.as_deref().unwrap_or(name)));
                    if let Some(secret) = &t.token {
                        out.info("The token value is shown only once");
                        out.raw(secret);
                    }
                })
            }
            TokenCommand::Revoke { token_id } => {
                tokens.revoke(ctx, token_id).await?;
                self.output.success(&format!("Token {} revoked", token_id));
                Ok(())
            }
            TokenCommand::Delete { token_id } => {
                tokens.delete(ctx, token_id).await?;
                self.output.success(&format!("Token {} deleted", token_id));
                Ok(())
            }
        }
    }
}

fn render_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(CraasError::Output)
}
