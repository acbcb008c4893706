use anyhow::{Context, bail};
use clap::Args;
use graphline_batch::{BatchExecutor, BatchOptions, FetchResult};
use graphline_core::{Endpoints, GraphConfig, Identity, ReqwestTransport, RequestDescriptor};

#[derive(Clone, Debug, Args)]
pub struct ChangesArg {
    /// User access token sent with every request
    #[arg(long)]
    pub token: String,

    /// Comma-separated fields to fetch
    #[arg(long, default_value = "name,email")]
    pub fields: String,

    /// Only return changes after this time (GMT)
    #[arg(long, default_value = "")]
    pub since: String,

    /// Fail with a non-zero exit status if any entry failed
    #[arg(long)]
    pub strict: bool,

    #[arg(required = true)]
    pub ids: Vec<String>,
}

pub fn run(arg: ChangesArg, config: &GraphConfig) -> anyhow::Result<()> {
    let transport = ReqwestTransport::new(&config.http).context("failed to build HTTP client")?;
    let mut batch = BatchExecutor::new(
        transport,
        Endpoints::from_config(&config.endpoints),
        BatchOptions::from_config(&config.batch),
    )?;

    for id in &arg.ids {
        let descriptor = RequestDescriptor::user_changes(id, &arg.fields, &arg.token, &arg.since)?;
        batch
            .submit_descriptor(descriptor)
            .with_context(|| format!("failed to submit user {id}"))?;
    }

    let results = batch.run(|id, result| println!("{}", render_entry(id, result)));

    let failures = results.values().filter(|r| r.is_err()).count();
    println!("{} fetched, {} failed", results.len() - failures, failures);

    if arg.strict && failures > 0 {
        bail!("{failures} of {} requests failed", results.len());
    }
    Ok(())
}

fn render_entry(id: &Identity, result: &FetchResult) -> String {
    match result {
        Ok(value) => format!("{id}\t{value}"),
        Err(failure) => format!("{id}\terror: {failure}"),
    }
}
