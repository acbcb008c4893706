use anyhow::Context;
use clap::{Args, Subcommand};
use graphline_app::{FieldList, GraphApp, Subscription};
use graphline_core::{GraphConfig, ReqwestTransport};
use tabled::Tabled;

use crate::ui::table::Formatter;

#[derive(Clone, Debug, Subcommand)]
pub enum SubscriptionCommands {
    #[command(alias = "ls", name = "list")]
    List,
    #[command(alias = "a", name = "add")]
    Add(AddArg),
}

#[derive(Clone, Debug, Args)]
pub struct AddArg {
    /// Token echoed back by the verification request
    #[arg(long)]
    pub verify_token: String,

    /// Absolute URL that answers the verification challenge
    #[arg(long)]
    pub callback_url: String,

    /// Object type, e.g. user or permissions
    #[arg(long, default_value = "user")]
    pub object: String,

    #[arg(long, value_delimiter = ',', required = true)]
    pub fields: Vec<String>,
}

#[derive(Tabled)]
struct SubscriptionRow {
    object:       String,
    callback_url: String,
    fields:       String,
    active:       bool,
}

impl From<Subscription> for SubscriptionRow {
    fn from(s: Subscription) -> Self {
        Self {
            object:       s.object.to_string(),
            callback_url: s.callback_url,
            fields:       s.fields.join(","),
            active:       s.active,
        }
    }
}

pub fn run(cmd: SubscriptionCommands, config: &GraphConfig) -> anyhow::Result<()> {
    let transport = ReqwestTransport::new(&config.http).context("failed to build HTTP client")?;
    let app = GraphApp::from_config(transport, config).context("failed to obtain app access token")?;

    match cmd {
        SubscriptionCommands::List => {
            let subs = app.subscriptions().context("failed to list subscriptions")?;
            if subs.is_empty() {
                println!("no subscriptions for app {}", app.app_id());
                return Ok(());
            }
            let table = Formatter {
                header: Some(format!("subscriptions for app {}", app.app_id())),
                footer: None,
            }
            .build(subs.into_iter().map(SubscriptionRow::from));
            println!("{table}");
        }
        SubscriptionCommands::Add(arg) => {
            let fields = FieldList::Collection(arg.fields);
            let response = app
                .add_subscription(&arg.verify_token, &arg.callback_url, arg.object.as_str(), &fields)
                .context("failed to add subscription")?;
            match response {
                Some(value) => println!("{value}"),
                None => println!("nothing sent"),
            }
        }
    }
    Ok(())
}
