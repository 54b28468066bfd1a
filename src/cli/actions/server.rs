use crate::{api, cli::actions::Action};
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, dsn } => {
            // Fail early on an unparseable connection string
            Url::parse(&dsn).context("invalid database connection string")?;

            api::new(port, dsn).await?;
        }
    }

    Ok(())
}
