use ambienti::api;
use anyhow::Result;

// Print the OpenAPI document for the service routes
fn main() -> Result<()> {
    println!("{}", api::openapi().to_pretty_json()?);

    Ok(())
}
