//! Print the OpenAPI document as pretty JSON on stdout.

use color_eyre::eyre::{Result, WrapErr};
use studio_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise OpenAPI document")?;
    println!("{json}");
    Ok(())
}
