//! Print the OpenAPI document as JSON.

use color_eyre::eyre::Result;
use tidytext::doc::ApiDoc;
use utoipa::OpenApi;

#[expect(clippy::print_stdout, reason = "the document is this tool's output")]
fn main() -> Result<()> {
    color_eyre::install()?;
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
