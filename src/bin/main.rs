use ontology_service::cli;

#[tokio::main]
async fn main() -> ontology_service::Result<()> {
    cli::main().await
}
