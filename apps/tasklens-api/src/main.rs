use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = tasklens_api::Args::parse();

	tasklens_api::run(args).await
}
