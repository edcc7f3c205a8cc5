use clap::Parser;
use song_import::utils::{logger, validation::Validate};
use song_import::{
    read_songs, CliConfig, FailureRecorder, Importer, Result, SinkConfig, SupabaseSink,
};

async fn run(config: CliConfig) -> Result<()> {
    let sink_config = SinkConfig::from_env()?;
    sink_config.validate()?;

    let sink = SupabaseSink::new(&sink_config.supabase_url, &sink_config.supabase_key)?;
    let recorder = FailureRecorder::new(&config.output_dir);

    let table = read_songs(&config.csv_path)?;

    let mut importer = Importer::new(sink, recorder);
    importer.import_songs(&table).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = CliConfig::parse();
    logger::init_logger(config.verbose);

    tracing::info!("Starting song-import");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(config).await {
        Ok(()) => {
            tracing::info!("Import process completed");
        }
        Err(e) => {
            tracing::error!("Import failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
