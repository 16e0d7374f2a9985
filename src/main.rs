//! Exports 2024 archive weather for the default O'ahu locations into the
//! current directory. Set `RUST_LOG` to change verbosity (default `info`).

use weather_archive::config::default_date_range;
use weather_archive::{ArchiveClient, WeatherExportError, WeatherExporter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), WeatherExportError> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let exporter = WeatherExporter::builder()
        .source(ArchiveClient::builder().build()?)
        .date_range(default_date_range()?)
        .build();

    for report in exporter.run().await? {
        println!("{}", report);
    }
    Ok(())
}
