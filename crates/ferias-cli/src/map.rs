//! `map` command: geocode records and render the HTML map.

use std::path::Path;

use ferias_core::{AppConfig, FeriaRecord, GeocodedRecord, MappedFeria};
use ferias_geocode::{resolve_all_with, AddressResolver, NominatimClient};

use crate::{progress, render, store};

/// Geocodes `records` one at a time, writes the map to `output`, and
/// optionally the resolved records to `geocoded_out`.
///
/// # Errors
///
/// Returns an error if the geocoding client cannot be built, no record could
/// be placed, or an output file cannot be written. Individual records that
/// fail to geocode are logged and left off the map.
pub(crate) async fn run_map(
    config: &AppConfig,
    records: Vec<FeriaRecord>,
    output: &Path,
    geocoded_out: Option<&Path>,
) -> anyhow::Result<()> {
    if records.is_empty() {
        anyhow::bail!("no ferias to map");
    }

    let client = NominatimClient::with_base_url(
        &config.user_agent,
        config.request_timeout_secs,
        &config.geocoder_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build geocoding client: {e}"))?;
    let mut resolver = AddressResolver::from_config(client, config);

    let total = records.len();
    tracing::info!(total, locality = %config.locality, "geocoding ferias");
    let pb = progress::bar(total, "ferias");
    let (geocoded, summary) = resolve_all_with(&mut resolver, records, |g| {
        pb.set_message(g.record.street.clone());
        pb.inc(1);
    })
    .await;
    pb.finish_and_clear();

    let mapped = mapped_only(geocoded);
    if mapped.is_empty() {
        anyhow::bail!("none of the {total} ferias could be geocoded; no map generated");
    }

    if let Some(path) = geocoded_out {
        store::write_json(path, &mapped)?;
    }

    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    let html = render::render_map(&mapped, &generated_at);
    std::fs::write(output, html)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", output.display()))?;

    println!(
        "generated map with {}/{total} ferias at {}",
        summary.resolved,
        output.display()
    );
    if summary.failed > 0 {
        println!(
            "warning: {} ferias could not be geocoded and were left off the map",
            summary.failed
        );
    }
    Ok(())
}

/// Drops failed records, keeping input order.
pub(crate) fn mapped_only(geocoded: Vec<GeocodedRecord>) -> Vec<MappedFeria> {
    geocoded
        .into_iter()
        .filter_map(GeocodedRecord::into_mapped)
        .collect()
}
