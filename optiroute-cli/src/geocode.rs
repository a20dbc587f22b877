//! Geocode command implementation for the OptiRoute CLI.

use std::io::Write;

use clap::Parser;
use optiroute_core::{GeocodeCandidate, GeocodeQuery, Geocoder, PlaceCategory};
use optiroute_data::geocode::{
    DEFAULT_LIMIT, DEFAULT_NOMINATIM_BASE_URL, NominatimGeocoder, NominatimGeocoderConfig,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::render::{OutputFormat, render_candidates_text};
use crate::{
    ARG_GEOCODE_CATEGORY, ARG_GEOCODE_FORMAT, ARG_GEOCODE_LIMIT, ARG_GEOCODE_NOMINATIM_BASE_URL,
    ARG_GEOCODE_QUERY, CliError, ENV_GEOCODE_QUERY,
};

/// CLI arguments for the `geocode` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search a Nominatim server for an address or place name. \
                 A category widens the search with related terms, so a \
                 college search also matches universities and campuses.",
    about = "Search for an address"
)]
#[ortho_config(prefix = "OPTIROUTE")]
pub(crate) struct GeocodeArgs {
    /// Address or place name to search for.
    #[arg(value_name = "text")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Kind of place to look for (e.g. `college`, `train-station`).
    #[arg(long = ARG_GEOCODE_CATEGORY, value_name = "category")]
    #[serde(default)]
    pub(crate) category: Option<PlaceCategory>,
    /// Base URL for the Nominatim server.
    #[arg(long = ARG_GEOCODE_NOMINATIM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_base_url: Option<String>,
    /// Maximum number of candidates to return.
    #[arg(long = ARG_GEOCODE_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<u8>,
    /// Output format (`text` or `json`).
    #[arg(long = ARG_GEOCODE_FORMAT, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl GeocodeArgs {
    pub(crate) fn into_config(self) -> Result<GeocodeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GeocodeConfig::try_from(merged)
    }
}

/// Resolved `geocode` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GeocodeConfig {
    /// Query text plus optional category hint.
    pub(crate) query: GeocodeQuery,
    /// Base URL for the Nominatim service.
    pub(crate) nominatim_base_url: String,
    /// Maximum number of candidates.
    pub(crate) limit: u8,
    /// How results are printed.
    pub(crate) format: OutputFormat,
}

impl TryFrom<GeocodeArgs> for GeocodeConfig {
    type Error = CliError;

    fn try_from(args: GeocodeArgs) -> Result<Self, Self::Error> {
        let text = args.query.ok_or(CliError::MissingArgument {
            field: ARG_GEOCODE_QUERY,
            env: ENV_GEOCODE_QUERY,
        })?;
        let limit = args.limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(CliError::InvalidValue {
                field: ARG_GEOCODE_LIMIT,
                reason: "expected at least 1",
            });
        }

        let query = GeocodeQuery {
            text,
            category: args.category,
        };
        let nominatim_base_url = args
            .nominatim_base_url
            .unwrap_or_else(|| DEFAULT_NOMINATIM_BASE_URL.to_owned());

        Ok(Self {
            query,
            nominatim_base_url,
            limit,
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Builds the geocoder for the current geocode invocation.
pub(crate) trait GeocoderBuilder {
    fn build(&self, config: &GeocodeConfig) -> Result<Box<dyn Geocoder>, CliError>;
}

pub(crate) struct NominatimGeocoderBuilder;

impl GeocoderBuilder for NominatimGeocoderBuilder {
    fn build(&self, config: &GeocodeConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let geocoder_config = NominatimGeocoderConfig::new(config.nominatim_base_url.clone())
            .with_limit(config.limit);
        let geocoder = NominatimGeocoder::with_config(geocoder_config).map_err(|source| {
            CliError::BuildGeocoder {
                base_url: config.nominatim_base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(geocoder))
    }
}

pub(crate) fn run_geocode(args: GeocodeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_geocode_with(args, &NominatimGeocoderBuilder, &mut stdout)
}

pub(crate) fn run_geocode_with(
    args: GeocodeArgs,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let geocoder = builder.build(&config)?;
    let candidates = geocoder.search(&config.query)?;
    write_candidates(writer, &candidates, config.format)
}

fn write_candidates(
    writer: &mut dyn Write,
    candidates: &[GeocodeCandidate],
    format: OutputFormat,
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Text => render_candidates_text(candidates),
        OutputFormat::Json => {
            serde_json::to_string_pretty(candidates).map_err(CliError::SerialiseOutput)?
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<GeocodeConfig, CliError> {
    let merged = GeocodeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    GeocodeConfig::try_from(merged)
}
