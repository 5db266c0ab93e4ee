//! Offline catalogue of known feature ids.

use livebox_core::FeatureId;
use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use crate::cli::{FeatureGroup, FeaturesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct CatalogueEntry {
    id: FeatureId,
    description: &'static str,
}

#[derive(Tabled)]
struct CatalogueRow {
    #[tabled(rename = "Feature")]
    id: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

fn catalogue(group: Option<FeatureGroup>) -> Vec<CatalogueEntry> {
    let ids: Vec<FeatureId> = match group {
        None => FeatureId::iter().collect(),
        Some(FeatureGroup::Wifi) => FeatureId::WIFI.to_vec(),
        Some(FeatureGroup::Wan) => FeatureId::WAN.to_vec(),
        Some(FeatureGroup::Devices) => FeatureId::DEVICE_MANAGEMENT.to_vec(),
        Some(FeatureGroup::Invoke) => FeatureId::INVOKE.to_vec(),
    };
    ids.into_iter()
        .map(|id| CatalogueEntry {
            id,
            description: id.description(),
        })
        .collect()
}

pub fn handle(args: &FeaturesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let entries = catalogue(args.group);
    let out = output::render_list(
        global.output,
        &entries,
        |e| CatalogueRow {
            id: e.id.as_str(),
            description: e.description,
        },
        |e| e.id.as_str().to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
