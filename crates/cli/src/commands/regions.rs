//! regions command - List supported region codes
//!
//! Needs no credentials or network access.

use serde::Serialize;
use spaces_core::Region;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Debug, Serialize)]
struct RegionsOutput {
    regions: Vec<RegionInfo>,
}

#[derive(Debug, Serialize)]
struct RegionInfo {
    code: &'static str,
    endpoint: String,
}

fn regions() -> Vec<RegionInfo> {
    Region::ALL
        .into_iter()
        .map(|region| RegionInfo {
            code: region.as_str(),
            endpoint: region
                .endpoint()
                .map(|url| url.to_string())
                .unwrap_or_default(),
        })
        .collect()
}

/// Execute the regions command
pub fn execute(formatter: &Formatter) -> ExitCode {
    let regions = regions();

    if formatter.is_json() {
        formatter.json(&RegionsOutput { regions });
    } else {
        for region in &regions {
            formatter.println(&format!("{:<6} {}", region.code, region.endpoint));
        }
    }

    ExitCode::Success
}
