use anyhow::Result;
use log::info;
use std::path::PathBuf;

use cellpeak::metadata::FileIdKey;
use cellpeak::staleness::check_artifact;

/// Check an artifact against its raw files
pub fn run(artifact: PathBuf, raw: Vec<PathBuf>, key: FileIdKey) -> Result<()> {
    info!("cellPeak Staleness Check");
    info!("========================");
    info!("Artifact: {}", artifact.display());
    info!("");

    let report = check_artifact(&raw, &artifact, key);

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    // Stale artifacts exit non-zero so scripts can rebuild them
    if report.is_stale() {
        std::process::exit(1);
    }

    Ok(())
}
