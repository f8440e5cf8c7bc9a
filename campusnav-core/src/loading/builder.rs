use log::{info, warn};

use super::catalog::load_catalog;
use super::config::CampusModelConfig;
use super::features::{NetworkFeatures, PointFeature, read_network};
use super::graph_builder::build_graph;
use crate::model::{CampusModel, CampusModelMeta, DestinationCatalog};
use crate::{Error, Meters};

/// Creates a campus model based on the provided configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the input files
/// cannot be read
pub fn create_campus_model(config: &CampusModelConfig) -> Result<CampusModel, Error> {
    validate_config(config)?;

    info!(
        "Processing campus network: {}",
        config.network_path.display()
    );
    let features = read_network(&config.network_path)?;

    info!(
        "Processing destination catalog: {}",
        config.catalog_path.display()
    );
    let catalog = load_catalog(&config.catalog_path)?;

    let meta = CampusModelMeta {
        routing: config.routing.clone(),
        policy: config.policy.clone(),
    };
    let model = build_campus_model(&features, catalog, config.snap_tolerance_m, meta);

    info!("{}", model.summary());
    Ok(model)
}

/// Builds a model from in-memory features.
///
/// Catalog destinations without a same-named point feature are added as
/// destination nodes, so path segments passing through them connect.
pub fn build_campus_model(
    features: &NetworkFeatures,
    catalog: DestinationCatalog,
    snap_tolerance: Meters,
    meta: CampusModelMeta,
) -> CampusModel {
    let mut points = features.points.clone();
    for destination in catalog.iter() {
        let known = points
            .iter()
            .any(|point| destination.is_named(&point.name));
        if !known {
            points.push(PointFeature {
                coordinate: destination.point().into(),
                name: destination.name.clone(),
            });
        }
    }

    let graph = build_graph(&features.lines, &points, snap_tolerance);
    let model = CampusModel::new(graph, catalog, meta);
    validate_policy_names(&model);
    model
}

fn validate_config(config: &CampusModelConfig) -> Result<(), Error> {
    config.validate()?;

    for path in [&config.network_path, &config.catalog_path] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )));
        }
    }

    Ok(())
}

/// Warns about access policy entries naming places the catalog lacks
fn validate_policy_names(model: &CampusModel) {
    let missing: Vec<&str> = model
        .meta
        .policy
        .referenced_names()
        .filter(|name| model.catalog.find_by_name(name).is_none())
        .collect();

    if !missing.is_empty() {
        warn!(
            "{} access policy entries name unknown destinations and will be ignored: {}",
            missing.len(),
            missing.join(", ")
        );
    }
}
