//! Defines connection versioning type and functions

use crate::prelude::*;

use core::fmt::Display;

use crate::core::ics03_connection::error::ConnectionError;
use crate::core::ics04_channel::channel::Order;
use crate::proto::connection::Version as RawVersion;

/// Stores the identifier and the features supported by a version
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    /// unique version identifier
    identifier: String,
    /// list of features compatible with the specified identifier
    features: Vec<String>,
}

impl Version {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Checks whether the version has a matching version identifier and its
    /// feature set is a subset of the supported features
    pub fn verify_is_supported(&self, supported_versions: &[Version]) -> Result<(), ConnectionError> {
        let maybe_supported_version = find_supported_version(self, supported_versions)?;

        if self.features.is_empty() {
            return Err(ConnectionError::EmptyFeatures);
        }

        for feature in self.features.iter() {
            maybe_supported_version.verify_feature_supported(feature)?;
        }
        Ok(())
    }

    /// Checks whether the given feature is supported in this version
    pub fn verify_feature_supported(&self, feature: &str) -> Result<(), ConnectionError> {
        if !self.features.iter().any(|f| f == feature) {
            return Err(ConnectionError::FeatureNotSupported {
                feature: feature.to_string(),
            });
        }
        Ok(())
    }

    /// Checks whether channels of the given ordering may ride on this version.
    pub fn supports_order(&self, order: Order) -> bool {
        self.features.iter().any(|f| f == order.as_feature())
    }

    /// Returns the lists of supported versions
    pub fn compatibles() -> Vec<Self> {
        vec![Self {
            identifier: "1".to_string(),
            features: vec![
                Order::Ordered.as_feature().to_string(),
                Order::Unordered.as_feature().to_string(),
            ],
        }]
    }
}

impl TryFrom<RawVersion> for Version {
    type Error = ConnectionError;

    fn try_from(value: RawVersion) -> Result<Self, Self::Error> {
        if value.identifier.trim().is_empty() {
            return Err(ConnectionError::EmptyVersions);
        }
        for feature in value.features.iter() {
            if feature.trim().is_empty() {
                return Err(ConnectionError::EmptyFeatures);
            }
        }
        Ok(Version {
            identifier: value.identifier,
            features: value.features,
        })
    }
}

impl From<Version> for RawVersion {
    fn from(value: Version) -> Self {
        Self {
            identifier: value.identifier,
            features: value.features,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Version {{ identifier: {}, features: [{}] }}",
            self.identifier,
            self.features.join(", ")
        )
    }
}

/// Returns the lists of supported versions
pub fn get_compatible_versions() -> Vec<Version> {
    Version::compatibles()
}

/// Iterates over the ordered set of compatible IBC versions and selects the
/// first version with a version identifier that is supported by the
/// counterparty. The returned version contains a feature set with the
/// intersection of the features supported by the source and counterparty
/// chains. If the feature set intersection is nil then the search for a
/// compatible version continues.
pub fn pick_version(
    supported_versions: &[Version],
    counterparty_versions: &[Version],
) -> Result<Version, ConnectionError> {
    let mut intersection: Vec<Version> = Vec::new();
    for sv in supported_versions.iter() {
        if let Ok(cv) = find_supported_version(sv, counterparty_versions) {
            if let Ok(feature_set) = get_feature_set_intersection(&sv.features, &cv.features) {
                intersection.push(Version {
                    identifier: cv.identifier,
                    features: feature_set,
                })
            }
        }
    }

    intersection.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    intersection
        .into_iter()
        .next()
        .ok_or(ConnectionError::NoCommonVersion)
}

/// Returns the version from the list of supported versions that matches the
/// given reference version.
fn find_supported_version(
    version: &Version,
    supported_versions: &[Version],
) -> Result<Version, ConnectionError> {
    supported_versions
        .iter()
        .find(|sv| sv.identifier == version.identifier)
        .ok_or(ConnectionError::VersionNotSupported {
            version: version.clone(),
        })
        .cloned()
}

/// Returns the intersections of supported features by a host and the
/// counterparty features.
fn get_feature_set_intersection(
    supported_features: &[String],
    counterparty_features: &[String],
) -> Result<Vec<String>, ConnectionError> {
    let feature_set_intersection: Vec<String> = supported_features
        .iter()
        .filter(|f| counterparty_features.contains(f))
        .cloned()
        .collect();

    if feature_set_intersection.is_empty() {
        return Err(ConnectionError::NoCommonFeatures);
    }

    Ok(feature_set_intersection)
}
