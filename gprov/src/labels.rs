//! Default labels and the provisioning attribution label.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::settings::schema::{non_empty, RawSettings};

/// Key of the attribution label.
pub const ATTRIBUTION_LABEL_KEY: &str = "goog-terraform-provisioned";

/// Value of the attribution label.
pub const ATTRIBUTION_LABEL_VALUE: &str = "true";

/// When the attribution label is added to a resource.
///
/// # Examples
///
/// ```
/// use gprov::labels::AttributionStrategy;
///
/// let strategy: AttributionStrategy = "PROACTIVE".parse().unwrap();
/// assert_eq!(strategy, AttributionStrategy::Proactive);
/// assert_eq!(strategy.to_string(), "PROACTIVE");
/// assert!("bogus".parse::<AttributionStrategy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AttributionStrategy {
    /// Only when the resource is created.
    #[default]
    #[serde(rename = "CREATION_ONLY")]
    CreateOnly,
    /// On creation and on every update.
    #[serde(rename = "PROACTIVE")]
    Proactive,
}

impl FromStr for AttributionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CREATION_ONLY" => Ok(Self::CreateOnly),
            "PROACTIVE" => Ok(Self::Proactive),
            _ => Err(Error::InvalidAttributionStrategy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AttributionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateOnly => write!(f, "CREATION_ONLY"),
            Self::Proactive => write!(f, "PROACTIVE"),
        }
    }
}

/// The lifecycle operation a resource is going through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOperation {
    /// The resource is being created.
    Create,
    /// The resource is being updated.
    Update,
}

/// Default labels plus attribution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelPolicy {
    /// Labels applied to every labelled resource.
    pub default_labels: BTreeMap<String, String>,
    /// Attribution strategy, `None` when attribution is disabled.
    pub attribution: Option<AttributionStrategy>,
}

impl LabelPolicy {
    /// Build the policy from settings.
    ///
    /// Attribution is on unless `add_terraform_attribution_label` is false.
    /// An explicit strategy is validated even when attribution is off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttributionStrategy`] for an unknown
    /// strategy string.
    ///
    /// # Examples
    ///
    /// ```
    /// use gprov::labels::{AttributionStrategy, LabelPolicy};
    /// use gprov::settings::RawSettings;
    ///
    /// let policy = LabelPolicy::from_settings(&RawSettings::default()).unwrap();
    /// assert_eq!(policy.attribution, Some(AttributionStrategy::CreateOnly));
    /// ```
    pub fn from_settings(settings: &RawSettings) -> Result<Self> {
        let strategy = non_empty(
            settings
                .terraform_attribution_label_addition_strategy
                .as_ref(),
        )
        .map(str::parse::<AttributionStrategy>)
        .transpose()?;

        let enabled = settings.add_terraform_attribution_label.unwrap_or(true);
        let attribution = enabled.then(|| strategy.unwrap_or_default());

        Ok(Self {
            default_labels: settings.default_labels.clone(),
            attribution,
        })
    }

    /// Labels to apply to a resource for `operation`.
    ///
    /// Resource labels override defaults with the same key. The attribution
    /// label is added on create when attribution is enabled, and on update
    /// too under [`AttributionStrategy::Proactive`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use gprov::labels::{LabelOperation, LabelPolicy, AttributionStrategy};
    ///
    /// let policy = LabelPolicy {
    ///     default_labels: BTreeMap::from([("team".to_string(), "infra".to_string())]),
    ///     attribution: Some(AttributionStrategy::CreateOnly),
    /// };
    /// let labels = policy.effective_labels(&BTreeMap::new(), LabelOperation::Create);
    /// assert_eq!(labels.get("goog-terraform-provisioned").map(String::as_str), Some("true"));
    ///
    /// let labels = policy.effective_labels(&BTreeMap::new(), LabelOperation::Update);
    /// assert!(!labels.contains_key("goog-terraform-provisioned"));
    /// ```
    #[must_use]
    pub fn effective_labels(
        &self,
        resource_labels: &BTreeMap<String, String>,
        operation: LabelOperation,
    ) -> BTreeMap<String, String> {
        let mut labels = self.default_labels.clone();
        labels.extend(
            resource_labels
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let attribute = match (self.attribution, operation) {
            (None, _) => false,
            (Some(_), LabelOperation::Create) => true,
            (Some(strategy), LabelOperation::Update) => strategy == AttributionStrategy::Proactive,
        };
        if attribute {
            labels.insert(
                ATTRIBUTION_LABEL_KEY.to_string(),
                ATTRIBUTION_LABEL_VALUE.to_string(),
            );
        }
        labels
    }
}
