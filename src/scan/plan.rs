use std::sync::Arc;

use crate::ats::{AtsConfig, AtsEndpoints};
use crate::config::{ConfigError, ScanConfig};
use crate::extractor::{RuleSet, location::CountryMatcher};

/// A companies file with every rule compiled, ready to run.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub companies: Vec<CompanyPlan>,
    pub allowed_locations: Vec<String>,
    pub endpoints: AtsEndpoints,
}

#[derive(Debug, Clone)]
pub struct CompanyPlan {
    pub name: String,
    pub careers_url: String,
    pub rules: Arc<RuleSet>,
    pub ats: Option<AtsConfig>,
    pub countries: CountryMatcher,
}

impl ScanPlan {
    /// Compile rules once for the whole run. Companies without overrides
    /// share the global rule set.
    pub fn compile(config: &ScanConfig) -> Result<Self, ConfigError> {
        if config.include.is_empty() {
            return Err(ConfigError::EmptyInclude);
        }
        let global = Arc::new(RuleSet::compile(&config.include, &config.exclude)?);

        let companies = config
            .companies
            .iter()
            .map(|company| {
                let rules = match (&company.include, &company.exclude) {
                    (None, None) => Arc::clone(&global),
                    (include, exclude) => Arc::new(RuleSet::compile(
                        include.as_ref().unwrap_or(&config.include),
                        exclude.as_ref().unwrap_or(&config.exclude),
                    )?),
                };
                Ok(CompanyPlan {
                    name: company.name.clone().unwrap_or_default(),
                    careers_url: company.careers_url.clone().unwrap_or_default(),
                    rules,
                    ats: company.ats.clone(),
                    countries: CountryMatcher::new(&company.countries),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            companies,
            allowed_locations: config.locations.clone(),
            endpoints: config.ats_endpoints.clone(),
        })
    }
}

impl CompanyPlan {
    pub fn new(name: impl Into<String>, careers_url: impl Into<String>, rules: Arc<RuleSet>) -> Self {
        Self {
            name: name.into(),
            careers_url: careers_url.into(),
            rules,
            ats: None,
            countries: CountryMatcher::default(),
        }
    }

    pub fn with_ats(mut self, ats: AtsConfig) -> Self {
        self.ats = Some(ats);
        self
    }

    pub fn with_countries<S: Into<String>>(mut self, countries: impl IntoIterator<Item = S>) -> Self {
        let countries: Vec<String> = countries.into_iter().map(Into::into).collect();
        self.countries = CountryMatcher::new(&countries);
        self
    }
}
