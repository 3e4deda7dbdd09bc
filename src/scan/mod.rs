//! Per-company extraction and cross-company reconciliation.
//!
//! Companies are processed one at a time in configured order. Each one either
//! ends `Done` or `Skipped`; a failed fetch only costs that company its
//! results. A posting's normalized link may be claimed once per run, and the
//! first company to claim it keeps it.

pub mod plan;


pub use plan::{CompanyPlan, ScanPlan};

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::ats::{self, AtsConfig, AtsEndpoints, AtsKind};
use crate::extractor::{
    Candidate, Posting, extract_postings,
    location::is_allowed,
    urls::normalize,
};
use crate::fetcher::PageSource;

/// Mutable state shared across companies for one run.
#[derive(Debug, Default)]
pub struct ScanContext {
    claimed: HashSet<String>,
    postings: Vec<Posting>,
}

impl ScanContext {
    /// Claims a dedup key. Returns false if an earlier posting holds it.
    pub fn claim(&mut self, key: String) -> bool {
        self.claimed.insert(key)
    }

    pub fn is_claimed(&self, key: &str) -> bool {
        self.claimed.contains(key)
    }

    pub fn push(&mut self, posting: Posting) {
        self.postings.push(posting);
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn into_postings(self) -> Vec<Posting> {
        self.postings
    }
}

/// Where a company's postings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingOrigin {
    Static,
    Ats(AtsKind),
    /// Neither the page nor any ATS produced a candidate.
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingUrl,
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyStatus {
    Done {
        origin: PostingOrigin,
        found: usize,
        kept: usize,
    },
    Skipped(SkipReason),
}

impl CompanyStatus {
    fn touched_network(&self) -> bool {
        matches!(
            self,
            Self::Done { .. } | Self::Skipped(SkipReason::FetchFailed(_))
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyOutcome {
    pub company: String,
    pub status: CompanyStatus,
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub postings: Vec<Posting>,
    pub outcomes: Vec<CompanyOutcome>,
}

impl ScanReport {
    pub fn skipped(&self) -> impl Iterator<Item = &CompanyOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, CompanyStatus::Skipped(_)))
    }
}

pub struct Scanner<S> {
    source: S,
    politeness_delay: Duration,
}

impl<S: PageSource> Scanner<S> {
    pub fn new(source: S, politeness_delay: Duration) -> Self {
        Self {
            source,
            politeness_delay,
        }
    }

    pub async fn run(&self, plan: &ScanPlan) -> ScanReport {
        let mut ctx = ScanContext::default();
        let mut outcomes = Vec::with_capacity(plan.companies.len());

        for company in &plan.companies {
            let status = self.scan_company(company, plan, &mut ctx).await;
            let pause = status.touched_network() && !self.politeness_delay.is_zero();
            outcomes.push(CompanyOutcome {
                company: company.name.clone(),
                status,
            });
            if pause {
                sleep(self.politeness_delay).await;
            }
        }

        info!(
            companies = outcomes.len(),
            postings = ctx.postings().len(),
            "scan finished"
        );
        ScanReport {
            postings: ctx.into_postings(),
            outcomes,
        }
    }

    #[instrument(skip_all, fields(company = %company.name))]
    pub async fn scan_company(
        &self,
        company: &CompanyPlan,
        plan: &ScanPlan,
        ctx: &mut ScanContext,
    ) -> CompanyStatus {
        if company.name.trim().is_empty() {
            debug!("no company name configured");
            return CompanyStatus::Skipped(SkipReason::MissingName);
        }
        let careers_url = company.careers_url.trim();
        if careers_url.is_empty() {
            debug!("no careers url configured");
            return CompanyStatus::Skipped(SkipReason::MissingUrl);
        }

        let html = match self.source.fetch_page(careers_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(
                    url = careers_url,
                    retriable = e.should_retry(),
                    "fetch failed: {}",
                    e
                );
                return CompanyStatus::Skipped(SkipReason::FetchFailed(e.to_string()));
            }
        };

        let mut candidates = extract_postings(careers_url, &html, &company.rules);
        let mut origin = PostingOrigin::Static;
        if candidates.is_empty() {
            (origin, candidates) = match self.ats_fallback(company, &plan.endpoints, &html).await {
                Some((kind, found)) => (PostingOrigin::Ats(kind), found),
                None => (PostingOrigin::Nothing, Vec::new()),
            };
        }

        let found = candidates.len();
        let kept = candidates
            .into_iter()
            .filter(|candidate| admit(company, &plan.allowed_locations, candidate, ctx))
            .count();

        info!(?origin, found, kept, "company done");
        CompanyStatus::Done {
            origin,
            found,
            kept,
        }
    }

    /// Configured ATS first, then whatever the page markup points at.
    async fn ats_fallback(
        &self,
        company: &CompanyPlan,
        endpoints: &AtsEndpoints,
        html: &str,
    ) -> Option<(AtsKind, Vec<Candidate>)> {
        if let Some(configured) = &company.ats
            && let Some(found) = self.try_ats(endpoints, configured).await
        {
            return Some((configured.kind, found));
        }

        let detected = ats::detect(html)?;
        if company.ats.as_ref() == Some(&detected) {
            return None;
        }
        debug!(provider = %detected.kind, token = %detected.token, "ats detected in page");
        let found = self.try_ats(endpoints, &detected).await?;
        Some((detected.kind, found))
    }

    async fn try_ats(&self, endpoints: &AtsEndpoints, ats: &AtsConfig) -> Option<Vec<Candidate>> {
        match ats::fetch_postings(&self.source, endpoints, ats).await {
            Ok(found) if !found.is_empty() => Some(found),
            Ok(_) => {
                debug!(provider = %ats.kind, token = %ats.token, "ats listing empty");
                None
            }
            Err(e) => {
                warn!(provider = %ats.kind, token = %ats.token, "ats fetch failed: {}", e);
                None
            }
        }
    }
}

/// Final gate for one candidate: rules over title and link, location
/// allow-list, then the run-wide dedup claim.
fn admit(
    company: &CompanyPlan,
    allowed_locations: &[String],
    candidate: &Candidate,
    ctx: &mut ScanContext,
) -> bool {
    let text = format!("{} {}", candidate.title, candidate.link);
    if !company.rules.matches(&text) {
        debug!(title = %candidate.title, "rejected by rules");
        return false;
    }

    let location = company.countries.guess(&text).unwrap_or_default();
    if !location.is_empty() && !is_allowed(location, allowed_locations) {
        debug!(title = %candidate.title, location, "location not allowed");
        return false;
    }

    if !ctx.claim(normalize(&candidate.link)) {
        debug!(link = %candidate.link, "link already claimed");
        return false;
    }

    ctx.push(Posting {
        company: company.name.trim().to_string(),
        title: candidate.title.clone(),
        link: candidate.link.clone(),
        location: location.to_string(),
    });
    true
}
