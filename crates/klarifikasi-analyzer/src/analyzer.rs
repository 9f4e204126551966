//! Core ClaimAnalyzer implementation

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::heuristic::{candidate_urls, synthesize_with_articles, HeuristicSynthesizer};
use crate::parser::interpret;
use crate::prompt::PromptComposer;
use crate::types::{VerificationReport, SEARCH_UNAVAILABLE_MESSAGE};
use klarifikasi_domain::{
    ArticleFetcher, ClaimVerdict, GenerativeModel, Generation, LlmError, ScrapedArticle, SearchHit,
    SearchProvider,
};
use klarifikasi_scraper::SourceScraper;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// Verifies claims, preferring the generative model and falling back to the
/// heuristic whenever the model path is unavailable or unusable
pub struct ClaimAnalyzer<S: ?Sized, M: ?Sized, F: ?Sized> {
    search: Arc<S>,
    model: Arc<M>,
    scraper: Arc<SourceScraper<F>>,
    heuristic: HeuristicSynthesizer<F>,
    composer: PromptComposer,
    config: AnalyzerConfig,
}

impl<S, M, F> ClaimAnalyzer<S, M, F>
where
    S: SearchProvider + ?Sized,
    M: GenerativeModel + ?Sized,
    F: ArticleFetcher + ?Sized,
{
    /// Create a new ClaimAnalyzer
    pub fn new(
        search: Arc<S>,
        model: Arc<M>,
        fetcher: Arc<F>,
        config: AnalyzerConfig,
    ) -> Result<Self, AnalyzerError> {
        config.validate().map_err(AnalyzerError::Config)?;

        let scraper = Arc::new(
            SourceScraper::new(fetcher)
                .with_fetch_timeout(config.fetch_timeout())
                .with_max_concurrent(config.max_concurrent_fetches),
        );

        Ok(Self {
            search,
            model,
            heuristic: HeuristicSynthesizer::new(scraper.clone(), &config),
            scraper,
            composer: PromptComposer::default().with_article_limit(config.prompt_article_limit),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Search for `query`, then analyze it against the hits.
    ///
    /// A failed search is logged and treated as no hits.
    pub async fn verify(&self, query: &str) -> VerificationReport {
        let query = query.trim();

        let results = match self.search.search(query).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "Search failed, continuing without hits");
                Vec::new()
            }
        };

        let analysis = self.analyze(query, &results).await;
        let fallback = results.is_empty();

        VerificationReport {
            query: query.to_string(),
            results,
            analysis,
            fallback,
            message: fallback.then(|| SEARCH_UNAVAILABLE_MESSAGE.to_string()),
        }
    }

    /// Produce a verdict for `claim` from `hits`. Never fails.
    pub async fn analyze(&self, claim: &str, hits: &[SearchHit]) -> ClaimVerdict {
        info!(claim, hits = hits.len(), "Analyzing claim");

        if !self.config.ai_enabled {
            warn!("AI analysis disabled by configuration, using heuristic");
            return self.heuristic.synthesize(claim, hits).await;
        }
        if !self.model.is_configured() {
            warn!(model = self.model.name(), "Model not configured, using heuristic");
            return self.heuristic.synthesize(claim, hits).await;
        }

        let articles = self.scrape_sources(hits).await;
        let prompt = self.composer.compose(claim, hits, &articles);

        match self.generate(&prompt).await {
            Ok(Generation::Text(text)) => match interpret(&text, claim) {
                Ok(verdict) => {
                    info!(verdict = %verdict.verdict, "Model analysis parsed");
                    verdict
                }
                Err(e) => {
                    warn!(error = %e, "Model response unusable, using heuristic");
                    synthesize_with_articles(claim, hits, &articles)
                }
            },
            Ok(Generation::Blocked(reason)) => {
                warn!(model = self.model.name(), %reason, "Model blocked the analysis");
                self.hard_failure(
                    synthesize_with_articles(claim, hits, &articles),
                    blocked_explanation(self.model.name(), &reason),
                    format!("{} memblokir analisis: {}", self.model.name(), reason),
                )
            }
            Ok(Generation::NoCandidate) => {
                warn!(model = self.model.name(), "Model returned no candidate");
                let message = format!("{} tidak mengembalikan analisis.", self.model.name());
                self.hard_failure(
                    synthesize_with_articles(claim, hits, &articles),
                    message.clone(),
                    message,
                )
            }
            Err(AnalyzerError::Llm(LlmError::Server { status, body })) => {
                warn!(status, %body, "Model API error, using heuristic");
                synthesize_with_articles(claim, hits, &articles)
            }
            Err(e) => {
                warn!(error = %e, "Model unreachable, using heuristic");
                synthesize_with_articles(claim, hits, &articles)
            }
        }
    }

    /// One model call under the configured timeout; a timeout is `Unreachable`
    async fn generate(&self, prompt: &str) -> Result<Generation, AnalyzerError> {
        let generation = timeout(self.config.ai_timeout(), self.model.generate(prompt))
            .await
            .map_err(|_| {
                LlmError::Unreachable(format!(
                    "no response within {}s",
                    self.config.ai_timeout_secs
                ))
            })??;
        Ok(generation)
    }

    /// Keep the heuristic verdict but surface the model failure
    fn hard_failure(
        &self,
        heuristic: ClaimVerdict,
        explanation: String,
        error: String,
    ) -> ClaimVerdict {
        heuristic
            .into_failure(explanation, error)
            .with_sources([self.model.name()])
    }

    async fn scrape_sources(&self, hits: &[SearchHit]) -> Vec<ScrapedArticle> {
        let urls = candidate_urls(hits, self.config.scrape_candidates);
        self.scraper.scrape_multiple(&urls, self.config.scrape_limit).await
    }
}

/// Names the block reason when the model reported one
fn blocked_explanation(model: &str, reason: &str) -> String {
    match reason.trim() {
        "" => format!("Analisis diblokir oleh {}.", model),
        reason => format!("Analisis diblokir oleh {} ({}).", model, reason),
    }
}
