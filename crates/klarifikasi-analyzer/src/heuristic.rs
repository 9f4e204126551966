//! Heuristic verdicts from search metadata and scraped text
//!
//! Used whenever the generative path is off or unusable. Never fails, and is
//! deterministic for a given claim, hit list and article list.

use crate::config::AnalyzerConfig;
use klarifikasi_domain::text::preview;
use klarifikasi_domain::{ArticleFetcher, ClaimVerdict, Confidence, ScrapedArticle, SearchHit, Verdict};
use klarifikasi_scraper::SourceScraper;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Vocabulary marking a claim as debunked
const HOAX_MARKERS: &[&str] = &["hoaks", "tidak benar", "salah", "palsu"];

/// Display-domain suffixes of government sources
const OFFICIAL_SUFFIXES: &[&str] = &[".go.id", ".gov"];

/// Platforms detected in hit text, with their display names
const PLATFORMS: &[(&str, &str)] = &[
    ("tiktok", "TikTok"),
    ("facebook", "Facebook"),
    ("instagram", "Instagram"),
    ("twitter", "Twitter"),
    ("whatsapp", "WhatsApp"),
    ("youtube", "YouTube"),
];

const MIN_KEYWORD_CHARS: usize = 4;
const MIN_KEYWORD_MATCHES: usize = 2;
const VALIDATING_RELEVANT_HITS: usize = 3;
const MAX_REFERENCES: usize = 3;

const FALLBACK_CONTEXT: &str = "topik yang sedang dibicarakan publik";

/// Links of the first `count` hits that have one, in ranking order
pub(crate) fn candidate_urls(hits: &[SearchHit], count: usize) -> Vec<String> {
    hits.iter()
        .map(|hit| hit.link.trim())
        .filter(|link| !link.is_empty())
        .take(count)
        .map(str::to_string)
        .collect()
}

/// Heuristic synthesizer that scrapes its own sources
pub struct HeuristicSynthesizer<F: ?Sized> {
    scraper: Arc<SourceScraper<F>>,
    candidates: usize,
    limit: usize,
}

impl<F: ArticleFetcher + ?Sized> HeuristicSynthesizer<F> {
    /// Create a synthesizer sharing `scraper`, sized by `config`
    pub fn new(scraper: Arc<SourceScraper<F>>, config: &AnalyzerConfig) -> Self {
        Self {
            scraper,
            candidates: config.scrape_candidates,
            limit: config.scrape_limit,
        }
    }

    /// Scrape the top hit links, then synthesize a verdict
    pub async fn synthesize(&self, claim: &str, hits: &[SearchHit]) -> ClaimVerdict {
        let urls = candidate_urls(hits, self.candidates);
        let articles = self.scraper.scrape_multiple(&urls, self.limit).await;
        info!(articles = articles.len(), "Heuristic scrape finished");
        synthesize_with_articles(claim, hits, &articles)
    }
}

/// Signals gathered from hits and articles
#[derive(Debug, Default)]
struct Signals<'a> {
    relevant: Vec<&'a SearchHit>,
    is_hoax: bool,
    is_official: bool,
    platforms: Vec<&'static str>,
}

/// Claim tokens long enough to count; a repeated token counts each time
fn keywords(claim: &str) -> Vec<String> {
    claim
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect()
}

fn contains_hoax_marker(text: &str) -> bool {
    HOAX_MARKERS.iter().any(|marker| text.contains(marker))
}

fn is_official_domain(domain: &str) -> bool {
    let domain = domain.trim().to_lowercase();
    OFFICIAL_SUFFIXES.iter().any(|suffix| domain.ends_with(suffix))
}

fn gather<'a>(claim: &str, hits: &'a [SearchHit], articles: &[ScrapedArticle]) -> Signals<'a> {
    let keywords = keywords(claim);
    let mut signals = Signals::default();

    for hit in hits {
        let text = hit.searchable_text();

        for &(needle, name) in PLATFORMS {
            if text.contains(needle) && !signals.platforms.contains(&name) {
                signals.platforms.push(name);
            }
        }

        let matches = keywords.iter().filter(|k| text.contains(k.as_str())).count();
        if matches >= MIN_KEYWORD_MATCHES {
            signals.relevant.push(hit);
        }

        signals.is_hoax |= contains_hoax_marker(&text);
        signals.is_official |= is_official_domain(&hit.display_domain);
    }

    signals.is_hoax |= articles
        .iter()
        .any(|article| contains_hoax_marker(&article.content.to_lowercase()));

    signals
}

fn article_host(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

fn push_section(analysis: &mut String, heading: &str) {
    let trimmed = analysis.trim_end_matches('\n').len();
    analysis.truncate(trimmed);
    let _ = write!(analysis, "\n\n### {}\n", heading);
}

/// Build a verdict from hits and already-scraped articles.
///
/// A hoax marker anywhere refutes the claim, even when official sources
/// would otherwise validate it.
pub fn synthesize_with_articles(
    claim: &str,
    hits: &[SearchHit],
    articles: &[ScrapedArticle],
) -> ClaimVerdict {
    let signals = gather(claim, hits, articles);
    let relevant_count = signals.relevant.len();

    let confidence = Confidence::from_relevant_count(relevant_count);
    let verdict = if signals.is_hoax {
        Verdict::Refuted
    } else if relevant_count >= VALIDATING_RELEVANT_HITS && signals.is_official {
        Verdict::Validated
    } else {
        Verdict::NeedsVerification
    };

    debug!(
        relevant = relevant_count,
        hoax = signals.is_hoax,
        official = signals.is_official,
        verdict = %verdict,
        "Heuristic signals"
    );

    let platform_text = if signals.platforms.is_empty() {
        "di media sosial".to_string()
    } else {
        format!("di platform {}", signals.platforms.join(", "))
    };

    let real_context = articles
        .first()
        .map(|article| preview(&article.content, 300))
        .or_else(|| signals.relevant.first().map(|hit| preview(&hit.snippet, 200)))
        .unwrap_or_else(|| FALLBACK_CONTEXT.to_string());

    let mut explanation = format!(
        "**Analisa Klaim**: Isu mengenai \"{}\" ditemukan di berbagai sumber informasi.\n\n\
         **Konteks**: Narasi ini terpantau menyebar {} dan menarik perhatian publik secara luas.\n\n",
        claim, platform_text
    );
    if signals.is_hoax {
        explanation.push_str(
            "**Hasil Verifikasi**: Ditemukan indikasi kuat berupa bantahan atau pelabelan sebagai \
             informasi **HOAKS/SALAH** dari sumber kredibel. Detil artikel menunjukkan \
             ketidaksesuaian klaim dengan fakta di lapangan.",
        );
    } else {
        let _ = write!(
            explanation,
            "**Hasil Verifikasi**: Saat ini belum ditemukan klarifikasi resmi yang mutlak, namun \
             data menunjukkan relevansi dengan: {}",
            real_context
        );
    }

    let mut analysis = format!(
        "### Ringkasan Verifikasi Data\n\n\
         Status **{}** ditetapkan berdasarkan penelusuran terhadap {} artikel mendalam dan {} \
         rujukan data terkait. Tingkat kepercayaan **{}** diberikan karena {}",
        verdict,
        articles.len(),
        relevant_count,
        confidence,
        if confidence == Confidence::High {
            "adanya konsistensi informasi yang kuat dari berbagai sumber kredibel."
        } else {
            "sumber informasi masih bersifat terbatas atau dalam tahap verifikasi lanjut."
        }
    );

    if !articles.is_empty() {
        push_section(&mut analysis, "Poin Kunci dari Artikel Terkait");
        for article in articles {
            let _ = writeln!(
                analysis,
                "- **{}**: {}",
                article_host(&article.url),
                preview(&article.content, 180)
            );
        }
    }

    let mut references: Vec<String> = Vec::new();
    for hit in &signals.relevant {
        let reference = format!("**{}** melaporkan: \"{}\"", hit.display_domain, hit.title);
        if !references.contains(&reference) {
            references.push(reference);
        }
        if references.len() == MAX_REFERENCES {
            break;
        }
    }
    if !references.is_empty() {
        push_section(&mut analysis, "Referensi Tambahan");
        for reference in &references {
            let _ = writeln!(analysis, "- {}", reference);
        }
    }

    ClaimVerdict::new(claim, verdict, confidence, explanation, analysis.trim_end())
}
