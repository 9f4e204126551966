//! Scenario tests for the ClaimAnalyzer

use crate::{AnalyzerConfig, ClaimAnalyzer, SEARCH_UNAVAILABLE_MESSAGE};
use klarifikasi_domain::{ClaimVerdict, Confidence, LlmError, SearchError, SearchHit, Verdict, MAX_SOURCES};
use klarifikasi_llm::MockProvider;
use klarifikasi_scraper::StaticFetcher;
use klarifikasi_search::StaticSearchProvider;
use std::sync::Arc;

const CLAIM: &str = "Vaksin X menyebabkan magnet";

const MODEL_JSON: &str = r#"{
  "verdict": "Terbantah",
  "confidence": "Tinggi",
  "explanation": "**Analisa Klaim**: Vaksin tidak mengandung magnet.\n**Hasil Verifikasi**: Klaim ini hoaks.",
  "analysis": "- Kemenkes menyatakan klaim tersebut hoaks",
  "sources_used": ["kemkes.go.id"]
}"#;

fn kemkes_hits() -> Vec<SearchHit> {
    (1..=3)
        .map(|i| {
            SearchHit::new(
                format!("[HOAKS] Vaksin X Menyebabkan Magnet ({})", i),
                "Kemenkes menegaskan klaim vaksin menyebabkan tubuh menjadi magnet adalah hoaks.",
                format!("https://www.kemkes.go.id/article/{}", i),
                "kemkes.go.id",
            )
        })
        .collect()
}

fn article_html(body: &str) -> String {
    format!("<html><head><title>Kemenkes</title></head><body><article><p>{}</p></article></body></html>", body)
}

fn kemkes_fetcher() -> StaticFetcher {
    (1..=3).fold(StaticFetcher::new(), |fetcher, i| {
        fetcher.with_page(
            format!("https://www.kemkes.go.id/article/{}", i),
            article_html("Vaksin telah melalui uji klinis dan tidak mengandung bahan logam yang bersifat magnetik."),
        )
    })
}

fn analyzer(
    hits: Vec<SearchHit>,
    model: MockProvider,
    fetcher: StaticFetcher,
    config: AnalyzerConfig,
) -> ClaimAnalyzer<StaticSearchProvider, MockProvider, StaticFetcher> {
    ClaimAnalyzer::new(
        Arc::new(StaticSearchProvider::new(hits)),
        Arc::new(model),
        Arc::new(fetcher),
        config,
    )
    .unwrap()
}

fn assert_shape(verdict: &ClaimVerdict) {
    assert!(!verdict.explanation.trim().is_empty());
    assert!(verdict.sources_used.len() <= MAX_SOURCES);
    let mut seen = std::collections::HashSet::new();
    assert!(verdict.sources_used.iter().all(|s| seen.insert(s.clone())));
}

#[tokio::test]
async fn test_ai_happy_path() {
    let model = MockProvider::new(MODEL_JSON);
    let analyzer = analyzer(kemkes_hits(), model.clone(), kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert_shape(&verdict);
    assert!(verdict.success);
    assert_eq!(verdict.verdict, Verdict::Refuted);
    assert_eq!(verdict.confidence, Confidence::High);
    assert_eq!(verdict.sources_used, vec!["kemkes.go.id"]);
    assert!(verdict.explanation.starts_with("Analisa Klaim:"));
    assert_eq!(verdict.claim, CLAIM);

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("=== ARTIKEL LENGKAP 3 ==="));
    assert!(prompts[0].contains("SUMBER 3:\n  Brand/Domain: kemkes.go.id"));
}

#[tokio::test]
async fn test_ai_disabled_uses_heuristic() {
    let model = MockProvider::new(MODEL_JSON);
    let analyzer = analyzer(kemkes_hits(), model.clone(), kemkes_fetcher(), AnalyzerConfig::offline());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert_shape(&verdict);
    assert!(verdict.success);
    assert_eq!(verdict.verdict, Verdict::Refuted);
    assert_eq!(verdict.confidence, Confidence::Medium);
    assert!(verdict.analysis.contains("### Poin Kunci dari Artikel Terkait"));
    assert!(verdict.sources_used.is_empty());
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_empty_hits_still_yield_verdict() {
    let analyzer = analyzer(Vec::new(), MockProvider::new(MODEL_JSON), StaticFetcher::new(), AnalyzerConfig::offline());

    let verdict = analyzer.analyze("Klaim yang tidak dikenal siapa pun", &[]).await;

    assert_shape(&verdict);
    assert!(verdict.success);
    assert_eq!(verdict.verdict, Verdict::NeedsVerification);
    assert_eq!(verdict.confidence, Confidence::Low);
}

#[tokio::test]
async fn test_all_scraping_fails() {
    let fetcher = (1..=3).fold(StaticFetcher::new(), |fetcher, i| {
        fetcher.with_hanging(format!("https://www.kemkes.go.id/article/{}", i))
    });
    let config = AnalyzerConfig {
        fetch_timeout_secs: 1,
        ..AnalyzerConfig::offline()
    };
    let analyzer = analyzer(kemkes_hits(), MockProvider::new(MODEL_JSON), fetcher, config);

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert_shape(&verdict);
    assert_eq!(verdict.verdict, Verdict::Refuted);
    assert!(!verdict.analysis.contains("Poin Kunci"));
    assert!(verdict.analysis.contains("0 artikel mendalam"));
}

#[tokio::test]
async fn test_blocked_keeps_heuristic_verdict_and_reports_reason() {
    let analyzer = analyzer(kemkes_hits(), MockProvider::blocked("SAFETY"), kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert_shape(&verdict);
    assert!(!verdict.success);
    assert_eq!(verdict.verdict, Verdict::Refuted);
    assert_eq!(verdict.explanation, "Analisis diblokir oleh Mock AI (SAFETY).");
    assert_eq!(verdict.error.as_deref(), Some("Mock AI memblokir analisis: SAFETY"));
    assert_eq!(verdict.sources_used, vec!["Mock AI"]);
    assert!(verdict.analysis.contains("### Ringkasan Verifikasi Data"));
}

#[tokio::test]
async fn test_blocked_without_reason() {
    let analyzer = analyzer(kemkes_hits(), MockProvider::blocked(" "), kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert!(!verdict.success);
    assert_eq!(verdict.explanation, "Analisis diblokir oleh Mock AI.");
}

#[tokio::test]
async fn test_no_candidate_is_visible_failure() {
    let model = MockProvider::no_candidate().with_name("Gemini AI");
    let analyzer = analyzer(kemkes_hits(), model, kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert!(!verdict.success);
    assert_eq!(verdict.explanation, "Gemini AI tidak mengembalikan analisis.");
    assert_eq!(verdict.error.as_deref(), Some("Gemini AI tidak mengembalikan analisis."));
    assert_eq!(verdict.sources_used, vec!["Gemini AI"]);
}

#[tokio::test]
async fn test_server_error_falls_back_silently() {
    let model = MockProvider::failing(LlmError::Server {
        status: 429,
        body: "quota exceeded".to_string(),
    });
    let analyzer = analyzer(kemkes_hits(), model, kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert!(verdict.success);
    assert_eq!(verdict.error, None);
    assert_eq!(verdict.verdict, Verdict::Refuted);
}

#[tokio::test]
async fn test_unreachable_falls_back() {
    let model = MockProvider::failing(LlmError::Unreachable("connection refused".to_string()));
    let analyzer = analyzer(kemkes_hits(), model, kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert!(verdict.success);
    assert!(verdict.explanation.contains("**Analisa Klaim**"));
}

#[tokio::test]
async fn test_model_timeout_falls_back() {
    let config = AnalyzerConfig {
        ai_timeout_secs: 1,
        ..AnalyzerConfig::default()
    };
    let analyzer = analyzer(kemkes_hits(), MockProvider::hanging(), kemkes_fetcher(), config);

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert!(verdict.success);
    assert_eq!(verdict.verdict, Verdict::Refuted);
    assert!(verdict.analysis.contains("3 artikel mendalam"));
}

#[tokio::test]
async fn test_unconfigured_model_is_never_called() {
    let model = MockProvider::new(MODEL_JSON).unconfigured();
    let analyzer = analyzer(kemkes_hits(), model.clone(), kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert!(verdict.success);
    assert_eq!(model.call_count(), 0);
    assert!(verdict.explanation.contains("**Hasil Verifikasi**"));
}

#[tokio::test]
async fn test_unparseable_model_text_falls_to_free_text() {
    let model = MockProvider::new("Klaim ini tidak didukung bukti. Sumber resmi membantahnya.");
    let analyzer = analyzer(kemkes_hits(), model, kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert!(verdict.success);
    assert_eq!(verdict.verdict, Verdict::NeedsVerification);
    assert_eq!(verdict.explanation, "Klaim ini tidak didukung bukti");
}

#[tokio::test]
async fn test_empty_model_text_falls_to_heuristic() {
    let analyzer = analyzer(kemkes_hits(), MockProvider::new("```json\n```"), kemkes_fetcher(), AnalyzerConfig::default());

    let verdict = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert!(verdict.success);
    assert_eq!(verdict.verdict, Verdict::Refuted);
    assert!(verdict.explanation.contains("HOAKS/SALAH"));
}

#[tokio::test]
async fn test_social_domains_normalized_in_model_output() {
    let model = MockProvider::new(
        r#"{"verdict": "Perlu Verifikasi", "confidence": "Rendah",
            "explanation": "Viral di instagram.com sejak kemarin", "analysis": "Beredar di tiktok.com"}"#,
    );
    let analyzer = analyzer(Vec::new(), model, StaticFetcher::new(), AnalyzerConfig::default());

    let verdict = analyzer.analyze("Klaim viral", &[]).await;

    assert!(verdict.explanation.contains("postingan di Instagram"));
    assert!(!verdict.explanation.contains("instagram.com"));
    assert_eq!(verdict.analysis, "Beredar di postingan di TikTok");
}

#[tokio::test]
async fn test_heuristic_is_deterministic() {
    let analyzer = analyzer(kemkes_hits(), MockProvider::new(MODEL_JSON), kemkes_fetcher(), AnalyzerConfig::offline());

    let first = analyzer.analyze(CLAIM, &kemkes_hits()).await;
    let second = analyzer.analyze(CLAIM, &kemkes_hits()).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_verify_returns_hits_and_verdict() {
    let analyzer = analyzer(kemkes_hits(), MockProvider::new(MODEL_JSON), kemkes_fetcher(), AnalyzerConfig::default());

    let report = analyzer.verify(&format!("  {}  ", CLAIM)).await;

    assert_eq!(report.query, CLAIM);
    assert_eq!(report.results.len(), 3);
    assert!(!report.fallback);
    assert_eq!(report.message, None);
    assert_eq!(report.analysis.verdict, Verdict::Refuted);
}

#[tokio::test]
async fn test_verify_search_failure_is_fallback() {
    let analyzer = ClaimAnalyzer::new(
        Arc::new(StaticSearchProvider::failing(SearchError::MissingCredentials)),
        Arc::new(MockProvider::new(MODEL_JSON)),
        Arc::new(StaticFetcher::new()),
        AnalyzerConfig::offline(),
    )
    .unwrap();

    let report = analyzer.verify(CLAIM).await;

    assert!(report.results.is_empty());
    assert!(report.fallback);
    assert_eq!(report.message.as_deref(), Some(SEARCH_UNAVAILABLE_MESSAGE));
    assert!(report.analysis.success);
    assert_eq!(report.analysis.verdict, Verdict::NeedsVerification);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["analysis"]["verdict"], "Perlu Verifikasi");
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let config = AnalyzerConfig {
        scrape_limit: 0,
        ..AnalyzerConfig::default()
    };
    let result = ClaimAnalyzer::new(
        Arc::new(StaticSearchProvider::new(Vec::new())),
        Arc::new(MockProvider::new("")),
        Arc::new(StaticFetcher::new()),
        config,
    );
    assert!(matches!(result, Err(crate::AnalyzerError::Config(_))));
}
