//! Prompt composition for claim verification
//!
//! The model is steered only by this text, so the field names and literal
//! value sets below must match what [`interpret`](crate::interpret) accepts.

use klarifikasi_domain::text::take_chars;
use klarifikasi_domain::{ScrapedArticle, SearchHit};
use std::fmt::Write;

const UNKNOWN: &str = "Tidak diketahui";

/// Builds the model request text from a claim, hits and scraped articles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptComposer {
    article_limit: usize,
    article_max_chars: usize,
    snippet_max_chars: usize,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            article_limit: 3,
            article_max_chars: 2000,
            snippet_max_chars: 400,
        }
    }
}

impl PromptComposer {
    /// Composer including at most `article_limit` full articles
    pub fn with_article_limit(mut self, article_limit: usize) -> Self {
        self.article_limit = article_limit;
        self
    }

    /// Build the prompt. Same inputs always give a byte-identical prompt.
    pub fn compose(&self, claim: &str, hits: &[SearchHit], articles: &[ScrapedArticle]) -> String {
        let mut prompt = String::from(INSTRUCTIONS);

        prompt.push_str("\n\n=== KLAIM PENGGUNA ===\n\"");
        prompt.push_str(claim);
        prompt.push('"');

        if !hits.is_empty() {
            prompt.push_str("\n\nDATA SUMBER (RINGKASAN PENCARIAN):\n");
            let items: Vec<String> = hits
                .iter()
                .enumerate()
                .map(|(index, hit)| self.snippet_item(index + 1, hit))
                .collect();
            prompt.push_str(&items.join("\n\n"));
        }

        let articles: Vec<String> = articles
            .iter()
            .take(self.article_limit)
            .enumerate()
            .map(|(index, article)| self.article_item(index + 1, article))
            .collect();
        if !articles.is_empty() {
            prompt.push_str("\n\n=== KONTEN LENGKAP ARTIKEL (UNTUK ANALISIS MENDALAM) ===\n");
            prompt.push_str(&articles.join("\n\n"));
        }

        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT);
        prompt
    }

    fn snippet_item(&self, number: usize, hit: &SearchHit) -> String {
        let mut item = String::new();
        let _ = write!(
            item,
            "SUMBER {}:\n  Brand/Domain: {}\n  Judul: {}\n  Ringkasan: {}",
            number,
            or_placeholder(&hit.display_domain, "Tidak ada domain"),
            or_placeholder(&hit.title, "Tidak ada judul"),
            take_chars(or_placeholder(&hit.snippet, "Tidak ada snippet"), self.snippet_max_chars),
        );
        item
    }

    fn article_item(&self, number: usize, article: &ScrapedArticle) -> String {
        format!(
            "=== ARTIKEL LENGKAP {} ===\nURL: {}\nJudul: {}\nTanggal: {}\nPenulis: {}\n\nISI ARTIKEL:\n{}",
            number,
            article.url,
            or_placeholder(&article.title, UNKNOWN),
            article.published_date.as_deref().unwrap_or(UNKNOWN),
            article.author.as_deref().unwrap_or(UNKNOWN),
            take_chars(&article.content, self.article_max_chars),
        )
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Compose with the default limits (3 articles, 2000-char bodies, 400-char snippets)
pub fn compose(claim: &str, hits: &[SearchHit], articles: &[ScrapedArticle]) -> String {
    PromptComposer::default().compose(claim, hits, articles)
}

const INSTRUCTIONS: &str = r#"Anda adalah AI Fact-Checker Profesional. Analisis klaim pengguna menggunakan DATA SUMBER dan KONTEN LENGKAP ARTIKEL yang disediakan.

=== ATURAN KONTEN (PENTING) ===
1. JANGAN gunakan frasa pengantar seperti "Berdasarkan data yang saya baca," atau "Analisis saya menunjukkan." Langsung masuk ke inti informasi.
2. JANGAN mengulang-ulang informasi yang sama di bagian berbeda.
3. Tetap objektif, ringkas, dan profesional."#;

const OUTPUT_FORMAT: &str = r#"=== ATURAN FORMAT OUTPUT (JSON ONLY) ===
Wajib mengembalikan JSON dengan field berikut:

1. "verdict": "Tervalidasi" | "Terbantah" | "Perlu Verifikasi"
2. "confidence": "Tinggi" | "Sedang" | "Rendah"
3. "explanation": Narasi ringkas dan padat. Gunakan format (pakai line break \n antar bagian):
   **Analisa Klaim**: (1-2 kalimat inti masalah)
   **Konteks**: (Penjelasan kenapa ini viral/muncul)
   **Hasil Verifikasi**: (Kesimpulan akhir berbasis data sumber)
4. "analysis": Detail mendalam. Berikan poin-poin tentang:
   - Alasan penetapan status (Verdict & Confidence)
   - Fakta-fakta kunci yang ditemukan di artikel lengkap
   - Perbandingan antar sumber (apakah konsisten atau bertolak belakang)
5. "sources_used": List domain utama yang memberikan informasi paling valid (max 5).

Format JSON:
{
  "verdict": "...",
  "explanation": "...",
  "analysis": "...",
  "confidence": "...",
  "sources_used": ["..."]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(domain: &str, snippet: &str) -> SearchHit {
        SearchHit::new("Judul Berita", snippet, format!("https://{}/a", domain), domain)
    }

    fn article(n: usize, content: &str) -> ScrapedArticle {
        ScrapedArticle::new(format!("https://berita.id/{}", n), format!("Artikel {}", n), content, "", "")
    }

    #[test]
    fn test_prompt_contains_claim_and_contract() {
        let prompt = compose("Vaksin X menyebabkan magnet", &[], &[]);
        assert!(prompt.contains("\"Vaksin X menyebabkan magnet\""));
        for field in ["\"verdict\"", "\"confidence\"", "\"explanation\"", "\"analysis\"", "\"sources_used\""] {
            assert!(prompt.contains(field), "missing {field}");
        }
        for literal in ["Tervalidasi", "Terbantah", "Perlu Verifikasi", "Tinggi", "Sedang", "Rendah"] {
            assert!(prompt.contains(literal), "missing {literal}");
        }
        assert!(!prompt.contains("DATA SUMBER (RINGKASAN PENCARIAN)"));
        assert!(!prompt.contains("ARTIKEL LENGKAP 1"));
    }

    #[test]
    fn test_snippets_for_all_hits_capped() {
        let long = "a".repeat(600);
        let hits = vec![hit("a.id", &long), hit("b.id", ""), hit("c.id", "pendek")];
        let prompt = compose("klaim", &hits, &[]);

        assert!(prompt.contains("SUMBER 3:\n  Brand/Domain: c.id"));
        assert!(prompt.contains(&format!("Ringkasan: {}\n", "a".repeat(400))));
        assert!(!prompt.contains(&"a".repeat(401)));
        assert!(prompt.contains("Ringkasan: Tidak ada snippet"));
    }

    #[test]
    fn test_only_first_three_articles_capped() {
        let articles: Vec<_> = (1..=4).map(|n| article(n, &"k".repeat(2500))).collect();
        let prompt = compose("klaim", &[hit("a.id", "s")], &articles);

        assert!(prompt.contains("=== ARTIKEL LENGKAP 3 ===\nURL: https://berita.id/3"));
        assert!(!prompt.contains("ARTIKEL LENGKAP 4"));
        assert!(!prompt.contains(&"k".repeat(2001)));
        assert!(prompt.contains("Tanggal: Tidak diketahui\nPenulis: Tidak diketahui"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let hits = vec![hit("a.id", "satu"), hit("b.id", "dua")];
        let articles = vec![article(1, "isi")];
        assert_eq!(compose("klaim", &hits, &articles), compose("klaim", &hits, &articles));
    }

    #[test]
    fn test_custom_article_limit() {
        let articles: Vec<_> = (1..=3).map(|n| article(n, "isi")).collect();
        let prompt = PromptComposer::default()
            .with_article_limit(1)
            .compose("klaim", &[], &articles);
        assert!(prompt.contains("ARTIKEL LENGKAP 1"));
        assert!(!prompt.contains("ARTIKEL LENGKAP 2"));
    }
}
