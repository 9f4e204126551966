//! Parse model output into a claim verdict
//!
//! Tiers, in order: strip markdown, locate the JSON object, parse it
//! (repairing a truncated document once), validate its shape, and finally
//! fall back to reading the text as prose.

use crate::error::AnalyzerError;
use klarifikasi_domain::text::truncate_with_ellipsis;
use klarifikasi_domain::{ClaimVerdict, Confidence, Verdict};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

const MISSING_ANALYSIS: &str = "Tidak ada analisis tersedia";
const FREE_TEXT_EXPLANATION_CHARS: usize = 200;
const FREE_TEXT_ANALYSIS_CHARS: usize = 500;

static MARKDOWN_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"```json\s*", ""),
        (r"```\s*", ""),
        (r"\*\*(.*?)\*\*", "$1"),
        (r"\*(.*?)\*", "$1"),
        (r"\s+", " "),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

static SOCIAL_DOMAINS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        ("instagram\\.com", "Instagram"),
        ("facebook\\.com", "Facebook"),
        ("fb\\.com", "Facebook"),
        ("twitter\\.com", "X"),
        ("x\\.com", "X"),
        ("youtube\\.com", "YouTube"),
        ("youtu\\.be", "YouTube"),
        ("reddit\\.com", "Reddit"),
        ("tiktok\\.com", "TikTok"),
        ("linkedin\\.com", "LinkedIn"),
        ("threads\\.net", "Threads"),
    ]
    .into_iter()
    .filter_map(|(domain, platform)| {
        let pattern = format!(r"(?i)(?:\bhttps?://)?(?:\bwww\.)?\b{}\b", domain);
        Regex::new(&pattern).ok().map(|re| (re, platform))
    })
    .collect()
});

/// Remove code fences and bold/italic markup, then collapse whitespace
pub fn clean_response(text: &str) -> String {
    MARKDOWN_RULES
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
        .trim()
        .to_string()
}

/// The JSON object span: first `{` through last `}`.
///
/// When no `}` follows the first `{` the document was cut off, and the whole
/// tail is returned so it can still be repaired. `None` means there is no
/// object at all.
pub fn locate_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    match text.rfind('}') {
        Some(end) if end > start => Some(&text[start..=end]),
        _ => Some(&text[start..]),
    }
}

/// Close a JSON document that was cut off mid-stream.
///
/// A string value cut at end of input is closed in place (dropping a partial
/// escape sequence). Anything else incomplete, like a dangling key or a
/// partial literal, is dropped back to the last point where the document was
/// structurally whole. Open arrays and objects are then closed in nesting
/// order. A complete document comes back unchanged.
pub fn repair_truncated_json(json: &str) -> String {
    let mut closers: Vec<char> = Vec::new();
    let mut value_position = false;

    let mut in_string = false;
    let mut string_is_key = false;
    let mut escaped = false;
    // Byte offset of a `\u` escape still waiting for hex digits, and how many
    let mut unicode_escape: Option<(usize, u8)> = None;

    let mut safe_end = 0;
    let mut safe_closers: Vec<char> = Vec::new();

    for (i, c) in json.char_indices() {
        if in_string {
            if let Some((start, remaining)) = unicode_escape {
                unicode_escape = (remaining > 1).then_some((start, remaining - 1));
            } else if escaped {
                escaped = false;
                if c == 'u' {
                    unicode_escape = Some((i - 1, 4));
                }
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                if !string_is_key {
                    safe_end = i + 1;
                    safe_closers.clone_from(&closers);
                }
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                string_is_key = closers.last() == Some(&'}') && !value_position;
            }
            '{' | '[' => {
                closers.push(if c == '{' { '}' } else { ']' });
                value_position = c == '[';
                safe_end = i + 1;
                safe_closers.clone_from(&closers);
            }
            '}' | ']' => {
                closers.pop();
                value_position = closers.last() == Some(&']');
                safe_end = i + 1;
                safe_closers.clone_from(&closers);
            }
            ':' => value_position = true,
            ',' => {
                safe_end = i;
                safe_closers.clone_from(&closers);
                value_position = closers.last() == Some(&']');
            }
            _ => {}
        }
    }

    if in_string && !string_is_key {
        let cut = match unicode_escape {
            Some((start, _)) => start,
            None if escaped => json.len() - 1,
            None => json.len(),
        };
        let mut repaired = json[..cut].to_string();
        repaired.push('"');
        repaired.extend(closers.iter().rev());
        repaired
    } else {
        let mut repaired = json[..safe_end].to_string();
        repaired.extend(safe_closers.iter().rev());
        repaired
    }
}

/// Replace bare social-platform domains with "postingan di <Platform>"
pub fn normalize_social_links(text: &str) -> String {
    SOCIAL_DOMAINS
        .iter()
        .fold(text.to_string(), |acc, (re, platform)| {
            re.replace_all(&acc, format!("postingan di {}", platform).as_str())
                .into_owned()
        })
}

/// Read unstructured model prose as a low-confidence verdict.
///
/// The first sentence becomes the explanation and the whole text the
/// analysis. Empty text is an error; there is nothing to report.
pub fn parse_free_text(cleaned: &str, claim: &str) -> Result<ClaimVerdict, AnalyzerError> {
    let text = cleaned.trim();
    if text.is_empty() {
        return Err(AnalyzerError::MalformedResponse("empty response".to_string()));
    }

    let first_sentence = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(text);

    Ok(ClaimVerdict::new(
        claim,
        Verdict::NeedsVerification,
        Confidence::Low,
        truncate_with_ellipsis(first_sentence, FREE_TEXT_EXPLANATION_CHARS),
        truncate_with_ellipsis(text, FREE_TEXT_ANALYSIS_CHARS),
    ))
}

/// Parse a span, repairing it once when it is not valid JSON
fn parse_document(span: &str) -> Result<Value, AnalyzerError> {
    match serde_json::from_str(span) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!(error = %e, "JSON parse failed, attempting repair");
            Ok(serde_json::from_str(&repair_truncated_json(span))?)
        }
    }
}

/// Build a verdict from a parsed document; `None` unless it has an explanation
fn verdict_from_document(document: &Value, claim: &str) -> Option<ClaimVerdict> {
    let object = document.as_object()?;
    let explanation = object
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    let field = |name: &str| object.get(name).and_then(Value::as_str).unwrap_or_default();

    let verdict = Verdict::parse(field("verdict")).unwrap_or_else(|| {
        warn!(literal = field("verdict"), "Unrecognized verdict literal");
        Verdict::default()
    });
    let confidence = Confidence::parse(field("confidence")).unwrap_or_else(|| {
        warn!(literal = field("confidence"), "Unrecognized confidence literal");
        Confidence::default()
    });

    let analysis = match field("analysis").trim() {
        "" => MISSING_ANALYSIS,
        analysis => analysis,
    };

    let sources: Vec<String> = match object.get("sources_used") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(joined)) => joined.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    Some(
        ClaimVerdict::new(
            claim,
            verdict,
            confidence,
            normalize_social_links(explanation),
            normalize_social_links(analysis),
        )
        .with_sources(sources),
    )
}

/// Interpret raw model text as a verdict for `claim`.
///
/// Structured documents win; prose is the fallback. The only error is text
/// with no content at all.
pub fn interpret(raw: &str, claim: &str) -> Result<ClaimVerdict, AnalyzerError> {
    let cleaned = clean_response(raw);

    if let Some(span) = locate_json(&cleaned) {
        let mut candidates = vec![span];
        // A nested `}` can end the span early in a cut-off document
        if let Some(start) = cleaned.find('{') {
            let tail = &cleaned[start..];
            if tail != span {
                candidates.push(tail);
            }
        }

        for candidate in candidates {
            match parse_document(candidate) {
                Ok(document) => {
                    if let Some(verdict) = verdict_from_document(&document, claim) {
                        return Ok(verdict);
                    }
                    warn!("Model JSON is missing a usable explanation");
                }
                Err(e) => debug!(error = %e, "Model JSON could not be repaired"),
            }
        }
    } else {
        debug!("No JSON object in model response");
    }

    parse_free_text(&cleaned, claim)
}
