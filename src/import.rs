//! Import orchestration.
//!
//! Drives the pagination loop: throttle, fetch a questions page, fetch the
//! batched accepted answers for that page, accumulate. Any fetch or decode
//! failure stops the loop, but the run still dedups and persists everything
//! accumulated so far — a partial import is reported, never silently
//! upgraded to success and never discarded.

use std::time::Duration;

use anyhow::Result;
use sqlx::SqlitePool;
use tokio::time::sleep;

use crate::config::{ApiConfig, Config};
use crate::db;
use crate::decode::{decode_answers_page, decode_questions_page, DecodePolicy};
use crate::dedup::dedup_by_key;
use crate::error::ImportError;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::models::{Answer, Question, QuestionTag};
use crate::store;
use crate::tags::extract_question_tags;

/// Result of the fetch/normalize phase.
///
/// `warning` distinguishes a complete run from a partial one: `None` means
/// every requested page was fetched (or the API reported no more results);
/// `Some` carries the error that terminated pagination early.
pub struct ImportOutcome {
    pub pages_fetched: u32,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
    pub tags: Vec<QuestionTag>,
    pub quota_remaining: Option<i64>,
    pub warning: Option<ImportError>,
}

/// Fetch up to `api.pages` pages and produce deduplicated collections.
///
/// Infallible by design: failures are folded into the outcome's `warning`
/// and whatever was accumulated before the failure is returned.
pub async fn run_import(api: &ApiConfig, fetcher: &dyn PageFetcher) -> ImportOutcome {
    let policy = DecodePolicy::default();

    let mut questions: Vec<Question> = Vec::new();
    let mut answers: Vec<Answer> = Vec::new();
    let mut pages_fetched = 0u32;
    let mut quota_remaining = None;
    let mut warning = None;

    for page in 1..=api.pages {
        // Fixed throttle to stay under the API's rate limit; not a backoff.
        sleep(Duration::from_millis(api.throttle_ms)).await;

        match import_page(api, fetcher, &policy, page, &mut questions, &mut answers).await {
            Ok(page_meta) => {
                pages_fetched += 1;
                if page_meta.quota_remaining.is_some() {
                    quota_remaining = page_meta.quota_remaining;
                }
                if !page_meta.has_more {
                    break;
                }
            }
            Err(e) => {
                warning = Some(e);
                break;
            }
        }
    }

    let questions = dedup_by_key(questions, |q| q.question_id);
    let answers = dedup_by_key(answers, |a| a.answer_id);
    let tags = extract_question_tags(&questions);

    ImportOutcome {
        pages_fetched,
        questions,
        answers,
        tags,
        quota_remaining,
        warning,
    }
}

struct PageMeta {
    has_more: bool,
    quota_remaining: Option<i64>,
}

/// Fetch one questions page and its accepted-answers batch.
///
/// Questions are accumulated before the answers request goes out, so a
/// failing answers fetch still leaves that page's questions in the run.
async fn import_page(
    api: &ApiConfig,
    fetcher: &dyn PageFetcher,
    policy: &DecodePolicy,
    page: u32,
    questions: &mut Vec<Question>,
    answers: &mut Vec<Answer>,
) -> Result<PageMeta, ImportError> {
    let bytes = fetcher.fetch(&questions_url(api, page)).await?;
    let q_page = decode_questions_page(&bytes, policy)?;

    let accepted: Vec<i64> = q_page
        .items
        .iter()
        .filter_map(|q| q.accepted_answer_id)
        .collect();

    let has_more = q_page.has_more;
    let mut quota_remaining = q_page.quota_remaining;
    questions.extend(q_page.items);

    // A page with no accepted answers would produce an answers URL with an
    // empty id segment, which the API rejects.
    if !accepted.is_empty() {
        let ids = accepted
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";");
        let bytes = fetcher.fetch(&answers_url(api, &ids)).await?;
        let a_page = decode_answers_page(&bytes, policy)?;
        if a_page.quota_remaining.is_some() {
            quota_remaining = a_page.quota_remaining;
        }
        answers.extend(a_page.items);
    }

    Ok(PageMeta {
        has_more,
        quota_remaining,
    })
}

fn questions_url(api: &ApiConfig, page: u32) -> String {
    format!(
        "{}/questions?page={}&pagesize={}&site={}&tagged={}",
        api.base_url, page, api.page_size, api.site, api.tagged
    )
}

fn answers_url(api: &ApiConfig, ids: &str) -> String {
    format!("{}/answers/{}?sort=activity&site={}", api.base_url, ids, api.site)
}

/// Run the full `import` command: fetch, dedup, and load into SQLite.
pub async fn run_import_command(config: &Config, dry_run: bool) -> Result<()> {
    let fetcher = HttpFetcher::new(config.api.timeout_secs)?;
    let outcome = run_import(&config.api, &fetcher).await;

    println!("import {} (site: {})", config.api.tagged, config.api.site);
    println!("  pages fetched: {}", outcome.pages_fetched);
    println!("  questions: {}", outcome.questions.len());
    println!("  answers: {}", outcome.answers.len());
    println!("  question tags: {}", outcome.tags.len());
    if let Some(quota) = outcome.quota_remaining {
        println!("  api quota remaining: {}", quota);
    }

    if dry_run {
        println!("  (dry-run, nothing written)");
        report_outcome(&outcome);
        return Ok(());
    }

    let pool = db::connect(&config.db.path).await?;
    store::load(&pool, &outcome.questions, &outcome.answers, &outcome.tags).await?;
    pool.close().await;

    println!("  rows written: {}", outcome.questions.len() + outcome.answers.len() + outcome.tags.len());
    report_outcome(&outcome);
    Ok(())
}

fn report_outcome(outcome: &ImportOutcome) {
    match &outcome.warning {
        Some(e) => println!("partial import, stopped early: {}", e),
        None => println!("ok"),
    }
}
