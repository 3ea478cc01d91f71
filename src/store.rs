//! Table recreation and bulk insert.
//!
//! Every import run drops and recreates the three tables before inserting
//! (no incremental migration), so the database always reflects exactly one
//! run. Uniqueness of `question_id`/`answer_id` is guaranteed upstream by
//! deduplication, not by table constraints.
//!
//! Each collection is inserted inside one transaction. No transaction spans
//! the three inserts, so a failure in the answer insert leaves the question
//! table populated. Known gap, kept deliberately; callers treat any storage
//! error as a failure of the whole run and re-import.

use sqlx::SqlitePool;

use crate::error::ImportError;
use crate::models::{Answer, Question, QuestionTag};

const TABLES: &[&str] = &["question", "answer", "question_tag"];

const CREATE_QUESTION: &str = r#"
    CREATE TABLE IF NOT EXISTS question (
        question_id INTEGER NOT NULL,
        title TEXT NOT NULL,
        creation_date INTEGER NOT NULL,
        accepted_answer_id INTEGER,
        tags_json TEXT NOT NULL DEFAULT '[]'
    )
"#;

const CREATE_ANSWER: &str = r#"
    CREATE TABLE IF NOT EXISTS answer (
        answer_id INTEGER NOT NULL,
        question_id INTEGER NOT NULL,
        creation_date INTEGER NOT NULL,
        score INTEGER NOT NULL DEFAULT 0,
        is_accepted INTEGER NOT NULL DEFAULT 0,
        body TEXT
    )
"#;

const CREATE_QUESTION_TAG: &str = r#"
    CREATE TABLE IF NOT EXISTS question_tag (
        question_id INTEGER NOT NULL,
        tag TEXT NOT NULL
    )
"#;

/// Create the schema if it does not exist yet. Idempotent; used by `init`.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), ImportError> {
    for sql in [CREATE_QUESTION, CREATE_ANSWER, CREATE_QUESTION_TAG] {
        sqlx::query(sql).execute(pool).await?;
    }

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_question_id ON question(question_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_answer_question_id ON answer(question_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_question_tag_tag ON question_tag(tag)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Drop and recreate all three tables. Destructive; used at the start of
/// every import run.
pub async fn recreate_tables(pool: &SqlitePool) -> Result<(), ImportError> {
    for table in TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    create_tables(pool).await
}

/// Recreate the schema and bulk-insert the final collections.
pub async fn load(
    pool: &SqlitePool,
    questions: &[Question],
    answers: &[Answer],
    tags: &[QuestionTag],
) -> Result<(), ImportError> {
    recreate_tables(pool).await?;
    insert_questions(pool, questions).await?;
    insert_answers(pool, answers).await?;
    insert_tags(pool, tags).await?;
    Ok(())
}

pub async fn insert_questions(pool: &SqlitePool, questions: &[Question]) -> Result<(), ImportError> {
    let mut tx = pool.begin().await?;
    for q in questions {
        sqlx::query(
            r#"
            INSERT INTO question (question_id, title, creation_date, accepted_answer_id, tags_json)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(q.question_id)
        .bind(&q.title)
        .bind(q.creation_date.timestamp())
        .bind(q.accepted_answer_id)
        .bind(q.tags_json())
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn insert_answers(pool: &SqlitePool, answers: &[Answer]) -> Result<(), ImportError> {
    let mut tx = pool.begin().await?;
    for a in answers {
        sqlx::query(
            r#"
            INSERT INTO answer (answer_id, question_id, creation_date, score, is_accepted, body)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(a.answer_id)
        .bind(a.question_id)
        .bind(a.creation_date.timestamp())
        .bind(a.score)
        .bind(a.is_accepted)
        .bind(&a.body)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn insert_tags(pool: &SqlitePool, tags: &[QuestionTag]) -> Result<(), ImportError> {
    let mut tx = pool.begin().await?;
    for t in tags {
        sqlx::query("INSERT INTO question_tag (question_id, tag) VALUES (?, ?)")
            .bind(t.question_id)
            .bind(&t.tag)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::{TimeZone, Utc};

    fn question(id: i64, title: &str, tags: &[&str]) -> Question {
        Question {
            question_id: id,
            title: title.to_string(),
            creation_date: Utc.timestamp_opt(1_400_000_000, 0).unwrap(),
            accepted_answer_id: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn answer(id: i64, question_id: i64) -> Answer {
        Answer {
            answer_id: id,
            question_id,
            creation_date: Utc.timestamp_opt(1_400_000_100, 0).unwrap(),
            score: 3,
            is_accepted: true,
            body: None,
        }
    }

    async fn temp_pool() -> (tempfile::TempDir, SqlitePool) {
        let tmp = tempfile::TempDir::new().unwrap();
        let pool = db::connect(&tmp.path().join("test.sqlite")).await.unwrap();
        (tmp, pool)
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_inserts_all_collections() {
        let (_tmp, pool) = temp_pool().await;

        let questions = vec![question(1, "one", &["a", "b"]), question(2, "two", &["a"])];
        let answers = vec![answer(10, 1)];
        let tags = crate::tags::extract_question_tags(&questions);

        load(&pool, &questions, &answers, &tags).await.unwrap();

        assert_eq!(count(&pool, "question").await, 2);
        assert_eq!(count(&pool, "answer").await, 1);
        assert_eq!(count(&pool, "question_tag").await, 3);

        let title: String = sqlx::query_scalar("SELECT title FROM question WHERE question_id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(title, "one");

        pool.close().await;
    }

    #[tokio::test]
    async fn test_reload_replaces_previous_contents() {
        let (_tmp, pool) = temp_pool().await;

        let first = vec![question(1, "one", &[]), question(2, "two", &[])];
        load(&pool, &first, &[], &[]).await.unwrap();
        assert_eq!(count(&pool, "question").await, 2);

        let second = vec![question(3, "three", &[])];
        load(&pool, &second, &[], &[]).await.unwrap();

        assert_eq!(count(&pool, "question").await, 1);
        let leftover: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM question WHERE question_id IN (1, 2)")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(leftover, 0);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_create_tables_idempotent() {
        let (_tmp, pool) = temp_pool().await;
        create_tables(&pool).await.unwrap();
        create_tables(&pool).await.unwrap();
        assert_eq!(count(&pool, "question").await, 0);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_tags_stored_as_json() {
        let (_tmp, pool) = temp_pool().await;

        let questions = vec![question(42, "tagged", &["a", "b"])];
        load(&pool, &questions, &[], &[]).await.unwrap();

        let tags_json: String =
            sqlx::query_scalar("SELECT tags_json FROM question WHERE question_id = 42")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(tags_json, r#"["a","b"]"#);

        pool.close().await;
    }
}
