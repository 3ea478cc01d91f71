//! Database summary.
//!
//! Prints row counts for the three tables plus the database file size. Used
//! by `stackload stats` to confirm an import landed the expected data.

use anyhow::Result;

use crate::config::Config;
use crate::db;

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(&config.db.path).await?;

    let questions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM question")
        .fetch_one(&pool)
        .await?;
    let answers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM answer")
        .fetch_one(&pool)
        .await?;
    let tags: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM question_tag")
        .fetch_one(&pool)
        .await?;
    let distinct_tags: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT tag) FROM question_tag")
        .fetch_one(&pool)
        .await?;
    let accepted: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM question WHERE accepted_answer_id IS NOT NULL")
            .fetch_one(&pool)
            .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("stackload — Database Stats");
    println!("==========================");
    println!();
    println!("  Database:       {}", config.db.path.display());
    println!("  Size:           {}", format_bytes(db_size));
    println!();
    println!("  Questions:      {}", questions);
    println!("    w/ accepted:  {}", accepted);
    println!("  Answers:        {}", answers);
    println!("  Tag rows:       {} ({} distinct tags)", tags, distinct_tags);
    println!();

    pool.close().await;
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
