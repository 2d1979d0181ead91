use super::{get_value, set_value};
use crate::error::Result;
use crate::logger;
use crate::models::QuizResult;
use rusqlite::Connection;

pub const RESULTS_KEY: &str = "quizResults";

/// Reads the stored history. Missing or unparsable data reads as empty.
pub fn load_results(conn: &Connection) -> Vec<QuizResult> {
    let raw = match get_value(conn, RESULTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            logger::log(&format!("Failed to read quiz results: {}", e));
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(results) => results,
        Err(e) => {
            logger::log(&format!("Discarding unparsable quiz results: {}", e));
            Vec::new()
        }
    }
}

/// Appends one record. A failed read aborts instead of overwriting the history.
pub fn append_result(conn: &Connection, result: &QuizResult) -> Result<()> {
    let mut results: Vec<QuizResult> = match get_value(conn, RESULTS_KEY)? {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            logger::log(&format!("Replacing unparsable quiz results: {}", e));
            Vec::new()
        }),
        None => Vec::new(),
    };
    results.push(result.clone());
    let json = serde_json::to_string(&results)?;
    set_value(conn, RESULTS_KEY, &json)?;
    logger::log(&format!(
        "Stored quiz result: score {} ({} total records)",
        result.score,
        results.len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::models::Difficulty;
    use chrono::{TimeZone, Utc};

    fn sample(score: u32) -> QuizResult {
        let date = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        QuizResult::new(score, 10, "Animals", Difficulty::Easy, date, Some(60))
    }

    #[test]
    fn test_empty_store_loads_empty_list() {
        let (_dir, conn) = test_connection();
        assert!(load_results(&conn).is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let (_dir, conn) = test_connection();
        append_result(&conn, &sample(30)).unwrap();
        append_result(&conn, &sample(80)).unwrap();

        let results = load_results(&conn);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].score, 30);
        assert_eq!(results[1], sample(80));
    }

    #[test]
    fn test_corrupt_value_loads_empty_and_recovers() {
        let (_dir, conn) = test_connection();
        set_value(&conn, RESULTS_KEY, "{not json").unwrap();
        assert!(load_results(&conn).is_empty());

        append_result(&conn, &sample(50)).unwrap();
        assert_eq!(load_results(&conn).len(), 1);
    }

    #[test]
    fn test_append_keeps_unreadable_history_intact() {
        let (_dir, conn) = test_connection();
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, X'0102')",
            [RESULTS_KEY],
        )
        .unwrap();
        assert!(load_results(&conn).is_empty());

        assert!(append_result(&conn, &sample(40)).is_err());

        let kind: String = conn
            .query_row(
                "SELECT typeof(value) FROM kv WHERE key = ?1",
                [RESULTS_KEY],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(kind, "blob");
    }

    #[test]
    fn test_stored_value_is_a_json_array() {
        let (_dir, conn) = test_connection();
        append_result(&conn, &sample(20)).unwrap();
        let raw = get_value(&conn, RESULTS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["score"], 20);
    }
}
