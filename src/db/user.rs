use super::{get_value, remove_value, set_value};
use crate::error::Result;
use crate::logger;
use crate::models::UserIdentity;
use rusqlite::Connection;

const CURRENT_USER_KEY: &str = "currentUser";

pub fn load_current_user(conn: &Connection) -> Option<UserIdentity> {
    let raw = get_value(conn, CURRENT_USER_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            logger::log(&format!("Ignoring unparsable stored user: {}", e));
            None
        }
    }
}

pub fn save_current_user(conn: &Connection, user: &UserIdentity) -> Result<()> {
    set_value(conn, CURRENT_USER_KEY, &serde_json::to_string(user)?)
}

pub fn clear_current_user(conn: &Connection) -> Result<()> {
    remove_value(conn, CURRENT_USER_KEY)
}
