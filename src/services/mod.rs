pub mod daily_records;
pub mod dashboard;
pub mod datetime;
pub mod equipment;
pub mod garden_care;
pub mod gardens;
pub mod images;
pub mod journal_entries;
pub mod plant_care;
pub mod plants;
pub mod reminders;

use chrono::Duration;

use crate::error::{AppError, AppResult};

/// Widest look-back or look-ahead a `days` parameter may ask for.
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Turns a client-supplied day count into a window, rejecting values outside
/// `1..=MAX_WINDOW_DAYS`.
pub(crate) fn day_window(days: i64) -> AppResult<Duration> {
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(AppError::InvalidInput(format!(
            "Days must be between 1 and {MAX_WINDOW_DAYS}."
        )));
    }
    Ok(Duration::days(days))
}

/// Resolves a lookup that is scoped to one user: missing rows are 404, rows
/// owned by someone else are 403.
pub(crate) fn owned<M>(
    found: Option<M>,
    user_id: i32,
    owner: impl Fn(&M) -> i32,
    what: &'static str,
) -> AppResult<M> {
    match found {
        Some(model) if owner(&model) == user_id => Ok(model),
        Some(_) => Err(AppError::Forbidden("You do not have access to this item")),
        None => Err(AppError::NotFound(what)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_is_enforced() {
        let row = (7, "Herbs");
        assert_eq!(owned(Some(row), 7, |r| r.0, "Garden").unwrap().1, "Herbs");
        assert!(matches!(
            owned(Some(row), 8, |r| r.0, "Garden"),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            owned(None::<(i32, &str)>, 7, |r| r.0, "Garden"),
            Err(AppError::NotFound("Garden"))
        ));
    }

    #[test]
    fn day_windows_are_bounded() {
        assert_eq!(day_window(7).unwrap(), Duration::days(7));
        assert!(day_window(MAX_WINDOW_DAYS).is_ok());
        assert!(matches!(day_window(0), Err(AppError::InvalidInput(_))));
        assert!(matches!(
            day_window(1_000_000_000_000),
            Err(AppError::InvalidInput(_))
        ));
    }
}
