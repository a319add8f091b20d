use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::timelogs::repo::Timelog;

/// Create/update body. `project` and `user` carry internal references,
/// not the project's business key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelogPayload {
    pub work_hours: Decimal,
    pub project: Uuid,
    pub user: Uuid,
    pub date: String,
}

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^\d{8}$").unwrap();
}

impl TimelogPayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.work_hours.is_sign_negative() {
            return Err(ApiError::validation("work_hours must be non-negative"));
        }
        if self.work_hours.scale() > 2 {
            return Err(ApiError::validation(
                "work_hours allows at most 2 decimal places",
            ));
        }
        if self.work_hours > Decimal::new(99_999, 2) {
            return Err(ApiError::validation("work_hours must not exceed 999.99"));
        }
        if !DATE_RE.is_match(&self.date) {
            return Err(ApiError::validation(
                "date must be an 8-digit YYYYMMDD string",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTimelogRequest {
    pub user: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TimelogResponse {
    pub id: Uuid,
    pub work_hours: Decimal,
    pub project: Uuid,
    pub user: Uuid,
    pub date: String,
}

impl From<Timelog> for TimelogResponse {
    fn from(t: Timelog) -> Self {
        Self {
            id: t.id,
            work_hours: t.work_hours,
            project: t.project_id,
            user: t.user_id,
            date: t.log_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(hours: Decimal, date: &str) -> TimelogPayload {
        TimelogPayload {
            work_hours: hours,
            project: Uuid::new_v4(),
            user: Uuid::new_v4(),
            date: date.into(),
        }
    }

    #[test]
    fn accepts_a_plain_workday() {
        assert!(payload(Decimal::new(250, 2), "20240115").validate().is_ok());
        assert!(payload(Decimal::ZERO, "19991231").validate().is_ok());
        assert!(payload(Decimal::new(99_999, 2), "20240115").validate().is_ok());
    }

    #[test]
    fn rejects_negative_hours() {
        assert!(payload(Decimal::new(-1, 0), "20240115").validate().is_err());
    }

    #[test]
    fn rejects_more_than_two_decimal_places() {
        assert!(payload(Decimal::new(2_505, 3), "20240115").validate().is_err());
    }

    #[test]
    fn rejects_hours_beyond_five_digits() {
        assert!(payload(Decimal::new(100_000, 2), "20240115").validate().is_err());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(payload(Decimal::ONE, "2024011").validate().is_err());
        assert!(payload(Decimal::ONE, "202401155").validate().is_err());
        assert!(payload(Decimal::ONE, "2024-01-5").validate().is_err());
        assert!(payload(Decimal::ONE, "").validate().is_err());
    }

    #[test]
    fn work_hours_serialize_as_a_decimal_string() {
        let value = serde_json::to_value(payload(Decimal::new(250, 2), "20240115")).unwrap();
        assert_eq!(value["work_hours"], "2.50");
    }

    #[test]
    fn work_hours_deserialize_from_number_or_string() {
        let from_number: TimelogPayload = serde_json::from_value(serde_json::json!({
            "work_hours": 2.5,
            "project": Uuid::new_v4(),
            "user": Uuid::new_v4(),
            "date": "20240115",
        }))
        .unwrap();
        assert_eq!(from_number.work_hours, Decimal::new(25, 1));

        let from_string: TimelogPayload = serde_json::from_value(serde_json::json!({
            "work_hours": "2.50",
            "project": Uuid::new_v4(),
            "user": Uuid::new_v4(),
            "date": "20240115",
        }))
        .unwrap();
        assert_eq!(from_string.work_hours, Decimal::new(250, 2));
    }
}
