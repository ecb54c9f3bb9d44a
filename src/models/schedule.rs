// src/models/schedule.rs

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// Enums
// ---

// Mapeia o CREATE TYPE week_day do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "week_day", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    // Converte o dia da semana do chrono para o nosso enum de banco
    pub fn from_chrono(day: Weekday) -> Self {
        match day {
            Weekday::Mon => WeekDay::Monday,
            Weekday::Tue => WeekDay::Tuesday,
            Weekday::Wed => WeekDay::Wednesday,
            Weekday::Thu => WeekDay::Thursday,
            Weekday::Fri => WeekDay::Friday,
            Weekday::Sat => WeekDay::Saturday,
            Weekday::Sun => WeekDay::Sunday,
        }
    }
}

// ---
// 1. BranchHours (O "Horário de Funcionamento")
// ---
// Uma linha por (agência, dia da semana). O serviço sempre faz UPSERT,
// nunca acumula linhas para o mesmo dia.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchHours {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub day_of_week: WeekDay,

    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub is_closed: bool,

    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl BranchHours {
    /// Verifica se um horário local cai dentro da janela [open, close).
    /// Janela com close <= open atravessa a meia-noite (Ex: 22:00 às 02:00).
    pub fn covers(&self, local_time: NaiveTime) -> bool {
        if self.is_closed {
            return false;
        }

        match (self.open_time, self.close_time) {
            (Some(open), Some(close)) => {
                if close > open {
                    local_time >= open && local_time < close
                } else {
                    // Janela noturna: vale do open até a meia-noite
                    // e da meia-noite até o close do dia seguinte
                    local_time >= open || local_time < close
                }
            }
            // Sem horários cadastrados, tratamos como fechado
            _ => false,
        }
    }
}

// ---
// 2. BankHoliday (O "Feriado")
// ---
// Exceção de data, no escopo do banco inteiro ou de uma agência.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankHoliday {
    pub id: Uuid,
    pub bank_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub country_id: Option<Uuid>,

    pub holiday_date: NaiveDate,
    pub is_recurring: bool,
    pub name: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl BankHoliday {
    /// Um feriado recorrente casa por mês+dia (o ano é ignorado);
    /// um feriado pontual casa apenas pela data exata.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        if self.is_recurring {
            self.holiday_date.month() == date.month() && self.holiday_date.day() == date.day()
        } else {
            self.holiday_date == date
        }
    }
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetHoursPayload {
    #[schema(example = "MONDAY")]
    pub day_of_week: WeekDay,

    #[schema(example = "09:00:00")]
    pub open_time: Option<NaiveTime>,

    #[schema(example = "17:00:00")]
    pub close_time: Option<NaiveTime>,

    #[serde(default)]
    pub is_closed: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHolidayPayload {
    #[schema(example = "2024-12-25")]
    pub holiday_date: NaiveDate,

    #[serde(default)]
    #[schema(example = true)]
    pub is_recurring: bool,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Natal")]
    pub name: String,

    pub country_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(open: &str, close: &str) -> BranchHours {
        BranchHours {
            id: Uuid::new_v4(),
            branch_id: Uuid::new_v4(),
            day_of_week: WeekDay::Monday,
            open_time: Some(open.parse().unwrap()),
            close_time: Some(close.parse().unwrap()),
            is_closed: false,
            created_at: Utc::now(),
            created_by: Uuid::new_v4(),
            updated_at: Utc::now(),
            updated_by: Uuid::new_v4(),
        }
    }

    fn t(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    #[test]
    fn regular_window_is_half_open() {
        let hours = window("09:00:00", "17:00:00");

        assert!(hours.covers(t("09:00:00")));
        assert!(hours.covers(t("12:30:00")));
        // O fechamento é exclusivo
        assert!(!hours.covers(t("17:00:00")));
        assert!(!hours.covers(t("08:59:59")));
    }

    #[test]
    fn overnight_window_wraps_past_midnight() {
        let hours = window("22:00:00", "02:00:00");

        assert!(hours.covers(t("23:30:00")));
        assert!(hours.covers(t("01:00:00")));
        assert!(!hours.covers(t("03:00:00")));
        assert!(!hours.covers(t("21:00:00")));
    }

    #[test]
    fn closed_day_never_covers() {
        let mut hours = window("09:00:00", "17:00:00");
        hours.is_closed = true;

        assert!(!hours.covers(t("12:00:00")));
    }

    #[test]
    fn missing_times_mean_closed() {
        let mut hours = window("09:00:00", "17:00:00");
        hours.open_time = None;
        hours.close_time = None;

        assert!(!hours.covers(t("12:00:00")));
    }

    fn holiday(date: &str, recurring: bool) -> BankHoliday {
        BankHoliday {
            id: Uuid::new_v4(),
            bank_id: Some(Uuid::new_v4()),
            branch_id: None,
            country_id: None,
            holiday_date: date.parse().unwrap(),
            is_recurring: recurring,
            name: "Feriado".to_string(),
            is_active: true,
            created_at: Utc::now(),
            created_by: Uuid::new_v4(),
            updated_at: Utc::now(),
            updated_by: Uuid::new_v4(),
        }
    }

    #[test]
    fn recurring_holiday_ignores_year() {
        let christmas = holiday("2020-12-25", true);

        assert!(christmas.matches_date("2024-12-25".parse().unwrap()));
        assert!(christmas.matches_date("2030-12-25".parse().unwrap()));
        assert!(!christmas.matches_date("2024-12-24".parse().unwrap()));
    }

    #[test]
    fn one_off_holiday_matches_only_literal_date() {
        let inauguration = holiday("2024-12-25", false);

        assert!(inauguration.matches_date("2024-12-25".parse().unwrap()));
        assert!(!inauguration.matches_date("2025-12-25".parse().unwrap()));
    }
}
