// src/models/calendar.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. WorkingCalendar (O "Calendário de Trabalho")
// ---
// Um rótulo nomeado, dono de atribuições com vigência. O calendário carrega
// nome e fuso para exibição; as regras de horário continuam na agência.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkingCalendar {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub name: String,

    // No máximo um calendário padrão por banco
    pub is_default: bool,
    pub time_zone_id: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

// ---
// 2. Alvo da atribuição
// ---

// Em qual nível da hierarquia o calendário foi atribuído
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalendarTargetType {
    Branch,
    Department,
    Position,
}

// ---
// 3. CalendarAssignment (O "Vínculo com Vigência")
// ---
// Liga um calendário a exatamente um nó da hierarquia por uma janela
// de tempo [effective_from, effective_to). effective_to nulo = sem fim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarAssignment {
    pub id: Uuid,
    pub calendar_id: Uuid,

    // Exatamente um destes três é preenchido (CHECK no schema)
    pub branch_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub position_id: Option<Uuid>,

    pub effective_from: DateTime<Utc>,
    pub effective_to: Option<DateTime<Utc>>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl CalendarAssignment {
    /// O nó alvo desta atribuição, se o registro respeita o invariante
    /// de alvo único.
    pub fn target(&self) -> Option<(CalendarTargetType, Uuid)> {
        match (self.branch_id, self.department_id, self.position_id) {
            (Some(id), None, None) => Some((CalendarTargetType::Branch, id)),
            (None, Some(id), None) => Some((CalendarTargetType::Department, id)),
            (None, None, Some(id)) => Some((CalendarTargetType::Position, id)),
            _ => None,
        }
    }

    /// A atribuição vigora no instante dado?
    pub fn in_effect_at(&self, instant: DateTime<Utc>) -> bool {
        self.is_active
            && self.effective_from <= instant
            && self.effective_to.is_none_or(|end| end > instant)
    }
}

/// Duas janelas semiabertas [from, to) se intersectam?
/// `to` nulo é tratado como aberto até o infinito.
pub fn windows_overlap(
    a_from: DateTime<Utc>,
    a_to: Option<DateTime<Utc>>,
    b_from: DateTime<Utc>,
    b_to: Option<DateTime<Utc>>,
) -> bool {
    let a_reaches_b = a_to.is_none_or(|end| end > b_from);
    let b_reaches_a = b_to.is_none_or(|end| end > a_from);
    a_reaches_b && b_reaches_a
}

/// Regra determinística de desempate quando mais de uma atribuição
/// vigora no mesmo instante (sobreposição que a escrita não barrou):
/// vence o effective_from mais recente; persiste o empate, vence a
/// atribuição criada por último.
pub fn pick_governing(candidates: &[CalendarAssignment]) -> Option<&CalendarAssignment> {
    candidates
        .iter()
        .max_by_key(|a| (a.effective_from, a.created_at))
}

// ---
// 4. Resultado da resolução
// ---

// Em qual degrau da cadeia de fallback a resolução parou
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResolutionLevel {
    Position,
    Department,
    Branch,
    BankDefault,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCalendar {
    pub calendar: WorkingCalendar,
    pub level: ResolutionLevel,

    // Presente quando a resolução veio de uma atribuição explícita
    // (ausente quando caiu no calendário padrão do banco)
    pub assignment_id: Option<Uuid>,
}

// "A agência opera sob seu calendário resolvido neste instante?"
// O calendário é metadado de exibição; quem abre e fecha a agência
// são a grade de horários e os feriados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingStatus {
    pub operating: bool,

    // Ausente quando a cadeia de resolução se esgotou:
    // "calendário indeterminado" não significa "fechado"
    pub calendar: Option<ResolvedCalendar>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalendarPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Expediente Padrão")]
    pub name: String,

    #[serde(default)]
    pub is_default: bool,

    #[serde(default = "default_time_zone")]
    #[schema(example = "America/Sao_Paulo")]
    pub time_zone_id: String,
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignCalendarPayload {
    #[schema(example = "BRANCH")]
    pub target_type: CalendarTargetType,

    pub target_id: Uuid,

    pub effective_from: DateTime<Utc>,

    // Nulo = vigência sem data de término
    pub effective_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResolveQuery {
    pub target_type: CalendarTargetType,
    pub target_id: Uuid,

    // Instante da consulta; ausente = agora
    pub at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn assignment(from: &str, to: Option<&str>, created: &str) -> CalendarAssignment {
        CalendarAssignment {
            id: Uuid::new_v4(),
            calendar_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            department_id: None,
            position_id: None,
            effective_from: ts(from),
            effective_to: to.map(ts),
            is_active: true,
            created_at: ts(created),
            created_by: Uuid::new_v4(),
            updated_at: ts(created),
            updated_by: Uuid::new_v4(),
        }
    }

    #[test]
    fn bounded_windows_overlap_when_they_intersect() {
        // Caso do guard de escrita: jan..jun contra mar..sem-fim
        assert!(windows_overlap(
            ts("2024-01-01 00:00:00"),
            Some(ts("2024-06-01 00:00:00")),
            ts("2024-03-01 00:00:00"),
            None,
        ));
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        // [jan, mar) e [mar, jun) apenas se tocam
        assert!(!windows_overlap(
            ts("2024-01-01 00:00:00"),
            Some(ts("2024-03-01 00:00:00")),
            ts("2024-03-01 00:00:00"),
            Some(ts("2024-06-01 00:00:00")),
        ));
    }

    #[test]
    fn open_ended_window_overlaps_everything_after_its_start() {
        assert!(windows_overlap(
            ts("2024-01-01 00:00:00"),
            None,
            ts("2030-01-01 00:00:00"),
            Some(ts("2031-01-01 00:00:00")),
        ));

        // Mas não o que termina antes dela começar
        assert!(!windows_overlap(
            ts("2024-01-01 00:00:00"),
            None,
            ts("2023-01-01 00:00:00"),
            Some(ts("2024-01-01 00:00:00")),
        ));
    }

    #[test]
    fn governing_assignment_is_latest_effective_from() {
        let older = assignment("2024-01-01 00:00:00", None, "2024-01-01 10:00:00");
        let newer = assignment("2024-03-01 00:00:00", None, "2024-01-01 09:00:00");
        let expected = newer.id;

        let candidates = [older, newer];
        let winner = pick_governing(&candidates).unwrap();
        assert_eq!(winner.id, expected);
    }

    #[test]
    fn fully_overlapping_tie_breaks_by_created_at() {
        let first = assignment(
            "2024-01-01 00:00:00",
            Some("2024-12-31 00:00:00"),
            "2024-01-01 08:00:00",
        );
        let second = assignment(
            "2024-01-01 00:00:00",
            Some("2024-12-31 00:00:00"),
            "2024-01-01 09:30:00",
        );

        // Intervalos idênticos: vence quem foi criado por último
        let expected = second.id;
        let candidates = [first, second];
        let winner = pick_governing(&candidates).unwrap();
        assert_eq!(winner.id, expected);
    }

    #[test]
    fn in_effect_respects_half_open_window() {
        let a = assignment(
            "2024-01-01 00:00:00",
            Some("2024-06-01 00:00:00"),
            "2024-01-01 00:00:00",
        );

        assert!(a.in_effect_at(ts("2024-01-01 00:00:00")));
        assert!(a.in_effect_at(ts("2024-05-31 23:59:59")));
        assert!(!a.in_effect_at(ts("2024-06-01 00:00:00")));
        assert!(!a.in_effect_at(ts("2023-12-31 23:59:59")));
    }

    #[test]
    fn inactive_assignment_is_never_in_effect() {
        let mut a = assignment("2024-01-01 00:00:00", None, "2024-01-01 00:00:00");
        a.is_active = false;

        assert!(!a.in_effect_at(ts("2024-02-01 00:00:00")));
    }

    #[test]
    fn target_requires_exactly_one_node() {
        let mut a = assignment("2024-01-01 00:00:00", None, "2024-01-01 00:00:00");
        assert_eq!(a.target().map(|(kind, _)| kind), Some(CalendarTargetType::Branch));

        // Dois alvos preenchidos: registro inválido, sem alvo
        a.department_id = Some(Uuid::new_v4());
        assert!(a.target().is_none());
    }
}
