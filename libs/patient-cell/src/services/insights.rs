use shared_models::records::Patient;

use crate::models::PatientInsights;

/// Best-effort numeric extractor over semi-structured metadata: the first
/// whitespace-delimited token of `raw`, parsed as a decimal. `"15 mins"`
/// yields 15.0; anything that does not parse yields `None`.
pub fn leading_number(raw: &str) -> Option<f64> {
    raw.split_whitespace().next()?.parse().ok()
}

/// Derive summary statistics from a patient's consultation history.
///
/// The consultation sequence is in insertion order, so the last element is
/// authoritative as the most recent visit. Duration samples come from the
/// `duration` key of each consultation's insights; consultations where the
/// key is missing, non-string, or unparseable contribute no sample and are
/// skipped silently, since historical records are heterogeneous.
pub fn compute_insights(patient: &Patient) -> PatientInsights {
    let consultations = &patient.consultations;

    let last_visit = consultations.last().map(|c| c.date.clone());

    let durations: Vec<f64> = consultations
        .iter()
        .filter_map(|c| c.insights.get("duration"))
        .filter_map(|value| value.as_str())
        .filter_map(leading_number)
        .collect();

    let average_duration_minutes = if durations.is_empty() {
        None
    } else {
        Some(durations.iter().sum::<f64>() / durations.len() as f64)
    };

    PatientInsights {
        total_visits: consultations.len(),
        last_visit,
        average_duration_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use shared_models::records::Consultation;

    fn consultation(id: &str, date: &str, insights: Map<String, serde_json::Value>) -> Consultation {
        Consultation {
            id: id.to_string(),
            date: date.to_string(),
            transcription: String::new(),
            prescription: String::new(),
            ai_summary: String::new(),
            insights,
        }
    }

    fn duration_insights(raw: &str) -> Map<String, serde_json::Value> {
        let mut map = Map::new();
        map.insert("duration".to_string(), json!(raw));
        map
    }

    #[test]
    fn leading_number_parses_first_token_only() {
        assert_eq!(leading_number("15 mins"), Some(15.0));
        assert_eq!(leading_number("  12.5 minutes approx"), Some(12.5));
        assert_eq!(leading_number("bad"), None);
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("mins 15"), None);
    }

    #[test]
    fn malformed_and_missing_durations_are_skipped() {
        let patient = shared_models::records::Patient {
            id: "PAT_A".to_string(),
            name: "Test".to_string(),
            age: None,
            gender: None,
            consultations: vec![
                consultation("CONS_1", "2024-01-01T09:00:00Z", duration_insights("15 mins")),
                consultation("CONS_2", "2024-02-01T09:00:00Z", duration_insights("bad")),
                consultation("CONS_3", "2024-03-01T09:00:00Z", Map::new()),
            ],
        };

        let insights = compute_insights(&patient);
        assert_eq!(insights.total_visits, 3);
        assert_eq!(insights.last_visit.as_deref(), Some("2024-03-01T09:00:00Z"));
        assert_eq!(insights.average_duration_minutes, Some(15.0));
    }

    #[test]
    fn averages_over_all_parsed_samples() {
        let patient = shared_models::records::Patient {
            id: "PAT_A".to_string(),
            name: "Test".to_string(),
            age: None,
            gender: None,
            consultations: vec![
                consultation("CONS_1", "2024-01-01T09:00:00Z", duration_insights("10 mins")),
                consultation("CONS_2", "2024-02-01T09:00:00Z", duration_insights("20 mins")),
            ],
        };

        assert_eq!(compute_insights(&patient).average_duration_minutes, Some(15.0));
    }

    #[test]
    fn empty_history_yields_absent_statistics() {
        let patient = shared_models::records::Patient::stub("PAT_EMPTY");
        let insights = compute_insights(&patient);
        assert_eq!(insights.total_visits, 0);
        assert_eq!(insights.last_visit, None);
        assert_eq!(insights.average_duration_minutes, None);
    }

    #[test]
    fn non_string_duration_values_are_skipped() {
        let mut numeric = Map::new();
        numeric.insert("duration".to_string(), json!(30));
        let patient = shared_models::records::Patient {
            id: "PAT_A".to_string(),
            name: "Test".to_string(),
            age: None,
            gender: None,
            consultations: vec![consultation("CONS_1", "2024-01-01T09:00:00Z", numeric)],
        };

        assert_eq!(compute_insights(&patient).average_duration_minutes, None);
    }
}
