use serde::{Deserialize, Serialize};

use crate::shared::AppError;

/// Query string for GET /linhas
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub escola: Option<i64>,
    pub turno: Option<String>,
}

impl RouteQuery {
    /// Both parameters are required
    pub fn into_parts(self) -> Result<(i64, String), AppError> {
        match (self.escola, self.turno) {
            (Some(escola), Some(turno)) => Ok((escola, turno)),
            _ => Err(AppError::InvalidRequest(
                "Parâmetros 'escola' e 'turno' são obrigatórios".to_string(),
            )),
        }
    }
}

/// One entry of a route as the front end holds it
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    pub escola_id: i64,
    #[serde(default)]
    pub turno: Option<String>,
}

/// Request payload for POST /filter-name-school, one list per shift period
#[derive(Debug, Default, Deserialize)]
pub struct SchoolFilterRequest {
    #[serde(rename = "linhaManha", default)]
    pub linha_manha: Vec<RouteEntry>,
    #[serde(rename = "linhaMeiodia", default)]
    pub linha_meiodia: Vec<RouteEntry>,
    #[serde(rename = "linhaTarde", default)]
    pub linha_tarde: Vec<RouteEntry>,
}

impl SchoolFilterRequest {
    /// All school ids across the three periods, in request order
    pub fn school_ids(&self) -> Vec<i64> {
        self.linha_manha
            .iter()
            .chain(&self.linha_meiodia)
            .chain(&self.linha_tarde)
            .map(|entry| entry.escola_id)
            .collect()
    }
}

/// An assignment insert that failed during registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedAssignment {
    pub escola_id: i64,
    pub turno: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_ids_flattens_all_periods_in_order() {
        let request: SchoolFilterRequest = serde_json::from_str(
            r#"{
                "linhaManha": [{"escola_id": 3, "turno": "manha"}, {"escola_id": 1, "turno": "manha"}],
                "linhaMeiodia": [{"escola_id": 2}],
                "linhaTarde": [{"escola_id": 3, "turno": "tarde"}]
            }"#,
        )
        .unwrap();

        assert_eq!(request.school_ids(), vec![3, 1, 2, 3]);
    }

    #[test]
    fn test_missing_periods_default_to_empty() {
        let request: SchoolFilterRequest =
            serde_json::from_str(r#"{"linhaTarde": [{"escola_id": 5}]}"#).unwrap();
        assert_eq!(request.school_ids(), vec![5]);

        let empty: SchoolFilterRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.school_ids().is_empty());
    }

    #[test]
    fn test_route_query_requires_both_parameters() {
        let complete = RouteQuery {
            escola: Some(1),
            turno: Some("manha".to_string()),
        };
        assert_eq!(complete.into_parts().unwrap(), (1, "manha".to_string()));

        let missing_shift = RouteQuery {
            escola: Some(1),
            turno: None,
        };
        assert!(matches!(
            missing_shift.into_parts(),
            Err(AppError::InvalidRequest(_))
        ));
    }
}
