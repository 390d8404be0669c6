//! Request-body parsing into the core dataset model.

use arbol_id3::Dataset;

use crate::server::{ApiError, BuildTreeRequest};

/// A validated build request: the dataset plus the feature/target split.
#[derive(Debug)]
pub struct ParsedRequest {
    pub dataset: Dataset,
    pub features: Vec<String>,
    pub target: String,
}

/// Parse the wire format into a [`Dataset`].
///
/// `parameters` is split on commas (whitespace-trimmed, empties dropped);
/// the last entry is the target and the rest are features. `data` is split
/// into lines (blank lines dropped), each line comma-split into one row.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] when fewer than two parameters are
/// given, the data block is empty, fewer than two rows remain, or any
/// row's width differs from the parameter count.
pub fn parse_request(request: &BuildTreeRequest) -> Result<ParsedRequest, ApiError> {
    let parameters: Vec<String> = request
        .parameters
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if parameters.len() < 2 {
        return Err(ApiError::BadRequest(
            "at least 2 parameters are required (1 feature, 1 target)".to_string(),
        ));
    }

    if request.data.trim().is_empty() {
        return Err(ApiError::BadRequest("dataset must not be empty".to_string()));
    }

    let rows: Vec<Vec<String>> = request
        .data
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(|v| v.trim().to_string()).collect())
        .collect();
    if rows.len() < 2 {
        return Err(ApiError::BadRequest(
            "at least 2 data rows are required".to_string(),
        ));
    }

    for (index, row) in rows.iter().enumerate() {
        if row.len() != parameters.len() {
            return Err(ApiError::BadRequest(format!(
                "data row {} has {} columns, expected {}",
                index + 1,
                row.len(),
                parameters.len()
            )));
        }
    }

    let target = parameters[parameters.len() - 1].clone();
    let features = parameters[..parameters.len() - 1].to_vec();
    let dataset = Dataset::new(parameters, rows).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(ParsedRequest {
        dataset,
        features,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(parameters: &str, data: &str) -> BuildTreeRequest {
        BuildTreeRequest {
            parameters: parameters.to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn valid_request_parses() {
        let parsed = parse_request(&request(
            "Weather, Temp, Play",
            "Sunny,Hot,No\nRain,Mild,Yes\n",
        ))
        .unwrap();

        assert_eq!(parsed.features, vec!["Weather", "Temp"]);
        assert_eq!(parsed.target, "Play");
        assert_eq!(parsed.dataset.n_rows(), 2);
        assert_eq!(parsed.dataset.n_columns(), 3);
        assert_eq!(parsed.dataset.value(0, 0), "Sunny");
    }

    #[test]
    fn blank_lines_and_whitespace_trimmed() {
        let parsed = parse_request(&request(
            "A,B",
            "\n x , 0 \n\n y , 1 \n",
        ))
        .unwrap();
        assert_eq!(parsed.dataset.n_rows(), 2);
        assert_eq!(parsed.dataset.value(0, 0), "x");
        assert_eq!(parsed.dataset.value(1, 1), "1");
    }

    #[test]
    fn too_few_parameters_rejected() {
        let err = parse_request(&request("OnlyTarget", "a\nb\n")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m.contains("at least 2 parameters")));
    }

    #[test]
    fn empty_data_rejected() {
        let err = parse_request(&request("A,B", "   \n  ")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m.contains("must not be empty")));
    }

    #[test]
    fn single_row_rejected() {
        let err = parse_request(&request("A,B", "x,1\n")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m.contains("at least 2 data rows")));
    }

    #[test]
    fn ragged_row_rejected_with_position() {
        let err = parse_request(&request("A,B", "x,1\ny\n")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(m) if m.contains("data row 2")));
    }
}
