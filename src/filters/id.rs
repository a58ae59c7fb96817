use serde::{Deserialize, Serialize};

/// Closed set of filter identifiers, fixed at registry-build time.
///
/// The lowercase string forms are the stable wire names used by configs and
/// by the UI collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterId {
    Sobel,
    Scharr,
    Canny,
    Sato,
    Meijering,
    Prewitt,
    Farid,
    Hessian,
    CvRidge,
}

impl FilterId {
    /// Every identifier, in registration order.
    pub const ALL: [FilterId; 9] = [
        FilterId::Sobel,
        FilterId::Scharr,
        FilterId::Canny,
        FilterId::Sato,
        FilterId::Meijering,
        FilterId::Prewitt,
        FilterId::Farid,
        FilterId::Hessian,
        FilterId::CvRidge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterId::Sobel => "sobel",
            FilterId::Scharr => "scharr",
            FilterId::Canny => "canny",
            FilterId::Sato => "sato",
            FilterId::Meijering => "meijering",
            FilterId::Prewitt => "prewitt",
            FilterId::Farid => "farid",
            FilterId::Hessian => "hessian",
            FilterId::CvRidge => "cv_ridge",
        }
    }

    pub fn parse(name: &str) -> Option<FilterId> {
        FilterId::ALL.iter().copied().find(|id| id.as_str() == name)
    }
}

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_identifier() {
        for id in FilterId::ALL {
            assert_eq!(FilterId::parse(id.as_str()), Some(id));
        }
        assert_eq!(FilterId::parse("laplacian"), None);
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&FilterId::CvRidge).unwrap();
        assert_eq!(json, "\"cv_ridge\"");
    }
}
