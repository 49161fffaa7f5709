use serde::Deserialize;
use utoipa::IntoParams;

use crate::altitude::BandFilter;
use crate::snapshot::LOOKBACK_HOURS;
use crate::web::api::error::{ApiError, ApiResult};

/// Rewind offset and band visibility shared by the map views.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewQuery {
    /// Hours to rewind, 0 (now) to 23.
    #[serde(default)]
    pub offset: Option<usize>,
    /// Comma separated visible bands, e.g. `low,medium`. All when omitted.
    #[serde(default)]
    pub bands: Option<String>,
}

impl ViewQuery {
    pub fn resolve(&self) -> ApiResult<(usize, BandFilter)> {
        let offset = self.offset.unwrap_or(0);
        if offset >= LOOKBACK_HOURS {
            return Err(ApiError::Validation(format!(
                "offset must be below {}",
                LOOKBACK_HOURS
            )));
        }

        let filter = match &self.bands {
            Some(bands) => bands.parse::<BandFilter>()?,
            None => BandFilter::default(),
        };

        Ok((offset, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::altitude::AltitudeBand;

    #[test]
    fn test_defaults_to_now_and_all_bands() {
        let (offset, filter) = ViewQuery::default().resolve().unwrap();
        assert_eq!(offset, 0);
        assert_eq!(filter, BandFilter::default());
    }

    #[test]
    fn test_rejects_bad_input() {
        let query = ViewQuery {
            offset: Some(24),
            bands: None,
        };
        assert!(matches!(query.resolve(), Err(ApiError::Validation(_))));

        let query = ViewQuery {
            offset: Some(3),
            bands: Some("low,ultra".into()),
        };
        assert!(matches!(query.resolve(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_parses_bands() {
        let query = ViewQuery {
            offset: Some(5),
            bands: Some("high".into()),
        };
        let (offset, filter) = query.resolve().unwrap();
        assert_eq!(offset, 5);
        assert!(filter.is_enabled(AltitudeBand::High));
        assert!(!filter.is_enabled(AltitudeBand::Low));
    }
}
