//! Data transfer objects for web requests and responses.

use serde::Serialize;

/// Name of the query parameter carrying route tokens.
pub const ROUTES_PARAM: &str = "routes";

/// Flatten every `routes` parameter into one list of route tokens.
///
/// The parameter may repeat and each occurrence may hold comma-separated
/// tokens, so `routes=50,84` and `routes=50&routes=84` are equivalent.
/// Order is preserved and duplicates are kept.
pub fn route_tokens(params: &[(String, String)]) -> Vec<String> {
    params
        .iter()
        .filter(|(name, _)| name == ROUTES_PARAM)
        .flat_map(|(_, value)| value.split(','))
        .map(str::to_string)
        .collect()
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn splits_and_flattens() {
        let tokens = route_tokens(&params(&[
            ("routes", "Red,84"),
            ("other", "x"),
            ("routes", "Brn"),
        ]));

        assert_eq!(tokens, ["Red", "84", "Brn"]);
    }

    #[test]
    fn keeps_duplicates_and_empty_tokens() {
        let tokens = route_tokens(&params(&[("routes", "84,,84")]));
        assert_eq!(tokens, ["84", "", "84"]);
    }

    #[test]
    fn no_routes_param_is_empty() {
        assert!(route_tokens(&params(&[("route", "84")])).is_empty());
    }

    proptest! {
        /// Comma-joined and repeated parameters yield the same tokens.
        #[test]
        fn comma_joined_equals_repeated(tokens in proptest::collection::vec("[A-Za-z0-9]{1,4}", 1..8)) {
            let joined = params(&[("routes", tokens.join(",").as_str())]);
            let repeated: Vec<_> = tokens
                .iter()
                .map(|t| ("routes".to_string(), t.clone()))
                .collect();

            prop_assert_eq!(route_tokens(&joined), tokens.clone());
            prop_assert_eq!(route_tokens(&repeated), tokens);
        }
    }
}
