#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum Model {
    #[strum(to_string = "claude-sonnet-4-20250514")]
    ClaudeSonnet420250514,
    #[strum(to_string = "claude-3-7-sonnet-20250219")]
    Claude37Sonnet20250219,
    #[strum(to_string = "claude-3-5-sonnet-20241022")]
    Claude35Sonnet20241022,
    #[strum(to_string = "claude-3-5-sonnet-latest")]
    Claude35SonnetLatest,
    #[strum(to_string = "claude-3-5-haiku-20241022")]
    Claude35Haiku20241022,
    #[strum(to_string = "claude-3-5-haiku-latest")]
    Claude35HaikuLatest,
    #[strum(to_string = "claude-3-haiku-20240307")]
    Claude3Haiku20240307,
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_model_identifiers() {
        assert_eq!(
            Model::Claude35Sonnet20241022.to_string(),
            "claude-3-5-sonnet-20241022"
        );
        let id: &'static str = Model::Claude35Haiku20241022.into();
        assert_eq!(id, "claude-3-5-haiku-20241022");
        assert_eq!(
            Model::from_str("claude-3-haiku-20240307").unwrap(),
            Model::Claude3Haiku20240307
        );
        let owned: String = Model::ClaudeSonnet420250514.into();
        assert_eq!(owned, "claude-sonnet-4-20250514");
    }
}
