use serde::{Deserialize, Serialize};

/// 월박스 유형별 설치비(기기 + 시공) 카탈로그.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WallboxPreset {
    /// 기본형
    Basic,
    /// 앱 제어 스마트형
    Smart,
    /// 고급형
    Premium,
    /// 일괄 설치(기본값)
    #[default]
    Complete,
}

impl WallboxPreset {
    pub const ALL: [WallboxPreset; 4] = [
        WallboxPreset::Basic,
        WallboxPreset::Smart,
        WallboxPreset::Premium,
        WallboxPreset::Complete,
    ];

    /// 총 설치비 [€].
    pub fn cost(self) -> f64 {
        match self {
            WallboxPreset::Basic => 800.0,
            WallboxPreset::Smart => 1_200.0,
            WallboxPreset::Premium => 1_800.0,
            WallboxPreset::Complete => 2_200.0,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            WallboxPreset::Basic => "basic",
            WallboxPreset::Smart => "smart",
            WallboxPreset::Premium => "premium",
            WallboxPreset::Complete => "complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn codes_match_serde_and_cli_names() {
        for preset in WallboxPreset::ALL {
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.as_code()));
            let cli = preset.to_possible_value().unwrap();
            assert_eq!(cli.get_name(), preset.as_code());
        }
    }

    #[test]
    fn catalog_is_ordered_by_price() {
        assert!(WallboxPreset::ALL
            .windows(2)
            .all(|w| w[0].cost() < w[1].cost()));
        assert_eq!(WallboxPreset::default(), WallboxPreset::Complete);
    }
}
