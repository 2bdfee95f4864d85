use super::error::AppError;

/// Seoul districts tracked by the dashboard, plus the `All` sentinel used by
/// the filter bar. `All` is never sent to the backend: filter normalization
/// maps it to "no region filter" before a request or cache key is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Every district (no filter)
    #[default]
    All,
    /// 강남구
    Gangnam,
    /// 서초구
    Seocho,
    /// 송파구
    Songpa,
    /// 강동구
    Gangdong,
    /// 마포구
    Mapo,
    /// 용산구
    Yongsan,
    /// 성동구
    Seongdong,
    /// 광진구
    Gwangjin,
    /// 노원구
    Nowon,
    /// 강서구
    Gangseo,
    /// 영등포구
    Yeongdeungpo,
}

impl Region {
    /// Returns the ascii slug used in cache keys and selector values.
    pub const fn code(&self) -> &'static str {
        match self {
            Region::All => "all",
            Region::Gangnam => "gangnam",
            Region::Seocho => "seocho",
            Region::Songpa => "songpa",
            Region::Gangdong => "gangdong",
            Region::Mapo => "mapo",
            Region::Yongsan => "yongsan",
            Region::Seongdong => "seongdong",
            Region::Gwangjin => "gwangjin",
            Region::Nowon => "nowon",
            Region::Gangseo => "gangseo",
            Region::Yeongdeungpo => "yeongdeungpo",
        }
    }

    /// Returns the district name as it appears in transaction records and
    /// request bodies.
    pub const fn name(&self) -> &'static str {
        match self {
            Region::All => "전체",
            Region::Gangnam => "강남구",
            Region::Seocho => "서초구",
            Region::Songpa => "송파구",
            Region::Gangdong => "강동구",
            Region::Mapo => "마포구",
            Region::Yongsan => "용산구",
            Region::Seongdong => "성동구",
            Region::Gwangjin => "광진구",
            Region::Nowon => "노원구",
            Region::Gangseo => "강서구",
            Region::Yeongdeungpo => "영등포구",
        }
    }

    /// All selector entries, `All` first.
    pub fn all() -> &'static [Region] {
        &[
            Region::All,
            Region::Gangnam,
            Region::Seocho,
            Region::Songpa,
            Region::Gangdong,
            Region::Mapo,
            Region::Yongsan,
            Region::Seongdong,
            Region::Gwangjin,
            Region::Nowon,
            Region::Gangseo,
            Region::Yeongdeungpo,
        ]
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::all()
            .iter()
            .find(|r| r.code().eq_ignore_ascii_case(s) || r.name() == s)
            .copied()
            .ok_or_else(|| AppError::ConfigError(format!("Unknown region: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parsing() {
        assert_eq!("gangnam".parse::<Region>().unwrap(), Region::Gangnam);
        assert_eq!("GANGNAM".parse::<Region>().unwrap(), Region::Gangnam);
        assert_eq!("강남구".parse::<Region>().unwrap(), Region::Gangnam);
        assert_eq!("all".parse::<Region>().unwrap(), Region::All);
        assert!("busan".parse::<Region>().is_err());
    }

    #[test]
    fn test_all_starts_with_sentinel() {
        let regions = Region::all();
        assert_eq!(regions[0], Region::All);
        assert!(regions.len() > 1);
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = Region::all().iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Region::all().len());
    }
}
